use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::sim::SimBoard;
use crate::TickObserver;
use ledgrid_config::{InputEvent, ScenarioLimits, StopReason};
use ledgrid_game::{Demo, DemoStatus};

use crate::setup::line_for;

#[derive(Debug, Clone, Copy)]
pub struct RunLimits {
    pub max_ticks: u64,
    pub wall_time: Option<Duration>,
}

impl RunLimits {
    pub fn ticks(max_ticks: u64) -> Self {
        Self {
            max_ticks,
            wall_time: None,
        }
    }
}

impl From<&ScenarioLimits> for RunLimits {
    fn from(limits: &ScenarioLimits) -> Self {
        Self {
            max_ticks: limits.max_ticks,
            wall_time: limits.wall_time_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RunOutcome {
    pub stop_reason: StopReason,
    pub ticks: u64,
}

/// Drives a demo on a simulated board: applies scheduled input events before
/// each tick, notifies observers, and enforces the run limits.
pub struct Runner {
    pub board: SimBoard,
    pub demo: Box<dyn Demo>,
    pub observers: Vec<Arc<dyn TickObserver>>,
}

impl Runner {
    pub fn new(board: SimBoard, demo: Box<dyn Demo>) -> Self {
        Self {
            board,
            demo,
            observers: Vec::new(),
        }
    }

    pub fn run(
        &mut self,
        limits: RunLimits,
        inputs: &[InputEvent],
        mut on_tick: impl FnMut(u64, &SimBoard),
    ) -> RunOutcome {
        for observer in &self.observers {
            observer.on_run_start();
        }

        let started = Instant::now();
        let mut ticks = 0u64;
        // One extra tick runs after the game-over transition so the first
        // face frame lands in the framebuffer before the run stops.
        let mut game_over_seen = false;

        let stop_reason = loop {
            if ticks >= limits.max_ticks {
                break StopReason::MaxTicks;
            }
            if let Some(wall) = limits.wall_time {
                if started.elapsed() >= wall {
                    break StopReason::WallTime;
                }
            }

            let tick = ticks + 1;
            for event in inputs.iter().filter(|e| e.tick == tick) {
                self.board.press(line_for(event.line), event.level);
            }

            for observer in &self.observers {
                observer.on_tick_start(tick);
            }
            self.demo.tick(&mut self.board);
            ticks = tick;
            for observer in &self.observers {
                observer.on_tick_end(tick);
            }
            on_tick(tick, &self.board);

            if self.demo.status() == DemoStatus::GameOver {
                if game_over_seen {
                    break StopReason::GameOver;
                }
                game_over_seen = true;
            }
        };

        for observer in &self.observers {
            observer.on_run_stop();
        }
        tracing::debug!("Run stopped after {} ticks: {:?}", ticks, stop_reason);

        RunOutcome { stop_reason, ticks }
    }
}
