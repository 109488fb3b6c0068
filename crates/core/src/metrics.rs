use crate::TickObserver;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

#[derive(Debug)]
pub struct TickMetrics {
    tick_count: AtomicU64,
    start_time: Instant,
}

impl Default for TickMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TickMetrics {
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn reset(&self) {
        self.tick_count.store(0, Ordering::SeqCst);
    }

    pub fn get_ticks(&self) -> u64 {
        self.tick_count.load(Ordering::SeqCst)
    }

    /// Host-side ticks per second since construction.
    pub fn get_tps(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_ticks() as f64 / elapsed
        } else {
            0.0
        }
    }
}

impl TickObserver for TickMetrics {
    fn on_tick_start(&self, _tick: u64) {
        self.tick_count.fetch_add(1, Ordering::SeqCst);
    }
}
