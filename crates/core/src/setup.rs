//! Mapping from configuration values to demo and board types.

use ledgrid_config::{DemoKind, DemoParams, LineId, PriorityOrder};
use ledgrid_game::demos::{Blink, Passthrough};
use ledgrid_game::trail::{Direction, TrailGame, TrailParams, RIGHT_FIRST, UP_FIRST};
use ledgrid_game::{Demo, Line};

pub fn line_for(id: LineId) -> Line {
    match id {
        LineId::Switch => Line::Switch,
        LineId::BtnUp => Line::BtnUp,
        LineId::BtnDown => Line::BtnDown,
        LineId::BtnLeft => Line::BtnLeft,
        LineId::BtnRight => Line::BtnRight,
    }
}

pub fn priority_for(order: PriorityOrder) -> [Direction; 4] {
    match order {
        PriorityOrder::UpFirst => UP_FIRST,
        PriorityOrder::RightFirst => RIGHT_FIRST,
    }
}

/// Instantiate the demo a config names, with its parameters applied.
pub fn build_demo(kind: DemoKind, params: &DemoParams) -> Box<dyn Demo> {
    match kind {
        DemoKind::Blink => Box::new(Blink::new()),
        DemoKind::Passthrough => Box::new(Passthrough),
        DemoKind::Trail => Box::new(TrailGame::new(TrailParams {
            trail_len: params.trail_len,
            priority: priority_for(params.priority),
            tick_ms: params.tick_ms,
            blink_ms: params.blink_ms,
        })),
    }
}
