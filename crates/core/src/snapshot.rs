use serde::{Deserialize, Serialize};

use crate::peripherals::Frame;
use crate::sim::SimBoard;
use ledgrid_game::{BoardIo, Line, INDICATORS};

#[derive(Serialize, Deserialize, Debug)]
pub struct BoardSnapshot {
    #[serde(rename = "type")]
    pub kind: String,
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub inputs: InputSnapshot,
    pub indicators: [bool; INDICATORS],
    pub matrix: Frame,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InputSnapshot {
    pub switch: bool,
    pub buttons: [bool; 4],
}

impl BoardSnapshot {
    pub fn capture(board: &SimBoard, ticks: u64) -> Self {
        Self {
            kind: "sim_board".to_string(),
            ticks,
            elapsed_ms: board.elapsed_ms(),
            inputs: InputSnapshot {
                switch: board.line(Line::Switch),
                buttons: [
                    board.line(Line::BtnUp),
                    board.line(Line::BtnDown),
                    board.line(Line::BtnLeft),
                    board.line(Line::BtnRight),
                ],
            },
            indicators: board.indicator_levels(),
            matrix: board.frame(),
        }
    }
}
