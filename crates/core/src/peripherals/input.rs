use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::BoardResult;
use ledgrid_game::Line;

/// Shared input-line state. Scenario drivers hold one side and set levels;
/// the mapped peripheral reads them back when firmware samples the lines.
#[derive(Debug, Default)]
pub struct InputLines {
    levels: AtomicU8,
}

impl InputLines {
    pub fn set(&self, line: Line, level: bool) {
        let bit = 1u8 << line as u8;
        if level {
            self.levels.fetch_or(bit, Ordering::SeqCst);
        } else {
            self.levels.fetch_and(!bit, Ordering::SeqCst);
        }
    }

    pub fn get(&self, line: Line) -> bool {
        self.levels.load(Ordering::SeqCst) & (1 << line as u8) != 0
    }
}

/// Byte offset of a line within the input region.
pub fn line_offset(line: Line) -> u64 {
    match line {
        Line::Switch => 0x00,
        Line::BtnUp => 0x10,
        Line::BtnDown => 0x11,
        Line::BtnLeft => 0x12,
        Line::BtnRight => 0x13,
    }
}

fn line_at(offset: u64) -> Option<Line> {
    match offset {
        0x00 => Some(Line::Switch),
        0x10 => Some(Line::BtnUp),
        0x11 => Some(Line::BtnDown),
        0x12 => Some(Line::BtnLeft),
        0x13 => Some(Line::BtnRight),
        _ => None,
    }
}

/// Input pin block: one byte per line, 0 or 1. The lines are inputs, so bus
/// writes are ignored.
#[derive(Debug)]
pub struct InputPins {
    pub state: Arc<InputLines>,
}

impl InputPins {
    pub fn new(state: Arc<InputLines>) -> Self {
        Self { state }
    }
}

impl crate::Peripheral for InputPins {
    fn read(&self, offset: u64) -> BoardResult<u8> {
        Ok(line_at(offset).map(|l| self.state.get(l) as u8).unwrap_or(0))
    }

    fn write(&mut self, offset: u64, _value: u8) -> BoardResult<()> {
        tracing::debug!("Ignoring write to input line at offset {:#x}", offset);
        Ok(())
    }

    fn as_any(&self) -> Option<&dyn std::any::Any> {
        Some(self)
    }
}
