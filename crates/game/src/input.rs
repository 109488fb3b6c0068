//! Input line sampling.
//!
//! Pure level sampling: no debouncing, no edge detection. A held button is
//! re-asserted on every tick.

use bitflags::bitflags;

use crate::{BoardIo, Line};

bitflags! {
    /// Snapshot of all input line levels for one tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Lines: u8 {
        const SWITCH = 1 << 0;
        const UP = 1 << 1;
        const DOWN = 1 << 2;
        const LEFT = 1 << 3;
        const RIGHT = 1 << 4;
    }
}

impl Lines {
    /// Sample every line once.
    pub fn sample(io: &dyn BoardIo) -> Self {
        let mut lines = Lines::empty();
        for (line, flag) in [
            (Line::Switch, Lines::SWITCH),
            (Line::BtnUp, Lines::UP),
            (Line::BtnDown, Lines::DOWN),
            (Line::BtnLeft, Lines::LEFT),
            (Line::BtnRight, Lines::RIGHT),
        ] {
            if io.line(line) {
                lines |= flag;
            }
        }
        lines
    }

    /// Mirror the four button levels onto the indicator LEDs, one line per
    /// indicator, for visual confirmation of the sampled state.
    pub fn mirror_buttons(self, io: &mut dyn BoardIo) {
        for (index, flag) in [Lines::UP, Lines::DOWN, Lines::LEFT, Lines::RIGHT]
            .into_iter()
            .enumerate()
        {
            io.set_indicator(index, self.contains(flag));
        }
    }
}
