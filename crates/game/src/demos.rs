//! The two trivial demos: indicator blink and switch passthrough.

use crate::{BoardIo, Demo, Line};

/// Toggles indicator 0 once per second while mirroring the switch onto
/// indicator 1, matching the board's original power-on demo.
pub struct Blink {
    lit: bool,
}

impl Blink {
    pub fn new() -> Self {
        Self { lit: false }
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for Blink {
    fn tick(&mut self, io: &mut dyn BoardIo) {
        self.lit = !self.lit;
        io.set_indicator(0, self.lit);
        io.set_indicator(1, io.line(Line::Switch));
        io.delay_ms(1000);
    }
}

/// Mirrors the switch level onto indicator 1 at a fast poll rate.
pub struct Passthrough;

impl Demo for Passthrough {
    fn tick(&mut self, io: &mut dyn BoardIo) {
        io.set_indicator(1, io.line(Line::Switch));
        io.delay_ms(10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeBoard;

    #[test]
    fn blink_toggles_indicator_zero() {
        let mut board = FakeBoard::new();
        let mut demo = Blink::new();

        demo.tick(&mut board);
        assert!(board.indicators[0]);
        demo.tick(&mut board);
        assert!(!board.indicators[0]);
        assert_eq!(board.slept_ms, 2000);
    }

    #[test]
    fn blink_mirrors_the_switch() {
        let mut board = FakeBoard::new();
        let mut demo = Blink::new();

        board.press(Line::Switch);
        demo.tick(&mut board);
        assert!(board.indicators[1]);

        board.release(Line::Switch);
        demo.tick(&mut board);
        assert!(!board.indicators[1]);
    }

    #[test]
    fn passthrough_follows_the_switch_level() {
        let mut board = FakeBoard::new();
        let mut demo = Passthrough;

        demo.tick(&mut board);
        assert!(!board.indicators[1]);

        board.press(Line::Switch);
        demo.tick(&mut board);
        assert!(board.indicators[1]);
    }
}
