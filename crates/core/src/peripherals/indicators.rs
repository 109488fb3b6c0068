use crate::BoardResult;
use ledgrid_game::INDICATORS;

/// The four indicator LEDs, one byte each. Any nonzero write latches the LED
/// on; the levels read back.
#[derive(Debug, Default)]
pub struct Indicators {
    levels: [bool; INDICATORS],
}

impl Indicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> [bool; INDICATORS] {
        self.levels
    }
}

impl crate::Peripheral for Indicators {
    fn read(&self, offset: u64) -> BoardResult<u8> {
        let index = offset as usize;
        Ok(if index < INDICATORS {
            self.levels[index] as u8
        } else {
            0
        })
    }

    fn write(&mut self, offset: u64, value: u8) -> BoardResult<()> {
        let index = offset as usize;
        if index < INDICATORS {
            self.levels[index] = value != 0;
        }
        Ok(())
    }

    fn as_any(&self) -> Option<&dyn std::any::Any> {
        Some(self)
    }
}
