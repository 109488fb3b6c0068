use std::sync::Arc;
use std::time::Duration;

use crate::bus::{
    BoardBus, INDICATOR_REGION_SIZE, INPUT_REGION_SIZE, MATRIX_REGION_OFFSET, MATRIX_REGION_SIZE,
};
use crate::peripherals::{line_offset, Frame, Indicators, InputLines, InputPins, MatrixDisplay};
use crate::Bus;
use ledgrid_config::BoardLayout;
use ledgrid_game::{BoardIo, Channel, Line, GRID, INDICATORS};

/// How `delay_ms` passes time: real sleeps for interactive runs, a virtual
/// accumulator for tests and scripted scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    RealTime,
    Virtual,
}

/// Host-side implementation of [`BoardIo`], backed by the modeled system bus
/// so every access goes through the board's memory map.
pub struct SimBoard {
    pub bus: BoardBus,
    layout: BoardLayout,
    inputs: Arc<InputLines>,
    clock: ClockMode,
    elapsed_ms: u64,
}

impl SimBoard {
    pub fn new(clock: ClockMode) -> Self {
        Self::with_layout(BoardLayout::default(), clock)
    }

    pub fn with_layout(layout: BoardLayout, clock: ClockMode) -> Self {
        let inputs = Arc::new(InputLines::default());

        let mut bus = BoardBus::new();
        bus.attach(
            "input",
            layout.input_base,
            INPUT_REGION_SIZE,
            Box::new(InputPins::new(inputs.clone())),
        );
        bus.attach(
            "indicators",
            layout.output_base,
            INDICATOR_REGION_SIZE,
            Box::new(Indicators::new()),
        );
        bus.attach(
            "matrix",
            layout.output_base + MATRIX_REGION_OFFSET,
            MATRIX_REGION_SIZE,
            Box::new(MatrixDisplay::new()),
        );

        Self {
            bus,
            layout,
            inputs,
            clock,
            elapsed_ms: 0,
        }
    }

    /// Set an input line level, as a finger on the board would.
    pub fn press(&self, line: Line, level: bool) {
        self.inputs.set(line, level);
    }

    pub fn frame(&self) -> Frame {
        self.bus
            .device::<MatrixDisplay>("matrix")
            .map(MatrixDisplay::frame)
            .unwrap_or_default()
    }

    pub fn indicator_levels(&self) -> [bool; INDICATORS] {
        self.bus
            .device::<Indicators>("indicators")
            .map(Indicators::levels)
            .unwrap_or_default()
    }

    /// Milliseconds of board time consumed by `delay_ms` so far.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    fn row_addr(&self, channel: Channel, row: usize) -> u64 {
        let bank = match channel {
            Channel::Red => 0,
            Channel::Green => 2 * GRID as u64,
        };
        self.layout.output_base + MATRIX_REGION_OFFSET + bank + 2 * row as u64
    }
}

impl BoardIo for SimBoard {
    fn line(&self, line: Line) -> bool {
        match self.bus.read_u8(self.layout.input_base + line_offset(line)) {
            Ok(level) => level != 0,
            Err(e) => {
                tracing::error!("Input line read failed: {}", e);
                false
            }
        }
    }

    fn set_indicator(&mut self, index: usize, on: bool) {
        if index >= INDICATORS {
            tracing::error!("Indicator index {} out of range", index);
            return;
        }
        let addr = self.layout.output_base + index as u64;
        if let Err(e) = self.bus.write_u8(addr, on as u8) {
            tracing::error!("Indicator write failed: {}", e);
        }
    }

    fn write_row(&mut self, channel: Channel, row: usize, bits: u16) {
        if row >= GRID {
            tracing::error!("Matrix row {} out of range", row);
            return;
        }
        let addr = self.row_addr(channel, row);
        if let Err(e) = self.bus.write_u16(addr, bits) {
            tracing::error!("Matrix row write failed: {}", e);
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += ms as u64;
        if self.clock == ClockMode::RealTime {
            std::thread::sleep(Duration::from_millis(ms as u64));
        }
    }
}
