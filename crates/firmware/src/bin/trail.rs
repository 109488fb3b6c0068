#![no_std]
#![no_main]

use firmware::MmioBoard;
use ledgrid_game::trail::{TrailGame, TrailParams};
use ledgrid_game::Demo;
use panic_halt as _;
use riscv_rt::entry;

#[entry]
fn main() -> ! {
    let mut board = MmioBoard::new();
    let mut game = TrailGame::new(TrailParams::default());
    loop {
        game.tick(&mut board);
    }
}
