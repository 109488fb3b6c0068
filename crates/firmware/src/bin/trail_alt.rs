#![no_std]
#![no_main]

use firmware::MmioBoard;
use ledgrid_game::trail::{TrailGame, TrailParams, RIGHT_FIRST};
use ledgrid_game::Demo;
use panic_halt as _;
use riscv_rt::entry;

#[entry]
fn main() -> ! {
    let mut board = MmioBoard::new();
    // Same game, the other steering priority found on shipped boards.
    let mut game = TrailGame::new(TrailParams {
        priority: RIGHT_FIRST,
        ..TrailParams::default()
    });
    loop {
        game.tick(&mut board);
    }
}
