#![no_std]
#![no_main]

use firmware::MmioBoard;
use ledgrid_game::demos::Blink;
use ledgrid_game::Demo;
use panic_halt as _;
use riscv_rt::entry;

#[entry]
fn main() -> ! {
    let mut board = MmioBoard::new();
    let mut demo = Blink::new();
    loop {
        demo.tick(&mut board);
    }
}
