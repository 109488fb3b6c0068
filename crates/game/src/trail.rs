//! The trail game.
//!
//! A single head cell moves across the 16x16 matrix leaving a fading trail:
//! every cell the head enters gets a countdown counter, rendered red until it
//! expires. Steering onto any cell with a live counter (including pressing
//! into a wall, which clamps the move back onto the head's own cell) ends the
//! game and starts the two-frame blink animation.

use crate::{col_bit, faces, input::Lines, BoardIo, Channel, Demo, DemoStatus, GRID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    fn line(self) -> Lines {
        match self {
            Direction::Up => Lines::UP,
            Direction::Right => Lines::RIGHT,
            Direction::Down => Lines::DOWN,
            Direction::Left => Lines::LEFT,
        }
    }
}

/// Steering priority used when several buttons are held at once. The order is
/// an arbitrary policy choice; both presets ship on real boards.
pub const UP_FIRST: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Right,
    Direction::Left,
];

pub const RIGHT_FIRST: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Up,
    Direction::Left,
];

/// Grid coordinates, always within [0, GRID) on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    fn stepped(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        let max = (GRID - 1) as i16;
        Position {
            x: (self.x as i16 + dx as i16).clamp(0, max) as u8,
            y: (self.y as i16 + dy as i16).clamp(0, max) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    BlinkA,
    BlinkB,
}

#[derive(Debug, Clone)]
pub struct TrailParams {
    /// Counter value a cell receives when the head enters it.
    pub trail_len: u8,
    pub priority: [Direction; 4],
    /// Delay at the end of each gameplay tick.
    pub tick_ms: u32,
    /// Delay between blink frames after game over.
    pub blink_ms: u32,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            trail_len: 8,
            priority: UP_FIRST,
            tick_ms: 150,
            blink_ms: 400,
        }
    }
}

pub struct TrailGame {
    params: TrailParams,
    head: Position,
    dir: Direction,
    trail: [[u8; GRID]; GRID],
    phase: Phase,
}

impl TrailGame {
    pub fn new(params: TrailParams) -> Self {
        Self {
            params,
            head: Position { x: 8, y: 8 },
            dir: Direction::Up,
            trail: [[0; GRID]; GRID],
            phase: Phase::Running,
        }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trail_at(&self, x: u8, y: u8) -> u8 {
        self.trail[y as usize][x as usize]
    }

    fn steer(&mut self, lines: Lines) {
        if let Some(dir) = self
            .params
            .priority
            .iter()
            .copied()
            .find(|dir| lines.contains(dir.line()))
        {
            self.dir = dir;
        }
    }

    fn render(&self, io: &mut dyn BoardIo) {
        for y in 0..GRID {
            let mut red = 0u16;
            for x in 0..GRID {
                if self.trail[y][x] != 0 {
                    red |= col_bit(x);
                }
            }
            let green = if self.head.y as usize == y {
                col_bit(self.head.x as usize)
            } else {
                0
            };
            io.write_row(Channel::Red, y, red);
            io.write_row(Channel::Green, y, green);
        }
    }

    fn render_face(&self, io: &mut dyn BoardIo) {
        let rows = match self.phase {
            Phase::BlinkB => &faces::FACE_B,
            _ => &faces::FACE_A,
        };
        for y in 0..GRID {
            io.write_row(Channel::Red, y, rows[y]);
            io.write_row(Channel::Green, y, 0);
        }
    }

    /// Age every live counter except the head's own cell, which keeps the
    /// value it was just set to until the head leaves it.
    fn decay(&mut self) {
        for y in 0..GRID {
            for x in 0..GRID {
                if (x, y) == (self.head.x as usize, self.head.y as usize) {
                    continue;
                }
                if self.trail[y][x] != 0 {
                    self.trail[y][x] -= 1;
                }
            }
        }
    }
}

impl Demo for TrailGame {
    fn tick(&mut self, io: &mut dyn BoardIo) {
        let lines = Lines::sample(io);
        lines.mirror_buttons(io);

        if self.phase != Phase::Running {
            self.render_face(io);
            self.phase = match self.phase {
                Phase::BlinkA => Phase::BlinkB,
                _ => Phase::BlinkA,
            };
            io.delay_ms(self.params.blink_ms);
            return;
        }

        self.steer(lines);
        let next = self.head.stepped(self.dir);
        if self.trail[next.y as usize][next.x as usize] != 0 {
            // Collision: freeze position and trail, skip this tick's render.
            self.phase = Phase::BlinkA;
            io.delay_ms(self.params.tick_ms);
            return;
        }

        self.head = next;
        self.trail[next.y as usize][next.x as usize] = self.params.trail_len;
        self.render(io);
        self.decay();
        io.delay_ms(self.params.tick_ms);
    }

    fn status(&self) -> DemoStatus {
        if self.phase == Phase::Running {
            DemoStatus::Running
        } else {
            DemoStatus::GameOver
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeBoard;
    use crate::Line;

    fn game() -> TrailGame {
        TrailGame::new(TrailParams::default())
    }

    #[test]
    fn head_steps_up_from_center() {
        let mut board = FakeBoard::new();
        let mut game = game();

        game.tick(&mut board);

        assert_eq!(game.head(), Position { x: 8, y: 7 });
        assert_eq!(game.trail_at(8, 7), 8);
        assert_eq!(board.green[7], col_bit(8));
        assert_eq!(board.red[7], col_bit(8));
        for y in (0..GRID).filter(|&y| y != 7) {
            assert_eq!(board.green[y], 0);
            assert_eq!(board.red[y], 0);
        }
    }

    #[test]
    fn direction_persists_without_input() {
        let mut board = FakeBoard::new();
        let mut game = game();
        board.press(Line::BtnRight);
        game.tick(&mut board);
        board.release(Line::BtnRight);
        game.tick(&mut board);

        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.head(), Position { x: 10, y: 8 });
    }

    #[test]
    fn up_first_priority_prefers_up() {
        let mut board = FakeBoard::new();
        let mut game = game();
        board.press(Line::BtnUp);
        board.press(Line::BtnRight);

        game.tick(&mut board);
        assert_eq!(game.direction(), Direction::Up);
    }

    #[test]
    fn right_first_priority_prefers_right() {
        let mut board = FakeBoard::new();
        let mut game = TrailGame::new(TrailParams {
            priority: RIGHT_FIRST,
            ..TrailParams::default()
        });
        board.press(Line::BtnUp);
        board.press(Line::BtnRight);

        game.tick(&mut board);
        assert_eq!(game.direction(), Direction::Right);
    }

    #[test]
    fn clamps_at_the_right_edge() {
        let mut board = FakeBoard::new();
        let mut game = game();
        board.press(Line::BtnRight);

        // 8 -> 15 takes seven ticks; the eighth presses into the wall.
        for _ in 0..7 {
            game.tick(&mut board);
        }
        assert_eq!(game.head(), Position { x: 15, y: 8 });
        assert_eq!(game.phase(), Phase::Running);

        // Clamped move lands on the head's own live trail cell.
        game.tick(&mut board);
        assert_eq!(game.head(), Position { x: 15, y: 8 });
        assert_eq!(game.phase(), Phase::BlinkA);
    }

    #[test]
    fn decay_ages_everything_but_the_head_cell() {
        let mut board = FakeBoard::new();
        let mut game = game();

        game.tick(&mut board); // head (8,7)
        game.tick(&mut board); // head (8,6)

        assert_eq!(game.trail_at(8, 6), 8);
        assert_eq!(game.trail_at(8, 7), 7);

        game.tick(&mut board); // head (8,5)
        assert_eq!(game.trail_at(8, 5), 8);
        assert_eq!(game.trail_at(8, 6), 7);
        assert_eq!(game.trail_at(8, 7), 6);
    }

    #[test]
    fn expired_cells_stay_at_zero() {
        let mut board = FakeBoard::new();
        let mut game = TrailGame::new(TrailParams {
            trail_len: 2,
            ..TrailParams::default()
        });

        for _ in 0..6 {
            game.tick(&mut board);
        }
        // Head is at (8,2); (8,7) expired ticks ago and must not wrap.
        assert_eq!(game.trail_at(8, 7), 0);
        assert_eq!(game.trail_at(8, 6), 0);
    }

    #[test]
    fn collision_freezes_position_and_trail() {
        let mut board = FakeBoard::new();
        let mut game = game();

        // Straight up into the top wall: seven moves, then the clamped step
        // collides with the head's own cell.
        for _ in 0..8 {
            game.tick(&mut board);
        }
        assert_eq!(game.head(), Position { x: 8, y: 0 });
        assert_eq!(game.phase(), Phase::Running);

        let frozen_red = board.red;
        game.tick(&mut board);
        assert_eq!(game.phase(), Phase::BlinkA);
        assert_eq!(game.status(), DemoStatus::GameOver);
        // Render was skipped on the collision tick.
        assert_eq!(board.red, frozen_red);

        let head = game.head();
        let trail_before: Vec<u8> = (0..GRID as u8)
            .flat_map(|y| (0..GRID as u8).map(move |x| (x, y)))
            .map(|(x, y)| game.trail_at(x, y))
            .collect();

        for _ in 0..5 {
            board.press(Line::BtnLeft);
            game.tick(&mut board);
        }
        assert_eq!(game.head(), head);
        let trail_after: Vec<u8> = (0..GRID as u8)
            .flat_map(|y| (0..GRID as u8).map(move |x| (x, y)))
            .map(|(x, y)| game.trail_at(x, y))
            .collect();
        assert_eq!(trail_before, trail_after);
    }

    #[test]
    fn game_over_blink_is_a_two_cycle() {
        let mut board = FakeBoard::new();
        let mut game = game();
        for _ in 0..9 {
            game.tick(&mut board);
        }
        assert_eq!(game.phase(), Phase::BlinkA);

        game.tick(&mut board);
        let first = board.red;
        assert_eq!(first, faces::FACE_A);
        assert_eq!(board.green, [0; GRID]);

        game.tick(&mut board);
        let second = board.red;
        assert_eq!(second, faces::FACE_B);

        game.tick(&mut board);
        assert_eq!(board.red, first);
        game.tick(&mut board);
        assert_eq!(board.red, second);
    }

    #[test]
    fn head_stays_in_bounds_under_arbitrary_input() {
        let mut board = FakeBoard::new();
        let mut game = game();
        let presses = [Line::BtnLeft, Line::BtnUp, Line::BtnLeft, Line::BtnDown];

        for round in 0..40 {
            board.lines = [false; 5];
            board.press(presses[round % presses.len()]);
            game.tick(&mut board);
            let head = game.head();
            assert!((head.x as usize) < GRID);
            assert!((head.y as usize) < GRID);
        }
    }
}
