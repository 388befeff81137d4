//! Grid-movement game: a snake on a coarse cell grid.
//!
//! Movement runs on its own tick cadence, independent of the render rate.
//! Direction changes are buffered and applied only when the snake actually
//! moves, and an exact reversal is rejected while a body exists.

use std::collections::VecDeque;

use rand::Rng;

use crate::audio::Audio;
use crate::display::FrameBuffer;
use crate::types::{LogicalInput, AXIS_DEADZONE};

/// Pixels per grid cell.
pub const CELL: i32 = 2;
/// Initial ticks between moves, and the floor it shrinks toward.
pub const MOVE_INTERVAL_START: u32 = 9;
pub const MOVE_INTERVAL_FLOOR: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    fn opposite(&self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridGame {
    grid_w: i32,
    grid_h: i32,
    /// Head first.
    body: VecDeque<(i32, i32)>,
    heading: Heading,
    pending: Heading,
    food: (i32, i32),
    move_interval: u32,
    move_timer: u32,
    pub score: u32,
    pub game_over: bool,
}

impl GridGame {
    pub fn new<R: Rng>(rng: &mut R, width: i32, height: i32) -> Self {
        // Leave a pixel row for the ground/border on panel-sized displays.
        let grid_w = (width - 2) / CELL;
        let grid_h = (height - 2) / CELL;
        let mut body = VecDeque::new();
        let cx = grid_w / 2;
        let cy = grid_h / 2;
        body.push_back((cx, cy));
        body.push_back((cx - 1, cy));
        body.push_back((cx - 2, cy));
        let mut game = Self {
            grid_w,
            grid_h,
            body,
            heading: Heading::Right,
            pending: Heading::Right,
            food: (0, 0),
            move_interval: MOVE_INTERVAL_START,
            move_timer: MOVE_INTERVAL_START,
            score: 0,
            game_over: false,
        };
        game.food = game.free_cell(rng);
        game
    }

    pub fn head(&self) -> (i32, i32) {
        *self.body.front().expect("body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Buffer a direction change. An exact reversal is rejected while the
    /// snake has a body to run into.
    pub fn steer(&mut self, dir: Heading) {
        if self.body.len() > 1 && dir == self.heading.opposite() {
            return;
        }
        self.pending = dir;
    }

    /// Pick a uniformly random cell not occupied by the body.
    fn free_cell<R: Rng>(&self, rng: &mut R) -> (i32, i32) {
        loop {
            let cell = (rng.gen_range(0..self.grid_w), rng.gen_range(0..self.grid_h));
            if !self.body.contains(&cell) {
                return cell;
            }
        }
    }

    pub fn update<R: Rng>(&mut self, rng: &mut R, input: &LogicalInput, audio: &Audio) {
        if self.game_over {
            if input.jump {
                *self = Self::new(rng, self.grid_w * CELL + 2, self.grid_h * CELL + 2);
                audio.play("start");
            }
            return;
        }

        let p = &input.players[0];
        if p.up || p.left.y < -AXIS_DEADZONE {
            self.steer(Heading::Up);
        } else if p.down || p.left.y > AXIS_DEADZONE {
            self.steer(Heading::Down);
        } else if p.left.x < -AXIS_DEADZONE {
            self.steer(Heading::Left);
        } else if p.left.x > AXIS_DEADZONE {
            self.steer(Heading::Right);
        }

        self.move_timer = self.move_timer.saturating_sub(1);
        if self.move_timer > 0 {
            return;
        }
        self.move_timer = self.move_interval;
        self.step(rng, audio);
    }

    /// Advance the snake one cell.
    fn step<R: Rng>(&mut self, rng: &mut R, audio: &Audio) {
        self.heading = self.pending;
        let (dx, dy) = self.heading.delta();
        let (hx, hy) = self.head();
        let next = (hx + dx, hy + dy);

        let hit_wall = next.0 < 0 || next.1 < 0 || next.0 >= self.grid_w || next.1 >= self.grid_h;
        // The tail cell vacates this step unless we grow into food.
        let growing = next == self.food;
        let hit_self = self
            .body
            .iter()
            .take(if growing { self.body.len() } else { self.body.len() - 1 })
            .any(|&c| c == next);

        if hit_wall || hit_self {
            self.game_over = true;
            audio.play("gameover");
            return;
        }

        self.body.push_front(next);
        if growing {
            self.score += 1;
            self.food = self.free_cell(rng);
            self.move_interval = (self.move_interval - 1).max(MOVE_INTERVAL_FLOOR);
            audio.play("score");
        } else {
            self.body.pop_back();
        }
    }

    fn fill_cell(fb: &mut FrameBuffer, cell: (i32, i32)) {
        let px = 1 + cell.0 * CELL;
        let py = 1 + cell.1 * CELL;
        for dy in 0..CELL {
            for dx in 0..CELL {
                fb.set_pixel(px + dx, py + dy, true);
            }
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        for &cell in &self.body {
            Self::fill_cell(fb, cell);
        }
        Self::fill_cell(fb, self.food);

        if self.game_over {
            fb.draw_centered_text((self.grid_h * CELL) / 2 - 2, "GAME OVER");
        }
    }
}
