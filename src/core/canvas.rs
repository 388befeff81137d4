//! Free-draw canvas with an eased analog cursor and an undo log.

use crate::audio::Audio;
use crate::display::FrameBuffer;
use crate::types::{LogicalInput, AXIS_DEADZONE};

/// Ticks of inactivity before the mode hands control back to the menu.
pub const IDLE_TIMEOUT_TICKS: u32 = 1800;
/// Fraction of the remaining distance covered per tick.
const EASE: f32 = 0.25;
/// Cursor speed at full stick deflection, pixels per tick.
const CURSOR_SPEED: f32 = 1.2;
/// Cursor blink cadence while hovering.
const BLINK_TICKS: u32 = 8;

#[derive(Debug, Clone)]
pub struct CanvasGame {
    width: i32,
    height: i32,
    cursor_x: f32,
    cursor_y: f32,
    /// Smoothed velocity target the cursor eases toward.
    vel_x: f32,
    vel_y: f32,
    /// Drawn cells in insertion order; doubles as the undo log.
    cells: Vec<(i32, i32)>,
    idle_ticks: u32,
    frame: u32,
}

impl CanvasGame {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cursor_x: width as f32 / 2.0,
            cursor_y: height as f32 / 2.0,
            vel_x: 0.0,
            vel_y: 0.0,
            cells: Vec::new(),
            idle_ticks: 0,
            frame: 0,
        }
    }

    pub fn cursor_cell(&self) -> (i32, i32) {
        (self.cursor_x as i32, self.cursor_y as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// True when the idle timeout expired and the session should return to
    /// the menu.
    pub fn update(&mut self, input: &LogicalInput, audio: &Audio) -> bool {
        self.frame = self.frame.wrapping_add(1);

        let stick = input.players[0].left;
        let target_x = if stick.x.abs() > AXIS_DEADZONE { stick.x * CURSOR_SPEED } else { 0.0 };
        let target_y = if stick.y.abs() > AXIS_DEADZONE { stick.y * CURSOR_SPEED } else { 0.0 };
        // Eased approach: velocity closes a fixed fraction of the gap per
        // tick, so motion never snaps.
        self.vel_x += (target_x - self.vel_x) * EASE;
        self.vel_y += (target_y - self.vel_y) * EASE;
        self.cursor_x = (self.cursor_x + self.vel_x).clamp(0.0, (self.width - 1) as f32);
        self.cursor_y = (self.cursor_y + self.vel_y).clamp(0.0, (self.height - 1) as f32);

        let mut active = false;
        if input.jump || input.duck {
            let cell = self.cursor_cell();
            if !self.cells.contains(&cell) {
                self.cells.push(cell);
                audio.play("paint");
            }
            active = true;
        }
        if input.back {
            if self.cells.pop().is_some() {
                audio.play("undo");
            }
            active = true;
        }

        if active {
            self.idle_ticks = 0;
        } else {
            self.idle_ticks += 1;
        }
        self.idle_ticks >= IDLE_TIMEOUT_TICKS
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        for &(x, y) in &self.cells {
            fb.set_pixel(x, y, true);
        }
        // Blinking cursor so it stays visible over painted cells.
        if (self.frame / BLINK_TICKS) % 2 == 0 {
            let (cx, cy) = self.cursor_cell();
            fb.set_pixel(cx, cy, !fb.get_pixel(cx, cy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint_input() -> LogicalInput {
        LogicalInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn painting_appends_once_per_cell() {
        let mut game = CanvasGame::new(128, 19);
        let audio = Audio::disabled();
        game.update(&paint_input(), &audio);
        game.update(&paint_input(), &audio);
        assert_eq!(game.cell_count(), 1);
    }

    #[test]
    fn undo_pops_most_recent_cell() {
        let mut game = CanvasGame::new(128, 19);
        let audio = Audio::disabled();
        game.update(&paint_input(), &audio);
        let first = game.cells[0];
        game.cursor_x += 5.0;
        game.update(&paint_input(), &audio);
        assert_eq!(game.cell_count(), 2);

        let mut input = LogicalInput::default();
        input.back = true;
        game.update(&input, &audio);
        assert_eq!(game.cell_count(), 1);
        assert_eq!(game.cells[0], first);
    }

    #[test]
    fn undo_on_empty_canvas_is_harmless() {
        let mut game = CanvasGame::new(128, 19);
        let audio = Audio::disabled();
        let mut input = LogicalInput::default();
        input.back = true;
        assert!(!game.update(&input, &audio));
        assert_eq!(game.cell_count(), 0);
    }

    #[test]
    fn idle_timeout_requests_exit() {
        let mut game = CanvasGame::new(128, 19);
        let audio = Audio::disabled();
        let idle = LogicalInput::default();
        for _ in 0..IDLE_TIMEOUT_TICKS - 1 {
            assert!(!game.update(&idle, &audio));
        }
        assert!(game.update(&idle, &audio));
    }

    #[test]
    fn activity_resets_the_idle_clock() {
        let mut game = CanvasGame::new(128, 19);
        let audio = Audio::disabled();
        let idle = LogicalInput::default();
        for _ in 0..IDLE_TIMEOUT_TICKS - 1 {
            game.update(&idle, &audio);
        }
        game.update(&paint_input(), &audio);
        for _ in 0..IDLE_TIMEOUT_TICKS - 1 {
            assert!(!game.update(&idle, &audio));
        }
    }

    #[test]
    fn cursor_eases_instead_of_snapping() {
        let mut game = CanvasGame::new(128, 19);
        let audio = Audio::disabled();
        let start = game.cursor_x;
        let mut input = LogicalInput::default();
        input.players[0].left.x = 1.0;
        game.update(&input, &audio);
        let first_step = game.cursor_x - start;
        assert!(first_step > 0.0);
        assert!(first_step < CURSOR_SPEED, "first step must be eased, not full speed");
        game.update(&input, &audio);
        // Converging toward full speed.
        assert!(game.cursor_x - start - first_step > first_step);
    }

    #[test]
    fn cursor_clamps_to_the_field() {
        let mut game = CanvasGame::new(16, 8);
        let audio = Audio::disabled();
        let mut input = LogicalInput::default();
        input.players[0].left.x = 1.0;
        input.players[0].left.y = 1.0;
        for _ in 0..500 {
            game.update(&input, &audio);
        }
        assert_eq!(game.cursor_cell(), (15, 7));
    }
}
