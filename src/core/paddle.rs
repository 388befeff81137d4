//! Two-player paddle game.
//!
//! Paddle velocity comes from each player's right stick (raw retained
//! samples, deadzoned here) or is overridden by the discrete up/down
//! buttons. First player to [`WIN_SCORE`] freezes the match in a winner
//! state.

use crate::audio::Audio;
use crate::display::FrameBuffer;
use crate::types::{LogicalInput, AXIS_DEADZONE};

pub const WIN_SCORE: u32 = 5;
pub const PADDLE_HEIGHT: i32 = 5;

const PADDLE_SPEED: f32 = 0.6;
const BALL_BASE_SPEED: f32 = 0.8;
const BALL_SPEED_CAP: f32 = 2.5;
const BALL_SPEEDUP: f32 = 1.1;
/// Y deflection per pixel of offset from the paddle center.
const DEFLECT_PER_PIXEL: f32 = 0.18;

#[derive(Debug, Clone)]
pub struct PaddleGame {
    width: i32,
    height: i32,
    paddle_y: [f32; 2],
    ball_x: f32,
    ball_y: f32,
    ball_vx: f32,
    ball_vy: f32,
    /// Current speed multiplier over the base ball speed.
    ball_speed: f32,
    pub scores: [u32; 2],
    pub winner: Option<usize>,
}

impl PaddleGame {
    pub fn new(width: i32, height: i32) -> Self {
        let mut game = Self {
            width,
            height,
            paddle_y: [(height - PADDLE_HEIGHT) as f32 / 2.0; 2],
            ball_x: 0.0,
            ball_y: 0.0,
            ball_vx: 0.0,
            ball_vy: 0.0,
            ball_speed: 1.0,
            scores: [0, 0],
            winner: None,
        };
        game.serve(0);
        game
    }

    /// Reset the ball at center, heading toward `toward`'s side.
    fn serve(&mut self, toward: usize) {
        self.ball_x = self.width as f32 / 2.0;
        self.ball_y = self.height as f32 / 2.0;
        self.ball_speed = 1.0;
        self.ball_vx = if toward == 0 { -BALL_BASE_SPEED } else { BALL_BASE_SPEED };
        self.ball_vy = 0.25;
    }

    fn paddle_x(&self, player: usize) -> i32 {
        if player == 0 {
            1
        } else {
            self.width - 2
        }
    }

    pub fn update(&mut self, input: &LogicalInput, audio: &Audio) {
        if self.winner.is_some() {
            return;
        }

        // Paddle movement: discrete buttons win over the analog stick.
        for player in 0..2 {
            let p = &input.players[player];
            let vel = if p.up {
                -PADDLE_SPEED
            } else if p.down {
                PADDLE_SPEED
            } else {
                let axis = p.right.y;
                if axis.abs() > AXIS_DEADZONE {
                    axis * PADDLE_SPEED
                } else {
                    0.0
                }
            };
            self.paddle_y[player] =
                (self.paddle_y[player] + vel).clamp(0.0, (self.height - PADDLE_HEIGHT) as f32);
        }

        self.ball_x += self.ball_vx * self.ball_speed;
        self.ball_y += self.ball_vy * self.ball_speed;

        // Top/bottom walls.
        if self.ball_y < 0.0 {
            self.ball_y = -self.ball_y;
            self.ball_vy = self.ball_vy.abs();
        } else if self.ball_y > (self.height - 1) as f32 {
            self.ball_y = 2.0 * (self.height - 1) as f32 - self.ball_y;
            self.ball_vy = -self.ball_vy.abs();
        }

        // Paddle faces.
        for player in 0..2 {
            let px = self.paddle_x(player) as f32;
            let approaching = if player == 0 {
                self.ball_vx < 0.0 && self.ball_x <= px + 1.0
            } else {
                self.ball_vx > 0.0 && self.ball_x >= px - 1.0
            };
            if !approaching {
                continue;
            }
            let top = self.paddle_y[player];
            if self.ball_y >= top - 1.0 && self.ball_y <= top + PADDLE_HEIGHT as f32 {
                self.ball_vx = -self.ball_vx;
                self.ball_x = if player == 0 { px + 1.0 } else { px - 1.0 };
                // Deflect by strike offset from the paddle center.
                let offset = self.ball_y - (top + PADDLE_HEIGHT as f32 / 2.0);
                self.ball_vy += offset * DEFLECT_PER_PIXEL;
                self.ball_speed = (self.ball_speed * BALL_SPEEDUP).min(BALL_SPEED_CAP);
                audio.play("paddle");
            }
        }

        // Goals.
        if self.ball_x < 0.0 {
            self.point(1, audio);
        } else if self.ball_x > (self.width - 1) as f32 {
            self.point(0, audio);
        }
    }

    fn point(&mut self, player: usize, audio: &Audio) {
        self.scores[player] += 1;
        audio.play("score");
        if self.scores[player] >= WIN_SCORE {
            self.winner = Some(player);
            audio.play("milestone");
            audio.speak(&format!("Player {} wins!", player + 1), 150, 60);
        } else {
            self.serve(player);
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        // Center net.
        let cx = self.width / 2;
        let mut y = 0;
        while y < self.height {
            fb.set_pixel(cx, y, true);
            y += 3;
        }

        for player in 0..2 {
            let px = self.paddle_x(player);
            let top = self.paddle_y[player] as i32;
            fb.draw_line(px, top, px, top + PADDLE_HEIGHT - 1);
        }

        fb.set_pixel(self.ball_x as i32, self.ball_y as i32, true);

        fb.draw_text(cx - 12, 1, &self.scores[0].to_string());
        fb.draw_text(cx + 8, 1, &self.scores[1].to_string());

        if let Some(winner) = self.winner {
            fb.draw_centered_text(self.height / 2 - 2, &format!("P{} WINS!", winner + 1));
        }
    }
}
