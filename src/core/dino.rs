//! The player-controlled dinosaur.

use crate::core::collision::Hitbox;
use crate::display::sprites::{
    DINO_DUCK, DINO_DUCK_HEIGHT, DINO_JUMP, DINO_RUN_1, DINO_RUN_2, DINO_STAND_HEIGHT, DINO_WIDTH,
};
use crate::types::{DUCK_MIN_TICKS, GRAVITY, JUMP_VELOCITY};

/// Hitbox fairness inset, pixels on every side.
const HITBOX_INSET: f32 = 1.0;
/// Run-cycle cadence: sprite frames alternate every this many ticks.
const RUN_FRAME_TICKS: u32 = 6;

#[derive(Debug, Clone)]
pub struct Dinosaur {
    pub x: i32,
    pub y: f32,
    vy: f32,
    on_ground: bool,
    ducking: bool,
    duck_timer: u32,
    height: i32,
    frame: u32,
    ground_y: i32,
}

impl Dinosaur {
    /// `ground_y` is the pixel row of the ground line.
    pub fn new(ground_y: i32) -> Self {
        Self {
            x: 10,
            y: (ground_y - DINO_STAND_HEIGHT) as f32,
            vy: 0.0,
            on_ground: true,
            ducking: false,
            duck_timer: 0,
            height: DINO_STAND_HEIGHT,
            frame: 0,
            ground_y,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn ducking(&self) -> bool {
        self.ducking
    }

    /// Start a jump. No-op while airborne or ducking.
    pub fn jump(&mut self) {
        if self.on_ground && !self.ducking {
            self.vy = JUMP_VELOCITY;
            self.on_ground = false;
        }
    }

    /// Apply the held duck input. Only honored on the ground; entering
    /// starts the minimum-duration timer, holding refreshes it.
    pub fn duck(&mut self, held: bool) {
        if !self.on_ground || !held {
            return;
        }
        if !self.ducking {
            self.ducking = true;
            self.height = DINO_DUCK_HEIGHT;
            self.y = (self.ground_y - DINO_DUCK_HEIGHT) as f32;
        }
        self.duck_timer = DUCK_MIN_TICKS;
    }

    /// One physics tick.
    pub fn update(&mut self) {
        if !self.on_ground {
            self.vy += GRAVITY;
            self.y += self.vy;
            let stand_y = (self.ground_y - DINO_STAND_HEIGHT) as f32;
            if self.y >= stand_y {
                // Landing resets velocity, duck state and the airborne flag
                // on the same tick.
                self.y = stand_y;
                self.vy = 0.0;
                self.on_ground = true;
                self.ducking = false;
                self.duck_timer = 0;
                self.height = DINO_STAND_HEIGHT;
            }
        } else {
            self.frame = self.frame.wrapping_add(1);
            if self.ducking {
                self.duck_timer = self.duck_timer.saturating_sub(1);
                if self.duck_timer == 0 {
                    self.ducking = false;
                    self.height = DINO_STAND_HEIGHT;
                    self.y = (self.ground_y - DINO_STAND_HEIGHT) as f32;
                }
            }
        }
    }

    pub fn sprite(&self) -> &'static [&'static str] {
        if !self.on_ground {
            DINO_JUMP
        } else if self.ducking {
            DINO_DUCK
        } else if (self.frame / RUN_FRAME_TICKS) % 2 == 0 {
            DINO_RUN_1
        } else {
            DINO_RUN_2
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(
            self.x as f32 + HITBOX_INSET,
            self.y + HITBOX_INSET,
            DINO_WIDTH as f32 - 2.0 * HITBOX_INSET,
            self.height as f32 - 2.0 * HITBOX_INSET,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: i32 = 18;

    #[test]
    fn jump_leaves_ground_and_lands_back() {
        let mut dino = Dinosaur::new(GROUND);
        dino.jump();
        assert!(!dino.on_ground());
        for _ in 0..200 {
            dino.update();
        }
        assert!(dino.on_ground());
        assert_eq!(dino.y, (GROUND - DINO_STAND_HEIGHT) as f32);
    }

    #[test]
    fn jump_is_a_no_op_while_airborne() {
        let mut dino = Dinosaur::new(GROUND);
        dino.jump();
        dino.update();
        let y_before = dino.y;
        let vy_snapshot = dino.vy;
        dino.jump();
        assert_eq!(dino.y, y_before);
        assert_eq!(dino.vy, vy_snapshot);
    }

    #[test]
    fn jump_is_a_no_op_while_ducking() {
        let mut dino = Dinosaur::new(GROUND);
        dino.duck(true);
        assert!(dino.ducking());
        dino.jump();
        assert!(dino.on_ground());
    }

    #[test]
    fn duck_is_a_no_op_while_airborne() {
        let mut dino = Dinosaur::new(GROUND);
        dino.jump();
        dino.update();
        dino.duck(true);
        assert!(!dino.ducking());
    }

    #[test]
    fn duck_holds_for_minimum_duration_after_release() {
        let mut dino = Dinosaur::new(GROUND);
        dino.duck(true);
        // Input released; the minimum-duration timer keeps the duck alive.
        for _ in 0..DUCK_MIN_TICKS - 1 {
            dino.update();
            assert!(dino.ducking());
        }
        dino.update();
        assert!(!dino.ducking());
    }

    #[test]
    fn holding_duck_refreshes_the_timer() {
        let mut dino = Dinosaur::new(GROUND);
        dino.duck(true);
        for _ in 0..DUCK_MIN_TICKS * 3 {
            dino.duck(true);
            dino.update();
            assert!(dino.ducking());
        }
    }

    #[test]
    fn landing_cancels_duck_state() {
        let mut dino = Dinosaur::new(GROUND);
        dino.jump();
        // Force a duck attempt mid-air (ignored), then land.
        for _ in 0..200 {
            dino.duck(true);
            dino.update();
            if dino.on_ground() {
                break;
            }
        }
        assert!(dino.on_ground());
        assert!(!dino.ducking());
    }

    #[test]
    fn hitbox_is_inset_from_sprite_bounds() {
        let dino = Dinosaur::new(GROUND);
        let hb = dino.hitbox();
        assert!(hb.x > dino.x as f32);
        assert!(hb.y > dino.y);
        assert!(hb.w < DINO_WIDTH as f32);
        assert!(hb.h < DINO_STAND_HEIGHT as f32);
    }
}
