//! Obstacles: cacti and birds scrolling toward the dinosaur.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::collision::Hitbox;
use crate::display::sprites::{
    sprite_height, sprite_width, BIRD_1, BIRD_2, CACTUS_ARMORED, CACTUS_MEDIUM, CACTUS_SMALL,
    CACTUS_TALL,
};

/// Score thresholds that widen the spawn pool.
pub const BIRD_LOW_SCORE: u32 = 100;
pub const BIRD_HIGH_SCORE: u32 = 250;
pub const ARMORED_SCORE: u32 = 500;

/// Bird flap cadence in ticks.
const FLAP_TICKS: u32 = 6;
const HITBOX_INSET: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    CactusSmall,
    CactusMedium,
    CactusTall,
    CactusArmored,
    BirdLow,
    BirdHigh,
}

impl ObstacleKind {
    pub fn is_bird(&self) -> bool {
        matches!(self, ObstacleKind::BirdLow | ObstacleKind::BirdHigh)
    }

    fn base_sprite(&self) -> &'static [&'static str] {
        match self {
            ObstacleKind::CactusSmall => CACTUS_SMALL,
            ObstacleKind::CactusMedium => CACTUS_MEDIUM,
            ObstacleKind::CactusTall => CACTUS_TALL,
            ObstacleKind::CactusArmored => CACTUS_ARMORED,
            ObstacleKind::BirdLow | ObstacleKind::BirdHigh => BIRD_1,
        }
    }

    /// Vertical placement relative to the ground line.
    fn y_offset(&self) -> i32 {
        match self {
            ObstacleKind::CactusSmall => 5,
            ObstacleKind::CactusMedium => 6,
            ObstacleKind::CactusTall | ObstacleKind::CactusArmored => 7,
            ObstacleKind::BirdLow => 4,
            ObstacleKind::BirdHigh => 8,
        }
    }
}

/// The spawn pool for a given score. Ground obstacles are always present;
/// birds and the armored cactus join past their thresholds. With ducking
/// disabled only the jumpable low bird is allowed.
pub fn spawn_pool(score: u32, duck_enabled: bool) -> Vec<ObstacleKind> {
    let mut pool = vec![
        ObstacleKind::CactusSmall,
        ObstacleKind::CactusMedium,
        ObstacleKind::CactusTall,
    ];
    if score >= BIRD_LOW_SCORE {
        pool.push(ObstacleKind::BirdLow);
    }
    if score >= BIRD_HIGH_SCORE && duck_enabled {
        pool.push(ObstacleKind::BirdHigh);
    }
    if score >= ARMORED_SCORE {
        pool.push(ObstacleKind::CactusArmored);
    }
    pool
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    pub y: i32,
    pub kind: ObstacleKind,
    width: i32,
    height: i32,
    frame: u32,
}

impl Obstacle {
    /// Spawn at `x` with a kind drawn uniformly from the current pool.
    pub fn spawn<R: Rng>(rng: &mut R, x: f32, score: u32, duck_enabled: bool, ground_y: i32) -> Self {
        let pool = spawn_pool(score, duck_enabled);
        // The pool always holds the ground obstacles, so choose cannot fail.
        let kind = *pool.choose(rng).unwrap_or(&ObstacleKind::CactusSmall);
        Self::of_kind(kind, x, ground_y)
    }

    pub fn of_kind(kind: ObstacleKind, x: f32, ground_y: i32) -> Self {
        let sprite = kind.base_sprite();
        Self {
            x,
            y: ground_y - kind.y_offset(),
            kind,
            width: sprite_width(sprite),
            height: sprite_height(sprite),
            frame: 0,
        }
    }

    /// One tick: scroll left by the session speed, advance animation.
    pub fn update(&mut self, speed: f32) {
        self.x -= speed;
        self.frame = self.frame.wrapping_add(1);
    }

    /// Fully scrolled past the left edge.
    pub fn offscreen(&self) -> bool {
        self.x + self.width as f32 <= 0.0
    }

    pub fn sprite(&self) -> &'static [&'static str] {
        if self.kind.is_bird() {
            if (self.frame / FLAP_TICKS) % 2 == 0 {
                BIRD_1
            } else {
                BIRD_2
            }
        } else {
            self.kind.base_sprite()
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(
            self.x + HITBOX_INSET,
            self.y as f32 + HITBOX_INSET,
            self.width as f32 - 2.0 * HITBOX_INSET,
            self.height as f32 - 2.0 * HITBOX_INSET,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pool_grows_with_score() {
        assert_eq!(spawn_pool(0, true).len(), 3);
        assert!(spawn_pool(BIRD_LOW_SCORE, true).contains(&ObstacleKind::BirdLow));
        assert!(spawn_pool(BIRD_HIGH_SCORE, true).contains(&ObstacleKind::BirdHigh));
        assert!(spawn_pool(ARMORED_SCORE, true).contains(&ObstacleKind::CactusArmored));
        assert_eq!(spawn_pool(ARMORED_SCORE, true).len(), 6);
    }

    #[test]
    fn no_duck_mode_excludes_the_high_bird() {
        let pool = spawn_pool(10_000, false);
        assert!(pool.contains(&ObstacleKind::BirdLow));
        assert!(!pool.contains(&ObstacleKind::BirdHigh));
    }

    #[test]
    fn low_scores_spawn_only_ground_obstacles() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let obs = Obstacle::spawn(&mut rng, 128.0, 0, true, 18);
            assert!(!obs.kind.is_bird());
        }
    }

    #[test]
    fn scrolls_left_and_retires_offscreen() {
        let mut obs = Obstacle::of_kind(ObstacleKind::CactusSmall, 4.0, 18);
        assert!(!obs.offscreen());
        for _ in 0..10 {
            obs.update(1.0);
        }
        assert!(obs.offscreen());
    }

    #[test]
    fn birds_flap_between_two_frames() {
        let mut obs = Obstacle::of_kind(ObstacleKind::BirdLow, 64.0, 18);
        let first = obs.sprite();
        for _ in 0..FLAP_TICKS {
            obs.update(0.5);
        }
        assert_ne!(first, obs.sprite());
    }

    #[test]
    fn hitbox_is_inset() {
        let obs = Obstacle::of_kind(ObstacleKind::CactusTall, 40.0, 18);
        let hb = obs.hitbox();
        assert!(hb.x > obs.x);
        assert!(hb.w < obs.width as f32);
    }
}
