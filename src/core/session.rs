//! Top-level session state machine.
//!
//! Owns all per-run state (dinosaur, obstacles, score, lives, milestones)
//! and multiplexes the mini-games. Everything advances in ticks; nothing
//! here touches the wall clock.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::audio::Audio;
use crate::core::canvas::CanvasGame;
use crate::core::collision::overlaps;
use crate::core::dino::Dinosaur;
use crate::core::grid::GridGame;
use crate::core::obstacle::Obstacle;
use crate::core::paddle::PaddleGame;
use crate::display::FrameBuffer;
use crate::score::HighScoreStore;
use crate::types::{
    LogicalInput, MenuTarget, CUTSCENE_TICKS, GAME_OVER_TIMEOUT_TICKS, INITIAL_SPEED,
    INVERT_TICKS, INVINCIBLE_TICKS, MAX_LIVES, MAX_SPEED, SCORE_PER_OBSTACLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Running,
    Paused,
    GameOver,
    Cutscene,
    Paddle,
    Grid,
    Canvas,
}

/// One-shot effect bound to a score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneEffect {
    /// Spoken/audible announcement only.
    Announce,
    /// Invert the whole screen for a fixed window.
    Invert,
    /// Switch into the scripted cutscene.
    Cutscene,
}

/// Ascending milestone registry. Each entry fires at most once per run.
pub const MILESTONES: &[(u32, MilestoneEffect)] = &[
    (100, MilestoneEffect::Announce),
    (250, MilestoneEffect::Invert),
    (500, MilestoneEffect::Cutscene),
    (750, MilestoneEffect::Invert),
    (1000, MilestoneEffect::Cutscene),
];

struct DifficultyTier {
    min_score: u32,
    speed_mult: f32,
    spawn_min: u32,
    spawn_max: u32,
}

/// Piecewise difficulty: spawn countdown range (ticks) and speed multiplier
/// over [`INITIAL_SPEED`], keyed on score.
const TIERS: &[DifficultyTier] = &[
    DifficultyTier { min_score: 0, speed_mult: 1.0, spawn_min: 90, spawn_max: 180 },
    DifficultyTier { min_score: 100, speed_mult: 1.2, spawn_min: 80, spawn_max: 160 },
    DifficultyTier { min_score: 250, speed_mult: 1.5, spawn_min: 70, spawn_max: 140 },
    DifficultyTier { min_score: 500, speed_mult: 2.0, spawn_min: 55, spawn_max: 110 },
    DifficultyTier { min_score: 750, speed_mult: 3.0, spawn_min: 48, spawn_max: 95 },
    DifficultyTier { min_score: 1000, speed_mult: 4.0, spawn_min: 48, spawn_max: 90 },
];

fn tier_for(score: u32) -> &'static DifficultyTier {
    TIERS
        .iter()
        .rev()
        .find(|t| score >= t.min_score)
        .unwrap_or(&TIERS[0])
}

/// Scroll speed for a score: non-decreasing, clamped at [`MAX_SPEED`].
pub fn speed_for(score: u32) -> f32 {
    (INITIAL_SPEED * tier_for(score).speed_mult).min(MAX_SPEED)
}

pub struct SessionState {
    width: i32,
    height: i32,
    ground_y: i32,
    duck_enabled: bool,

    pub mode: Mode,
    tick: u64,
    animation: u32,

    // Per-run state, reset on entering Running.
    pub score: u32,
    pub lives: u32,
    invincible: u32,
    fired_milestones: u32,
    invert_expiry: u64,
    speed: f32,
    spawn_in: u32,
    dino: Dinosaur,
    obstacles: Vec<Obstacle>,
    cutscene_timer: u32,

    pub high_score: u32,

    paddle: PaddleGame,
    grid: GridGame,
    canvas: CanvasGame,

    rng: StdRng,
    audio: Audio,
    store: HighScoreStore,
}

impl SessionState {
    pub fn new(
        width: i32,
        height: i32,
        duck_enabled: bool,
        audio: Audio,
        store: HighScoreStore,
    ) -> Self {
        Self::with_seed(width, height, duck_enabled, audio, store, rand::random())
    }

    pub fn with_seed(
        width: i32,
        height: i32,
        duck_enabled: bool,
        audio: Audio,
        store: HighScoreStore,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let ground_y = height - 1;
        let high_score = store.load();
        let grid = GridGame::new(&mut rng, width, height);
        Self {
            width,
            height,
            ground_y,
            duck_enabled,
            mode: Mode::Menu,
            tick: 0,
            animation: 0,
            score: 0,
            lives: MAX_LIVES,
            invincible: 0,
            fired_milestones: 0,
            invert_expiry: 0,
            speed: INITIAL_SPEED,
            spawn_in: 120,
            dino: Dinosaur::new(ground_y),
            obstacles: Vec::new(),
            cutscene_timer: 0,
            high_score,
            paddle: PaddleGame::new(width, height),
            grid,
            canvas: CanvasGame::new(width, height),
            rng,
            audio,
            store,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    fn reset_run(&mut self) {
        self.score = 0;
        self.lives = MAX_LIVES;
        self.invincible = 0;
        self.fired_milestones = 0;
        self.invert_expiry = 0;
        self.speed = INITIAL_SPEED;
        self.dino = Dinosaur::new(self.ground_y);
        self.obstacles.clear();
        self.redraw_spawn_timer();
    }

    fn redraw_spawn_timer(&mut self) {
        let tier = tier_for(self.score);
        self.spawn_in = self.rng.gen_range(tier.spawn_min..=tier.spawn_max);
    }

    fn start_running(&mut self) {
        self.reset_run();
        self.mode = Mode::Running;
        self.audio.play("start");
        self.audio.speak("Go!", 180, 80);
    }

    /// Abandon any run and mini-game state.
    fn enter_menu(&mut self) {
        self.obstacles.clear();
        self.mode = Mode::Menu;
        self.animation = 0;
    }

    fn enter_mode(&mut self, target: MenuTarget) {
        self.audio.play("select");
        info!(target = target.as_str(), "mode selected");
        match target {
            MenuTarget::Runner => self.start_running(),
            MenuTarget::Paddle => {
                self.paddle = PaddleGame::new(self.width, self.height);
                self.mode = Mode::Paddle;
            }
            MenuTarget::Grid => {
                self.grid = GridGame::new(&mut self.rng, self.width, self.height);
                self.mode = Mode::Grid;
            }
            MenuTarget::Canvas => {
                self.canvas = CanvasGame::new(self.width, self.height);
                self.mode = Mode::Canvas;
            }
        }
    }

    pub fn update(&mut self, input: &LogicalInput) {
        self.tick += 1;

        match self.mode {
            Mode::Menu => {
                self.animation = self.animation.wrapping_add(1);
                if let Some(target) = input.select {
                    self.enter_mode(target);
                } else if input.jump {
                    self.start_running();
                }
            }
            Mode::Running => {
                if input.exit_to_menu {
                    self.enter_menu();
                    return;
                }
                if !input.controller_present && !input.terminal_mode {
                    info!("controller lost, pausing");
                    self.mode = Mode::Paused;
                    return;
                }
                self.tick_running(input);
            }
            Mode::Paused => {
                let resume = if input.terminal_mode {
                    input.jump
                } else {
                    input.controller_present
                };
                if resume {
                    info!("resuming");
                    self.mode = Mode::Running;
                }
            }
            Mode::GameOver => {
                self.animation += 1;
                if input.exit_to_menu {
                    self.enter_menu();
                } else if input.jump {
                    self.start_running();
                } else if self.animation >= GAME_OVER_TIMEOUT_TICKS {
                    self.enter_menu();
                }
            }
            Mode::Cutscene => {
                self.cutscene_timer = self.cutscene_timer.saturating_sub(1);
                if self.cutscene_timer == 0 {
                    self.mode = Mode::Running;
                }
            }
            Mode::Paddle => {
                if input.exit_to_menu {
                    self.enter_menu();
                } else {
                    self.paddle.update(input, &self.audio);
                }
            }
            Mode::Grid => {
                if input.exit_to_menu {
                    self.enter_menu();
                } else {
                    self.grid.update(&mut self.rng, input, &self.audio);
                }
            }
            Mode::Canvas => {
                if input.exit_to_menu || self.canvas.update(input, &self.audio) {
                    self.enter_menu();
                }
            }
        }
    }

    fn tick_running(&mut self, input: &LogicalInput) {
        if self.duck_enabled {
            self.dino.duck(input.duck);
        }
        if input.jump {
            if self.dino.on_ground() && !self.dino.ducking() {
                self.audio.play("jump");
            }
            self.dino.jump();
        }
        self.dino.update();

        self.invincible = self.invincible.saturating_sub(1);

        // Spawn timer runs on ticks; the redraw range follows the tier.
        self.spawn_in = self.spawn_in.saturating_sub(1);
        if self.spawn_in == 0 {
            self.obstacles.push(Obstacle::spawn(
                &mut self.rng,
                self.width as f32,
                self.score,
                self.duck_enabled,
                self.ground_y,
            ));
            self.redraw_spawn_timer();
        }

        for obs in &mut self.obstacles {
            obs.update(self.speed);
        }

        // Retire cleared obstacles, crediting each exactly once.
        let mut cleared = 0;
        self.obstacles.retain(|obs| {
            if obs.offscreen() {
                cleared += 1;
                false
            } else {
                true
            }
        });
        for _ in 0..cleared {
            self.score += SCORE_PER_OBSTACLE;
            self.audio.play("score");
        }

        self.check_milestones();

        if self.invincible == 0 {
            let dino_box = self.dino.hitbox();
            if let Some(hit) = self
                .obstacles
                .iter()
                .position(|obs| overlaps(dino_box, obs.hitbox()))
            {
                self.obstacles.remove(hit);
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.game_over();
                    return;
                }
                self.invincible = INVINCIBLE_TICKS;
                self.audio.play("hit");
            }
        }

        let old_speed = self.speed;
        self.speed = speed_for(self.score);
        if self.speed > old_speed {
            self.audio.play("speedup");
        }
    }

    fn check_milestones(&mut self) {
        for (i, &(threshold, effect)) in MILESTONES.iter().enumerate() {
            let bit = 1u32 << i;
            if self.score < threshold || self.fired_milestones & bit != 0 {
                continue;
            }
            self.fired_milestones |= bit;
            info!(threshold, "milestone fired");
            self.audio.play("milestone");
            match effect {
                MilestoneEffect::Announce => {
                    self.audio.speak(&format!("{} points!", threshold), 160, 70);
                }
                MilestoneEffect::Invert => {
                    self.invert_expiry = self.tick + u64::from(INVERT_TICKS);
                }
                MilestoneEffect::Cutscene => {
                    self.cutscene_timer = CUTSCENE_TICKS;
                    self.mode = Mode::Cutscene;
                }
            }
        }
    }

    fn game_over(&mut self) {
        self.mode = Mode::GameOver;
        self.animation = 0;
        self.audio.play("gameover");
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
            self.audio
                .speak(&format!("Game over! New high score {}!", self.score), 130, 40);
        } else {
            self.audio
                .speak(&format!("Game over! Score {}", self.score), 130, 40);
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        fb.clear();
        match self.mode {
            Mode::Menu => self.render_menu(fb),
            Mode::Running => self.render_running(fb),
            Mode::Paused => {
                self.render_running(fb);
                fb.draw_centered_text(self.height / 2 - 2, "PAUSED");
            }
            Mode::GameOver => self.render_game_over(fb),
            Mode::Cutscene => self.render_cutscene(fb),
            Mode::Paddle => self.paddle.render(fb),
            Mode::Grid => self.grid.render(fb),
            Mode::Canvas => self.canvas.render(fb),
        }
        if self.tick < self.invert_expiry {
            fb.invert();
        }
    }

    /// Animated start screen: two large eyes tracking a slow patrol, with a
    /// periodic blink.
    fn render_menu(&self, fb: &mut FrameBuffer) {
        let eye_y = 1;
        let left_x = self.width / 4;
        let right_x = 3 * self.width / 4;

        let cycle = self.animation % 240;
        let blink = (18..26).contains(&(cycle % 120));
        // Pupil patrol: right, center, left, center.
        let (pdx, pdy) = match (cycle / 30) % 8 {
            0 | 7 => (0, 0),
            1 | 2 => (2, 0),
            3 => (0, -1),
            4 | 5 => (-2, 0),
            _ => (0, 1),
        };

        for &cx in &[left_x, right_x] {
            if blink {
                for dx in -4..=4 {
                    fb.set_pixel(cx + dx, eye_y + 4, true);
                }
                continue;
            }
            // Eye outline.
            for dx in -3..=3 {
                fb.set_pixel(cx + dx, eye_y, true);
                fb.set_pixel(cx + dx, eye_y + 9, true);
            }
            for dy in 2..8 {
                fb.set_pixel(cx - 5, eye_y + dy, true);
                fb.set_pixel(cx + 5, eye_y + dy, true);
            }
            fb.set_pixel(cx - 4, eye_y + 1, true);
            fb.set_pixel(cx + 4, eye_y + 1, true);
            fb.set_pixel(cx - 4, eye_y + 8, true);
            fb.set_pixel(cx + 4, eye_y + 8, true);
            // Pupil.
            for dx in 0..2 {
                for dy in 0..2 {
                    fb.set_pixel(cx + pdx + dx, eye_y + 4 + pdy + dy, true);
                }
            }
        }

        match (self.animation / 240) % 3 {
            0 => fb.draw_centered_large_text(11, "PLAY!"),
            1 => fb.draw_centered_text(13, "COME PLAY!"),
            _ => fb.draw_centered_text(13, "PLAY WITH ME!"),
        }
    }

    fn render_running(&self, fb: &mut FrameBuffer) {
        fb.draw_line(0, self.ground_y, self.width - 1, self.ground_y);

        // Blink the dinosaur while invincible.
        let visible = self.invincible == 0 || (self.tick / 4) % 2 == 0;
        if visible {
            fb.draw_sprite(self.dino.sprite(), self.dino.x, self.dino.y as i32);
        }

        for obs in &self.obstacles {
            fb.draw_sprite(obs.sprite(), obs.x as i32, obs.y);
        }

        let score_str = self.score.to_string();
        fb.draw_text(
            self.width - FrameBuffer::text_width(&score_str) as i32 - 1,
            1,
            &score_str,
        );

        // One 2x2 block per remaining life, top left.
        for life in 0..self.lives {
            let x = 1 + life as i32 * 4;
            fb.draw_sprite(&["XX", "XX"], x, 1);
        }
    }

    fn render_game_over(&self, fb: &mut FrameBuffer) {
        fb.draw_centered_text(1, "GAME OVER");
        fb.draw_centered_text(8, &format!("SCORE {}", self.score));
        fb.draw_centered_text(14, &format!("HIGH SCORE {}", self.high_score));
    }

    /// Celebration: the dinosaur sprints across the panel under the score.
    fn render_cutscene(&self, fb: &mut FrameBuffer) {
        fb.draw_line(0, self.ground_y, self.width - 1, self.ground_y);
        let progress = 1.0 - self.cutscene_timer as f32 / CUTSCENE_TICKS as f32;
        let x = (progress * (self.width + 8) as f32) as i32 - 8;
        let sprite = if (self.cutscene_timer / 6) % 2 == 0 {
            crate::display::sprites::DINO_RUN_1
        } else {
            crate::display::sprites::DINO_RUN_2
        };
        fb.draw_sprite(sprite, x, self.ground_y - 9);
        fb.draw_centered_text(2, &format!("{}!", self.score));
    }
}
