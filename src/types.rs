//! Shared constants and pure data types
//! This module contains data types with no external dependencies

/// Default panel geometry (pixels). Deployments override via [`crate::config::Config`].
pub const DEFAULT_WIDTH: usize = 128;
pub const DEFAULT_HEIGHT: usize = 19;

/// Game timing constants
pub const TICK_MS: u64 = 16;
pub const IDLE_SLEEP_MS: u64 = 1;

/// Runner physics (per tick, tuned for ~60 ticks/s)
pub const GRAVITY: f32 = 0.10;
pub const JUMP_VELOCITY: f32 = -1.7;
pub const DUCK_MIN_TICKS: u32 = 15;

/// Run rules
pub const MAX_LIVES: u32 = 3;
pub const INVINCIBLE_TICKS: u32 = 90;
pub const SCORE_PER_OBSTACLE: u32 = 10;
pub const GAME_OVER_TIMEOUT_TICKS: u32 = 300;
pub const CUTSCENE_TICKS: u32 = 120;
pub const INVERT_TICKS: u32 = 180;

/// Scroll speed (pixels per tick)
pub const INITIAL_SPEED: f32 = 0.6;
pub const MAX_SPEED: f32 = 2.4;

/// Analog deadzone applied by game modes (the input layer keeps raw values)
pub const AXIS_DEADZONE: f32 = 0.25;

/// Device hot-plug scan interval (wall clock, independent of frame rate)
pub const HOTPLUG_SCAN_SECS: u64 = 3;

/// Number of assignable player slots
pub const MAX_PLAYERS: usize = 2;

/// Mode-select targets reachable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Runner,
    Paddle,
    Grid,
    Canvas,
}

impl MenuTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuTarget::Runner => "runner",
            MenuTarget::Paddle => "paddle",
            MenuTarget::Grid => "grid",
            MenuTarget::Canvas => "canvas",
        }
    }
}

/// One analog stick, normalized to -1.0..1.0 per axis.
///
/// Values are retained between frames exactly as the device last reported
/// them; consumers apply their own deadzone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stick {
    pub x: f32,
    pub y: f32,
}

/// Per-player portion of a frame's input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub left: Stick,
    pub right: Stick,
    /// Discrete up/down (d-pad or dedicated buttons), level-triggered.
    pub up: bool,
    pub down: bool,
}

/// Normalized logical input for one frame.
///
/// `jump` is edge-triggered: true only on the frame the press arrived.
/// `duck` is level-triggered: true while held.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalInput {
    pub jump: bool,
    pub duck: bool,
    pub select: Option<MenuTarget>,
    pub exit_to_menu: bool,
    pub back: bool,
    pub quit: bool,
    /// At least one live controller (always true in terminal fallback mode).
    pub controller_present: bool,
    /// Input is coming from the raw-terminal fallback reader.
    pub terminal_mode: bool,
    pub players: [PlayerInput; MAX_PLAYERS],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_inert() {
        let input = LogicalInput::default();
        assert!(!input.jump);
        assert!(!input.duck);
        assert!(input.select.is_none());
        assert!(!input.quit);
        assert_eq!(input.players[0].left, Stick::default());
    }

    #[test]
    fn menu_target_names_are_distinct() {
        let names = [
            MenuTarget::Runner.as_str(),
            MenuTarget::Paddle.as_str(),
            MenuTarget::Grid.as_str(),
            MenuTarget::Canvas.as_str(),
        ];
        for (i, a) in names.iter().enumerate() {
            for b in names.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
