//! Fire-and-forget audio hooks.
//!
//! Effect synthesis lives outside this crate; effects are pre-generated WAV
//! files in a directory and played through `aplay`. Speech goes through
//! `espeak`. Every call is best-effort: a missing player binary or file is
//! logged at debug and otherwise ignored.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

/// Where the effect generator drops its WAV files.
pub const DEFAULT_EFFECT_DIR: &str = "/tmp/panel-arcade-sounds";

pub struct Audio {
    enabled: bool,
    effect_dir: PathBuf,
}

impl Audio {
    pub fn new(enabled: bool, effect_dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            effect_dir: effect_dir.into(),
        }
    }

    /// A muted instance for tests and `--no-sound`.
    pub fn disabled() -> Self {
        Self::new(false, DEFAULT_EFFECT_DIR)
    }

    /// Play `<effect_dir>/<name>.wav`, non-blocking.
    pub fn play(&self, name: &str) {
        if !self.enabled {
            return;
        }
        let path = self.effect_dir.join(format!("{name}.wav"));
        if !path.exists() {
            debug!(effect = name, "effect file missing, skipping");
            return;
        }
        let spawned = Command::new("aplay")
            .arg("-q")
            .arg(&path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            debug!(effect = name, error = %e, "aplay unavailable");
        }
    }

    /// Speak `text` via espeak, non-blocking.
    pub fn speak(&self, text: &str, speed: u32, pitch: u32) {
        if !self.enabled {
            return;
        }
        let spawned = Command::new("espeak")
            .args(["-s", &speed.to_string(), "-p", &pitch.to_string(), text])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            debug!(error = %e, "espeak unavailable");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_audio_is_silent_and_safe() {
        let audio = Audio::disabled();
        audio.play("jump");
        audio.speak("hello", 150, 50);
    }
}
