//! High-score persistence: a single integer, best effort.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    /// Platform-appropriate default location.
    pub fn new() -> Self {
        let path = ProjectDirs::from("", "", "panel-arcade")
            .map(|dirs| dirs.data_dir().join("highscore"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/panel-arcade/highscore"));
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored high score, 0 when absent or unreadable.
    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Persist `score`. Failures (missing directory, permissions) are
    /// swallowed after a debug log.
    pub fn save(&self, score: u32) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(&self.path, score.to_string()) {
            debug!(path = %self.path.display(), error = %e, "high score not saved");
        }
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new()
    }
}
