//! Terminal keyboard fallback.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! duck stays held for a short window after the last key event and then
//! auto-releases.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

use crate::types::{LogicalInput, MenuTarget};

// Without release events a single tap must not become a sustained hold.
const DUCK_RELEASE_TIMEOUT_MS: u64 = 150;

pub struct TermInput {
    raw_mode: bool,
    duck_deadline: Instant,
}

impl TermInput {
    /// Switch the terminal to raw (non-canonical, non-echoing) mode.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self {
            raw_mode: true,
            duck_deadline: Instant::now(),
        })
    }

    #[cfg(test)]
    fn detached() -> Self {
        Self {
            raw_mode: false,
            duck_deadline: Instant::now(),
        }
    }

    /// Drain all pending key events into `input`. Non-blocking.
    pub fn poll(&mut self, input: &mut LogicalInput) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    self.handle_key(key.code, input);
                }
            }
        }
        input.duck = input.duck || Instant::now() < self.duck_deadline;
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, input: &mut LogicalInput) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => input.quit = true,
            KeyCode::Esc => input.exit_to_menu = true,
            KeyCode::Backspace => input.back = true,
            KeyCode::Char(' ') | KeyCode::PageDown | KeyCode::Down => {
                self.duck_deadline = Instant::now() + Duration::from_millis(DUCK_RELEASE_TIMEOUT_MS);
            }
            KeyCode::Char('1') => input.select = Some(MenuTarget::Runner),
            KeyCode::Char('2') => input.select = Some(MenuTarget::Paddle),
            KeyCode::Char('3') => input.select = Some(MenuTarget::Grid),
            KeyCode::Char('4') => input.select = Some(MenuTarget::Canvas),
            KeyCode::Enter | KeyCode::PageUp | KeyCode::Up => input.jump = true,
            // Any other special key doubles as jump so the game is playable
            // from whatever key the player mashes.
            KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End | KeyCode::F(_) => {
                input.jump = true
            }
            _ => {}
        }
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}
