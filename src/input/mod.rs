//! Input orchestration: evdev controllers with hot-plug, plus the terminal
//! keyboard fallback.
//!
//! `poll()` is strictly non-blocking. Devices are re-enumerated on a coarse
//! wall-clock interval so plugging a gamepad in mid-session just works, and a
//! device whose drain fails is evicted and its player slot freed.

pub mod pad;
pub mod term;

use std::collections::HashSet;
use std::io::stdin;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::tty::IsTty;
use tracing::{info, warn};

use crate::types::{LogicalInput, HOTPLUG_SCAN_SECS, MAX_PLAYERS};

use pad::{Controller, PadAction};
use term::TermInput;

/// Lowest player slot not already taken.
fn free_slot(used: impl Iterator<Item = usize>) -> Option<usize> {
    let taken: HashSet<usize> = used.collect();
    (0..MAX_PLAYERS).find(|slot| !taken.contains(slot))
}

pub struct InputSource {
    controllers: Vec<Controller>,
    term: Option<TermInput>,
    last_scan: Instant,
}

impl InputSource {
    /// Open every qualifying device. The terminal fallback engages only when
    /// no device qualifies (or it was forced) and stdin is a tty.
    pub fn new(force_terminal: bool) -> Result<Self> {
        let mut source = Self {
            controllers: Vec::new(),
            term: None,
            last_scan: Instant::now(),
        };
        if !force_terminal {
            source.scan();
        }
        if source.controllers.is_empty() {
            if stdin().is_tty() {
                info!("no input devices, using terminal keys");
                source.term = Some(TermInput::new()?);
            } else {
                warn!("no input devices and stdin is not a tty");
            }
        }
        Ok(source)
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    fn scan(&mut self) {
        self.last_scan = Instant::now();
        let open: HashSet<PathBuf> = self.controllers.iter().map(|c| c.path.clone()).collect();
        for (path, device) in evdev::enumerate() {
            if open.contains(&path) {
                continue;
            }
            let player = if pad::is_gamepad(&device) {
                free_slot(self.controllers.iter().filter_map(|c| c.player))
            } else if pad::is_key_source(&device) {
                None
            } else {
                continue;
            };
            match Controller::open(&path, device, player) {
                Ok(controller) => {
                    info!(
                        path = %path.display(),
                        name = controller.name,
                        player = ?controller.player,
                        "input device attached"
                    );
                    self.controllers.push(controller);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "device open failed"),
            }
        }
    }

    /// Drain every source into one frame's logical input. Never blocks.
    pub fn poll(&mut self) -> LogicalInput {
        let mut input = LogicalInput::default();

        if self.last_scan.elapsed() >= Duration::from_secs(HOTPLUG_SCAN_SECS) {
            self.scan();
        }

        self.controllers.retain_mut(|controller| match controller.drain() {
            Ok(actions) => {
                for action in actions {
                    match action {
                        PadAction::Jump => input.jump = true,
                        PadAction::Select(target) => {
                            input.select = input.select.or(Some(target));
                        }
                        PadAction::ExitToMenu => input.exit_to_menu = true,
                        PadAction::Back => input.back = true,
                        PadAction::Quit => input.quit = true,
                        PadAction::Duck => {}
                    }
                }
                true
            }
            Err(e) => {
                warn!(
                    path = %controller.path.display(),
                    error = %e,
                    "input device lost"
                );
                false
            }
        });

        for controller in &self.controllers {
            input.duck |= controller.duck_held;
            if let Some(player) = controller.player {
                input.players[player] = controller.state;
            }
        }

        input.controller_present = !self.controllers.is_empty();
        input.terminal_mode = self.term.is_some();
        if let Some(term) = &mut self.term {
            if let Err(e) = term.poll(&mut input) {
                warn!(error = %e, "terminal input read failed");
            }
        }
        input
    }

    /// Release grabs and restore the terminal. Also runs from `Drop`.
    pub fn shutdown(&mut self) {
        for controller in &mut self.controllers {
            controller.release();
        }
        self.controllers.clear();
        self.term = None;
    }
}

impl Drop for InputSource {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_fill_lowest_first() {
        assert_eq!(free_slot(std::iter::empty()), Some(0));
        assert_eq!(free_slot([0].into_iter()), Some(1));
        assert_eq!(free_slot([1].into_iter()), Some(0));
    }

    #[test]
    fn full_roster_gets_no_slot() {
        assert_eq!(free_slot(0..MAX_PLAYERS), None);
    }
}
