//! Raw Linux input devices via evdev.
//!
//! Each controller is opened non-blocking and exclusively grabbed so its
//! events never leak into the hosting terminal. Analog axes are normalized
//! with the device's own absinfo range and retained between frames.

use std::collections::HashMap;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use arrayvec::ArrayVec;
use evdev::{AbsoluteAxisType, Device, InputEventKind, Key};
use tracing::{debug, warn};

use crate::types::{MenuTarget, PlayerInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadAction {
    Jump,
    Duck,
    Select(MenuTarget),
    ExitToMenu,
    Back,
    Quit,
}

/// Fixed button mapping shared by gamepads and raw keyboards.
pub fn key_action(key: Key) -> Option<PadAction> {
    if key == Key::BTN_SOUTH || key == Key::BTN_START {
        Some(PadAction::Jump)
    } else if key == Key::KEY_ENTER || key == Key::KEY_PAGEUP || key == Key::KEY_UP {
        Some(PadAction::Jump)
    } else if key == Key::BTN_EAST {
        Some(PadAction::Duck)
    } else if key == Key::KEY_SPACE || key == Key::KEY_PAGEDOWN || key == Key::KEY_DOWN {
        Some(PadAction::Duck)
    } else if key == Key::BTN_TR {
        Some(PadAction::Select(MenuTarget::Runner))
    } else if key == Key::BTN_WEST {
        Some(PadAction::Select(MenuTarget::Paddle))
    } else if key == Key::BTN_NORTH {
        Some(PadAction::Select(MenuTarget::Grid))
    } else if key == Key::BTN_TL {
        Some(PadAction::Select(MenuTarget::Canvas))
    } else if key == Key::KEY_1 {
        Some(PadAction::Select(MenuTarget::Runner))
    } else if key == Key::KEY_2 {
        Some(PadAction::Select(MenuTarget::Paddle))
    } else if key == Key::KEY_3 {
        Some(PadAction::Select(MenuTarget::Grid))
    } else if key == Key::KEY_4 {
        Some(PadAction::Select(MenuTarget::Canvas))
    } else if key == Key::BTN_SELECT || key == Key::BTN_MODE || key == Key::KEY_ESC {
        Some(PadAction::ExitToMenu)
    } else if key == Key::BTN_C || key == Key::KEY_BACKSPACE {
        Some(PadAction::Back)
    } else if key == Key::KEY_Q {
        Some(PadAction::Quit)
    } else {
        None
    }
}

/// Map a raw axis value into -1.0..1.0 using the device-reported range.
/// Devices with a degenerate range fall back to the conventional 16-bit span.
pub fn normalize_axis(value: i32, min: i32, max: i32) -> f32 {
    if max > min {
        let span = (max - min) as f32;
        (2.0 * (value - min) as f32 / span - 1.0).clamp(-1.0, 1.0)
    } else {
        (value as f32 / 32767.0).clamp(-1.0, 1.0)
    }
}

/// Full gamepad: action buttons plus a left analog pair.
pub fn is_gamepad(device: &Device) -> bool {
    let keys = match device.supported_keys() {
        Some(keys) => keys,
        None => return false,
    };
    let axes = match device.supported_absolute_axes() {
        Some(axes) => axes,
        None => return false,
    };
    keys.contains(Key::BTN_SOUTH)
        && axes.contains(AbsoluteAxisType::ABS_X)
        && axes.contains(AbsoluteAxisType::ABS_Y)
}

/// Anything that can at least emit the mapped keys (keyboards, remotes).
pub fn is_key_source(device: &Device) -> bool {
    match device.supported_keys() {
        Some(keys) => {
            keys.contains(Key::BTN_SOUTH)
                || keys.contains(Key::KEY_ENTER)
                || keys.contains(Key::KEY_SPACE)
        }
        None => false,
    }
}

/// One open evdev handle with its retained per-frame state.
pub struct Controller {
    pub path: PathBuf,
    pub name: String,
    /// Player slot, present only for full gamepads.
    pub player: Option<usize>,
    device: Device,
    axis_range: HashMap<u16, (i32, i32)>,
    pub state: PlayerInput,
    pub duck_held: bool,
    grabbed: bool,
}

/// Bounded per-frame action buffer.
pub type PadActions = ArrayVec<PadAction, 32>;

impl Controller {
    pub fn open(path: &Path, mut device: Device, player: Option<usize>) -> io::Result<Self> {
        let fd = device.as_raw_fd();
        // Never let a quiet device stall the frame loop.
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags < 0 || unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } < 0 {
            return Err(io::Error::last_os_error());
        }

        let grabbed = match device.grab() {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "exclusive grab failed");
                false
            }
        };

        let mut axis_range = HashMap::new();
        if let (Ok(abs_state), Some(axes)) =
            (device.get_abs_state(), device.supported_absolute_axes())
        {
            for axis in axes.iter() {
                let info = abs_state[axis.0 as usize];
                axis_range.insert(axis.0, (info.minimum, info.maximum));
            }
        }

        let name = device.name().unwrap_or("unknown").to_string();
        debug!(path = %path.display(), name, ?player, grabbed, "controller opened");
        Ok(Self {
            path: path.to_path_buf(),
            name,
            player,
            device,
            axis_range,
            state: PlayerInput::default(),
            duck_held: false,
            grabbed,
        })
    }

    /// Drain pending events into a bounded action buffer. `WouldBlock` means
    /// a quiet device; any other error means the device is gone and the
    /// caller should evict it.
    pub fn drain(&mut self) -> io::Result<PadActions> {
        let mut actions = PadActions::new();
        let events: Vec<_> = match self.device.fetch_events() {
            Ok(events) => events.collect(),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(actions),
            Err(e) => return Err(e),
        };
        for event in events {
            match event.kind() {
                InputEventKind::Key(key) => self.apply_key(key, event.value(), &mut actions),
                InputEventKind::AbsAxis(axis) => self.apply_axis(axis, event.value()),
                _ => {}
            }
        }
        Ok(actions)
    }

    fn apply_key(&mut self, key: Key, value: i32, actions: &mut PadActions) {
        match key_action(key) {
            // Duck is a level, tracked across frames, not an edge.
            Some(PadAction::Duck) => self.duck_held = value != 0,
            Some(action) if value == 1 => {
                let _ = actions.try_push(action);
            }
            _ => {}
        }
    }

    fn apply_axis(&mut self, axis: AbsoluteAxisType, value: i32) {
        if axis == AbsoluteAxisType::ABS_HAT0Y {
            self.state.up = value < 0;
            self.state.down = value > 0;
            return;
        }
        let (min, max) = self
            .axis_range
            .get(&axis.0)
            .copied()
            .unwrap_or((-32767, 32767));
        let norm = normalize_axis(value, min, max);
        if axis == AbsoluteAxisType::ABS_X {
            self.state.left.x = norm;
        } else if axis == AbsoluteAxisType::ABS_Y {
            self.state.left.y = norm;
        } else if axis == AbsoluteAxisType::ABS_RX {
            self.state.right.x = norm;
        } else if axis == AbsoluteAxisType::ABS_RY {
            self.state.right.y = norm;
        }
    }

    /// Release the exclusive grab. Also runs implicitly on process exit, but
    /// doing it eagerly keeps the device usable the instant we shut down.
    pub fn release(&mut self) {
        if self.grabbed {
            if let Err(e) = self.device.ungrab() {
                debug!(path = %self.path.display(), error = %e, "ungrab failed");
            }
            self.grabbed = false;
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.release();
    }
}
