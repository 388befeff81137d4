//! Arcade games for a 128x19 monochrome LED panel.
//!
//! A fixed-timestep runner game (with mini-games) rendered into a bit-packed
//! framebuffer and flushed to the panel device, the terminal, or both.
//! Controllers are raw evdev devices with hot-plug; a terminal keyboard
//! fallback covers development machines.

pub mod audio;
pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod score;
pub mod types;
