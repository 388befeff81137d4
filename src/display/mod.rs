//! Panel display: bit-packed framebuffer, fonts, sprites and render sinks.

pub mod fb;
pub mod font;
pub mod sink;
pub mod sprites;

pub use fb::FrameBuffer;
pub use sink::{DeviceSink, RenderSink, SinkSet, TerminalSink};
