//! Render sinks: where the packed bitmap ends up.
//!
//! Two kinds exist. [`DeviceSink`] writes the raw bitmap to the panel
//! device. [`TerminalSink`] draws a bordered ASCII grid and only re-emits
//! when the rendered text changed since the previous frame.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{cursor, terminal, QueueableCommand};
use tracing::warn;

use crate::display::fb::FrameBuffer;

pub trait RenderSink {
    fn flush(&mut self, fb: &FrameBuffer) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// Raw device write of the packed bitmap.
pub struct DeviceSink {
    path: PathBuf,
}

impl DeviceSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RenderSink for DeviceSink {
    fn flush(&mut self, fb: &FrameBuffer) -> Result<()> {
        let mut dev = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .with_context(|| format!("opening panel device {}", self.path.display()))?;
        dev.write_all(fb.bytes())
            .with_context(|| format!("writing panel device {}", self.path.display()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "device"
    }
}

/// Bordered ASCII grid on stdout, redrawn only when the text changes.
pub struct TerminalSink {
    stdout: io::Stdout,
    prev: Option<String>,
}

impl TerminalSink {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        stdout.queue(cursor::Hide)?;
        stdout.flush()?;
        Ok(Self { stdout, prev: None })
    }

    fn render_text(fb: &FrameBuffer) -> String {
        let w = fb.width();
        let mut out = String::with_capacity((w + 3) * (fb.height() + 2));
        out.push('+');
        out.extend(std::iter::repeat('-').take(w));
        out.push('+');
        for y in 0..fb.height() {
            out.push('\n');
            out.push('|');
            for x in 0..w {
                out.push(if fb.get_pixel(x as i32, y as i32) { '#' } else { ' ' });
            }
            out.push('|');
        }
        out.push('\n');
        out.push('+');
        out.extend(std::iter::repeat('-').take(w));
        out.push('+');
        out
    }
}

impl RenderSink for TerminalSink {
    fn flush(&mut self, fb: &FrameBuffer) -> Result<()> {
        let text = Self::render_text(fb);
        if self.prev.as_deref() == Some(text.as_str()) {
            return Ok(());
        }
        // Raw mode needs explicit cursor positioning per line.
        for (row, line) in text.lines().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, row as u16))?;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
            self.stdout.queue(crossterm::style::Print(line))?;
        }
        self.stdout.flush()?;
        self.prev = Some(text);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "terminal"
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = self.stdout.queue(cursor::Show);
        let _ = self.stdout.flush();
    }
}

/// The configured set of sinks.
///
/// A sink failure is fatal only when it is the sole sink; with more than one
/// configured the failure is logged and the frame continues.
pub struct SinkSet {
    sinks: Vec<Box<dyn RenderSink>>,
}

impl SinkSet {
    pub fn new(sinks: Vec<Box<dyn RenderSink>>) -> Self {
        Self { sinks }
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn flush(&mut self, fb: &FrameBuffer) -> Result<()> {
        let sole = self.sinks.len() == 1;
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush(fb) {
                if sole {
                    return Err(e);
                }
                warn!(sink = sink.name(), error = %e, "render sink failed, continuing");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_text_has_border_and_geometry() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.set_pixel(1, 0, true);
        let text = TerminalSink::render_text(&fb);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "+----+");
        assert_eq!(lines[1], "| #  |");
        assert_eq!(lines[2], "|    |");
        assert_eq!(lines[3], "+----+");
    }

    #[test]
    fn device_sink_reports_missing_path() {
        let mut sink = DeviceSink::new("/nonexistent/panel-arcade-test");
        let fb = FrameBuffer::new(8, 2);
        assert!(sink.flush(&fb).is_err());
    }
}
