//! Button input: a sampled digital line and rising-edge detection.
//!
//! The line is read once per poll. [`InputMonitor`] keeps the previous
//! sample and the time of the last accepted edge, so a press is reported
//! once no matter how much the contact bounces while held.

mod keyboard;
mod sysfs;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::InputError;

pub use keyboard::{KeyboardLine, QuitKeys};
#[cfg(test)]
pub use keyboard::KeySource;
pub use sysfs::SysfsLine;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// A source of button samples.
pub trait DigitalInput {
    fn read_level(&mut self) -> Result<Level, InputError>;

    /// Give the line back to the system. Called once during shutdown.
    fn release(&mut self) {}
}

impl<T: DigitalInput + ?Sized> DigitalInput for Box<T> {
    fn read_level(&mut self) -> Result<Level, InputError> {
        (**self).read_level()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// A debounced press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Edge {
    pub at: Instant,
}

pub struct InputMonitor<I> {
    line: I,
    debounce: Duration,
    previous: Option<Level>,
    last_edge: Option<Instant>,
}

impl<I: DigitalInput> InputMonitor<I> {
    pub fn new(line: I, debounce: Duration) -> Self {
        Self {
            line,
            debounce,
            previous: None,
            last_edge: None,
        }
    }

    /// Sample the line now.
    pub fn poll(&mut self) -> Result<Option<Edge>, InputError> {
        self.poll_at(Instant::now())
    }

    /// Sample the line, treating `now` as the current monotonic time.
    ///
    /// The first sample only seeds the previous level, so a button held
    /// down at startup does not count as a press.
    pub fn poll_at(&mut self, now: Instant) -> Result<Option<Edge>, InputError> {
        let level = self.line.read_level()?;
        let previous = self.previous.replace(level);

        if level != Level::High || previous != Some(Level::Low) {
            return Ok(None);
        }

        if let Some(last) = self.last_edge {
            let since = now.saturating_duration_since(last);
            if since < self.debounce {
                debug!(since_ms = since.as_millis() as u64, "ignoring bounce");
                return Ok(None);
            }
        }

        self.last_edge = Some(now);
        Ok(Some(Edge { at: now }))
    }

    pub fn release(&mut self) {
        self.line.release();
    }
}
