use tracing::info;

use crate::error::DisplayError;

use super::{Frame, Row, Surface};

/// A surface with no screen behind it. Frames go to the log.
pub struct HeadlessSurface {
    width: usize,
    height: usize,
}

impl HeadlessSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as usize,
            height: height as usize,
        }
    }
}

impl Surface for HeadlessSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn text_width(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let text = frame
            .rows
            .iter()
            .map(|row| match row {
                Row::Text(t) => t.clone(),
                Row::Rule => "-".repeat(self.width),
            })
            .collect::<Vec<_>>()
            .join(" | ");
        info!(screen = %text, "display");
        Ok(())
    }
}
