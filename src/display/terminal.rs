use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::error::DisplayError;

use super::{Frame, Row, Surface};

/// Draws the screen as a bordered box in the middle of the terminal.
///
/// Owns raw mode and the alternate screen from `open` until `release`.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    width: u16,
    height: u16,
    active: bool,
}

impl TerminalSurface {
    pub fn open(width: u16, height: u16) -> Result<Self, DisplayError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            width,
            height,
            active: true,
        })
    }
}

/// Lines for `frame`, padded so the text sits in the vertical middle.
fn frame_lines(frame: &Frame, width: u16, height: u16) -> Vec<Line<'static>> {
    let pad = (height as usize).saturating_sub(frame.rows.len()) / 2;
    let mut lines: Vec<Line<'static>> = vec![Line::default(); pad];
    lines.extend(frame.rows.iter().map(|row| match row {
        Row::Text(t) => Line::from(t.clone()),
        Row::Rule => Line::from("─".repeat(width as usize)),
    }));
    lines
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

impl Surface for TerminalSurface {
    fn width(&self) -> usize {
        self.width as usize
    }

    fn height(&self) -> usize {
        self.height as usize
    }

    fn text_width(&self, text: &str) -> usize {
        Span::raw(text).width()
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let lines = frame_lines(frame, self.width, self.height);
        let (width, height) = (self.width, self.height);
        self.terminal.draw(|f| {
            let area = centered(f.area(), width + 2, height + 2);
            let screen = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(screen, area);
        })?;
        Ok(())
    }

    fn release(&mut self) -> Result<(), DisplayError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_padded_to_the_vertical_middle() {
        let frame = Frame {
            rows: vec![Row::Text("Goodbye!".into())],
        };
        let lines = frame_lines(&frame, 21, 6);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], Line::from("Goodbye!"));
    }

    #[test]
    fn rule_spans_the_width() {
        let frame = Frame {
            rows: vec![Row::Rule],
        };
        let lines = frame_lines(&frame, 4, 1);
        assert_eq!(lines, vec![Line::from("────")]);
    }

    #[test]
    fn box_is_centered_and_clipped_to_the_terminal() {
        assert_eq!(centered(Rect::new(0, 0, 80, 24), 23, 8), Rect::new(28, 8, 23, 8));
        assert_eq!(centered(Rect::new(0, 0, 10, 4), 23, 8), Rect::new(0, 0, 10, 4));
    }
}
