//! The small status screen.
//!
//! The controller only ever asks for one of the named [`Screen`]s. Each is
//! laid out as a complete [`Frame`] and handed to the [`Surface`] in one
//! call, so a screen is either drawn whole or not at all.

mod headless;
mod terminal;
mod wrap;

use tracing::{debug, warn};

use crate::config::DisplaySettings;
use crate::error::DisplayError;

pub use headless::HeadlessSurface;
pub use terminal::TerminalSurface;
pub use wrap::{truncate, wrap_two_lines};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Idle,
    NowPlaying(String),
    /// The named track failed to start; nothing is playing.
    Unavailable(String),
    Goodbye,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Text(String),
    /// A horizontal line across the surface.
    Rule,
}

/// Rows to draw, top to bottom, each centered horizontally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
}

impl Frame {
    /// Text rows only.
    #[cfg(test)]
    pub fn text_lines(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|r| match r {
                Row::Text(t) => Some(t.as_str()),
                Row::Rule => None,
            })
            .collect()
    }
}

/// A drawing target measured in text cells.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn text_width(&self, text: &str) -> usize;
    fn draw(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    fn release(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl<T: Surface + ?Sized> Surface for Box<T> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn text_width(&self, text: &str) -> usize {
        (**self).text_width(text)
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        (**self).draw(frame)
    }

    fn release(&mut self) -> Result<(), DisplayError> {
        (**self).release()
    }
}

pub struct DisplayPresenter<S> {
    surface: S,
    title: String,
    idle_prompt: String,
    last: Option<Screen>,
    released: bool,
}

impl<S: Surface> DisplayPresenter<S> {
    pub fn new(surface: S, settings: &DisplaySettings) -> Self {
        Self {
            surface,
            title: settings.title.clone(),
            idle_prompt: settings.idle_prompt.clone(),
            last: None,
            released: false,
        }
    }

    /// Draw `screen`. Failures are logged and reported as `false`.
    pub fn show(&mut self, screen: Screen) -> bool {
        let frame = self.compose(&screen);
        match self.surface.draw(&frame) {
            Ok(()) => {
                debug!(?screen, previous = ?self.last, "screen drawn");
                self.last = Some(screen);
                true
            }
            Err(e) => {
                warn!(?screen, error = %e, "failed to draw screen");
                false
            }
        }
    }

    pub fn show_splash(&mut self) -> bool {
        self.show(Screen::Splash)
    }

    pub fn show_idle_prompt(&mut self) -> bool {
        self.show(Screen::Idle)
    }

    pub fn show_now_playing(&mut self, name: &str) -> bool {
        self.show(Screen::NowPlaying(name.to_string()))
    }

    pub fn show_unavailable(&mut self, name: &str) -> bool {
        self.show(Screen::Unavailable(name.to_string()))
    }

    pub fn show_goodbye(&mut self) -> bool {
        self.show(Screen::Goodbye)
    }

    pub fn clear(&mut self) -> bool {
        self.show(Screen::Clear)
    }

    /// The last screen that was drawn successfully.
    #[cfg(test)]
    pub fn last_screen(&self) -> Option<&Screen> {
        self.last.as_ref()
    }

    /// Hand the surface back to the system. Later calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.surface.release() {
            warn!(error = %e, "failed to release display");
        }
    }

    fn compose(&self, screen: &Screen) -> Frame {
        let width = self.surface.width();
        let roomy = self.surface.height() >= 4;
        let measure = |s: &str| self.surface.text_width(s);
        let fit = |s: &str| Row::Text(truncate(s, width, measure));

        let mut rows = match screen {
            Screen::Splash => vec![Row::Rule, fit(&self.title), Row::Rule],
            Screen::Idle => wrap_two_lines(&self.idle_prompt, width, measure)
                .into_iter()
                .map(Row::Text)
                .collect(),
            Screen::NowPlaying(name) | Screen::Unavailable(name) => {
                let heading = match screen {
                    Screen::NowPlaying(_) => "Now playing",
                    _ => "Could not play",
                };
                let mut rows = vec![fit(heading)];
                if roomy {
                    rows.push(Row::Rule);
                }
                rows.extend(wrap_two_lines(name, width, measure).into_iter().map(Row::Text));
                rows
            }
            Screen::Goodbye => vec![fit("Goodbye!")],
            Screen::Clear => Vec::new(),
        };
        rows.truncate(self.surface.height());
        Frame { rows }
    }
}

#[cfg(test)]
mod tests;
