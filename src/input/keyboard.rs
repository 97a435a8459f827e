use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::error::InputError;
use crate::shutdown::ShutdownFlag;

use super::{DigitalInput, Level};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum KeyAction {
    Press,
    Quit,
    Ignore,
}

fn classify(key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Press,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Pending key presses, read without blocking.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Keys from the controlling terminal through crossterm.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

/// Drain `keys`, requesting shutdown on a quit key. True if a press key was seen.
fn drain<K: KeySource>(keys: &mut K, shutdown: &ShutdownFlag) -> Result<bool, InputError> {
    let mut pressed = false;
    while let Some(key) = keys.next_key().map_err(InputError::Terminal)? {
        match classify(&key) {
            KeyAction::Press => pressed = true,
            KeyAction::Quit => {
                if !shutdown.is_requested() {
                    info!(key = ?key.code, "quit key pressed");
                }
                shutdown.request();
            }
            KeyAction::Ignore => {}
        }
    }
    Ok(pressed)
}

/// Stand-in button for desktop use: Space or Enter is a press.
///
/// Each key press reads as HIGH for exactly one sample. The terminal is in
/// raw mode, so Ctrl+C arrives here as a key rather than as SIGINT and is
/// turned into a shutdown request, as are `q` and Esc.
pub struct KeyboardLine<K = TerminalKeys> {
    keys: K,
    shutdown: ShutdownFlag,
}

impl KeyboardLine {
    pub fn new(shutdown: ShutdownFlag) -> Self {
        Self::with_keys(TerminalKeys, shutdown)
    }
}

impl<K: KeySource> KeyboardLine<K> {
    pub fn with_keys(keys: K, shutdown: ShutdownFlag) -> Self {
        Self { keys, shutdown }
    }
}

impl<K: KeySource> DigitalInput for KeyboardLine<K> {
    fn read_level(&mut self) -> Result<Level, InputError> {
        let pressed = drain(&mut self.keys, &self.shutdown)?;
        Ok(if pressed { Level::High } else { Level::Low })
    }
}

/// A real button line with the terminal's quit keys watched alongside.
///
/// While the terminal display holds raw mode Ctrl+C no longer raises
/// SIGINT, so the keys are read here on every sample instead. Space and
/// Enter are ignored; only the wrapped line presses the button.
pub struct QuitKeys<I, K = TerminalKeys> {
    line: I,
    keys: K,
    shutdown: ShutdownFlag,
}

impl<I: DigitalInput> QuitKeys<I> {
    pub fn new(line: I, shutdown: ShutdownFlag) -> Self {
        Self::with_keys(line, TerminalKeys, shutdown)
    }
}

impl<I: DigitalInput, K: KeySource> QuitKeys<I, K> {
    pub fn with_keys(line: I, keys: K, shutdown: ShutdownFlag) -> Self {
        Self {
            line,
            keys,
            shutdown,
        }
    }
}

impl<I: DigitalInput, K: KeySource> DigitalInput for QuitKeys<I, K> {
    fn read_level(&mut self) -> Result<Level, InputError> {
        drain(&mut self.keys, &self.shutdown)?;
        self.line.read_level()
    }

    fn release(&mut self) {
        self.line.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedButton, ScriptedKeys, key};

    #[test]
    fn space_and_enter_press_the_button() {
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(classify(&space), KeyAction::Press);
        assert_eq!(classify(&enter), KeyAction::Press);
    }

    #[test]
    fn quit_keys_request_shutdown() {
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify(&q), KeyAction::Quit);
        assert_eq!(classify(&esc), KeyAction::Quit);
        assert_eq!(classify(&ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn releases_and_other_keys_are_ignored() {
        let c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(classify(&c), KeyAction::Ignore);

        let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(classify(&release), KeyAction::Ignore);
    }

    #[test]
    fn keyboard_line_reads_high_for_one_sample_per_batch_of_presses() {
        let shutdown = ShutdownFlag::new();
        let keys = ScriptedKeys::of(vec![
            key(KeyCode::Char('x')),
            key(KeyCode::Char(' ')),
            key(KeyCode::Enter),
        ]);
        let mut line = KeyboardLine::with_keys(keys, shutdown.clone());
        assert_eq!(line.read_level().unwrap(), Level::High);
        assert_eq!(line.read_level().unwrap(), Level::Low);
        assert!(!shutdown.is_requested());
    }

    #[test]
    fn quit_keys_on_a_gpio_line_request_shutdown_and_pass_levels_through() {
        let shutdown = ShutdownFlag::new();
        let button = ScriptedButton::default();
        button.push(Level::High);
        let keys = ScriptedKeys::of(vec![key(KeyCode::Char(' ')), key(KeyCode::Char('q'))]);
        let mut line = QuitKeys::with_keys(button.clone(), keys, shutdown.clone());

        assert_eq!(line.read_level().unwrap(), Level::High);
        assert!(shutdown.is_requested());
        assert_eq!(line.read_level().unwrap(), Level::Low);

        line.release();
        assert!(*button.released.borrow());
    }

    #[test]
    fn space_on_a_gpio_line_is_not_a_press() {
        let shutdown = ShutdownFlag::new();
        let keys = ScriptedKeys::of(vec![key(KeyCode::Char(' '))]);
        let mut line = QuitKeys::with_keys(ScriptedButton::default(), keys, shutdown.clone());
        assert_eq!(line.read_level().unwrap(), Level::Low);
        assert!(!shutdown.is_requested());
    }
}
