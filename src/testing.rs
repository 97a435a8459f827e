//! Collaborator doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::io;
use std::path::Path;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::display::{Frame, Surface};
use crate::error::{DisplayError, InputError};
use crate::input::{DigitalInput, KeySource, Level};
use crate::library::Track;
use crate::playback::{Launcher, PlayerProcess};
use crate::shutdown::ShutdownFlag;

pub fn track(name: &str) -> Track {
    Track::new(format!("https://music.test/{name}"), name)
}

pub fn tracks(names: &[&str]) -> Vec<Track> {
    names.iter().map(|n| track(n)).collect()
}

/// What the fake launcher has seen.
#[derive(Default)]
pub struct Ledger {
    pub alive: usize,
    pub max_alive: usize,
    /// Targets of successful spawns, in order.
    pub started: Vec<String>,
    pub spawn_attempts: usize,
    pub stops: usize,
    pub sweeps: Vec<String>,
    /// Fail the next N spawns.
    pub fail_spawns: usize,
    /// Make the shutdown sweep fail.
    pub fail_sweep: bool,
    /// Process ids that finished on their own.
    pub finished: HashSet<u32>,
    next_id: u32,
}

impl Ledger {
    /// Let process `id` end naturally, as when a track plays to the end.
    pub fn finish(&mut self, id: u32) {
        if self.finished.insert(id) {
            self.alive -= 1;
        }
    }
}

pub type SharedLedger = Rc<RefCell<Ledger>>;

type Hook = Rc<dyn Fn()>;

#[derive(Clone, Default)]
pub struct FakeLauncher {
    pub ledger: SharedLedger,
    /// Runs inside every blocking wait, before it returns.
    pub on_wait: Option<Hook>,
}

pub struct FakeProcess {
    id: u32,
    ledger: SharedLedger,
    reaped: bool,
    on_wait: Option<Hook>,
}

impl FakeProcess {
    fn exited(&self) -> bool {
        self.reaped || self.ledger.borrow().finished.contains(&self.id)
    }
}

impl PlayerProcess for FakeProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn terminate(&mut self) -> io::Result<()> {
        if self.exited() {
            return Err(io::Error::other("no such process"));
        }
        Ok(())
    }

    fn wait(&mut self) -> io::Result<()> {
        if let Some(hook) = &self.on_wait {
            hook();
        }
        if !self.exited() {
            let mut ledger = self.ledger.borrow_mut();
            ledger.alive -= 1;
            ledger.stops += 1;
        }
        self.reaped = true;
        Ok(())
    }

    fn try_wait(&mut self) -> io::Result<bool> {
        Ok(self.exited())
    }
}

impl Launcher for FakeLauncher {
    type Process = FakeProcess;

    fn spawn(&mut self, _executable: &str, _flags: &[String], target: &Path) -> io::Result<FakeProcess> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.spawn_attempts += 1;
        if ledger.fail_spawns > 0 {
            ledger.fail_spawns -= 1;
            return Err(io::Error::new(io::ErrorKind::NotFound, "player not installed"));
        }
        ledger.alive += 1;
        ledger.max_alive = ledger.max_alive.max(ledger.alive);
        ledger.started.push(target.display().to_string());
        ledger.next_id += 1;
        Ok(FakeProcess {
            id: ledger.next_id,
            ledger: Rc::clone(&self.ledger),
            reaped: false,
            on_wait: self.on_wait.clone(),
        })
    }

    fn kill_all_by_name(&mut self, name: &str) -> io::Result<()> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.sweeps.push(name.to_string());
        if ledger.fail_sweep {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "pkill: operation not permitted"));
        }
        Ok(())
    }
}

/// Surface that keeps every frame it was given.
#[derive(Clone)]
pub struct RecordingSurface {
    pub frames: Rc<RefCell<Vec<Frame>>>,
    pub failing: Rc<RefCell<bool>>,
    pub releases: Rc<RefCell<usize>>,
    pub width: usize,
    pub height: usize,
}

impl RecordingSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frames: Rc::default(),
            failing: Rc::default(),
            releases: Rc::default(),
            width,
            height,
        }
    }

    /// Text of every frame drawn so far.
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.frames
            .borrow()
            .iter()
            .map(|f| f.text_lines().into_iter().map(String::from).collect())
            .collect()
    }
}

impl Surface for RecordingSurface {
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
        if *self.failing.borrow() {
            return Err(DisplayError::Io(io::Error::other("i2c nak")));
        }
        self.frames.borrow_mut().push(frame.clone());
        Ok(())
    }

    fn release(&mut self) -> Result<(), DisplayError> {
        *self.releases.borrow_mut() += 1;
        Ok(())
    }
}

/// Button line fed from a script; LOW once the script runs out.
#[derive(Clone, Default)]
pub struct ScriptedButton {
    pub samples: Rc<RefCell<VecDeque<Result<Level, InputError>>>>,
    pub released: Rc<RefCell<bool>>,
    /// Requested when a sample is read past the end of the script.
    pub on_empty: Option<ShutdownFlag>,
}

impl ScriptedButton {
    pub fn push(&self, level: Level) {
        self.samples.borrow_mut().push_back(Ok(level));
    }

    pub fn push_error(&self, error: InputError) {
        self.samples.borrow_mut().push_back(Err(error));
    }
}

impl DigitalInput for ScriptedButton {
    fn read_level(&mut self) -> Result<Level, InputError> {
        let next = self.samples.borrow_mut().pop_front();
        next.unwrap_or_else(|| {
            if let Some(flag) = &self.on_empty {
                flag.request();
            }
            Ok(Level::Low)
        })
    }

    fn release(&mut self) {
        *self.released.borrow_mut() = true;
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Terminal keys handed out one batch per sample.
#[derive(Default)]
pub struct ScriptedKeys(VecDeque<Option<KeyEvent>>);

impl ScriptedKeys {
    pub fn batches(batches: Vec<Vec<KeyEvent>>) -> Self {
        let mut queue = VecDeque::new();
        for batch in batches {
            queue.extend(batch.into_iter().map(Some));
            queue.push_back(None);
        }
        Self(queue)
    }

    pub fn of(keys: Vec<KeyEvent>) -> Self {
        Self::batches(vec![keys])
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.0.pop_front().flatten())
    }
}
