//! The playback state machine.
//!
//! One thread polls the button, and every press either starts the first
//! track or stops the current player and starts the next one. The player
//! handle lives only here, so there is never more than one player running.
//!
//! ```text
//! Idle --press--> Playing(0) --press--> Playing(1) --> ... --> Playing(0)
//!   \                 |                                    /
//!    `----------------+---- shutdown request --> ShuttingDown --> Terminated
//! ```

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::display::{DisplayPresenter, Surface};
use crate::error::InputError;
use crate::input::{DigitalInput, Edge, InputMonitor};
use crate::playback::{Launcher, PlaybackHandle, PlaybackManager};
use crate::playlist::PlaylistCursor;
use crate::shutdown::ShutdownFlag;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing started yet.
    Idle,
    /// The track at this playlist index was the last one started.
    Playing(usize),
    ShuttingDown,
    Terminated,
}

#[derive(Debug, Copy, Clone)]
pub struct Timing {
    pub poll_interval: Duration,
    pub splash: Duration,
    pub goodbye: Duration,
}

impl Timing {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            poll_interval: Duration::from_millis(settings.input.poll_interval_ms),
            splash: Duration::from_millis(settings.display.splash_ms),
            goodbye: Duration::from_millis(settings.display.goodbye_ms),
        }
    }
}

pub struct ControllerState<P> {
    pub phase: Phase,
    current: Option<PlaybackHandle<P>>,
    first_press_consumed: bool,
    finish_logged: bool,
}

impl<P> ControllerState<P> {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            current: None,
            first_press_consumed: false,
            finish_logged: false,
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&PlaybackHandle<P>> {
        self.current.as_ref()
    }

    #[cfg(test)]
    pub fn first_press_consumed(&self) -> bool {
        self.first_press_consumed
    }
}

pub struct Controller<I: DigitalInput, L: Launcher, S: Surface> {
    monitor: InputMonitor<I>,
    cursor: PlaylistCursor,
    playback: PlaybackManager<L>,
    display: DisplayPresenter<S>,
    state: ControllerState<L::Process>,
    shutdown: ShutdownFlag,
    timing: Timing,
}

impl<I: DigitalInput, L: Launcher, S: Surface> Controller<I, L, S> {
    pub fn new(
        monitor: InputMonitor<I>,
        cursor: PlaylistCursor,
        playback: PlaybackManager<L>,
        display: DisplayPresenter<S>,
        shutdown: ShutdownFlag,
        timing: Timing,
    ) -> Self {
        Self {
            monitor,
            cursor,
            playback,
            display,
            state: ControllerState::new(),
            shutdown,
            timing,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ControllerState<L::Process> {
        &self.state
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[cfg(test)]
    pub fn cursor(&self) -> &PlaylistCursor {
        &self.cursor
    }

    #[cfg(test)]
    pub fn display(&self) -> &DisplayPresenter<S> {
        &self.display
    }

    /// Run until a shutdown request or a button read failure, then shut down.
    pub fn run(&mut self) -> Result<(), InputError> {
        self.startup();

        let result = loop {
            if self.shutdown.is_requested() {
                info!("shutdown requested");
                break Ok(());
            }
            if let Err(e) = self.tick() {
                error!(error = %e, "button line failed");
                break Err(e);
            }
            thread::sleep(self.timing.poll_interval);
        };

        self.shutdown();
        result
    }

    /// Splash, then the idle prompt.
    pub fn startup(&mut self) {
        self.display.show_splash();
        self.hold(self.timing.splash);
        if !self.shutdown.is_requested() {
            self.display.show_idle_prompt();
        }
        info!(tracks = self.cursor.len(), "waiting for the first press");
    }

    /// One poll of the button plus a look at the running player.
    pub fn tick(&mut self) -> Result<(), InputError> {
        if let Some(edge) = self.monitor.poll()? {
            self.handle_edge(edge);
        }
        self.watch_player();
        Ok(())
    }

    pub fn handle_edge(&mut self, edge: Edge) {
        debug!(
            phase = ?self.state.phase,
            first_press_consumed = self.state.first_press_consumed,
            "button pressed"
        );
        match self.state.phase {
            Phase::Idle => self.start_first(),
            Phase::Playing(_) => self.switch_to_next(),
            Phase::ShuttingDown | Phase::Terminated => {
                debug!(at = ?edge.at, "press ignored while shutting down");
            }
        }
    }

    /// First press plays the current track without moving the cursor.
    fn start_first(&mut self) {
        let track = self.cursor.current().clone();
        match self.playback.start(&track) {
            Ok(handle) => {
                self.state.first_press_consumed = true;
                self.adopt(handle, self.cursor.index());
            }
            Err(e) => {
                warn!(track = %track.display_name, error = %e, "could not start first track");
                self.display.show_unavailable(&track.display_name);
            }
        }
    }

    /// Stop the current player, then start the next track.
    ///
    /// The cursor only moves once the next player is running; after a failed
    /// start the next press retries the same track.
    fn switch_to_next(&mut self) {
        if let Some(mut handle) = self.state.current.take() {
            self.playback.stop(&mut handle);
        }

        if self.shutdown.is_requested() {
            info!("shutdown requested while changing tracks");
            return;
        }

        let (next, track) = self.cursor.peek_next();
        let track = track.clone();
        match self.playback.start(&track) {
            Ok(handle) => {
                self.cursor.advance();
                self.adopt(handle, next);
            }
            Err(e) => {
                warn!(
                    track = %track.display_name,
                    index = next,
                    error = %e,
                    "could not start next track"
                );
                // The previous player is already gone.
                self.display.show_unavailable(&track.display_name);
            }
        }
    }

    fn adopt(&mut self, handle: PlaybackHandle<L::Process>, index: usize) {
        let name = handle.track().display_name.clone();
        self.state.current = Some(handle);
        self.state.finish_logged = false;
        self.state.phase = Phase::Playing(index);
        info!(index, track = %name, "now playing");
        self.display.show_now_playing(&name);
    }

    /// Notice a player that ended on its own. Playback stays on that track.
    fn watch_player(&mut self) {
        if self.state.finish_logged {
            return;
        }
        if let Some(handle) = self.state.current.as_mut() {
            if self.playback.has_exited(handle) {
                self.state.finish_logged = true;
                info!(track = %handle.track().display_name, "track finished");
            }
        }
    }

    /// Wait up to `total`, returning early on a shutdown request.
    fn hold(&self, total: Duration) {
        let until = Instant::now() + total;
        let slice = self.timing.poll_interval.max(Duration::from_millis(1));
        while !self.shutdown.is_requested() {
            let now = Instant::now();
            if now >= until {
                break;
            }
            thread::sleep(slice.min(until - now));
        }
    }

    /// Stop playback and hand every resource back. Runs at most once.
    pub fn shutdown(&mut self) {
        if matches!(self.state.phase, Phase::ShuttingDown | Phase::Terminated) {
            return;
        }
        self.state.phase = Phase::ShuttingDown;
        info!("shutting down");

        if let Some(mut handle) = self.state.current.take() {
            self.playback.stop(&mut handle);
        }

        self.display.show_goodbye();
        thread::sleep(self.timing.goodbye);
        self.display.clear();

        self.playback.kill_all();
        self.monitor.release();
        self.display.release();

        self.state.phase = Phase::Terminated;
        info!("shutdown complete");
    }
}

impl<I: DigitalInput, L: Launcher, S: Surface> Drop for Controller<I, L, S> {
    fn drop(&mut self) {
        if let Some(mut handle) = self.state.current.take() {
            self.playback.stop(&mut handle);
        }
    }
}
