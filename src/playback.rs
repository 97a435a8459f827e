//! External player lifecycle.
//!
//! Every track is played by its own player process. A handle is stopped by
//! terminating the process and then waiting for it to exit, so the next
//! start can never overlap with the previous one.

mod process;

use std::io;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::PlayerSettings;
use crate::error::SpawnError;
use crate::library::{Track, is_remote};

pub use process::SystemLauncher;

/// One running player.
pub trait PlayerProcess {
    fn id(&self) -> u32;

    /// Ask the process to stop. Does not wait.
    fn terminate(&mut self) -> io::Result<()>;

    /// Block until the process has exited.
    fn wait(&mut self) -> io::Result<()>;

    /// `Ok(true)` once the process has exited.
    fn try_wait(&mut self) -> io::Result<bool>;
}

/// Starts player processes and sweeps leftovers.
pub trait Launcher {
    type Process: PlayerProcess;

    fn spawn(&mut self, executable: &str, flags: &[String], target: &Path)
    -> io::Result<Self::Process>;

    /// Terminate every process whose name is exactly `name`.
    fn kill_all_by_name(&mut self, name: &str) -> io::Result<()>;
}

/// A started track. Owned by the controller.
pub struct PlaybackHandle<P> {
    process: P,
    track: Track,
    started_at: Instant,
    stopped: bool,
}

impl<P: PlayerProcess> PlaybackHandle<P> {
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[cfg(test)]
    pub fn pid(&self) -> u32 {
        self.process.id()
    }

    #[cfg(test)]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

pub struct PlaybackManager<L> {
    launcher: L,
    executable: String,
    flags: Vec<String>,
    sweep_name: String,
}

impl<L: Launcher> PlaybackManager<L> {
    pub fn new(launcher: L, settings: &PlayerSettings) -> Self {
        Self {
            launcher,
            executable: settings.executable.clone(),
            flags: settings.flags.clone(),
            sweep_name: settings.sweep_name(),
        }
    }

    /// Spawn one player for `track`.
    pub fn start(&mut self, track: &Track) -> Result<PlaybackHandle<L::Process>, SpawnError> {
        let remote = track.path.to_str().is_some_and(is_remote);
        if !remote && !track.path.is_file() {
            return Err(SpawnError::TrackMissing(track.path.clone()));
        }

        let process = self
            .launcher
            .spawn(&self.executable, &self.flags, &track.path)
            .map_err(|source| SpawnError::Launch {
                executable: self.executable.clone(),
                source,
            })?;

        info!(pid = process.id(), track = %track.display_name, "player started");
        Ok(PlaybackHandle {
            process,
            track: track.clone(),
            started_at: Instant::now(),
            stopped: false,
        })
    }

    /// Terminate the player and block until it has exited.
    ///
    /// Stopping a handle twice, or one whose process already died, is fine.
    pub fn stop(&mut self, handle: &mut PlaybackHandle<L::Process>) {
        if handle.stopped {
            return;
        }

        let pid = handle.process.id();
        if let Err(e) = handle.process.terminate() {
            debug!(pid, error = %e, "terminate failed, player probably gone already");
        }
        if let Err(e) = handle.process.wait() {
            debug!(pid, error = %e, "wait failed, player probably reaped already");
        }
        handle.stopped = true;

        info!(
            pid,
            track = %handle.track.display_name,
            played_ms = handle.started_at.elapsed().as_millis() as u64,
            "player stopped"
        );
    }

    pub fn is_alive(&mut self, handle: &mut PlaybackHandle<L::Process>) -> bool {
        if handle.stopped {
            return false;
        }
        matches!(handle.process.try_wait(), Ok(false))
    }

    /// Whether the player is gone, either stopped by us or finished on its own.
    pub fn has_exited(&mut self, handle: &mut PlaybackHandle<L::Process>) -> bool {
        !self.is_alive(handle)
    }

    /// Best-effort sweep of stray players by name. Never fails.
    pub fn kill_all(&mut self) {
        match self.launcher.kill_all_by_name(&self.sweep_name) {
            Ok(()) => debug!(name = %self.sweep_name, "player sweep done"),
            Err(e) => warn!(name = %self.sweep_name, error = %e, "player sweep failed"),
        }
    }
}
