//! Error types shared across the controller.
//!
//! Only [`InputError`] is fatal once the loop is running. Spawn and display
//! failures are reported and contained where they happen.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The button line could not be read or set up.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read button line {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("button line {path} reported unexpected value {value:?}")]
    BadValue { path: PathBuf, value: String },

    #[error("failed to set up gpio pin {pin}: {source}")]
    Setup { pin: u32, source: io::Error },

    #[error("failed to read terminal input: {0}")]
    Terminal(#[source] io::Error),
}

/// A player process could not be started for a track.
#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("track file not found: {0}")]
    TrackMissing(PathBuf),

    #[error("failed to launch {executable}: {source}")]
    Launch {
        executable: String,
        source: io::Error,
    },
}

/// The display surface rejected a frame.
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("display i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Errors that stop the program.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error("playlist entry not found: {0}")]
    MissingEntry(PathBuf),

    #[error("{0}")]
    Usage(&'static str),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
