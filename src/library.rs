//! Playlist loading.
//!
//! The playlist is the configured `playlist.entries` (files or stream URLs,
//! kept in order) followed by every audio file found in the music directory.

mod display;
mod model;
mod scan;

use std::path::Path;

use tracing::{debug, info};

use crate::config::{LibrarySettings, PlaylistSettings};
use crate::error::{Error, Result};

pub use model::Track;
pub use scan::scan;

use display::display_name;
use scan::read_tags;

/// Build the ordered, non-empty track list.
///
/// `dir` overrides `library.dir` (the CLI argument).
pub fn load_playlist(
    playlist: &PlaylistSettings,
    library: &LibrarySettings,
    dir: Option<&Path>,
) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();

    for entry in playlist.entries.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
        tracks.push(entry_track(entry, library)?);
    }
    let configured = tracks.len();

    if let Some(dir) = dir.or(library.dir.as_deref()) {
        let scanned = scan(dir, library);
        debug!(dir = %dir.display(), count = scanned.len(), "scanned music directory");
        tracks.extend(scanned);
    }

    if tracks.is_empty() {
        return Err(Error::EmptyPlaylist);
    }

    info!(
        total = tracks.len(),
        configured,
        scanned = tracks.len() - configured,
        "playlist loaded"
    );
    Ok(tracks)
}

/// Whether an entry is handed to the player as a URL rather than a local file.
pub fn is_remote(entry: &str) -> bool {
    entry
        .split_once("://")
        .is_some_and(|(scheme, rest)| !scheme.is_empty() && !rest.is_empty())
}

fn entry_track(entry: &str, library: &LibrarySettings) -> Result<Track> {
    if is_remote(entry) {
        return Ok(Track::new(entry, entry));
    }

    let path = Path::new(entry);
    if !path.is_file() {
        return Err(Error::MissingEntry(path.to_path_buf()));
    }

    let tags = read_tags(path);
    let name = display_name(path, &tags, &library.display_fields, &library.display_separator);
    Ok(Track::new(path, name))
}
