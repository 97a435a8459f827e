use std::path::{Path, PathBuf};

/// One playlist entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Local file or stream URL, passed verbatim to the player.
    pub path: PathBuf,
    /// Name shown on the display.
    pub display_name: String,
}

impl Track {
    pub fn new(path: impl AsRef<Path>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            display_name: display_name.into(),
        }
    }
}

/// Tag values read from an audio file. Blank tags are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}
