use std::path::Path;

use lofty::prelude::{Accessor, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_name;
use super::model::{Track, TrackTags};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Read title/artist/album tags. Unreadable or untagged files yield empty tags.
pub(super) fn read_tags(path: &Path) -> TrackTags {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable tags");
            return TrackTags::default();
        }
    };

    match tagged.primary_tag().or_else(|| tagged.first_tag()) {
        Some(tag) => TrackTags {
            title: non_blank(tag.title()),
            artist: non_blank(tag.artist()),
            album: non_blank(tag.album()),
        },
        None => TrackTags::default(),
    }
}

/// Collect the audio files under `dir`, sorted case-insensitively by display name.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            let tags = read_tags(path);
            let name = display_name(
                path,
                &tags,
                &settings.display_fields,
                &settings.display_separator,
            );
            tracks.push(Track::new(path, name));
        }
    }

    tracks.sort_by_cached_key(|t| t.display_name.to_lowercase());
    tracks
}
