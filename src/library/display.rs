use std::path::Path;

use crate::config::TrackDisplayField;

use super::model::TrackTags;

/// Build the on-screen name of a track from `fields`, joined by `sep`.
///
/// Missing or blank fields are skipped. When nothing is left the file stem
/// is used, and the full path as a last resort.
pub fn display_name(path: &Path, tags: &TrackTags, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => tags.title.clone(),
            TrackDisplayField::Artist => tags.artist.clone(),
            TrackDisplayField::Album => tags.album.clone(),
            TrackDisplayField::Filename => file_stem(path),
            TrackDisplayField::Path => Some(path.display().to_string()),
        };
        if let Some(p) = part.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()) {
            parts.push(p);
        }
    }

    if !parts.is_empty() {
        return parts.join(sep);
    }

    file_stem(path)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
