use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::TrackDescriptor;

/// Errors that end a scan early.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Match the file's extension, written with its leading dot, against the
/// configured list.
pub(crate) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let suffix = format!(".{ext}");

    settings.extensions.iter().map(|e| e.trim()).any(|e| {
        if settings.case_sensitive {
            e == suffix
        } else {
            e.eq_ignore_ascii_case(&suffix)
        }
    })
}

/// A regular file, or a link to one. Links to directories only count when
/// the walker follows them, and then they are descended into instead.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Recursively collect audio files under `root` in traversal order.
///
/// The result is not sorted; the track list shows it exactly as returned.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Result<Vec<TrackDescriptor>, ScanError> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root));
    }

    let mut tracks: Vec<TrackDescriptor> = Vec::new();

    for entry in WalkDir::new(&root).follow_links(settings.follow_links) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                if settings.skip_unreadable {
                    tracing::warn!(
                        path = %path.display(),
                        error = %source,
                        "skipping unreadable entry"
                    );
                    continue;
                }
                return Err(ScanError::Walk { path, source });
            }
        };

        if is_regular_file(&entry) && is_audio_file(entry.path(), settings) {
            tracks.push(TrackDescriptor::from_path(entry.into_path()));
        }
    }

    tracing::info!(root = %root.display(), tracks = tracks.len(), "scanned music directory");
    Ok(tracks)
}
