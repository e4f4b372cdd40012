//! What the window does in response to user intents.
//!
//! Kept apart from the event loop so the flows can run against a fake
//! engine in tests.

use std::path::{Path, PathBuf};

use crate::app::App;
use crate::config::{ConfigStore, LibrarySettings};
use crate::library::scan;
use crate::playback::{PlaybackController, PlaybackEngine};

/// Restore the library from the config record, or fall back to the first-run
/// flow when there is no usable record.
pub fn restore_library(store: &ConfigStore, library: &LibrarySettings, app: &mut App) {
    if !store.exists() {
        tracing::info!(
            path = %store.path().display(),
            "no config record, asking for a music directory"
        );
        app.first_run = true;
        return;
    }

    match store.load() {
        Ok(record) => load_music(Path::new(&record.music_path), library, app),
        Err(e) => {
            tracing::error!(path = %store.path().display(), error = %e, "unusable config record");
            app.set_status(e.to_string());
            app.first_run = true;
        }
    }
}

/// Scan `dir` and replace the track list with the result.
///
/// Blocks until the scan finishes.
pub fn load_music(dir: &Path, library: &LibrarySettings, app: &mut App) {
    app.set_music_dir(dir.to_path_buf());
    match scan(dir, library) {
        Ok(tracks) => app.set_tracks(tracks),
        Err(e) => {
            tracing::error!(dir = %dir.display(), error = %e, "scan failed");
            app.set_tracks(Vec::new());
            app.set_status(e.to_string());
        }
    }
}

/// Persist `dir` as the music directory and load it.
///
/// Returns `false` when nothing changed.
pub fn choose_directory(
    dir: &str,
    store: &ConfigStore,
    library: &LibrarySettings,
    app: &mut App,
) -> bool {
    if !PathBuf::from(dir).is_dir() {
        app.set_status(format!("not a directory: {dir}"));
        return false;
    }

    if let Err(e) = store.save(dir) {
        tracing::error!(error = %e, "failed to save config record");
        app.set_status(e.to_string());
        return false;
    }

    // Load what was persisted so the list always matches the stored record.
    match store.load() {
        Ok(record) => {
            app.clear_status();
            load_music(Path::new(&record.music_path), library, app);
            app.first_run = false;
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to re-read config record");
            app.set_status(e.to_string());
            false
        }
    }
}

/// Close the directory prompt and act on its contents. A blank entry is a
/// cancelled picker and does nothing.
pub fn submit_prompt(store: &ConfigStore, library: &LibrarySettings, app: &mut App) -> bool {
    let Some(prompt) = app.take_prompt() else {
        return false;
    };
    match prompt.chosen() {
        Some(dir) => choose_directory(dir, store, library, app),
        None => false,
    }
}

/// Play the track behind list row `index`.
pub fn play_index<E: PlaybackEngine>(
    index: usize,
    app: &mut App,
    controller: &mut PlaybackController<E>,
) {
    let Some(track) = app.track_at(index).cloned() else {
        return;
    };
    app.set_selected(index);
    if controller.select(&track).is_ok() {
        app.clear_status();
    }
}

/// Seek relative to the last reported position.
pub fn seek_by<E: PlaybackEngine>(controller: &mut PlaybackController<E>, delta_secs: i64) {
    let target = controller.session().position_ms as i64 + delta_secs * 1000;
    controller.seek(target.max(0) as u64);
}
