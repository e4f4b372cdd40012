//! Application model types: `App` and `DirectoryPrompt`.
//!
//! The `App` struct holds the scanned library, the selected row and the
//! transient UI state (directory prompt, status message) used by the UI and
//! runtime.

use std::path::PathBuf;

use crate::library::TrackDescriptor;
use crate::playback::PlaybackChange;

use super::now_playing::NowPlaying;

/// Text entry standing in for a directory picker dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPrompt {
    pub input: String,
}

impl DirectoryPrompt {
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The chosen path, or `None` when the entry is blank (cancelled).
    pub fn chosen(&self) -> Option<&str> {
        let trimmed = self.input.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// The main application model.
pub struct App {
    /// Backing list for the track list; row `i` always shows `tracks[i]`.
    pub tracks: Vec<TrackDescriptor>,
    pub selected: usize,
    pub now_playing: NowPlaying,
    pub music_dir: Option<PathBuf>,
    /// Show the select-directory button (no directory chosen yet).
    pub first_run: bool,
    pub prompt: Option<DirectoryPrompt>,
    pub status_message: Option<String>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<TrackDescriptor>) -> Self {
        Self {
            tracks,
            selected: 0,
            now_playing: NowPlaying::default(),
            music_dir: None,
            first_run: false,
            prompt: None,
            status_message: None,
        }
    }

    /// Replace the whole track list with a fresh scan.
    pub fn set_tracks(&mut self, tracks: Vec<TrackDescriptor>) {
        self.tracks = tracks;
        self.selected = 0;
    }

    pub fn set_music_dir(&mut self, dir: PathBuf) {
        self.music_dir = Some(dir);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Fold a playback change into the now-playing box. A playback failure
    /// replaces whatever status message was showing.
    pub fn apply_change(&mut self, change: &PlaybackChange) {
        if let PlaybackChange::Failed(_) = change {
            self.status_message = None;
        }
        self.now_playing.apply(change);
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Descriptor behind list row `index`.
    pub fn track_at(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    pub fn set_selected(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.selected = index;
        }
    }

    /// Move the selection down one row, wrapping at the end.
    pub fn next(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.tracks.len();
    }

    /// Move the selection up one row, wrapping at the top.
    pub fn prev(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.tracks.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }

    /// Open the directory prompt, prefilled with the current directory.
    pub fn open_prompt(&mut self) {
        let current = self
            .music_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        self.prompt = Some(DirectoryPrompt::with_input(current));
    }

    pub fn prompt_push(&mut self, c: char) {
        if let Some(ref mut p) = self.prompt {
            p.input.push(c);
        }
    }

    pub fn prompt_pop(&mut self) {
        if let Some(ref mut p) = self.prompt {
            p.input.pop();
        }
    }

    /// Close the prompt and hand back its contents.
    pub fn take_prompt(&mut self) -> Option<DirectoryPrompt> {
        self.prompt.take()
    }
}
