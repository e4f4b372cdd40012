use crate::playback::{CoverArt, PlaybackChange, PlaybackStatus, format_mmss};

pub const PLAY_LABEL: &str = "Play Music";
pub const PAUSE_LABEL: &str = "Pause Music";
/// Shown on the toggle button before any playback state has been reported.
pub const INITIAL_BUTTON_LABEL: &str = "Stop Music";
/// Time labels before the first duration/position report.
pub const INITIAL_TIME_LABEL: &str = "0:00";

/// Labels and slider values derived from playback notifications.
///
/// Every field is a pure formatting of the last change received; nothing
/// here talks to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub song_label: String,
    pub elapsed_label: String,
    pub total_label: String,
    pub slider_max: u64,
    pub slider_position: u64,
    pub button_label: String,
    pub cover_art: Option<CoverArt>,
    /// Last playback failure, shown in the status line.
    pub error: Option<String>,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            song_label: String::new(),
            elapsed_label: INITIAL_TIME_LABEL.to_string(),
            total_label: INITIAL_TIME_LABEL.to_string(),
            slider_max: 0,
            slider_position: 0,
            button_label: INITIAL_BUTTON_LABEL.to_string(),
            cover_art: None,
            error: None,
        }
    }
}

impl NowPlaying {
    pub fn apply(&mut self, change: &PlaybackChange) {
        match change {
            PlaybackChange::TrackChanged { display_name } => {
                self.song_label = display_name.clone();
                self.error = None;
            }
            PlaybackChange::DurationChanged(ms) => {
                self.slider_max = *ms;
                self.total_label = format_mmss(*ms);
            }
            PlaybackChange::PositionChanged(ms) => {
                self.slider_position = *ms;
                self.elapsed_label = format_mmss(*ms);
            }
            PlaybackChange::StatusChanged(status) => {
                self.button_label = match status {
                    PlaybackStatus::Playing => PAUSE_LABEL,
                    PlaybackStatus::Paused | PlaybackStatus::Stopped => PLAY_LABEL,
                }
                .to_string();
            }
            PlaybackChange::MetadataLoaded(meta) => {
                if let Some(title) = meta.title.as_deref().filter(|t| !t.trim().is_empty()) {
                    self.song_label = title.to_string();
                }
                // No picture keeps whatever was shown before.
                if let Some(ref art) = meta.cover_art {
                    self.cover_art = Some(art.clone());
                }
            }
            PlaybackChange::Failed(message) => {
                self.error = Some(message.clone());
            }
        }
    }

    /// Slider fill in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.slider_max == 0 {
            return 0.0;
        }
        (self.slider_position as f64 / self.slider_max as f64).clamp(0.0, 1.0)
    }

    /// One-line description of the cover art, if any.
    pub fn cover_art_text(&self) -> Option<String> {
        self.cover_art.as_ref().map(|art| {
            let kib = art.data.len().div_ceil(1024);
            match art.mime_type.as_deref() {
                Some(mime) => format!("cover art: {mime}, {kib} KiB"),
                None => format!("cover art: {kib} KiB"),
            }
        })
    }
}
