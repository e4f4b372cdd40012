//! Playback-related small types.
//!
//! Status, engine commands/events and the change notifications published by
//! the controller.

use std::path::PathBuf;
use std::time::Duration;

use crate::library::TrackDescriptor;

use super::sink::LoadedSource;

/// The playback state of the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Embedded picture taken from the file's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

/// Tag information read after a source is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub cover_art: Option<CoverArt>,
    /// Duration reported by the container, used when the decoder cannot tell.
    pub duration: Option<Duration>,
}

/// Commands accepted by the audio thread.
pub(crate) enum AudioCmd {
    /// Replace the current source. The sink starts paused.
    Load { path: PathBuf, source: LoadedSource },
    Play,
    Pause,
    /// Absolute position in milliseconds.
    Seek(u64),
    Quit,
}

/// Notifications emitted by the engine, drained on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DurationChanged(u64),
    PositionChanged(u64),
    StateChanged(PlaybackStatus),
    MetadataLoaded(TrackMetadata),
    Error(String),
}

/// What the controller tells its subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackChange {
    TrackChanged { display_name: String },
    DurationChanged(u64),
    PositionChanged(u64),
    StatusChanged(PlaybackStatus),
    MetadataLoaded(TrackMetadata),
    Failed(String),
}

/// Session state owned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_track: Option<TrackDescriptor>,
    pub status: PlaybackStatus,
    pub duration_ms: u64,
    pub position_ms: u64,
}
