use std::sync::mpsc::{self, Receiver, Sender};

use crate::library::TrackDescriptor;

use super::engine::{EngineError, PlaybackEngine};
use super::types::{EngineEvent, PlaybackChange, PlaybackStatus, SessionState};

/// Owns the engine and the playback session.
///
/// All methods run on the UI thread. Engine events are folded in by
/// [`pump`](Self::pump) and every resulting change is published to the
/// receivers handed out by [`subscribe`](Self::subscribe).
pub struct PlaybackController<E: PlaybackEngine> {
    engine: E,
    session: SessionState,
    subscribers: Vec<Sender<PlaybackChange>>,
}

impl<E: PlaybackEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            session: SessionState::default(),
            subscribers: Vec::new(),
        }
    }

    /// Register a new listener for [`PlaybackChange`]s.
    pub fn subscribe(&mut self) -> Receiver<PlaybackChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    fn emit(&mut self, change: PlaybackChange) {
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    /// Load `track` and start playing it.
    ///
    /// On failure the session is left as it was and subscribers get a
    /// [`PlaybackChange::Failed`].
    pub fn select(&mut self, track: &TrackDescriptor) -> Result<(), EngineError> {
        if let Err(e) = self.engine.load(&track.path) {
            tracing::error!(path = %track.path.display(), error = %e, "failed to load track");
            self.emit(PlaybackChange::Failed(e.to_string()));
            return Err(e);
        }
        self.engine.play();

        tracing::info!(track = %track.display_name, "playing");
        self.session.current_track = Some(track.clone());
        self.session.status = PlaybackStatus::Playing;
        self.session.duration_ms = 0;
        self.session.position_ms = 0;

        self.emit(PlaybackChange::TrackChanged {
            display_name: track.display_name.clone(),
        });
        self.emit(PlaybackChange::DurationChanged(0));
        self.emit(PlaybackChange::PositionChanged(0));
        self.emit(PlaybackChange::StatusChanged(PlaybackStatus::Playing));
        Ok(())
    }

    /// Pause when playing, otherwise play. No-op with nothing loaded.
    pub fn toggle(&mut self) {
        if self.session.current_track.is_none() {
            return;
        }

        let next = if self.session.status == PlaybackStatus::Playing {
            self.engine.pause();
            PlaybackStatus::Paused
        } else {
            self.engine.play();
            PlaybackStatus::Playing
        };
        self.session.status = next;
        self.emit(PlaybackChange::StatusChanged(next));
    }

    /// Forward a seek to the engine; the new position arrives as an event.
    pub fn seek(&mut self, position_ms: u64) {
        self.engine.seek(position_ms);
    }

    /// Drain engine events and apply them. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let events = self.engine.poll_events();
        let n = events.len();
        for event in events {
            self.handle_event(event);
        }
        n
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        let change = match event {
            EngineEvent::DurationChanged(ms) => {
                self.session.duration_ms = ms;
                PlaybackChange::DurationChanged(ms)
            }
            EngineEvent::PositionChanged(ms) => {
                self.session.position_ms = ms;
                PlaybackChange::PositionChanged(ms)
            }
            EngineEvent::StateChanged(status) => {
                self.session.status = status;
                PlaybackChange::StatusChanged(status)
            }
            EngineEvent::MetadataLoaded(meta) => PlaybackChange::MetadataLoaded(meta),
            EngineEvent::Error(message) => {
                tracing::warn!(%message, "engine reported an error");
                PlaybackChange::Failed(message)
            }
        };
        self.emit(change);
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}
