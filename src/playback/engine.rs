use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use thiserror::Error;

use super::sink::open_source;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, EngineEvent};

/// Errors surfaced by a playback engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported or corrupt audio file {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("audio thread is not running")]
    Disconnected,
}

/// The media component the controller drives.
///
/// Commands are fire-and-forget; what actually happened comes back through
/// [`poll_events`](PlaybackEngine::poll_events), which is called from the UI
/// thread.
pub trait PlaybackEngine {
    /// Make `path` the current source. Playback does not start.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Jump to an absolute position in milliseconds.
    fn seek(&mut self, position_ms: u64);
    /// Drain the events emitted since the last call.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
    fn shutdown(&mut self) {}
}

/// `rodio` engine running on a dedicated audio thread.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    events: Receiver<EngineEvent>,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Start the audio thread and open the default output device.
    pub fn spawn() -> Result<Self, EngineError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, events) = mpsc::channel::<EngineEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);

        let join = spawn_audio_thread(rx, event_tx, ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                events,
                join: Some(join),
            }),
            Ok(Err(msg)) => {
                let _ = join.join();
                Err(EngineError::NoOutputDevice(msg))
            }
            Err(_) => Err(EngineError::Disconnected),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), EngineError> {
        self.tx.send(cmd).map_err(|_| EngineError::Disconnected)
    }

    fn send_or_warn(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            tracing::warn!(error = %e, "dropped audio command");
        }
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let source = open_source(path)?;
        self.send(AudioCmd::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    fn play(&mut self) {
        self.send_or_warn(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send_or_warn(AudioCmd::Pause);
    }

    fn seek(&mut self, position_ms: u64) {
        self.send_or_warn(AudioCmd::Seek(position_ms));
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.events.try_iter().collect()
    }

    fn shutdown(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
