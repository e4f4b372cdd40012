use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};

use super::metadata::read_metadata;
use super::sink::{LoadedSource, create_paused_sink, open_source};
use super::types::{AudioCmd, EngineEvent, PlaybackStatus, TrackMetadata};

/// How often the thread reports position and checks for end of media.
const TICK: Duration = Duration::from_millis(200);

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineEvent>,
    ready: SyncSender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut audio = AudioThread::new(stream, events);
        loop {
            match rx.recv_timeout(TICK) {
                Ok(AudioCmd::Quit) => {
                    audio.stop();
                    break;
                }
                Ok(cmd) => audio.handle(cmd),
                Err(RecvTimeoutError::Timeout) => audio.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("audio thread exiting");
    })
}

/// State owned by the audio thread.
struct AudioThread {
    stream: OutputStream,
    events: Sender<EngineEvent>,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    status: PlaybackStatus,
    last_position_ms: Option<u64>,
}

impl AudioThread {
    fn new(stream: OutputStream, events: Sender<EngineEvent>) -> Self {
        Self {
            stream,
            events,
            sink: None,
            path: None,
            status: PlaybackStatus::Stopped,
            last_position_ms: None,
        }
    }

    fn emit(&self, event: EngineEvent) {
        // The receiver only goes away while shutting down.
        let _ = self.events.send(event);
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status != status {
            self.status = status;
            self.emit(EngineEvent::StateChanged(status));
        }
    }

    fn report_position(&mut self, position_ms: u64) {
        if self.last_position_ms != Some(position_ms) {
            self.last_position_ms = Some(position_ms);
            self.emit(EngineEvent::PositionChanged(position_ms));
        }
    }

    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load { path, source } => self.load(path, source),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => {
                if self.status == PlaybackStatus::Playing {
                    if let Some(ref s) = self.sink {
                        s.pause();
                    }
                    self.set_status(PlaybackStatus::Paused);
                }
            }
            AudioCmd::Seek(position_ms) => self.seek(position_ms),
            AudioCmd::Quit => self.stop(),
        }
    }

    fn load(&mut self, path: PathBuf, source: LoadedSource) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let decoder_duration = source.total_duration();
        self.sink = Some(create_paused_sink(&self.stream, source));
        // A fresh source starts out stopped; the Play that follows reports the change.
        self.status = PlaybackStatus::Stopped;
        self.last_position_ms = None;
        self.report_position(0);

        let meta = read_metadata(&path).unwrap_or_else(|e| {
            tracing::debug!(path = %path.display(), error = %e, "no readable tags");
            TrackMetadata::default()
        });
        let duration_ms = decoder_duration
            .or(meta.duration)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        tracing::info!(path = %path.display(), duration_ms, "loaded source");
        self.path = Some(path);
        self.emit(EngineEvent::DurationChanged(duration_ms));
        self.emit(EngineEvent::MetadataLoaded(meta));
    }

    fn play(&mut self) {
        let Some(ref sink) = self.sink else {
            return;
        };

        // After end of media the sink is empty; start the file over.
        if sink.empty() {
            let Some(ref path) = self.path else {
                return;
            };
            match open_source(path) {
                Ok(source) => sink.append(source),
                Err(e) => {
                    tracing::error!(error = %e, "failed to reopen source");
                    self.emit(EngineEvent::Error(e.to_string()));
                    return;
                }
            }
            self.last_position_ms = None;
        }

        sink.play();
        self.set_status(PlaybackStatus::Playing);
    }

    fn seek(&mut self, position_ms: u64) {
        let Some(ref sink) = self.sink else {
            return;
        };

        if let Err(e) = sink.try_seek(Duration::from_millis(position_ms)) {
            tracing::warn!(position_ms, error = %e, "seek failed");
            self.emit(EngineEvent::Error(format!("seek failed: {e}")));
            return;
        }
        let pos = sink.get_pos().as_millis() as u64;
        self.report_position(pos);
    }

    fn tick(&mut self) {
        if self.status != PlaybackStatus::Playing {
            return;
        }
        let Some(ref sink) = self.sink else {
            return;
        };

        if sink.empty() {
            self.set_status(PlaybackStatus::Stopped);
        } else {
            let pos = sink.get_pos().as_millis() as u64;
            self.report_position(pos);
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.path = None;
        self.set_status(PlaybackStatus::Stopped);
    }
}
