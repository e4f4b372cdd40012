//! Test doubles for the playback engine.

use std::path::{Path, PathBuf};

use super::engine::{EngineError, PlaybackEngine};
use super::types::EngineEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Seek(u64),
    Shutdown,
}

/// Records every command and hands back queued events.
#[derive(Default)]
pub(crate) struct FakeEngine {
    pub calls: Vec<Call>,
    pub pending: Vec<EngineEvent>,
    pub fail_load: bool,
}

impl FakeEngine {
    pub fn failing() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        if self.fail_load {
            return Err(EngineError::Decode {
                path: path.to_path_buf(),
                message: "unsupported".to_string(),
            });
        }
        self.calls.push(Call::Load(path.to_path_buf()));
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn seek(&mut self, position_ms: u64) {
        self.calls.push(Call::Seek(position_ms));
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }

    fn shutdown(&mut self) {
        self.calls.push(Call::Shutdown);
    }
}

/// Write a mono 16-bit PCM WAV file of silence.
pub(crate) fn write_silent_wav(path: &Path, sample_rate: u32, samples: u32) {
    let data_len = samples * 2;
    let mut bytes: Vec<u8> = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    std::fs::write(path, bytes).unwrap();
}
