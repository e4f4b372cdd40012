//! Utilities for opening files as `rodio` sources and wrapping them in sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::engine::EngineError;

pub(crate) type LoadedSource = Decoder<BufReader<File>>;

/// Open and decode `path`, failing fast on unreadable or undecodable files.
pub(crate) fn open_source(path: &Path) -> Result<LoadedSource, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Create a paused `Sink` on `stream` holding `source`.
pub(super) fn create_paused_sink(stream: &OutputStream, source: LoadedSource) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.append(source);
    sink
}
