use std::path::PathBuf;

/// A file found by the scanner: what the list shows and what the engine loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    /// File name including its extension.
    pub display_name: String,
    pub path: PathBuf,
}

impl TrackDescriptor {
    pub fn from_path(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { display_name, path }
    }
}
