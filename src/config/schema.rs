use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `settings.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mellomaniac/settings.toml` or
/// `~/.config/mellomaniac/settings.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MELLOMANIAC__`, `__` as nested separator)
/// 2) Settings file (if present)
/// 3) Struct defaults
///
/// These settings never hold the music directory itself; that lives in the
/// `config.json` record managed by [`ConfigStore`](super::ConfigStore).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub store: StoreSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions, with the leading dot, that count as audio.
    pub extensions: Vec<String>,
    /// Compare extensions byte-for-byte. With the default list this keeps
    /// `.FLAC` while rejecting `.flac` and `.MP3`.
    pub case_sensitive: bool,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Skip entries the walker cannot read instead of failing the whole scan.
    pub skip_unreadable: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![".mp3".into(), ".wav".into(), ".ogg".into(), ".FLAC".into()],
            case_sensitive: true,
            follow_links: false,
            skip_unreadable: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `h` / `l`.
    pub seek_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Text shown in the header box and as the terminal title.
    pub window_title: String,
    /// Label of the first-run button that opens the directory prompt.
    pub select_directory_label: String,
    /// Whether to show the cover-art line in the now-playing box.
    pub show_cover_art: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_title: "Mellomaniac — Music Player".to_string(),
            select_directory_label: "Select your music directory...".to_string(),
            show_cover_art: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Location of the persisted music-directory record.
    pub config_file: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from("config.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Directory that receives `mellomaniac.log`. `None` means the XDG state dir.
    pub directory: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "info".to_string(),
        }
    }
}
