use std::{env, path::PathBuf};

use super::schema::Settings;

/// Settings loading helpers.
///
/// `Settings::load` reads the optional settings file and then applies
/// environment overrides (prefix `MELLOMANIAC__`) on top of struct defaults.
impl Settings {
    /// Load settings from the optional settings file and environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let settings_path = resolve_settings_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &settings_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MELLOMANIAC")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate, falling back to defaults.
    ///
    /// Settings are optional, so a broken file never stops startup. The
    /// second value explains why the defaults were used, for the caller to
    /// report once logging is up.
    pub fn load_or_default() -> (Self, Option<String>) {
        let loaded = Self::load()
            .map_err(|e| format!("failed to load settings: {e}"))
            .and_then(|s| match s.validate() {
                Ok(()) => Ok(s),
                Err(msg) => Err(format!("invalid settings: {msg}")),
            });

        match loaded {
            Ok(s) => (s, None),
            Err(problem) => (Self::default(), Some(problem)),
        }
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.library.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("library.extensions must name at least one extension".to_string());
        }
        if self.controls.seek_seconds == 0 {
            return Err("controls.seek_seconds must be >= 1".to_string());
        }
        Ok(())
    }

    /// Directory that receives the log file.
    pub fn log_directory(&self) -> PathBuf {
        self.log
            .directory
            .clone()
            .or_else(default_state_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Resolve the settings path from `MELLOMANIAC_SETTINGS_PATH` or XDG defaults.
pub fn resolve_settings_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MELLOMANIAC_SETTINGS_PATH") {
        return Some(PathBuf::from(p));
    }
    default_settings_path()
}

/// Compute `$XDG_CONFIG_HOME/mellomaniac/settings.toml`, or
/// `~/.config/mellomaniac/settings.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_settings_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("mellomaniac").join("settings.toml"))
}

/// Compute `$XDG_STATE_HOME/mellomaniac` or `~/.local/state/mellomaniac`.
pub fn default_state_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("mellomaniac"))
}
