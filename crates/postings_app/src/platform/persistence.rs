use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use postings_engine::{AtomicFileWriter, ClientSettings};
use postings_logging::{postings_error, postings_info, postings_warn};
use serde::{Deserialize, Serialize};

use super::ui::theme::Theme;

pub const SETTINGS_FILENAME: &str = ".postings.ron";

/// User settings, stored as RON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub theme: Theme,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    /// When set, every CSV built from the form is also saved here.
    pub csv_copy_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: ClientSettings::default().base_url,
            theme: Theme::default(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
            csv_copy_dir: None,
        }
    }
}

impl Settings {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub(crate) fn default_settings_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILENAME)
}

/// Reads settings from `path`; a missing or unreadable file yields defaults.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            postings_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            postings_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            postings_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

pub(crate) fn save_settings(path: &Path, settings: &Settings) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            postings_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
        postings_error!("Settings path {:?} has no file name", path);
        return;
    };

    let writer = AtomicFileWriter::new(dir);
    if let Err(err) = writer.write(filename, content.as_bytes()) {
        postings_error!("Failed to write settings to {:?}: {}", path, err);
    }
}
