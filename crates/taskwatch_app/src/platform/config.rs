use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use watch_logging::{watch_info, watch_warn};

const CONFIG_FILENAME: &str = "taskwatch.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the admin site hosting the task API.
    pub base_url: String,
    /// File holding browser-style cookie text (`sessionid=...; csrftoken=...`).
    pub cookie_file: Option<PathBuf>,
    /// Where files for download-type tasks are saved.
    pub download_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            cookie_file: None,
            download_dir: PathBuf::from("./downloads"),
        }
    }
}

/// Loads `taskwatch.ron` from `dir`. Missing file is normal; unreadable or
/// unparsable config degrades to defaults with a logged warning.
pub(crate) fn load_config(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            watch_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            watch_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            watch_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
