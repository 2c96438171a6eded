/// User settings for the explorer
///
/// Settings are read from a small JSON file in the user's config directory:
/// - Linux: ~/.config/aa-vote-explorer/settings.json
/// - macOS: ~/Library/Application Support/aa-vote-explorer/settings.json
/// - Windows: %APPDATA%\aa-vote-explorer\settings.json
///
/// The file is optional. Every field falls back to the built-in default,
/// which points at the `data/` directory next to the working directory.
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding both CSV files
    pub data_dir: PathBuf,
    /// President table file name, relative to `data_dir`
    pub president_file: String,
    /// Senate table file name, relative to `data_dir`
    pub senate_file: String,
    /// Chart size in logical pixels
    pub chart_width: f32,
    pub chart_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            president_file: "aa_pres_2020_df.csv".to_string(),
            senate_file: "aa_sen_2020_df.csv".to_string(),
            chart_width: 800.0,
            chart_height: 500.0,
        }
    }
}

impl Settings {
    pub fn president_path(&self) -> PathBuf {
        self.data_dir.join(&self.president_file)
    }

    pub fn senate_path(&self) -> PathBuf {
        self.data_dir.join(&self.senate_file)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> DashboardResult<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(DashboardError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_json(&contents).map_err(|source| DashboardError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings from the user's config directory, or defaults.
    ///
    /// A broken settings file is reported and ignored rather than keeping
    /// the dashboard from starting.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                info!("⚙️  Settings: data directory {}", settings.data_dir.display());
                settings
            }
            Err(e) => {
                warn!("⚠️  {e}; using default settings");
                Self::default()
            }
        }
    }

    /// Get the path where the settings file is expected
    fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("aa-vote-explorer");
        path.push("settings.json");
        Some(path)
    }
}
