use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory name under the platform config dir.
pub const APP_NAME: &str = "route-mileage";

/// Workbook loaded when nothing is uploaded.
pub const DEFAULT_WORKBOOK: &str = "kmapp里程數.xlsx";

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

/// Names of the columns the filter, summary and chart rely on.
///
/// Defaults are the headers of the kmapp mileage workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRoles {
    /// Text column searched by the keyword filter.
    pub place: String,
    /// Cumulative distance marker; summarized and plotted on x.
    pub mileage: String,
    /// Point-to-point distance; plotted on y.
    pub distance: String,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            place: "地名".to_string(),
            mileage: "里程定位".to_string(),
            distance: "運輸距離".to_string(),
        }
    }
}

impl ColumnRoles {
    pub fn new(place: &str, mileage: &str, distance: &str) -> Self {
        Self {
            place: place.to_string(),
            mileage: mileage.to_string(),
            distance: distance.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallback workbook, relative paths resolve against the working directory.
    pub default_file: PathBuf,
    pub columns: ColumnRoles,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from(DEFAULT_WORKBOOK),
            columns: ColumnRoles::default(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit file, or from `{config_dir}/route-mileage/config.toml`
    /// when it exists. Missing keys keep their defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match user_config_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    log::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
}
