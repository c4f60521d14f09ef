// Dashboard configuration: where the Lahman files live, which seasons to
// show, and which player/team identifiers the featured views use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::trend::MAX_HORIZON_YEARS;

/// Environment variable naming a config file when no CLI argument is given.
pub const CONFIG_ENV_VAR: &str = "DIAMOND_DASH_CONFIG";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// A player or team the dashboard follows by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedEntity {
    pub id: String,
    pub name: String,
}

impl FeaturedEntity {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub batting_file: String,
    pub pitching_file: String,
    pub teams_file: String,
    pub start_year: i32,
    pub end_year: i32,
    /// Number of seasons projected past the last observed one.
    pub prediction_horizon: u32,
    pub featured_players: Vec<FeaturedEntity>,
    pub featured_team: FeaturedEntity,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            batting_file: "Batting.csv".to_string(),
            pitching_file: "Pitching.csv".to_string(),
            teams_file: "Teams.csv".to_string(),
            start_year: 2012,
            end_year: 2022,
            prediction_horizon: 4,
            featured_players: vec![
                FeaturedEntity::new("troutmi01", "Mike Trout"),
                FeaturedEntity::new("harpebr03", "Bryce Harper"),
            ],
            featured_team: FeaturedEntity::new("CHN", "Chicago Cubs"),
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file. Absent fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DashboardConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Config from the first CLI argument, else `DIAMOND_DASH_CONFIG`, else
    /// defaults. Problems with a named file are logged and fall back to
    /// defaults so the dashboard still opens.
    pub fn from_env_or_default() -> Self {
        let path = std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let Some(path) = path else {
            log::info!("No config file given, using defaults");
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e @ ConfigError::NotFound { .. }) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
            Err(e) => {
                log::error!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_year > self.end_year {
            return Err(ConfigError::Validation {
                field: "start_year".into(),
                message: format!(
                    "start_year {} is after end_year {}",
                    self.start_year, self.end_year
                ),
            });
        }
        if self.prediction_horizon == 0 || self.prediction_horizon > MAX_HORIZON_YEARS {
            return Err(ConfigError::Validation {
                field: "prediction_horizon".into(),
                message: format!(
                    "{} is outside 1..={MAX_HORIZON_YEARS}",
                    self.prediction_horizon
                ),
            });
        }
        for (field, value) in [
            ("batting_file", &self.batting_file),
            ("pitching_file", &self.pitching_file),
            ("teams_file", &self.teams_file),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: field.into(),
                    message: "file name must not be empty".into(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Resolved data paths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub batting: PathBuf,
    pub pitching: PathBuf,
    pub teams: PathBuf,
}

impl DataPaths {
    pub fn resolve(config: &DashboardConfig) -> Self {
        Self::in_dir(&config.data_dir, config)
    }

    /// Same file names, different folder (File → Open data folder…).
    pub fn in_dir(dir: &Path, config: &DashboardConfig) -> Self {
        Self {
            batting: dir.join(&config.batting_file),
            pitching: dir.join(&config.pitching_file),
            teams: dir.join(&config.teams_file),
        }
    }
}
