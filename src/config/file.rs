use crate::config::{delimiter_byte, Settings};
use crate::utils::error::{Result, SigaError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional TOML settings file. Every section and key may be omitted; missing
/// values fall back to the built-in defaults.
///
/// ```toml
/// [storage]
/// data_dir = "./data"
/// delimiter = ";"
///
/// [reports]
/// passing_threshold = 3.0
/// top_n = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub storage: Option<StorageSection>,
    pub reports: Option<ReportsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsSection {
    pub passing_threshold: Option<f64>,
    pub top_n: Option<usize>,
}

impl FileConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SigaError::ConfigError {
            message: format!("cannot read config file {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| SigaError::ConfigError {
            message: format!("cannot parse config file {}: {e}", path.display()),
        })
    }

    pub fn into_settings(self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(storage) = self.storage {
            if let Some(data_dir) = storage.data_dir {
                settings.data_dir = data_dir;
            }
            if let Some(delimiter) = storage.delimiter {
                let mut chars = delimiter.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => settings.delimiter = delimiter_byte(c)?,
                    _ => {
                        return Err(SigaError::ConfigError {
                            message: format!(
                                "delimiter '{delimiter}' must be a single character"
                            ),
                        })
                    }
                }
            }
        }

        if let Some(reports) = self.reports {
            if let Some(passing_threshold) = reports.passing_threshold {
                settings.passing_threshold = passing_threshold;
            }
            if let Some(top_n) = reports.top_n {
                settings.top_n = top_n;
            }
        }

        Ok(settings)
    }
}
