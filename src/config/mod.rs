pub mod file;

use crate::core::reports::{DEFAULT_PASSING_THRESHOLD, DEFAULT_TOP_N};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SigaError};
use crate::utils::validation::Validate;

#[cfg(feature = "cli")]
use clap::Parser;

/// Effective runtime settings after merging defaults, the optional TOML file
/// and command-line overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: String,
    pub delimiter: u8,
    pub passing_threshold: f64,
    pub top_n: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            delimiter: b',',
            passing_threshold: DEFAULT_PASSING_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(SigaError::ConfigError {
                message: "data_dir cannot be empty".to_string(),
            });
        }
        if !(0.0..=5.0).contains(&self.passing_threshold) {
            return Err(SigaError::ConfigError {
                message: format!(
                    "passing_threshold {} must lie within the grade scale 0.0-5.0",
                    self.passing_threshold
                ),
            });
        }
        if self.top_n == 0 {
            return Err(SigaError::ConfigError {
                message: "top_n must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn passing_threshold(&self) -> f64 {
        self.passing_threshold
    }

    fn top_n(&self) -> usize {
        self.top_n
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "minisiga")]
#[command(about = "Single-user academic records console")]
pub struct CliConfig {
    #[arg(long, help = "Directory holding the delimited data files")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Field delimiter for the data files")]
    pub delimiter: Option<char>,

    #[arg(long, help = "Optional TOML settings file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Builds the effective settings: defaults, then the TOML file if given,
    /// then explicit command-line flags on top.
    pub fn into_settings(self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => file::FileConfig::from_file(path)?.into_settings()?,
            None => Settings::default(),
        };

        if let Some(data_dir) = self.data_dir {
            settings.data_dir = data_dir;
        }
        if let Some(delimiter) = self.delimiter {
            settings.delimiter = delimiter_byte(delimiter)?;
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Quotes and control characters (CR, LF included) would break the framing
/// of the data files themselves, so only printable ASCII and tab pass.
pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter == '\t' || (delimiter.is_ascii_graphic() && delimiter != '"') {
        Ok(delimiter as u8)
    } else {
        Err(SigaError::ConfigError {
            message: format!(
                "delimiter '{}' must be a printable ASCII character other than a quote",
                delimiter.escape_default()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_settings_reject_bad_threshold() {
        let settings = Settings {
            passing_threshold: 6.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
    }

    #[test]
    fn test_delimiter_byte_rejects_framing_characters() {
        assert!(delimiter_byte('"').is_err());
        assert!(delimiter_byte('\n').is_err());
        assert!(delimiter_byte('\r').is_err());
        assert!(delimiter_byte(' ').is_err());
    }
}
