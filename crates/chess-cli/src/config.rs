//! Configuration file loading for the chess CLI.
//!
//! Settings come from `chess.toml`, looked up in the current directory and
//! its two parents. Command-line flags override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The log level is not one of trace, debug, info, warn or error.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}

/// CLI configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Maximum level of log output. Defaults to "info".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Board JSON file to start from when no position is given on the
    /// command line.
    #[serde(default)]
    pub board: Option<PathBuf>,
    /// Perft depth used when none is given. Defaults to 3.
    #[serde(default = "default_perft_depth")]
    pub perft_depth: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_perft_depth() -> u32 {
    3
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_level: default_log_level(),
            board: None,
            perft_depth: default_perft_depth(),
        }
    }
}

impl CliConfig {
    const SEARCH_PATHS: [&'static str; 3] = ["chess.toml", "../chess.toml", "../../chess.toml"];

    /// Loads the first `chess.toml` found, or the defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if a file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::SEARCH_PATHS.into_iter().map(Path::new).find(|p| p.exists()) {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the configured log level.
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::parse(
            r#"
log_level = "debug"
board = "boards/opening.json"
perft_depth = 2
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.board, Some(PathBuf::from("boards/opening.json")));
        assert_eq!(config.perft_depth, 2);
        assert_eq!(config.level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = CliConfig::parse("log_level = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_log_level() {
        let config = CliConfig {
            log_level: "loud".to_string(),
            ..CliConfig::default()
        };
        assert!(matches!(config.level(), Err(ConfigError::InvalidLogLevel(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = CliConfig::load_from(Path::new("/nonexistent/chess.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path =
            std::env::temp_dir().join(format!("chess-cli-config-{}.toml", std::process::id()));
        std::fs::write(&path, "perft_depth = 1\n").unwrap();
        let config = CliConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.perft_depth, 1);
        assert_eq!(config.log_level, "info");
    }
}
