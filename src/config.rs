//! CLI configuration.
//!
//! Read from a TOML file. Every key is optional:
//!
//! ```toml
//! format = "json"        # "lines" (default) or "json"
//! log_level = "debug"    # tracing filter directive, default "warn"
//! history_file = "/tmp/pbql_history"
//! color = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PbqlError, PbqlResult};

/// How result lines are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One result line per output line
    #[default]
    Lines,
    /// A JSON array of result lines
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub format: OutputFormat,
    pub log_level: String,
    /// REPL history file, defaults to `~/.pbql_history`
    pub history_file: Option<PathBuf>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Lines,
            log_level: "warn".to_string(),
            history_file: None,
            color: true,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> PbqlResult<Self> {
        toml::from_str(text).map_err(|e| PbqlError::config(e.to_string()))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `<config_dir>/pbql/config.toml`
    /// is used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> PbqlResult<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// `<config_dir>/pbql/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pbql").join("config.toml"))
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".pbql_history")))
    }

    fn read(path: &Path) -> PbqlResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PbqlError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("format = \"json\"\ncolor = false\n").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("colour = true").unwrap_err();
        assert!(matches!(err, PbqlError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/pbql.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: /nonexistent/pbql.toml"));
    }

    #[test]
    fn test_explicit_history_file_wins() {
        let config = Config::from_toml("history_file = \"/tmp/h\"").unwrap();
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/h")));
    }
}
