use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use regex::Regex;

use super::{Config, ConfigPaths};
use crate::{BridgeError, Result};

/// Where a loaded configuration came from.
///
/// Loading runs before logging is set up, so callers report this once
/// the subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Values read from this file
    File(PathBuf),
    /// No file found; built-in defaults
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl Config {
    /// Loads an explicit file, or the default location when `path` is `None`.
    ///
    /// # Errors
    /// Returns error if an explicit file is missing, or if any file that
    /// is read cannot be parsed or fails validation.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = path {
            return Ok((Self::load_from(path)?, ConfigSource::File(path.to_path_buf())));
        }

        let Ok(path) = ConfigPaths::main_config() else {
            return Ok((Self::default(), ConfigSource::Defaults));
        };

        match fs::metadata(&path) {
            Ok(_) => Ok((Self::load_from(&path)?, ConfigSource::File(path))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Ok((Self::default(), ConfigSource::Defaults))
            }
            Err(e) => Err(BridgeError::config(e, Some(&path))),
        }
    }

    /// Loads the configuration from an explicit file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or
    /// holds values that fail validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BridgeError::config(e, Some(path)))?;
        Self::parse(&content).map_err(|e| match e {
            BridgeError::Config { details, .. } => BridgeError::config(details, Some(path)),
            other => other,
        })
    }

    /// Loads the configuration from the default location.
    ///
    /// A missing file is not an error; the built-in defaults are used instead.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        Self::load(None).map(|(config, _)| config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| BridgeError::config(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot check on its own.
    ///
    /// # Errors
    /// Returns error for a zero poll interval, a zero request timeout, or a
    /// pattern that is not a valid regular expression.
    pub fn validate(&self) -> Result<()> {
        if self.bus.poll_interval_secs == 0 {
            return Err(BridgeError::config(
                "bus.poll_interval_secs must be greater than zero",
                None,
            ));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(BridgeError::config(
                "server.request_timeout_secs must be greater than zero",
                None,
            ));
        }

        for (field, pattern) in [
            ("bus.adapter_pattern", &self.bus.adapter_pattern),
            ("bus.device_pattern", &self.bus.device_pattern),
            ("bus.player_pattern", &self.bus.player_pattern),
        ] {
            Regex::new(pattern)
                .map_err(|e| BridgeError::config(format!("{field}: {e}"), None))?;
        }

        Ok(())
    }
}
