use std::{fs, io::ErrorKind, path::Path};

use tracing::debug;

use super::{Config, ConfigPaths};
use crate::{AppError, Result};

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, the
    /// file cannot be read, or its content is not a valid configuration.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or its
    /// content is not a valid configuration.
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(AppError::io(e, path)),
        };

        let config: Config =
            toml::from_str(&content).map_err(|e| AppError::toml_parse(e, Some(path)))?;
        config.validate()?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a valid configuration.
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(|e| AppError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.client.method_timeout_ms == Some(0) {
            return Err(AppError::InvalidConfigField {
                field: "client.method_timeout_ms".to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
