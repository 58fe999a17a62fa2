//! Configuration file management.
//!
//! Handles reading and validating the optional `.stagecrypt.toml` that sits in
//! the project's base directory. Every key is optional; a missing file means
//! all defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.stagecrypt.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SecretsConfig {
    /// Stage used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    /// Sub-directory of the base directory holding the secrets files.
    #[serde(
        default,
        alias = "secretsFilePathPrefix",
        skip_serializing_if = "Option::is_none"
    )]
    pub secrets_file_path_prefix: Option<PathBuf>,

    /// Plaintext file name override; `{stage}` is substituted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Encrypted artifact name override; `{stage}` is substituted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

impl SecretsConfig {
    /// Path to the configuration file under `base_dir`.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(constants::CONFIG_FILE)
    }

    /// Load configuration from `base_dir`, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read or parsed, and `ConfigError::InvalidValue`
    /// if validation fails.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::config_path(base_dir);
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        debug!(
            prefix = ?config.secrets_file_path_prefix,
            source = ?config.source,
            entry = ?config.entry,
            "config loaded"
        );

        Ok(config)
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when an override is blank or the
    /// prefix is absolute.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("source", &self.source), ("entry", &self.entry)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        if let Some(prefix) = &self.secrets_file_path_prefix {
            if prefix.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    field: "secrets_file_path_prefix",
                    reason: format!("must be relative, got {}", prefix.display()),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Prefix directory, empty when unset.
    pub fn prefix(&self) -> &Path {
        self.secrets_file_path_prefix
            .as_deref()
            .unwrap_or_else(|| Path::new(""))
    }
}
