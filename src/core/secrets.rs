//! Stage-level operations: encrypt, decrypt and the pre-flight check.
//!
//! These are the entry points a host (the CLI, or anything embedding the
//! library) calls. Each one works from a [`Request`] and re-resolves paths
//! and re-derives keys from scratch.

use std::path::PathBuf;

use tracing::debug;

use crate::core::cipher::Direction;
use crate::core::config::SecretsConfig;
use crate::core::constants;
use crate::core::paths::{self, Naming, SecretFile};
use crate::core::pipeline::{self, Transformed};
use crate::core::prompt;
use crate::core::validation;
use crate::error::{Error, Result};

/// Inputs delivered by the host for one operation.
#[derive(Clone, Default)]
pub struct Request {
    /// Stage to operate on; falls back to the config, then `dev`.
    pub stage: Option<String>,
    /// Password; prompted for when absent.
    pub password: Option<String>,
    /// Project root.
    pub base_dir: PathBuf,
    pub config: SecretsConfig,
}

impl Request {
    /// Request for `base_dir` with its `.stagecrypt.toml` loaded.
    pub fn load(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let config = SecretsConfig::load(&base_dir)?;
        Ok(Self {
            base_dir,
            config,
            ..Default::default()
        })
    }

    pub fn with_stage(mut self, stage: Option<String>) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    /// Effective, validated stage.
    pub fn stage(&self) -> Result<String> {
        let stage = self
            .stage
            .as_deref()
            .or(self.config.stage.as_deref())
            .unwrap_or(constants::DEFAULT_STAGE);
        validation::validate_stage(stage)?;
        Ok(stage.to_string())
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("stage", &self.stage)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("base_dir", &self.base_dir)
            .field("config", &self.config)
            .finish()
    }
}

/// Encrypt the stage's plaintext secrets file into its artifact.
pub fn encrypt(request: Request) -> Result<Transformed> {
    transform(Direction::Encrypt, request)
}

/// Decrypt the stage's artifact back into the plaintext secrets file.
pub fn decrypt(request: Request) -> Result<Transformed> {
    transform(Direction::Decrypt, request)
}

/// Verify the plaintext secrets file for the stage exists.
///
/// Does not create any directory.
///
/// # Errors
///
/// Returns `Error::NotFound` naming the expected file.
pub fn check(request: &Request) -> Result<SecretFile> {
    let stage = request.stage()?;
    let naming = Naming::from_config(&stage, &request.config)?;
    let located = naming.locate(&request.base_dir)?;

    debug!(path = %located.plaintext.path().display(), "checking secrets file");

    if !located.plaintext.exists() {
        return Err(Error::NotFound {
            stage,
            file: located.plaintext.name().to_string(),
        });
    }

    Ok(located.plaintext)
}

fn transform(direction: Direction, request: Request) -> Result<Transformed> {
    let stage = request.stage()?;
    let config = &request.config;

    let paths = paths::resolve(
        &stage,
        &request.base_dir,
        config.prefix(),
        config.source.as_deref(),
        config.entry.as_deref(),
    )?;

    // Fail before prompting so nobody types a password for nothing.
    pipeline::require_source(direction, &paths, &stage)?;

    let password = prompt::acquire_password(request.password)?;
    pipeline::run(direction, &paths, &stage, &password)
}
