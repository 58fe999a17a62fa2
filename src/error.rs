//! Error types for stagecrypt.
//!
//! Every fallible operation returns [`Result<T>`]. Domain errors are grouped
//! into focused enums and folded into the top-level [`Error`] via `#[from]`.
//! No message ever carries a password or derived key material.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::cipher::Direction;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Input(#[from] InputError),

    /// The file an operation reads from does not exist for this stage.
    #[error("Couldn't find the secrets file for this stage: {file}")]
    NotFound { stage: String, file: String },

    /// A read, cipher or write stage failed mid-stream.
    #[error("{direction} '{from}' to '{to}' failed: {source}")]
    Stream {
        direction: Direction,
        from: String,
        to: String,
        #[source]
        source: StreamError,
    },
}

/// Errors loading or validating `.stagecrypt.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// Source and entry resolve to the same file, so encrypting would
    /// overwrite the plaintext.
    #[error("source and entry are the same file: {0}")]
    SameFile(String),
}

/// Directory preparation failures.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

/// Input validation failures.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("stage cannot be empty")]
    EmptyStage,

    #[error("invalid stage '{stage}': {reason}")]
    InvalidStage { stage: String, reason: String },
}

/// Which stage of the read → cipher → write chain failed.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("cipher failed: {0}")]
    Cipher(String),

    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// Password prompt failures.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("no password given and no terminal available to prompt for one")]
    Unavailable,

    #[error("password entry interrupted")]
    Interrupted,

    #[error("failed to read password: {0}")]
    Io(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
