//! Core library components.
//!
//! This module contains the reusable business logic: path resolution, key
//! derivation, the CBC streaming pipeline, password acquisition and the
//! stage-level operations built on them.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod kdf;
pub mod paths;
pub mod pipeline;
pub mod prompt;
pub mod secrets;
pub mod validation;
