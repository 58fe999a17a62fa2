//! Stagecrypt - password-based encryption for per-stage secrets files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── encrypt       # Encrypt a stage's secrets file
//! │   ├── decrypt       # Decrypt a stage's artifact
//! │   ├── check         # Pre-flight existence check
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # .stagecrypt.toml loading
//!     ├── paths         # Secrets file path resolution
//!     ├── kdf           # PBKDF2 key and IV derivation
//!     ├── cipher        # AES-256-CBC streaming transform
//!     ├── pipeline      # File-to-file encrypt/decrypt run
//!     ├── prompt        # Masked password entry
//!     └── secrets       # encrypt / decrypt / check entry points
//! ```
//!
//! # Format
//!
//! Artifacts are raw AES-256-CBC ciphertext with PKCS#7 padding. Key and IV
//! are both derived from the password with PBKDF2-HMAC-SHA512, so nothing
//! but the password is needed to decrypt.

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::secrets::{check, decrypt, encrypt, Request};
pub use crate::error::{Error, Result};
