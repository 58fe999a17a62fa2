//! Constants used throughout stagecrypt.
//!
//! Centralizes magic strings and the key-derivation parameters. The KDF
//! values are part of the artifact format: changing any of them makes every
//! previously encrypted file unreadable.

/// Configuration file name, looked up in the base directory.
pub const CONFIG_FILE: &str = ".stagecrypt.toml";

/// Stage used when neither the command line nor the config names one.
pub const DEFAULT_STAGE: &str = "dev";

/// Placeholder substituted with the stage in `source`/`entry` overrides.
pub const STAGE_PLACEHOLDER: &str = "{stage}";

/// Extension stripped from the plaintext name to build the artifact name.
pub const PLAINTEXT_EXTENSION: &str = ".yml";

/// Extension appended to build the encrypted artifact name.
pub const ENCRYPTED_EXTENSION: &str = ".encrypted";

/// PBKDF2 salt for the cipher key.
pub const KEY_SALT: &[u8] = b"default";

/// PBKDF2 salt for the initialization vector.
pub const IV_SALT: &[u8] = b"cipher-iv";

/// PBKDF2-HMAC-SHA512 iteration count for both derivations.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES block and IV length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Read buffer size for the streaming pipeline.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Prompt shown when asking for a password interactively.
pub const PASSWORD_PROMPT: &str = "Password: ";

/// Character echoed for each typed password glyph.
pub const MASK_CHAR: char = '*';

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "STAGECRYPT_LOG";
