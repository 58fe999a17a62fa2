//! Password-based key derivation.
//!
//! Both the AES key and the CBC IV are PBKDF2-HMAC-SHA512 outputs of the raw
//! password, differing only in salt and length. The IV is deliberately
//! derived from the password and not from the key: artifacts written under
//! this scheme depend on it.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{BLOCK_LEN, IV_SALT, KEY_LEN, KEY_SALT, PBKDF2_ROUNDS};

/// Key material for one encrypt or decrypt run. Wiped on drop.
pub struct CipherKeys {
    key: Zeroizing<[u8; KEY_LEN]>,
    iv: Zeroizing<[u8; BLOCK_LEN]>,
}

impl CipherKeys {
    /// Derive the cipher key and IV from `password`.
    pub fn derive(password: &str) -> Self {
        debug!(rounds = PBKDF2_ROUNDS, "deriving cipher key and iv");

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2_hmac::<Sha512>(password.as_bytes(), KEY_SALT, PBKDF2_ROUNDS, &mut key[..]);

        let mut iv = Zeroizing::new([0u8; BLOCK_LEN]);
        pbkdf2_hmac::<Sha512>(password.as_bytes(), IV_SALT, PBKDF2_ROUNDS, &mut iv[..]);

        Self { key, iv }
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    pub fn iv(&self) -> &[u8; BLOCK_LEN] {
        &self.iv
    }
}

impl std::fmt::Debug for CipherKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherKeys")
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .finish()
    }
}
