//! AES-256-CBC streaming transform.
//!
//! The artifact format is raw CBC ciphertext with PKCS#7 padding: no header,
//! no stored salt or IV. [`CbcTransform`] consumes input in arbitrary chunks
//! and emits whole blocks as soon as they are safe to emit. On decrypt the
//! last full block is always held back, since it carries the padding.

use std::fmt;
use std::io::{ErrorKind, Read, Write};

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use crate::core::constants::{BLOCK_LEN, CHUNK_SIZE};
use crate::core::kdf::CipherKeys;
use crate::error::StreamError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Which way a file is transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    /// Past tense, as used in confirmation messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypted",
            Direction::Decrypt => "decrypted",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => f.write_str("encrypting"),
            Direction::Decrypt => f.write_str("decrypting"),
        }
    }
}

enum Mode {
    Encrypt(Aes256CbcEnc),
    Decrypt(Aes256CbcDec),
}

/// Incremental CBC encryptor or decryptor.
pub struct CbcTransform {
    mode: Mode,
    pending: Zeroizing<Vec<u8>>,
}

impl CbcTransform {
    pub fn new(direction: Direction, keys: &CipherKeys) -> Self {
        let (key, iv) = (keys.key().into(), keys.iv().into());
        let mode = match direction {
            Direction::Encrypt => Mode::Encrypt(Aes256CbcEnc::new(key, iv)),
            Direction::Decrypt => Mode::Decrypt(Aes256CbcDec::new(key, iv)),
        };

        Self {
            mode,
            pending: Zeroizing::new(Vec::with_capacity(CHUNK_SIZE + BLOCK_LEN)),
        }
    }

    /// Feed `input` and append every block that is ready to `out`.
    pub fn update(&mut self, input: &[u8], out: &mut Vec<u8>) {
        self.pending.extend_from_slice(input);

        let held = match (&self.mode, self.pending.len() % BLOCK_LEN) {
            (Mode::Decrypt(_), 0) if !self.pending.is_empty() => BLOCK_LEN,
            (_, rem) => rem,
        };
        let ready = self.pending.len() - held;

        let blocks = &mut self.pending[..ready];
        match &mut self.mode {
            Mode::Encrypt(cipher) => {
                for block in blocks.chunks_exact_mut(BLOCK_LEN) {
                    cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
                }
            }
            Mode::Decrypt(cipher) => {
                for block in blocks.chunks_exact_mut(BLOCK_LEN) {
                    cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
                }
            }
        }

        out.extend_from_slice(&self.pending[..ready]);
        self.pending.drain(..ready);
    }

    /// Pad or unpad the final block and append it to `out`.
    ///
    /// # Errors
    ///
    /// On decrypt, returns `StreamError::Cipher` if the ciphertext is empty,
    /// not block aligned, or its padding is invalid (typically a wrong
    /// password).
    pub fn finish(self, out: &mut Vec<u8>) -> Result<(), StreamError> {
        let CbcTransform { mode, mut pending } = self;

        match mode {
            Mode::Encrypt(cipher) => {
                let len = pending.len();
                pending.resize(BLOCK_LEN, 0);
                let block = cipher
                    .encrypt_padded_mut::<Pkcs7>(&mut pending[..], len)
                    .map_err(|_| StreamError::Cipher("failed to pad final block".to_string()))?;
                out.extend_from_slice(block);
            }
            Mode::Decrypt(cipher) => {
                if pending.is_empty() {
                    return Err(StreamError::Cipher("ciphertext is empty".to_string()));
                }
                if pending.len() != BLOCK_LEN {
                    return Err(StreamError::Cipher(
                        "ciphertext length is not a multiple of the block size".to_string(),
                    ));
                }
                let block = cipher
                    .decrypt_padded_mut::<Pkcs7>(&mut pending[..])
                    .map_err(|_| {
                        StreamError::Cipher("bad padding (wrong password or corrupt file)".to_string())
                    })?;
                out.extend_from_slice(block);
            }
        }

        Ok(())
    }
}

/// Stream `reader` through `transform` into `writer`.
///
/// Read, cipher and write run in sequence per chunk; the first failure
/// returns immediately and nothing more is written. Returns the number of
/// bytes written. The writer is flushed but not synced.
pub fn transform_stream<R, W>(
    mut reader: R,
    mut writer: W,
    mut transform: CbcTransform,
) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
{
    let mut buf = Zeroizing::new(vec![0u8; CHUNK_SIZE]);
    let mut out = Zeroizing::new(Vec::with_capacity(CHUNK_SIZE + BLOCK_LEN));
    let mut written = 0u64;

    loop {
        let n = match reader.read(&mut buf[..]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        };

        out.clear();
        transform.update(&buf[..n], &mut out);
        writer.write_all(&out).map_err(StreamError::Write)?;
        written += out.len() as u64;
    }

    out.clear();
    transform.finish(&mut out)?;
    writer.write_all(&out).map_err(StreamError::Write)?;
    writer.flush().map_err(StreamError::Write)?;
    written += out.len() as u64;

    Ok(written)
}
