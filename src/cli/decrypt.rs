//! Decrypt command.

use tracing::info;

use crate::cli::output;
use crate::core::secrets::{self, Request};
use crate::error::Result;

/// Decrypt the stage's artifact back to plaintext.
pub fn execute(request: Request) -> Result<()> {
    let done = secrets::decrypt(request)?;
    info!(bytes = done.bytes, "decrypted");
    output::success(&done.to_string());
    Ok(())
}
