//! Encrypt command.

use tracing::info;

use crate::cli::output;
use crate::core::secrets::{self, Request};
use crate::error::Result;

/// Encrypt the stage's secrets file.
pub fn execute(request: Request) -> Result<()> {
    let done = secrets::encrypt(request)?;
    info!(bytes = done.bytes, "encrypted");
    output::success(&done.to_string());
    output::hint(&format!(
        "commit {}, keep {} out of git",
        output::path(&done.to),
        output::path(&done.from)
    ));
    Ok(())
}
