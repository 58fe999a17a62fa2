//! Check command.
//!
//! Pre-flight verification run before packaging a deployment: the plaintext
//! secrets file for the stage must exist.

use crate::cli::output;
use crate::core::secrets::{self, Request};
use crate::error::Result;

/// Verify the stage's plaintext secrets file exists.
pub fn execute(request: Request) -> Result<()> {
    let found = secrets::check(&request)?;
    output::success(&format!("found {}", output::path(found.name())));
    Ok(())
}
