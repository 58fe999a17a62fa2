//! Input validation for stagecrypt operations.

use crate::error::{Result, ValidationError};

/// Validate a stage name.
///
/// The stage ends up inside file names, so it is restricted to:
/// - ASCII letters, digits, `-` and `_`
/// - at least one character
///
/// # Errors
///
/// Returns `ValidationError` if the stage is empty or contains other characters.
pub fn validate_stage(stage: &str) -> Result<()> {
    if stage.is_empty() {
        return Err(ValidationError::EmptyStage.into());
    }

    for (i, ch) in stage.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
            return Err(ValidationError::InvalidStage {
                stage: stage.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only A-Z, a-z, 0-9, '-' and '_' are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}
