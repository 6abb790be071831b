//! Pre-flight checks before expensive operations.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail midway.

use crate::config::ModelSettings;
use crate::error::{Result, SkrivError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Content generation requires an API key.
    Generate,
    /// Transcript fetching has no paid dependencies.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, model: &ModelSettings) -> Result<()> {
    match operation {
        Operation::Generate => {
            check_api_key(&model.api_key_env)?;
        }
        Operation::Transcript => {
            // No requirements for transcript fetching
        }
    }
    Ok(())
}

/// Check that the configured API key variable is set and non-empty.
fn check_api_key(var: &str) -> Result<()> {
    match std::env::var(var) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(SkrivError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            var, var
        ))),
        Err(_) => Err(SkrivError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            var, var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_transcript_no_requirements() {
        // Transcript fetching should always pass pre-flight
        let model = ModelSettings::default();
        assert!(check(Operation::Transcript, &model).is_ok());
    }
}
