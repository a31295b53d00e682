//! The seam to the sibling runtime's own activation layer.
//!
//! The Python venv is activated and deactivated by its own scripts. The R
//! layer only asks it to deactivate and never depends on the outcome.

use thiserror::Error;

use super::controller::DeactivateMode;

#[derive(Debug, Error)]
pub enum SiblingError {
  /// No sibling layer is present to deactivate.
  #[error("sibling layer '{0}' is not available")]
  Unavailable(String),

  /// The sibling's deactivation entry point cannot be named safely.
  #[error("'{0}' is not a valid shell function name")]
  InvalidName(String),
}

/// A sibling activation layer whose deactivation runs before the R layer's.
pub trait Sibling {
  fn name(&self) -> &str;

  fn deactivate(&mut self, mode: DeactivateMode) -> Result<(), SiblingError>;
}

/// Stand-in used when the R layer is active on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSibling;

impl Sibling for NoSibling {
  fn name(&self) -> &str {
    "none"
  }

  fn deactivate(&mut self, _mode: DeactivateMode) -> Result<(), SiblingError> {
    Err(SiblingError::Unavailable(self.name().to_string()))
  }
}
