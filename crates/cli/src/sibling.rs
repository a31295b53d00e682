//! Deactivation of the Python venv through its shell function.

use venvr_lib::layer::{DeactivateMode, Sibling, SiblingError};
use venvr_lib::shell::Shell;

/// Emits a guarded call to the venv's `deactivate` function.
///
/// The call runs in the user's shell after `eval`, ahead of the R layer's
/// own changes.
pub struct ShellSibling {
  shell: Shell,
  function: String,
  present: bool,
  script: String,
}

impl ShellSibling {
  /// `present` is whether a Python venv is active in the calling shell.
  ///
  /// `function` is spliced into the script verbatim, so it must be a plain
  /// identifier.
  pub fn new(shell: Shell, function: impl Into<String>, present: bool) -> Result<Self, SiblingError> {
    let function = function.into();
    if !is_identifier(&function) {
      return Err(SiblingError::InvalidName(function));
    }
    Ok(Self {
      shell,
      function,
      present,
      script: String::new(),
    })
  }

  pub fn script(&self) -> &str {
    &self.script
  }
}

impl Sibling for ShellSibling {
  fn name(&self) -> &str {
    &self.function
  }

  fn deactivate(&mut self, mode: DeactivateMode) -> Result<(), SiblingError> {
    if !self.present {
      return Err(SiblingError::Unavailable(self.function.clone()));
    }
    let args: &[&str] = match mode {
      DeactivateMode::Destructive => &[],
      DeactivateMode::Nondestructive => &["nondestructive"],
    };
    self.script.push_str(&self.shell.call_if_defined(&self.function, args));
    self.script.push('\n');
    Ok(())
  }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) if first.is_ascii_alphabetic() || first == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false,
  }
}
