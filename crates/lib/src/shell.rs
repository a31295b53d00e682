//! Shell detection and rendering of environment changes as shell code.
//!
//! A child process cannot change its parent shell's environment, so the CLI
//! records what the controller did and prints it in the caller's dialect
//! for `eval`.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::env::EnvChange;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
  #[error("unknown shell '{0}'; supported: bash, zsh, fish, sh, powershell")]
  Unknown(String),
}

/// Supported shell types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  PowerShell,
  Sh,
}

impl Shell {
  /// Detect the current shell from environment
  ///
  /// Checks `$SHELL` on Unix, falls back to reasonable defaults.
  pub fn detect() -> Self {
    if let Ok(shell) = env::var("SHELL") {
      let shell_name = PathBuf::from(&shell)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

      return shell_name.parse().unwrap_or_else(|_| {
        if shell_name.contains("zsh") {
          Shell::Zsh
        } else if shell_name.contains("bash") {
          Shell::Bash
        } else if shell_name.contains("fish") {
          Shell::Fish
        } else {
          Shell::Sh
        }
      });
    }

    #[cfg(target_os = "windows")]
    return Shell::PowerShell;

    #[cfg(not(target_os = "windows"))]
    Shell::Sh
  }

  /// Get the shell name as a string
  pub fn as_str(&self) -> &'static str {
    match self {
      Shell::Bash => "bash",
      Shell::Zsh => "zsh",
      Shell::Fish => "fish",
      Shell::PowerShell => "powershell",
      Shell::Sh => "sh",
    }
  }

  /// Quote `value` as a single literal word
  pub fn quote(&self, value: &str) -> String {
    match self {
      Shell::Fish => format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")),
      Shell::PowerShell => format!("'{}'", value.replace('\'', "''")),
      Shell::Bash | Shell::Zsh | Shell::Sh => format!("'{}'", value.replace('\'', r"'\''")),
    }
  }

  /// Generate an export statement for setting an environment variable
  ///
  /// PowerShell cannot hold an empty environment variable: assigning `''`
  /// removes it, so an empty value restored there reads back as unset.
  pub fn export_var(&self, name: &str, value: &str) -> String {
    let value = self.quote(value);
    match self {
      Shell::Fish => format!("set -gx {} {}", name, value),
      Shell::PowerShell => format!("$env:{} = {}", name, value),
      Shell::Bash | Shell::Zsh | Shell::Sh => format!("export {}={}", name, value),
    }
  }

  /// Generate a statement removing an environment variable
  pub fn unset_var(&self, name: &str) -> String {
    match self {
      Shell::Fish => format!("set -e {}", name),
      Shell::PowerShell => format!("Remove-Item Env:{} -ErrorAction SilentlyContinue", name),
      Shell::Bash | Shell::Zsh | Shell::Sh => format!("unset {}", name),
    }
  }

  /// Statement forgetting remembered command locations, if the shell caches them
  pub fn rehash(&self) -> Option<&'static str> {
    match self {
      Shell::Bash | Shell::Zsh | Shell::Sh => Some("hash -r 2>/dev/null"),
      Shell::Fish | Shell::PowerShell => None,
    }
  }

  /// Call `function` with `args` when it is defined, ignoring its failure
  pub fn call_if_defined(&self, function: &str, args: &[&str]) -> String {
    let call = std::iter::once(function.to_string())
      .chain(args.iter().map(|arg| self.quote(arg)))
      .collect::<Vec<_>>()
      .join(" ");
    match self {
      Shell::Fish => format!("functions -q {}; and {}", function, call),
      Shell::PowerShell => format!(
        "if (Get-Command {} -ErrorAction SilentlyContinue) {{ {} }}",
        function, call
      ),
      Shell::Bash | Shell::Zsh | Shell::Sh => format!(
        "if command -v {} >/dev/null 2>&1; then {} || true; fi",
        function, call
      ),
    }
  }

  /// Generate a comment for this shell
  pub fn comment(&self, text: &str) -> String {
    format!("# {}", text)
  }

  /// Render a single change, or `None` when the shell has nothing to do for it
  pub fn render_change(&self, change: &EnvChange) -> Option<String> {
    match change {
      EnvChange::Set { name, value } => Some(self.export_var(name, value)),
      EnvChange::Unset { name } => Some(self.unset_var(name)),
      EnvChange::Rehash => self.rehash().map(str::to_string),
    }
  }

  /// Render recorded changes as a script, one statement per line
  pub fn render(&self, changes: &[EnvChange]) -> String {
    changes
      .iter()
      .filter_map(|change| self.render_change(change))
      .map(|line| line + "\n")
      .collect()
  }
}

impl FromStr for Shell {
  type Err = ShellError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "bash" => Ok(Shell::Bash),
      "zsh" => Ok(Shell::Zsh),
      "fish" => Ok(Shell::Fish),
      "sh" | "dash" | "ksh" => Ok(Shell::Sh),
      "powershell" | "pwsh" => Ok(Shell::PowerShell),
      _ => Err(ShellError::Unknown(s.to_string())),
    }
  }
}

impl fmt::Display for Shell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
