//! Reader for `pyvenv.cfg`, the `key = value` file at the root of every
//! virtual environment.
//!
//! # Example
//!
//! ```text
//! home = /usr/bin
//! include-system-site-packages = false
//! version = 3.12.3
//! executable = /usr/bin/python3.12
//! R-home = /usr/lib/R
//! R-include-system-packages = false
//! R-version = 4.3.1
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading layer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The configuration file could not be read.
  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A line is neither blank, a comment, nor `key = value`.
  #[error("line {line}: expected `key = value`, found {text:?}")]
  Syntax { line: usize, text: String },

  /// A required key is absent.
  #[error("missing required key '{0}'")]
  Missing(&'static str),

  /// A key holds a value that cannot be interpreted.
  #[error("invalid value for '{key}': {value:?}")]
  Invalid { key: &'static str, value: String },

  /// No environment directory was given and none is active.
  #[error("no environment directory given and VIRTUAL_ENV is not set")]
  NoEnvironment,
}

/// Parsed `pyvenv.cfg` entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PyvenvCfg {
  entries: BTreeMap<String, String>,
}

impl PyvenvCfg {
  /// Parse file contents. Later duplicates of a key win.
  pub fn parse(content: &str) -> Result<Self, ConfigError> {
    let mut entries = BTreeMap::new();
    for (idx, raw) in content.lines().enumerate() {
      let line = raw.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }
      let Some((key, value)) = line.split_once('=') else {
        return Err(ConfigError::Syntax {
          line: idx + 1,
          text: raw.to_string(),
        });
      };
      entries.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(Self { entries })
  }

  /// Read and parse the file at `path`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let cfg = Self::parse(&content)?;
    debug!(path = %path.display(), entries = cfg.entries.len(), "loaded pyvenv.cfg");
    Ok(cfg)
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  /// Value of a key that must be present.
  pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
    self.get(key).ok_or(ConfigError::Missing(key))
  }

  /// Boolean key in the `true`/`false` spelling venv writes; absent means false.
  pub fn flag(&self, key: &'static str) -> Result<bool, ConfigError> {
    match self.get(key) {
      None => Ok(false),
      Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
      Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
      Some(v) => Err(ConfigError::Invalid {
        key,
        value: v.to_string(),
      }),
    }
  }
}
