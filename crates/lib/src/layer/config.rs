//! Install-time configuration consumed by the layer controller.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::cfg::{ConfigError, PyvenvCfg};
use crate::consts::{CFG_FILENAME, VIRTUAL_ENV_VAR};
use crate::env::EnvStore;
use crate::platform::{Os, os};

/// Whether the system R libraries stay visible inside the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryMode {
  /// Only the private library is on the search path.
  #[default]
  Isolated,
  /// The private library comes first, followed by the previous search path.
  Shared,
}

/// Paths and flags fixed when the environment was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerConfig {
  /// Root of the virtual environment.
  pub env_dir: PathBuf,
  /// `R_HOME` of the R installation the environment was created from.
  pub r_home: PathBuf,
  /// Private package library, e.g. `<env>/lib/R4.3`.
  pub library_dir: PathBuf,
  /// Directory holding the private `Renviron.site`, `Renviron` and `Rprofile`.
  pub config_dir: PathBuf,
  /// Python executable of the sibling environment.
  pub python_exe: PathBuf,
  pub mode: LibraryMode,
  /// Separator between path-list entries.
  pub separator: char,
  /// Location that reads as an empty file.
  pub null_device: String,
}

impl LayerConfig {
  /// Build the default layout of `env_dir` for an R installation.
  ///
  /// `r_version` must start with `major.minor`; the private library is
  /// named after those two components.
  pub fn for_env(env_dir: &Path, r_home: &Path, r_version: &str, os: Os) -> Result<Self, ConfigError> {
    let series = r_series(r_version)?;
    Ok(Self {
      env_dir: env_dir.to_path_buf(),
      r_home: r_home.to_path_buf(),
      library_dir: env_dir.join(os.lib_dir_name()).join(series),
      config_dir: env_dir.join("etc"),
      python_exe: env_dir.join(os.bin_dir_name()).join(os.python_exe_name()),
      mode: LibraryMode::Isolated,
      separator: os.path_list_separator(),
      null_device: os.null_device().to_string(),
    })
  }

  /// Interpret parsed `pyvenv.cfg` entries for `env_dir`.
  pub fn from_cfg(env_dir: &Path, cfg: &PyvenvCfg, os: Os) -> Result<Self, ConfigError> {
    let r_home = cfg.require("R-home")?;
    let r_version = cfg.require("R-version")?;
    let mut config = Self::for_env(env_dir, Path::new(r_home), r_version, os)?;

    if cfg.flag("R-include-system-packages")? {
      config.mode = LibraryMode::Shared;
    }
    if let Some(name) = cfg.get("executable").and_then(|exe| Path::new(exe).file_name()) {
      config.python_exe = env_dir.join(os.bin_dir_name()).join(name);
    }
    Ok(config)
  }

  /// Load the configuration of the environment rooted at `env_dir`.
  pub fn from_env_dir(env_dir: &Path) -> Result<Self, ConfigError> {
    let env_dir = dunce::canonicalize(env_dir).unwrap_or_else(|_| env_dir.to_path_buf());
    let cfg = PyvenvCfg::load(&env_dir.join(CFG_FILENAME))?;
    let config = Self::from_cfg(&env_dir, &cfg, os())?;
    info!(
      env_dir = %config.env_dir.display(),
      r_home = %config.r_home.display(),
      mode = ?config.mode,
      "loaded layer configuration"
    );
    Ok(config)
  }

  pub fn with_mode(mut self, mode: LibraryMode) -> Self {
    self.mode = mode;
    self
  }

  pub fn site_environ(&self) -> PathBuf {
    self.config_dir.join("Renviron.site")
  }

  pub fn user_environ(&self) -> PathBuf {
    self.config_dir.join("Renviron")
  }

  pub fn user_profile(&self) -> PathBuf {
    self.config_dir.join("Rprofile")
  }
}

/// Pick the environment directory: the explicit one, else the active venv.
pub fn resolve_env_dir(explicit: Option<&Path>, env: &dyn EnvStore) -> Result<PathBuf, ConfigError> {
  match explicit {
    Some(dir) => Ok(dir.to_path_buf()),
    None => env
      .get(VIRTUAL_ENV_VAR)
      .filter(|dir| !dir.is_empty())
      .map(PathBuf::from)
      .ok_or(ConfigError::NoEnvironment),
  }
}

/// `"4.3.1"` becomes `"R4.3"`.
fn r_series(version: &str) -> Result<String, ConfigError> {
  let invalid = || ConfigError::Invalid {
    key: "R-version",
    value: version.to_string(),
  };
  let mut parts = version.split('.');
  let (Some(major), Some(minor)) = (parts.next(), parts.next()) else {
    return Err(invalid());
  };
  let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
  if !numeric(major) || !numeric(minor) {
    return Err(invalid());
  }
  Ok(format!("R{}.{}", major, minor))
}
