//! The environment layer controller.
//!
//! Activation overlays the R layer onto an environment and deactivation
//! restores what was there before. State lives in the environment itself:
//!
//! - `_OLD_<NAME>` slots hold the pre-activation value of every governed
//!   variable that had one (empty strings included).
//! - `VENVR_ENV` marks the layer as active. A governed variable without a
//!   slot under an active layer was unset before activation.
//!
//! The marker brackets every overwrite. Activation writes all slots, then
//! the marker, then the layer's values. Deactivation restores every
//! variable while the marker is still set, then drops the marker, then
//! clears the slots. Whatever write an interrupted run stops at, the next
//! deactivate still reaches the pre-activation environment.

use std::path::Path;

use tracing::{debug, info};

use super::config::{LayerConfig, LibraryMode};
use super::sibling::Sibling;
use crate::consts::MARKER_VAR;
use crate::env::backup::{self, Backups};
use crate::env::{EnvStore, Var};

/// Whether deactivation stays available afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeactivateMode {
  /// One-shot user action: the controller disables itself.
  #[default]
  Destructive,
  /// Internal bookkeeping: the controller stays usable.
  Nondestructive,
}

/// Availability of [`Controller::deactivate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
  #[default]
  Active,
  /// Disabled by a destructive deactivate; deactivation is a no-op until
  /// the next activation.
  Inactive,
}

#[derive(Debug, Default)]
pub struct Controller {
  state: ControllerState,
}

impl Controller {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> ControllerState {
    self.state
  }

  /// Whether `env` carries an active R layer.
  pub fn is_layer_active(env: &dyn EnvStore) -> bool {
    env.get(MARKER_VAR).is_some()
  }

  /// Overlay the layer described by `config` onto `env`.
  ///
  /// Any layer already in effect is deactivated first, so activating twice
  /// is the same as activating once.
  pub fn activate(&mut self, env: &mut dyn EnvStore, config: &LayerConfig) {
    self.state = ControllerState::Active;
    self.deactivate(env, DeactivateMode::Nondestructive);

    // The baseline deactivate consumed every slot, so none is clobbered here.
    let previous: Vec<(Var, Option<String>)> = Var::ALL.into_iter().map(|var| (var, env.get(var.name()))).collect();
    let mut saved = 0;
    for (var, value) in &previous {
      if let Some(value) = value {
        backup::write(env, *var, value);
        saved += 1;
      }
    }

    env.set(MARKER_VAR, &path_str(&config.env_dir));

    for (var, value) in &previous {
      let overlaid = overlay(config, *var, value.as_deref());
      debug!(var = %var, value = %overlaid, backed_up = value.is_some(), "overlaying variable");
      env.set(var.name(), &overlaid);
    }

    env.invalidate_command_cache();

    info!(
      env_dir = %config.env_dir.display(),
      mode = ?config.mode,
      saved,
      "activated R layer"
    );
  }

  /// Restore the environment that was in place before activation.
  pub fn deactivate(&mut self, env: &mut dyn EnvStore, mode: DeactivateMode) {
    if self.state == ControllerState::Inactive {
      debug!("controller is inactive; deactivate skipped");
      return;
    }

    let layer_active = Self::is_layer_active(env);
    let backups = Backups::capture(env);

    for var in Var::ALL {
      match backups.get(var) {
        Some(saved) => {
          debug!(var = %var, value = %saved, "restoring variable");
          env.set(var.name(), saved);
        }
        None if layer_active => {
          debug!(var = %var, "unsetting variable with no saved value");
          env.unset(var.name());
        }
        None => {}
      }
    }

    env.unset(MARKER_VAR);
    for (var, _) in backups.iter() {
      backup::clear(env, var);
    }

    env.invalidate_command_cache();

    if mode == DeactivateMode::Destructive {
      self.state = ControllerState::Inactive;
    }

    if layer_active || !backups.is_empty() {
      info!(restored = backups.len(), mode = ?mode, "deactivated R layer");
    }
  }

  /// Deactivate the sibling layer, then this one.
  ///
  /// A failing or missing sibling never prevents the R layer from being
  /// restored.
  pub fn deactivate_with_sibling(&mut self, env: &mut dyn EnvStore, sibling: &mut dyn Sibling, mode: DeactivateMode) {
    if let Err(err) = sibling.deactivate(mode) {
      debug!(sibling = sibling.name(), error = %err, "sibling deactivation failed; continuing");
    }
    self.deactivate(env, mode);
  }
}

/// Value `var` takes while the layer is active, given its pre-activation value.
fn overlay(config: &LayerConfig, var: Var, previous: Option<&str>) -> String {
  match var {
    Var::RHome => path_str(&config.r_home),
    Var::REnviron => match config.mode {
      // Keeps a site Renviron from overriding the library paths.
      LibraryMode::Isolated => config.null_device.clone(),
      LibraryMode::Shared => path_str(&config.site_environ()),
    },
    Var::REnvironUser => path_str(&config.user_environ()),
    Var::RProfileUser => path_str(&config.user_profile()),
    Var::RLibsSite | Var::RLibsUser => library_path(config, var, previous),
    Var::ReticulatePython => path_str(&config.python_exe),
  }
}

/// The private library first; in shared mode the previous search path (or
/// R's default token) after it.
fn library_path(config: &LayerConfig, var: Var, previous: Option<&str>) -> String {
  let private = path_str(&config.library_dir);
  if config.mode == LibraryMode::Isolated {
    return private;
  }
  match previous.filter(|p| !p.is_empty()).or(var.fallback()) {
    Some(rest) => format!("{}{}{}", private, config.separator, rest),
    None => private,
  }
}

fn path_str(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
