//! Read-only view of the layer state in an environment.

use serde::Serialize;

use super::controller::Controller;
use crate::consts::MARKER_VAR;
use crate::env::{EnvStore, Var, VarKind, backup};

/// One governed variable as currently seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarStatus {
  pub var: Var,
  pub kind: VarKind,
  pub value: Option<String>,
  /// Saved pre-activation value.
  pub backup: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerStatus {
  pub active: bool,
  /// Environment directory of the active layer.
  pub env_dir: Option<String>,
  pub vars: Vec<VarStatus>,
}

impl LayerStatus {
  pub fn capture(env: &dyn EnvStore) -> Self {
    let vars = Var::ALL
      .into_iter()
      .map(|var| VarStatus {
        var,
        kind: var.kind(),
        value: env.get(var.name()),
        backup: backup::read(env, var),
      })
      .collect();
    Self {
      active: Controller::is_layer_active(env),
      env_dir: env.get(MARKER_VAR),
      vars,
    }
  }

  /// Variables holding a backup slot.
  pub fn backed_up(&self) -> impl Iterator<Item = &VarStatus> {
    self.vars.iter().filter(|status| status.backup.is_some())
  }
}
