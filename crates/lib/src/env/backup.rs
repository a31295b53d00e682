//! Backup slots holding pre-activation values.
//!
//! A slot lives in the environment under [`Var::backup_name`]. Its presence
//! means the variable held a value (possibly empty) before activation.

use std::collections::BTreeMap;

use super::store::EnvStore;
use super::vars::Var;

/// Read the slot for `var`.
pub fn read(env: &dyn EnvStore, var: Var) -> Option<String> {
  env.get(var.backup_name())
}

/// Save `value` as the pre-activation value of `var`.
pub fn write(env: &mut dyn EnvStore, var: Var, value: &str) {
  env.set(var.backup_name(), value);
}

/// Remove the slot for `var`.
pub fn clear(env: &mut dyn EnvStore, var: Var) {
  env.unset(var.backup_name());
}

/// The slots present in an environment, keyed by variable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Backups {
  slots: BTreeMap<Var, String>,
}

impl Backups {
  /// Read every governed variable's slot.
  pub fn capture(env: &dyn EnvStore) -> Self {
    let slots = Var::ALL
      .into_iter()
      .filter_map(|var| read(env, var).map(|value| (var, value)))
      .collect();
    Self { slots }
  }

  pub fn get(&self, var: Var) -> Option<&str> {
    self.slots.get(&var).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Var, &str)> {
    self.slots.iter().map(|(var, value)| (*var, value.as_str()))
  }
}
