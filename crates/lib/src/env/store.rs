//! Key-value stores the layer controller reads and writes.
//!
//! The controller never touches the process environment directly. It works
//! against an [`EnvStore`], so the same state machine drives the real
//! process environment, an in-memory map in tests, and a recording store
//! whose changes the CLI renders as a shell script.

use std::collections::BTreeMap;
use std::env::VarError;

use thiserror::Error;

use super::vars::Var;
use crate::consts::MARKER_VAR;

#[derive(Debug, Error)]
pub enum EnvError {
  /// A variable the layer reads or rewrites holds bytes a `String` cannot carry.
  #[error("environment variable {0} is not valid unicode")]
  NotUnicode(String),
}

/// Every name the layer reads or writes: governed variables, their slots and the marker.
fn layer_names() -> impl Iterator<Item = &'static str> {
  Var::ALL
    .into_iter()
    .flat_map(|var| [var.name(), var.backup_name()])
    .chain([MARKER_VAR])
}

/// A mutable environment.
pub trait EnvStore {
  /// Current value of `name`, or `None` when unset.
  fn get(&self, name: &str) -> Option<String>;

  fn set(&mut self, name: &str, value: &str);

  fn unset(&mut self, name: &str);

  /// Forget cached command-path lookups. Stores without such a cache ignore this.
  fn invalidate_command_cache(&mut self) {}
}

/// The environment of the running process.
///
/// Mutations go through `std::env::set_var` / `remove_var`, which are only
/// sound while no other thread reads or writes the environment. Reads are
/// lossy; run [`ProcessEnv::check`] before letting a controller write.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
  /// Fail when a variable the layer reads or writes is not valid UTF-8.
  ///
  /// Such a value could not be saved and put back byte for byte, so the
  /// layer refuses to touch the environment at all.
  pub fn check() -> Result<(), EnvError> {
    for name in layer_names() {
      if let Err(VarError::NotUnicode(_)) = std::env::var(name) {
        return Err(EnvError::NotUnicode(name.to_string()));
      }
    }
    Ok(())
  }
}

impl EnvStore for ProcessEnv {
  fn get(&self, name: &str) -> Option<String> {
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
  }

  fn set(&mut self, name: &str, value: &str) {
    // SAFETY: layer operations run on a single control flow; see type docs.
    unsafe { std::env::set_var(name, value) }
  }

  fn unset(&mut self, name: &str) {
    // SAFETY: as in `set`.
    unsafe { std::env::remove_var(name) }
  }
}

/// An in-memory environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
  vars: BTreeMap<String, String>,
  rehash_count: usize,
}

impl MemoryEnv {
  pub fn new() -> Self {
    Self::default()
  }

  /// Copy the current process environment.
  ///
  /// Fails if a layer variable is not valid UTF-8 (see [`ProcessEnv::check`]).
  /// Other variables whose name or value is not valid UTF-8 are skipped.
  pub fn from_process() -> Result<Self, EnvError> {
    ProcessEnv::check()?;
    let vars = std::env::vars_os()
      .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
      .collect();
    Ok(Self { vars, rehash_count: 0 })
  }

  /// All variables, sorted by name.
  pub fn vars(&self) -> &BTreeMap<String, String> {
    &self.vars
  }

  /// How many times the command cache was invalidated.
  pub fn rehash_count(&self) -> usize {
    self.rehash_count
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnv {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
      rehash_count: 0,
    }
  }
}

impl EnvStore for MemoryEnv {
  fn get(&self, name: &str) -> Option<String> {
    self.vars.get(name).cloned()
  }

  fn set(&mut self, name: &str, value: &str) {
    self.vars.insert(name.to_string(), value.to_string());
  }

  fn unset(&mut self, name: &str) {
    self.vars.remove(name);
  }

  fn invalidate_command_cache(&mut self) {
    self.rehash_count += 1;
  }
}

/// A single effective change applied through a [`RecordingEnv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvChange {
  Set { name: String, value: String },
  Unset { name: String },
  Rehash,
}

/// Wraps a store and records every change that actually alters it.
///
/// Writes that leave a variable as it was are not recorded, nor are
/// back-to-back cache invalidations. Replaying [`RecordingEnv::changes`] in
/// order against the original environment reproduces the final state.
#[derive(Debug, Default)]
pub struct RecordingEnv<S> {
  inner: S,
  changes: Vec<EnvChange>,
}

impl<S: EnvStore> RecordingEnv<S> {
  pub fn new(inner: S) -> Self {
    Self {
      inner,
      changes: Vec::new(),
    }
  }

  pub fn changes(&self) -> &[EnvChange] {
    &self.changes
  }

}

impl<S: EnvStore> EnvStore for RecordingEnv<S> {
  fn get(&self, name: &str) -> Option<String> {
    self.inner.get(name)
  }

  fn set(&mut self, name: &str, value: &str) {
    if self.inner.get(name).as_deref() == Some(value) {
      return;
    }
    self.inner.set(name, value);
    self.changes.push(EnvChange::Set {
      name: name.to_string(),
      value: value.to_string(),
    });
  }

  fn unset(&mut self, name: &str) {
    if self.inner.get(name).is_none() {
      return;
    }
    self.inner.unset(name);
    self.changes.push(EnvChange::Unset { name: name.to_string() });
  }

  fn invalidate_command_cache(&mut self) {
    self.inner.invalidate_command_cache();
    if self.changes.last() != Some(&EnvChange::Rehash) {
      self.changes.push(EnvChange::Rehash);
    }
  }
}
