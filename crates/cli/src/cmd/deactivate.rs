//! Deactivate command implementation.

use anyhow::Result;
use tracing::debug;
use venvr_lib::consts::{APP_NAME, VIRTUAL_ENV_VAR};
use venvr_lib::env::{EnvStore, MemoryEnv, RecordingEnv};
use venvr_lib::layer::{Controller, DeactivateMode};
use venvr_lib::shell::Shell;

use crate::sibling::ShellSibling;

pub fn cmd_deactivate(mode: DeactivateMode, shell: Shell, sibling_fn: &str) -> Result<()> {
  let mut env = RecordingEnv::new(MemoryEnv::from_process()?);
  let mut sibling = ShellSibling::new(shell, sibling_fn, env.get(VIRTUAL_ENV_VAR).is_some())?;

  Controller::new().deactivate_with_sibling(&mut env, &mut sibling, mode);
  debug!(changes = env.changes().len(), mode = ?mode, "rendering deactivation script");

  let mut script = shell.comment(&format!("{}: deactivate", APP_NAME));
  script.push('\n');
  script.push_str(sibling.script());
  script.push_str(&shell.render(env.changes()));
  print!("{}", script);

  Ok(())
}
