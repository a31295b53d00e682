//! Activate command implementation.
//!
//! Runs the layer controller against a copy of the caller's environment and
//! prints the resulting changes as shell code.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use venvr_lib::consts::APP_NAME;
use venvr_lib::env::{MemoryEnv, RecordingEnv};
use venvr_lib::layer::{Controller, LayerConfig, resolve_env_dir};
use venvr_lib::shell::Shell;

pub fn cmd_activate(env_dir: Option<&Path>, shell: Shell) -> Result<()> {
  let mut env = RecordingEnv::new(MemoryEnv::from_process()?);

  let env_dir = resolve_env_dir(env_dir, &env)?;
  let config = LayerConfig::from_env_dir(&env_dir)
    .with_context(|| format!("Failed to load environment at {}", env_dir.display()))?;

  Controller::new().activate(&mut env, &config);
  debug!(changes = env.changes().len(), shell = %shell, "rendering activation script");

  let mut script = shell.comment(&format!("{}: activate R layer of {}", APP_NAME, config.env_dir.display()));
  script.push('\n');
  script.push_str(&shell.render(env.changes()));
  print!("{}", script);

  Ok(())
}
