//! Status command implementation.
//!
//! Displays whether the R layer is active and, per governed variable, its
//! current value and saved pre-activation value.

use anyhow::Result;
use venvr_lib::env::ProcessEnv;
use venvr_lib::layer::LayerStatus;

use crate::output::{format_value, print_info, print_json, print_stat, print_success, print_warning, symbols};

pub fn cmd_status(json: bool) -> Result<()> {
  let status = LayerStatus::capture(&ProcessEnv);

  if json {
    return print_json(&status);
  }

  match &status.env_dir {
    Some(dir) => print_success(&format!("R layer active: {}", dir)),
    None => print_info("R layer not active"),
  }

  let stray = status.backed_up().count();
  if !status.active && stray > 0 {
    print_warning(&format!(
      "{} saved value(s) without an active layer; 'venvr deactivate' restores them",
      stray
    ));
  }

  println!();
  for var in &status.vars {
    let mut line = format_value(var.value.as_deref());
    if let Some(saved) = &var.backup {
      line = format!("{} {} saved {:?}", line, symbols::ARROW, saved);
    }
    print_stat(var.var.name(), &line);
  }

  Ok(())
}
