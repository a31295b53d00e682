mod cmd;
mod output;
mod sibling;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use venvr_lib::layer::DeactivateMode;
use venvr_lib::shell::Shell;

use crate::output::print_error;

/// venvr - R layer for Python virtual environments
///
/// `activate` and `deactivate` print shell code; run them through `eval`:
///
///     eval "$(venvr activate)"
#[derive(Parser)]
#[command(name = "venvr")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging on stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the script that activates the R layer
  Activate {
    /// Environment directory (default: $VIRTUAL_ENV)
    env_dir: Option<PathBuf>,

    /// Shell to generate code for (auto-detected if not specified)
    #[arg(short, long)]
    shell: Option<String>,
  },

  /// Print the script that deactivates the Python and R layers
  Deactivate {
    /// Keep the sibling's deactivate function defined
    #[arg(value_enum)]
    mode: Option<ModeArg>,

    /// Shell to generate code for (auto-detected if not specified)
    #[arg(short, long)]
    shell: Option<String>,

    /// Shell function that deactivates the Python environment
    #[arg(long, default_value = "deactivate")]
    sibling_fn: String,
  },

  /// Show the state of the R layer in the current environment
  Status {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
  Nondestructive,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  // stdout carries the generated script
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli.command) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Activate { env_dir, shell } => cmd::cmd_activate(env_dir.as_deref(), resolve_shell(shell)?),
    Commands::Deactivate {
      mode,
      shell,
      sibling_fn,
    } => {
      let mode = match mode {
        Some(ModeArg::Nondestructive) => DeactivateMode::Nondestructive,
        None => DeactivateMode::Destructive,
      };
      cmd::cmd_deactivate(mode, resolve_shell(shell)?, &sibling_fn)
    }
    Commands::Status { json } => cmd::cmd_status(json),
  }
}

fn resolve_shell(name: Option<String>) -> Result<Shell> {
  match name {
    Some(name) => Ok(name.parse()?),
    None => Ok(Shell::detect()),
  }
}
