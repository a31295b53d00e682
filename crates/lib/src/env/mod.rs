//! Environment variables governed by the R layer and the stores they live in.

pub mod backup;
pub mod store;
pub mod vars;

pub use backup::Backups;
pub use store::{EnvChange, EnvError, EnvStore, MemoryEnv, ProcessEnv, RecordingEnv};
pub use vars::{Var, VarKind};
