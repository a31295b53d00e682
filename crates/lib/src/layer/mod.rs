//! The R activation layer: configuration, controller and status.

pub mod cfg;
pub mod config;
pub mod controller;
pub mod sibling;
pub mod status;

pub use cfg::{ConfigError, PyvenvCfg};
pub use config::{LayerConfig, LibraryMode, resolve_env_dir};
pub use controller::{Controller, ControllerState, DeactivateMode};
pub use sibling::{NoSibling, Sibling, SiblingError};
pub use status::{LayerStatus, VarStatus};
