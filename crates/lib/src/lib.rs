//! venvr-lib: the R layer of an integrated Python/R virtual environment
//!
//! This crate provides:
//! - `env`: the governed variables, their backup slots and the stores they live in
//! - `layer`: install-time configuration and the controller that activates
//!   and deactivates the layer
//! - `shell`: rendering of recorded environment changes as shell code
//! - `platform`: OS conventions for paths and separators

pub mod consts;
pub mod env;
pub mod layer;
pub mod platform;
pub mod shell;
