//! Platform conventions that shape environment values.
//!
//! Path-list separators, the null device and the directory layout of a
//! virtual environment differ between Windows and Unix.

pub mod os;

pub use os::{Os, os};
