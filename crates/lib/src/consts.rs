//! Application-wide constants.

/// Application name, used in log output and user-facing messages.
pub const APP_NAME: &str = "venvr";

/// Marker variable holding the environment directory while the R layer is active.
pub const MARKER_VAR: &str = "VENVR_ENV";

/// Variable the Python venv sets to its environment directory.
pub const VIRTUAL_ENV_VAR: &str = "VIRTUAL_ENV";

/// Configuration file written into every environment directory.
pub const CFG_FILENAME: &str = "pyvenv.cfg";

/// Fallback token R expands to its built-in site library.
pub const SITE_LIBRARY_FALLBACK: &str = "%S";

/// Fallback token R expands to its built-in user library.
pub const USER_LIBRARY_FALLBACK: &str = "%U";
