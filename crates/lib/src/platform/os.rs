use std::fmt;

/// Operating system variants with distinct environment conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Separator between entries of a path-list variable such as `R_LIBS_SITE`
  pub fn path_list_separator(&self) -> char {
    match self {
      Self::Windows => ';',
      Self::Linux | Self::MacOs => ':',
    }
  }

  /// Path that reads as an empty file
  pub fn null_device(&self) -> &'static str {
    match self {
      Self::Windows => "NUL",
      Self::Linux | Self::MacOs => "/dev/null",
    }
  }

  /// Directory holding executables inside a virtual environment
  pub fn bin_dir_name(&self) -> &'static str {
    match self {
      Self::Windows => "Scripts",
      Self::Linux | Self::MacOs => "bin",
    }
  }

  /// Directory holding libraries inside a virtual environment
  pub fn lib_dir_name(&self) -> &'static str {
    match self {
      Self::Windows => "Lib",
      Self::Linux | Self::MacOs => "lib",
    }
  }

  /// Default Python executable name inside a virtual environment
  pub fn python_exe_name(&self) -> &'static str {
    match self {
      Self::Windows => "python.exe",
      Self::Linux | Self::MacOs => "python",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Returns the current operating system
///
/// Unix flavours without their own variant share the Linux conventions.
pub fn os() -> Os {
  Os::current().unwrap_or(Os::Linux)
}
