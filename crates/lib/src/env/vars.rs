//! The fixed set of variables governed by the R layer.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::consts::{SITE_LIBRARY_FALLBACK, USER_LIBRARY_FALLBACK};

/// How activation combines a new value with the existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarKind {
  /// Single value, fully overwritten
  Scalar,
  /// Ordered, delimiter-joined directories; activation prepends
  PathList,
}

/// A governed environment variable.
///
/// Each variant carries its live name and the name of its backup slot as
/// static strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Var {
  RHome,
  REnviron,
  REnvironUser,
  RProfileUser,
  RLibsSite,
  RLibsUser,
  ReticulatePython,
}

impl Var {
  /// Every governed variable, in the order activation touches them.
  pub const ALL: [Var; 7] = [
    Var::RHome,
    Var::REnviron,
    Var::REnvironUser,
    Var::RProfileUser,
    Var::RLibsSite,
    Var::RLibsUser,
    Var::ReticulatePython,
  ];

  /// Name of the live environment variable
  pub fn name(&self) -> &'static str {
    match self {
      Var::RHome => "R_HOME",
      Var::REnviron => "R_ENVIRON",
      Var::REnvironUser => "R_ENVIRON_USER",
      Var::RProfileUser => "R_PROFILE_USER",
      Var::RLibsSite => "R_LIBS_SITE",
      Var::RLibsUser => "R_LIBS_USER",
      Var::ReticulatePython => "RETICULATE_PYTHON",
    }
  }

  /// Name of the variable holding the pre-activation value
  pub fn backup_name(&self) -> &'static str {
    match self {
      Var::RHome => "_OLD_R_HOME",
      Var::REnviron => "_OLD_R_ENVIRON",
      Var::REnvironUser => "_OLD_R_ENVIRON_USER",
      Var::RProfileUser => "_OLD_R_PROFILE_USER",
      Var::RLibsSite => "_OLD_R_LIBS_SITE",
      Var::RLibsUser => "_OLD_R_LIBS_USER",
      Var::ReticulatePython => "_OLD_RETICULATE_PYTHON",
    }
  }

  pub fn kind(&self) -> VarKind {
    match self {
      Var::RLibsSite | Var::RLibsUser => VarKind::PathList,
      _ => VarKind::Scalar,
    }
  }

  /// Token appended in shared mode when the variable had no prior value
  pub fn fallback(&self) -> Option<&'static str> {
    match self {
      Var::RLibsSite => Some(SITE_LIBRARY_FALLBACK),
      Var::RLibsUser => Some(USER_LIBRARY_FALLBACK),
      _ => None,
    }
  }
}

impl fmt::Display for Var {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl Serialize for Var {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}
