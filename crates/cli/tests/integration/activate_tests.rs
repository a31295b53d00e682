//! Activate command integration tests.

use predicates::prelude::*;

use super::common::{ISOLATED_CFG, SHARED_CFG, TestEnv};

#[test]
fn activate_prints_exports_for_every_variable() {
  let env = TestEnv::with_cfg(ISOLATED_CFG);
  let lib = env.library_dir().display().to_string();
  let dir = env.env_dir().display().to_string();

  env
    .venvr_cmd()
    .args(["activate", "--shell", "sh"])
    .arg(env.env_dir())
    .assert()
    .success()
    .stdout(predicate::str::starts_with("# venvr: activate R layer of"))
    .stdout(predicate::str::contains("export R_HOME='/usr/lib/R'"))
    .stdout(predicate::str::contains("export R_ENVIRON='/dev/null'"))
    .stdout(predicate::str::contains(format!("export R_LIBS_SITE='{}'\n", lib)))
    .stdout(predicate::str::contains(format!("export R_LIBS_USER='{}'\n", lib)))
    .stdout(predicate::str::contains(format!("export RETICULATE_PYTHON='{}/bin/python'", dir)))
    .stdout(predicate::str::contains(format!("export VENVR_ENV='{}'", dir)))
    .stdout(predicate::str::contains("_OLD_").not());
}

#[test]
fn activate_defaults_to_virtual_env() {
  let env = TestEnv::with_cfg(ISOLATED_CFG);

  env
    .venvr_cmd()
    .args(["activate", "--shell", "bash"])
    .env("VIRTUAL_ENV", env.env_dir())
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("export VENVR_ENV='{}'", env.env_dir().display())));
}

#[test]
fn activate_backs_up_and_prepends_in_shared_mode() {
  let env = TestEnv::with_cfg(SHARED_CFG);
  let lib = env.library_dir().display().to_string();

  env
    .venvr_cmd()
    .args(["activate", "--shell", "sh"])
    .arg(env.env_dir())
    .env("R_LIBS_SITE", "/a:/b")
    .assert()
    .success()
    .stdout(predicate::str::contains("export _OLD_R_LIBS_SITE='/a:/b'"))
    .stdout(predicate::str::contains(format!("export R_LIBS_SITE='{}:/a:/b'", lib)))
    .stdout(predicate::str::contains(format!("export R_LIBS_USER='{}:%U'", lib)))
    .stdout(predicate::str::contains("export R_ENVIRON='").and(predicate::str::contains("Renviron.site'")));
}

#[test]
fn activate_renders_fish() {
  let env = TestEnv::with_cfg(ISOLATED_CFG);

  env
    .venvr_cmd()
    .args(["activate", "--shell", "fish"])
    .arg(env.env_dir())
    .assert()
    .success()
    .stdout(predicate::str::contains("set -gx R_HOME '/usr/lib/R'"))
    .stdout(predicate::str::contains("hash -r").not());
}

#[test]
fn activate_over_active_layer_keeps_original_backup() {
  let env = TestEnv::with_cfg(ISOLATED_CFG);

  // The layer is already active and R_HOME was /opt/R beforehand.
  env
    .venvr_cmd()
    .args(["activate", "--shell", "sh"])
    .arg(env.env_dir())
    .env("VENVR_ENV", env.env_dir())
    .env("R_HOME", "/usr/lib/R")
    .env("_OLD_R_HOME", "/opt/R")
    .assert()
    .success()
    .stdout(predicate::str::contains("export _OLD_R_HOME='/opt/R'"))
    .stdout(predicate::str::contains("export _OLD_R_HOME='/usr/lib/R'").not());
}

#[cfg(unix)]
#[test]
fn activate_refuses_non_utf8_governed_value() {
  use std::ffi::OsStr;
  use std::os::unix::ffi::OsStrExt;

  let env = TestEnv::with_cfg(ISOLATED_CFG);

  env
    .venvr_cmd()
    .args(["activate", "--shell", "sh"])
    .arg(env.env_dir())
    .env("R_LIBS_USER", OsStr::from_bytes(b"/home/\xffme/R"))
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("R_LIBS_USER is not valid unicode"));
}

#[cfg(unix)]
#[test]
fn activate_ignores_unrelated_non_utf8_value() {
  use std::ffi::OsStr;
  use std::os::unix::ffi::OsStrExt;

  let env = TestEnv::with_cfg(ISOLATED_CFG);

  env
    .venvr_cmd()
    .args(["activate", "--shell", "sh"])
    .arg(env.env_dir())
    .env("VENVR_UNRELATED", OsStr::from_bytes(b"\xff"))
    .assert()
    .success()
    .stdout(predicate::str::contains("export R_HOME='/usr/lib/R'"));
}
