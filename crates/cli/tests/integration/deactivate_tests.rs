//! Deactivate command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const SIBLING_CALL: &str = "if command -v deactivate >/dev/null 2>&1; then deactivate || true; fi";

#[test]
fn deactivate_restores_and_unsets() {
  let env = TestEnv::with_cfg("");
  let lib = env.library_dir();

  env
    .venvr_cmd()
    .args(["deactivate", "nondestructive", "--shell", "sh"])
    .env("VENVR_ENV", env.env_dir())
    .env("R_HOME", "/usr/lib/R")
    .env("_OLD_R_HOME", "/opt/R")
    .env("R_LIBS_SITE", &lib)
    .assert()
    .success()
    .stdout(predicate::str::contains("export R_HOME='/opt/R'\n"))
    .stdout(predicate::str::contains(
      "unset R_LIBS_SITE\nunset VENVR_ENV\nunset _OLD_R_HOME\nhash -r 2>/dev/null\n",
    ));
}

#[test]
fn deactivate_calls_sibling_first() {
  let env = TestEnv::with_cfg("");

  let output = env
    .venvr_cmd()
    .args(["deactivate", "--shell", "bash"])
    .env("VIRTUAL_ENV", env.env_dir())
    .env("VENVR_ENV", env.env_dir())
    .output()
    .unwrap();
  assert!(output.status.success());

  let stdout = String::from_utf8(output.stdout).unwrap();
  let sibling = stdout.find(SIBLING_CALL).expect("sibling call missing");
  let marker = stdout.find("unset VENVR_ENV").expect("marker removal missing");
  assert!(sibling < marker);
}

#[test]
fn nondestructive_mode_is_passed_to_sibling() {
  let env = TestEnv::with_cfg("");

  env
    .venvr_cmd()
    .args(["deactivate", "nondestructive", "--shell", "sh", "--sibling-fn", "deactivate_py"])
    .env("VIRTUAL_ENV", env.env_dir())
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "then deactivate_py 'nondestructive' || true; fi",
    ));
}

#[test]
fn deactivate_without_venv_skips_sibling() {
  let env = TestEnv::with_cfg("");

  env
    .venvr_cmd()
    .args(["deactivate", "--shell", "sh"])
    .env("VENVR_ENV", env.env_dir())
    .assert()
    .success()
    .stdout(predicate::str::contains("command -v").not());
}

#[test]
fn deactivate_leaves_unrelated_values_when_inactive() {
  let env = TestEnv::with_cfg("");

  env
    .venvr_cmd()
    .args(["deactivate", "--shell", "sh"])
    .env("R_HOME", "/opt/R")
    .assert()
    .success()
    .stdout(predicate::str::contains("R_HOME").not());
}

#[test]
fn deactivate_rejects_sibling_fn_that_is_not_an_identifier() {
  let env = TestEnv::with_cfg("");

  env
    .venvr_cmd()
    .args(["deactivate", "--shell", "sh", "--sibling-fn", "deactivate; rm -rf ~"])
    .env("VIRTUAL_ENV", env.env_dir())
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("not a valid shell function name"));
}

#[cfg(unix)]
#[test]
fn deactivate_refuses_non_utf8_governed_value() {
  use std::ffi::OsStr;
  use std::os::unix::ffi::OsStrExt;

  let env = TestEnv::with_cfg("");

  env
    .venvr_cmd()
    .args(["deactivate", "--shell", "sh"])
    .env("VENVR_ENV", env.env_dir())
    .env("_OLD_R_HOME", OsStr::from_bytes(b"/opt/R\xff"))
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("_OLD_R_HOME is not valid unicode"));
}
