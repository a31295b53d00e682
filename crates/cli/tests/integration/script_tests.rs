//! End-to-end tests that evaluate the generated scripts in `/bin/sh`.
#![cfg(unix)]

use super::common::{ISOLATED_CFG, SHARED_CFG, TestEnv};

#[test]
fn activate_deactivate_round_trip() {
  let env = TestEnv::with_cfg(SHARED_CFG);

  let out = env.run_sh(
    r#"
    export R_LIBS_SITE=/a:/b
    export R_ENVIRON_USER=
    eval "$("$VENVR" activate --shell sh "$ENV_DIR")"
    printf '%s\n' "$R_LIBS_SITE"
    eval "$("$VENVR" deactivate nondestructive --shell sh)"
    printf '%s|%s|%s|%s\n' "$R_LIBS_SITE" "${R_ENVIRON_USER-unset}" "${R_HOME-unset}" "${VENVR_ENV-unset}"
    "#,
  );

  let lines: Vec<_> = out.lines().collect();
  assert_eq!(lines[0], format!("{}:/a:/b", env.library_dir().display()));
  assert_eq!(lines[1], "/a:/b||unset|unset");
}

#[test]
fn reactivation_matches_single_activation() {
  let env = TestEnv::with_cfg(SHARED_CFG);

  let out = env.run_sh(
    r#"
    export R_LIBS_USER=/home/me/R
    eval "$("$VENVR" activate --shell sh "$ENV_DIR")"
    once="$R_LIBS_USER|$_OLD_R_LIBS_USER"
    eval "$("$VENVR" activate --shell sh "$ENV_DIR")"
    twice="$R_LIBS_USER|$_OLD_R_LIBS_USER"
    [ "$once" = "$twice" ] && echo same
    eval "$("$VENVR" deactivate --shell sh)"
    printf '%s\n' "$R_LIBS_USER"
    "#,
  );

  assert_eq!(out, "same\n/home/me/R\n");
}

#[test]
fn isolated_mode_hides_previous_library_path() {
  let env = TestEnv::with_cfg(ISOLATED_CFG);

  let out = env.run_sh(
    r#"
    export R_LIBS_SITE=/a:/b
    eval "$("$VENVR" activate --shell sh "$ENV_DIR")"
    printf '%s|%s\n' "$R_LIBS_SITE" "$_OLD_R_LIBS_SITE"
    "#,
  );

  assert_eq!(out, format!("{}|/a:/b\n", env.library_dir().display()));
}

#[test]
fn deactivate_twice_is_harmless() {
  let env = TestEnv::with_cfg(ISOLATED_CFG);

  let out = env.run_sh(
    r#"
    export R_HOME=/opt/R
    eval "$("$VENVR" activate --shell sh "$ENV_DIR")"
    eval "$("$VENVR" deactivate --shell sh)"
    eval "$("$VENVR" deactivate nondestructive --shell sh)"
    printf '%s|%s\n' "$R_HOME" "${_OLD_R_HOME-none}"
    "#,
  );

  assert_eq!(out, "/opt/R|none\n");
}
