//! Settings loading from an explicit config file and CRMCTL_* variables

use std::env;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use crmctl::application::ApplicationError;
use crmctl::config::Settings;

/// Settings::load reads process-wide CRMCTL_* variables; tests touching them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn given_explicit_config_when_loading_then_overrides_defaults() {
    let _guard = env_lock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crmctl.toml");
    fs::write(
        &path,
        r#"
query_command = "/usr/sbin/cibadmin"
ssh_options = ["-o", "ConnectTimeout=5"]
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.query_command, "/usr/sbin/cibadmin");
    assert_eq!(settings.ssh_options, vec!["-o", "ConnectTimeout=5"]);
    assert_eq!(settings.crm_mon_command, "crm_mon");
}

#[test]
fn given_missing_explicit_config_when_loading_then_config_error() {
    let _guard = env_lock();
    let dir = TempDir::new().unwrap();

    let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let _guard = env_lock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crmctl.toml");
    fs::write(&path, "query_command = [unterminated").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_env_overrides_when_loading_then_env_wins_and_splits_ssh_options() {
    let _guard = env_lock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crmctl.toml");
    fs::write(&path, "query_command = \"/usr/sbin/cibadmin\"\nssh_options = [\"-q\"]\n").unwrap();
    env::set_var("CRMCTL_QUERY_COMMAND", "/opt/cibadmin");
    env::set_var("CRMCTL_SSH_OPTIONS", "-o BatchMode=yes");

    let loaded = Settings::load(Some(&path));

    env::remove_var("CRMCTL_QUERY_COMMAND");
    env::remove_var("CRMCTL_SSH_OPTIONS");
    let settings = loaded.unwrap();
    assert_eq!(settings.query_command, "/opt/cibadmin");
    assert_eq!(settings.ssh_options, vec!["-o", "BatchMode=yes"]);
    assert_eq!(settings.ssh_command, "ssh");
}
