//! Configuration loading and priority-order tests
//!
//! Uses serial_test so tests touching PENGUIN_PROJECTS_ROOT / PENGUIN_PORT
//! do not race each other.

use penguin_common::config::{
    load_toml_config, resolve_port, resolve_projects_root, CompiledDefaults, TomlConfig,
    PORT_ENV_VAR, ROOT_ENV_VAR,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
fn test_compiled_defaults() {
    let defaults = CompiledDefaults::for_current_platform();
    assert!(defaults.projects_root.ends_with("penguin/projects"));
    assert_eq!(defaults.port, 8080);
    assert_eq!(defaults.bind, "127.0.0.1");
    assert_eq!(defaults.log_level, "info");
}

#[test]
#[serial]
fn test_root_with_no_overrides_uses_default() {
    env::remove_var(ROOT_ENV_VAR);

    let root = resolve_projects_root(None, &TomlConfig::default());
    assert_eq!(root, CompiledDefaults::for_current_platform().projects_root);
}

#[test]
#[serial]
fn test_root_priority_order() {
    let toml_config = TomlConfig {
        projects_root: Some("/tmp/penguin-from-toml".to_string()),
        ..TomlConfig::default()
    };

    env::remove_var(ROOT_ENV_VAR);
    assert_eq!(
        resolve_projects_root(None, &toml_config),
        PathBuf::from("/tmp/penguin-from-toml")
    );

    env::set_var(ROOT_ENV_VAR, "/tmp/penguin-from-env");
    assert_eq!(
        resolve_projects_root(None, &toml_config),
        PathBuf::from("/tmp/penguin-from-env")
    );

    assert_eq!(
        resolve_projects_root(Some("/tmp/penguin-from-cli"), &toml_config),
        PathBuf::from("/tmp/penguin-from-cli")
    );

    env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn test_port_priority_order() {
    let toml_config = TomlConfig {
        port: 9000,
        ..TomlConfig::default()
    };

    env::remove_var(PORT_ENV_VAR);
    assert_eq!(resolve_port(None, &toml_config), 9000);

    env::set_var(PORT_ENV_VAR, "9100");
    assert_eq!(resolve_port(None, &toml_config), 9100);
    assert_eq!(resolve_port(Some(9200), &toml_config), 9200);

    env::set_var(PORT_ENV_VAR, "not-a-port");
    assert_eq!(resolve_port(None, &toml_config), 9000);

    env::remove_var(PORT_ENV_VAR);
}

#[test]
fn test_missing_config_file_does_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_toml_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("penguin-projects.toml");
    std::fs::write(
        &path,
        r#"
projects_root = "~/work/projects"
port = 8181
bind = "0.0.0.0"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.projects_root.as_deref(), Some("~/work/projects"));
    assert_eq!(config.port, 8181);
    assert_eq!(config.bind, "0.0.0.0");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "port = \"eighty\"\n[[[").unwrap();

    let err = load_toml_config(&path).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}
