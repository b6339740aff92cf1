//! Tests for layered configuration loading.

use super::*;
use crate::{AssistantConfig, DEFAULT_GATEWAY_ENDPOINT, DEFAULT_GATEWAY_MODEL, StoreConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Build a project layout with a `.git` marker and a nested cwd.
fn project_layout(root: &Path) -> (PathBuf, PathBuf) {
    let project_root = root.join("project");
    fs::create_dir_all(project_root.join(".git")).expect("git");
    let cwd = project_root.join("subdir");
    fs::create_dir_all(&cwd).expect("cwd");
    (project_root, cwd)
}

#[test]
fn parse_minimal_config() {
    let config = DeskmateConfig::load_from_str("{}").expect("config");
    assert_eq!(config.gateway.endpoint, DEFAULT_GATEWAY_ENDPOINT);
    assert_eq!(config.gateway.model, DEFAULT_GATEWAY_MODEL);
    assert_eq!(config.gateway.timeout_secs, None);
    assert!(config.gateway.system_prompt.is_some());
    assert!(!config.assistant.local_shortcuts);
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = DeskmateConfig::load_from_str(r#"{ unexpected: true }"#).unwrap_err();
    assert!(format!("{err}").contains("unknown key"));
}

#[test]
fn rejects_wrong_type_with_field_path() {
    let err = DeskmateConfig::load_from_str(r#"{ assistant: { local_shortcuts: "yes" } }"#).unwrap_err();
    assert!(format!("{err}").contains("assistant.local_shortcuts"));
}

#[test]
fn rejects_non_http_endpoint() {
    let err =
        DeskmateConfig::load_from_str(r#"{ gateway: { endpoint: "ftp://example" } }"#).unwrap_err();
    assert!(format!("{err}").contains("gateway.endpoint"));
}

#[test]
fn rejects_zero_timeout() {
    let err = DeskmateConfig::load_from_str(r#"{ gateway: { timeout_secs: 0 } }"#).unwrap_err();
    assert!(format!("{err}").contains("timeout_secs"));
}

#[test]
fn null_system_prompt_disables_it() {
    let config =
        DeskmateConfig::load_from_str(r#"{ gateway: { system_prompt: null } }"#).expect("config");
    assert_eq!(config.gateway.system_prompt, None);
}

#[test]
fn layered_config_prefers_cwd_over_project_and_user() {
    let temp = TempDir::new().expect("tmp");
    let (project_root, cwd) = project_layout(temp.path());

    let user_config = temp.path().join("user.json5");
    write_json5(
        &user_config,
        r#"{ gateway: { model: "user-model", timeout_secs: 30 } }"#,
    );
    write_json5(
        &project_root.join(DEFAULT_CONFIG_FILE),
        r#"{ gateway: { model: "project-model" }, assistant: { local_shortcuts: true } }"#,
    );
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        r#"{ gateway: { model: "cwd-model" } }"#,
    );

    let mut options = LayeredConfigOptions::new(&cwd);
    options.user_config_path = Some(user_config);

    let layered = DeskmateConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.config.gateway.model, "cwd-model");
    assert_eq!(layered.config.gateway.timeout_secs, Some(30));
    assert!(layered.config.assistant.local_shortcuts);
    assert_eq!(
        layered
            .layers
            .iter()
            .map(|layer| layer.source)
            .collect::<Vec<_>>(),
        vec![
            ConfigLayerSource::User,
            ConfigLayerSource::Project,
            ConfigLayerSource::Cwd
        ]
    );
}

#[test]
fn runtime_layer_overrides_everything() {
    let temp = TempDir::new().expect("tmp");
    let (_project_root, cwd) = project_layout(temp.path());
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        r#"{ store: { path: "/from/cwd" } }"#,
    );
    let runtime = temp.path().join("runtime.json5");
    write_json5(&runtime, r#"{ store: { path: "/from/runtime" } }"#);

    let mut options = LayeredConfigOptions::new(&cwd).with_runtime_path(&runtime);
    options.user_config_path = None;

    let layered = DeskmateConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.config.store.path.as_deref(), Some("/from/runtime"));
    assert_eq!(
        layered.config.store.resolved_path(),
        PathBuf::from("/from/runtime")
    );
}

#[test]
fn project_layer_is_not_loaded_twice_when_cwd_is_root() {
    let temp = TempDir::new().expect("tmp");
    let (project_root, _cwd) = project_layout(temp.path());
    write_json5(
        &project_root.join(DEFAULT_CONFIG_FILE),
        r#"{ gateway: { model: "root" } }"#,
    );

    let mut options = LayeredConfigOptions::new(&project_root);
    options.user_config_path = None;

    let layered = DeskmateConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.config.gateway.model, "root");
}

#[test]
fn invalid_layer_reports_its_origin() {
    let temp = TempDir::new().expect("tmp");
    let (_project_root, cwd) = project_layout(temp.path());
    write_json5(&cwd.join(DEFAULT_CONFIG_FILE), r#"{ store: { root: "x" } }"#);

    let mut options = LayeredConfigOptions::new(&cwd);
    options.user_config_path = None;

    let err = DeskmateConfig::load_layered_with_options(options).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("));
    assert!(msg.contains("store.root"));
}

#[test]
fn builder_replaces_sections() {
    let config = DeskmateConfig::builder()
        .assistant(AssistantConfig {
            local_shortcuts: true,
        })
        .store(StoreConfig {
            path: Some("/tmp/deskmate".to_string()),
        })
        .build();
    assert!(config.assistant.local_shortcuts);
    assert_eq!(config.store.resolved_path(), PathBuf::from("/tmp/deskmate"));
}

#[test]
fn syntax_error_names_the_layer() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("broken.json5");
    write_json5(&path, "{ gateway: ");
    let err = DeskmateConfig::load_from_path(&path).expect_err("syntax error");
    match err {
        ConfigError::Syntax { layer, .. } => assert!(layer.contains("broken.json5")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_reports_its_path() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("absent.json5");
    let err = DeskmateConfig::load_from_path(&path).expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.json5"));
}
