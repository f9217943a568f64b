// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests layering of TOML files and `--set` style overrides.

use cf_default_env::config::{Config, LOCAL_CONFIG_FILE};
use cf_default_env::error::DefaultEnvError;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        LOCAL_CONFIG_FILE,
        r#"
[api]
endpoint = "https://api.sys.example.com/"

[output]
file = "vcap.json"
"#,
    );

    let config = Config::builder().add_toml_file(&path).build().unwrap();
    assert_eq!(
        config.api.endpoint.as_deref(),
        Some("https://api.sys.example.com/")
    );
    assert_eq!(config.output.file, PathBuf::from("vcap.json"));
}

#[test]
fn config_missing_required_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::builder()
        .add_toml_file(dir.path().join("nope.toml"))
        .build();
    assert!(matches!(result, Err(DefaultEnvError::Config(_))));
}

#[test]
fn config_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.toml", "[api\ntimeout_secs = ");
    assert!(matches!(
        Config::builder().add_toml_file(&path).build(),
        Err(DefaultEnvError::Config(_))
    ));
}

#[test]
fn config_wrong_value_type() {
    let result = Config::parse("[api]\ntimeout_secs = \"soon\"\n");
    assert!(matches!(result, Err(DefaultEnvError::Config(_))));
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_builder_layered() {
    let dir = TempDir::new().unwrap();
    let base = write(
        &dir,
        "base.toml",
        "[api]\ntimeout_secs = 10\n[output]\nfile = \"base.json\"\n",
    );
    let overlay = write(&dir, "overlay.toml", "[output]\nfile = \"overlay.json\"\n");

    let loader = Config::builder()
        .add_toml_file(&base)
        .add_toml_file(&overlay);
    assert_eq!(loader.format_loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.output.file, PathBuf::from("overlay.json"));
}

#[test]
fn config_builder_set_override() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.toml", "[session]\ncf_home = \"/from/file\"\n");

    let config = Config::builder()
        .add_toml_file(&base)
        .set_override("session.cf_home=/from/set")
        .unwrap()
        .set_override("api.endpoint=https://api.local")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.session.cf_home, Some(PathBuf::from("/from/set")));
    assert_eq!(config.api.endpoint.as_deref(), Some("https://api.local"));
}

#[test]
fn config_empty_endpoint_rejected() {
    let result = Config::builder()
        .set_override("api.endpoint=")
        .unwrap()
        .build();
    assert!(matches!(result, Err(DefaultEnvError::Config(_))));
}
