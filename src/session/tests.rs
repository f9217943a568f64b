// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CfCliSession, Session, SessionProvider, SpaceRef};
use crate::config::Config;
use crate::error::SessionError;
use secrecy::ExposeSecret;
use std::path::PathBuf;
use tempfile::TempDir;

fn cf_home_with(config_json: &str) -> TempDir {
    let home = tempfile::tempdir().expect("failed to create temp dir");
    let dot_cf = home.path().join(".cf");
    std::fs::create_dir_all(&dot_cf).unwrap();
    std::fs::write(dot_cf.join("config.json"), config_json).unwrap();
    home
}

const LOGGED_IN: &str = r#"{
  "ConfigVersion": 3,
  "Target": "https://api.cf.example.com/",
  "AccessToken": "bearer eyJhbGciOi.token",
  "RefreshToken": "refresh",
  "OrganizationFields": { "GUID": "org-1", "Name": "my-org" },
  "SpaceFields": { "GUID": "space-1", "Name": "dev", "AllowSSH": true }
}"#;

#[test]
fn test_reads_logged_in_session() {
    let home = cf_home_with(LOGGED_IN);
    let session = CfCliSession::new(home.path()).session().unwrap();

    assert_eq!(session.api_endpoint(), "https://api.cf.example.com");
    assert_eq!(session.access_token().expose_secret(), "eyJhbGciOi.token");
    assert_eq!(session.space(), &SpaceRef::new("space-1", "dev"));
}

#[test]
fn test_endpoint_override_replaces_target() {
    let home = cf_home_with(LOGGED_IN);
    let session = CfCliSession::new(home.path())
        .with_endpoint_override("http://127.0.0.1:9000")
        .session()
        .unwrap();
    assert_eq!(session.api_endpoint(), "http://127.0.0.1:9000");
}

#[test]
fn test_from_config_uses_configured_home() {
    let config = Config::parse(
        "[session]\ncf_home = \"/opt/cf\"\n[api]\nendpoint = \"https://override\"\n",
    )
    .unwrap();
    let provider = CfCliSession::from_config(&config).unwrap();
    assert_eq!(
        provider.config_path(),
        PathBuf::from("/opt/cf").join(".cf").join("config.json")
    );
}

#[test]
fn test_missing_config_file() {
    let home = tempfile::tempdir().unwrap();
    let err = CfCliSession::new(home.path()).session().unwrap_err();
    assert!(matches!(err, SessionError::MissingConfig { .. }));
}

#[test]
fn test_invalid_json() {
    let home = cf_home_with("{ not json");
    let err = CfCliSession::new(home.path()).session().unwrap_err();
    assert!(matches!(err, SessionError::ParseFailed { .. }));
}

#[test]
fn test_incomplete_sessions() {
    let cases = [
        (
            r#"{"Target": "https://api", "AccessToken": "", "SpaceFields": {"GUID": "s"}}"#,
            "not logged in (run 'cf login')",
        ),
        (
            r#"{"Target": "", "AccessToken": "bearer t", "SpaceFields": {"GUID": "s"}}"#,
            "no API endpoint targeted (run 'cf api' or set api.endpoint)",
        ),
        (
            r#"{"Target": "https://api", "AccessToken": "bearer t"}"#,
            "no space targeted (run 'cf target -s SPACE')",
        ),
    ];

    for (json, expected) in cases {
        let home = cf_home_with(json);
        let err = CfCliSession::new(home.path()).session().unwrap_err();
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn test_token_prefix_is_case_insensitive() {
    let space = SpaceRef::new("s", "");
    for raw in ["Bearer abc", "bearer abc", "abc", "  BEARER   abc "] {
        let session = Session::new("https://api", raw, space.clone());
        assert_eq!(session.access_token().expose_secret(), "abc", "input {raw:?}");
    }
}

#[test]
fn test_space_display_name_falls_back_to_guid() {
    assert_eq!(SpaceRef::new("guid-1", "").display_name(), "guid-1");
    assert_eq!(SpaceRef::new("guid-1", "dev").display_name(), "dev");
}

#[test]
fn test_refresh_credentials_are_optional() {
    let home = cf_home_with(LOGGED_IN);
    let session = CfCliSession::new(home.path()).session().unwrap();
    assert!(session.token_refresh().is_none());

    let home = cf_home_with(
        r#"{
          "Target": "https://api.cf.example.com",
          "AccessToken": "bearer old",
          "RefreshToken": "refresh-1",
          "UaaEndpoint": "https://uaa.cf.example.com/",
          "SpaceFields": { "GUID": "space-1", "Name": "dev" }
        }"#,
    );
    let session = CfCliSession::new(home.path()).session().unwrap();
    let refresh = session.token_refresh().unwrap();
    assert_eq!(refresh.uaa_endpoint(), "https://uaa.cf.example.com");
    assert_eq!(refresh.refresh_token().expose_secret(), "refresh-1");
}
