// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::apps::{AppList, select_app};
use super::encoding::{encode_path_segment, is_dot_segment};
use super::token::refresh_grant_body;
use super::{AppRef, AppSelector, CfApi, resolve};
use crate::env::EnvironmentDocument;
use crate::error::{AppNotFound, DefaultEnvError, DefaultEnvResult};
use crate::session::SpaceRef;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

fn app_list(value: serde_json::Value) -> AppList {
    serde_json::from_value(value).unwrap()
}

fn app(guid: &str, name: &str, space: &str) -> serde_json::Value {
    json!({
        "guid": guid,
        "name": name,
        "state": "STARTED",
        "relationships": { "space": { "data": { "guid": space } } }
    })
}

#[test]
fn test_select_app_requires_same_space() {
    let list = app_list(json!({ "resources": [app("g-2", "foo", "space-2")] }));
    assert!(select_app(list.resources, "foo", "space-1").is_none());
}

#[test]
fn test_select_app_requires_exact_name() {
    let list = app_list(json!({
        "resources": [app("g-1", "foo-worker", "space-1"), app("g-2", "Foo", "space-1")]
    }));
    assert!(select_app(list.resources, "foo", "space-1").is_none());
}

#[test]
fn test_select_app_takes_first_of_several() {
    let list = app_list(json!({
        "resources": [
            app("g-other", "foo", "space-2"),
            app("g-1", "foo", "space-1"),
            app("g-2", "foo", "space-1")
        ]
    }));
    let selected = select_app(list.resources, "foo", "space-1").unwrap();
    assert_eq!(selected.guid, "g-1");
}

#[test]
fn test_select_app_without_space_relationship() {
    let list = app_list(json!({ "resources": [{ "guid": "g-1", "name": "foo" }] }));
    assert!(list.resources[0].space_guid().is_none());
    assert!(select_app(list.resources, "foo", "space-1").is_none());
}

#[test]
fn test_app_list_without_resources() {
    let list = app_list(json!({ "pagination": { "total_results": 0 } }));
    assert!(list.resources.is_empty());
}

#[test]
fn test_encode_path_segment() {
    let cases = [
        ("2b6f0c1e-7d4a-4c7e-9a0b-1f3c5d7e9a0b", "2b6f0c1e-7d4a-4c7e-9a0b-1f3c5d7e9a0b"),
        ("a/b", "a%2Fb"),
        ("a b", "a%20b"),
        ("50%", "50%25"),
        ("x?y#z", "x%3Fy%23z"),
        ("ü", "%C3%BC"),
    ];
    for (input, expected) in cases {
        assert_eq!(encode_path_segment(input), expected, "input {input:?}");
    }
}

#[test]
fn test_refresh_grant_body_encodes_token() {
    insta::assert_snapshot!(
        refresh_grant_body("abc.def+/="),
        @"grant_type=refresh_token&refresh_token=abc%2Edef%2B%2F%3D"
    );
}

#[test]
fn test_dot_segments() {
    assert!(is_dot_segment(""));
    assert!(is_dot_segment("."));
    assert!(is_dot_segment(".."));
    assert!(!is_dot_segment("..."));
    assert!(!is_dot_segment("guid"));
}

/// In-memory platform holding `(guid, name, space_guid)` apps.
struct FakeApi {
    apps: Vec<(&'static str, &'static str, &'static str)>,
    lookups: AtomicUsize,
}

impl FakeApi {
    fn new(apps: Vec<(&'static str, &'static str, &'static str)>) -> Self {
        Self {
            apps,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl CfApi for FakeApi {
    async fn find_app_guid(&self, name: &str, space: &SpaceRef) -> DefaultEnvResult<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.apps
            .iter()
            .find(|(_, n, s)| *n == name && *s == space.guid)
            .map(|(guid, _, _)| (*guid).to_string())
            .ok_or_else(|| {
                AppNotFound {
                    name: name.to_string(),
                    space: space.display_name().to_string(),
                }
                .into()
            })
    }

    async fn app_environment(&self, _app_guid: &str) -> DefaultEnvResult<EnvironmentDocument> {
        Ok(EnvironmentDocument::default())
    }
}

#[tokio::test]
async fn test_resolve_guid_bypasses_lookup() {
    let api = FakeApi::new(vec![]);
    let space = SpaceRef::new("space-1", "dev");

    let resolved = resolve(&api, &AppSelector::Guid("does-not-exist".into()), &space)
        .await
        .unwrap();

    assert_eq!(
        resolved,
        AppRef {
            guid: "does-not-exist".into(),
            name: None
        }
    );
    assert_eq!(api.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_resolve_name_in_scope() {
    let api = FakeApi::new(vec![("g-1", "foo", "space-1"), ("g-2", "foo", "space-2")]);
    let space = SpaceRef::new("space-2", "staging");

    let resolved = resolve(&api, &AppSelector::Name("foo".into()), &space)
        .await
        .unwrap();

    assert_eq!(resolved.guid, "g-2");
    assert_eq!(resolved.name.as_deref(), Some("foo"));
}

#[tokio::test]
async fn test_resolve_name_only_in_other_space() {
    let api = FakeApi::new(vec![("g-2", "foo", "space-2")]);
    let space = SpaceRef::new("space-1", "space-1");

    let err = resolve(&api, &AppSelector::Name("foo".into()), &space)
        .await
        .unwrap_err();

    assert!(matches!(err, DefaultEnvError::AppNotFound(_)));
    insta::assert_snapshot!(err.to_string(), @"app 'foo' not found in space 'space-1'");
}
