// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `/v3/apps` list response and app selection.
//!
//! The server-side `names`/`space_guids` filters are re-checked here so an
//! app with the same name in another space is never selected, whatever
//! the server returned.

use serde::Deserialize;
use tracing::warn;

/// Paginated app list; only the first page is read.
#[derive(Debug, Default, Deserialize)]
pub struct AppList {
    #[serde(default)]
    pub resources: Vec<AppResource>,
}

/// One app resource.
#[derive(Debug, Clone, Deserialize)]
pub struct AppResource {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub relationships: AppRelationships,
}

impl AppResource {
    /// GUID of the owning space, if the relationship is present.
    #[must_use]
    pub fn space_guid(&self) -> Option<&str> {
        self.relationships
            .space
            .as_ref()
            .and_then(|rel| rel.data.as_ref())
            .map(|data| data.guid.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppRelationships {
    #[serde(default)]
    pub space: Option<ToOneRelationship>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToOneRelationship {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipData {
    pub guid: String,
}

/// Pick the app named exactly `name` whose space is `space_guid`.
///
/// With more than one candidate the first one wins and a warning is logged.
#[must_use]
pub fn select_app(
    resources: Vec<AppResource>,
    name: &str,
    space_guid: &str,
) -> Option<AppResource> {
    let mut candidates = resources
        .into_iter()
        .filter(|app| app.name == name && app.space_guid() == Some(space_guid));

    let first = candidates.next()?;
    let others = candidates.count();
    if others > 0 {
        warn!(
            app = name,
            candidates = others + 1,
            guid = %first.guid,
            "app name is ambiguous in space, using first match"
        );
    }
    Some(first)
}
