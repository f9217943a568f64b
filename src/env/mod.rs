// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! App environment document and merging.
//!
//! ```text
//! GET /v3/apps/:guid/env
//!   system_env_json       (VCAP_SERVICES)     lowest
//!   application_env_json  (VCAP_APPLICATION)
//!   environment_variables (cf set-env)        highest
//!        |
//!        v
//!   merge() --> MergedEnvironment (BTreeMap, sorted keys)
//! ```
//!
//! Later partitions replace whole values of earlier ones; nested objects
//! are never merged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One partition of the environment: variable name to opaque JSON value.
pub type Partition = BTreeMap<String, Value>;

/// The three-partition environment payload of one app.
///
/// A partition that is absent or `null` on the wire decodes as empty.
/// Other members of the payload (`staging_env_json`, `running_env_json`)
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDocument {
    /// Platform-injected service bindings.
    #[serde(rename = "system_env_json", default, deserialize_with = "null_as_empty")]
    pub system: Partition,
    /// Platform-injected application metadata.
    #[serde(
        rename = "application_env_json",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub application: Partition,
    /// Variables set by the app owner.
    #[serde(
        rename = "environment_variables",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub user: Partition,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Partition, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Partition>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl EnvironmentDocument {
    /// Partitions in precedence order, lowest first.
    #[must_use]
    pub const fn partitions(&self) -> [&Partition; 3] {
        [&self.system, &self.application, &self.user]
    }
}

/// Flat mapping of every variable visible to the app at runtime.
///
/// Keys iterate and serialize in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedEnvironment(Partition);

impl MergedEnvironment {
    /// Value of variable `key`, if any partition defined it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Partition> for MergedEnvironment {
    fn from(map: Partition) -> Self {
        Self(map)
    }
}

/// Merge the partitions of `document`: system, then application, then user.
///
/// Total: never fails, and three empty partitions give an empty result.
#[must_use]
pub fn merge(document: &EnvironmentDocument) -> MergedEnvironment {
    let mut merged = Partition::new();
    for partition in document.partitions() {
        for (key, value) in partition {
            merged.insert(key.clone(), value.clone());
        }
    }
    MergedEnvironment(merged)
}
