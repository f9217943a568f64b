// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for cf-default-env.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. default-env.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. DEFAULT_ENV_* env vars
//! 5. --set section.key=value
//! 6. command flags (-f)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! DEFAULT_ENV_API__ENDPOINT=https://api.cf.example.com → api.endpoint
//! DEFAULT_ENV_API__TIMEOUT_SECS=10                      → api.timeout_secs = 10
//! DEFAULT_ENV_SESSION__CF_HOME=/home/ci                 → session.cf_home
//! DEFAULT_ENV_OUTPUT__FILE=env.json                     → output.file
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, DefaultEnvResult};

use loader::ConfigLoader;
use types::{ApiConfig, OutputConfig, SessionConfig};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DEFAULT_ENV";

/// Configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "default-env.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Platform API options.
    pub api: ApiConfig,
    /// Session lookup options.
    pub session: SessionConfig,
    /// Output options.
    pub output: OutputConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cf_default_env::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("default-env.toml")
    ///     .with_env_prefix("DEFAULT_ENV")
    ///     .build()?;
    /// # Ok::<(), cf_default_env::error::DefaultEnvError>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> DefaultEnvResult<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero timeout, an empty
    /// endpoint override, or an empty output file name.
    pub fn validate(&self) -> DefaultEnvResult<()> {
        if self.api.timeout_secs == 0 {
            return Err(invalid("api", "timeout_secs", "must be greater than 0").into());
        }
        if self
            .api
            .endpoint
            .as_deref()
            .is_some_and(|e| e.trim().is_empty())
        {
            return Err(invalid("api", "endpoint", "must not be empty").into());
        }
        if self.output.file.as_os_str().is_empty() {
            return Err(invalid("output", "file", "must not be empty").into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "api.endpoint",
            self.api
                .endpoint
                .clone()
                .unwrap_or_else(|| "(from cf CLI)".to_string()),
        );
        options.insert("api.timeout_secs", self.api.timeout_secs.to_string());
        options.insert(
            "session.cf_home",
            self.session.cf_home.as_ref().map_or_else(
                || "(CF_HOME or home directory)".to_string(),
                |p| p.display().to_string(),
            ),
        );
        options.insert("output.file", self.output.file.display().to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
