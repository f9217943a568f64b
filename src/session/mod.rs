// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform session: API endpoint, bearer token and targeted space.
//!
//! ```text
//! $CF_HOME/.cf/config.json            (written by `cf login`)
//!   Target       --> api_endpoint  (api.endpoint overrides)
//!   AccessToken  --> access_token  ("bearer " prefix stripped)
//!   RefreshToken --> token_refresh (with UaaEndpoint, optional)
//!   SpaceFields  --> space { guid, name }
//! ```
//!
//! The session is passed explicitly into the API client; nothing in the
//! core reads it from ambient state.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::error::SessionError;

/// The space (scoping context) a session is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceRef {
    /// Platform GUID of the space.
    pub guid: String,
    /// Human-readable space name, used in messages.
    pub name: String,
}

impl SpaceRef {
    #[must_use]
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }

    /// Name for messages, falling back to the GUID.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.guid
        } else {
            &self.name
        }
    }
}

/// Credentials and scope of an authenticated platform session.
#[derive(Debug)]
pub struct Session {
    api_endpoint: String,
    access_token: SecretString,
    space: SpaceRef,
    token_refresh: Option<TokenRefresh>,
}

/// Refresh token and the UAA server that accepts it.
#[derive(Debug)]
pub struct TokenRefresh {
    uaa_endpoint: String,
    refresh_token: SecretString,
}

impl TokenRefresh {
    #[must_use]
    pub fn new(uaa_endpoint: impl Into<String>, refresh_token: &str) -> Self {
        Self {
            uaa_endpoint: uaa_endpoint.into().trim_end_matches('/').to_string(),
            refresh_token: SecretString::new(refresh_token.trim().into()),
        }
    }

    /// UAA base URL, without trailing slash.
    #[must_use]
    pub fn uaa_endpoint(&self) -> &str {
        &self.uaa_endpoint
    }

    #[must_use]
    pub const fn refresh_token(&self) -> &SecretString {
        &self.refresh_token
    }
}

impl Session {
    /// Build a session, normalizing the token and endpoint.
    ///
    /// A leading `bearer ` (any case) is stripped from the token and
    /// trailing slashes are stripped from the endpoint.
    #[must_use]
    pub fn new(api_endpoint: impl Into<String>, access_token: &str, space: SpaceRef) -> Self {
        let token = strip_bearer(access_token).to_string();
        Self {
            api_endpoint: api_endpoint.into().trim_end_matches('/').to_string(),
            access_token: SecretString::new(token.into()),
            space,
            token_refresh: None,
        }
    }

    /// Allow an expired access token to be renewed with `refresh`.
    #[must_use]
    pub fn with_token_refresh(mut self, refresh: TokenRefresh) -> Self {
        self.token_refresh = Some(refresh);
        self
    }

    /// API base URL, without trailing slash.
    #[must_use]
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Bearer token without the scheme prefix.
    #[must_use]
    pub const fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Targeted space.
    #[must_use]
    pub const fn space(&self) -> &SpaceRef {
        &self.space
    }

    /// Refresh credentials, when the CLI stored them.
    #[must_use]
    pub const fn token_refresh(&self) -> Option<&TokenRefresh> {
        self.token_refresh.as_ref()
    }
}

fn strip_bearer(token: &str) -> &str {
    let token = token.trim();
    match token.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => token[7..].trim_start(),
        _ => token,
    }
}

/// Source of the platform session.
pub trait SessionProvider {
    /// Load the current session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when credentials, endpoint or space are
    /// unavailable.
    fn session(&self) -> Result<Session, SessionError>;
}

/// Session read from the Cloud Foundry CLI configuration file.
#[derive(Debug, Clone)]
pub struct CfCliSession {
    cf_home: PathBuf,
    endpoint_override: Option<String>,
}

/// Subset of `.cf/config.json` that the session needs.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct CfCliConfig {
    target: String,
    access_token: String,
    refresh_token: String,
    uaa_endpoint: String,
    space_fields: CfSpaceFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CfSpaceFields {
    #[serde(rename = "GUID")]
    guid: String,
    #[serde(rename = "Name")]
    name: String,
}

impl CfCliSession {
    /// Session rooted at `cf_home` (the directory containing `.cf/`).
    #[must_use]
    pub fn new(cf_home: impl Into<PathBuf>) -> Self {
        Self {
            cf_home: cf_home.into(),
            endpoint_override: None,
        }
    }

    /// Resolve the CLI home from configuration, `CF_HOME`, then the user's home.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoHome` when no home directory can be found.
    pub fn from_config(config: &Config) -> Result<Self, SessionError> {
        let cf_home = match &config.session.cf_home {
            Some(path) => path.clone(),
            None => match std::env::var_os("CF_HOME").filter(|v| !v.is_empty()) {
                Some(path) => PathBuf::from(path),
                None => dirs::home_dir().ok_or(SessionError::NoHome)?,
            },
        };
        let provider = Self::new(cf_home);
        Ok(match &config.api.endpoint {
            Some(endpoint) => provider.with_endpoint_override(endpoint.clone()),
            None => provider,
        })
    }

    /// Use `endpoint` instead of the CLI's targeted API.
    #[must_use]
    pub fn with_endpoint_override(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    /// Path of the CLI configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.cf_home.join(".cf").join("config.json")
    }

    fn read_config(path: &Path) -> Result<CfCliConfig, SessionError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SessionError::MissingConfig {
                    path: path.to_path_buf(),
                }
            } else {
                SessionError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|e| SessionError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl SessionProvider for CfCliSession {
    fn session(&self) -> Result<Session, SessionError> {
        let path = self.config_path();
        debug!(path = %path.display(), "reading cf CLI config");
        let cli = Self::read_config(&path)?;

        if cli.access_token.trim().is_empty() {
            return Err(SessionError::NotLoggedIn);
        }

        let endpoint = self
            .endpoint_override
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(cli.target);
        if endpoint.trim().is_empty() {
            return Err(SessionError::NoTarget);
        }

        if cli.space_fields.guid.is_empty() {
            return Err(SessionError::NoSpace);
        }

        let mut session = Session::new(
            endpoint,
            &cli.access_token,
            SpaceRef::new(cli.space_fields.guid, cli.space_fields.name),
        );
        if !cli.refresh_token.trim().is_empty() && !cli.uaa_endpoint.trim().is_empty() {
            session =
                session.with_token_refresh(TokenRefresh::new(cli.uaa_endpoint, &cli.refresh_token));
        }
        debug!(
            api = session.api_endpoint(),
            space = session.space().display_name(),
            token_len = session.access_token().expose_secret().len(),
            refreshable = session.token_refresh().is_some(),
            "session loaded"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests;
