// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cloud Foundry v3 API access.
//!
//! ```text
//! AppSelector::Guid(g) ------------------------------+
//! AppSelector::Name(n) --> GET /v3/apps              |
//!                          ?names=n&space_guids=s    |
//!                          --> AppRef ---------------+
//!                                                    v
//!                          GET /v3/apps/:guid/env --> EnvironmentDocument
//!
//! 401 + refresh token --> POST {uaa}/oauth/token --> retry once
//! ```
//!
//! [`CfApi`] is the seam between the pipeline and HTTP: [`CfClient`]
//! implements it with reqwest, tests implement it in memory.

pub mod apps;
pub mod encoding;
pub mod token;

#[cfg(test)]
mod tests;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::types::ApiConfig;
use crate::env::EnvironmentDocument;
use crate::error::{AppNotFound, DecodeError, DefaultEnvResult, NetworkError};
use crate::session::{Session, SpaceRef, TokenRefresh};

use apps::{AppList, select_app};
use encoding::{encode_path_segment, is_dot_segment};

/// How the user identified the target app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSelector {
    /// Display name, looked up in the targeted space.
    Name(String),
    /// Platform GUID, trusted as-is.
    Guid(String),
}

/// A resolved application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRef {
    /// Platform-assigned GUID.
    pub guid: String,
    /// Display name, when the app was resolved by name.
    pub name: Option<String>,
}

/// Operations the pipeline needs from the platform.
pub trait CfApi {
    /// GUID of the app named exactly `name` in `space`.
    ///
    /// Fails with `AppNotFound` when no app in `space` has that name.
    fn find_app_guid(
        &self,
        name: &str,
        space: &SpaceRef,
    ) -> impl Future<Output = DefaultEnvResult<String>> + Send;

    /// Environment document of the app with `app_guid`.
    fn app_environment(
        &self,
        app_guid: &str,
    ) -> impl Future<Output = DefaultEnvResult<EnvironmentDocument>> + Send;
}

/// Resolve `selector` to an app within `space`.
///
/// A GUID is returned unchanged without contacting the platform; a name
/// goes through [`CfApi::find_app_guid`].
///
/// # Errors
///
/// Propagates lookup failures, including `AppNotFound`.
pub async fn resolve<A: CfApi>(
    api: &A,
    selector: &AppSelector,
    space: &SpaceRef,
) -> DefaultEnvResult<AppRef> {
    match selector {
        AppSelector::Guid(guid) => {
            info!(guid = %guid, "using provided app GUID");
            Ok(AppRef {
                guid: guid.clone(),
                name: None,
            })
        }
        AppSelector::Name(name) => {
            let guid = api.find_app_guid(name, space).await?;
            info!(app = %name, guid = %guid, "retrieved app");
            Ok(AppRef {
                guid,
                name: Some(name.clone()),
            })
        }
    }
}

/// Authenticated Cloud Foundry API client.
///
/// The access token is swapped in place when a refresh succeeds, so later
/// requests reuse it.
pub struct CfClient {
    http: Client,
    api_endpoint: String,
    token: RwLock<SecretString>,
    refresh: Option<TokenRefresh>,
}

impl CfClient {
    /// Build a client for `session` with the timeout from `api`.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if the session endpoint is not a
    /// URL, or a reqwest error if the HTTP client cannot be built.
    pub fn new(session: &Session, api: &ApiConfig) -> DefaultEnvResult<Self> {
        let endpoint = session.api_endpoint().trim_end_matches('/');
        Url::parse(endpoint).map_err(|e| NetworkError::InvalidUrl(format!("{endpoint}: {e}")))?;

        let http = Client::builder()
            .user_agent(format!("cf-default-env/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(NetworkError::Reqwest)?;

        Ok(Self {
            http,
            api_endpoint: endpoint.to_string(),
            token: RwLock::new(SecretString::new(
                session.access_token().expose_secret().into(),
            )),
            refresh: session.token_refresh().map(|r| {
                TokenRefresh::new(r.uaa_endpoint(), r.refresh_token().expose_secret())
            }),
        })
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> DefaultEnvResult<Url> {
        let raw = format!("{}{path}", self.api_endpoint);
        let mut url =
            Url::parse(&raw).map_err(|e| NetworkError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn authorized_get(&self, url: &Url) -> RequestBuilder {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        self.http
            .get(url.clone())
            .bearer_auth(token.expose_secret())
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, url: &Url) -> DefaultEnvResult<Response> {
        let request = self.authorized_get(url);
        Ok(request.send().await.map_err(NetworkError::Reqwest)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> DefaultEnvResult<T> {
        debug!(url = %url, "GET");

        let mut response = self.send(&url).await?;
        if response.status() == StatusCode::UNAUTHORIZED
            && let Some(refresh) = &self.refresh
        {
            info!("access token rejected, refreshing");
            let renewed = token::refresh_access_token(&self.http, refresh).await?;
            *self.token.write().unwrap_or_else(PoisonError::into_inner) = renewed;
            response = self.send(&url).await?;
        }

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(NetworkError::Unauthorized {
                url: url.to_string(),
            }
            .into());
        }
        if !status.is_success() {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(NetworkError::Reqwest)?;
        debug!(url = %url, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(|e| {
            DecodeError {
                url: url.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

impl CfApi for CfClient {
    async fn find_app_guid(&self, name: &str, space: &SpaceRef) -> DefaultEnvResult<String> {
        let url = self.url(
            "/v3/apps",
            &[("names", name), ("space_guids", space.guid.as_str())],
        )?;
        let list: AppList = self.get_json(url).await?;

        select_app(list.resources, name, &space.guid)
            .map(|app| app.guid)
            .ok_or_else(|| {
                AppNotFound {
                    name: name.to_string(),
                    space: space.display_name().to_string(),
                }
                .into()
            })
    }

    async fn app_environment(&self, app_guid: &str) -> DefaultEnvResult<EnvironmentDocument> {
        if is_dot_segment(app_guid) {
            return Err(NetworkError::InvalidUrl(format!("invalid app GUID '{app_guid}'")).into());
        }
        let path = format!("/v3/apps/{}/env", encode_path_segment(app_guid));
        let url = self.url(&path, &[])?;
        self.get_json(url).await
    }
}
