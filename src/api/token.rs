// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Access token renewal against UAA.
//!
//! ```text
//! POST {uaa}/oauth/token
//!   Authorization: Basic cf:
//!   grant_type=refresh_token&refresh_token=...
//!   --> { "access_token": "..." }
//! ```
//!
//! The renewed token lives only in memory; `.cf/config.json` is left
//! untouched.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::error::{DecodeError, DefaultEnvResult, NetworkError};
use crate::session::TokenRefresh;

/// OAuth client id the cf CLI uses, with an empty secret.
const CF_CLIENT_ID: &str = "cf";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// `application/x-www-form-urlencoded` body for a refresh grant.
pub(crate) fn refresh_grant_body(refresh_token: &str) -> String {
    format!(
        "grant_type=refresh_token&refresh_token={}",
        utf8_percent_encode(refresh_token, NON_ALPHANUMERIC)
    )
}

/// Exchange the refresh token for a new access token.
pub(crate) async fn refresh_access_token(
    http: &Client,
    refresh: &TokenRefresh,
) -> DefaultEnvResult<SecretString> {
    let url = format!("{}/oauth/token", refresh.uaa_endpoint());
    debug!(url = %url, "POST");

    let response = http
        .post(&url)
        .basic_auth(CF_CLIENT_ID, Some(""))
        .header(ACCEPT, "application/json")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(refresh_grant_body(refresh.refresh_token().expose_secret()))
        .send()
        .await
        .map_err(NetworkError::Reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::TokenRefresh {
            status: status.as_u16(),
            url,
        }
        .into());
    }

    let body = response.bytes().await.map_err(NetworkError::Reqwest)?;
    let token: TokenResponse = serde_json::from_slice(&body).map_err(|e| DecodeError {
        url: url.clone(),
        message: e.to_string(),
    })?;
    Ok(SecretString::new(token.access_token.into()))
}
