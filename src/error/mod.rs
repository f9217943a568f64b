// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            DefaultEnvError (~24 bytes)
//!                     |
//!   +-------+-------+-------+-------+-------+-------+
//!   |       |       |       |       |       |       |
//!   v       v       v       v       v       v       v
//! Usage  Session  NotFound Fetch  Decode  Write  Config
//! Box<str> Box     Box     Box     Box     Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Session  MissingConfig, ReadFailed, ParseFailed, NotLoggedIn, NoTarget, NoSpace
//!   Network  Reqwest, HttpError, Unauthorized, TokenRefresh, InvalidUrl
//!   Decode   url + decoder message
//!   Write    Create, Write
//!   Config   ParseError, InvalidValue, InvalidOverride
//! ```
//!
//! Every stage returns these as values; only `main` turns one into a
//! message on stderr and a failing exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DefaultEnvError`].
pub type DefaultEnvResult<T> = std::result::Result<T, DefaultEnvError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum DefaultEnvError {
    /// Bad or missing invocation arguments.
    #[error("usage error: {0}")]
    Usage(Box<str>),

    /// Credentials or API endpoint could not be obtained.
    #[error("session error: {0}")]
    Session(#[from] Box<SessionError>),

    /// Application name lookup yielded no match.
    #[error("{0}")]
    AppNotFound(#[from] Box<AppNotFound>),

    /// Transport-level failure while talking to the platform API.
    #[error("failed to retrieve app environment: {0}")]
    Fetch(#[from] Box<NetworkError>),

    /// Response body was not the expected JSON document.
    #[error("failed to decode response: {0}")]
    Decode(#[from] Box<DecodeError>),

    /// Destination could not be written.
    #[error("failed to write output: {0}")]
    Write(#[from] Box<WriteError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),
}

/// Create a [`DefaultEnvError::Usage`] from a message.
pub fn usage_error(message: impl Into<String>) -> DefaultEnvError {
    DefaultEnvError::Usage(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DefaultEnvError {
                fn from(err: $error) -> Self {
                    DefaultEnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    SessionError => Session,
    AppNotFound => AppNotFound,
    NetworkError => Fetch,
    DecodeError => Decode,
    WriteError => Write,
    ConfigError => Config,
}

// --- Session Errors ---

/// Errors raised while reading the platform session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The CLI configuration file does not exist.
    #[error("cf CLI config not found at '{}' (run 'cf login' first)", path.display())]
    MissingConfig { path: PathBuf },

    /// The CLI configuration file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CLI configuration file is not valid JSON.
    #[error("failed to parse '{}': {message}", path.display())]
    ParseFailed { path: PathBuf, message: String },

    /// No access token is stored.
    #[error("not logged in (run 'cf login')")]
    NotLoggedIn,

    /// No API endpoint is targeted.
    #[error("no API endpoint targeted (run 'cf api' or set api.endpoint)")]
    NoTarget,

    /// No space is targeted.
    #[error("no space targeted (run 'cf target -s SPACE')")]
    NoSpace,

    /// The user's home directory could not be determined.
    #[error("cannot determine home directory (set CF_HOME or session.cf_home)")]
    NoHome,
}

// --- Lookup Errors ---

/// An application name that did not resolve within a space.
#[derive(Debug, Error)]
#[error("app '{name}' not found in space '{space}'")]
pub struct AppNotFound {
    /// The name that was searched for.
    pub name: String,
    /// Name (or GUID when unnamed) of the space that was searched.
    pub space: String,
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// The platform rejected the bearer token.
    #[error("authentication rejected by {url} (run 'cf login' to refresh the session)")]
    Unauthorized { url: String },

    /// The UAA server refused to renew the access token.
    #[error("token refresh rejected by {url} with http {status} (run 'cf login')")]
    TokenRefresh { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

// --- Decode Errors ---

/// Response body decoding errors.
#[derive(Debug, Error)]
#[error("invalid response body from {url}: {message}")]
pub struct DecodeError {
    /// URL the body was read from.
    pub url: String,
    /// Decoder message.
    pub message: String,
}

// --- Write Errors ---

/// Output destination errors.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Destination file could not be created or truncated.
    #[error("failed to create '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the destination failed.
    #[error("failed to write to {destination}: {source}")]
    Write {
        destination: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse or merge configuration sources.
    #[error("failed to load configuration: {message}")]
    ParseError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` override that is not `KEY=VALUE`.
    #[error("invalid override '{0}' (expected section.key=value)")]
    InvalidOverride(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::ParseError {
            message: err.to_string(),
        }
    }
}
