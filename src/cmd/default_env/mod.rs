// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `default-env` command.
//!
//! ```text
//! args --> AppSelector (usage check, no I/O)
//!      --> Session (cf CLI config) --> CfClient
//!      --> resolve --> app_environment --> merge --> emit
//! ```
//!
//! Every stage returns its error; the first failure aborts the run
//! before anything is written.

use anyhow::Context;
use tracing::{Instrument, info, info_span};

use crate::api::{AppSelector, CfApi, CfClient, resolve};
use crate::cli::default_env::DefaultEnvArgs;
use crate::config::Config;
use crate::emit::{Destination, emit};
use crate::env::{MergedEnvironment, merge};
use crate::error::{DefaultEnvError, DefaultEnvResult, Result};
use crate::session::{CfCliSession, SessionProvider, SpaceRef};

/// Main handler for the `default-env` command.
///
/// # Errors
///
/// Returns an error if arguments are missing, the session cannot be read,
/// or any pipeline stage fails.
pub async fn run_default_env_command(args: &DefaultEnvArgs, config: &Config) -> Result<()> {
    let selector = args.selector()?;
    let destination = args.destination(config);

    let session = CfCliSession::from_config(config)
        .and_then(|provider| provider.session())
        .map_err(DefaultEnvError::from)?;
    let client = CfClient::new(&session, &config.api)?;

    run_pipeline(&client, &selector, session.space(), &destination)
        .await
        .with_context(|| format!("failed to export environment to {destination}"))?;
    Ok(())
}

/// Resolve, fetch, merge and emit.
///
/// Returns the merged environment that was written. The run is wrapped in
/// a `default_env` span, so the log file records its duration on close.
///
/// # Errors
///
/// Returns the first failing stage's error; nothing is written unless
/// every earlier stage succeeded.
pub async fn run_pipeline<A: CfApi>(
    api: &A,
    selector: &AppSelector,
    space: &SpaceRef,
    destination: &Destination,
) -> DefaultEnvResult<MergedEnvironment> {
    let span = info_span!("default_env", app = ?selector, space = space.display_name());
    export(api, selector, space, destination)
        .instrument(span)
        .await
}

async fn export<A: CfApi>(
    api: &A,
    selector: &AppSelector,
    space: &SpaceRef,
    destination: &Destination,
) -> DefaultEnvResult<MergedEnvironment> {
    let app = resolve(api, selector, space).await?;
    let document = api.app_environment(&app.guid).await?;
    let merged = merge(&document);

    emit(&merged, destination)?;
    info!(
        variables = merged.len(),
        "environment variables written to {destination}"
    );
    Ok(merged)
}
