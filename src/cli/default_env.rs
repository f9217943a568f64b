// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI arguments for the `default-env` command.
//!
//! ```text
//! cf-default-env default-env APP [-f FILE]
//! cf-default-env default-env --guid GUID [--stdout]
//! cf-default-env de APP               (alias)
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::api::AppSelector;
use crate::config::Config;
use crate::emit::Destination;
use crate::error::{DefaultEnvResult, usage_error};

/// Arguments for the `default-env` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DefaultEnvArgs {
    /// Name of the app in the targeted space.
    #[arg(value_name = "APP")]
    pub app: Option<String>,

    /// App GUID, used directly instead of looking up the app by name.
    #[arg(long = "guid", value_name = "GUID", conflicts_with = "app")]
    pub guid: Option<String>,

    /// Output file name (default: output.file, `default-env.json`).
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Writes the JSON to stdout instead of a file.
    #[arg(long = "stdout", conflicts_with = "file")]
    pub stdout: bool,
}

impl DefaultEnvArgs {
    /// The app to export: `--guid` if given, otherwise the APP name.
    ///
    /// # Errors
    ///
    /// Returns a usage error when neither is given (or both are empty).
    /// Values are passed on exactly as typed.
    pub fn selector(&self) -> DefaultEnvResult<AppSelector> {
        let guid = self.guid.as_deref().filter(|g| !g.is_empty());
        let name = self.app.as_deref().filter(|n| !n.is_empty());

        match (guid, name) {
            (Some(guid), _) => Ok(AppSelector::Guid(guid.to_string())),
            (None, Some(name)) => Ok(AppSelector::Name(name.to_string())),
            (None, None) => Err(usage_error("app name or --guid must be specified")),
        }
    }

    /// Where the result goes: stdout, `-f FILE`, or `output.file`.
    #[must_use]
    pub fn destination(&self, config: &Config) -> Destination {
        if self.stdout {
            Destination::Stdout
        } else {
            Destination::File(
                self.file
                    .clone()
                    .unwrap_or_else(|| config.output.file.clone()),
            )
        }
    }
}
