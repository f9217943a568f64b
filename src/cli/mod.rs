// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for cf-default-env using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! cf-default-env [global options] <command>
//! default-env (de) [APP] [--guid GUID] [-f FILE] [--stdout]
//! options
//! configs
//! version
//! ```

pub mod default_env;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::default_env::DefaultEnvArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Export the runtime environment of a Cloud Foundry app.
#[derive(Debug, Parser)]
#[command(
    name = "cf-default-env",
    author,
    version,
    about = "Create a default-env.json file with the environment variables of a Cloud Foundry app",
    long_about = "cf-default-env Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reads the session of the cf CLI (run `cf login` and `cf target`\n\
                  first), fetches the environment of an app in the targeted space\n\
                  and merges VCAP_SERVICES, VCAP_APPLICATION and user-provided\n\
                  variables into one JSON object. User-provided variables win over\n\
                  application variables, which win over system variables.",
    after_help = "CONFIG FILES:\n\n\
                  An optional `default-env.toml` in the current directory is loaded\n\
                  first, then every file given with --config. DEFAULT_ENV_* environment\n\
                  variables (e.g. DEFAULT_ENV_API__TIMEOUT_SECS=10) and --set options\n\
                  override both. Use --no-default-config to skip `default-env.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Creates default-env.json with the environment variables of an app.
    #[command(name = "default-env", visible_alias = "de")]
    DefaultEnv(DefaultEnvArgs),

    /// Lists all options and their values.
    Options,

    /// Lists the config files in use.
    Configs,

    /// Shows the version.
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
