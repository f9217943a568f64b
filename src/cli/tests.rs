// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::api::AppSelector;
use crate::cli::default_env::DefaultEnvArgs;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::emit::Destination;
use crate::error::DefaultEnvError;
use clap::Parser;
use std::path::PathBuf;

fn default_env_args(argv: &[&str]) -> DefaultEnvArgs {
    let cli = Cli::try_parse_from(argv).unwrap();
    match cli.command {
        Some(Command::DefaultEnv(args)) => args,
        other => panic!("expected default-env command, got {other:?}"),
    }
}

#[test]
fn test_parse_app_name() {
    let args = default_env_args(&["cf-default-env", "default-env", "my-app"]);
    assert_eq!(args.selector().unwrap(), AppSelector::Name("my-app".into()));
    assert_eq!(
        args.destination(&Config::default()),
        Destination::File(PathBuf::from("default-env.json"))
    );
}

#[test]
fn test_parse_alias_with_guid_and_stdout() {
    let args = default_env_args(&["cf-default-env", "de", "--guid", "abc-123", "--stdout"]);
    assert_eq!(args.selector().unwrap(), AppSelector::Guid("abc-123".into()));
    assert_eq!(args.destination(&Config::default()), Destination::Stdout);
}

#[test]
fn test_output_file_flag_wins_over_config() {
    let args = default_env_args(&["cf-default-env", "default-env", "my-app", "-f", "out.json"]);
    let config = Config::parse("[output]\nfile = \"configured.json\"\n").unwrap();
    assert_eq!(
        args.destination(&config),
        Destination::File(PathBuf::from("out.json"))
    );
}

#[test]
fn test_missing_app_is_usage_error() {
    let args = default_env_args(&["cf-default-env", "default-env"]);
    assert!(matches!(args.selector(), Err(DefaultEnvError::Usage(_))));

    let args = default_env_args(&["cf-default-env", "default-env", "--guid", ""]);
    assert!(matches!(args.selector(), Err(DefaultEnvError::Usage(_))));
}

#[test]
fn test_selector_keeps_input_verbatim() {
    let args = default_env_args(&["cf-default-env", "default-env", "--guid", " g-1 "]);
    assert_eq!(args.selector().unwrap(), AppSelector::Guid(" g-1 ".into()));

    let args = default_env_args(&["cf-default-env", "default-env", " foo"]);
    assert_eq!(args.selector().unwrap(), AppSelector::Name(" foo".into()));
}

#[test]
fn test_conflicting_arguments_rejected() {
    assert!(Cli::try_parse_from(["cf-default-env", "default-env", "app", "--guid", "g"]).is_err());
    assert!(
        Cli::try_parse_from(["cf-default-env", "default-env", "app", "-f", "x", "--stdout"])
            .is_err()
    );
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "cf-default-env",
        "default-env",
        "app",
        "-l",
        "4",
        "--set",
        "api.timeout_secs=5",
        "--api",
        "https://api.example.com",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(
        cli.global.to_config_overrides(),
        ["api.timeout_secs=5", "api.endpoint=https://api.example.com"]
    );
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["cf-default-env", "-l", "7", "version"]).is_err());
}
