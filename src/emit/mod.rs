// cf-default-env: Cloud Foundry app environment exporter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Writes the merged environment as JSON.
//!
//! ```text
//! Destination::File(path) --> compact JSON + '\n' (create/truncate)
//! Destination::Stdout     --> pretty JSON (2 spaces) + '\n'
//! ```
//!
//! A failed file write leaves whatever was already written in place.

use serde::Serialize;
use std::fmt;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::env::MergedEnvironment;
use crate::error::{DefaultEnvResult, WriteError};

/// Where the exported document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Named file, created or truncated.
    File(PathBuf),
    /// The process's standard output.
    Stdout,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "stdout"),
        }
    }
}

impl Destination {
    /// Encoding used for this destination.
    #[must_use]
    pub const fn style(&self) -> JsonStyle {
        match self {
            Self::File(_) => JsonStyle::Compact,
            Self::Stdout => JsonStyle::Pretty,
        }
    }
}

/// JSON layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// Single line.
    Compact,
    /// Two-space indentation.
    Pretty,
}

/// Serialize `env` to `writer` in `style`, followed by a newline.
///
/// # Errors
///
/// Returns the I/O error from the writer.
pub fn write_json<W: Write>(
    env: &MergedEnvironment,
    mut writer: W,
    style: JsonStyle,
) -> std::io::Result<()> {
    match style {
        JsonStyle::Compact => serde_json::to_writer(&mut writer, env)?,
        JsonStyle::Pretty => {
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            env.serialize(&mut serializer)?;
        }
    }
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Write `env` to `destination`.
///
/// # Errors
///
/// Returns `WriteError::Create` if the file cannot be created and
/// `WriteError::Write` if writing fails.
pub fn emit(env: &MergedEnvironment, destination: &Destination) -> DefaultEnvResult<()> {
    debug!(%destination, variables = env.len(), "writing environment");
    match destination {
        Destination::File(path) => {
            let file = std::fs::File::create(path).map_err(|source| WriteError::Create {
                path: path.clone(),
                source,
            })?;
            write_to(env, BufWriter::new(file), destination)
        }
        Destination::Stdout => write_to(env, std::io::stdout().lock(), destination),
    }
}

/// Write `env` to an already opened `writer` in the style of `destination`.
///
/// Bytes accepted before a failure stay written.
///
/// # Errors
///
/// Returns `WriteError::Write` naming `destination`.
pub fn write_to<W: Write>(
    env: &MergedEnvironment,
    writer: W,
    destination: &Destination,
) -> DefaultEnvResult<()> {
    write_json(env, writer, destination.style()).map_err(|source| {
        WriteError::Write {
            destination: destination.to_string(),
            source,
        }
        .into()
    })
}
