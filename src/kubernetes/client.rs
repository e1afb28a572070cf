// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! External cluster CLI invocation.
//!
//! The tool never talks to the API server directly; every query is one
//! blocking `<cli> get <kind> -n <namespace> [-l <selector>] -o json`
//! invocation against `oc` or `kubectl`, whichever resolves first on PATH.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

/// Candidate binary names, tried in this order.
const CLI_CANDIDATES: &[&str] = &["oc", "kubectl"];

/// One cluster query failing. All variants are recoverable at the call
/// site: the collector maps each to "no data for this kind".
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("malformed JSON from {program}: {source}")]
    MalformedJson {
        program: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to the resolved cluster CLI.
#[derive(Debug, Clone)]
pub struct ClusterCli {
    program: PathBuf,
}

impl ClusterCli {
    /// Resolve the first candidate present on PATH. When neither binary
    /// exists the handle still constructs with the first candidate name;
    /// every query then fails with [`QueryError::Spawn`] and degrades.
    pub fn resolve() -> Self {
        let program = CLI_CANDIDATES
            .iter()
            .find_map(|name| find_on_path(name))
            .unwrap_or_else(|| PathBuf::from(CLI_CANDIDATES[0]));
        debug!(program = %program.display(), "resolved cluster CLI");
        Self { program }
    }

    /// Use an explicit binary instead of PATH resolution.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run one namespaced `get` query and return the `items` array of the
    /// resulting List object. Blocks until the CLI exits; no retries.
    pub fn get_items(
        &self,
        kind: &str,
        namespace: &str,
        selector: Option<&str>,
    ) -> Result<Vec<Value>, QueryError> {
        let program = self.program.display().to_string();

        let mut cmd = Command::new(&self.program);
        cmd.args(["get", kind, "-n", namespace]);
        if let Some(selector) = selector {
            cmd.args(["-l", selector]);
        }
        cmd.args(["-o", "json"]);
        trace!(%kind, %namespace, ?selector, "running cluster query");

        let output = cmd.output().map_err(|source| QueryError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(QueryError::CommandFailed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let parsed: Value = serde_json::from_slice(&output.stdout)
            .map_err(|source| QueryError::MalformedJson { program, source })?;

        let items = match parsed.get("items").and_then(Value::as_array) {
            Some(items) => items.clone(),
            None => Vec::new(),
        };
        trace!(%kind, count = items.len(), "cluster query returned");
        Ok(items)
    }
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
