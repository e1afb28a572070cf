// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration for a single topology run.
//!
//! Everything the collector needs is threaded in explicitly at
//! construction; nothing is read from the environment at call sites.

use std::path::PathBuf;

/// Namespace analyzed when none is given on the command line.
pub const DEFAULT_NAMESPACE: &str = "echo-test";

#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace all cluster queries are scoped to.
    pub namespace: String,
    /// Override for the cluster CLI binary. When unset the client resolves
    /// `oc` then `kubectl` from PATH.
    pub cli_program: Option<PathBuf>,
}

impl Config {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            cli_program: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace() {
        let config = Config::default();
        assert_eq!(config.namespace, "echo-test");
        assert!(config.cli_program.is_none());
    }

    #[test]
    fn test_explicit_namespace() {
        let config = Config::new("istio-system");
        assert_eq!(config.namespace, "istio-system");
    }
}
