// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Per-kind query-name fallback.
//!
//! CRD-backed kinds answer to more than one name depending on what is
//! installed (`gateway` vs the fully-qualified resource name). Each kind
//! carries an ordered list of names tried in turn until one yields items;
//! a failing or empty strategy reports and falls through to the next.

use serde_json::Value;
use tracing::{debug, warn};

use super::{ClusterCli, QueryError};

/// How one resource kind is queried.
#[derive(Debug, Clone, Copy)]
pub struct KindQuery {
    /// Human-readable kind label used in diagnostics and progress output.
    pub label: &'static str,
    /// Resource names to try, in order.
    pub names: &'static [&'static str],
    /// Optional label selector forwarded to the CLI.
    pub selector: Option<&'static str>,
}

pub const ROUTES: KindQuery = KindQuery {
    label: "Routes",
    names: &["routes", "routes.route.openshift.io"],
    selector: Some("tinylb.io/managed=true"),
};

pub const GATEWAYS: KindQuery = KindQuery {
    label: "Gateways",
    names: &["gateway", "gateways.gateway.networking.k8s.io"],
    selector: None,
};

pub const HTTPROUTES: KindQuery = KindQuery {
    label: "HTTPRoutes",
    names: &["httproute", "httproutes.gateway.networking.k8s.io"],
    selector: None,
};

pub const SERVICES: KindQuery = KindQuery {
    label: "Services",
    names: &["svc"],
    selector: None,
};

pub const PODS: KindQuery = KindQuery {
    label: "Pods",
    names: &["pods"],
    selector: None,
};

pub const SECRETS: KindQuery = KindQuery {
    label: "TLS Secrets",
    names: &["secrets"],
    selector: None,
};

pub const PEER_AUTH: KindQuery = KindQuery {
    label: "Security Policies",
    names: &["peerauthentication", "peerauthentications.security.istio.io"],
    selector: None,
};

impl KindQuery {
    /// Fetch this kind with the fallback strategy. Returns an empty list
    /// when every name fails or comes back empty; never errors.
    pub fn fetch(&self, cli: &ClusterCli, namespace: &str) -> Vec<Value> {
        self.fetch_with(|name| cli.get_items(name, namespace, self.selector))
    }

    /// Same contract, with the query call injected. The first name that
    /// yields a non-empty item list wins and later names are not tried.
    pub fn fetch_with<F>(&self, mut query: F) -> Vec<Value>
    where
        F: FnMut(&str) -> Result<Vec<Value>, QueryError>,
    {
        for name in self.names {
            match query(name) {
                Ok(items) if !items.is_empty() => {
                    debug!(kind = self.label, %name, count = items.len(), "query succeeded");
                    return items;
                }
                Ok(_) => {
                    debug!(kind = self.label, %name, "query returned no items");
                }
                Err(err) => {
                    warn!(kind = self.label, %name, error = %err, "query failed");
                }
            }
        }
        Vec::new()
    }
}
