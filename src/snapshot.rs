// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! The in-memory result of one collection pass.
//!
//! A snapshot is assembled once by the collector and read-only afterwards.
//! Cross-references (service to pod, effective mTLS mode, aggregate
//! counts) are computed on demand and never stored.

use chrono::{DateTime, Local};

use crate::kubernetes::resources::{
    Gateway, HttpRoute, MtlsMode, Pod, PeerAuthPolicy, Route, Service, TlsSecret,
};

/// Policy name that supplies the namespace-wide mTLS mode.
const NAMESPACE_POLICY: &str = "default";

#[derive(Debug, Clone)]
pub struct TopologySnapshot {
    pub namespace: String,
    pub generated_at: DateTime<Local>,
    pub routes: Vec<Route>,
    pub gateways: Vec<Gateway>,
    pub httproutes: Vec<HttpRoute>,
    pub services: Vec<Service>,
    pub pods: Vec<Pod>,
    pub tls_secrets: Vec<TlsSecret>,
    pub peer_auth: Vec<PeerAuthPolicy>,
}

impl TopologySnapshot {
    pub fn empty(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            generated_at: Local::now(),
            routes: Vec::new(),
            gateways: Vec::new(),
            httproutes: Vec::new(),
            services: Vec::new(),
            pods: Vec::new(),
            tls_secrets: Vec::new(),
            peer_auth: Vec::new(),
        }
    }

    /// Pods matched by a service selector. A pod matches iff every
    /// key/value pair of the selector is present and equal in the pod
    /// labels; an empty selector matches nothing.
    pub fn pods_for_service(&self, service: &Service) -> Vec<&Pod> {
        if service.selector.is_empty() {
            return Vec::new();
        }
        self.pods
            .iter()
            .filter(|pod| {
                service
                    .selector
                    .iter()
                    .all(|(k, v)| pod.labels.get(k) == Some(v))
            })
            .collect()
    }

    pub fn service_by_name(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Namespace-wide mTLS mode: taken from the policy named `default`,
    /// PERMISSIVE when no such policy exists.
    pub fn effective_mtls_mode(&self) -> MtlsMode {
        self.peer_auth
            .iter()
            .find(|p| p.name == NAMESPACE_POLICY)
            .map(|p| p.mode)
            .unwrap_or_default()
    }

    /// Whether any gateway listener terminates HTTPS.
    pub fn gateway_serves_tls(&self) -> bool {
        self.gateways
            .iter()
            .any(|gw| gw.listeners.iter().any(|l| l.protocol == "HTTPS"))
    }

    /// Whether any managed route passes TLS through untouched.
    pub fn route_tls_passthrough(&self) -> bool {
        self.routes
            .iter()
            .any(|r| r.tls == crate::kubernetes::resources::TlsTermination::Passthrough)
    }

    pub fn sidecar_pod_count(&self) -> usize {
        self.pods.iter().filter(|p| p.has_sidecar).count()
    }

    pub fn total_rules(&self) -> usize {
        self.httproutes.iter().map(|hr| hr.rules.len()).sum()
    }

    pub fn total_containers(&self) -> usize {
        self.pods.iter().map(|p| p.containers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
            && self.gateways.is_empty()
            && self.httproutes.is_empty()
            && self.services.is_empty()
            && self.pods.is_empty()
            && self.tls_secrets.is_empty()
            && self.peer_auth.is_empty()
    }
}
