// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Typed records for each collected resource kind.
//!
//! Raw JSON items are deserialized into wire structs with explicit
//! defaults, then mapped into domain records. All default substitution
//! and derivation (gateway status, readiness fraction, sidecar flag)
//! happens here at construction time; a malformed item is skipped with a
//! warning and never fails the kind.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Container name identifying the mesh sidecar.
pub const SIDECAR_CONTAINER: &str = "istio-proxy";

/// Service name always excluded from collection.
const API_SERVER_SERVICE: &str = "kubernetes";

// ---------------------------------------------------------------------------
// Shared wire fragments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl fmt::Display for IntOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntOrString::Int(n) => write!(f, "{}", n),
            IntOrString::Str(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    name: String,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

fn parse_items<T, R>(items: &[Value], kind: &str, build: impl Fn(T) -> Option<R>) -> Vec<R>
where
    T: for<'de> Deserialize<'de>,
{
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(raw) => build(raw),
            Err(err) => {
                warn!(%kind, error = %err, "skipping malformed item");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

/// TLS termination mode carried by an edge route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsTermination {
    None,
    Edge,
    Passthrough,
    Reencrypt,
}

impl TlsTermination {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("edge") => TlsTermination::Edge,
            Some("passthrough") => TlsTermination::Passthrough,
            Some("reencrypt") => TlsTermination::Reencrypt,
            _ => TlsTermination::None,
        }
    }

    pub fn is_secured(self) -> bool {
        self != TlsTermination::None
    }
}

impl fmt::Display for TlsTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TlsTermination::None => "none",
            TlsTermination::Edge => "edge",
            TlsTermination::Passthrough => "passthrough",
            TlsTermination::Reencrypt => "reencrypt",
        };
        f.write_str(s)
    }
}

/// Edge route pointing a hostname at a backing service.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub host: String,
    pub tls: TlsTermination,
    pub target_port: String,
    pub service: String,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    spec: RawRouteSpec,
}

#[derive(Debug, Default, Deserialize)]
struct RawRouteSpec {
    #[serde(default)]
    host: String,
    tls: Option<RawRouteTls>,
    port: Option<RawRoutePort>,
    to: Option<RawRouteTarget>,
}

#[derive(Debug, Deserialize)]
struct RawRouteTls {
    termination: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRoutePort {
    #[serde(rename = "targetPort")]
    target_port: Option<IntOrString>,
}

#[derive(Debug, Deserialize)]
struct RawRouteTarget {
    #[serde(default)]
    name: String,
}

pub fn routes_from_items(items: &[Value]) -> Vec<Route> {
    parse_items(items, "route", |raw: RawRoute| {
        Some(Route {
            name: raw.metadata.name,
            host: raw.spec.host,
            tls: TlsTermination::parse(
                raw.spec
                    .tls
                    .as_ref()
                    .and_then(|t| t.termination.as_deref()),
            ),
            target_port: raw
                .spec
                .port
                .and_then(|p| p.target_port)
                .map(|p| p.to_string())
                .unwrap_or_else(|| "80".to_string()),
            service: raw.spec.to.map(|t| t.name).unwrap_or_default(),
        })
    })
}

// ---------------------------------------------------------------------------
// Gateways
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    Programmed,
    Unknown,
}

impl fmt::Display for GatewayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayStatus::Programmed => f.write_str("Programmed"),
            GatewayStatus::Unknown => f.write_str("Unknown"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Listener {
    pub name: String,
    pub port: u16,
    pub protocol: String,
    pub hostname: String,
}

#[derive(Debug, Clone)]
pub struct Gateway {
    pub name: String,
    pub class_name: String,
    pub listeners: Vec<Listener>,
    pub status: GatewayStatus,
}

#[derive(Debug, Deserialize)]
struct RawGateway {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    spec: RawGatewaySpec,
    #[serde(default)]
    status: RawGatewayStatus,
}

#[derive(Debug, Default, Deserialize)]
struct RawGatewaySpec {
    #[serde(rename = "gatewayClassName", default)]
    gateway_class_name: String,
    #[serde(default)]
    listeners: Vec<RawListener>,
}

#[derive(Debug, Deserialize)]
struct RawListener {
    #[serde(default)]
    name: String,
    #[serde(default)]
    port: u16,
    #[serde(default)]
    protocol: String,
    hostname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGatewayStatus {
    #[serde(default)]
    conditions: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    #[serde(rename = "type", default)]
    condition_type: String,
    #[serde(default)]
    status: String,
}

fn gateway_status(conditions: &[RawCondition]) -> GatewayStatus {
    let programmed = conditions
        .iter()
        .any(|c| c.condition_type == "Programmed" && c.status == "True");
    if programmed {
        GatewayStatus::Programmed
    } else {
        GatewayStatus::Unknown
    }
}

pub fn gateways_from_items(items: &[Value]) -> Vec<Gateway> {
    parse_items(items, "gateway", |raw: RawGateway| {
        Some(Gateway {
            name: raw.metadata.name,
            class_name: raw.spec.gateway_class_name,
            status: gateway_status(&raw.status.conditions),
            listeners: raw
                .spec
                .listeners
                .into_iter()
                .map(|l| Listener {
                    name: l.name,
                    port: l.port,
                    protocol: l.protocol,
                    hostname: l.hostname.unwrap_or_else(|| "*".to_string()),
                })
                .collect(),
        })
    })
}

// ---------------------------------------------------------------------------
// HTTPRoutes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PathMatch {
    pub path: String,
    pub match_type: String,
}

#[derive(Debug, Clone)]
pub struct Backend {
    pub name: String,
    pub port: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct RouteRule {
    pub matches: Vec<PathMatch>,
    pub backends: Vec<Backend>,
}

/// Path-based routing rules attached to a parent gateway.
#[derive(Debug, Clone)]
pub struct HttpRoute {
    pub name: String,
    /// First parent ref only; empty when the route carries none.
    pub gateway: String,
    pub hostnames: Vec<String>,
    pub rules: Vec<RouteRule>,
}

#[derive(Debug, Deserialize)]
struct RawHttpRoute {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    spec: RawHttpRouteSpec,
}

#[derive(Debug, Default, Deserialize)]
struct RawHttpRouteSpec {
    #[serde(rename = "parentRefs", default)]
    parent_refs: Vec<RawParentRef>,
    #[serde(default)]
    hostnames: Vec<String>,
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawParentRef {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    matches: Vec<RawMatch>,
    #[serde(rename = "backendRefs", default)]
    backend_refs: Vec<RawBackendRef>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    path: Option<RawPathMatch>,
}

#[derive(Debug, Deserialize)]
struct RawPathMatch {
    value: Option<String>,
    #[serde(rename = "type")]
    match_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBackendRef {
    #[serde(default)]
    name: String,
    port: Option<u16>,
}

pub fn httproutes_from_items(items: &[Value]) -> Vec<HttpRoute> {
    parse_items(items, "httproute", |raw: RawHttpRoute| {
        Some(HttpRoute {
            name: raw.metadata.name,
            gateway: raw
                .spec
                .parent_refs
                .into_iter()
                .next()
                .map(|p| p.name)
                .unwrap_or_default(),
            hostnames: raw.spec.hostnames,
            rules: raw
                .spec
                .rules
                .into_iter()
                .map(|rule| RouteRule {
                    matches: rule
                        .matches
                        .into_iter()
                        .map(|m| {
                            let path = m.path.unwrap_or(RawPathMatch {
                                value: None,
                                match_type: None,
                            });
                            PathMatch {
                                path: path.value.unwrap_or_else(|| "/".to_string()),
                                match_type: path
                                    .match_type
                                    .unwrap_or_else(|| "PathPrefix".to_string()),
                            }
                        })
                        .collect(),
                    backends: rule
                        .backend_refs
                        .into_iter()
                        .map(|b| Backend {
                            name: b.name,
                            port: b.port,
                        })
                        .collect(),
                })
                .collect(),
        })
    })
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ServicePort {
    pub port: u16,
    pub target_port: String,
    pub protocol: String,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub name: String,
    pub service_type: String,
    pub selector: BTreeMap<String, String>,
    pub ports: Vec<ServicePort>,
}

impl Service {
    pub fn is_load_balancer(&self) -> bool {
        self.service_type == "LoadBalancer"
    }
}

#[derive(Debug, Deserialize)]
struct RawService {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    spec: RawServiceSpec,
}

#[derive(Debug, Default, Deserialize)]
struct RawServiceSpec {
    #[serde(rename = "type", default)]
    service_type: Option<String>,
    #[serde(default)]
    selector: BTreeMap<String, String>,
    #[serde(default)]
    ports: Vec<RawServicePort>,
}

#[derive(Debug, Deserialize)]
struct RawServicePort {
    #[serde(default)]
    port: u16,
    #[serde(rename = "targetPort")]
    target_port: Option<IntOrString>,
    #[serde(default)]
    protocol: String,
}

pub fn services_from_items(items: &[Value]) -> Vec<Service> {
    parse_items(items, "service", |raw: RawService| {
        // The API server's own service is never part of the topology.
        if raw.metadata.name == API_SERVER_SERVICE {
            return None;
        }
        Some(Service {
            name: raw.metadata.name,
            service_type: raw
                .spec
                .service_type
                .unwrap_or_else(|| "ClusterIP".to_string()),
            selector: raw.spec.selector,
            ports: raw
                .spec
                .ports
                .into_iter()
                .map(|p| ServicePort {
                    target_port: p
                        .target_port
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| p.port.to_string()),
                    port: p.port,
                    protocol: p.protocol,
                })
                .collect(),
        })
    })
}

// ---------------------------------------------------------------------------
// Pods
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Container {
    pub name: String,
    pub image: String,
}

/// Ready containers over total containers, rendered `ready/total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub ready: usize,
    pub total: usize,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ready, self.total)
    }
}

#[derive(Debug, Clone)]
pub struct Pod {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub containers: Vec<Container>,
    pub readiness: Readiness,
    pub phase: String,
    pub has_sidecar: bool,
}

impl Pod {
    pub fn is_running(&self) -> bool {
        self.phase == "Running"
    }
}

#[derive(Debug, Deserialize)]
struct RawPod {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    spec: RawPodSpec,
    #[serde(default)]
    status: RawPodStatus,
}

#[derive(Debug, Default, Deserialize)]
struct RawPodSpec {
    #[serde(default)]
    containers: Vec<RawContainer>,
}

#[derive(Debug, Deserialize)]
struct RawContainer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawPodStatus {
    #[serde(default)]
    phase: Option<String>,
    #[serde(rename = "containerStatuses", default)]
    container_statuses: Vec<RawContainerStatus>,
}

#[derive(Debug, Deserialize)]
struct RawContainerStatus {
    #[serde(default)]
    ready: bool,
}

pub fn pods_from_items(items: &[Value]) -> Vec<Pod> {
    parse_items(items, "pod", |raw: RawPod| {
        let containers: Vec<Container> = raw
            .spec
            .containers
            .into_iter()
            .map(|c| Container {
                name: c.name,
                image: c.image,
            })
            .collect();

        let readiness = Readiness {
            ready: raw
                .status
                .container_statuses
                .iter()
                .filter(|s| s.ready)
                .count(),
            total: containers.len(),
        };
        let has_sidecar = containers.iter().any(|c| c.name == SIDECAR_CONTAINER);

        Some(Pod {
            name: raw.metadata.name,
            labels: raw.metadata.labels,
            readiness,
            has_sidecar,
            containers,
            phase: raw.status.phase.unwrap_or_else(|| "Unknown".to_string()),
        })
    })
}

// ---------------------------------------------------------------------------
// TLS secrets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TlsSecret {
    pub name: String,
    pub secret_type: String,
    pub data_keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSecret {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(rename = "type", default)]
    secret_type: String,
    #[serde(default)]
    data: BTreeMap<String, Value>,
}

pub fn tls_secrets_from_items(items: &[Value]) -> Vec<TlsSecret> {
    parse_items(items, "secret", |raw: RawSecret| {
        if raw.secret_type != "kubernetes.io/tls" {
            return None;
        }
        Some(TlsSecret {
            name: raw.metadata.name,
            secret_type: raw.secret_type,
            data_keys: raw.data.into_keys().collect(),
        })
    })
}

// ---------------------------------------------------------------------------
// PeerAuthentication policies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MtlsMode {
    #[default]
    Permissive,
    Strict,
    Disable,
}

impl MtlsMode {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("STRICT") => MtlsMode::Strict,
            Some("DISABLE") => MtlsMode::Disable,
            _ => MtlsMode::Permissive,
        }
    }
}

impl fmt::Display for MtlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MtlsMode::Permissive => "PERMISSIVE",
            MtlsMode::Strict => "STRICT",
            MtlsMode::Disable => "DISABLE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct PeerAuthPolicy {
    pub name: String,
    pub mode: MtlsMode,
    pub selector: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawPeerAuth {
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    spec: RawPeerAuthSpec,
}

#[derive(Debug, Default, Deserialize)]
struct RawPeerAuthSpec {
    mtls: Option<RawMtls>,
    selector: Option<RawWorkloadSelector>,
}

#[derive(Debug, Deserialize)]
struct RawMtls {
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawWorkloadSelector {
    #[serde(rename = "matchLabels", default)]
    match_labels: BTreeMap<String, String>,
}

pub fn peer_auth_from_items(items: &[Value]) -> Vec<PeerAuthPolicy> {
    parse_items(items, "peerauthentication", |raw: RawPeerAuth| {
        Some(PeerAuthPolicy {
            name: raw.metadata.name,
            mode: MtlsMode::parse(
                raw.spec
                    .mtls
                    .as_ref()
                    .and_then(|m| m.mode.as_deref()),
            ),
            selector: raw.spec.selector.map(|s| s.match_labels).unwrap_or_default(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_parse_with_all_fields() {
        let items = vec![json!({
            "metadata": {"name": "echo-route"},
            "spec": {
                "host": "echo.apps.example.com",
                "tls": {"termination": "passthrough"},
                "port": {"targetPort": 443},
                "to": {"name": "echo-gateway-istio"}
            }
        })];
        let routes = routes_from_items(&items);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].name, "echo-route");
        assert_eq!(routes[0].host, "echo.apps.example.com");
        assert_eq!(routes[0].tls, TlsTermination::Passthrough);
        assert_eq!(routes[0].target_port, "443");
        assert_eq!(routes[0].service, "echo-gateway-istio");
    }

    #[test]
    fn test_route_defaults_when_fields_missing() {
        let items = vec![json!({"metadata": {"name": "bare"}})];
        let routes = routes_from_items(&items);
        assert_eq!(routes[0].tls, TlsTermination::None);
        assert_eq!(routes[0].target_port, "80");
        assert_eq!(routes[0].service, "");
        assert_eq!(routes[0].host, "");
    }

    #[test]
    fn test_route_string_target_port() {
        let items = vec![json!({
            "metadata": {"name": "r"},
            "spec": {"port": {"targetPort": "https"}}
        })];
        assert_eq!(routes_from_items(&items)[0].target_port, "https");
    }

    #[test]
    fn test_unknown_tls_termination_maps_to_none() {
        let items = vec![json!({
            "metadata": {"name": "r"},
            "spec": {"tls": {"termination": "something-new"}}
        })];
        assert_eq!(routes_from_items(&items)[0].tls, TlsTermination::None);
    }

    #[test]
    fn test_gateway_programmed_condition() {
        let items = vec![json!({
            "metadata": {"name": "gw"},
            "spec": {"gatewayClassName": "istio"},
            "status": {"conditions": [
                {"type": "Accepted", "status": "True"},
                {"type": "Programmed", "status": "True"}
            ]}
        })];
        let gateways = gateways_from_items(&items);
        assert_eq!(gateways[0].status, GatewayStatus::Programmed);
        assert_eq!(gateways[0].class_name, "istio");
    }

    #[test]
    fn test_gateway_programmed_false_is_unknown() {
        let items = vec![json!({
            "metadata": {"name": "gw"},
            "status": {"conditions": [{"type": "Programmed", "status": "False"}]}
        })];
        assert_eq!(gateways_from_items(&items)[0].status, GatewayStatus::Unknown);
    }

    #[test]
    fn test_gateway_no_conditions_is_unknown() {
        let items = vec![json!({"metadata": {"name": "gw"}})];
        assert_eq!(gateways_from_items(&items)[0].status, GatewayStatus::Unknown);
    }

    #[test]
    fn test_gateway_listener_hostname_wildcard_default() {
        let items = vec![json!({
            "metadata": {"name": "gw"},
            "spec": {"listeners": [
                {"name": "http", "port": 80, "protocol": "HTTP"},
                {"name": "https", "port": 443, "protocol": "HTTPS", "hostname": "echo.example.com"}
            ]}
        })];
        let listeners = &gateways_from_items(&items)[0].listeners;
        assert_eq!(listeners[0].hostname, "*");
        assert_eq!(listeners[1].hostname, "echo.example.com");
    }

    #[test]
    fn test_httproute_first_parent_ref_wins() {
        let items = vec![json!({
            "metadata": {"name": "hr"},
            "spec": {
                "parentRefs": [{"name": "gw-a"}, {"name": "gw-b"}],
                "hostnames": ["echo.example.com"],
                "rules": [{
                    "matches": [{"path": {"value": "/v1", "type": "Exact"}}],
                    "backendRefs": [{"name": "echo", "port": 80}]
                }]
            }
        })];
        let routes = httproutes_from_items(&items);
        assert_eq!(routes[0].gateway, "gw-a");
        assert_eq!(routes[0].rules[0].matches[0].path, "/v1");
        assert_eq!(routes[0].rules[0].matches[0].match_type, "Exact");
        assert_eq!(routes[0].rules[0].backends[0].port, Some(80));
    }

    #[test]
    fn test_httproute_without_parent_refs_keeps_placeholder() {
        let items = vec![json!({"metadata": {"name": "orphan"}})];
        let routes = httproutes_from_items(&items);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].gateway, "");
    }

    #[test]
    fn test_httproute_match_defaults() {
        let items = vec![json!({
            "metadata": {"name": "hr"},
            "spec": {"rules": [{"matches": [{}], "backendRefs": []}]}
        })];
        let rule = &httproutes_from_items(&items)[0].rules[0];
        assert_eq!(rule.matches[0].path, "/");
        assert_eq!(rule.matches[0].match_type, "PathPrefix");
    }

    #[test]
    fn test_api_server_service_always_excluded() {
        let items = vec![
            json!({"metadata": {"name": "kubernetes"}, "spec": {"type": "ClusterIP"}}),
            json!({"metadata": {"name": "echo"}, "spec": {"type": "ClusterIP"}}),
        ];
        let services = services_from_items(&items);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "echo");
    }

    #[test]
    fn test_service_ports_and_selector() {
        let items = vec![json!({
            "metadata": {"name": "echo"},
            "spec": {
                "type": "LoadBalancer",
                "selector": {"app": "echo"},
                "ports": [{"port": 80, "targetPort": 8080, "protocol": "TCP"}]
            }
        })];
        let service = &services_from_items(&items)[0];
        assert!(service.is_load_balancer());
        assert_eq!(service.selector["app"], "echo");
        assert_eq!(service.ports[0].port, 80);
        assert_eq!(service.ports[0].target_port, "8080");
    }

    #[test]
    fn test_service_target_port_defaults_to_port() {
        let items = vec![json!({
            "metadata": {"name": "echo"},
            "spec": {"ports": [{"port": 80, "protocol": "TCP"}]}
        })];
        assert_eq!(services_from_items(&items)[0].ports[0].target_port, "80");
    }

    #[test]
    fn test_pod_readiness_fraction() {
        let items = vec![json!({
            "metadata": {"name": "echo-abc", "labels": {"app": "echo"}},
            "spec": {"containers": [
                {"name": "echo", "image": "quay.io/org/echo:v1"},
                {"name": "istio-proxy", "image": "docker.io/istio/proxyv2:1.20"},
                {"name": "extra", "image": "busybox"}
            ]},
            "status": {
                "phase": "Running",
                "containerStatuses": [{"ready": true}, {"ready": true}, {"ready": false}]
            }
        })];
        let pod = &pods_from_items(&items)[0];
        assert_eq!(pod.readiness.to_string(), "2/3");
        assert!(pod.has_sidecar);
        assert!(pod.is_running());
    }

    #[test]
    fn test_pod_without_status_block_is_zero_over_zero_ready() {
        let items = vec![json!({"metadata": {"name": "pending"}})];
        let pod = &pods_from_items(&items)[0];
        assert_eq!(pod.readiness.to_string(), "0/0");
        assert_eq!(pod.phase, "Unknown");
        assert!(!pod.has_sidecar);
    }

    #[test]
    fn test_pod_no_statuses_reported_counts_zero_ready() {
        let items = vec![json!({
            "metadata": {"name": "p"},
            "spec": {"containers": [{"name": "app", "image": "img"}]},
            "status": {"phase": "Pending"}
        })];
        assert_eq!(pods_from_items(&items)[0].readiness.to_string(), "0/1");
    }

    #[test]
    fn test_only_tls_secrets_kept() {
        let items = vec![
            json!({"metadata": {"name": "token"}, "type": "kubernetes.io/service-account-token"}),
            json!({
                "metadata": {"name": "echo-cert"},
                "type": "kubernetes.io/tls",
                "data": {"tls.crt": "x", "tls.key": "y"}
            }),
        ];
        let secrets = tls_secrets_from_items(&items);
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].name, "echo-cert");
        assert_eq!(secrets[0].data_keys, vec!["tls.crt", "tls.key"]);
    }

    #[test]
    fn test_peer_auth_modes() {
        let items = vec![
            json!({"metadata": {"name": "default"}, "spec": {"mtls": {"mode": "STRICT"}}}),
            json!({"metadata": {"name": "loose"}, "spec": {"mtls": {"mode": "DISABLE"}}}),
            json!({"metadata": {"name": "implicit"}, "spec": {}}),
            json!({"metadata": {"name": "odd"}, "spec": {"mtls": {"mode": "WHATEVER"}}}),
        ];
        let policies = peer_auth_from_items(&items);
        assert_eq!(policies[0].mode, MtlsMode::Strict);
        assert_eq!(policies[1].mode, MtlsMode::Disable);
        assert_eq!(policies[2].mode, MtlsMode::Permissive);
        assert_eq!(policies[3].mode, MtlsMode::Permissive);
    }

    #[test]
    fn test_peer_auth_selector_labels() {
        let items = vec![json!({
            "metadata": {"name": "scoped"},
            "spec": {"selector": {"matchLabels": {"app": "echo"}}}
        })];
        assert_eq!(peer_auth_from_items(&items)[0].selector["app"], "echo");
    }

    #[test]
    fn test_malformed_item_skipped_without_affecting_siblings() {
        let items = vec![
            json!({"metadata": {"name": "good-a"}}),
            json!("not an object"),
            json!({"metadata": {"name": "good-b"}}),
        ];
        let pods = pods_from_items(&items);
        assert_eq!(pods.len(), 2);
        assert_eq!(pods[0].name, "good-a");
        assert_eq!(pods[1].name, "good-b");
    }

    #[test]
    fn test_record_count_matches_input_items() {
        let items: Vec<_> = (0..5)
            .map(|i| json!({"metadata": {"name": format!("gw-{}", i)}}))
            .collect();
        assert_eq!(gateways_from_items(&items).len(), items.len());
    }
}
