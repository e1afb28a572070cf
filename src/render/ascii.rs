// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Plain-text ASCII-art topology diagram.
//!
//! Renders the snapshot top-down along the traffic path: header, flow
//! summary, one boxed section per resource kind (skipped when empty),
//! the services/pods hierarchy, then statistics and a legend.

use crate::kubernetes::resources::{Gateway, HttpRoute, Route, Service};
use crate::render::truncate;
use crate::snapshot::TopologySnapshot;

const RULE_WIDTH: usize = 80;
const BOX_INNER: usize = 73;

struct AsciiReport<'a> {
    snapshot: &'a TopologySnapshot,
    out: String,
}

/// Render the full diagram as a UTF-8 text block.
pub fn render(snapshot: &TopologySnapshot) -> String {
    let mut report = AsciiReport {
        snapshot,
        out: String::new(),
    };
    report.header();
    report.traffic_flow();
    report.entry_point();
    report.routes();
    report.gateways();
    report.httproutes();
    report.tls_secrets();
    report.peer_auth();
    report.services_and_pods();
    report.statistics();
    report.legend();
    report.out
}

impl AsciiReport<'_> {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn rule(&mut self) {
        self.line("=".repeat(RULE_WIDTH));
    }

    fn box_top(&mut self) {
        self.line(format!("┌{}┐", "─".repeat(BOX_INNER)));
    }

    fn box_bottom(&mut self) {
        self.line(format!("└{}┘", "─".repeat(BOX_INNER)));
    }

    fn box_row(&mut self, text: impl AsRef<str>) {
        let cell = truncate(text.as_ref(), BOX_INNER - 2);
        self.line(format!("│ {:<width$}│", cell, width = BOX_INNER - 1));
    }

    fn arrow(&mut self, label: &str) {
        self.line("     │");
        self.line(format!("     │ {}", label));
        self.line("     ▼");
    }

    fn header(&mut self) {
        let s = self.snapshot;
        self.rule();
        self.line("🌐 GATEWAY API NETWORK TOPOLOGY DIAGRAM");
        self.rule();
        self.line(format!("📍 Namespace: {}", s.namespace));
        self.line(format!(
            "📊 Resources: {} routes, {} gateways, {} httproutes, {} services, {} pods",
            s.routes.len(),
            s.gateways.len(),
            s.httproutes.len(),
            s.services.len(),
            s.pods.len()
        ));
        self.line(format!(
            "⏰ Generated: {}",
            s.generated_at.format("%a %b %e %H:%M:%S %Y")
        ));
        self.blank();
    }

    fn traffic_flow(&mut self) {
        self.line("🔄 TRAFFIC FLOW SUMMARY");
        self.box_top();
        self.box_row("1. External Client → OpenShift Router (HAProxy/Envoy)");
        self.box_row("2. Router → TinyLB Route (TLS Passthrough)");
        self.box_row("3. TinyLB Route → Gateway API Gateway (LoadBalancer Service)");
        self.box_row("4. Gateway → HTTPRoute (Path-based routing rules)");
        self.box_row("5. HTTPRoute → Backend Services (Service discovery)");
        self.box_row("6. Services → Pods (Container endpoints)");
        self.box_row("7. Pod → App Container + Istio Proxy (Service Mesh mTLS)");
        self.box_bottom();
        self.blank();
    }

    fn entry_point(&mut self) {
        self.line("📡 EXTERNAL TRAFFIC");
        self.line("     │");
        self.line("     │ HTTPS/HTTP");
        self.line("     ▼");
        self.line("┌─────────────────────┐");
        self.line("│   OpenShift Router  │");
        self.line("│   (HAProxy/Envoy)   │");
        self.line("└─────────────────────┘");
    }

    fn routes(&mut self) {
        if self.snapshot.routes.is_empty() {
            self.blank();
            return;
        }
        self.arrow("TLS Passthrough");
        self.line("🛣️  OPENSHIFT ROUTES (TinyLB Managed)");
        let routes: Vec<Route> = self.snapshot.routes.clone();
        for route in &routes {
            let tls_info = if route.tls.is_secured() {
                format!("🔒 {}", route.tls)
            } else {
                "🔓 HTTP".to_string()
            };
            self.box_top();
            self.box_row(format!("Route: {}", truncate(&route.name, 35)));
            self.box_row(format!("Host:  {}", truncate(&route.host, 45)));
            self.box_row(format!("TLS:   {}", tls_info));
            self.box_row(format!("Port:  {}", route.target_port));
            self.box_row(format!("To:    {}", truncate(&route.service, 35)));
            self.box_bottom();
        }
        self.arrow("Forwards to LoadBalancer Service");
    }

    fn gateways(&mut self) {
        if self.snapshot.gateways.is_empty() {
            return;
        }
        self.line("🚪 GATEWAY API GATEWAYS");
        let gateways: Vec<Gateway> = self.snapshot.gateways.clone();
        for gateway in &gateways {
            let status_icon = if gateway.status == crate::kubernetes::resources::GatewayStatus::Programmed
            {
                "✅"
            } else {
                "❌"
            };
            self.box_top();
            self.box_row(format!(
                "Gateway: {:<23} Status: {} {}",
                truncate(&gateway.name, 20),
                status_icon,
                gateway.status
            ));
            self.box_row(format!("Class:   {}", truncate(&gateway.class_name, 25)));
            self.box_row("Listeners:");
            for listener in &gateway.listeners {
                let proto_icon = if listener.protocol == "HTTPS" { "🔒" } else { "🔓" };
                self.box_row(format!(
                    "  {} {:<13} {:<6} :{:<5} {}",
                    proto_icon,
                    truncate(&listener.name, 10),
                    listener.protocol,
                    listener.port,
                    truncate(&listener.hostname, 25)
                ));
            }
            self.box_bottom();
        }
        self.arrow("Routes traffic via");
    }

    fn httproutes(&mut self) {
        if self.snapshot.httproutes.is_empty() {
            return;
        }
        self.line("🔀 HTTPROUTE RESOURCES");
        let httproutes: Vec<HttpRoute> = self.snapshot.httproutes.clone();
        for httproute in &httproutes {
            let hostnames = httproute.hostnames.join(", ");
            self.box_top();
            self.box_row(format!("HTTPRoute: {}", truncate(&httproute.name, 25)));
            self.box_row(format!("Gateway:   {}", truncate(&httproute.gateway, 25)));
            self.box_row(format!("Hostnames: {}", truncate(&hostnames, 35)));
            self.box_row("Routing Rules:");
            for rule in &httproute.rules {
                for path_match in &rule.matches {
                    let match_icon = if path_match.match_type == "Exact" {
                        "🎯"
                    } else {
                        "🔀"
                    };
                    let backends = rule
                        .backends
                        .iter()
                        .map(|b| b.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.box_row(format!(
                        "  {} {:<18} ({:<15}) → {}",
                        match_icon,
                        truncate(&path_match.path, 15),
                        truncate(&path_match.match_type, 12),
                        truncate(&backends, 25)
                    ));
                }
            }
            self.box_bottom();
        }
        self.arrow("Forwards to backend services");
    }

    fn tls_secrets(&mut self) {
        if self.snapshot.tls_secrets.is_empty() {
            return;
        }
        self.line("🔑 TLS CERTIFICATES");
        let lines: Vec<String> = self
            .snapshot
            .tls_secrets
            .iter()
            .map(|s| format!("  🔒 {} [{}]", truncate(&s.name, 40), s.data_keys.join(", ")))
            .collect();
        for l in lines {
            self.line(l);
        }
        self.blank();
    }

    fn peer_auth(&mut self) {
        if self.snapshot.peer_auth.is_empty() {
            return;
        }
        self.line("🛡️  SECURITY POLICIES");
        let lines: Vec<String> = self
            .snapshot
            .peer_auth
            .iter()
            .map(|p| {
                let scope = if p.selector.is_empty() {
                    "namespace-wide".to_string()
                } else {
                    p.selector
                        .iter()
                        .map(|(k, v)| format!("{}={}", k, v))
                        .collect::<Vec<_>>()
                        .join(",")
                };
                format!("  🛡️  {} mTLS={} ({})", truncate(&p.name, 30), p.mode, scope)
            })
            .collect();
        for l in lines {
            self.line(l);
        }
        self.blank();
    }

    fn services_and_pods(&mut self) {
        if self.snapshot.services.is_empty() {
            return;
        }
        self.line("🎯 SERVICES & PODS");
        let services: Vec<Service> = self.snapshot.services.clone();
        let (lb, other): (Vec<_>, Vec<_>) = services.iter().partition(|s| s.is_load_balancer());

        for (group_label, group) in [("⚡ Gateway Infrastructure", lb), ("🎯 Backend Services", other)]
        {
            if group.is_empty() {
                continue;
            }
            self.line(group_label);
            for service in group {
                self.service_box(service);
            }
        }
    }

    fn service_box(&mut self, service: &Service) {
        self.box_top();
        self.box_row(format!(
            "Service: {:<28} Type: {}",
            truncate(&service.name, 25),
            truncate(&service.service_type, 15)
        ));
        for port in &service.ports {
            self.box_row(format!(
                "  Port: {:<5} → {:<5} ({})",
                port.port, port.target_port, port.protocol
            ));
        }
        self.box_row("Pods:");

        let pods: Vec<_> = self
            .snapshot
            .pods_for_service(service)
            .into_iter()
            .cloned()
            .collect();
        if pods.is_empty() {
            self.box_row("  ❌ No pods found");
        } else {
            for pod in &pods {
                let status_icon = if pod.is_running() { "✅" } else { "❌" };
                self.box_row(format!(
                    "  🐳 {:<38} {} {:<10} ({})",
                    truncate(&pod.name, 35),
                    status_icon,
                    pod.phase,
                    pod.readiness
                ));
                for container in &pod.containers {
                    let sidecar_icon =
                        if container.name == crate::kubernetes::resources::SIDECAR_CONTAINER {
                            "🔒"
                        } else {
                            "🎯"
                        };
                    self.box_row(format!(
                        "     {} {:<18} ({})",
                        sidecar_icon,
                        truncate(&container.name, 15),
                        truncate(short_image(&container.image), 20)
                    ));
                }
            }
        }
        self.box_bottom();
        self.blank();
    }

    fn statistics(&mut self) {
        let s = self.snapshot;
        self.line("📊 TOPOLOGY STATISTICS");
        self.line(format!("   Routes: {}", s.routes.len()));
        self.line(format!("   Gateways: {}", s.gateways.len()));
        self.line(format!("   HTTPRoutes: {}", s.httproutes.len()));
        self.line(format!("   Services: {}", s.services.len()));
        self.line(format!("   Pods: {}", s.pods.len()));
        self.line(format!("   Routing Rules: {}", s.total_rules()));
        self.line(format!("   Containers: {}", s.total_containers()));
        self.blank();
    }

    fn legend(&mut self) {
        self.rule();
        self.line("🎯 Legend:");
        self.line("  📡 External Traffic    🛣️  OpenShift Route    🚪 Gateway API");
        self.line("  🔀 HTTPRoute          🎯 Service           🐳 Pod");
        self.line("  ⚡ LoadBalancer       🔒 TLS Termination   🔀 Path Routing");
        self.rule();
    }
}

/// Last path segment of an image ref, tag stripped.
fn short_image(image: &str) -> &str {
    let name = image.rsplit('/').next().unwrap_or(image);
    name.split(':').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubernetes::resources::{
        Container, GatewayStatus, Listener, Pod, Readiness, TlsTermination,
    };
    use std::collections::BTreeMap;

    fn sample_snapshot() -> TopologySnapshot {
        let mut snapshot = TopologySnapshot::empty("echo-test");
        snapshot.routes.push(Route {
            name: "echo-gateway-istio-tinylb".to_string(),
            host: "echo-gateway-istio-echo-test.apps-crc.testing".to_string(),
            tls: TlsTermination::Passthrough,
            target_port: "443".to_string(),
            service: "echo-gateway-istio".to_string(),
        });
        snapshot.gateways.push(Gateway {
            name: "echo-gateway".to_string(),
            class_name: "istio".to_string(),
            status: GatewayStatus::Programmed,
            listeners: vec![Listener {
                name: "https".to_string(),
                port: 443,
                protocol: "HTTPS".to_string(),
                hostname: "*".to_string(),
            }],
        });
        snapshot.services.push(Service {
            name: "echo".to_string(),
            service_type: "ClusterIP".to_string(),
            selector: BTreeMap::from([("app".to_string(), "echo".to_string())]),
            ports: vec![crate::kubernetes::resources::ServicePort {
                port: 80,
                target_port: "8080".to_string(),
                protocol: "TCP".to_string(),
            }],
        });
        snapshot.pods.push(Pod {
            name: "echo-5f77b6c9d-x2x4m".to_string(),
            labels: BTreeMap::from([("app".to_string(), "echo".to_string())]),
            containers: vec![
                Container {
                    name: "echo".to_string(),
                    image: "quay.io/org/echo:v1".to_string(),
                },
                Container {
                    name: "istio-proxy".to_string(),
                    image: "docker.io/istio/proxyv2:1.20".to_string(),
                },
            ],
            readiness: Readiness { ready: 2, total: 2 },
            phase: "Running".to_string(),
            has_sidecar: true,
        });
        snapshot
    }

    #[test]
    fn test_render_contains_all_sections() {
        let report = render(&sample_snapshot());
        assert!(report.contains("GATEWAY API NETWORK TOPOLOGY DIAGRAM"));
        assert!(report.contains("Namespace: echo-test"));
        assert!(report.contains("TRAFFIC FLOW SUMMARY"));
        assert!(report.contains("OPENSHIFT ROUTES"));
        assert!(report.contains("GATEWAY API GATEWAYS"));
        assert!(report.contains("SERVICES & PODS"));
        assert!(report.contains("TOPOLOGY STATISTICS"));
        assert!(report.contains("Legend:"));
    }

    #[test]
    fn test_seven_flow_hops_present() {
        let report = render(&sample_snapshot());
        for hop in 1..=7 {
            assert!(report.contains(&format!("{}. ", hop)), "missing hop {}", hop);
        }
    }

    #[test]
    fn test_empty_kinds_skip_their_sections() {
        let report = render(&TopologySnapshot::empty("echo-test"));
        assert!(!report.contains("OPENSHIFT ROUTES"));
        assert!(!report.contains("GATEWAY API GATEWAYS"));
        assert!(!report.contains("HTTPROUTE RESOURCES"));
        assert!(!report.contains("SERVICES & PODS"));
        // Header, flow, statistics and legend always render.
        assert!(report.contains("TRAFFIC FLOW SUMMARY"));
        assert!(report.contains("Routes: 0"));
        assert!(report.contains("Containers: 0"));
        assert!(report.contains("Legend:"));
    }

    #[test]
    fn test_long_host_truncated_with_ellipsis() {
        let mut snapshot = sample_snapshot();
        snapshot.routes[0].host = "h".repeat(100);
        let report = render(&snapshot);
        assert!(!report.contains(&"h".repeat(100)));
        let truncated = format!("{}...", "h".repeat(42));
        assert!(report.contains(&truncated));
    }

    #[test]
    fn test_pod_readiness_and_sidecar_rendered() {
        let report = render(&sample_snapshot());
        assert!(report.contains("(2/2)"));
        assert!(report.contains("istio-proxy"));
        assert!(report.contains("proxyv2"));
        // Tag and registry are stripped from the image display.
        assert!(!report.contains("proxyv2:1.20"));
    }

    #[test]
    fn test_service_without_matching_pods_notes_it() {
        let mut snapshot = sample_snapshot();
        snapshot.pods.clear();
        let report = render(&snapshot);
        assert!(report.contains("No pods found"));
    }

    #[test]
    fn test_lb_services_grouped_separately() {
        let mut snapshot = sample_snapshot();
        snapshot.services.push(Service {
            name: "echo-gateway-istio".to_string(),
            service_type: "LoadBalancer".to_string(),
            selector: BTreeMap::new(),
            ports: Vec::new(),
        });
        let report = render(&snapshot);
        assert!(report.contains("Gateway Infrastructure"));
        assert!(report.contains("Backend Services"));
    }

    #[test]
    fn test_short_image() {
        assert_eq!(short_image("quay.io/org/echo:v1"), "echo");
        assert_eq!(short_image("busybox"), "busybox");
        assert_eq!(short_image("docker.io/istio/proxyv2:1.20"), "proxyv2");
    }
}
