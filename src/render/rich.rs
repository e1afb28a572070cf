// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Styled console report.
//!
//! Same content model as the ASCII renderer, presented as panels, tables
//! and a services tree. Styling is explicit: the caller decides whether
//! ANSI colors are emitted, so a report written to a file stays clean.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::Table;
use console::{measure_text_width, Style};

use crate::kubernetes::resources::{MtlsMode, Service, SIDECAR_CONTAINER};
use crate::render::truncate;
use crate::snapshot::TopologySnapshot;

pub struct RichReport<'a> {
    snapshot: &'a TopologySnapshot,
    colors: bool,
}

/// Render the styled report. With `colors` off the output is plain text
/// suitable for files and the HTML wrapper.
pub fn render(snapshot: &TopologySnapshot, colors: bool) -> String {
    RichReport { snapshot, colors }.render()
}

impl RichReport<'_> {
    fn render(&self) -> String {
        let mut sections: Vec<String> = Vec::new();
        sections.push(self.header_panel());
        sections.push(self.traffic_flow_panel());
        if !self.snapshot.routes.is_empty() {
            sections.push(self.routes_table());
        }
        if !self.snapshot.gateways.is_empty() {
            sections.push(self.gateways_table());
        }
        if !self.snapshot.httproutes.is_empty() {
            sections.push(self.httproutes_table());
        }
        if !self.snapshot.tls_secrets.is_empty() {
            sections.push(self.secrets_table());
        }
        if !self.snapshot.peer_auth.is_empty() {
            sections.push(self.peer_auth_table());
        }
        if !self.snapshot.services.is_empty() {
            sections.push(self.services_tree());
        }
        sections.push(self.security_panel());
        sections.push(self.statistics_panel());
        sections.push(self.legend_panel());
        let mut out = sections.join("\n");
        out.push('\n');
        out
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colors {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn panel(&self, title: &str, body: &[String]) -> String {
        let title_width = measure_text_width(title);
        let body_width = body.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
        let inner = body_width.max(title_width + 4).max(40);

        let mut out = String::new();
        out.push_str(&format!(
            "╭─ {} {}╮\n",
            title,
            "─".repeat(inner.saturating_sub(title_width + 1))
        ));
        for line in body {
            let pad = inner + 1 - measure_text_width(line);
            out.push_str(&format!("│ {}{}│\n", line, " ".repeat(pad)));
        }
        out.push_str(&format!("╰─{}╯\n", "─".repeat(inner + 1)));
        out
    }

    fn titled_table(&self, title: &str, table: Table) -> String {
        format!(
            "{}\n{}\n",
            self.paint(Style::new().bold(), title),
            table
        )
    }

    fn header_panel(&self) -> String {
        let s = self.snapshot;
        let mtls = s.effective_mtls_mode();
        let gateway_tls = if s.gateway_serves_tls() { "HTTPS" } else { "HTTP" };
        let body = vec![
            format!("📍 Namespace: {}", s.namespace),
            format!(
                "📊 Resources: {} routes, {} gateways, {} httproutes, {} services, {} pods",
                s.routes.len(),
                s.gateways.len(),
                s.httproutes.len(),
                s.services.len(),
                s.pods.len()
            ),
            format!(
                "🔒 Security: {} mTLS, {}/{} pods with Istio, {} Gateway",
                mtls,
                s.sidecar_pod_count(),
                s.pods.len(),
                gateway_tls
            ),
            format!("⏰ Generated: {}", s.generated_at.format("%a %b %e %H:%M:%S %Y")),
        ];
        self.panel("🚪 Gateway API Topology Viewer", &body)
    }

    fn traffic_flow_panel(&self) -> String {
        let s = self.snapshot;
        let mtls = s.effective_mtls_mode();

        let lb_info = s
            .services
            .iter()
            .find(|svc| svc.is_load_balancer())
            .map(|svc| {
                let ports: Vec<String> = svc
                    .ports
                    .iter()
                    .filter(|p| p.port == 80 || p.port == 443)
                    .map(|p| format!("{}→{}", p.port, p.target_port))
                    .collect();
                if ports.is_empty() {
                    svc.name.clone()
                } else {
                    format!("{}, {}", svc.name, ports.join(", "))
                }
            })
            .unwrap_or_else(|| "none".to_string());

        let gateway_hop = if s.gateway_serves_tls() {
            "🔒 HTTPS Termination"
        } else {
            "🔓 HTTP Only"
        };
        let mesh_hop = match mtls {
            MtlsMode::Permissive => "🔓 mTLS Optional".to_string(),
            mode => format!("🔒 Istio mTLS ({})", mode),
        };

        let mut body = vec![
            "📡 External Client".to_string(),
            "    ↓ HTTPS/HTTP (Port 80/443)".to_string(),
            "🛣️  OpenShift Router (HAProxy/Envoy)".to_string(),
            "    ↓ TLS Passthrough (No termination)".to_string(),
            format!("⚡ LoadBalancer Service ({})", lb_info),
            "    ↓ Port forwarding (TinyLB managed)".to_string(),
            "🚪 Gateway API Gateway".to_string(),
            format!("    ↓ {}", gateway_hop),
            "🔀 HTTPRoute Rules".to_string(),
            "    ↓ Path-based Routing + Port Selection".to_string(),
            "🎯 Backend Services".to_string(),
            format!("    ↓ {}", mesh_hop),
            "🐳 Application Pods + Sidecars".to_string(),
        ];
        if !s.tls_secrets.is_empty() {
            let names: Vec<&str> = s.tls_secrets.iter().map(|c| c.name.as_str()).collect();
            body.push(String::new());
            body.push(format!("🔑 TLS Certificates: {}", names.join(", ")));
        }
        self.panel("🔄 Traffic Flow & Security", &body)
    }

    fn routes_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Name", "Host", "TLS", "Port", "Target Service"]);
        for route in &self.snapshot.routes {
            let tls_display = if route.tls.is_secured() {
                format!("🔒 {}", route.tls)
            } else {
                "🔓 HTTP".to_string()
            };
            table.add_row(vec![
                truncate(&route.name, 35).to_string(),
                truncate(&route.host, 45).to_string(),
                tls_display,
                route.target_port.clone(),
                truncate(&route.service, 35).to_string(),
            ]);
        }
        self.titled_table("🛣️  OpenShift Routes (TinyLB Managed)", table)
    }

    fn gateways_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Name", "Class", "Status", "Listeners"]);
        for gateway in &self.snapshot.gateways {
            let status_display = match gateway.status {
                crate::kubernetes::resources::GatewayStatus::Programmed => {
                    "✅ Programmed".to_string()
                }
                other => format!("❌ {}", other),
            };
            let listeners: Vec<String> = gateway
                .listeners
                .iter()
                .map(|l| {
                    let icon = if l.protocol == "HTTPS" { "🔒" } else { "🔓" };
                    format!("{} {}:{} {}", icon, l.name, l.port, truncate(&l.hostname, 25))
                })
                .collect();
            table.add_row(vec![
                truncate(&gateway.name, 20).to_string(),
                truncate(&gateway.class_name, 25).to_string(),
                status_display,
                listeners.join("\n"),
            ]);
        }
        self.titled_table("🚪 Gateway API Gateways", table)
    }

    fn httproutes_table(&self) -> String {
        let mtls = self.snapshot.effective_mtls_mode();
        let policy_icon = match mtls {
            MtlsMode::Strict => "🔒",
            MtlsMode::Disable => "🔓",
            MtlsMode::Permissive => "⚠️",
        };

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            "Name",
            "Gateway",
            "Hostnames",
            "Routing Rules",
            "Backend Ports",
            "mTLS Policy",
            "Backend Security",
        ]);
        for httproute in &self.snapshot.httproutes {
            let mut routing_rules = Vec::new();
            let mut backend_ports = Vec::new();
            let mut backend_security = Vec::new();

            for rule in &httproute.rules {
                let backends: Vec<&str> = rule.backends.iter().map(|b| b.name.as_str()).collect();
                for backend in &rule.backends {
                    match backend.port {
                        Some(port) => backend_ports.push(format!("{}:{}", backend.name, port)),
                        None => backend_ports.push(backend.name.clone()),
                    }
                    let sidecar = self
                        .snapshot
                        .service_by_name(&backend.name)
                        .map(|svc| {
                            self.snapshot
                                .pods_for_service(svc)
                                .iter()
                                .any(|p| p.has_sidecar)
                        })
                        .unwrap_or(false);
                    let icon = if sidecar { "🔒" } else { "🔓" };
                    backend_security.push(format!("{} {}", icon, backend.name));
                }
                for path_match in &rule.matches {
                    let icon = if path_match.match_type == "Exact" { "🎯" } else { "🔀" };
                    routing_rules.push(format!(
                        "{} {} → {}",
                        icon,
                        truncate(&path_match.path, 15),
                        truncate(&backends.join(", "), 25)
                    ));
                }
            }

            table.add_row(vec![
                truncate(&httproute.name, 25).to_string(),
                truncate(&httproute.gateway, 25).to_string(),
                truncate(&httproute.hostnames.join(", "), 35).to_string(),
                routing_rules.join("\n"),
                backend_ports.join("\n"),
                format!("{} {}", policy_icon, mtls),
                backend_security.join("\n"),
            ]);
        }
        self.titled_table("🔀 HTTPRoute Resources", table)
    }

    fn secrets_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Name", "Type", "Data Keys"]);
        for secret in &self.snapshot.tls_secrets {
            table.add_row(vec![
                truncate(&secret.name, 40).to_string(),
                secret.secret_type.clone(),
                secret.data_keys.join(", "),
            ]);
        }
        self.titled_table("🔑 TLS Certificates", table)
    }

    fn peer_auth_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Name", "mTLS Mode", "Selector"]);
        for policy in &self.snapshot.peer_auth {
            let selector = if policy.selector.is_empty() {
                "namespace-wide".to_string()
            } else {
                policy
                    .selector
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(",")
            };
            table.add_row(vec![
                truncate(&policy.name, 30).to_string(),
                policy.mode.to_string(),
                selector,
            ]);
        }
        self.titled_table("🛡️  Security Policies", table)
    }

    fn services_tree(&self) -> String {
        let mut lines = vec![self.paint(Style::new().bold(), "🎯 Services & Pods")];

        let (lb, other): (Vec<&Service>, Vec<&Service>) = self
            .snapshot
            .services
            .iter()
            .partition(|s| s.is_load_balancer());

        for (label, group) in [("⚡ Gateway Infrastructure", lb), ("🎯 Backend Services", other)] {
            if group.is_empty() {
                continue;
            }
            lines.push(format!("  {}", self.paint(Style::new().yellow(), label)));
            for service in group {
                self.service_node(service, &mut lines);
            }
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn service_node(&self, service: &Service, lines: &mut Vec<String>) {
        lines.push(format!(
            "    {} ({})",
            self.paint(Style::new().cyan().bold(), &service.name),
            service.service_type
        ));

        let ports: Vec<String> = service
            .ports
            .iter()
            .map(|p| {
                let annotated = match p.port {
                    443 => "🔒",
                    80 => "🔓",
                    15021 => "🔧",
                    _ => "📋",
                };
                format!("{} {}→{}/{}", annotated, p.port, p.target_port, p.protocol)
            })
            .collect();
        if !ports.is_empty() {
            lines.push(format!("      📋 Ports: {}", ports.join(", ")));
        }
        if service.is_load_balancer() {
            lines.push("      🔗 TinyLB managed (Route → LoadBalancer → Gateway pods)".to_string());
        }

        let pods = self.snapshot.pods_for_service(service);
        if pods.is_empty() {
            lines.push("      ❌ No pods found".to_string());
            return;
        }
        lines.push(format!("      🐳 Pods ({})", pods.len()));
        for pod in pods {
            let status_icon = if pod.is_running() { "✅" } else { "❌" };
            let mesh_icon = if pod.has_sidecar { "🔒" } else { "🔓" };
            lines.push(format!(
                "        {} {} {} ({})",
                status_icon,
                mesh_icon,
                self.paint(Style::new().green(), &truncate(&pod.name, 45)),
                pod.readiness
            ));
            for container in &pod.containers {
                if container.name == SIDECAR_CONTAINER {
                    lines.push(format!(
                        "          🔒 {} (istio-proxy) - mTLS Sidecar",
                        container.name
                    ));
                } else {
                    lines.push(format!(
                        "          🎯 {} ({}) - Application",
                        truncate(&container.name, 20),
                        truncate(short_image(&container.image), 25)
                    ));
                }
            }
        }
    }

    fn security_panel(&self) -> String {
        let s = self.snapshot;
        let mtls = s.effective_mtls_mode();
        let gateway_tls = s.gateway_serves_tls();
        let body = vec![
            format!("mTLS Policy: {}", mtls),
            format!("Istio Sidecars: {}/{} pods", s.sidecar_pod_count(), s.pods.len()),
            format!(
                "Gateway TLS: {}",
                if gateway_tls { "✅ HTTPS" } else { "❌ HTTP Only" }
            ),
            format!(
                "Route TLS: {}",
                if s.route_tls_passthrough() {
                    "✅ Passthrough"
                } else {
                    "❌ No TLS"
                }
            ),
            format!("TLS Certificates: {}", s.tls_secrets.len()),
            format!("Security Policies: {}", s.peer_auth.len()),
            String::new(),
            "TLS Termination Points:".to_string(),
            "  🛣️  Router: Passthrough (no termination)".to_string(),
            format!(
                "  🚪 Gateway: {}",
                if gateway_tls { "HTTPS Termination" } else { "None" }
            ),
            format!("  🔒 Service Mesh: {} mTLS", mtls),
        ];
        self.panel("🔒 Security", &body)
    }

    fn statistics_panel(&self) -> String {
        let s = self.snapshot;
        let body = vec![
            format!("Routes: {}", s.routes.len()),
            format!("Gateways: {}", s.gateways.len()),
            format!("HTTPRoutes: {}", s.httproutes.len()),
            format!("Services: {}", s.services.len()),
            format!("Pods: {}", s.pods.len()),
            format!("Routing Rules: {}", s.total_rules()),
            format!("Containers: {}", s.total_containers()),
        ];
        self.panel("📈 Statistics", &body)
    }

    fn legend_panel(&self) -> String {
        let body = vec![
            "📡 External Traffic   🛣️  OpenShift Route   🚪 Gateway API".to_string(),
            "🔀 HTTPRoute          🎯 Service           🐳 Pod".to_string(),
            "⚡ LoadBalancer       🔒 TLS/mTLS          🔧 Istio Health".to_string(),
            "✅ Running/Ready      ❌ Failed/NotReady".to_string(),
        ];
        self.panel("🗂️  Legend", &body)
    }
}

/// Last path segment of an image ref, tag stripped.
fn short_image(image: &str) -> &str {
    let name = image.rsplit('/').next().unwrap_or(image);
    name.split(':').next().unwrap_or(name)
}
