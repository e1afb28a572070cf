// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Plain ASCII topology diagram front-end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use k8topo::collector::TopologyCollector;
use k8topo::config::{Config, DEFAULT_NAMESPACE};
use k8topo::render::ascii;

#[derive(Parser, Debug)]
#[command(name = "k8topo")]
#[command(author, version, about = "Generate a Gateway API network topology diagram")]
struct Args {
    /// Kubernetes namespace to analyze
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("k8topo=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let collector = TopologyCollector::new(Config::new(&args.namespace));
    eprintln!("🔍 Collecting network topology data...");
    let snapshot = collector.collect();
    eprintln!(
        "✅ Found: {} routes, {} gateways, {} httproutes, {} services, {} pods",
        snapshot.routes.len(),
        snapshot.gateways.len(),
        snapshot.httproutes.len(),
        snapshot.services.len(),
        snapshot.pods.len()
    );

    let report = ascii::render(&snapshot);
    match &args.output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write diagram to {}", path.display()))?;
            println!("✅ Network diagram saved to {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}
