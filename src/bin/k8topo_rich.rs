// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Styled console report front-end with optional HTML export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use k8topo::collector::TopologyCollector;
use k8topo::config::{Config, DEFAULT_NAMESPACE};
use k8topo::progress::create_spinner;
use k8topo::render::{html, rich};

#[derive(Parser, Debug)]
#[command(name = "k8topo-rich")]
#[command(author, version, about = "Generate a styled Gateway API network topology report")]
struct Args {
    /// Kubernetes namespace to analyze
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate HTML output
    #[arg(long)]
    html: bool,
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
    let spinner = create_spinner("Collecting network topology data...");
    let snapshot = collector.collect_observed(|event| spinner.set_message(event.message()));
    spinner.finish_and_clear();

    // Files and HTML exports always get the plain rendering.
    let colors = args.output.is_none() && !args.html && console::colors_enabled();
    let report = rich::render(&snapshot, colors);
    let content = if args.html {
        html::document(&report)
    } else {
        report
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Network diagram saved to {}", path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}
