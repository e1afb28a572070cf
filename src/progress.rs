// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Progress reporting for the collection pass.
//!
//! Collection is synchronous, so progress is a plain observer callback:
//! the collector emits one event before and after each per-kind fetch and
//! the front-end decides how to display them.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner with consistent styling
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Progress update message
#[derive(Clone, Debug)]
pub enum CollectEvent {
    /// A per-kind fetch is starting
    Fetching { kind: &'static str },
    /// A per-kind fetch finished with this many records
    Fetched { kind: &'static str, count: usize },
}

impl CollectEvent {
    /// Short status line for spinner display
    pub fn message(&self) -> String {
        match self {
            CollectEvent::Fetching { kind } => format!("Collecting {}...", kind),
            CollectEvent::Fetched { kind, count } => {
                format!("{}: {} found", kind, count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetching_message() {
        let event = CollectEvent::Fetching { kind: "Routes" };
        assert_eq!(event.message(), "Collecting Routes...");
    }

    #[test]
    fn test_fetched_message() {
        let event = CollectEvent::Fetched {
            kind: "Pods",
            count: 4,
        };
        assert_eq!(event.message(), "Pods: 4 found");
    }

    #[test]
    fn test_event_clone_and_debug() {
        let event = CollectEvent::Fetching { kind: "Gateways" };
        let cloned = event.clone();
        let debug_str = format!("{:?}", cloned);
        assert!(debug_str.contains("Fetching"));
        assert!(debug_str.contains("Gateways"));
    }
}
