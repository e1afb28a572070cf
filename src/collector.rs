// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! One collection pass over the configured namespace.
//!
//! Fetches run sequentially in a fixed order, one external query per
//! kind. Any failure degrades that kind to an empty list; the pass always
//! completes and returns whatever subset of the topology it could read.

use serde_json::Value;

use crate::config::Config;
use crate::kubernetes::discovery::{
    GATEWAYS, HTTPROUTES, KindQuery, PEER_AUTH, PODS, ROUTES, SECRETS, SERVICES,
};
use crate::kubernetes::resources;
use crate::kubernetes::ClusterCli;
use crate::progress::CollectEvent;
use crate::snapshot::TopologySnapshot;

pub struct TopologyCollector {
    cli: ClusterCli,
    config: Config,
}

impl TopologyCollector {
    pub fn new(config: Config) -> Self {
        let cli = match &config.cli_program {
            Some(program) => ClusterCli::with_program(program),
            None => ClusterCli::resolve(),
        };
        Self { cli, config }
    }

    pub fn cli(&self) -> &ClusterCli {
        &self.cli
    }

    /// Collect the full topology without progress reporting.
    pub fn collect(&self) -> TopologySnapshot {
        self.collect_observed(|_| {})
    }

    /// Collect the full topology, emitting a [`CollectEvent`] before and
    /// after each per-kind fetch.
    pub fn collect_observed<F>(&self, mut observer: F) -> TopologySnapshot
    where
        F: FnMut(CollectEvent),
    {
        let mut snapshot = TopologySnapshot::empty(&self.config.namespace);

        let routes = self.fetch(&ROUTES, &mut observer, resources::routes_from_items);
        let gateways = self.fetch(&GATEWAYS, &mut observer, resources::gateways_from_items);
        let httproutes = self.fetch(&HTTPROUTES, &mut observer, resources::httproutes_from_items);
        let services = self.fetch(&SERVICES, &mut observer, resources::services_from_items);
        let pods = self.fetch(&PODS, &mut observer, resources::pods_from_items);
        let tls_secrets = self.fetch(&SECRETS, &mut observer, resources::tls_secrets_from_items);
        let peer_auth = self.fetch(&PEER_AUTH, &mut observer, resources::peer_auth_from_items);

        snapshot.routes = routes;
        snapshot.gateways = gateways;
        snapshot.httproutes = httproutes;
        snapshot.services = services;
        snapshot.pods = pods;
        snapshot.tls_secrets = tls_secrets;
        snapshot.peer_auth = peer_auth;
        snapshot
    }

    fn fetch<T, F>(
        &self,
        query: &KindQuery,
        observer: &mut F,
        parse: impl Fn(&[Value]) -> Vec<T>,
    ) -> Vec<T>
    where
        F: FnMut(CollectEvent),
    {
        observer(CollectEvent::Fetching { kind: query.label });
        let items = query.fetch(&self.cli, &self.config.namespace);
        let records = parse(&items);
        observer(CollectEvent::Fetched {
            kind: query.label,
            count: records.len(),
        });
        records
    }
}
