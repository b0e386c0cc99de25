/*!
Composition root of the path engine.

Owns the `TopologyGraph`, the datastore handle and the engine configuration.
The host constructs one `PathEngine` before any concurrent access begins and
passes handles to every consumer; there is no global instance.
*/

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::graph::link::{Link, NodeId};
use crate::graph::topology_graph::TopologyGraph;
use crate::topology::source::{TopologyDatastore, TopologyResult};

/// Engine configuration. Defaults match the conventional controller setup:
/// links whose id contains `host` are host-facing, and the operational
/// topology is published under `flow:1`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Marker token identifying host-facing links by their link id.
    pub host_link_marker: String,
    /// Identifier of the topology snapshot to read from the datastore.
    pub topology_id: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            host_link_marker: "host".to_string(),
            topology_id: "flow:1".to_string(),
        }
    }
}

/// Graph engine facade: initial bulk load, incremental ingest and path
/// queries over one shared `TopologyGraph`.
pub struct PathEngine<D> {
    datastore: D,
    graph: Arc<TopologyGraph>,
    config: EngineConfig,
}

impl<D: TopologyDatastore> PathEngine<D> {
    pub fn new(datastore: D) -> Self {
        Self::with_config(datastore, EngineConfig::default())
    }

    pub fn with_config(datastore: D, config: EngineConfig) -> Self {
        PathEngine {
            datastore,
            graph: Arc::new(TopologyGraph::new()),
            config,
        }
    }

    /// Shared handle to the graph, for consumers that query it directly
    /// (e.g. the flow installer).
    pub fn graph(&self) -> Arc<TopologyGraph> {
        Arc::clone(&self.graph)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Populate the graph from a full topology snapshot.
    ///
    /// Fetches first: a fetch failure is returned before any mutation, so
    /// the graph keeps its prior state. On success the graph is cleared and
    /// rebuilt from the host-filtered snapshot in one batch. Returns the
    /// number of infrastructure links submitted.
    pub async fn initialize(&self) -> TopologyResult<usize> {
        info!(topology = %self.config.topology_id, "initializing topology graph");
        let links = self.datastore.fetch_links(&self.config.topology_id).await?;
        let infrastructure = self.filter_infrastructure(links);

        self.graph.clear();
        if infrastructure.is_empty() {
            debug!("topology snapshot holds no infrastructure links");
            return Ok(0);
        }
        self.graph.add_links(&infrastructure);
        Ok(infrastructure.len())
    }

    /// Feed newly observed links into the graph incrementally. Host-facing
    /// links are dropped here under the same contract as `initialize`.
    /// Returns the number of links submitted after filtering.
    pub fn ingest_links(&self, links: Vec<Link>) -> usize {
        let infrastructure = self.filter_infrastructure(links);
        if infrastructure.is_empty() {
            debug!("no infrastructure links in observed batch");
            return 0;
        }
        self.graph.add_links(&infrastructure);
        infrastructure.len()
    }

    /// Shortest path between two switches, reflecting the most recently
    /// completed mutation. `None` for unknown or disconnected endpoints.
    pub fn shortest_path(&self, from: &NodeId, to: &NodeId) -> Option<Vec<Link>> {
        self.graph.shortest_path(from, to)
    }

    fn filter_infrastructure(&self, links: Vec<Link>) -> Vec<Link> {
        links
            .into_iter()
            .filter(|link| !link.is_host_link(&self.config.host_link_marker))
            .collect()
    }
}
