use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableUnGraph;
use tracing::{debug, info, warn};

use crate::graph::link::{Link, NodeId, PortPairKey};
use crate::graph::path_index::ShortestPathIndex;

/// Mutable graph state: vertex set, edge multiset and the dedup-key set,
/// always updated together under the mutation lock.
///
/// Invariants (maintained solely by the mutation path, never re-checked at
/// query time): every edge's endpoints exist as vertices, and a port-pair key
/// is recorded if and only if a corresponding edge exists.
#[derive(Debug, Default)]
struct GraphState {
    graph: StableUnGraph<NodeId, Link>,
    node_index: HashMap<NodeId, NodeIndex>,
    seen_keys: HashSet<PortPairKey>,
}

impl GraphState {
    /// Idempotent vertex insert keyed by node id.
    fn intern_node(&mut self, node: &NodeId) -> NodeIndex {
        match self.node_index.get(node) {
            Some(&index) => index,
            None => {
                let index = self.graph.add_node(node.clone());
                self.node_index.insert(node.clone(), index);
                index
            }
        }
    }

    fn clear(&mut self) {
        self.graph = StableUnGraph::default();
        self.node_index.clear();
        self.seen_keys.clear();
    }

    fn build_index(&self) -> ShortestPathIndex {
        ShortestPathIndex::build(self.graph.node_weights(), self.graph.edge_weights())
    }
}

/// The authoritative in-memory topology: an undirected multigraph of switches
/// keyed by opaque node ids, with link submissions deduplicated on the
/// canonical port pair.
///
/// Mutations (`add_links`, `clear`) serialize on one lock and republish the
/// shortest-path snapshot before returning, so a query started after a
/// mutation returns always sees that mutation. Queries clone the published
/// `Arc` snapshot and run lock-free against it; they are never blocked by an
/// index rebuild.
#[derive(Debug, Default)]
pub struct TopologyGraph {
    state: Mutex<GraphState>,
    index: RwLock<Arc<ShortestPathIndex>>,
}

impl TopologyGraph {
    pub fn new() -> Self {
        TopologyGraph::default()
    }

    /// Reset to the empty graph and publish an empty path index. Used before
    /// a full topology reload.
    pub fn clear(&self) {
        let mut state = self.state.lock().expect("graph mutation lock poisoned");
        state.clear();
        self.publish(&state);
        info!("cleared topology graph");
    }

    /// Feed a batch of candidate infrastructure links into the graph.
    ///
    /// Host-facing links are excluded upstream; each remaining link is
    /// deduplicated on its canonical port pair (resubmission of a known
    /// physical edge is a no-op), endpoints are interned idempotently and the
    /// edge is added undirected. Malformed links are skipped and logged,
    /// never an error. The path index is rebuilt once per batch, so callers
    /// should batch links rather than calling once per link.
    pub fn add_links(&self, links: &[Link]) {
        if links.is_empty() {
            debug!("no links in batch, graph unchanged");
            return;
        }

        let mut state = self.state.lock().expect("graph mutation lock poisoned");
        let mut added = 0usize;
        let mut deduplicated = 0usize;
        for link in links {
            if !link.is_well_formed() {
                warn!(link = %link.id, "skipping malformed link");
                continue;
            }
            let key = link.port_pair_key();
            if state.seen_keys.contains(&key) {
                deduplicated += 1;
                continue;
            }
            let source = state.intern_node(&link.source.node);
            let destination = state.intern_node(&link.destination.node);
            state.graph.add_edge(source, destination, link.clone());
            state.seen_keys.insert(key);
            added += 1;
        }
        self.publish(&state);
        info!(
            added,
            deduplicated,
            nodes = state.graph.node_count(),
            edges = state.graph.edge_count(),
            "applied link batch"
        );
    }

    /// Shortest path between two switches as the ordered edge sequence, or
    /// `None` when either is unknown or no path connects them. Reflects the
    /// most recently completed mutation.
    pub fn shortest_path(&self, from: &NodeId, to: &NodeId) -> Option<Vec<Link>> {
        self.path_index().path_between(from, to)
    }

    /// Handle to the currently published shortest-path snapshot. All queries
    /// on the returned index see one consistent edge set.
    pub fn path_index(&self) -> Arc<ShortestPathIndex> {
        self.index.read().expect("path index lock poisoned").clone()
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.path_index().contains(node)
    }

    pub fn node_count(&self) -> usize {
        self.state.lock().expect("graph mutation lock poisoned").graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().expect("graph mutation lock poisoned").graph.edge_count()
    }

    /// Snapshot of the current vertex set.
    pub fn nodes(&self) -> Vec<NodeId> {
        let state = self.state.lock().expect("graph mutation lock poisoned");
        state.graph.node_weights().cloned().collect()
    }

    /// Snapshot of the current edge multiset.
    pub fn links(&self) -> Vec<Link> {
        let state = self.state.lock().expect("graph mutation lock poisoned");
        state.graph.edge_weights().cloned().collect()
    }

    // Caller holds the mutation lock, so snapshots are published in mutation
    // order.
    fn publish(&self, state: &GraphState) {
        let index = Arc::new(state.build_index());
        *self.index.write().expect("path index lock poisoned") = index;
    }
}
