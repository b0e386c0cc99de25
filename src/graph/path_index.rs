use std::collections::{HashMap, VecDeque};

use crate::graph::link::{Link, NodeId};

/// Read-only shortest-path view over one graph snapshot.
///
/// Built from the committed vertex/edge set at the end of every mutating
/// batch; a handle to an index answers queries against exactly that snapshot,
/// never a newer or half-applied one.
///
/// Paths are uniform-cost (every edge weighs 1, no per-link metric is
/// modeled). Among equal-cost paths the choice is deterministic: the index
/// returns the path whose node sequence is lexicographically smallest by
/// node id, with parallel edges between the same pair resolved by the
/// smaller link id. Hop distances are computed breadth-first from the
/// destination, then the path is walked forward, always stepping to the
/// first neighbor (in sorted `(node id, link id)` order) that lies one hop
/// closer — so each position in the sequence is minimized in turn.
#[derive(Debug, Default)]
pub struct ShortestPathIndex {
    adjacency: HashMap<NodeId, Vec<(NodeId, Link)>>,
}

impl ShortestPathIndex {
    /// Index over the empty graph; every query answers `None`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Recompute the index from a snapshot of vertices and undirected edges.
    ///
    /// Pure function of its input: vertices without edges still become
    /// entries (they are present, just unreachable), and neighbor lists are
    /// sorted so traversal order is a property of the data, not of hash
    /// iteration.
    pub fn build<'a>(
        nodes: impl Iterator<Item = &'a NodeId>,
        links: impl Iterator<Item = &'a Link>,
    ) -> Self {
        let mut adjacency: HashMap<NodeId, Vec<(NodeId, Link)>> = HashMap::new();
        for node in nodes {
            adjacency.entry(node.clone()).or_default();
        }
        for link in links {
            adjacency
                .entry(link.source.node.clone())
                .or_default()
                .push((link.destination.node.clone(), link.clone()));
            adjacency
                .entry(link.destination.node.clone())
                .or_default()
                .push((link.source.node.clone(), link.clone()));
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_by(|(n1, l1), (n2, l2)| n1.cmp(n2).then_with(|| l1.id.cmp(&l2.id)));
        }
        ShortestPathIndex { adjacency }
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Shortest path from `from` to `to` as the ordered sequence of edges.
    ///
    /// `None` when either endpoint is absent or the endpoints lie in
    /// disconnected components; `Some(vec![])` when both name the same
    /// present vertex.
    pub fn path_between(&self, from: &NodeId, to: &NodeId) -> Option<Vec<Link>> {
        let (from, _) = self.adjacency.get_key_value(from)?;
        let (to, _) = self.adjacency.get_key_value(to)?;
        if from == to {
            return Some(Vec::new());
        }

        // Hop counts towards the destination; unreachable vertices are
        // absent from the map.
        let remaining_hops = self.hop_distances(to);
        let total = *remaining_hops.get(from)?;

        // Forward walk: at every position take the smallest neighbor that
        // still lies on a shortest path, i.e. is one hop closer to `to`.
        // Such a neighbor exists at every step by construction of the hop
        // counts.
        let mut path = Vec::with_capacity(total);
        let mut current = from;
        let mut remaining = total;
        while remaining > 0 {
            let (next, link) = self.adjacency[current]
                .iter()
                .find(|(neighbor, _)| remaining_hops.get(neighbor) == Some(&(remaining - 1)))?;
            path.push(link.clone());
            current = next;
            remaining -= 1;
        }
        Some(path)
    }

    /// Breadth-first hop counts from `origin` over the undirected snapshot.
    fn hop_distances<'a>(&'a self, origin: &'a NodeId) -> HashMap<&'a NodeId, usize> {
        let mut dist: HashMap<&'a NodeId, usize> = HashMap::new();
        let mut queue: VecDeque<&'a NodeId> = VecDeque::new();
        dist.insert(origin, 0);
        queue.push_back(origin);
        while let Some(node) = queue.pop_front() {
            let d = dist[node];
            for (neighbor, _) in &self.adjacency[node] {
                if !dist.contains_key(neighbor) {
                    dist.insert(neighbor, d + 1);
                    queue.push_back(neighbor);
                }
            }
        }
        dist
    }
}
