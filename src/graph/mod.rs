/*!
In-memory topology graph and shortest-path state.

This module defines:
- `link`: the link/node/port data model and the canonical port-pair dedup key.
- `topology_graph`: `TopologyGraph`, the authoritative undirected multigraph
  with idempotent, deduplicating mutation under a single lock.
- `path_index`: `ShortestPathIndex`, the read-only shortest-path view bound
  to one committed graph snapshot.

Re-exports the types callers normally need.
*/

pub mod link;
pub mod path_index;
pub mod topology_graph;

pub use link::{Link, LinkEndpoint, LinkId, NodeId, PortId, PortPairKey};
pub use path_index::ShortestPathIndex;
pub use topology_graph::TopologyGraph;
