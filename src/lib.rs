/*!
flowpath — in-process path-engine core for an SDN controller.

Ingests network topology (switches and bidirectional links) from an external
datastore, builds an undirected in-memory multigraph with deduplicated link
reports, and answers shortest-path queries that downstream flow installation
uses to pick an egress path.

Structure:
- `graph`: the topology multigraph and its shortest-path snapshot index.
- `topology`: the async read interface to the topology/inventory datastore.
- `engine`: composition root wiring datastore, config and graph together.
- `flow`: forwarding-rule model and per-hop path installation.
- `registry`: registered application profiles (CRUD sidecar).
- `monitor`: node lookup by IP and per-port traffic metrics.
*/

pub mod engine;
pub mod flow;
pub mod graph;
pub mod monitor;
pub mod registry;
pub mod topology;

pub use engine::{EngineConfig, PathEngine};
pub use graph::{Link, LinkEndpoint, LinkId, NodeId, PortId, TopologyGraph};
pub use topology::{TopologyDatastore, TopologyError};
