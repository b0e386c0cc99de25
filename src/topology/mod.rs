/*!
External topology/inventory datastore boundary.

This module defines:
- `source`: the async `TopologyDatastore` read interface (topology snapshot,
  node inventory, port statistics) and its `TopologyError` type.

Re-exports:
- `TopologyDatastore`, `TopologyError`, and `TopologyResult` for easy
  consumption by callers.
*/

pub mod source;

pub use source::{
    ConnectorRecord, NodeRecord, PortStats, TopologyDatastore, TopologyError, TopologyResult,
};
