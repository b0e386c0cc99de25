use std::net::IpAddr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::link::{Link, NodeId, PortId};

/// Failure surfaced by datastore reads. Recoverable: the caller keeps its
/// last-known state and may retry.
#[derive(Debug, Clone, Error)]
pub enum TopologyError {
    /// The topology snapshot could not be read.
    #[error("topology fetch failed: {0}")]
    Fetch(String),
    /// Any other datastore read failed (node inventory, port statistics).
    #[error("datastore read failed: {0}")]
    Datastore(String),
}

/// Convenience result alias for datastore operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// An inventory record for one switch: its id and the connectors it exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub connectors: Vec<ConnectorRecord>,
}

/// One connector of a switch and the addresses learned on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorRecord {
    pub port: PortId,
    #[serde(default)]
    pub addresses: Vec<IpAddr>,
}

/// Traffic counters for one connector, as maintained by the datastore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortStats {
    pub packets_transmitted: u64,
    pub packets_received: u64,
    pub transmit_errors: u64,
    pub receive_errors: u64,
    /// Current port speed in kbit/s.
    pub current_speed_kbps: u64,
}

impl PortStats {
    /// Transmit error ratio; 0.0 when nothing was transmitted yet.
    pub fn packet_loss(&self) -> f64 {
        if self.packets_transmitted == 0 {
            0.0
        } else {
            self.transmit_errors as f64 / self.packets_transmitted as f64
        }
    }
}

/// Read-only view of the controller's topology/inventory datastore.
///
/// Adapters encapsulate how the records are actually obtained; this trait is
/// the only place the core may block on I/O. Graph operations themselves are
/// pure in-memory computation.
#[async_trait]
pub trait TopologyDatastore: Send + Sync {
    /// Current topology snapshot: every reported link, host-facing ones
    /// included. Filtering happens in the caller.
    async fn fetch_links(&self, topology_id: &str) -> TopologyResult<Vec<Link>>;

    /// Inventory records for all known switches.
    async fn fetch_nodes(&self) -> TopologyResult<Vec<NodeRecord>>;

    /// Inventory record for one switch. Adapters with a keyed read should
    /// override this; the default scans the full inventory.
    async fn fetch_node(&self, node: &NodeId) -> TopologyResult<Option<NodeRecord>> {
        Ok(self
            .fetch_nodes()
            .await?
            .into_iter()
            .find(|record| record.id == *node))
    }

    /// Traffic counters for one connector; `None` when the datastore has no
    /// record for it.
    async fn fetch_port_stats(
        &self,
        node: &NodeId,
        port: &PortId,
    ) -> TopologyResult<Option<PortStats>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_loss_guards_division_by_zero() {
        let idle = PortStats::default();
        assert_eq!(idle.packet_loss(), 0.0);

        let lossy = PortStats {
            packets_transmitted: 200,
            transmit_errors: 50,
            ..PortStats::default()
        };
        assert_eq!(lossy.packet_loss(), 0.25);
    }

    #[tokio::test]
    async fn test_fetch_node_default_scans_inventory() {
        struct TwoSwitchStore;

        #[async_trait]
        impl TopologyDatastore for TwoSwitchStore {
            async fn fetch_links(&self, _topology_id: &str) -> TopologyResult<Vec<Link>> {
                Ok(Vec::new())
            }

            async fn fetch_nodes(&self) -> TopologyResult<Vec<NodeRecord>> {
                Ok(vec![
                    NodeRecord {
                        id: NodeId::new("openflow:1"),
                        connectors: Vec::new(),
                    },
                    NodeRecord {
                        id: NodeId::new("openflow:2"),
                        connectors: Vec::new(),
                    },
                ])
            }

            async fn fetch_port_stats(
                &self,
                _node: &NodeId,
                _port: &PortId,
            ) -> TopologyResult<Option<PortStats>> {
                Ok(None)
            }
        }

        let store = TwoSwitchStore;
        let found = store.fetch_node(&NodeId::new("openflow:2")).await.unwrap();
        assert_eq!(found.map(|r| r.id), Some(NodeId::new("openflow:2")));
        let missing = store.fetch_node(&NodeId::new("openflow:9")).await.unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_node_record_deserialization() {
        let json = r#"{
            "id": "openflow:1",
            "connectors": [
                { "port": "openflow:1:1", "addresses": ["10.0.0.1"] },
                { "port": "openflow:1:2" }
            ]
        }"#;
        let record: NodeRecord = serde_json::from_str(json).expect("failed to deserialize record");
        assert_eq!(record.id.as_str(), "openflow:1");
        assert_eq!(record.connectors.len(), 2);
        assert_eq!(record.connectors[0].addresses.len(), 1);
        assert!(record.connectors[1].addresses.is_empty());
    }
}
