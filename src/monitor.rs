/*!
Node lookup and per-port traffic metrics.

Thin read-side consumer of the datastore: resolves which switch owns an IP
address and derives packet-loss/bandwidth figures from raw port counters.
*/

use std::net::IpAddr;

use tracing::{debug, info};

use crate::graph::link::{NodeId, PortId};
use crate::topology::source::{NodeRecord, TopologyDatastore, TopologyResult};

/// Metrics derived from one connector's counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortMetrics {
    /// Transmit error ratio, 0.0 when nothing was transmitted.
    pub packet_loss: f64,
    /// Current port speed in kbit/s.
    pub bandwidth_kbps: u64,
}

/// Read-side monitor over the inventory datastore.
pub struct NodeMonitor<D> {
    datastore: D,
}

impl<D: TopologyDatastore> NodeMonitor<D> {
    pub fn new(datastore: D) -> Self {
        NodeMonitor { datastore }
    }

    /// The switch owning a connector on which `ip` was learned, or `None`
    /// when no switch reports that address.
    pub async fn find_node_by_ip(&self, ip: IpAddr) -> TopologyResult<Option<NodeRecord>> {
        debug!(%ip, "looking up node by address");
        let nodes = self.datastore.fetch_nodes().await?;
        for record in nodes {
            let owns_ip = record
                .connectors
                .iter()
                .any(|connector| connector.addresses.contains(&ip));
            if owns_ip {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Packet loss and bandwidth for one connector; `None` when the
    /// datastore has no counters for it.
    pub async fn port_metrics(
        &self,
        node: &NodeId,
        port: &PortId,
    ) -> TopologyResult<Option<PortMetrics>> {
        let Some(stats) = self.datastore.fetch_port_stats(node, port).await? else {
            return Ok(None);
        };
        let metrics = PortMetrics {
            packet_loss: stats.packet_loss(),
            bandwidth_kbps: stats.current_speed_kbps,
        };
        info!(
            %node,
            %port,
            packet_loss = metrics.packet_loss,
            bandwidth_kbps = metrics.bandwidth_kbps,
            "measured port metrics"
        );
        Ok(Some(metrics))
    }
}
