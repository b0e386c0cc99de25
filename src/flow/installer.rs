use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::flow::rule::{COOKIE_BASE, FlowMatch, FlowRule};
use crate::graph::link::NodeId;
use crate::graph::topology_graph::TopologyGraph;

#[derive(Debug, Clone, Error)]
pub enum FlowError {
    #[error("no path between {from} and {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("flow submission to {node} failed: {reason}")]
    Submission { node: NodeId, reason: String },
}

/// Submission boundary towards the switch protocol layer. Implementations
/// encode and deliver the rule; the installer never sees wire formats.
#[async_trait]
pub trait FlowSink: Send + Sync {
    async fn add_flow(&self, node: &NodeId, rule: FlowRule) -> Result<(), FlowError>;
}

/// Builds forwarding rules along a shortest path and submits them hop by
/// hop. Flow ids and cookies come from process-local counters.
pub struct FlowInstaller<S> {
    sink: S,
    next_flow_id: AtomicU64,
    next_cookie: AtomicU64,
}

impl<S: FlowSink> FlowInstaller<S> {
    pub fn new(sink: S) -> Self {
        FlowInstaller {
            sink,
            next_flow_id: AtomicU64::new(1),
            next_cookie: AtomicU64::new(COOKIE_BASE),
        }
    }

    /// Query the shortest path from `from` to `to` and install one
    /// forwarding rule per hop: each switch on the path outputs matched
    /// traffic on its egress port towards the next switch.
    ///
    /// Returns the number of rules installed. Stops at the first failed
    /// submission; rules already installed stay installed (they expire via
    /// their hard timeout).
    pub async fn install_path(
        &self,
        graph: &TopologyGraph,
        from: &NodeId,
        to: &NodeId,
        match_fields: FlowMatch,
    ) -> Result<usize, FlowError> {
        let path = graph.shortest_path(from, to).ok_or_else(|| FlowError::NoPath {
            from: from.clone(),
            to: to.clone(),
        })?;
        debug!(%from, %to, hops = path.len(), "installing path flows");

        let mut current = from.clone();
        let mut installed = 0usize;
        for link in &path {
            // The path chains from `from`, so every edge touches the cursor:
            // either it was reported from this side, or this side is its
            // destination.
            let (egress, next) = if link.source.node == current {
                (link.source.port.clone(), link.destination.node.clone())
            } else {
                (link.destination.port.clone(), link.source.node.clone())
            };

            let rule = self.next_rule(match_fields.clone(), egress);
            let rule_id = rule.id.clone();
            match self.sink.add_flow(&current, rule).await {
                Ok(()) => {
                    debug!(node = %current, rule = %rule_id, "flow submission succeeded");
                    installed += 1;
                }
                Err(e) => {
                    warn!(node = %current, rule = %rule_id, error = %e, "flow submission failed");
                    return Err(e);
                }
            }
            current = next;
        }

        info!(%from, %to, installed, "path flows installed");
        Ok(installed)
    }

    fn next_rule(&self, match_fields: FlowMatch, egress: crate::graph::link::PortId) -> FlowRule {
        let id = self.next_flow_id.fetch_add(1, Ordering::Relaxed);
        let cookie = self.next_cookie.fetch_add(1, Ordering::Relaxed);
        FlowRule::forwarding(format!("flowpath-{id}"), cookie, match_fields, egress)
    }
}
