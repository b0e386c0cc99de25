use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Opaque switch identifier as reported by the topology feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque port (node connector) identifier, e.g. `openflow:1:2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(pub String);

impl PortId {
    pub fn new(id: impl Into<String>) -> Self {
        PortId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a reported link. Distinct link ids may describe the same
/// physical edge; deduplication happens on the port pair, not on this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub String);

impl LinkId {
    pub fn new(id: impl Into<String>) -> Self {
        LinkId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One end of a reported link: the switch and the connector it terminates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkEndpoint {
    pub node: NodeId,
    pub port: PortId,
}

impl LinkEndpoint {
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        LinkEndpoint {
            node: NodeId::new(node),
            port: PortId::new(port),
        }
    }
}

/// A link as reported by the topology source. Directed on the wire, treated
/// as undirected by the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub source: LinkEndpoint,
    pub destination: LinkEndpoint,
}

impl Link {
    pub fn new(id: impl Into<String>, source: LinkEndpoint, destination: LinkEndpoint) -> Self {
        Link {
            id: LinkId::new(id),
            source,
            destination,
        }
    }

    /// True when the link id carries the host-facing marker token. Such links
    /// connect a switch to an end host and never enter the graph.
    pub fn is_host_link(&self, marker: &str) -> bool {
        self.id.0.contains(marker)
    }

    /// A link with any empty identifier field cannot be keyed or wired into
    /// the graph; it is skipped by the mutation path.
    pub fn is_well_formed(&self) -> bool {
        !self.id.0.is_empty()
            && !self.source.node.0.is_empty()
            && !self.source.port.0.is_empty()
            && !self.destination.node.0.is_empty()
            && !self.destination.port.0.is_empty()
    }

    pub fn port_pair_key(&self) -> PortPairKey {
        PortPairKey::new(&self.source.port, &self.destination.port)
    }

    /// The connector this link uses on `node`, if `node` is one of its
    /// endpoints.
    pub fn port_on(&self, node: &NodeId) -> Option<&PortId> {
        if self.source.node == *node {
            Some(&self.source.port)
        } else if self.destination.node == *node {
            Some(&self.destination.port)
        } else {
            None
        }
    }

    /// The endpoint opposite to `node`, if `node` is one of its endpoints.
    pub fn opposite(&self, node: &NodeId) -> Option<&NodeId> {
        if self.source.node == *node {
            Some(&self.destination.node)
        } else if self.destination.node == *node {
            Some(&self.source.node)
        } else {
            None
        }
    }
}

/// Canonical, side-independent key for the port pair of a link.
///
/// The two port ids are ordered lexicographically (byte order of the id
/// strings), so `(x, y)` and `(y, x)` produce the same key on every run and
/// platform. Two links reporting the same physical ports collapse onto one
/// key regardless of which side each report labels as source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortPairKey {
    a: PortId,
    b: PortId,
}

impl PortPairKey {
    pub fn new(x: &PortId, y: &PortId) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        PortPairKey {
            a: a.clone(),
            b: b.clone(),
        }
    }

    pub fn ports(&self) -> (&PortId, &PortId) {
        (&self.a, &self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, src_node: &str, src_port: &str, dst_node: &str, dst_port: &str) -> Link {
        Link::new(
            id,
            LinkEndpoint::new(src_node, src_port),
            LinkEndpoint::new(dst_node, dst_port),
        )
    }

    #[test]
    fn test_port_pair_key_is_side_independent() {
        let forward = link("l1", "s1", "s1:1", "s2", "s2:1");
        let reverse = link("l2", "s2", "s2:1", "s1", "s1:1");
        assert_eq!(forward.port_pair_key(), reverse.port_pair_key());
    }

    #[test]
    fn test_port_pair_key_orders_lexicographically() {
        let key = PortPairKey::new(&PortId::new("s2:1"), &PortId::new("s1:1"));
        let (a, b) = key.ports();
        assert_eq!(a.as_str(), "s1:1");
        assert_eq!(b.as_str(), "s2:1");
    }

    #[test]
    fn test_distinct_port_pairs_get_distinct_keys() {
        let first = link("l1", "s1", "s1:1", "s2", "s2:1");
        let parallel = link("l2", "s1", "s1:2", "s2", "s2:2");
        assert_ne!(first.port_pair_key(), parallel.port_pair_key());
    }

    #[test]
    fn test_host_link_marker() {
        let host = link("host:00:00:00:00:00:01/s1", "h1", "h1:1", "s1", "s1:3");
        let infra = link("link:s1:1-s2:1", "s1", "s1:1", "s2", "s2:1");
        assert!(host.is_host_link("host"));
        assert!(!infra.is_host_link("host"));
    }

    #[test]
    fn test_well_formedness() {
        let ok = link("l1", "s1", "s1:1", "s2", "s2:1");
        let missing_port = link("l2", "s1", "", "s2", "s2:1");
        let missing_node = link("l3", "s1", "s1:1", "", "s2:1");
        assert!(ok.is_well_formed());
        assert!(!missing_port.is_well_formed());
        assert!(!missing_node.is_well_formed());
    }

    #[test]
    fn test_orientation_helpers() {
        let l = link("l1", "s1", "s1:1", "s2", "s2:1");
        let s1 = NodeId::new("s1");
        let s2 = NodeId::new("s2");
        let s3 = NodeId::new("s3");
        assert_eq!(l.port_on(&s1), Some(&PortId::new("s1:1")));
        assert_eq!(l.port_on(&s2), Some(&PortId::new("s2:1")));
        assert_eq!(l.port_on(&s3), None);
        assert_eq!(l.opposite(&s1), Some(&s2));
        assert_eq!(l.opposite(&s3), None);
    }

    #[test]
    fn test_link_deserialization() {
        let json = r#"{
            "id": "link:s1:1-s2:1",
            "source": { "node": "openflow:1", "port": "openflow:1:1" },
            "destination": { "node": "openflow:2", "port": "openflow:2:1" }
        }"#;
        let l: Link = serde_json::from_str(json).expect("failed to deserialize link");
        assert_eq!(l.id.as_str(), "link:s1:1-s2:1");
        assert_eq!(l.source.node.as_str(), "openflow:1");
        assert_eq!(l.destination.port.as_str(), "openflow:2:1");
    }
}
