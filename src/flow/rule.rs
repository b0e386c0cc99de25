use serde::{Deserialize, Serialize};

use crate::graph::link::PortId;

/// Forwarding rules land in the first table.
pub const DEFAULT_TABLE_ID: u8 = 0;
pub const DEFAULT_PRIORITY: u16 = 1000;
pub const DEFAULT_HARD_TIMEOUT_SECS: u16 = 300;
/// Queue applied to application traffic before output.
pub const DEFAULT_QUEUE_ID: u32 = 1;
/// Base value for the per-rule cookie counter.
pub const COOKIE_BASE: u64 = 0x2a00_0000_0000_0000;

pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Match side of a forwarding rule. Prefixes are CIDR strings as the
/// downstream switch-protocol encoder expects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMatch {
    pub ipv4_source: Option<String>,
    pub ipv4_destination: Option<String>,
    pub ether_type: Option<u16>,
}

impl FlowMatch {
    /// IPv4 host-to-host match, ether type set accordingly.
    pub fn ipv4(source: impl Into<String>, destination: impl Into<String>) -> Self {
        FlowMatch {
            ipv4_source: Some(source.into()),
            ipv4_destination: Some(destination.into()),
            ether_type: Some(ETHERTYPE_IPV4),
        }
    }
}

/// Actions applied in order by the switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowAction {
    SetQueue(u32),
    Output(PortId),
}

/// A forwarding rule ready for submission to one switch. Plain data; the
/// wire encoding belongs to the switch-protocol layer behind `FlowSink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRule {
    pub id: String,
    pub table_id: u8,
    pub priority: u16,
    pub idle_timeout_secs: u16,
    pub hard_timeout_secs: u16,
    pub cookie: u64,
    pub match_fields: FlowMatch,
    pub actions: Vec<FlowAction>,
}

impl FlowRule {
    /// Rule forwarding matched traffic out of `egress`, queued on the
    /// default application queue first.
    pub fn forwarding(id: String, cookie: u64, match_fields: FlowMatch, egress: PortId) -> Self {
        FlowRule {
            id,
            table_id: DEFAULT_TABLE_ID,
            priority: DEFAULT_PRIORITY,
            idle_timeout_secs: 0,
            hard_timeout_secs: DEFAULT_HARD_TIMEOUT_SECS,
            cookie,
            match_fields,
            actions: vec![
                FlowAction::SetQueue(DEFAULT_QUEUE_ID),
                FlowAction::Output(egress),
            ],
        }
    }
}
