use serde::{Deserialize, Serialize};

/// Address pool handed out by udhcpd.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpRange {
    pub start: String,
    pub end: String,
}

/// A static lease. The MAC is the natural key; the appliance enforces
/// uniqueness, the client never deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    pub mac: String,
    pub ip: String,
}

/// Canonical udhcpd configuration.
///
/// Only ever produced by [`normalize`](crate::normalize::normalize) on
/// reload. Field values are passed through unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpConfig {
    pub range: DhcpRange,
    pub gateway: String,
    pub subnet: String,
    pub interface: String,
    pub dns_servers: Vec<String>,
    pub static_leases: Vec<Lease>,
}
