use serde::{Deserialize, Serialize};

/// udhcpd running state. Ephemeral; re-fetched on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
}

impl ServiceStatus {
    pub const STOPPED: Self = Self { running: false };
}
