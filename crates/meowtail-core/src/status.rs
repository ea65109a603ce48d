// ── Service status poller ──

use tracing::{debug, warn};

use meowtail_api::MeowtailClient;

use crate::model::ServiceStatus;

/// Queries udhcpd running state independently of config reloads.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    client: MeowtailClient,
}

impl StatusPoller {
    pub fn new(client: MeowtailClient) -> Self {
        Self { client }
    }

    /// Current running state. Every failure reads as "not running".
    pub async fn poll(&self) -> ServiceStatus {
        match self.client.dhcp_status().await {
            Ok(resp) => {
                let status = ServiceStatus::from(resp);
                debug!(running = status.running, "udhcpd status");
                status
            }
            Err(e) => {
                warn!(error = %e, "status query failed, assuming stopped");
                ServiceStatus::STOPPED
            }
        }
    }
}
