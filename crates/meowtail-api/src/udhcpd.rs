// udhcpd endpoints: service lifecycle, raw config, single-field mutations.
//
// The config payload is returned untyped; its field names and value types
// vary between appliance firmware builds.

use serde_json::{Value, json};

use crate::client::MeowtailClient;
use crate::error::Error;
use crate::models::{ActionResponse, StatusResponse};

const BASE: &str = "/api/udhcpd";

impl MeowtailClient {
    // ── Service lifecycle ────────────────────────────────────────────

    pub async fn dhcp_status(&self) -> Result<StatusResponse, Error> {
        self.get(&format!("{BASE}/status")).await
    }

    pub async fn dhcp_start(&self) -> Result<ActionResponse, Error> {
        self.post(&format!("{BASE}/start"), &json!({})).await
    }

    pub async fn dhcp_stop(&self) -> Result<ActionResponse, Error> {
        self.post(&format!("{BASE}/stop"), &json!({})).await
    }

    pub async fn dhcp_restart(&self) -> Result<ActionResponse, Error> {
        self.post(&format!("{BASE}/restart"), &json!({})).await
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Fetch the raw config document. An empty body yields `Value::Null`.
    pub async fn dhcp_config(&self) -> Result<Value, Error> {
        self.get(&format!("{BASE}/config")).await
    }

    pub async fn set_dhcp_range(&self, start: &str, end: &str) -> Result<ActionResponse, Error> {
        self.post(
            &format!("{BASE}/config/range"),
            &json!({ "start": start, "end": end }),
        )
        .await
    }

    pub async fn set_dhcp_gateway(&self, gateway: &str) -> Result<ActionResponse, Error> {
        self.post(
            &format!("{BASE}/config/gateway"),
            &json!({ "gateway": gateway }),
        )
        .await
    }

    pub async fn set_dhcp_subnet(&self, subnet: &str) -> Result<ActionResponse, Error> {
        self.post(&format!("{BASE}/config/subnet"), &json!({ "subnet": subnet }))
            .await
    }

    pub async fn set_dhcp_interface(&self, interface: &str) -> Result<ActionResponse, Error> {
        self.post(
            &format!("{BASE}/config/interface"),
            &json!({ "interface": interface }),
        )
        .await
    }

    /// Replace the whole DNS server list. An empty slice clears it.
    pub async fn set_dhcp_dns(&self, servers: &[String]) -> Result<ActionResponse, Error> {
        self.post(&format!("{BASE}/config/dns"), &json!({ "servers": servers }))
            .await
    }

    // ── Static leases ────────────────────────────────────────────────

    pub async fn add_dhcp_lease(&self, mac: &str, ip: &str) -> Result<ActionResponse, Error> {
        self.post(
            &format!("{BASE}/config/lease"),
            &json!({ "mac": mac, "ip": ip }),
        )
        .await
    }

    /// Remove a static lease, addressed by MAC in the request body.
    pub async fn remove_dhcp_lease(&self, mac: &str) -> Result<ActionResponse, Error> {
        self.delete(&format!("{BASE}/config/lease"), &json!({ "mac": mac }))
            .await
    }
}
