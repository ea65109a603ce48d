// Wire types for the appliance control API.
//
// Only the port-map endpoints and the status/login probes have a stable
// shape. The udhcpd config payload drifts between backend versions and is
// returned as raw `serde_json::Value` for `meowtail-core` to normalize.

use serde::{Deserialize, Serialize};

/// `GET /api/udhcpd/status` response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub running: bool,
}

/// Success body of any mutating endpoint.
///
/// Only the optional `status` string is ever read; everything else the
/// appliance sends back is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub status: Option<String>,
}

impl ActionResponse {
    /// The notification text, `"ok"` when the appliance sent none.
    pub fn status_or_ok(&self) -> &str {
        self.status.as_deref().unwrap_or("ok")
    }
}

/// Error body shape used by the appliance: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// `POST /login` response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// A port-mapping rule exactly as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PortMapRulePayload {
    pub protocol: String,
    pub external_port: u16,
    pub internal_ip: String,
    pub internal_port: u16,
}

/// `GET /api/portmap/config` response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortMapConfigResponse {
    #[serde(default)]
    pub external_interface: String,
    #[serde(default)]
    pub rules: Vec<PortMapRulePayload>,
}
