// Port-mapping endpoints.

use serde_json::json;

use crate::client::MeowtailClient;
use crate::error::Error;
use crate::models::{ActionResponse, PortMapConfigResponse, PortMapRulePayload};

const BASE: &str = "/api/portmap";

impl MeowtailClient {
    pub async fn portmap_config(&self) -> Result<PortMapConfigResponse, Error> {
        self.get(&format!("{BASE}/config")).await
    }

    pub async fn add_portmap_rule(
        &self,
        rule: &PortMapRulePayload,
    ) -> Result<ActionResponse, Error> {
        self.post(&format!("{BASE}/rule"), rule).await
    }

    /// Delete a rule. Rules carry no id: the appliance removes the stored
    /// rule equal to the body on all four fields.
    pub async fn delete_portmap_rule(
        &self,
        rule: &PortMapRulePayload,
    ) -> Result<ActionResponse, Error> {
        self.delete(&format!("{BASE}/rule"), rule).await
    }

    /// Set the WAN-side interface that rules are bound to.
    pub async fn set_portmap_interface(&self, interface: &str) -> Result<ActionResponse, Error> {
        self.post(
            &format!("{BASE}/interface"),
            &json!({ "interface": interface }),
        )
        .await
    }
}
