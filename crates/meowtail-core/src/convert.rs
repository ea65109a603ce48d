// ── Wire ↔ domain conversions ──
//
// Port-map and status payloads have a stable shape and convert directly.
// The udhcpd config does not; see `crate::normalize`.

use tracing::debug;

use meowtail_api::{PortMapConfigResponse, PortMapRulePayload, StatusResponse};

use crate::model::{PortMapConfig, PortMapRule, Protocol, ServiceStatus};

impl From<&PortMapRule> for PortMapRulePayload {
    fn from(rule: &PortMapRule) -> Self {
        Self {
            protocol: rule.protocol.as_str().to_owned(),
            external_port: rule.external_port,
            internal_ip: rule.internal_ip.clone(),
            internal_port: rule.internal_port,
        }
    }
}

impl From<PortMapRulePayload> for PortMapRule {
    fn from(p: PortMapRulePayload) -> Self {
        Self {
            protocol: Protocol::from(p.protocol),
            external_port: p.external_port,
            internal_ip: p.internal_ip,
            internal_port: p.internal_port,
        }
    }
}

/// Every stored rule is kept, including ones whose protocol is not
/// `tcp`/`udp`; they stay deletable by their exact body.
impl From<PortMapConfigResponse> for PortMapConfig {
    fn from(resp: PortMapConfigResponse) -> Self {
        let rules: Vec<PortMapRule> = resp.rules.into_iter().map(PortMapRule::from).collect();
        for rule in rules.iter().filter(|r| !r.protocol.is_known()) {
            debug!(protocol = %rule.protocol, port = rule.external_port, "rule with non-standard protocol");
        }

        Self {
            external_interface: resp.external_interface,
            rules,
        }
    }
}

impl From<StatusResponse> for ServiceStatus {
    fn from(resp: StatusResponse) -> Self {
        Self {
            running: resp.running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(protocol: &str) -> PortMapRulePayload {
        PortMapRulePayload {
            protocol: protocol.into(),
            external_port: 8080,
            internal_ip: "192.168.1.100".into(),
            internal_port: 80,
        }
    }

    #[test]
    fn rule_round_trips_exactly_as_held() {
        let rule = PortMapRule::from(payload("udp"));
        assert_eq!(rule.protocol, Protocol::Udp);
        assert_eq!(PortMapRulePayload::from(&rule), payload("udp"));
    }

    #[test]
    fn non_standard_protocols_are_kept_verbatim() {
        let config = PortMapConfig::from(PortMapConfigResponse {
            external_interface: "eth0".into(),
            rules: vec![payload("tcp"), payload("sctp"), payload("TCP"), payload("udp")],
        });
        assert_eq!(config.external_interface, "eth0");
        assert_eq!(
            config.rules.iter().map(|r| r.protocol.clone()).collect::<Vec<_>>(),
            vec![
                Protocol::Tcp,
                Protocol::Other("sctp".into()),
                Protocol::Other("TCP".into()),
                Protocol::Udp,
            ]
        );

        // Sent back exactly as the appliance stored it.
        assert_eq!(PortMapRulePayload::from(&config.rules[2]), payload("TCP"));
    }

    #[test]
    fn protocol_displays_wire_spelling() {
        assert_eq!(Protocol::Tcp.to_string(), "tcp");
        assert_eq!(Protocol::Other("TCP".into()).to_string(), "TCP");
        assert_eq!(
            serde_json::to_value(Protocol::Other("sctp".into())).expect("serializes"),
            serde_json::json!("sctp")
        );
    }
}
