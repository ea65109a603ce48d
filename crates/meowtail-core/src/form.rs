// ── Form view-models ──
//
// Plain mutable structs standing in for the edit surface. Each submit path
// calls a pure validation function first; nothing is sent when it fails.

use serde::Serialize;

use crate::error::CoreError;
use crate::model::{DhcpConfig, PortMapConfig, PortMapRule, Protocol};
use crate::slots::DnsSlots;

/// Editable udhcpd settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DhcpForm {
    pub range_start: String,
    pub range_end: String,
    pub gateway: String,
    pub subnet: String,
    pub interface: String,
    pub dns: DnsSlots,
    /// New-lease inputs. Untouched by reload, cleared after a successful add.
    pub lease_mac: String,
    pub lease_ip: String,
}

impl DhcpForm {
    /// Overwrite every config-backed field from the canonical config.
    pub fn rebuild(&mut self, config: &DhcpConfig) {
        self.range_start.clone_from(&config.range.start);
        self.range_end.clone_from(&config.range.end);
        self.gateway.clone_from(&config.gateway);
        self.subnet.clone_from(&config.subnet);
        self.interface.clone_from(&config.interface);
        self.dns.replace_all(&config.dns_servers);
    }

    pub fn reset_lease(&mut self) {
        self.lease_mac.clear();
        self.lease_ip.clear();
    }
}

/// Draft of a new port-mapping rule, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDraft {
    pub protocol: String,
    pub external_port: String,
    pub internal_ip: String,
    pub internal_port: String,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            protocol: Protocol::Tcp.to_string(),
            external_port: "8080".into(),
            internal_ip: "192.168.1.100".into(),
            internal_port: "80".into(),
        }
    }
}

/// Editable port-mapping settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortMapForm {
    pub draft: RuleDraft,
    pub interface: String,
}

impl PortMapForm {
    pub fn rebuild(&mut self, config: &PortMapConfig) {
        self.interface.clone_from(&config.external_interface);
    }

    pub fn reset_draft(&mut self) {
        self.draft = RuleDraft::default();
    }
}

// ── Validation ───────────────────────────────────────────────────────

/// Reject a blank required field. The value is returned untrimmed.
pub fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::ValidationFailed {
            message: format!("{field} is required"),
        })
    } else {
        Ok(value)
    }
}

/// Field-level checks for a new rule: protocol in {tcp, udp}, ports in
/// 1..=65535. The internal IP is free-form but required. Cross-rule
/// uniqueness is left to the appliance.
pub fn validate_rule(draft: &RuleDraft) -> Result<PortMapRule, CoreError> {
    let protocol = Protocol::from(draft.protocol.trim().to_ascii_lowercase());
    if !protocol.is_known() {
        return Err(CoreError::ValidationFailed {
            message: format!("protocol must be tcp or udp, got {:?}", draft.protocol),
        });
    }

    Ok(PortMapRule {
        protocol,
        external_port: port("external port", &draft.external_port)?,
        internal_ip: require("internal IP", &draft.internal_ip)?.trim().to_owned(),
        internal_port: port("internal port", &draft.internal_port)?,
    })
}

fn port(field: &str, value: &str) -> Result<u16, CoreError> {
    match value.trim().parse::<u16>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(CoreError::ValidationFailed {
            message: format!("{field} must be an integer between 1 and 65535, got {value:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DhcpRange, Lease};

    #[test]
    fn default_draft() {
        let rule = validate_rule(&RuleDraft::default()).expect("default draft is valid");
        assert_eq!(rule.protocol, Protocol::Tcp);
        assert_eq!(rule.external_port, 8080);
        assert_eq!(rule.internal_ip, "192.168.1.100");
        assert_eq!(rule.internal_port, 80);
    }

    #[test]
    fn rejects_bad_protocol_and_ports() {
        let mut draft = RuleDraft {
            protocol: "icmp".into(),
            ..RuleDraft::default()
        };
        assert!(validate_rule(&draft).is_err());

        draft.protocol = "UDP".into();
        assert_eq!(
            validate_rule(&draft).expect("case-folded").protocol,
            Protocol::Udp
        );

        for bad in ["0", "65536", "-1", "http", ""] {
            draft.external_port = bad.into();
            assert!(
                matches!(validate_rule(&draft), Err(CoreError::ValidationFailed { .. })),
                "{bad} should be rejected"
            );
        }
        draft.external_port = "65535".into();
        assert!(validate_rule(&draft).is_ok());
    }

    #[test]
    fn internal_ip_is_free_form_but_required() {
        let mut draft = RuleDraft {
            internal_ip: "printer.lan".into(),
            ..RuleDraft::default()
        };
        assert!(validate_rule(&draft).is_ok());
        draft.internal_ip = "  ".into();
        assert!(validate_rule(&draft).is_err());
    }

    #[test]
    fn rebuild_keeps_lease_inputs() {
        let mut form = DhcpForm {
            lease_mac: "aa:bb".into(),
            gateway: "stale".into(),
            ..DhcpForm::default()
        };
        form.rebuild(&DhcpConfig {
            range: DhcpRange {
                start: "10.0.0.10".into(),
                end: "10.0.0.20".into(),
            },
            gateway: "10.0.0.1".into(),
            static_leases: vec![Lease::default()],
            ..DhcpConfig::default()
        });
        assert_eq!(form.gateway, "10.0.0.1");
        assert_eq!(form.range_start, "10.0.0.10");
        assert_eq!(form.lease_mac, "aa:bb");
        assert_eq!(form.dns.slots(), &[String::new()]);

        form.reset_lease();
        assert!(form.lease_mac.is_empty() && form.lease_ip.is_empty());
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("gateway", " ").is_err());
        assert_eq!(require("gateway", "10.0.0.1").expect("present"), "10.0.0.1");
    }
}
