use serde::{Deserialize, Serialize};
use strum::Display;

/// Transport protocol of a forwarding rule.
///
/// New rules are only ever `Tcp` or `Udp`. Rules read back from the
/// appliance keep whatever string it stored in `Other`, so they can still
/// be listed and deleted by their exact body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
    #[strum(default)]
    Other(String),
}

impl Protocol {
    /// The wire spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Protocol {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "tcp" => Self::Tcp,
            "udp" => Self::Udp,
            _ => Self::Other(raw),
        }
    }
}

impl From<Protocol> for String {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// A port-forwarding rule.
///
/// Rules have no identifier. Two rules are the same rule exactly when all
/// four fields are equal, and that is how a rule is addressed for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortMapRule {
    pub protocol: Protocol,
    pub external_port: u16,
    pub internal_ip: String,
    pub internal_port: u16,
}

/// Canonical port-mapping table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapConfig {
    pub external_interface: String,
    pub rules: Vec<PortMapRule>,
}
