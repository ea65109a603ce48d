// ── udhcpd config normalization ──
//
// Maps whatever the appliance returns for `GET /api/udhcpd/config` onto
// the canonical `DhcpConfig`. Firmware builds disagree on field names
// (`dnsServers` vs `dns` vs `dns_servers`) and on value types (a single
// DNS server may arrive as a bare string), so every canonical field is
// resolved through a fixed alias list. Normalization never fails.

use serde_json::{Map, Value};

use crate::model::{DhcpConfig, DhcpRange, Lease};

// Alias lists, highest priority first. The first alias that is present
// and non-null wins outright; values are never merged across aliases.
pub const RANGE_ALIASES: &[&str] = &["range"];
pub const GATEWAY_ALIASES: &[&str] = &["gateway", "gw", "router"];
pub const SUBNET_ALIASES: &[&str] = &["subnet", "netmask", "subnet_mask"];
pub const INTERFACE_ALIASES: &[&str] = &["interface", "ifname"];
pub const DNS_ALIASES: &[&str] = &["dnsServers", "dns", "dns_servers"];
pub const LEASE_ALIASES: &[&str] = &["staticLeases", "leases", "static_leases"];

/// Normalize a raw config payload. `None`, `null`, and non-object
/// payloads all yield the all-defaults config.
pub fn normalize(raw: Option<&Value>) -> DhcpConfig {
    let Some(obj) = raw.and_then(Value::as_object) else {
        return DhcpConfig::default();
    };

    DhcpConfig {
        range: range(obj),
        gateway: first_present(obj, GATEWAY_ALIASES).map_or_else(String::new, text),
        subnet: first_present(obj, SUBNET_ALIASES).map_or_else(String::new, text),
        interface: first_present(obj, INTERFACE_ALIASES).map_or_else(String::new, text),
        dns_servers: first_present(obj, DNS_ALIASES)
            .map(dns_servers)
            .unwrap_or_default(),
        static_leases: first_present(obj, LEASE_ALIASES)
            .map(static_leases)
            .unwrap_or_default(),
    }
}

/// First alias whose value is present and not `null`.
pub fn first_present<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find(|v| !v.is_null())
}

// ── Field resolvers ──────────────────────────────────────────────────

/// `range: {start, end}` wins when present; otherwise top-level
/// `start` / `end`. A `range` that is present but not an object still wins
/// and resolves to empty bounds.
fn range(obj: &Map<String, Value>) -> DhcpRange {
    let source = match first_present(obj, RANGE_ALIASES) {
        Some(Value::Object(inner)) => inner,
        Some(_) => return DhcpRange::default(),
        None => obj,
    };

    DhcpRange {
        start: source.get("start").map_or_else(String::new, text),
        end: source.get("end").map_or_else(String::new, text),
    }
}

fn dns_servers(value: &Value) -> Vec<String> {
    as_sequence(value)
        .filter(|v| !is_falsy(v))
        .map(text)
        .filter(|s| !s.is_empty())
        .collect()
}

fn static_leases(value: &Value) -> Vec<Lease> {
    as_sequence(value).filter_map(lease).collect()
}

fn lease(value: &Value) -> Option<Lease> {
    let obj = value.as_object()?;
    let lease = Lease {
        mac: obj.get("mac").map_or_else(String::new, text),
        ip: obj.get("ip").map_or_else(String::new, text),
    };
    if lease.mac.is_empty() && lease.ip.is_empty() {
        None
    } else {
        Some(lease)
    }
}

// ── Type variance ────────────────────────────────────────────────────

/// Iterate a sequence, promoting a lone non-array value to one element.
fn as_sequence(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        other => Box::new(std::iter::once(other)),
    }
}

/// Scalar text form. Numbers and booleans are stringified; arrays,
/// objects, and null have no text form and resolve to empty.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        _ => false,
    }
}
