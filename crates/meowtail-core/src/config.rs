// ── Runtime connection configuration ──
//
// These types describe how to reach an appliance. They carry the session
// token and connection tuning, but never touch disk: the CLI builds an
// `ApplianceConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single appliance.
#[derive(Debug, Clone)]
pub struct ApplianceConfig {
    /// Appliance URL (e.g., `http://192.168.1.1:81`).
    pub url: Url,
    pub tls: TlsVerification,
    /// Request timeout, enforced by the HTTP transport.
    pub timeout: Duration,
    /// Previously persisted bearer token, installed at session start.
    pub token: Option<SecretString>,
}

impl ApplianceConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }
}
