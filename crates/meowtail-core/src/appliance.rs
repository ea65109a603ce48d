// ── Appliance facade ──
//
// Builds the shared HTTP client and session from an `ApplianceConfig` and
// hands the same client to both managers, so a login through the facade
// authenticates every later request.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info};

use meowtail_api::transport::{TlsMode, TransportConfig};
use meowtail_api::{MeowtailClient, Session};

use crate::config::{ApplianceConfig, TlsVerification};
use crate::dhcp::DhcpManager;
use crate::error::CoreError;
use crate::notify::Notifier;
use crate::portmap::PortMapManager;

/// Entry point for consumers.
#[derive(Clone)]
pub struct Appliance {
    config: ApplianceConfig,
    client: MeowtailClient,
    dhcp: DhcpManager,
    portmap: PortMapManager,
}

impl Appliance {
    /// Build the client and managers. Does not touch the network.
    pub fn new(config: ApplianceConfig, notifier: Arc<dyn Notifier>) -> Result<Self, CoreError> {
        let session = match &config.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        };
        let client = MeowtailClient::new(config.url.clone(), session, &build_transport(&config))?;
        debug!(url = %config.url, authenticated = client.session().has_token(), "appliance client ready");

        Ok(Self {
            dhcp: DhcpManager::new(client.clone(), Arc::clone(&notifier)),
            portmap: PortMapManager::new(client.clone(), notifier),
            client,
            config,
        })
    }

    pub fn config(&self) -> &ApplianceConfig {
        &self.config
    }

    pub fn dhcp(&self) -> &DhcpManager {
        &self.dhcp
    }

    pub fn portmap(&self) -> &PortMapManager {
        &self.portmap
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    // ── Session ──────────────────────────────────────────────────

    /// Log in and install the token. Returns it for persistence.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, CoreError> {
        let token = self.client.login(username, password).await?;
        info!(username, "logged in");
        Ok(token)
    }

    /// Drop the in-memory token. Persisted state is the caller's to clear.
    pub fn logout(&self) {
        self.client.logout();
        info!("logged out");
    }

    /// Whether the appliance accepts the held token. Never fails.
    pub async fn is_logged_in(&self) -> bool {
        self.client.is_logged_in().await
    }
}

fn build_transport(config: &ApplianceConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
