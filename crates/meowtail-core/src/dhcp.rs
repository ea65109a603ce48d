// ── udhcpd manager ──
//
// Owns the canonical `DhcpConfig`, the service status, and the edit form.
// The config is replaced atomically through a `watch` channel on every
// successful reload; nothing else writes it.

use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use meowtail_api::MeowtailClient;

use crate::error::CoreError;
use crate::form::{DhcpForm, require};
use crate::model::{DhcpConfig, ServiceStatus};
use crate::normalize::normalize;
use crate::notify::Notifier;
use crate::status::StatusPoller;
use crate::sync::{MutationOutcome, converge, lock};

/// udhcpd configuration and lifecycle.
///
/// Cheaply cloneable; clones share state.
#[derive(Clone)]
pub struct DhcpManager {
    inner: Arc<DhcpInner>,
}

struct DhcpInner {
    client: MeowtailClient,
    notifier: Arc<dyn Notifier>,
    poller: StatusPoller,
    config: watch::Sender<Arc<DhcpConfig>>,
    status: watch::Sender<ServiceStatus>,
    form: Mutex<DhcpForm>,
    loaded_at: Mutex<Option<DateTime<Utc>>>,
}

impl DhcpManager {
    pub fn new(client: MeowtailClient, notifier: Arc<dyn Notifier>) -> Self {
        let (config, _) = watch::channel(Arc::new(DhcpConfig::default()));
        let (status, _) = watch::channel(ServiceStatus::STOPPED);

        Self {
            inner: Arc::new(DhcpInner {
                poller: StatusPoller::new(client.clone()),
                client,
                notifier,
                config,
                status,
                form: Mutex::new(DhcpForm::default()),
                loaded_at: Mutex::new(None),
            }),
        }
    }

    // ── State observation ────────────────────────────────────────

    /// Current canonical config.
    pub fn config(&self) -> Arc<DhcpConfig> {
        self.inner.config.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DhcpConfig>> {
        self.inner.config.subscribe()
    }

    /// Last polled service status.
    pub fn status(&self) -> ServiceStatus {
        *self.inner.status.borrow()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ServiceStatus> {
        self.inner.status.subscribe()
    }

    /// When the config was last replaced by a reload.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        *lock(&self.inner.loaded_at)
    }

    /// Snapshot of the edit form.
    pub fn form(&self) -> DhcpForm {
        lock(&self.inner.form).clone()
    }

    /// Edit the form in place.
    pub fn edit_form<R>(&self, f: impl FnOnce(&mut DhcpForm) -> R) -> R {
        f(&mut lock(&self.inner.form))
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Fetch status and config together, as when a view opens.
    pub async fn activate(&self) -> Result<Arc<DhcpConfig>, CoreError> {
        let (_, config) = tokio::join!(self.reload_status(), self.load_config());
        config
    }

    /// Fetch, normalize, and install the config. Failures are reported to
    /// the notifier and leave the held config untouched.
    pub async fn load_config(&self) -> Result<Arc<DhcpConfig>, CoreError> {
        match self.fetch_config().await {
            Ok(()) => Ok(self.config()),
            Err(e) => {
                warn!(error = %e, "failed to load udhcpd config");
                self.inner
                    .notifier
                    .error(&format!("Failed to load configuration: {}", e.short_message()));
                Err(e)
            }
        }
    }

    async fn fetch_config(&self) -> Result<(), CoreError> {
        let raw = self.inner.client.dhcp_config().await?;
        let config = Arc::new(normalize(Some(&raw)));
        debug!(
            dns = config.dns_servers.len(),
            leases = config.static_leases.len(),
            "udhcpd config reloaded"
        );

        lock(&self.inner.form).rebuild(&config);
        *lock(&self.inner.loaded_at) = Some(Utc::now());
        self.inner.config.send_replace(config);
        Ok(())
    }

    /// Poll and record service status. Never fails.
    pub async fn reload_status(&self) -> ServiceStatus {
        let status = self.inner.poller.poll().await;
        self.inner.status.send_replace(status);
        status
    }

    // ── Lifecycle ────────────────────────────────────────────────

    pub async fn start(&self) -> Result<MutationOutcome, CoreError> {
        info!("starting udhcpd");
        let outcome = self
            .mutate("start udhcpd", self.inner.client.dhcp_start())
            .await?;
        self.reload_status().await;
        Ok(outcome)
    }

    pub async fn stop(&self) -> Result<MutationOutcome, CoreError> {
        info!("stopping udhcpd");
        let outcome = self
            .mutate("stop udhcpd", self.inner.client.dhcp_stop())
            .await?;
        self.reload_status().await;
        Ok(outcome)
    }

    pub async fn restart(&self) -> Result<MutationOutcome, CoreError> {
        info!("restarting udhcpd");
        let outcome = self
            .mutate("restart udhcpd", self.inner.client.dhcp_restart())
            .await?;
        self.reload_status().await;
        Ok(outcome)
    }

    // ── Single-field mutations ───────────────────────────────────

    pub async fn set_range(&self, start: &str, end: &str) -> Result<MutationOutcome, CoreError> {
        let start = require("range start", start)?;
        let end = require("range end", end)?;
        self.mutate("set range", self.inner.client.set_dhcp_range(start, end))
            .await
    }

    pub async fn set_gateway(&self, gateway: &str) -> Result<MutationOutcome, CoreError> {
        let gateway = require("gateway", gateway)?;
        self.mutate("set gateway", self.inner.client.set_dhcp_gateway(gateway))
            .await
    }

    pub async fn set_subnet(&self, subnet: &str) -> Result<MutationOutcome, CoreError> {
        let subnet = require("subnet", subnet)?;
        self.mutate("set subnet", self.inner.client.set_dhcp_subnet(subnet))
            .await
    }

    pub async fn set_interface(&self, interface: &str) -> Result<MutationOutcome, CoreError> {
        let interface = require("interface", interface)?;
        self.mutate(
            "set interface",
            self.inner.client.set_dhcp_interface(interface),
        )
        .await
    }

    /// Replace the DNS server list. An empty list is allowed and clears it.
    pub async fn set_dns(&self, servers: &[String]) -> Result<MutationOutcome, CoreError> {
        self.mutate("update DNS servers", self.inner.client.set_dhcp_dns(servers))
            .await
    }

    pub async fn add_lease(&self, mac: &str, ip: &str) -> Result<MutationOutcome, CoreError> {
        let mac = require("MAC address", mac)?;
        let ip = require("IP address", ip)?;
        self.mutate("add lease", self.inner.client.add_dhcp_lease(mac, ip))
            .await
    }

    pub async fn remove_lease(&self, mac: &str) -> Result<MutationOutcome, CoreError> {
        let mac = require("MAC address", mac)?;
        self.mutate("remove lease", self.inner.client.remove_dhcp_lease(mac))
            .await
    }

    // ── Form submission ──────────────────────────────────────────

    pub async fn submit_range(&self) -> Result<MutationOutcome, CoreError> {
        let (start, end) = self.edit_form(|f| (f.range_start.clone(), f.range_end.clone()));
        self.set_range(&start, &end).await
    }

    pub async fn submit_gateway(&self) -> Result<MutationOutcome, CoreError> {
        let gateway = self.edit_form(|f| f.gateway.clone());
        self.set_gateway(&gateway).await
    }

    pub async fn submit_subnet(&self) -> Result<MutationOutcome, CoreError> {
        let subnet = self.edit_form(|f| f.subnet.clone());
        self.set_subnet(&subnet).await
    }

    pub async fn submit_interface(&self) -> Result<MutationOutcome, CoreError> {
        let interface = self.edit_form(|f| f.interface.clone());
        self.set_interface(&interface).await
    }

    /// Send the DNS slots, trimmed with blanks dropped.
    pub async fn submit_dns(&self) -> Result<MutationOutcome, CoreError> {
        let servers = self.edit_form(|f| f.dns.submitted());
        self.set_dns(&servers).await
    }

    /// Add the lease typed into the form, clearing the inputs on success.
    pub async fn submit_lease(&self) -> Result<MutationOutcome, CoreError> {
        let (mac, ip) = self.edit_form(|f| (f.lease_mac.clone(), f.lease_ip.clone()));
        let outcome = self.add_lease(&mac, &ip).await?;
        self.edit_form(DhcpForm::reset_lease);
        Ok(outcome)
    }

    async fn mutate(
        &self,
        action: &str,
        request: impl Future<Output = Result<meowtail_api::ActionResponse, meowtail_api::Error>>,
    ) -> Result<MutationOutcome, CoreError> {
        converge(self.inner.notifier.as_ref(), action, request, || {
            self.fetch_config()
        })
        .await
    }
}
