// ── Port-mapping manager ──

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use meowtail_api::{MeowtailClient, PortMapRulePayload};

use crate::error::CoreError;
use crate::form::{PortMapForm, require, validate_rule};
use crate::model::{PortMapConfig, PortMapRule};
use crate::notify::Notifier;
use crate::rule::{Confirm, delete_prompt};
use crate::sync::{MutationOutcome, converge, lock};

/// What happened to a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined; nothing was sent.
    Declined,
    Deleted(MutationOutcome),
}

/// Port-forwarding table and its edit form.
///
/// Cheaply cloneable; clones share state.
#[derive(Clone)]
pub struct PortMapManager {
    inner: Arc<PortMapInner>,
}

struct PortMapInner {
    client: MeowtailClient,
    notifier: Arc<dyn Notifier>,
    config: watch::Sender<Arc<PortMapConfig>>,
    form: Mutex<PortMapForm>,
}

impl PortMapManager {
    pub fn new(client: MeowtailClient, notifier: Arc<dyn Notifier>) -> Self {
        let (config, _) = watch::channel(Arc::new(PortMapConfig::default()));
        Self {
            inner: Arc::new(PortMapInner {
                client,
                notifier,
                config,
                form: Mutex::new(PortMapForm::default()),
            }),
        }
    }

    pub fn config(&self) -> Arc<PortMapConfig> {
        self.inner.config.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<PortMapConfig>> {
        self.inner.config.subscribe()
    }

    pub fn form(&self) -> PortMapForm {
        lock(&self.inner.form).clone()
    }

    pub fn edit_form<R>(&self, f: impl FnOnce(&mut PortMapForm) -> R) -> R {
        f(&mut lock(&self.inner.form))
    }

    // ── Loading ──────────────────────────────────────────────────

    pub async fn load_config(&self) -> Result<Arc<PortMapConfig>, CoreError> {
        match self.fetch_config().await {
            Ok(()) => Ok(self.config()),
            Err(e) => {
                warn!(error = %e, "failed to load port-map config");
                self.inner
                    .notifier
                    .error(&format!("Failed to load configuration: {}", e.short_message()));
                Err(e)
            }
        }
    }

    async fn fetch_config(&self) -> Result<(), CoreError> {
        let config = Arc::new(PortMapConfig::from(self.inner.client.portmap_config().await?));
        debug!(rules = config.rules.len(), "port-map config reloaded");

        lock(&self.inner.form).rebuild(&config);
        self.inner.config.send_replace(config);
        Ok(())
    }

    // ── Mutations ────────────────────────────────────────────────

    pub async fn add_rule(&self, rule: &PortMapRule) -> Result<MutationOutcome, CoreError> {
        let payload = PortMapRulePayload::from(rule);
        let outcome = converge(
            self.inner.notifier.as_ref(),
            "add rule",
            self.inner.client.add_portmap_rule(&payload),
            || self.fetch_config(),
        )
        .await?;
        info!(rule = %describe(rule), "port-map rule added");
        Ok(outcome)
    }

    /// Validate the draft, add it, and reset the draft on success.
    pub async fn submit_rule(&self) -> Result<MutationOutcome, CoreError> {
        let draft = self.edit_form(|f| f.draft.clone());
        let rule = validate_rule(&draft)?;
        let outcome = self.add_rule(&rule).await?;
        self.edit_form(PortMapForm::reset_draft);
        Ok(outcome)
    }

    /// Delete `rule` after confirmation. The rule is sent exactly as held.
    pub async fn delete_rule(
        &self,
        rule: &PortMapRule,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, CoreError> {
        if !confirm.confirm(&delete_prompt(rule)) {
            debug!(rule = %describe(rule), "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let payload = PortMapRulePayload::from(rule);
        let outcome = converge(
            self.inner.notifier.as_ref(),
            "delete rule",
            self.inner.client.delete_portmap_rule(&payload),
            || self.fetch_config(),
        )
        .await?;
        info!(rule = %describe(rule), "port-map rule deleted");
        Ok(DeleteOutcome::Deleted(outcome))
    }

    pub async fn set_interface(&self, interface: &str) -> Result<MutationOutcome, CoreError> {
        let interface = require("external interface", interface)?;
        converge(
            self.inner.notifier.as_ref(),
            "set interface",
            self.inner.client.set_portmap_interface(interface),
            || self.fetch_config(),
        )
        .await
    }

    pub async fn submit_interface(&self) -> Result<MutationOutcome, CoreError> {
        let interface = self.edit_form(|f| f.interface.clone());
        self.set_interface(&interface).await
    }
}

fn describe(rule: &PortMapRule) -> String {
    format!(
        "{}:{} -> {}:{}",
        rule.protocol, rule.external_port, rule.internal_ip, rule.internal_port
    )
}
