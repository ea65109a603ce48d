//! CLI configuration -- thin wrapper around `meowtail_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--controller, --insecure, --timeout) and installs the persisted
//! session token.

use std::time::Duration;

use secrecy::SecretString;
use tracing::{debug, warn};

use meowtail_core::{ApplianceConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use meowtail_config::{
    Config, Profile, SessionState, clear_session, config_path, load_config_or_default,
    save_config, save_session,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The token saved by the last `login` for this profile, if any.
///
/// An unreadable state file is treated as "no session".
pub fn stored_token(profile_name: &str) -> Option<SecretString> {
    match meowtail_config::load_session(profile_name) {
        Ok(state) => state.token(),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable session state");
            None
        }
    }
}

/// Build an `ApplianceConfig` from the config file, profile, and flags.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_appliance_config(
    global: &GlobalOpts,
    cfg: &Config,
    profile_name: &str,
) -> Result<ApplianceConfig, CliError> {
    let token = stored_token(profile_name);

    let mut appliance = if let Some(profile) = cfg.profiles.get(profile_name) {
        let mut resolved = meowtail_config::profile_to_appliance_config(profile, &cfg.defaults, token)?;
        if let Some(url) = global.controller.as_deref() {
            resolved.url = parse_url(url)?;
        }
        resolved
    } else {
        // No profile -- the URL must come from --controller / env.
        let url = global.controller.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        let mut resolved = ApplianceConfig::new(parse_url(url)?);
        resolved.timeout = Duration::from_secs(cfg.defaults.timeout);
        if cfg.defaults.insecure {
            resolved.tls = TlsVerification::DangerAcceptInvalid;
        }
        resolved.token = token;
        resolved
    };

    if global.insecure {
        appliance.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        appliance.timeout = Duration::from_secs(secs);
    }

    debug!(
        profile = profile_name,
        url = %appliance.url,
        session = appliance.token.is_some(),
        "resolved appliance config"
    );
    Ok(appliance)
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
