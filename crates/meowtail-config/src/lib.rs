//! Shared configuration for meowtail.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! translation to `meowtail_core::ApplianceConfig`, and the per-profile
//! session file that carries the bearer token between invocations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use meowtail_core::{ApplianceConfig, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "meowtail";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse session state: {0}")]
    State(#[from] toml::de::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named appliance profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Appliance base URL (e.g., "http://192.168.1.1:81").
    pub controller: String,

    /// Login username.
    pub username: Option<String>,

    /// Password (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name holding the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "meowtail", "meowtail")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || fallback_dir(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Per-profile session state file under the platform data dir.
pub fn state_path(profile_name: &str) -> PathBuf {
    let dir = project_dirs().map_or_else(
        || fallback_dir(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    );
    dir.join("sessions").join(format!("{profile_name}.toml"))
}

fn fallback_dir(base: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(base);
    p.push("meowtail");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, still layering `MEOWTAIL_` env vars.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MEOWTAIL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve username + password for `login`.
///
/// Password order: the profile's `password_env` variable, then
/// `MEOWTAIL_PASSWORD`, then the system keyring, then plaintext.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("MEOWTAIL_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let password = resolve_password(profile, profile_name).ok_or_else(|| {
        ConfigError::NoCredentials {
            profile: profile_name.into(),
        }
    })?;

    Ok((username, password))
}

fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Env var
    let env_names = profile
        .password_env
        .as_deref()
        .into_iter()
        .chain(std::iter::once("MEOWTAIL_PASSWORD"));
    for name in env_names {
        if let Ok(pw) = std::env::var(name) {
            return Some(SecretString::from(pw));
        }
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Some(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    profile.password.clone().map(SecretString::from)
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &SecretString) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .and_then(|entry| entry.set_password(password.expose_secret()))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

/// Build an `ApplianceConfig` from a profile. No CLI flag overrides.
pub fn profile_to_appliance_config(
    profile: &Profile,
    defaults: &Defaults,
    token: Option<SecretString>,
) -> Result<ApplianceConfig, ConfigError> {
    let url: url::Url = profile
        .controller
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "controller".into(),
            reason: format!("invalid URL: {}", profile.controller),
        })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ApplianceConfig {
        url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        token,
    })
}

// ── Session state ───────────────────────────────────────────────────

/// What survives between invocations after `login`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionState {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl SessionState {
    pub fn token(&self) -> Option<SecretString> {
        self.token.clone().map(SecretString::from)
    }
}

/// Read a profile's session state. A missing file is an empty session.
pub fn load_session(profile_name: &str) -> Result<SessionState, ConfigError> {
    load_session_at(&state_path(profile_name))
}

pub fn load_session_at(path: &Path) -> Result<SessionState, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionState::default()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_session(profile_name: &str, state: &SessionState) -> Result<(), ConfigError> {
    save_session_at(&state_path(profile_name), state)
}

/// Write session state, owner-readable only on unix.
pub fn save_session_at(path: &Path, state: &SessionState) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(state)?)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Delete a profile's session state. Already gone is fine.
pub fn clear_session(profile_name: &str) -> Result<(), ConfigError> {
    clear_session_at(&state_path(profile_name))
}

pub fn clear_session_at(path: &Path) -> Result<(), ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
