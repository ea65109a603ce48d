//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use meowtail_config::ConfigError;
use meowtail_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach appliance at {url}")]
    #[diagnostic(
        code(meowtail::connection_failed),
        help(
            "Check that the appliance is up and the URL is right.\n\
             URL: {url}\n\
             Try: meowtail dhcp status --controller http://<host>:<port>"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(meowtail::auth_failed),
        help(
            "The session token is missing or no longer accepted.\n\
             Run: meowtail login --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(meowtail::no_credentials),
        help(
            "Pass --username, set username in the profile, or export MEOWTAIL_USERNAME.\n\
             The password is read from MEOWTAIL_PASSWORD, the system keyring, or the profile."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(meowtail::not_found),
        help("Run: meowtail {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Appliance rejected the request: {message}")]
    #[diagnostic(code(meowtail::rejected))]
    Rejected { message: String },

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(meowtail::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(meowtail::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file not found")]
    #[diagnostic(
        code(meowtail::no_config),
        help(
            "Create one with: meowtail config init\n\
             Or pass --controller <url>.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(meowtail::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(meowtail::timeout),
        help("Increase timeout with --timeout or check appliance responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a core error, naming the active profile and timeout in
    /// the diagnostics that need them.
    pub fn from_core(err: CoreError, profile: &str, timeout_secs: u64) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                profile: profile.into(),
                message,
            },
            CoreError::Timeout => CliError::Timeout {
                seconds: timeout_secs,
            },
            other => other.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                profile: "default".into(),
                message,
            },

            CoreError::Timeout => CliError::Timeout { seconds: 0 },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "unknown".into(), |s| format!("HTTP {s}")),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}
