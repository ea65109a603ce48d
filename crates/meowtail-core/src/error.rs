// ── Core error types ──
//
// User-facing errors from meowtail-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<meowtail_api::Error>`
// impl folds transport-layer failures into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach appliance at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Appliance request timed out")]
    Timeout,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Operation rejected by appliance: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Short form suitable for a transient notification.
    pub fn short_message(&self) -> String {
        match self {
            Self::ConnectionFailed {
                reason: message, ..
            }
            | Self::AuthenticationFailed { message }
            | Self::ValidationFailed { message }
            | Self::Rejected { message }
            | Self::Api { message, .. }
            | Self::Config { message }
            | Self::Internal(message) => message.clone(),
            Self::Timeout => "request timed out".into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<meowtail_api::Error> for CoreError {
    fn from(err: meowtail_api::Error) -> Self {
        match err {
            meowtail_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            meowtail_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            meowtail_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            meowtail_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            // 4xx other than 401 means the appliance refused the payload
            // (bad address, duplicate rule, unknown lease).
            meowtail_api::Error::Api { status, message } if (400..500).contains(&status) => {
                CoreError::Rejected { message }
            }
            meowtail_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            meowtail_api::Error::Deserialization { message, .. } => CoreError::Api {
                message: format!("unexpected response: {message}"),
                status: None,
            },
        }
    }
}
