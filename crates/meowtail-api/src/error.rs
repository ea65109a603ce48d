use thiserror::Error;

/// Top-level error type for the `meowtail-api` crate.
///
/// Covers every failure mode of the control API: authentication,
/// transport, non-success HTTP responses, and undecodable bodies.
/// `meowtail-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected, or a request was refused because the bearer
    /// token is missing, stale, or invalid.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// The appliance answered with a non-success status. `message` is the
    /// `error` field of the body when present, otherwise a body preview.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the appliance rejected our credentials or token.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// HTTP status code, if the failure came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
