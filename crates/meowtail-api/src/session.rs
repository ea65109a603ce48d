// Bearer-token session state
//
// The token is read once when the session starts (from whatever the
// caller persisted), swapped in on login, and cleared on logout. Every
// request built by `MeowtailClient` passes through `Session::decorate`,
// which is the only place the token is attached.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};

/// Shared, swappable bearer token.
///
/// Cloning shares the underlying slot, so a token installed through one
/// handle is visible to every client holding a clone.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<ArcSwapOption<SecretString>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.has_token())
            .finish()
    }
}

impl Session {
    /// Empty session: requests go out unauthenticated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded with a previously persisted token.
    pub fn with_token(token: SecretString) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Install a token (after login or at session start).
    pub fn set_token(&self, token: SecretString) {
        debug!("storing bearer token");
        self.token.store(Some(Arc::new(token)));
    }

    /// Drop the token. Subsequent requests are unauthenticated.
    pub fn clear(&self) {
        debug!("clearing bearer token");
        self.token.store(None);
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<Arc<SecretString>> {
        self.token.load_full()
    }

    /// Attach `Authorization: Bearer <token>` when a token is held.
    pub(crate) fn decorate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.load();
        match guard.as_deref() {
            Some(token) => {
                trace!("attaching bearer token");
                builder.bearer_auth(token.expose_secret())
            }
            None => builder,
        }
    }
}
