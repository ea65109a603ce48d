// Token login, login probe, and logout.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::MeowtailClient;
use crate::error::Error;
use crate::models::LoginResponse;

impl MeowtailClient {
    /// Authenticate with username/password.
    ///
    /// On success the returned token is installed on this client's
    /// [`Session`](crate::Session) and handed back so the caller can persist it.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.url("/login")?;
        debug!("logging in at {}", url);

        let resp = self
            .http()
            .post(url)
            .json(&json!({
                "username": username,
                "password": password.expose_secret(),
            }))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
                .unwrap_or_else(|| format!("login rejected (HTTP {status})"));
            return Err(Error::Authentication { message });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("login response: {e}"),
                body,
            })?;

        let token = SecretString::from(login.token);
        self.session().set_token(token.clone());
        debug!("login successful");
        Ok(token)
    }

    /// Probe whether the held token is accepted.
    ///
    /// Only HTTP 200 counts as logged in. Every other status and every
    /// transport failure collapses to `false`.
    pub async fn is_logged_in(&self) -> bool {
        let Ok(url) = self.url("/api/logined") else {
            return false;
        };
        debug!("GET {}", url);

        match self.session().decorate(self.http().get(url)).send().await {
            Ok(resp) => resp.status() == reqwest::StatusCode::OK,
            Err(e) => {
                debug!(error = %e, "login probe failed");
                false
            }
        }
    }

    /// Forget the bearer token held by this client's session.
    pub fn logout(&self) {
        self.session().clear();
    }
}
