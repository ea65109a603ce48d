// Appliance HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token decoration,
// and response classification. Endpoint groups (udhcpd, portmap, auth)
// are implemented as inherent methods in separate files to keep this
// module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ActionResponse, ErrorBody};
use crate::session::Session;
use crate::transport::TransportConfig;

/// Raw HTTP client for the appliance control API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference-counted and
/// the [`Session`] shares its token slot across clones.
#[derive(Debug, Clone)]
pub struct MeowtailClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl MeowtailClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the appliance root (e.g. `http://192.168.1.1:81`);
    /// endpoint paths such as `/api/udhcpd/status` are joined onto it.
    pub fn new(base_url: Url, session: Session, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Session) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    /// The appliance base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The bearer-token session shared by every request from this client.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an absolute API path such as `/api/portmap/rule`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url);

        let builder = self.session.decorate(self.http.get(url));
        let resp = builder.send().await.map_err(Error::Transport)?;
        let body = Self::check(resp).await?;
        decode(&body)
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<ActionResponse, Error> {
        let url = self.url(path)?;
        debug!("POST {}", url);

        let builder = self.session.decorate(self.http.post(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;
        let body = Self::check(resp).await?;
        Ok(parse_action(&body))
    }

    /// Send a DELETE request carrying a JSON body.
    ///
    /// The appliance addresses deletions by body (mac, full rule), not by path.
    pub(crate) async fn delete(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<ActionResponse, Error> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);

        let builder = self.session.decorate(self.http.delete(url).json(body));
        let resp = builder.send().await.map_err(Error::Transport)?;
        let body = Self::check(resp).await?;
        Ok(parse_action(&body))
    }

    /// Classify the response status, returning the body text on success.
    async fn check(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "token missing, expired, or rejected".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        resp.text().await.map_err(Error::Transport)
    }
}

/// Decode a success body. An empty body reads as JSON `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

/// Read the optional `status` string out of a mutation's success body.
///
/// Anything unparseable is treated as "no status".
fn parse_action(body: &str) -> ActionResponse {
    serde_json::from_str::<ActionResponse>(body).unwrap_or_default()
}

/// Pull the `error` field out of a failure body, falling back to a preview.
fn error_message(body: &str) -> String {
    if let Ok(ErrorBody { error: Some(message) }) = serde_json::from_str::<ErrorBody>(body) {
        return message;
    }
    let preview: String = body.chars().take(200).collect();
    if preview.trim().is_empty() {
        "no response body".into()
    } else {
        preview
    }
}
