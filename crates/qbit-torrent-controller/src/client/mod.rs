//! qBittorrent WebUI client implementation.

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use qbit_torrent_types::QBitError;

use crate::config::{ClientConfig, Credentials};
use crate::http::{HttpRequest, HttpResponse};
use crate::ops::{HttpOps, ReqwestTransport};
use crate::session::SessionStore;

mod api;

/// Name of the session cookie issued by the login endpoint.
pub const SESSION_COOKIE: &str = "SID";

const LOGIN_PATH: &str = "/api/v2/auth/login";
const FORBIDDEN: u16 = 403;

/// QBittorrentClient talks to the qBittorrent WebUI API and keeps its session alive.
///
/// Any request answered with 403 is treated as an expired session: the client logs in again
/// and resends the request once. The session token is shared by all in-flight requests.
#[allow(missing_debug_implementations)]
pub struct QBittorrentClient<T: HttpOps = ReqwestTransport> {
    transport: T,
    credentials: Credentials,
    session: SessionStore,
}

impl QBittorrentClient {
    /// Create a new QBittorrentClient.
    ///
    /// This method is async as it logs in right away when both username and password are set.
    pub async fn try_new(config: ClientConfig) -> Result<Self, QBitError> {
        let transport = ReqwestTransport::new(config.base_url()?, config.timeout)?;
        debug!("Connecting to qBittorrent WebUI at {}", transport.base_url());
        Self::with_transport(transport, config.credentials).await
    }
}

impl<T: HttpOps> QBittorrentClient<T> {
    /// Create a QBittorrentClient on top of a custom transport.
    pub async fn with_transport(transport: T, credentials: Credentials) -> Result<Self, QBitError> {
        let client = Self {
            transport,
            credentials,
            session: SessionStore::default(),
        };

        if client.credentials.is_complete() {
            client.authenticate().await?;
        } else {
            debug!("No credentials configured, skipping authentication");
        }

        Ok(client)
    }

    /// The current session token, empty when none was issued.
    pub fn session_token(&self) -> String {
        self.session.get()
    }

    /// Sends `request` with the current session cookie attached.
    ///
    /// A 403 response triggers one login followed by exactly one resend of the same request.
    /// The definitive response must have a 2xx status, otherwise [`QBitError::Request`] is
    /// returned.
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    pub async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, QBitError> {
        let mut response = self.send(&request).await?;

        if response.status == FORBIDDEN {
            warn!("Session rejected, logging in again");
            drop(response);
            self.authenticate()
                .await
                .map_err(|e| QBitError::Reauthentication(Box::new(e)))?;
            response = self.send(&request).await?;
        }

        if !response.is_success() {
            debug!(status = response.status, "Request failed");
            return Err(QBitError::Request {
                status: response.status,
                body: response.text(),
            });
        }

        Ok(response)
    }

    /// Logs in and stores the returned session cookie. Goes straight to the transport so that
    /// a 403 from the login endpoint is never retried.
    async fn authenticate(&self) -> Result<(), QBitError> {
        info!(username = %self.credentials.username, "Logging in to qBittorrent");
        let request = HttpRequest::post(LOGIN_PATH).with_form(&[
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ]);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(QBitError::Transport)?;

        if response.status != 200 {
            return Err(QBitError::Auth {
                status: response.status,
                body: response.text(),
            });
        }

        match response.cookie(SESSION_COOKIE) {
            Some(sid) => {
                self.session.set(sid.to_owned());
                debug!("Session cookie stored");
            }
            None if response.body.as_ref() == b"Fails." => {
                warn!("Login answered without a session cookie, credentials were rejected")
            }
            None => debug!("No session cookie returned, authentication may be disabled"),
        }

        Ok(())
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, QBitError> {
        self.transport
            .execute(self.with_session(request))
            .await
            .map_err(QBitError::Transport)
    }

    fn with_session(&self, request: &HttpRequest) -> HttpRequest {
        let sid = self.session.get();
        if sid.is_empty() {
            return request.clone();
        }
        request
            .clone()
            .with_header("Cookie", &format!("{SESSION_COOKIE}={sid}"))
    }

    async fn get_json<D: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<D, QBitError> {
        let response = self
            .dispatch(HttpRequest::get(path).with_query(query))
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpResponse, QBitError> {
        self.dispatch(HttpRequest::post(path).with_form(fields))
            .await
    }
}
