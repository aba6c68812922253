//! Client configuration.

use std::{env, fmt, str::FromStr, time::Duration};

use tracing::warn;
use url::Url;

use qbit_torrent_types::QBitError;

/// Username and password for the WebUI.
///
/// Authentication is skipped unless both are non-empty, which matches servers configured to
/// bypass authentication for trusted clients.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// WebUI username.
    pub username: String,
    /// WebUI password.
    pub password: String,
}

impl Credentials {
    /// Returns new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether both username and password are set.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the password.
        write!(
            f,
            "Credentials(username=\"{}\", password=<{}>)",
            self.username,
            if self.password.is_empty() {
                "unset"
            } else {
                "set"
            },
        )
    }
}

/// Configuration for [`crate::QBittorrentClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Login credentials.
    pub credentials: Credentials,
    /// WebUI host name or address.
    pub host: String,
    /// WebUI port.
    pub port: u16,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            host: "localhost".into(),
            port: 8080,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from the environment, falling back to the defaults.
    ///
    /// Recognized variables: `QBITTORRENT_USERNAME`, `QBITTORRENT_PASSWORD`,
    /// `QBITTORRENT_HOST`, `QBITTORRENT_PORT` and `QBITTORRENT_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    ///
    /// A port or timeout that does not parse is logged and replaced by its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            credentials: Credentials::new(
                lookup("QBITTORRENT_USERNAME").unwrap_or_default(),
                lookup("QBITTORRENT_PASSWORD").unwrap_or_default(),
            ),
            host: lookup("QBITTORRENT_HOST").unwrap_or(defaults.host),
            port: parse_setting(&lookup, "QBITTORRENT_PORT").unwrap_or(defaults.port),
            timeout: parse_setting(&lookup, "QBITTORRENT_TIMEOUT_SECS").map(Duration::from_secs),
        }
    }

    /// The WebUI base URL, `http://<host>:<port>`.
    pub fn base_url(&self) -> Result<Url, QBitError> {
        let raw = format!("http://{}:{}", self.host, self.port);
        Url::parse(&raw).map_err(|e| QBitError::InvalidUrl(format!("{raw}: {e}")))
    }
}

fn parse_setting<T>(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {name}={raw:?}: {e}");
            None
        }
    }
}
