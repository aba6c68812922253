//! # qBittorrent Torrent Types
//!
//! This crate defines the records, request options and the [`QBittorrent`] trait shared by
//! qBittorrent WebUI API clients.

use std::error::Error as StdError;

use thiserror::Error;

mod params;
mod sync;
mod torrent;

pub use params::{TorrentsAddOptions, TorrentsInfoParams};
pub use sync::{Category, MainData, ServerState, TorrentPeer, TorrentPeers};
pub use torrent::{InfoHash, TorrentInfo, TrackerInfo, split_tags};

/// Error type for qBittorrent API operations.
#[derive(Error, Debug)]
pub enum QBitError {
    /// The login endpoint rejected the credentials (any status other than 200).
    #[error("authentication failed ({status}): {body}")]
    Auth {
        /// HTTP status returned by the login endpoint.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A request hit an expired session and the follow-up login failed.
    #[error("re-authentication failed: {0}")]
    Reauthentication(Box<QBitError>),

    /// The server answered the definitive attempt with a non-success status.
    #[error("request failed ({status}): {body}")]
    Request {
        /// HTTP status of the response.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Network-level failure (connection refused, timeout, ...)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The response body did not have the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Host and port do not form a usable base URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl QBitError {
    /// Returns the HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Request { status, .. } => Some(*status),
            Self::Reauthentication(inner) => inner.status(),
            _ => None,
        }
    }
}

/// QBittorrent defines the operations exposed by the qBittorrent WebUI API.
#[allow(async_fn_in_trait)]
pub trait QBittorrent {
    /// Log in with the configured credentials and store the session cookie.
    async fn login(&self) -> Result<(), QBitError>;

    /// List torrents, narrowed by the given parameters.
    async fn torrents_info(
        &self,
        params: &TorrentsInfoParams,
    ) -> Result<Vec<TorrentInfo>, QBitError>;

    /// Upload a `.torrent` file. Hash checking is always skipped.
    async fn torrents_add(
        &self,
        file_name: &str,
        data: &[u8],
        options: &TorrentsAddOptions,
    ) -> Result<(), QBitError>;

    /// Remove a torrent by hash. Downloaded files are always deleted as well.
    async fn torrents_delete(&self, hash: &str) -> Result<(), QBitError>;

    /// Fetch the raw `.torrent` file of a torrent.
    async fn torrents_export(&self, hash: &str) -> Result<Vec<u8>, QBitError>;

    /// Toggle force start on a torrent.
    async fn set_force_start(&self, hash: &str, value: bool) -> Result<(), QBitError>;

    /// List the trackers of a torrent.
    async fn torrents_trackers(&self, hash: &str) -> Result<Vec<TrackerInfo>, QBitError>;

    /// Attach tags to torrents.
    async fn torrents_add_tags(&self, hashes: &[&str], tags: &[&str]) -> Result<(), QBitError>;

    /// Detach tags from torrents.
    async fn torrents_remove_tags(&self, hashes: &[&str], tags: &[&str])
    -> Result<(), QBitError>;

    /// Create tags without attaching them.
    async fn torrents_create_tags(&self, tags: &[&str]) -> Result<(), QBitError>;

    /// Delete tags globally.
    async fn torrents_delete_tags(&self, tags: &[&str]) -> Result<(), QBitError>;

    /// Tags in use by the given torrents, sorted and deduplicated.
    async fn torrents_get_tags(&self, hashes: &[&str]) -> Result<Vec<String>, QBitError>;

    /// Every tag known to the server.
    async fn torrents_get_all_tags(&self) -> Result<Vec<String>, QBitError>;

    /// Incremental main data snapshot since revision `rid` (0 for a full snapshot).
    async fn sync_main_data(&self, rid: i64) -> Result<MainData, QBitError>;

    /// Incremental peer snapshot of one torrent since revision `rid`.
    async fn sync_torrent_peers(&self, hash: &str, rid: i64) -> Result<TorrentPeers, QBitError>;
}
