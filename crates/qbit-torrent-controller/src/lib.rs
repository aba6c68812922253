//! # qBittorrent controller using the WebUI API.
//!
//! usage:
//!
//! ```rust,ignore
//! use qbit_torrent_controller::{ClientConfig, QBittorrentClient};
//! use qbit_torrent_types::{QBittorrent, TorrentsAddOptions, TorrentsInfoParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QBittorrentClient::try_new(ClientConfig::from_env()).await?;
//!     let data = std::fs::read("path/to/file.torrent")?;
//!     client
//!         .torrents_add("file.torrent", &data, &TorrentsAddOptions::default())
//!         .await?;
//!     let torrents = client.torrents_info(&TorrentsInfoParams::default()).await?;
//!     println!("Torrents: {:?}", torrents);
//!     Ok(())
//! }
//! ```
//!

mod client;
mod config;
mod http;
mod multipart;
mod ops;
mod session;

#[cfg(test)]
mod testutil;

#[cfg(test)]
use {test_log as _, wiremock as _};

pub use client::{QBittorrentClient, SESSION_COOKIE};
pub use config::{ClientConfig, Credentials};
pub use http::{FORM_CONTENT_TYPE, HttpMethod, HttpRequest, HttpResponse};
pub use ops::{BoxError, HttpOps, ReqwestTransport};
