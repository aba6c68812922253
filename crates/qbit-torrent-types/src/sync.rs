//! Snapshots returned by the `sync/*` endpoints.
//!
//! The server only sends what changed since the requested `rid`, so every field here is
//! optional on the wire and defaults when absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::torrent::{InfoHash, TorrentInfo};

/// Main data snapshot from `/api/v2/sync/maindata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainData {
    /// Categories added or changed, keyed by name.
    pub categories: HashMap<String, Category>,
    /// Names of removed categories.
    pub categories_removed: Vec<String>,
    /// Whether this snapshot replaces everything previously received.
    pub full_update: bool,
    /// Revision id to pass to the next poll.
    pub rid: i64,
    /// Global transfer state.
    pub server_state: ServerState,
    /// Tags added since the last revision.
    pub tags: Vec<String>,
    /// Tags removed since the last revision.
    pub tags_removed: Vec<String>,
    /// Torrents added or changed, keyed by hash.
    pub torrents: HashMap<InfoHash, TorrentInfo>,
    /// Hashes of removed torrents.
    pub torrents_removed: Vec<InfoHash>,
    /// Tracker URL to the hashes announcing to it.
    pub trackers: HashMap<String, Vec<InfoHash>>,
}

/// A torrent category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Category {
    pub name: String,
    #[serde(rename = "savePath")]
    pub save_path: String,
}

/// Global server state carried by [`MainData`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ServerState {
    #[serde(rename = "alltime_dl")]
    pub all_time_dl: i64,
    #[serde(rename = "alltime_ul")]
    pub all_time_ul: i64,
    pub average_time_queue: i64,
    pub connection_status: String,
    pub dht_nodes: i64,
    pub dl_info_data: i64,
    pub dl_info_speed: i64,
    pub dl_rate_limit: i64,
    pub free_space_on_disk: i64,
    pub global_ratio: String,
    pub queued_io_jobs: i64,
    pub queueing: bool,
    pub read_cache_hits: String,
    pub read_cache_overload: String,
    pub refresh_interval: i64,
    pub total_buffers_size: i64,
    pub total_peer_connections: i64,
    pub total_queued_size: i64,
    pub total_wasted_session: i64,
    pub up_info_data: i64,
    pub up_info_speed: i64,
    pub up_rate_limit: i64,
    pub use_alt_speed_limits: bool,
    pub use_subcategories: bool,
    pub write_cache_overload: String,
}

/// Peer snapshot from `/api/v2/sync/torrentPeers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorrentPeers {
    /// Whether this snapshot replaces everything previously received.
    pub full_update: bool,
    /// Peers added or changed, keyed by `ip:port`.
    pub peers: HashMap<String, TorrentPeer>,
    /// Keys of peers that disconnected.
    pub peers_removed: Vec<String>,
    /// Revision id to pass to the next poll.
    pub rid: i64,
    /// Whether peer flags are included.
    pub show_flags: bool,
}

/// A connected peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TorrentPeer {
    pub client: String,
    pub connection: String,
    pub country: String,
    pub country_code: String,
    pub dl_speed: i64,
    pub downloaded: i64,
    pub files: String,
    pub flags: String,
    pub flags_desc: String,
    pub ip: String,
    pub peer_id_client: String,
    pub port: u16,
    pub progress: f64,
    pub relevance: f64,
    pub uploaded: i64,
    pub up_speed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_main_data_decodes() {
        let data: MainData = serde_json::from_str(
            r#"{
                "rid": 1,
                "full_update": true,
                "categories": {"linux": {"name": "linux", "savePath": "/data/linux"}},
                "server_state": {
                    "alltime_dl": 100,
                    "connection_status": "connected",
                    "dht_nodes": 350,
                    "global_ratio": "1.25",
                    "use_subcategories": true
                },
                "tags": ["iso"],
                "torrents": {
                    "abc": {"name": "debian.iso", "tags": "iso,linux", "progress": 1.0}
                },
                "trackers": {"udp://tracker.example:1337": ["abc"]}
            }"#,
        )
        .unwrap();

        assert_eq!(data.rid, 1);
        assert!(data.full_update);
        assert_eq!(data.categories["linux"].save_path, "/data/linux");
        assert_eq!(data.server_state.all_time_dl, 100);
        assert_eq!(data.server_state.connection_status, "connected");
        assert_eq!(data.server_state.global_ratio, "1.25");
        assert!(data.server_state.use_subcategories);
        assert_eq!(data.torrents["abc"].tags, vec!["iso", "linux"]);
        assert_eq!(data.trackers["udp://tracker.example:1337"], vec!["abc"]);
    }

    #[test]
    fn incremental_main_data_decodes() {
        let data: MainData = serde_json::from_str(
            r#"{"rid": 7, "torrents": {"abc": {"dlspeed": 2048}}, "torrents_removed": ["def"]}"#,
        )
        .unwrap();

        assert_eq!(data.rid, 7);
        assert!(!data.full_update);
        assert_eq!(data.torrents["abc"].dl_speed, 2048);
        assert!(data.torrents["abc"].name.is_empty());
        assert_eq!(data.torrents_removed, vec!["def"]);
        assert_eq!(data.server_state, ServerState::default());
    }

    #[test]
    fn torrent_peers_decode() {
        let peers: TorrentPeers = serde_json::from_str(
            r#"{
                "rid": 3,
                "full_update": true,
                "show_flags": true,
                "peers": {
                    "10.0.0.2:6881": {
                        "client": "qBittorrent/4.6.0",
                        "ip": "10.0.0.2",
                        "port": 6881,
                        "progress": 0.5,
                        "dl_speed": 100
                    }
                },
                "peers_removed": ["10.0.0.3:6881"]
            }"#,
        )
        .unwrap();

        assert_eq!(peers.rid, 3);
        assert!(peers.show_flags);
        let peer = &peers.peers["10.0.0.2:6881"];
        assert_eq!(peer.client, "qBittorrent/4.6.0");
        assert_eq!(peer.port, 6881);
        assert_eq!(peer.dl_speed, 100);
        assert_eq!(peers.peers_removed, vec!["10.0.0.3:6881"]);
    }
}
