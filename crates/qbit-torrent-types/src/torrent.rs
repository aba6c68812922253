//! Torrent and tracker records returned by the `torrents/*` endpoints.

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// Hex encoded info hash, the primary key of a torrent.
pub type InfoHash = String;

/// A torrent as returned by `/api/v2/torrents/info`.
///
/// Every field falls back to its default when absent, so the partial objects found in
/// incremental sync responses decode too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TorrentInfo {
    pub added_on: i64,
    pub amount_left: i64,
    pub auto_tmm: bool,
    pub availability: f64,
    pub category: String,
    pub completed: i64,
    pub completion_on: i64,
    pub content_path: String,
    pub dl_limit: i64,
    #[serde(rename = "dlspeed")]
    pub dl_speed: i64,
    pub downloaded: i64,
    pub downloaded_session: i64,
    pub eta: i64,
    #[serde(rename = "f_l_piece_prio")]
    pub first_last_piece_prio: bool,
    pub force_start: bool,
    pub hash: InfoHash,
    #[serde(rename = "isPrivate")]
    pub is_private: bool,
    pub last_activity: i64,
    pub magnet_uri: String,
    pub max_ratio: f64,
    pub max_seeding_time: i64,
    pub name: String,
    pub num_complete: i64,
    pub num_incomplete: i64,
    pub num_leechs: i64,
    pub num_seeds: i64,
    pub priority: i64,
    pub progress: f64,
    pub ratio: f64,
    pub ratio_limit: f64,
    pub save_path: String,
    pub seeding_time: i64,
    pub seeding_time_limit: i64,
    pub seen_complete: i64,
    #[serde(rename = "seq_dl")]
    pub sequential_download: bool,
    pub size: i64,
    pub state: String,
    pub super_seeding: bool,
    /// Decoded from the comma separated `tags` string.
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub time_active: i64,
    pub total_size: i64,
    pub tracker: String,
    pub up_limit: i64,
    pub uploaded: i64,
    pub uploaded_session: i64,
    #[serde(rename = "upspeed")]
    pub up_speed: i64,
}

/// A tracker entry as returned by `/api/v2/torrents/trackers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TrackerInfo {
    pub url: String,
    pub status: i64,
    pub tier: i64,
    pub num_peers: i64,
    pub msg: String,
}

/// Splits a comma separated tag list. An empty string yields no tags.
pub fn split_tags(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|tag| tag.trim().to_owned()).collect()
}

// Anything that is not a string (null, numbers, ...) decodes as "no tags".
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTags {
        Joined(String),
        Other(IgnoredAny),
    }

    Ok(match RawTags::deserialize(deserializer)? {
        RawTags::Joined(raw) => split_tags(&raw),
        RawTags::Other(_) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_of(json: &str) -> Vec<String> {
        serde_json::from_str::<TorrentInfo>(json).unwrap().tags
    }

    #[test]
    fn empty_tags_decode_to_empty_collection() {
        assert!(tags_of(r#"{"tags": ""}"#).is_empty());
    }

    #[test]
    fn single_tag() {
        assert_eq!(tags_of(r#"{"tags": "tag1"}"#), vec!["tag1"]);
    }

    #[test]
    fn multiple_tags_keep_their_order() {
        assert_eq!(
            tags_of(r#"{"tags": "tag1,tag2,tag3"}"#),
            vec!["tag1", "tag2", "tag3"]
        );
    }

    #[test]
    fn server_style_separator_is_trimmed() {
        assert_eq!(tags_of(r#"{"tags": "movies, 4k"}"#), vec!["movies", "4k"]);
    }

    #[test]
    fn missing_or_malformed_tags_are_lenient() {
        assert!(tags_of(r#"{"name": "x"}"#).is_empty());
        assert!(tags_of(r#"{"tags": null}"#).is_empty());
        assert!(tags_of(r#"{"tags": 42}"#).is_empty());
        assert!(tags_of(r#"{"tags": ["a", "b"]}"#).is_empty());
    }

    #[test]
    fn torrent_fields_use_api_names() {
        let torrent: TorrentInfo = serde_json::from_str(
            r#"{
                "hash": "8c212779b4abde7c6bc608063a0d008b7e40ce32",
                "name": "debian-12.iso",
                "dlspeed": 1024,
                "upspeed": 512,
                "isPrivate": true,
                "seq_dl": true,
                "f_l_piece_prio": true,
                "progress": 0.25,
                "state": "downloading",
                "unknown_field": "ignored"
            }"#,
        )
        .unwrap();

        assert_eq!(torrent.hash, "8c212779b4abde7c6bc608063a0d008b7e40ce32");
        assert_eq!(torrent.name, "debian-12.iso");
        assert_eq!(torrent.dl_speed, 1024);
        assert_eq!(torrent.up_speed, 512);
        assert!(torrent.is_private);
        assert!(torrent.sequential_download);
        assert!(torrent.first_last_piece_prio);
        assert_eq!(torrent.progress, 0.25);
        assert_eq!(torrent.state, "downloading");
    }

    #[test]
    fn tracker_decodes() {
        let trackers: Vec<TrackerInfo> = serde_json::from_str(
            r#"[{"url": "udp://tracker.example:1337", "status": 2, "tier": 0, "num_peers": 12, "msg": ""}]"#,
        )
        .unwrap();
        assert_eq!(trackers.len(), 1);
        assert_eq!(trackers[0].url, "udp://tracker.example:1337");
        assert_eq!(trackers[0].status, 2);
        assert_eq!(trackers[0].num_peers, 12);
    }
}
