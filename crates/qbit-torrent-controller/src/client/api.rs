//! [`QBittorrent`] operations on top of the retrying dispatcher.

use std::collections::BTreeSet;

use tracing::debug;

use qbit_torrent_types::{
    MainData, QBitError, QBittorrent, TorrentInfo, TorrentPeers, TorrentsAddOptions,
    TorrentsInfoParams, TrackerInfo,
};

use super::QBittorrentClient;
use crate::http::HttpRequest;
use crate::multipart::MultipartForm;
use crate::ops::HttpOps;

const TORRENTS_INFO: &str = "/api/v2/torrents/info";
const TORRENTS_ADD: &str = "/api/v2/torrents/add";
const TORRENTS_DELETE: &str = "/api/v2/torrents/delete";
const TORRENTS_EXPORT: &str = "/api/v2/torrents/export";
const TORRENTS_SET_FORCE_START: &str = "/api/v2/torrents/setForceStart";
const TORRENTS_TRACKERS: &str = "/api/v2/torrents/trackers";
const TORRENTS_ADD_TAGS: &str = "/api/v2/torrents/addTags";
const TORRENTS_REMOVE_TAGS: &str = "/api/v2/torrents/removeTags";
const TORRENTS_CREATE_TAGS: &str = "/api/v2/torrents/createTags";
const TORRENTS_DELETE_TAGS: &str = "/api/v2/torrents/deleteTags";
const TORRENTS_TAGS: &str = "/api/v2/torrents/tags";
const SYNC_MAIN_DATA: &str = "/api/v2/sync/maindata";
const SYNC_TORRENT_PEERS: &str = "/api/v2/sync/torrentPeers";

impl<T: HttpOps> QBittorrent for QBittorrentClient<T> {
    async fn login(&self) -> Result<(), QBitError> {
        self.authenticate().await
    }

    async fn torrents_info(
        &self,
        params: &TorrentsInfoParams,
    ) -> Result<Vec<TorrentInfo>, QBitError> {
        debug!("Listing torrents with {params:?}");
        let torrents: Vec<TorrentInfo> = self.get_json(TORRENTS_INFO, params.to_query()).await?;
        debug!("Listed {} torrents", torrents.len());
        Ok(torrents)
    }

    async fn torrents_add(
        &self,
        file_name: &str,
        data: &[u8],
        options: &TorrentsAddOptions,
    ) -> Result<(), QBitError> {
        debug!("Adding torrent {file_name} ({} bytes) with {options:?}", data.len());
        let form = options
            .to_fields()
            .iter()
            .fold(MultipartForm::new(), |form, (name, value)| {
                form.text(name, value)
            })
            .file("torrents", file_name, data);
        let (content_type, body) = form.finish();

        self.dispatch(HttpRequest::post(TORRENTS_ADD).with_body(&content_type, body))
            .await?;
        debug!("Torrent {file_name} added");
        Ok(())
    }

    async fn torrents_delete(&self, hash: &str) -> Result<(), QBitError> {
        debug!("Deleting torrent {hash} and its files");
        self.post_form(TORRENTS_DELETE, &[("hashes", hash), ("deleteFiles", "true")])
            .await?;
        Ok(())
    }

    async fn torrents_export(&self, hash: &str) -> Result<Vec<u8>, QBitError> {
        debug!("Exporting torrent {hash}");
        let response = self.post_form(TORRENTS_EXPORT, &[("hash", hash)]).await?;
        Ok(response.body.to_vec())
    }

    async fn set_force_start(&self, hash: &str, value: bool) -> Result<(), QBitError> {
        debug!("Setting force start of {hash} to {value}");
        let value = value.to_string();
        self.post_form(
            TORRENTS_SET_FORCE_START,
            &[("hashes", hash), ("value", value.as_str())],
        )
        .await?;
        Ok(())
    }

    async fn torrents_trackers(&self, hash: &str) -> Result<Vec<TrackerInfo>, QBitError> {
        debug!("Getting trackers of {hash}");
        self.get_json(TORRENTS_TRACKERS, vec![("hash".to_owned(), hash.to_owned())])
            .await
    }

    async fn torrents_add_tags(&self, hashes: &[&str], tags: &[&str]) -> Result<(), QBitError> {
        debug!("Adding tags {tags:?} to {hashes:?}");
        let (hashes, tags) = (hashes.join("|"), tags.join(","));
        self.post_form(
            TORRENTS_ADD_TAGS,
            &[("hashes", hashes.as_str()), ("tags", tags.as_str())],
        )
        .await?;
        Ok(())
    }

    async fn torrents_remove_tags(
        &self,
        hashes: &[&str],
        tags: &[&str],
    ) -> Result<(), QBitError> {
        debug!("Removing tags {tags:?} from {hashes:?}");
        let (hashes, tags) = (hashes.join("|"), tags.join(","));
        self.post_form(
            TORRENTS_REMOVE_TAGS,
            &[("hashes", hashes.as_str()), ("tags", tags.as_str())],
        )
        .await?;
        Ok(())
    }

    async fn torrents_create_tags(&self, tags: &[&str]) -> Result<(), QBitError> {
        debug!("Creating tags {tags:?}");
        let tags = tags.join(",");
        self.post_form(TORRENTS_CREATE_TAGS, &[("tags", tags.as_str())])
            .await?;
        Ok(())
    }

    async fn torrents_delete_tags(&self, tags: &[&str]) -> Result<(), QBitError> {
        debug!("Deleting tags {tags:?}");
        let tags = tags.join(",");
        self.post_form(TORRENTS_DELETE_TAGS, &[("tags", tags.as_str())])
            .await?;
        Ok(())
    }

    async fn torrents_get_tags(&self, hashes: &[&str]) -> Result<Vec<String>, QBitError> {
        let params = TorrentsInfoParams {
            hashes: hashes.iter().map(|h| (*h).to_owned()).collect(),
            ..Default::default()
        };
        let tags: BTreeSet<String> = self
            .torrents_info(&params)
            .await?
            .into_iter()
            .flat_map(|t| t.tags)
            .collect();
        debug!("Tags in use by {hashes:?}: {tags:?}");
        Ok(tags.into_iter().collect())
    }

    async fn torrents_get_all_tags(&self) -> Result<Vec<String>, QBitError> {
        debug!("Getting all tags");
        self.get_json(TORRENTS_TAGS, Vec::new()).await
    }

    async fn sync_main_data(&self, rid: i64) -> Result<MainData, QBitError> {
        debug!("Syncing main data from rid {rid}");
        let data: MainData = self
            .get_json(SYNC_MAIN_DATA, vec![("rid".to_owned(), rid.to_string())])
            .await?;
        debug!("Main data at rid {} (full_update={})", data.rid, data.full_update);
        Ok(data)
    }

    async fn sync_torrent_peers(&self, hash: &str, rid: i64) -> Result<TorrentPeers, QBitError> {
        debug!("Syncing peers of {hash} from rid {rid}");
        self.get_json(
            SYNC_TORRENT_PEERS,
            vec![
                ("rid".to_owned(), rid.to_string()),
                ("hash".to_owned(), hash.to_owned()),
            ],
        )
        .await
    }
}
