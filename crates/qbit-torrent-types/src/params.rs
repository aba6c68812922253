//! Optional request parameters.

/// Filters for `/api/v2/torrents/info`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TorrentsInfoParams {
    /// State filter, e.g. `downloading`, `completed`, `paused`.
    pub filter: Option<String>,
    /// Only torrents in this category.
    pub category: Option<String>,
    /// Only torrents carrying this tag.
    pub tag: Option<String>,
    /// Field to sort by.
    pub sort: Option<String>,
    /// Reverse the sort order.
    pub reverse: bool,
    /// Maximum number of torrents, 0 for no limit.
    pub limit: u32,
    /// Offset into the list. Negative values count from the end.
    pub offset: i64,
    /// Only these hashes.
    pub hashes: Vec<String>,
}

impl TorrentsInfoParams {
    /// Query pairs for the set fields. Multiple hashes are joined with `|`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push_text(&mut query, "filter", &self.filter);
        push_text(&mut query, "category", &self.category);
        push_text(&mut query, "tag", &self.tag);
        push_text(&mut query, "sort", &self.sort);
        if self.reverse {
            query.push(("reverse".to_owned(), "true".to_owned()));
        }
        if self.limit > 0 {
            query.push(("limit".to_owned(), self.limit.to_string()));
        }
        if self.offset != 0 {
            query.push(("offset".to_owned(), self.offset.to_string()));
        }
        if !self.hashes.is_empty() {
            query.push(("hashes".to_owned(), self.hashes.join("|")));
        }
        query
    }
}

fn push_text(query: &mut Vec<(String, String)>, key: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        query.push((key.to_owned(), value.to_owned()));
    }
}

/// Overrides for `/api/v2/torrents/add`. `None` keeps the server default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TorrentsAddOptions {
    /// Download directory.
    pub save_path: Option<String>,
    /// Category to file the torrent under.
    pub category: Option<String>,
    /// Tags to attach.
    pub tags: Option<Vec<String>>,
    /// Add the torrent in the paused state.
    pub start_paused: Option<bool>,
    /// Automatic torrent management.
    pub auto_tmm: Option<bool>,
}

impl TorrentsAddOptions {
    /// Multipart text fields for the set options, always led by `skip_checking=true`.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("skip_checking".to_owned(), "true".to_owned())];
        if let Some(save_path) = &self.save_path {
            fields.push(("savepath".to_owned(), save_path.clone()));
        }
        if let Some(category) = &self.category {
            fields.push(("category".to_owned(), category.clone()));
        }
        if let Some(tags) = &self.tags {
            fields.push(("tags".to_owned(), tags.join(",")));
        }
        if let Some(paused) = self.start_paused {
            fields.push(("paused".to_owned(), paused.to_string()));
        }
        if let Some(auto_tmm) = self.auto_tmm {
            fields.push(("autoTMM".to_owned(), auto_tmm.to_string()));
        }
        fields
    }
}
