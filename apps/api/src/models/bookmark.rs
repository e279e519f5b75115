use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// A saved job-posting link. `url` is unique within its site group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub site: String,
}

/// Bookmarks grouped by hostname, in hostname order.
pub type BookmarksBySite = BTreeMap<String, Vec<Bookmark>>;

impl Bookmark {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let url = url.into();
        let site = site_of(&url).unwrap_or_default();
        Self {
            url,
            title: title.into(),
            site,
        }
    }
}

/// Lowercased hostname of a URL, or `None` when the URL has no host.
pub fn site_of(raw: &str) -> Option<String> {
    Url::parse(raw.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}
