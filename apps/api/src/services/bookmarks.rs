use std::collections::HashMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::bookmark::{Bookmark, BookmarksBySite};
use crate::services::{error_from_response, join_url, ServiceError};

pub const SERVICE_NAME: &str = "Bookmark service";

const BOOKMARKS_ENDPOINT: &str = "/bookmarks";

#[derive(Debug, Deserialize)]
struct StoredBookmark {
    title: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct AddBookmarkRequest<'a> {
    title: &'a str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct DeleteBookmarkRequest<'a> {
    url: &'a str,
}

/// CRUD client for the per-site bookmark collection.
#[derive(Clone)]
pub struct BookmarkClient {
    client: Client,
    base_url: String,
}

impl BookmarkClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self) -> String {
        join_url(&self.base_url, BOOKMARKS_ENDPOINT)
    }

    /// Fetches every bookmark, grouped by the site the service reports.
    pub async fn list(&self) -> Result<BookmarksBySite, ServiceError> {
        let response = self.client.get(self.endpoint()).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let grouped: HashMap<String, Vec<StoredBookmark>> = response.json().await?;
        Ok(grouped
            .into_iter()
            .map(|(site, items)| {
                let bookmarks = items
                    .into_iter()
                    .map(|b| Bookmark {
                        url: b.url,
                        title: b.title,
                        site: site.clone(),
                    })
                    .collect();
                (site, bookmarks)
            })
            .collect())
    }

    pub async fn add(&self, bookmark: &Bookmark) -> Result<(), ServiceError> {
        info!("Adding bookmark {} ({})", bookmark.url, bookmark.site);
        let response = self
            .client
            .post(self.endpoint())
            .json(&AddBookmarkRequest {
                title: &bookmark.title,
                url: &bookmark.url,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    pub async fn remove(&self, url: &str) -> Result<(), ServiceError> {
        info!("Deleting bookmark {url}");
        let response = self
            .client
            .delete(self.endpoint())
            .json(&DeleteBookmarkRequest { url })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
