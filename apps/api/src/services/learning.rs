use std::collections::BTreeMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::services::{error_from_response, join_url, ServiceError};

pub const SERVICE_NAME: &str = "Resource service";

const REFRESH_ENDPOINT: &str = "/resources_for_all_bookmarks";
const LISTING_ENDPOINT: &str = "/resources_from_db";

/// Curated resources for one bookmarked posting, keyed by source
/// (e.g. "LeetCode", "General"). Entry shapes vary by source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceListing {
    #[serde(alias = "job_title")]
    pub title: String,
    #[serde(default)]
    pub resources: BTreeMap<String, Value>,
}

#[derive(Clone)]
pub struct ResourceClient {
    client: Client,
    base_url: String,
}

impl ResourceClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Asks the service to rebuild its listings from the current bookmarks.
    pub async fn refresh(&self) -> Result<(), ServiceError> {
        info!("Refreshing learning resources");
        let response = self
            .client
            .get(join_url(&self.base_url, REFRESH_ENDPOINT))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    pub async fn listing(&self) -> Result<Vec<ResourceListing>, ServiceError> {
        let response = self
            .client
            .get(join_url(&self.base_url, LISTING_ENDPOINT))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }
}
