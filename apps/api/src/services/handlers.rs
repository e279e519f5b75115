use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::bookmark::{site_of, Bookmark, BookmarksBySite};
use crate::services::learning::ResourceListing;
use crate::services::{bookmarks, learning};
use crate::session::extractor::AuthenticatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddBookmarkRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveBookmarkRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ResourcesQuery {
    #[serde(default)]
    pub refresh: bool,
}

/// GET /api/v1/bookmarks
pub async fn handle_list_bookmarks(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<BookmarksBySite>, AppError> {
    let grouped = state
        .bookmarks
        .list()
        .await
        .map_err(|e| e.into_app_error(bookmarks::SERVICE_NAME, "Error fetching bookmarks"))?;
    Ok(Json(grouped))
}

/// POST /api/v1/bookmarks
pub async fn handle_add_bookmark(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Json(req): Json<AddBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>), AppError> {
    let title = req.title.trim();
    let url = req.url.trim();
    if title.is_empty() || url.is_empty() {
        return Err(AppError::Validation(
            "Please enter both title and URL".to_string(),
        ));
    }
    if site_of(url).is_none() {
        return Err(AppError::Validation(format!("'{url}' is not a valid URL")));
    }

    let bookmark = Bookmark::new(url, title);
    state
        .bookmarks
        .add(&bookmark)
        .await
        .map_err(|e| e.into_app_error(bookmarks::SERVICE_NAME, "Error adding bookmark"))?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// DELETE /api/v1/bookmarks
pub async fn handle_remove_bookmark(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Json(req): Json<RemoveBookmarkRequest>,
) -> Result<StatusCode, AppError> {
    let url = req.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("url is required".to_string()));
    }
    state
        .bookmarks
        .remove(url)
        .await
        .map_err(|e| e.into_app_error(bookmarks::SERVICE_NAME, "Error deleting bookmark"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resources?refresh=true
///
/// With `refresh` the service first rebuilds its listings from the bookmarks.
pub async fn handle_list_resources(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<ResourcesQuery>,
) -> Result<Json<Vec<ResourceListing>>, AppError> {
    if query.refresh {
        state
            .resources
            .refresh()
            .await
            .map_err(|e| e.into_app_error(learning::SERVICE_NAME, "Error refreshing resources"))?;
    }
    let listings = state
        .resources
        .listing()
        .await
        .map_err(|e| e.into_app_error(learning::SERVICE_NAME, "Error fetching resources"))?;
    Ok(Json(listings))
}
