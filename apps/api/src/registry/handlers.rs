use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication};
use crate::registry::stats::{compute_stats, ApplicationStats};
use crate::registry::{create_application, CreateApplicationRequest};
use crate::session::extractor::AuthenticatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    let created = create_application(state.applications.as_ref(), auth.uid(), req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    Ok(Json(state.applications.list_by_owner(auth.uid()).await?))
}

/// GET /api/v1/applications/stats
pub async fn handle_application_stats(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<ApplicationStats>, AppError> {
    let applications = state.applications.list_by_owner(auth.uid()).await?;
    Ok(Json(compute_stats(&applications)))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<JobApplication>, AppError> {
    let updated = state
        .applications
        .update_status(auth.uid(), id, req.status)
        .await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/applications/:id?confirm=true
///
/// Deletion is irreversible, so the caller must confirm explicitly.
pub async fn handle_delete_application(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    if !query.confirm {
        return Err(AppError::Validation(
            "Deleting an application requires confirm=true".to_string(),
        ));
    }
    state.applications.delete(auth.uid(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
