use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::profile::{complete_profile, update_profile, ProfileForm};
use crate::session::extractor::AuthenticatedUser;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<UserProfile>, AppError> {
    state
        .profiles
        .get(auth.uid())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not completed yet".to_string()))
}

/// POST /api/v1/profile
pub async fn handle_complete_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(form): Json<ProfileForm>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let profile = complete_profile(state.profiles.as_ref(), &auth.user, form).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(form): Json<ProfileForm>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = update_profile(state.profiles.as_ref(), auth.uid(), form).await?;
    Ok(Json(profile))
}
