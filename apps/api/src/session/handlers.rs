use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::session::extractor::AuthenticatedUser;
use crate::session::identity::{AuthSession, OAuthCredential};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsRequest {
    fn validated(&self) -> Result<(&str, &str), AppError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        Ok((email, &self.password))
    }
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(default)]
    pub email: String,
}

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthSession>), AppError> {
    let (email, password) = req.validated()?;
    let session = state.session.sign_up(email, password).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthSession>, AppError> {
    let (email, password) = req.validated()?;
    Ok(Json(state.session.sign_in(email, password).await?))
}

/// POST /api/v1/auth/signin/oauth
pub async fn handle_sign_in_oauth(
    State(state): State<AppState>,
    Json(credential): Json<OAuthCredential>,
) -> Result<Json<AuthSession>, AppError> {
    if credential.id_token.is_none() && credential.access_token.is_none() {
        return Err(AppError::Validation(
            "OAuth credential needs an id_token or access_token".to_string(),
        ));
    }
    Ok(Json(state.session.sign_in_with_oauth(&credential).await?))
}

/// POST /api/v1/auth/password-reset
pub async fn handle_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<StatusCode, AppError> {
    let email = req.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    state.session.send_password_reset(email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> StatusCode {
    state.session.sign_out(&auth.token, &auth.user).await;
    StatusCode::NO_CONTENT
}
