use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use tracing::warn;

use crate::errors::AppError;
use crate::session::identity::AuthUser;
use crate::state::AppState;

/// Caller resolved from `Authorization: Bearer <id token>`.
pub struct AuthenticatedUser {
    pub user: AuthUser,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn uid(&self) -> &str {
        &self.user.uid
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                warn!("Missing Authorization header");
                AppError::Unauthorized
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!("Invalid Authorization header format");
                AppError::Unauthorized
            })?;

        let user = state.session.resolve(token).await?;
        Ok(AuthenticatedUser {
            user,
            token: token.to_string(),
        })
    }
}
