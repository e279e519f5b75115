pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::profile::handlers as profile;
use crate::registry::handlers as registry;
use crate::services::handlers as services;
use crate::services::resume::MAX_RESUME_BYTES;
use crate::session::handlers as auth;
use crate::skill_gap::handlers as skill_gap;
use crate::state::AppState;

/// Headroom over the resume cap for multipart framing and the role field.
const ANALYZE_BODY_LIMIT: usize = MAX_RESUME_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/signin/oauth", post(auth::handle_sign_in_oauth))
        .route("/api/v1/auth/password-reset", post(auth::handle_password_reset))
        .route("/api/v1/auth/signout", post(auth::handle_sign_out))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .post(profile::handle_complete_profile)
                .put(profile::handle_update_profile),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(registry::handle_list_applications).post(registry::handle_create_application),
        )
        .route(
            "/api/v1/applications/stats",
            get(registry::handle_application_stats),
        )
        .route(
            "/api/v1/applications/:id",
            axum::routing::delete(registry::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(registry::handle_update_status),
        )
        // Skill gap
        .route("/api/v1/skill-gap/roles", get(skill_gap::handle_list_roles))
        .route("/api/v1/skill-gap/compare", post(skill_gap::handle_compare))
        .route(
            "/api/v1/skill-gap/analyze",
            post(skill_gap::handle_analyze).layer(DefaultBodyLimit::max(ANALYZE_BODY_LIMIT)),
        )
        // Bookmarks and resources
        .route(
            "/api/v1/bookmarks",
            get(services::handle_list_bookmarks)
                .post(services::handle_add_bookmark)
                .delete(services::handle_remove_bookmark),
        )
        .route("/api/v1/resources", get(services::handle_list_resources))
        // Chat
        .route("/api/v1/chat", post(chat::handle_chat))
        .route(
            "/api/v1/chat/transcript",
            get(chat::handle_get_transcript).delete(chat::handle_clear_transcript),
        )
        .with_state(state)
}
