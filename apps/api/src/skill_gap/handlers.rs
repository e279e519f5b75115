use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::services::resume::{ResumeUpload, SERVICE_NAME};
use crate::session::extractor::AuthenticatedUser;
use crate::skill_gap::analysis::{analyze_skill_gap, SkillGapResult};
use crate::skill_gap::catalog::role_names;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub resume_skills: Vec<String>,
    pub role: String,
}

/// GET /api/v1/skill-gap/roles
pub async fn handle_list_roles() -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: role_names(),
    })
}

/// POST /api/v1/skill-gap/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Json(req): Json<CompareRequest>,
) -> Result<Json<SkillGapResult>, AppError> {
    let result = analyze_skill_gap(&req.resume_skills, &req.role, state.config.match_mode)?;
    Ok(Json(result))
}

/// POST /api/v1/skill-gap/analyze
///
/// Multipart with a `file` field (the resume) and a `role` field.
pub async fn handle_analyze(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<Json<SkillGapResult>, AppError> {
    let mut upload: Option<ResumeUpload> = None;
    let mut role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::Validation("Invalid file".to_string()))?;
                upload = Some(ResumeUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("role") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| AppError::Validation("Invalid role field".to_string()))?;
                role = Some(text);
            }
            _ => {}
        }
    }

    let upload = upload
        .ok_or_else(|| AppError::Validation("Please upload your resume first".to_string()))?;
    let role = role
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Please select a job role".to_string()))?;

    upload.validate()?;

    info!(
        user = auth.uid(),
        file = %upload.file_name,
        role = %role,
        "Analyzing resume"
    );

    let skills = state
        .resume
        .extract_skills(&upload)
        .await
        .map_err(|e| e.into_app_error(SERVICE_NAME, "Error analyzing resume"))?;

    let result = analyze_skill_gap(&skills, &role, state.config.match_mode)?;
    Ok(Json(result))
}
