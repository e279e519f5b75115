use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::services::{error_from_response, join_url, ServiceError};

pub const SERVICE_NAME: &str = "Resume analysis service";

const ANALYZE_ENDPOINT: &str = "/analyze_resume";
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// A resume file as received from the browser.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeUpload {
    /// Checks type (PDF, DOC, DOCX by content type or extension) and the 5 MB cap.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::Validation("Please upload your resume first".to_string()));
        }

        let type_ok = self
            .content_type
            .as_deref()
            .map(|ct| ALLOWED_CONTENT_TYPES.contains(&ct))
            .unwrap_or(false);
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        let ext_ok = extension
            .as_deref()
            .map(|ext| ALLOWED_EXTENSIONS.contains(&ext))
            .unwrap_or(false);

        if !type_ok && !ext_ok {
            return Err(AppError::Validation(
                "Please upload a PDF, DOC, or DOCX file".to_string(),
            ));
        }
        if self.bytes.len() > MAX_RESUME_BYTES {
            return Err(AppError::Validation(
                "File size should be less than 5MB".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    skills: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the resume analysis service: uploads a resume, gets skill strings back.
#[derive(Clone)]
pub struct ResumeClient {
    client: Client,
    base_url: String,
}

impl ResumeClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Sends the file as multipart field `file` and returns the extracted skills.
    /// An empty list is a valid answer; deciding what to do with it is the caller's job.
    pub async fn extract_skills(&self, upload: &ResumeUpload) -> Result<Vec<String>, ServiceError> {
        let url = join_url(&self.base_url, ANALYZE_ENDPOINT);

        let mut part = Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
        if let Some(ct) = upload.content_type.as_deref() {
            part = part.mime_str(ct)?;
        }
        let form = Form::new().part("file", part);

        info!("Calling resume analysis service: {url}");

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            warn!("Resume analysis failed: {err}");
            return Err(err);
        }

        let body: AnalyzeResponse = response.json().await?;
        match (body.skills, body.error) {
            (Some(skills), _) => Ok(skills),
            (None, Some(error)) => Err(ServiceError::Rejected(error)),
            (None, None) => Ok(Vec::new()),
        }
    }
}
