//! Job application registry: create (with duplicate guard), list, status update, delete.

pub mod handlers;
pub mod stats;
pub mod store;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication, NewApplication};
use store::ApplicationStore;

pub const DUPLICATE_MESSAGE: &str = "You have already added this job application!";
const REQUIRED_FIELDS_MESSAGE: &str = "Please fill all required fields!";

/// Skills as a list, or as the comma-separated text typed into the form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::List(Vec::new())
    }
}

impl SkillsInput {
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            SkillsInput::List(list) => list,
            SkillsInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplicationRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub application_date: Option<NaiveDate>,
    #[serde(default)]
    pub skills: SkillsInput,
    #[serde(default)]
    pub url: Option<String>,
}

impl CreateApplicationRequest {
    fn into_new_application(self, owner_id: &str) -> Result<NewApplication, AppError> {
        let company = self.company.trim().to_string();
        let role = self.role.trim().to_string();
        let application_date = match self.application_date {
            Some(date) if !company.is_empty() && !role.is_empty() => date,
            _ => return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
        };

        if let Some(salary) = self.salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(AppError::Validation(
                    "salary must be a non-negative number".to_string(),
                ));
            }
        }

        Ok(NewApplication {
            owner_id: owner_id.to_string(),
            company,
            role,
            description: self.description.trim().to_string(),
            salary: self.salary,
            status: self.status,
            application_date,
            skills: self.skills.into_list(),
            url: self
                .url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        })
    }
}

/// Validates the request, rejects a repeat of (owner, company, role), then stores it.
pub async fn create_application(
    store: &dyn ApplicationStore,
    owner_id: &str,
    request: CreateApplicationRequest,
) -> Result<JobApplication, AppError> {
    let new = request.into_new_application(owner_id)?;

    if store.exists(owner_id, &new.company, &new.role).await? {
        return Err(AppError::Conflict(DUPLICATE_MESSAGE.to_string()));
    }

    let created = store.insert(new).await?;
    info!(
        "Job application added: {} at {} ({})",
        created.role, created.company, created.id
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::store::MemoryApplicationStore;

    fn request(company: &str, role: &str) -> CreateApplicationRequest {
        serde_json::from_value(serde_json::json!({
            "company": company,
            "role": role,
            "application_date": "2024-05-01",
            "skills": "sql, python , ,excel",
            "salary": 55000.0
        }))
        .unwrap()
    }

    #[test]
    fn test_skills_text_is_split_and_trimmed() {
        let skills = SkillsInput::Text("sql, python , ,excel".to_string()).into_list();
        assert_eq!(skills, vec!["sql", "python", "excel"]);
    }

    #[test]
    fn test_skills_list_is_accepted() {
        let req: CreateApplicationRequest = serde_json::from_value(serde_json::json!({
            "company": "Acme", "role": "Dev", "application_date": "2024-05-01",
            "skills": ["rust", " go "]
        }))
        .unwrap();
        assert_eq!(req.skills.into_list(), vec!["rust", "go"]);
    }

    #[tokio::test]
    async fn test_second_identical_submission_is_rejected() {
        let store = MemoryApplicationStore::default();
        create_application(&store, "u1", request("Acme", "Analyst"))
            .await
            .unwrap();

        let err = create_application(&store, "u1", request("Acme", "Analyst"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg == DUPLICATE_MESSAGE));
        assert_eq!(store.list_by_owner("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_required_fields() {
        let store = MemoryApplicationStore::default();
        let mut req = request("Acme", "  ");
        let err = create_application(&store, "u1", req.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        req.role = "Analyst".to_string();
        req.application_date = None;
        let err = create_application(&store, "u1", req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == REQUIRED_FIELDS_MESSAGE));
    }

    #[tokio::test]
    async fn test_negative_salary_is_rejected() {
        let store = MemoryApplicationStore::default();
        let mut req = request("Acme", "Analyst");
        req.salary = Some(-1.0);
        assert!(matches!(
            create_application(&store, "u1", req).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_created_record_defaults() {
        let store = MemoryApplicationStore::default();
        let created = create_application(&store, "u1", request(" Acme ", "Analyst"))
            .await
            .unwrap();
        assert_eq!(created.company, "Acme");
        assert_eq!(created.status, ApplicationStatus::Applied);
        assert_eq!(created.skills, vec!["sql", "python", "excel"]);
        assert_eq!(created.url, None);
    }
}
