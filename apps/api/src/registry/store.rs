//! Application storage backends.
//!
//! `PgApplicationStore` is the production document store; `MemoryApplicationStore`
//! is used when no database is configured. Both enforce (owner, company, role)
//! uniqueness at insert time, on top of the caller's friendlier pre-check.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicationStatus, JobApplication, JobApplicationRow, NewApplication,
};
use crate::registry::DUPLICATE_MESSAGE;

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn exists(&self, owner_id: &str, company: &str, role: &str) -> Result<bool, AppError>;

    async fn insert(&self, application: NewApplication) -> Result<JobApplication, AppError>;

    /// All of one owner's applications, oldest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<JobApplication>, AppError>;

    /// Changes only the status. Another owner's record is `NotFound`.
    async fn update_status(
        &self,
        owner_id: &str,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<JobApplication, AppError>;

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), AppError>;
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Job application {id} not found"))
}

fn from_row(row: JobApplicationRow) -> Result<JobApplication, AppError> {
    JobApplication::try_from(row).map_err(|e| AppError::Internal(anyhow!(e)))
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn exists(&self, owner_id: &str, company: &str, role: &str) -> Result<bool, AppError> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM job_applications WHERE owner_id = $1 AND company = $2 AND role = $3)",
        )
        .bind(owner_id)
        .bind(company)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn insert(&self, application: NewApplication) -> Result<JobApplication, AppError> {
        let result = sqlx::query_as::<_, JobApplicationRow>(
            r#"
            INSERT INTO job_applications
                (id, owner_id, company, role, description, salary, status,
                 application_date, skills, url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&application.owner_id)
        .bind(&application.company)
        .bind(&application.role)
        .bind(&application.description)
        .bind(application.salary)
        .bind(application.status.as_str())
        .bind(application.application_date)
        .bind(&application.skills)
        .bind(&application.url)
        .fetch_one(&self.pool)
        .await;

        let row = match result {
            Ok(row) => row,
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(AppError::Conflict(DUPLICATE_MESSAGE.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        info!("Inserted job application {} for {}", row.id, row.owner_id);
        from_row(row)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<JobApplication>, AppError> {
        let rows = sqlx::query_as::<_, JobApplicationRow>(
            "SELECT * FROM job_applications WHERE owner_id = $1 ORDER BY created_at, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(from_row).collect()
    }

    async fn update_status(
        &self,
        owner_id: &str,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<JobApplication, AppError> {
        let row = sqlx::query_as::<_, JobApplicationRow>(
            "UPDATE job_applications SET status = $1 WHERE id = $2 AND owner_id = $3 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;

        from_row(row)
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        info!("Deleted job application {id}");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryApplicationStore {
    records: Mutex<Vec<JobApplication>>,
}

fn same_key(app: &JobApplication, owner_id: &str, company: &str, role: &str) -> bool {
    app.owner_id == owner_id && app.company == company && app.role == role
}

#[async_trait]
impl ApplicationStore for MemoryApplicationStore {
    async fn exists(&self, owner_id: &str, company: &str, role: &str) -> Result<bool, AppError> {
        let records = self.records.lock().await;
        Ok(records.iter().any(|a| same_key(a, owner_id, company, role)))
    }

    async fn insert(&self, application: NewApplication) -> Result<JobApplication, AppError> {
        let mut records = self.records.lock().await;
        if records
            .iter()
            .any(|a| same_key(a, &application.owner_id, &application.company, &application.role))
        {
            return Err(AppError::Conflict(DUPLICATE_MESSAGE.to_string()));
        }
        let stored = application.into_application(Uuid::new_v4(), Utc::now());
        records.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<JobApplication>, AppError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        owner_id: &str,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<JobApplication, AppError> {
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|a| a.id == id && a.owner_id == owner_id)
            .ok_or_else(|| not_found(id))?;
        record.status = status;
        Ok(record.clone())
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<(), AppError> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|a| !(a.id == id && a.owner_id == owner_id));
        if records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
