use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::profile::{UserProfile, UserProfileRow};

/// Per-user profile documents. There is no delete: profiles live as long as the account.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, AppError>;

    /// Writes the whole document, creating it on first use.
    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn from_row(row: UserProfileRow) -> Result<UserProfile, AppError> {
    UserProfile::try_from(row).map_err(|e| AppError::Internal(anyhow!(e)))
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        let row = sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE id = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;

        row.map(from_row).transpose()
    }

    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, AppError> {
        let age = profile
            .age
            .map(i32::try_from)
            .transpose()
            .map_err(|_| AppError::Validation("Age is out of range".to_string()))?;
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            INSERT INTO user_profiles (id, name, email, age, status, qualifications, resume_file_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                age = EXCLUDED.age,
                status = EXCLUDED.status,
                qualifications = EXCLUDED.qualifications,
                resume_file_name = EXCLUDED.resume_file_name
            RETURNING *
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(age)
        .bind(profile.status.map(|s| s.as_str()))
        .bind(&profile.qualifications)
        .bind(&profile.resume_file_name)
        .fetch_one(&self.pool)
        .await?;

        from_row(row)
    }
}

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn upsert(&self, profile: UserProfile) -> Result<UserProfile, AppError> {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}
