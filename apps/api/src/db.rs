use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL connection pool and makes sure the tables exist.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    ensure_schema(&pool)
        .await
        .context("Failed to create database schema")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            age INTEGER,
            status TEXT,
            qualifications TEXT NOT NULL DEFAULT '',
            resume_file_name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_applications (
            id UUID PRIMARY KEY,
            owner_id TEXT NOT NULL,
            company TEXT NOT NULL,
            role TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            salary DOUBLE PRECISION,
            status TEXT NOT NULL DEFAULT 'Applied',
            application_date DATE NOT NULL,
            skills TEXT[] NOT NULL DEFAULT '{}',
            url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One application per (owner, company, role).
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_job_applications_owner_company_role \
         ON job_applications (owner_id, company, role)",
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}
