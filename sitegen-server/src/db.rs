use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Append-only log of every successful generation
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS history (
            seq BIGSERIAL PRIMARY KEY,
            id UUID NOT NULL UNIQUE,
            prompt TEXT NOT NULL,
            html TEXT NOT NULL,
            model VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Current artifact per site
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id UUID PRIMARY KEY,
            slug VARCHAR(255) NOT NULL UNIQUE,
            prompt TEXT NOT NULL,
            html TEXT NOT NULL,
            model VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Immutable snapshots, one per successful generation
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS project_versions (
            seq BIGSERIAL PRIMARY KEY,
            id UUID NOT NULL UNIQUE,
            project_id UUID NOT NULL REFERENCES projects(id),
            prompt TEXT NOT NULL,
            html TEXT NOT NULL,
            model VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_history_created_at ON history(created_at DESC)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_project_versions_project ON project_versions(project_id, created_at DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
