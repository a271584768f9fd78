//! Version Repository
//!
//! Append-only snapshots of a project's html.

use chrono::{DateTime, Utc};
use sitegen_core::domain::version::Version;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Append a snapshot to a project
pub async fn append<'e>(
    executor: impl PgExecutor<'e>,
    project_id: Uuid,
    prompt: &str,
    html: &str,
    model_id: &str,
) -> Result<Version, sqlx::Error> {
    let version = Version {
        id: Uuid::new_v4(),
        project_id,
        prompt: prompt.to_string(),
        html: html.to_string(),
        model_id: model_id.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO project_versions (id, project_id, prompt, html, model, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(version.id)
    .bind(project_id)
    .bind(&version.prompt)
    .bind(&version.html)
    .bind(&version.model_id)
    .bind(version.created_at)
    .execute(executor)
    .await?;

    Ok(version)
}

/// List the versions of a project, newest first
pub async fn list_by_project<'e>(
    executor: impl PgExecutor<'e>,
    project_id: Uuid,
) -> Result<Vec<Version>, sqlx::Error> {
    let rows = sqlx::query_as::<_, VersionRow>(
        r#"
        SELECT id, project_id, prompt, html, model, created_at
        FROM project_versions
        WHERE project_id = $1
        ORDER BY created_at DESC, seq DESC
        "#,
    )
    .bind(project_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct VersionRow {
    id: Uuid,
    project_id: Uuid,
    prompt: String,
    html: String,
    model: String,
    created_at: DateTime<Utc>,
}

impl From<VersionRow> for Version {
    fn from(row: VersionRow) -> Self {
        Version {
            id: row.id,
            project_id: row.project_id,
            prompt: row.prompt,
            html: row.html,
            model_id: row.model,
            created_at: row.created_at,
        }
    }
}
