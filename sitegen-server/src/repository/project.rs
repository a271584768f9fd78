//! Project Repository
//!
//! Handles all database operations related to projects.

use chrono::{DateTime, Utc};
use sitegen_core::domain::project::Project;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Insert a new project under the given slug
///
/// Returns `None` when the slug is already taken. The insert never raises a
/// unique violation, so it is safe to retry inside an open transaction.
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    slug: &str,
    prompt: &str,
    html: &str,
    model_id: &str,
) -> Result<Option<Project>, sqlx::Error> {
    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        prompt: prompt.to_string(),
        html: html.to_string(),
        model_id: model_id.to_string(),
        created_at: now,
        updated_at: now,
    };

    let inserted = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO projects (id, slug, prompt, html, model, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (slug) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(project.id)
    .bind(&project.slug)
    .bind(&project.prompt)
    .bind(&project.html)
    .bind(&project.model_id)
    .bind(now)
    .bind(now)
    .fetch_optional(executor)
    .await?;

    Ok(inserted.map(|_| project))
}

/// Find a project by ID
pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<Project>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, slug, prompt, html, model, created_at, updated_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Find a project by slug
pub async fn find_by_slug<'e>(
    executor: impl PgExecutor<'e>,
    slug: &str,
) -> Result<Option<Project>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, slug, prompt, html, model, created_at, updated_at
        FROM projects
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Replace the current artifact of a project
///
/// Returns the updated project, or `None` if no project has this ID.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    prompt: &str,
    html: &str,
    model_id: &str,
) -> Result<Option<Project>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        UPDATE projects
        SET prompt = $1, html = $2, model = $3, updated_at = $4
        WHERE id = $5
        RETURNING id, slug, prompt, html, model, created_at, updated_at
        "#,
    )
    .bind(prompt)
    .bind(html)
    .bind(model_id)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|r| r.into()))
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    slug: String,
    prompt: String,
    html: String,
    model: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            slug: row.slug,
            prompt: row.prompt,
            html: row.html,
            model_id: row.model,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
