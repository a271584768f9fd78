//! History Repository

use chrono::{DateTime, Utc};
use sitegen_core::domain::history::HistoryEntry;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Record one successful generation
pub async fn record<'e>(
    executor: impl PgExecutor<'e>,
    prompt: &str,
    html: &str,
    model_id: &str,
) -> Result<HistoryEntry, sqlx::Error> {
    let entry = HistoryEntry {
        id: Uuid::new_v4(),
        prompt: prompt.to_string(),
        html: html.to_string(),
        model_id: model_id.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO history (id, prompt, html, model, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(entry.id)
    .bind(&entry.prompt)
    .bind(&entry.html)
    .bind(&entry.model_id)
    .bind(entry.created_at)
    .execute(executor)
    .await?;

    Ok(entry)
}

/// List history entries, newest first
pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    limit: i64,
) -> Result<Vec<HistoryEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"
        SELECT id, prompt, html, model, created_at
        FROM history
        ORDER BY created_at DESC, seq DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    prompt: String,
    html: String,
    model: String,
    created_at: DateTime<Utc>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        HistoryEntry {
            id: row.id,
            prompt: row.prompt,
            html: row.html,
            model_id: row.model,
            created_at: row.created_at,
        }
    }
}
