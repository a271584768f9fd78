//! Generation history types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the append-only generation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub prompt: String,
    pub html: String,
    #[serde(rename = "model")]
    pub model_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
