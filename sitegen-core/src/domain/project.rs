//! Project domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The current artifact for one site
///
/// Created by the first successful generation without a project id and
/// updated in place by every later generation that targets it. The slug is
/// assigned once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub slug: String,
    pub prompt: String,
    pub html: String,
    #[serde(rename = "model")]
    pub model_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
