//! Version domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable snapshot of a project's artifact
///
/// One is appended per successful generation, whether that generation created
/// or updated the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: Uuid,
    pub project_id: Uuid,
    pub prompt: String,
    pub html: String,
    #[serde(rename = "model")]
    pub model_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
