//! Generation DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which code path produces the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Four chained model calls: structure, content, design, html
    Staged,
    /// A single model call that writes the html directly
    Direct,
}

/// Request body for `POST /generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    /// Model identifier; the server default is used when absent or blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Existing project to regenerate; a new project is created when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    /// Selects the staged pipeline instead of the single-call path
    #[serde(default)]
    pub use_lang_graph: bool,
}

impl GenerateRequest {
    pub fn mode(&self) -> GenerationMode {
        if self.use_lang_graph {
            GenerationMode::Staged
        } else {
            GenerationMode::Direct
        }
    }
}

/// Response body for `POST /generate`
///
/// The three intermediate outputs are only present for staged runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub html: String,
    #[serde(rename = "estrutura")]
    pub structure: Option<String>,
    #[serde(rename = "conteudo")]
    pub content: Option<String>,
    pub design: Option<String>,
    pub project_id: Uuid,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_direct_mode() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"prompt": "a bakery landing page"}"#).unwrap();

        assert_eq!(req.prompt, "a bakery landing page");
        assert!(req.model.is_none());
        assert!(req.project_id.is_none());
        assert_eq!(req.mode(), GenerationMode::Direct);
    }

    #[test]
    fn test_request_reads_camel_case_fields() {
        let id = Uuid::new_v4();
        let body = serde_json::json!({
            "prompt": "portfolio",
            "model": "gpt-4o",
            "projectId": id,
            "useLangGraph": true,
        });

        let req: GenerateRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.model.as_deref(), Some("gpt-4o"));
        assert_eq!(req.project_id, Some(id));
        assert_eq!(req.mode(), GenerationMode::Staged);
    }

    #[test]
    fn test_response_uses_dashboard_field_names() {
        let resp = GenerateResponse {
            html: "<!DOCTYPE html><html></html>".to_string(),
            structure: Some("s".to_string()),
            content: Some("c".to_string()),
            design: Some("d".to_string()),
            project_id: Uuid::new_v4(),
            slug: "meu-site".to_string(),
        };

        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["estrutura"], "s");
        assert_eq!(value["conteudo"], "c");
        assert_eq!(value["design"], "d");
        assert_eq!(value["slug"], "meu-site");
        assert!(value.get("projectId").is_some());
    }
}
