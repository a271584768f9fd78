//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod generate;
pub mod health;
pub mod history;
pub mod project;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::repository::ProjectStore;
use crate::service::GenerationService;

/// Shared handles for every request
#[derive(Clone)]
pub struct AppState {
    pub generation: GenerationService,
    pub store: Arc<dyn ProjectStore>,
}

impl AppState {
    pub fn new(generation: GenerationService, store: Arc<dyn ProjectStore>) -> Self {
        Self { generation, store }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Generation
        .route("/generate", post(generate::generate))
        // Projects
        .route("/projects/{slug}", get(project::get_project))
        .route("/projects/{slug}/versions", get(project::list_versions))
        // History
        .route("/history", get(history::list_history))
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProjectStore;
    use crate::testing::FakeModel;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sitegen_pipeline::Pipeline;
    use tower::ServiceExt;

    fn test_app(model: FakeModel) -> Router {
        let store: Arc<dyn ProjectStore> = Arc::new(InMemoryProjectStore::new());
        let generation =
            GenerationService::new(Pipeline::new(Arc::new(model)), store.clone(), "gpt-4o-mini");
        create_router(AppState::new(generation, store))
    }

    async fn body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_generate(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(FakeModel::new());

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_generate_staged_returns_all_outputs() {
        let app = test_app(FakeModel::new());

        let response = app
            .oneshot(post_generate(serde_json::json!({
                "prompt": "Meu Site",
                "useLangGraph": true
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response.into_body()).await;
        assert_eq!(body["html"], FakeModel::reply(3));
        assert_eq!(body["estrutura"], FakeModel::reply(0));
        assert_eq!(body["conteudo"], FakeModel::reply(1));
        assert_eq!(body["design"], FakeModel::reply(2));
        assert_eq!(body["slug"], "meu-site");
        assert!(body["projectId"].is_string());
    }

    #[tokio::test]
    async fn test_generate_accepts_untyped_body() {
        let app = test_app(FakeModel::new());

        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .body(Body::from(r#"{"prompt":"Padaria"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response.into_body()).await;
        assert_eq!(body["html"], FakeModel::reply(0));
        assert!(body["estrutura"].is_null());
    }

    #[tokio::test]
    async fn test_generate_blank_prompt_is_bad_request() {
        let app = test_app(FakeModel::new());

        let response = app
            .oneshot(post_generate(serde_json::json!({ "prompt": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_bad_request() {
        let app = test_app(FakeModel::new());

        let request = Request::builder()
            .method("POST")
            .uri("/generate")
            .body(Body::from("not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_failure_is_generic_500() {
        let app = test_app(FakeModel::failing_at(1));

        let response = app
            .oneshot(post_generate(serde_json::json!({
                "prompt": "Meu Site",
                "useLangGraph": true
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"], error::GENERATION_FAILED);
    }

    #[tokio::test]
    async fn test_generate_unknown_project_is_not_found() {
        let app = test_app(FakeModel::new());

        let response = app
            .oneshot(post_generate(serde_json::json!({
                "prompt": "Loja",
                "projectId": uuid::Uuid::new_v4()
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_project_and_versions_after_regeneration() {
        let app = test_app(FakeModel::new());

        let first = app
            .clone()
            .oneshot(post_generate(serde_json::json!({ "prompt": "Loja de Bikes" })))
            .await
            .unwrap();
        let first = body_json(first.into_body()).await;

        let second = app
            .clone()
            .oneshot(post_generate(serde_json::json!({
                "prompt": "Loja de Bikes azul",
                "projectId": first["projectId"]
            })))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_request("/projects/loja-de-bikes")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let project = body_json(response.into_body()).await;
        assert_eq!(project["html"], FakeModel::reply(1));
        assert_eq!(project["prompt"], "Loja de Bikes azul");

        let response = app
            .clone()
            .oneshot(get_request("/projects/loja-de-bikes/versions"))
            .await
            .unwrap();
        let versions = body_json(response.into_body()).await;
        let versions = versions.as_array().unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0]["html"], FakeModel::reply(1));
        assert_eq!(versions[1]["html"], FakeModel::reply(0));

        let response = app.oneshot(get_request("/history?limit=1")).await.unwrap();
        let history = body_json(response.into_body()).await;
        assert_eq!(history.as_array().unwrap().len(), 1);
        assert_eq!(history[0]["prompt"], "Loja de Bikes azul");
    }

    #[tokio::test]
    async fn test_unknown_project_slug() {
        let app = test_app(FakeModel::new());

        let response = app.oneshot(get_request("/projects/nada")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response.into_body()).await;
        assert_eq!(body["error"], "Project 'nada' not found");
    }
}
