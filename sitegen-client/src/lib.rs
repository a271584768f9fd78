//! Sitegen HTTP Client
//!
//! A simple, type-safe HTTP client for the Sitegen server API.
//!
//! # Example
//!
//! ```no_run
//! use sitegen_client::SitegenClient;
//! use sitegen_core::dto::generate::GenerateRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SitegenClient::new("http://localhost:8080");
//!
//!     let site = client.generate(&GenerateRequest {
//!         prompt: "Landing page for a bakery".to_string(),
//!         model: None,
//!         project_id: None,
//!         use_lang_graph: true,
//!     }).await?;
//!
//!     println!("Generated {} ({} bytes)", site.slug, site.html.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod generate;
mod projects;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Sitegen server API
///
/// Covers site generation, project and version lookup, and the generation
/// history.
#[derive(Debug, Clone)]
pub struct SitegenClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl SitegenClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use sitegen_client::SitegenClient;
    ///
    /// let client = SitegenClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// A staged generation makes four model calls in a row, so any request
    /// timeout set here should leave room for several minutes.
    ///
    /// # Example
    /// ```
    /// use sitegen_client::SitegenClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(600))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = SitegenClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize a JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &body));
        }

        Ok(())
    }
}
