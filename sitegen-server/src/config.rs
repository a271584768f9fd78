//! Server configuration
//!
//! Everything the server needs is read from the environment once at startup.

use std::time::Duration;

use sitegen_pipeline::OpenAiConfig;
use sitegen_pipeline::orchestrator::DEFAULT_STAGE_TIMEOUT;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Postgres connection string; projects live in memory when absent
    pub database_url: Option<String>,

    pub db_max_connections: u32,

    /// Model used when a request names none
    pub default_model: String,

    /// Upper bound on a single stage's model call
    pub stage_timeout: Duration,

    pub openai: OpenAiConfig,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(openai_api_key: String) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            db_max_connections: 10,
            default_model: DEFAULT_MODEL.to_string(),
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
            openai: OpenAiConfig::new(openai_api_key),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - OPENAI_API_KEY (required)
    /// - OPENAI_PROJECT_ID (optional)
    /// - OPENAI_BASE_URL (optional, default: https://api.openai.com/v1)
    /// - DATABASE_URL (optional)
    /// - SITEGEN_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - SITEGEN_DEFAULT_MODEL (optional, default: gpt-4o-mini)
    /// - SITEGEN_STAGE_TIMEOUT (optional, seconds, default: 120)
    /// - SITEGEN_DB_MAX_CONNECTIONS (optional, default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let mut config = Self::new(api_key);

        if let Some(project) = non_empty_var("OPENAI_PROJECT_ID") {
            config.openai = config.openai.with_project(project);
        }

        if let Some(base_url) = non_empty_var("OPENAI_BASE_URL") {
            config.openai = config.openai.with_base_url(base_url);
        }

        config.database_url = non_empty_var("DATABASE_URL");

        if let Some(addr) = non_empty_var("SITEGEN_BIND_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(model) = non_empty_var("SITEGEN_DEFAULT_MODEL") {
            config.default_model = model;
        }

        if let Some(timeout) = non_empty_var("SITEGEN_STAGE_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
        {
            config.stage_timeout = timeout;
        }

        if let Some(max) = non_empty_var("SITEGEN_DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse::<u32>().ok())
        {
            config.db_max_connections = max;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.openai.api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY cannot be empty");
        }

        if !self.openai.base_url.starts_with("http://")
            && !self.openai.base_url.starts_with("https://")
        {
            anyhow::bail!("OPENAI_BASE_URL must start with http:// or https://");
        }

        if self.default_model.trim().is_empty() {
            anyhow::bail!("default_model cannot be empty");
        }

        if self.stage_timeout.is_zero() {
            anyhow::bail!("stage_timeout must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("db_max_connections must be greater than 0");
        }

        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
