//! Project reference resolution
//!
//! Commands accept a project either by slug or by its full UUID.

use anyhow::{Context, Result};
use sitegen_client::SitegenClient;
use uuid::Uuid;

/// A project named on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    Id(Uuid),
    Slug(String),
}

impl ProjectRef {
    pub fn parse(input: &str) -> Self {
        match Uuid::parse_str(input) {
            Ok(id) => ProjectRef::Id(id),
            Err(_) => ProjectRef::Slug(input.to_string()),
        }
    }
}

/// Resolve a project reference to its ID
///
/// UUIDs are used as they are; slugs are looked up on the server.
pub async fn resolve_project_id(client: &SitegenClient, reference: &ProjectRef) -> Result<Uuid> {
    match reference {
        ProjectRef::Id(id) => Ok(*id),
        ProjectRef::Slug(slug) => {
            let project = client
                .get_project(slug)
                .await
                .with_context(|| format!("No project found with slug '{}'", slug))?;
            Ok(project.id)
        }
    }
}
