//! Adapter interfaces for content repositories.
//!
//! A `ContentSource` hands back raw post payloads and taxonomy entries. The
//! gateway owns normalization; sources only move JSON.

pub mod wordpress;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::RawCategory;

// Re-export the WordPress adapter
pub use wordpress::WordPressSource;

/// Largest page the WordPress REST API will serve
pub const MAX_PER_PAGE: u32 = 100;

/// Failure talking to a content repository
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,
}

/// Parameters for a post listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Page size (clamped to `MAX_PER_PAGE`)
    pub per_page: u32,

    /// Exact slug match
    pub slug: Option<String>,

    /// Taxonomy id filter
    pub category: Option<u64>,
}

impl PostQuery {
    /// Most recent posts first
    pub fn latest(per_page: u32) -> Self {
        Self {
            per_page: per_page.clamp(1, MAX_PER_PAGE),
            slug: None,
            category: None,
        }
    }

    /// Single post lookup by slug
    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            per_page: 1,
            slug: Some(slug.into()),
            category: None,
        }
    }

    /// Most recent posts tagged with a taxonomy id
    pub fn in_category(category: u64, per_page: u32) -> Self {
        Self {
            category: Some(category),
            ..Self::latest(per_page)
        }
    }

    /// Query-string pairs in WordPress REST form
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("_embed", "1".to_string()),
            ("per_page", self.per_page.to_string()),
            ("orderby", "date".to_string()),
            ("order", "desc".to_string()),
        ];
        if let Some(slug) = &self.slug {
            params.push(("slug", slug.clone()));
        }
        if let Some(category) = self.category {
            params.push(("categories", category.to_string()));
        }
        params
    }
}

/// Trait for content repositories
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch raw post payloads; each element is decoded by the gateway
    async fn posts(&self, query: &PostQuery) -> Result<Vec<serde_json::Value>, SourceError>;

    /// Look up taxonomy entries by slug
    async fn categories(&self, slug: &str) -> Result<Vec<RawCategory>, SourceError>;
}
