//! Content gateway: fetch and normalize.
//!
//! Two API layers share one implementation. The `try_*` methods return a
//! `FetchOutcome` that keeps failures visible; the plain methods fold every
//! failure into "no data" so a broken repository degrades a page to an empty
//! listing instead of an error.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::adapters::{ContentSource, PostQuery, SourceError, WordPressSource, MAX_PER_PAGE};
use crate::config::GatewayConfig;
use crate::domain::{category_key, ContentItem, FetchOutcome};

use super::normalize::Normalizer;

/// Fetches content items from a repository
#[derive(Clone)]
pub struct Gateway {
    /// Repository adapter
    source: Arc<dyn ContentSource>,
    /// Record normalizer
    normalizer: Normalizer,
    /// Batch size for listing requests
    per_page: u32,
}

impl Gateway {
    /// Create a gateway over any source
    pub fn new(source: Arc<dyn ContentSource>, config: &GatewayConfig) -> Self {
        Self {
            source,
            normalizer: Normalizer::from_config(config),
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Create a gateway backed by the WordPress REST API
    pub fn wordpress(config: &GatewayConfig) -> Self {
        Self::new(Arc::new(WordPressSource::from_config(config)), config)
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Most recent items, newest first
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn try_fetch_all(&self) -> FetchOutcome<Vec<ContentItem>> {
        self.fetch_posts(PostQuery::latest(self.per_page)).await
    }

    /// One item by slug; the first match wins if the repository has several
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn try_fetch_by_slug(&self, slug: &str) -> FetchOutcome<ContentItem> {
        let slug = slug.trim();
        if slug.is_empty() {
            return FetchOutcome::Empty;
        }

        self.fetch_posts(PostQuery::by_slug(slug))
            .await
            .map(|items| items.into_iter().next())
            .and_then_present()
    }

    /// Items in a category, resolved through the taxonomy lookup
    #[instrument(skip(self), fields(source = %self.source.name()))]
    pub async fn try_fetch_by_category(&self, key: &str) -> FetchOutcome<Vec<ContentItem>> {
        let slug = category_key(key.trim());
        if slug.is_empty() {
            return FetchOutcome::Empty;
        }

        let categories = match self.source.categories(&slug).await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, category = %slug, "Category lookup failed");
                return FetchOutcome::Failed(e);
            }
        };

        let Some(category) = categories.first() else {
            info!(category = %slug, "Category not found");
            return FetchOutcome::Empty;
        };
        debug!(category = %slug, id = category.id, "Resolved category");

        self.fetch_posts(PostQuery::in_category(category.id, self.per_page))
            .await
    }

    /// Fail-soft `try_fetch_all`
    pub async fn fetch_all(&self) -> Vec<ContentItem> {
        self.try_fetch_all().await.into_items()
    }

    /// Fail-soft `try_fetch_by_slug`
    pub async fn fetch_by_slug(&self, slug: &str) -> Option<ContentItem> {
        self.try_fetch_by_slug(slug).await.loaded()
    }

    /// Fail-soft `try_fetch_by_category`
    pub async fn fetch_by_category(&self, key: &str) -> Vec<ContentItem> {
        self.try_fetch_by_category(key).await.into_items()
    }

    async fn fetch_posts(&self, query: PostQuery) -> FetchOutcome<Vec<ContentItem>> {
        match self.source.posts(&query).await {
            Ok(values) => {
                let received = values.len();
                let items = self.normalizer.normalize_batch(values);
                debug!(received, kept = items.len(), "Normalized posts");
                if received > 0 && items.is_empty() {
                    warn!(received, ?query, "No post in the response could be normalized");
                    return FetchOutcome::Failed(SourceError::Malformed(format!(
                        "none of {} posts could be normalized",
                        received
                    )));
                }
                FetchOutcome::from_items(items)
            }
            Err(e) => {
                warn!(error = %e, ?query, "Fetching posts failed");
                FetchOutcome::Failed(e)
            }
        }
    }
}

impl<T> FetchOutcome<Option<T>> {
    /// Collapse `Loaded(None)` into `Empty`
    fn and_then_present(self) -> FetchOutcome<T> {
        match self {
            FetchOutcome::Loaded(Some(value)) => FetchOutcome::Loaded(value),
            FetchOutcome::Loaded(None) | FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::Failed(e) => FetchOutcome::Failed(e),
        }
    }
}
