//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use newsroom::adapters::{ContentSource, PostQuery, SourceError};
use newsroom::domain::RawCategory;
use newsroom::{Gateway, GatewayConfig};
use serde_json::{json, Value};

/// In-memory repository with optional failures and latency
#[derive(Default)]
pub struct MemorySource {
    pub posts: Vec<Value>,
    pub categories: Vec<RawCategory>,
    /// Error returned by listing requests (no slug filter)
    pub listing_error: Option<SourceError>,
    /// Error returned by slug lookups
    pub slug_error: Option<SourceError>,
    /// Latency added to every posts request
    pub delay: Duration,
    /// Posts requests that ran to completion
    pub completed: AtomicUsize,
}

impl MemorySource {
    pub fn with_posts(posts: Vec<Value>) -> Self {
        Self {
            posts,
            ..Self::default()
        }
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn posts(&self, query: &PostQuery) -> Result<Vec<Value>, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if let Some(slug) = &query.slug {
            if let Some(err) = &self.slug_error {
                return Err(err.clone());
            }
            return Ok(self
                .posts
                .iter()
                .filter(|p| p["slug"] == slug.as_str())
                .cloned()
                .collect());
        }

        if let Some(err) = &self.listing_error {
            return Err(err.clone());
        }

        let posts = self.posts.iter().filter(|p| match query.category {
            Some(id) => p["categories"]
                .as_array()
                .is_some_and(|ids| ids.iter().any(|c| c.as_u64() == Some(id))),
            None => true,
        });
        Ok(posts.take(query.per_page as usize).cloned().collect())
    }

    async fn categories(&self, slug: &str) -> Result<Vec<RawCategory>, SourceError> {
        Ok(self
            .categories
            .iter()
            .filter(|c| c.slug == slug)
            .cloned()
            .collect())
    }
}

pub fn config() -> GatewayConfig {
    GatewayConfig::new("http://cms.test/wp-json/wp/v2")
}

pub fn gateway(source: Arc<MemorySource>) -> Gateway {
    Gateway::new(source, &config())
}

/// A post in WordPress `_embed` shape
pub fn post(id: u64, slug: &str, category: &str, date: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "date": date,
        "title": { "rendered": format!("Post {}", id) },
        "excerpt": { "rendered": format!("<p>Excerpt for {}</p>", slug) },
        "content": { "rendered": format!("<h2>About {}</h2><p>Body</p>", slug) },
        "categories": [],
        "_embedded": {
            "author": [{ "name": "Jane Doe" }],
            "wp:featuredmedia": [{ "source_url": format!("https://cdn.test/{}.jpg", slug) }],
            "wp:term": [[{ "name": category, "slug": category.to_lowercase() }]]
        }
    })
}

/// `count` posts, newest first, one day apart
pub fn dated_posts(count: u64, category: &str) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let day = 28 - i;
            post(
                i + 1,
                &format!("{}-{}", category.to_lowercase(), i + 1),
                category,
                &format!("2024-02-{:02}T09:00:00", day),
            )
        })
        .collect()
}
