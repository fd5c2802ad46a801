//! Normalized content items.
//!
//! A `ContentItem` is the UI-agnostic view of one CMS post. Items are built
//! once by the gateway and never mutated afterwards; every listing view
//! borrows from the same collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category label used when a record carries no taxonomy term
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Author label used when a record has no embedded author
pub const DEFAULT_AUTHOR: &str = "Admin";

/// A normalized content record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Source identifier (unique within a fetch batch)
    pub id: u64,

    /// URL-safe lookup key
    pub slug: String,

    /// Plain-text title
    pub title: String,

    /// Plain-text summary, truncated for list display
    pub excerpt: String,

    /// Full HTML body, passed through untouched
    pub body: String,

    /// Publish timestamp, used for ordering
    pub published_at: DateTime<Utc>,

    /// Display label of the first category
    pub category_label: String,

    /// Lower-cased `category_label`, used for filtering
    pub category_key: String,

    /// Featured image, if any
    pub image_url: Option<String>,

    /// Display name of the author
    pub author: String,
}

impl ContentItem {
    /// Create an item with default category, author and no image
    pub fn new(
        id: u64,
        slug: impl Into<String>,
        title: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug: slug.into(),
            title: title.into(),
            excerpt: String::new(),
            body: String::new(),
            published_at,
            category_label: UNCATEGORIZED.to_string(),
            category_key: category_key(UNCATEGORIZED),
            image_url: None,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    /// Set the category; the filter key is derived from the label
    pub fn with_category(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.category_key = category_key(&label);
        self.category_label = label;
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Date as shown on listing cards, e.g. `Mar 5, 2024`
    pub fn short_date(&self) -> String {
        self.published_at.format("%b %-d, %Y").to_string()
    }

    /// Date as shown on the detail page, e.g. `March 5, 2024`
    pub fn long_date(&self) -> String {
        self.published_at.format("%B %-d, %Y").to_string()
    }
}

/// Derive the filter key for a category label
pub fn category_key(label: &str) -> String {
    label.to_lowercase()
}
