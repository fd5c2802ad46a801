//! Raw record shapes served by the content repository.
//!
//! These mirror the WordPress REST payloads closely enough to pull out the
//! fields the gateway needs. Embedded blocks are decoded leniently: a block
//! with an unexpected shape is treated as absent rather than failing the
//! whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A post as returned by `GET /posts?_embed`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawContentRecord {
    pub id: u64,

    pub slug: String,

    /// ISO-8601 timestamp, usually without an offset
    pub date: String,

    #[serde(default)]
    pub title: Rendered,

    #[serde(default)]
    pub excerpt: Rendered,

    #[serde(default)]
    pub content: Rendered,

    /// Taxonomy ids the post is tagged with
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Vec<u64>,

    #[serde(default, rename = "_embedded", deserialize_with = "lenient")]
    pub embedded: Embedded,
}

/// `{ "rendered": "<html>" }` wrapper used for title, excerpt and content
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// Related resources inlined by `_embed`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Embedded {
    #[serde(default, deserialize_with = "lenient")]
    pub author: Vec<RawAuthor>,

    #[serde(default, rename = "wp:featuredmedia", deserialize_with = "lenient")]
    pub featured_media: Vec<RawMedia>,

    /// Term groups; the first group holds categories, the second tags
    #[serde(default, rename = "wp:term", deserialize_with = "lenient")]
    pub terms: Vec<Vec<RawTerm>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMedia {
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTerm {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,
}

/// A taxonomy entry as returned by `GET /categories?slug=`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawCategory {
    pub id: u64,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub name: String,
}

impl RawContentRecord {
    /// First embedded author name, if present and non-empty
    pub fn author_name(&self) -> Option<&str> {
        self.embedded
            .author
            .first()
            .and_then(|a| a.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    /// Featured media URL, if present and non-empty
    pub fn image_url(&self) -> Option<&str> {
        self.embedded
            .featured_media
            .first()
            .and_then(|m| m.source_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    /// Name of the first category term, if any
    pub fn first_term_name(&self) -> Option<&str> {
        self.embedded
            .terms
            .first()
            .and_then(|group| group.first())
            .and_then(|term| term.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }
}

/// Decode a field, falling back to its default when the shape is unexpected
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
