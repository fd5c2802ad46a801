//! Normalization of raw repository records into `ContentItem`s.
//!
//! Title, excerpt and category label are reduced to plain text (entities
//! decoded, tags stripped, whitespace collapsed). The body is kept as HTML.
//! Excerpts are cut on grapheme boundaries.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use scraper::Html;
use thiserror::Error;
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::GatewayConfig;
use crate::domain::{ContentItem, RawContentRecord, DEFAULT_AUTHOR, UNCATEGORIZED};

/// Marker appended to truncated excerpts
pub const ELLIPSIS: &str = "...";

/// Why a single record could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("unexpected record shape: {0}")]
    Shape(String),

    #[error("record {id} has an empty slug")]
    MissingSlug { id: u64 },

    #[error("record {id} has an unparsable date '{value}'")]
    InvalidTimestamp { id: u64, value: String },

    #[error("record {id} repeats slug '{slug}'")]
    DuplicateSlug { id: u64, slug: String },
}

/// Converts raw records into content items
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Excerpt budget in graphemes
    excerpt_chars: usize,
    /// Author used when a record has none
    default_author: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(150, DEFAULT_AUTHOR)
    }
}

impl Normalizer {
    pub fn new(excerpt_chars: usize, default_author: impl Into<String>) -> Self {
        Self {
            excerpt_chars,
            default_author: default_author.into(),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.excerpt_chars, config.default_author.clone())
    }

    /// Normalize one decoded record
    pub fn normalize(&self, record: &RawContentRecord) -> Result<ContentItem, NormalizeError> {
        let slug = record.slug.trim();
        if slug.is_empty() {
            return Err(NormalizeError::MissingSlug { id: record.id });
        }

        let published_at =
            parse_timestamp(&record.date).ok_or_else(|| NormalizeError::InvalidTimestamp {
                id: record.id,
                value: record.date.clone(),
            })?;

        let label = record
            .first_term_name()
            .map(html_to_text)
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        let excerpt = truncate_graphemes(
            &html_to_text(&record.excerpt.rendered),
            self.excerpt_chars,
        );

        let title = html_to_text(&record.title.rendered);
        let mut item = ContentItem::new(record.id, slug, title, published_at)
            .with_category(label)
            .with_excerpt(excerpt)
            .with_body(record.content.rendered.clone())
            .with_author(
                record
                    .author_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.default_author.clone()),
            );
        if let Some(url) = record.image_url() {
            item = item.with_image(url);
        }

        Ok(item)
    }

    /// Normalize one raw JSON value
    pub fn normalize_value(&self, value: serde_json::Value) -> Result<ContentItem, NormalizeError> {
        let record: RawContentRecord =
            serde_json::from_value(value).map_err(|e| NormalizeError::Shape(e.to_string()))?;
        self.normalize(&record)
    }

    /// Normalize a batch, skipping records that fail and later duplicate slugs
    pub fn normalize_batch(&self, values: Vec<serde_json::Value>) -> Vec<ContentItem> {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(values.len());

        for value in values {
            let result = self.normalize_value(value).and_then(|item| {
                if seen.insert(item.slug.clone()) {
                    Ok(item)
                } else {
                    Err(NormalizeError::DuplicateSlug {
                        id: item.id,
                        slug: item.slug,
                    })
                }
            });

            match result {
                Ok(item) => items.push(item),
                Err(e) => warn!(error = %e, "Skipping record"),
            }
        }

        items
    }
}

/// Parse an RFC 3339 timestamp, or an offset-less one taken as UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Decode entities, strip tags and collapse whitespace
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `budget` graphemes, appending `ELLIPSIS` when cut
pub fn truncate_graphemes(text: &str, budget: usize) -> String {
    match text.grapheme_indices(true).nth(budget) {
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_html_to_text() {
        assert_eq!(html_to_text("Tools &amp; Tips"), "Tools & Tips");
        assert_eq!(
            html_to_text("<p>Hello <strong>world</strong>&hellip;</p>\n"),
            "Hello world\u{2026}"
        );
        assert_eq!(html_to_text("  <p>a</p>\n\n<p>b</p> "), "a b");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_graphemes("short", 150), "short");
        assert_eq!(truncate_graphemes("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_respects_graphemes() {
        // 'e' + combining acute is one grapheme spanning three bytes
        let text = "e\u{301}".repeat(10);
        let cut = truncate_graphemes(&text, 4);
        assert_eq!(cut, format!("{}...", "e\u{301}".repeat(4)));
    }

    #[test]
    fn test_truncate_trims_trailing_space() {
        assert_eq!(truncate_graphemes("abc def", 4), "abc...");
    }

    #[test]
    fn test_parse_timestamp() {
        let naive = parse_timestamp("2024-03-05T10:00:00").unwrap();
        assert_eq!(naive.to_rfc3339(), "2024-03-05T10:00:00+00:00");

        let offset = parse_timestamp("2024-03-05T10:00:00+02:00").unwrap();
        assert_eq!(offset.to_rfc3339(), "2024-03-05T08:00:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_normalize_defaults() {
        let item = Normalizer::default()
            .normalize_value(json!({
                "id": 1,
                "slug": "bare",
                "date": "2024-01-01T00:00:00",
                "title": { "rendered": "Bare" }
            }))
            .unwrap();

        assert_eq!(item.image_url, None);
        assert_eq!(item.category_label, "Uncategorized");
        assert_eq!(item.category_key, "uncategorized");
        assert_eq!(item.author, "Admin");
        assert_eq!(item.excerpt, "");
    }

    #[test]
    fn test_normalize_keeps_body_markup() {
        let body = "<h2>Intro</h2><p>Text &amp; more</p>";
        let item = Normalizer::new(150, "Editorial")
            .normalize_value(json!({
                "id": 2,
                "slug": "rich",
                "date": "2024-01-01T00:00:00",
                "title": { "rendered": "<em>Rich</em> &#8211; post" },
                "content": { "rendered": body },
                "_embedded": { "wp:term": [[{ "name": "Events &amp; Fairs" }]] }
            }))
            .unwrap();

        assert_eq!(item.body, body);
        assert_eq!(item.title, "Rich \u{2013} post");
        assert_eq!(item.category_label, "Events & Fairs");
        assert_eq!(item.category_key, "events & fairs");
        assert_eq!(item.author, "Editorial");
    }

    #[test]
    fn test_normalize_rejects_bad_records() {
        let normalizer = Normalizer::default();

        let err = normalizer
            .normalize_value(json!({ "id": 1, "slug": " ", "date": "2024-01-01T00:00:00" }))
            .unwrap_err();
        assert_eq!(err, NormalizeError::MissingSlug { id: 1 });

        let err = normalizer
            .normalize_value(json!({ "id": 2, "slug": "x", "date": "soon" }))
            .unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidTimestamp { id: 2, .. }));

        let err = normalizer.normalize_value(json!("just a string")).unwrap_err();
        assert!(matches!(err, NormalizeError::Shape(_)));
    }

    #[test]
    fn test_batch_skips_failures_and_duplicates() {
        let items = Normalizer::default().normalize_batch(vec![
            json!({ "id": 1, "slug": "a", "date": "2024-01-03T00:00:00" }),
            json!({ "id": 2, "date": "2024-01-02T00:00:00" }),
            json!({ "id": 3, "slug": "a", "date": "2024-01-01T00:00:00" }),
            json!({ "id": 4, "slug": "b", "date": "2024-01-01T00:00:00" }),
        ]);

        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }
}
