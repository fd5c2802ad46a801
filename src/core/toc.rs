//! Table of contents for detail bodies.
//!
//! `h2` and `h3` headings are listed in document order and numbered
//! `heading-0`, `heading-1`, ... . `anchor_headings` writes the same ids
//! into the body so sidebar links resolve.

use lol_html::{element, rewrite_str, RewriteStrSettings};
use scraper::{Html, Selector};
use serde::Serialize;

const HEADINGS: &str = "h2, h3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H2,
    H3,
}

/// One sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Fragment id, e.g. `heading-0`
    pub anchor: String,
    /// Plain heading text
    pub text: String,
    pub level: HeadingLevel,
}

fn anchor(index: usize) -> String {
    format!("heading-{}", index)
}

/// List the `h2`/`h3` headings of an HTML body
pub fn table_of_contents(body: &str) -> Vec<Heading> {
    let document = Html::parse_fragment(body);
    let Ok(selector) = Selector::parse(HEADINGS) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .enumerate()
        .map(|(index, element)| Heading {
            anchor: anchor(index),
            text: element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
            level: if element.value().name() == "h3" {
                HeadingLevel::H3
            } else {
                HeadingLevel::H2
            },
        })
        .collect()
}

/// Return `body` with `id` attributes matching `table_of_contents`
///
/// Falls back to the unmodified body if the rewriter rejects the input.
pub fn anchor_headings(body: &str) -> String {
    let mut index = 0usize;
    let handlers = vec![element!(HEADINGS, |el| {
        el.set_attribute("id", &anchor(index))?;
        index += 1;
        Ok(())
    })];

    rewrite_str(
        body,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )
    .unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to anchor headings");
        body.to_string()
    })
}
