//! Gateway Integration Tests
//!
//! Normalization and fail-soft behavior over an in-memory repository.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{dated_posts, gateway, post, MemorySource};
use newsroom::adapters::SourceError;
use newsroom::domain::RawCategory;
use newsroom::FetchOutcome;
use serde_json::json;

#[tokio::test]
async fn test_fetch_all_drops_only_unparsable_records() {
    let mut posts = dated_posts(6, "News");
    posts.insert(2, json!({ "id": 99, "title": { "rendered": "no slug or date" } }));
    posts.insert(4, json!({ "id": 100, "slug": "bad-date", "date": "last tuesday" }));
    posts.push(json!([1, 2, 3]));

    let source = Arc::new(MemorySource::with_posts(posts));
    let items = gateway(source).fetch_all().await;

    assert_eq!(items.len(), 6);
    let slugs: HashSet<&str> = items.iter().map(|i| i.slug.as_str()).collect();
    assert_eq!(slugs.len(), items.len());
    assert!(items.iter().all(|i| !i.slug.is_empty()));
}

#[tokio::test]
async fn test_batch_with_no_usable_record_is_malformed() {
    let posts = vec![json!("x"), json!({ "id": 1 }), json!([1])];
    let source = Arc::new(MemorySource::with_posts(posts));
    let gateway = gateway(source);

    match gateway.try_fetch_all().await {
        FetchOutcome::Failed(SourceError::Malformed(msg)) => assert!(msg.contains('3')),
        other => panic!("expected malformed failure, got {:?}", other),
    }
    assert!(gateway.fetch_all().await.is_empty());
}

#[tokio::test]
async fn test_normalized_fields() {
    let mut raw = post(1, "launch", "News", "2024-03-05T10:00:00");
    raw["title"]["rendered"] = json!("Launch &amp; <em>Learn</em>");
    raw["excerpt"]["rendered"] = json!("<p>Join us &hellip;</p>\n");

    let source = Arc::new(MemorySource::with_posts(vec![raw]));
    let item = gateway(source).fetch_by_slug("launch").await.unwrap();

    assert_eq!(item.title, "Launch & Learn");
    assert_eq!(item.excerpt, "Join us \u{2026}");
    assert_eq!(item.body, "<h2>About launch</h2><p>Body</p>");
    assert_eq!(item.category_label, "News");
    assert_eq!(item.category_key, "news");
    assert_eq!(item.author, "Jane Doe");
    assert_eq!(item.image_url.as_deref(), Some("https://cdn.test/launch.jpg"));
    assert_eq!(item.short_date(), "Mar 5, 2024");
}

#[tokio::test]
async fn test_record_without_media_or_taxonomy() {
    let raw = json!({
        "id": 5,
        "slug": "plain",
        "date": "2024-01-10T12:00:00",
        "title": { "rendered": "Plain" },
        "_embedded": { "author": [] }
    });

    let source = Arc::new(MemorySource::with_posts(vec![raw]));
    let items = gateway(source).fetch_all().await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].image_url, None);
    assert_eq!(items[0].category_label, "Uncategorized");
    assert_eq!(items[0].author, "Admin");
}

#[tokio::test]
async fn test_long_excerpt_is_truncated_on_grapheme_boundary() {
    let mut raw = post(1, "long", "Blog", "2024-01-10T12:00:00");
    // Two-byte characters, so a byte-based cut could split one
    raw["excerpt"]["rendered"] = json!(format!("<p>{}</p>", "é".repeat(500)));

    let source = Arc::new(MemorySource::with_posts(vec![raw]));
    let item = gateway(source).fetch_by_slug("long").await.unwrap();

    assert_eq!(item.excerpt, format!("{}...", "é".repeat(150)));
    assert_eq!(item.excerpt.chars().count(), 153);
}

#[tokio::test]
async fn test_missing_slug_is_absent() {
    let source = Arc::new(MemorySource::with_posts(dated_posts(3, "News")));
    let gateway = gateway(source);

    assert!(gateway.fetch_by_slug("missing-slug").await.is_none());
    assert!(gateway.try_fetch_by_slug("missing-slug").await.is_empty());
}

#[tokio::test]
async fn test_transport_failure_folds_to_empty() {
    let source = Arc::new(MemorySource {
        posts: dated_posts(3, "News"),
        listing_error: Some(SourceError::Transport("connection refused".to_string())),
        ..MemorySource::default()
    });
    let gateway = gateway(source);

    assert!(gateway.fetch_all().await.is_empty());
    match gateway.try_fetch_all().await {
        FetchOutcome::Failed(SourceError::Transport(msg)) => assert!(msg.contains("refused")),
        other => panic!("expected transport failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_repository_is_not_a_failure() {
    let source = Arc::new(MemorySource::default());
    let outcome = gateway(source).try_fetch_all().await;
    assert!(outcome.is_empty());
    assert!(!outcome.is_failed());
}

#[tokio::test]
async fn test_fetch_by_category() {
    let mut news = post(1, "n-1", "News", "2024-01-02T00:00:00");
    news["categories"] = json!([4]);
    let mut blog = post(2, "b-1", "Blog", "2024-01-03T00:00:00");
    blog["categories"] = json!([7]);

    let source = Arc::new(MemorySource {
        posts: vec![news, blog],
        categories: vec![
            RawCategory {
                id: 4,
                slug: "news".to_string(),
                name: "News".to_string(),
            },
            RawCategory {
                id: 7,
                slug: "blog".to_string(),
                name: "Blog".to_string(),
            },
        ],
        ..MemorySource::default()
    });
    let gateway = gateway(source);

    let items = gateway.fetch_by_category("news").await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].slug, "n-1");

    assert!(gateway.fetch_by_category("webinars").await.is_empty());
    assert!(gateway.try_fetch_by_category("webinars").await.is_empty());
}
