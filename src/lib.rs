//! newsroom - Content gateway and listing projector for a headless-CMS blog
//!
//! Fetches posts from a WordPress REST endpoint, normalizes them into flat
//! `ContentItem`s, and derives the views a marketing site's blog needs:
//! category-filtered grids, a latest-posts digest, paged listings and a
//! detail page with a recent-posts sidebar.
//!
//! # Modules
//!
//! - `adapters`: Content repository integrations (WordPress)
//! - `core`: Gateway, normalization, listing projections, detail resolution
//! - `domain`: Data structures (ContentItem, raw records, FetchOutcome)
//! - `config`: Gateway configuration loading
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Page 2 of the news listing
//! newsroom --base-url https://example.com/wp-json/wp/v2 list --category news --page 2
//!
//! # Show one post with its table of contents and recent posts
//! newsroom show hello-world
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{ContentSource, PostQuery, SourceError, WordPressSource};
pub use config::GatewayConfig;
pub use self::core::{
    filter_by_category, latest_n, paginate, resolve_detail, DetailTasks, DetailView, Gateway,
    ListingState, Page,
};
pub use domain::{ContentItem, FetchOutcome};
