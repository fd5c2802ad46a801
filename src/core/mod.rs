//! Core content logic.
//!
//! This module contains:
//! - Normalize: raw record to `ContentItem` conversion
//! - Gateway: fetching through a `ContentSource`
//! - Listing: pure filter/sort/paginate projections
//! - Detail: concurrent detail and recent-items resolution
//! - Toc: heading extraction for detail bodies

pub mod detail;
pub mod gateway;
pub mod listing;
pub mod normalize;
pub mod toc;

// Re-export commonly used types
pub use detail::{fetch_recent, resolve_detail, DetailTasks, DetailView, RECENT_LIMIT};
pub use gateway::Gateway;
pub use listing::{
    digest, filter_by_category, latest_n, page_numbers, paginate, total_pages, CategoryFilter,
    ListingState, ListingView, Page, PageLink, ALL_CATEGORIES, CATEGORY_FILTERS,
};
pub use normalize::{html_to_text, parse_timestamp, truncate_graphemes, NormalizeError, Normalizer};
pub use toc::{anchor_headings, table_of_contents, Heading, HeadingLevel};
