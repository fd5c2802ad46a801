//! Domain types for the content layer.
//!
//! This module contains the core data structures:
//! - Record: raw payload shapes owned by the content repository
//! - Item: the normalized view model handed to presentation code
//! - Outcome: typed fetch results

pub mod item;
pub mod outcome;
pub mod record;

// Re-export commonly used types
pub use item::{category_key, ContentItem, DEFAULT_AUTHOR, UNCATEGORIZED};
pub use outcome::FetchOutcome;
pub use record::{RawCategory, RawContentRecord};
