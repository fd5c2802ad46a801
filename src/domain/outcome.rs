//! Typed fetch outcomes.
//!
//! Distinguishes "the repository has nothing for this request" from "the
//! request failed", so callers can offer a retry instead of a silent empty
//! state. The fail-soft gateway API folds both into an empty value.

use crate::adapters::SourceError;

/// Result of a gateway fetch
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// Data was returned
    Loaded(T),

    /// The request succeeded but matched nothing
    Empty,

    /// The request failed
    Failed(SourceError),
}

impl<T> FetchOutcome<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Loaded(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&SourceError> {
        match self {
            FetchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Drop the distinction between empty and failed
    pub fn loaded(self) -> Option<T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            FetchOutcome::Empty | FetchOutcome::Failed(_) => None,
        }
    }

    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Loaded(value) => FetchOutcome::Loaded(f(value)),
            FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::Failed(err) => FetchOutcome::Failed(err),
        }
    }
}

impl<T> FetchOutcome<Vec<T>> {
    /// Build from a collection; an empty collection becomes `Empty`
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Loaded(items)
        }
    }

    /// Fail-soft view: empty on `Empty` and on `Failed`
    pub fn into_items(self) -> Vec<T> {
        self.loaded().unwrap_or_default()
    }
}
