//! Detail page resolution.
//!
//! A detail view needs the item itself and a "recent posts" sidebar. The two
//! fetches are independent: they run concurrently, neither waits on the
//! other, and an empty or failed result on one side leaves the other intact.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::adapters::SourceError;
use crate::domain::{ContentItem, FetchOutcome};

use super::gateway::Gateway;
use super::listing::latest_n;
use super::toc::{table_of_contents, Heading};

/// Sidebar size used by the site
pub const RECENT_LIMIT: usize = 5;

/// Everything a detail page renders
#[derive(Debug)]
pub struct DetailView {
    /// The requested item
    pub item: FetchOutcome<ContentItem>,
    /// Most recent items for the sidebar
    pub recent: Vec<ContentItem>,
}

impl DetailView {
    /// Headings of the item body, empty when the item is missing
    pub fn table_of_contents(&self) -> Vec<Heading> {
        match &self.item {
            FetchOutcome::Loaded(item) => table_of_contents(&item.body),
            _ => Vec::new(),
        }
    }
}

/// Fetch all items and keep the `limit` most recent
pub async fn fetch_recent(gateway: &Gateway, limit: usize) -> Vec<ContentItem> {
    let items = gateway.fetch_all().await;
    latest_n(&items, limit).into_iter().cloned().collect()
}

/// Resolve a detail view, running both fetches concurrently
pub async fn resolve_detail(gateway: &Gateway, slug: &str, recent_limit: usize) -> DetailView {
    let (item, recent) = tokio::join!(
        gateway.try_fetch_by_slug(slug),
        fetch_recent(gateway, recent_limit)
    );
    DetailView { item, recent }
}

/// In-flight detail fetches tied to a view's lifetime
///
/// Each half can be awaited on its own. Dropping the handle, or calling
/// `cancel`, aborts whatever is still running.
pub struct DetailTasks {
    item: Option<JoinHandle<FetchOutcome<ContentItem>>>,
    recent: Option<JoinHandle<Vec<ContentItem>>>,
}

impl DetailTasks {
    /// Spawn both fetches on the current runtime
    pub fn spawn(gateway: &Gateway, slug: impl Into<String>, recent_limit: usize) -> Self {
        let slug = slug.into();

        let item_gateway = gateway.clone();
        let item = tokio::spawn(async move { item_gateway.try_fetch_by_slug(&slug).await });

        let recent_gateway = gateway.clone();
        let recent = tokio::spawn(async move { fetch_recent(&recent_gateway, recent_limit).await });

        Self {
            item: Some(item),
            recent: Some(recent),
        }
    }

    /// Wait for the item; `Failed(Cancelled)` if it was aborted or already taken
    pub async fn item(&mut self) -> FetchOutcome<ContentItem> {
        let Some(handle) = self.item.take() else {
            return FetchOutcome::Failed(SourceError::Cancelled);
        };
        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "Detail fetch did not complete");
                FetchOutcome::Failed(SourceError::Cancelled)
            }
        }
    }

    /// Wait for the sidebar; empty if it was aborted or already taken
    pub async fn recent(&mut self) -> Vec<ContentItem> {
        let Some(handle) = self.recent.take() else {
            return Vec::new();
        };
        match handle.await {
            Ok(items) => items,
            Err(e) => {
                debug!(error = %e, "Recent fetch did not complete");
                Vec::new()
            }
        }
    }

    /// Wait for both halves
    pub async fn join(mut self) -> DetailView {
        let item = self.item().await;
        let recent = self.recent().await;
        DetailView { item, recent }
    }

    /// Abort any fetch that has not finished
    pub fn cancel(&mut self) {
        if let Some(handle) = &self.item {
            handle.abort();
        }
        if let Some(handle) = &self.recent {
            handle.abort();
        }
    }
}

impl Drop for DetailTasks {
    fn drop(&mut self) {
        self.cancel();
    }
}
