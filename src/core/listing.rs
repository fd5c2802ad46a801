//! Listing projections over an in-memory item collection.
//!
//! Everything here is pure: filters, ordering and page windows are derived
//! from one fetched collection without touching the network. Derived views
//! borrow the original items.

use serde::Serialize;

use crate::domain::{category_key, ContentItem};

/// Filter key that matches every item
pub const ALL_CATEGORIES: &str = "all";

/// One entry of the listing page's category bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryFilter {
    pub key: &'static str,
    pub label: &'static str,
}

/// Category bar shown on the blog and news listings
pub const CATEGORY_FILTERS: &[CategoryFilter] = &[
    CategoryFilter {
        key: ALL_CATEGORIES,
        label: "All Posts",
    },
    CategoryFilter {
        key: "news",
        label: "News",
    },
    CategoryFilter {
        key: "events",
        label: "Events",
    },
    CategoryFilter {
        key: "release",
        label: "Releases",
    },
    CategoryFilter {
        key: "blog",
        label: "Blogs",
    },
];

fn is_all(key: &str) -> bool {
    key.trim().eq_ignore_ascii_case(ALL_CATEGORIES)
}

/// Keep items in `key`'s category, preserving order; `"all"` keeps everything
pub fn filter_by_category<'a, I>(items: I, key: &str) -> Vec<&'a ContentItem>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    if is_all(key) {
        return items.into_iter().collect();
    }

    let wanted = category_key(key.trim());
    items
        .into_iter()
        .filter(|item| item.category_key == wanted)
        .collect()
}

/// At most `n` items, newest first; equal timestamps keep their input order
pub fn latest_n<'a, I>(items: I, n: usize) -> Vec<&'a ContentItem>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let mut sorted: Vec<&ContentItem> = items.into_iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    sorted.truncate(n);
    sorted
}

/// Category-filtered latest-N, as shown in the home page blog section
pub fn digest<'a, I>(items: I, key: &str, n: usize) -> Vec<&'a ContentItem>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    latest_n(filter_by_category(items, key), n)
}

/// One page window plus the page count it was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// 1-indexed page number that was requested
    pub number: usize,
    /// Number of non-empty pages
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1 && self.number <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.number >= 1 && self.number < self.total_pages
    }
}

/// Number of pages needed for `len` items
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Window `items[(page-1)*size .. page*size]`; out-of-range pages are empty
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);

    let window = if page_number == 0 || page_number > total {
        &items[..0]
    } else {
        let start = (page_number - 1) * page_size;
        let end = (start + page_size).min(items.len());
        &items[start..end]
    };

    Page {
        items: window,
        number: page_number,
        total_pages: total,
    }
}

/// One slot in a pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLink {
    /// A clickable page number
    Number(usize),
    /// An elided run of pages
    Gap,
}

/// Pagination bar for `current` out of `total` pages
///
/// The first and last pages are always listed, plus the pages adjacent to
/// `current`. A page two away from `current` becomes a gap marker and
/// anything further out is left out.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageLink> {
    (1..=total)
        .filter_map(|n| {
            if n == 1 || n == total || (n + 1 >= current && n <= current + 1) {
                Some(PageLink::Number(n))
            } else if n + 2 == current || n == current + 2 {
                Some(PageLink::Gap)
            } else {
                None
            }
        })
        .collect()
}

/// Filter and page state of a listing view
///
/// Changing the category always returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    category: String,
    page: usize,
    page_size: usize,
}

/// A rendered listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingView<'a> {
    pub category: String,
    pub items: Vec<&'a ContentItem>,
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Pagination bar for this page
    pub page_links: Vec<PageLink>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(9)
    }
}

impl ListingState {
    pub fn new(page_size: usize) -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            page: 1,
            page_size,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Switch category; resets to page 1 even when the key is unchanged
    pub fn set_category(&mut self, key: impl Into<String>) {
        self.category = key.into();
        self.page = 1;
    }

    /// Jump to a page, clamped to `1..=total_pages`
    pub fn go_to(&mut self, page: usize, items: &[ContentItem]) {
        let total = self.total_pages(items);
        self.page = page.clamp(1, total.max(1));
    }

    pub fn next_page(&mut self, items: &[ContentItem]) {
        self.go_to(self.page + 1, items);
    }

    pub fn previous_page(&mut self, items: &[ContentItem]) {
        self.go_to(self.page.saturating_sub(1), items);
    }

    fn total_pages(&self, items: &[ContentItem]) -> usize {
        total_pages(filter_by_category(items, &self.category).len(), self.page_size)
    }

    /// Project the current page out of `items`
    pub fn view<'a>(&self, items: &'a [ContentItem]) -> ListingView<'a> {
        let filtered = filter_by_category(items, &self.category);
        let page = paginate(&filtered, self.page_size, self.page);

        ListingView {
            category: self.category.clone(),
            items: page.items.to_vec(),
            page: self.page,
            total_pages: page.total_pages,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            page_links: page_numbers(self.page, page.total_pages),
        }
    }
}
