//! Page-local listing state and the composed view it produces.

use crate::core::views::{
    filter_by_search_term, filter_by_tag, has_more, page_count, paginate, sort_by_date_descending,
    ALL_POSTS_TAG,
};
use crate::domain::model::PostSummary;
use serde::Serialize;

/// Filter, search and paging state owned by one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub tag: String,
    pub search: String,
    pub page_size: usize,
    pub page_index: usize,
}

impl ListingQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            tag: ALL_POSTS_TAG.to_string(),
            search: String::new(),
            page_size,
            page_index: 0,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self.page_index = 0;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page_index = 0;
        self
    }

    pub fn with_page(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    /// The query for the "load more" step.
    pub fn next_page(&self) -> Self {
        self.clone().with_page(self.page_index.saturating_add(1))
    }

    /// Tag filter, then search, then newest first, then the requested page.
    pub fn apply(&self, items: &[PostSummary]) -> Listing {
        let filtered = filter_by_search_term(&filter_by_tag(items, &self.tag), &self.search);
        let sorted = sort_by_date_descending(&filtered);

        Listing {
            items: paginate(&sorted, self.page_size, self.page_index).to_vec(),
            page_index: self.page_index,
            page_count: page_count(sorted.len(), self.page_size),
            total: sorted.len(),
            has_more: has_more(&sorted, self.page_size, self.page_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub items: Vec<PostSummary>,
    pub page_index: usize,
    pub page_count: usize,
    /// Matching posts across all pages.
    pub total: usize,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<PostSummary> {
        let mut items: Vec<PostSummary> = (1..=9)
            .map(|i| {
                let tag = if i % 2 == 0 { "even" } else { "odd" };
                PostSummary::new(format!("post-{i}"), format!("Post {i}"), &format!("2024-01-0{i}"))
                    .with_tags([tag])
            })
            .collect();
        items[4].excerpt = "about kaggle".to_string();
        items
    }

    fn slugs(listing: &Listing) -> Vec<&str> {
        listing.items.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_default_query_pages_newest_first() {
        let items = catalog();
        let first = ListingQuery::new(4).apply(&items);
        assert_eq!(slugs(&first), vec!["post-9", "post-8", "post-7", "post-6"]);
        assert_eq!(first.total, 9);
        assert_eq!(first.page_count, 3);
        assert!(first.has_more);

        let last = ListingQuery::new(4).with_page(2).apply(&items);
        assert_eq!(slugs(&last), vec!["post-1"]);
        assert!(!last.has_more);
    }

    #[test]
    fn test_pages_cover_filtered_list_once() {
        let items = catalog();
        let mut query = ListingQuery::new(2).with_tag("odd");
        let mut seen = Vec::new();
        loop {
            let listing = query.apply(&items);
            seen.extend(listing.items.iter().map(|p| p.slug.clone()));
            if !listing.has_more {
                break;
            }
            query = query.next_page();
        }
        assert_eq!(seen, vec!["post-9", "post-7", "post-5", "post-3", "post-1"]);
    }

    #[test]
    fn test_tag_and_search_compose() {
        let items = catalog();
        let listing = ListingQuery::new(10).with_tag("odd").with_search("KAGGLE").apply(&items);
        assert_eq!(slugs(&listing), vec!["post-5"]);

        let none = ListingQuery::new(10).with_tag("even").with_search("kaggle").apply(&items);
        assert!(none.items.is_empty());
        assert_eq!(none.page_count, 0);
    }

    #[test]
    fn test_changing_filter_resets_page() {
        let query = ListingQuery::new(3).with_page(2).with_search("post");
        assert_eq!(query.page_index, 0);
    }
}
