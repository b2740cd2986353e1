//! Pure, read-only views over a sequence of post summaries.
//!
//! Every function leaves its input untouched and preserves input order unless
//! it is explicitly a sort.

use crate::domain::model::PostSummary;
use crate::utils::error::{CatalogError, Result};
use std::collections::HashSet;

/// Tag filter value meaning "no filtering".
pub const ALL_POSTS_TAG: &str = "Most recent";

/// Most recent first. Stable, so equal dates keep their relative order, and
/// unparseable dates go last.
pub fn sort_by_date_descending(items: &[PostSummary]) -> Vec<PostSummary> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

pub fn filter_by_tag(items: &[PostSummary], tag: &str) -> Vec<PostSummary> {
    if tag == ALL_POSTS_TAG {
        return items.to_vec();
    }
    items.iter().filter(|p| p.has_tag(tag)).cloned().collect()
}

/// Case-insensitive substring match on title or excerpt. A blank term matches
/// everything.
pub fn filter_by_search_term(items: &[PostSummary], term: &str) -> Vec<PostSummary> {
    if term.trim().is_empty() {
        return items.to_vec();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.excerpt.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Page `page_index` (zero-based) of `page_size` items. Out-of-range pages
/// are empty.
pub fn paginate(items: &[PostSummary], page_size: usize, page_index: usize) -> &[PostSummary] {
    let Some(start) = page_size.checked_mul(page_index) else {
        return &[];
    };
    if page_size == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Whether page `page_index + 1` has anything on it.
pub fn has_more(items: &[PostSummary], page_size: usize, page_index: usize) -> bool {
    match page_index.checked_add(1) {
        Some(next) => !paginate(items, page_size, next).is_empty(),
        None => false,
    }
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

pub fn select_featured(items: &[PostSummary]) -> Vec<PostSummary> {
    items.iter().filter(|p| p.featured).cloned().collect()
}

/// Up to `max_count` posts related to the current one: posts sharing a tag
/// first (input order), then the remaining posts by recency.
pub fn select_related(
    items: &[PostSummary],
    current_slug: &str,
    current_tags: &[String],
    max_count: usize,
) -> Vec<PostSummary> {
    let (sharing, rest): (Vec<PostSummary>, Vec<PostSummary>) = items
        .iter()
        .filter(|p| p.slug != current_slug)
        .cloned()
        .partition(|p| p.shares_tag_with(current_tags));

    let mut seen = HashSet::new();
    sharing
        .into_iter()
        .chain(sort_by_date_descending(&rest))
        .filter(|p| seen.insert(p.slug.clone()))
        .take(max_count)
        .collect()
}

/// The hero post: the first flagged one, otherwise the most recent.
pub fn select_hero(items: &[PostSummary]) -> Option<&PostSummary> {
    items.iter().find(|p| p.is_hero).or_else(|| {
        // max_by keeps the last maximum; reverse so ties go to the earliest item
        items.iter().rev().max_by(|a, b| a.date.cmp(&b.date))
    })
}

/// Drop draft entries that are only visible in preview mode.
pub fn exclude_previews(items: &[PostSummary]) -> Vec<PostSummary> {
    items.iter().filter(|p| !p.preview).cloned().collect()
}

/// Distinct tags in first-seen order.
pub fn collect_tags(items: &[PostSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|p| p.tags.iter())
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}

pub fn find_by_slug<'a>(items: &'a [PostSummary], slug: &str) -> Result<&'a PostSummary> {
    items
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| CatalogError::not_found(slug))
}
