//! Ranked selection with deterministic backfill.

use std::collections::HashSet;

use crate::content::{ContentItem, Language, TermRef};
use crate::related::scoring::relevance_score;

/// Default number of related posts shown on a post page.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Select up to `limit` posts related to `subject`, most relevant first.
///
/// Candidates that are the subject itself or in another language are never
/// returned. Positive-scoring candidates come first (score descending, then
/// date descending); when they fall short of `limit`, the remaining slots are
/// backfilled with same-primary-category posts by recency, then with any
/// remaining same-language posts by recency.
pub fn related_posts<'a>(
    subject: &ContentItem,
    pool: &'a [ContentItem],
    limit: usize,
) -> Vec<&'a ContentItem> {
    let eligible: Vec<&ContentItem> = pool
        .iter()
        .filter(|c| c.id != subject.id && c.language == subject.language)
        .collect();

    let mut scored: Vec<(u32, &ContentItem)> = eligible
        .iter()
        .filter_map(|&c| {
            let score = relevance_score(subject, c);
            (score > 0).then_some((score, c))
        })
        .collect();
    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| b.1.date.cmp(&a.1.date))
            .then_with(|| b.1.id.cmp(&a.1.id))
    });

    let mut selected: Vec<&ContentItem> = scored.into_iter().take(limit).map(|(_, c)| c).collect();
    let mut selected_ids: HashSet<u64> = selected.iter().map(|c| c.id).collect();

    // Backfill pass 1: same primary category, by recency.
    if selected.len() < limit {
        if let Some(primary) = subject.primary_category() {
            let same_primary: Vec<&ContentItem> = eligible
                .iter()
                .copied()
                .filter(|c| {
                    c.primary_category().map(|p| p.id) == Some(primary.id)
                        && !selected_ids.contains(&c.id)
                })
                .collect();
            append_by_recency(same_primary, &mut selected, &mut selected_ids, limit);
        }
    }

    // Backfill pass 2: any remaining same-language post, by recency.
    if selected.len() < limit {
        let remaining: Vec<&ContentItem> = eligible
            .iter()
            .copied()
            .filter(|c| !selected_ids.contains(&c.id))
            .collect();
        append_by_recency(remaining, &mut selected, &mut selected_ids, limit);
    }

    selected
}

/// Listing entry point: posts of one language carrying a category slug,
/// newest first.
pub fn posts_in_category<'a>(
    pool: &'a [ContentItem],
    language: Language,
    category_slug: &str,
    limit: usize,
) -> Vec<&'a ContentItem> {
    by_term_slug(pool, language, limit, category_terms, category_slug)
}

/// Listing entry point: posts of one language carrying a tag slug,
/// newest first.
pub fn posts_with_tag<'a>(
    pool: &'a [ContentItem],
    language: Language,
    tag_slug: &str,
    limit: usize,
) -> Vec<&'a ContentItem> {
    by_term_slug(pool, language, limit, tag_terms, tag_slug)
}

fn category_terms(item: &ContentItem) -> &[TermRef] {
    &item.categories
}

fn tag_terms(item: &ContentItem) -> &[TermRef] {
    &item.tags
}

fn by_term_slug<'a>(
    pool: &'a [ContentItem],
    language: Language,
    limit: usize,
    terms: fn(&ContentItem) -> &[TermRef],
    slug: &str,
) -> Vec<&'a ContentItem> {
    let mut matched: Vec<&ContentItem> = pool
        .iter()
        .filter(|c| c.language == language && terms(c).iter().any(|t| t.slug == slug))
        .collect();
    sort_by_recency(&mut matched);
    matched.truncate(limit);
    matched
}

fn append_by_recency<'a>(
    mut pending: Vec<&'a ContentItem>,
    selected: &mut Vec<&'a ContentItem>,
    selected_ids: &mut HashSet<u64>,
    limit: usize,
) {
    sort_by_recency(&mut pending);
    for candidate in pending {
        if selected.len() >= limit {
            break;
        }
        if selected_ids.insert(candidate.id) {
            selected.push(candidate);
        }
    }
}

fn sort_by_recency(items: &mut [&ContentItem]) {
    items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}
