//! Relevance scoring between two posts.

use std::collections::HashSet;

use crate::content::ContentItem;

/// Score a candidate against a subject post of the same language.
///
/// - +3 when both primary (first) categories are the same category
/// - +2 per shared category beyond the counted primary match
/// - +1 per shared tag
///
/// The shared-category count is computed over the full id intersection and
/// then decremented when the primary match was already counted; skipping the
/// primary category from the intersection outright would undercount
/// candidates that share it in a non-primary position.
pub fn relevance_score(subject: &ContentItem, candidate: &ContentItem) -> u32 {
    let subject_categories: HashSet<u64> = subject.categories.iter().map(|t| t.id).collect();
    let candidate_categories: HashSet<u64> = candidate.categories.iter().map(|t| t.id).collect();
    let shared_categories = subject_categories
        .intersection(&candidate_categories)
        .count();

    let primary_match = match (subject.primary_category(), candidate.primary_category()) {
        (Some(a), Some(b)) => a.id == b.id,
        _ => false,
    };

    let mut score = 0u32;
    if primary_match {
        score += 3;
    }
    let extra_shared = if primary_match {
        shared_categories.saturating_sub(1)
    } else {
        shared_categories
    };
    score += 2 * extra_shared as u32;

    let subject_tags: HashSet<u64> = subject.tags.iter().map(|t| t.id).collect();
    let shared_tags = candidate
        .tags
        .iter()
        .map(|t| t.id)
        .collect::<HashSet<u64>>()
        .intersection(&subject_tags)
        .count();
    score + shared_tags as u32
}
