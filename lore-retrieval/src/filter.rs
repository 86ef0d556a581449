//! Category-or-subcategory resolution for the single filter argument.
//!
//! One caller-supplied string serves both category and subcategory lookups.
//! It is resolved here, once, with a runtime existence probe: a candidate
//! filters on `subcategory` only when it looks like one (contains a hyphen),
//! is not a known umbrella category name, and some lesson actually carries
//! it as a subcategory. Everything else filters on `category`.

use lore_core::errors::LoreResult;
use lore_core::models::FilterTarget;
use lore_core::traits::ILessonStorage;

use lore_ingest::classifier;

/// Resolve a caller-supplied filter string into its target column.
pub fn resolve_filter_target(
    candidate: &str,
    storage: &dyn ILessonStorage,
) -> LoreResult<FilterTarget> {
    if candidate.contains('-')
        && !is_known_category(candidate)
        && storage.subcategory_exists(candidate)?
    {
        Ok(FilterTarget::Subcategory(candidate.to_string()))
    } else {
        Ok(FilterTarget::Category(candidate.to_string()))
    }
}

fn is_known_category(candidate: &str) -> bool {
    classifier::CATEGORY_TABLE
        .iter()
        .any(|entry| entry.category.eq_ignore_ascii_case(candidate))
}
