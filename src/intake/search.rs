//! Search-stage helpers: label lookup and starter suggestions.

use crate::catalog::Catalog;
use crate::models::Symptom;

use super::selection::Selection;

/// Suggestions shown before the user types anything.
pub const COMMON_SYMPTOM_COUNT: usize = 8;

/// Case-insensitive substring match on symptom labels, skipping symptoms
/// already in `selection`. A blank query matches nothing.
pub fn search<'c>(catalog: &'c Catalog, query: &str, selection: &Selection) -> Vec<&'c Symptom> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .symptoms()
        .iter()
        .filter(|s| !selection.contains(s.id))
        .filter(|s| s.label.to_lowercase().contains(&needle))
        .collect()
}

/// The first taxonomy entries, minus what is already selected.
pub fn common_symptoms<'c>(catalog: &'c Catalog, selection: &Selection) -> Vec<&'c Symptom> {
    catalog
        .symptoms()
        .iter()
        .take(COMMON_SYMPTOM_COUNT)
        .filter(|s| !selection.contains(s.id))
        .collect()
}
