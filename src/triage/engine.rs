//! Matching engine.
//!
//! Pure function of (selection, catalog). The red-flag check runs first and
//! short-circuits: no condition is scored once a red flag is present.

use std::collections::HashSet;

use crate::catalog::Catalog;

use super::types::{ConditionMatch, TriageOutcome};

/// Matches at or below this confidence are dropped as incidental overlap.
pub const MIN_MATCH_RATE: u8 = 20;

/// At most this many matches are returned.
pub const MAX_RESULTS: usize = 3;

/// Evaluate a symptom selection.
///
/// Duplicates in `selected` are collapsed; ids outside the taxonomy are
/// tolerated and never match. An empty selection yields no matches.
pub fn evaluate<'a, I>(selected: I, catalog: &Catalog) -> TriageOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let selected: HashSet<&str> = selected.into_iter().collect();

    if selected.iter().any(|id| catalog.is_red_flag(id)) {
        tracing::info!(selected = selected.len(), "Triage: red flag present, crisis routing");
        return TriageOutcome::Crisis;
    }

    let mut scored: Vec<ConditionMatch> = catalog
        .conditions()
        .iter()
        .filter(|c| c.is_scorable())
        .filter_map(|condition| {
            let matched = condition
                .symptoms
                .iter()
                .filter(|id| selected.contains(*id))
                .count();
            let rate = match_rate(matched, condition.symptoms.len());
            (rate > MIN_MATCH_RATE).then(|| ConditionMatch::from_condition(condition, rate))
        })
        .collect();

    // Vec::sort_by is stable: equal rates keep catalog declaration order.
    scored.sort_by(|a, b| b.match_rate.cmp(&a.match_rate));
    let qualifying = scored.len();
    scored.truncate(MAX_RESULTS);

    tracing::debug!(
        selected = selected.len(),
        qualifying,
        returned = scored.len(),
        "Triage: scored conditions"
    );

    TriageOutcome::Matches(scored)
}

/// `round(matched / total * 100)`, rounding halves up, in integers.
///
/// `total` must be non-zero; `matched` never exceeds `total`.
fn match_rate(matched: usize, total: usize) -> u8 {
    let rate = (matched * 200 + total) / (total * 2);
    rate.min(100) as u8
}
