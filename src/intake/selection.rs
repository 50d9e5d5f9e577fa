use std::collections::HashMap;

use crate::models::SymptomAnnotation;

/// The user's accumulating symptom choice for one intake.
///
/// Ids are unique and keep insertion order for display. Annotations of a
/// symptom survive deselection, so toggling twice restores the exact prior
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<&'static str>,
    annotations: HashMap<&'static str, SymptomAnnotation>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| *s == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> &[&'static str] {
        &self.ids
    }

    /// Adds `id` if absent, removes it if present. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, id: &'static str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Merge an annotation: fields left `None` keep their earlier value.
    pub fn annotate(&mut self, id: &'static str, update: SymptomAnnotation) {
        let entry = self.annotations.entry(id).or_default();
        if update.severity.is_some() {
            entry.severity = update.severity;
        }
        if update.duration.is_some() {
            entry.duration = update.duration;
        }
    }

    pub fn annotation(&self, id: &str) -> SymptomAnnotation {
        self.annotations.get(id).copied().unwrap_or_default()
    }

    /// Selected ids with their annotations, in selection order.
    pub fn annotated(&self) -> impl Iterator<Item = (&'static str, SymptomAnnotation)> + '_ {
        self.ids.iter().map(|id| (*id, self.annotation(id)))
    }

    /// Ids sorted, for order-insensitive comparison.
    pub fn sorted_ids(&self) -> Vec<&'static str> {
        let mut ids = self.ids.clone();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.annotations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationBucket, Severity};

    #[test]
    fn toggle_adds_then_removes() {
        let mut s = Selection::new();
        assert!(s.toggle("fatigue"));
        assert!(s.contains("fatigue"));
        assert!(!s.toggle("fatigue"));
        assert!(s.is_empty());
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut s = Selection::new();
        s.toggle("insomnia");
        s.toggle("anxiety");
        s.toggle("fatigue");
        s.toggle("anxiety");
        s.toggle("anxiety");
        assert_eq!(s.ids(), &["insomnia", "fatigue", "anxiety"]);
    }

    #[test]
    fn double_toggle_restores_annotation() {
        let mut s = Selection::new();
        s.toggle("fatigue");
        s.annotate(
            "fatigue",
            SymptomAnnotation {
                severity: Some(Severity::new(8).unwrap()),
                duration: Some(DurationBucket::Weeks),
            },
        );
        let before = s.clone();
        s.toggle("fatigue");
        s.toggle("fatigue");
        assert_eq!(s, before);
    }

    #[test]
    fn annotate_merges_fields() {
        let mut s = Selection::new();
        s.toggle("tension");
        s.annotate(
            "tension",
            SymptomAnnotation {
                severity: Some(Severity::new(3).unwrap()),
                duration: None,
            },
        );
        s.annotate(
            "tension",
            SymptomAnnotation {
                severity: None,
                duration: Some(DurationBucket::Today),
            },
        );
        let a = s.annotation("tension");
        assert_eq!(a.severity.map(|s| s.value()), Some(3));
        assert_eq!(a.duration, Some(DurationBucket::Today));
    }

    #[test]
    fn sorted_ids_ignore_order() {
        let mut a = Selection::new();
        a.toggle("b_sym");
        a.toggle("a_sym");
        let mut b = Selection::new();
        b.toggle("a_sym");
        b.toggle("b_sym");
        assert_ne!(a.ids(), b.ids());
        assert_eq!(a.sorted_ids(), b.sorted_ids());
    }

    #[test]
    fn clear_drops_everything() {
        let mut s = Selection::new();
        s.toggle("fatigue");
        s.annotate("fatigue", SymptomAnnotation {
            severity: Some(Severity::DEFAULT),
            duration: None,
        });
        s.clear();
        assert_eq!(s, Selection::new());
    }
}
