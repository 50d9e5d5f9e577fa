//! Symptom taxonomy and condition catalog.
//!
//! Read-only after construction. Lookups of unknown ids return `None`;
//! callers treat such ids as contributing to nothing.

pub mod conditions;
pub mod taxonomy;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use thiserror::Error;

use crate::models::{Condition, Symptom, SymptomCategory};

pub use taxonomy::{category_style, CategoryStyle};

/// Errors from building a catalog out of malformed tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate symptom id: {0}")]
    DuplicateSymptom(String),

    #[error("Duplicate condition id: {0}")]
    DuplicateCondition(String),

    #[error("Condition {condition} lists {symptom} as both a symptom and a red flag")]
    RedFlagOverlap { condition: String, symptom: String },
}

/// Indexed view over the two static tables.
#[derive(Debug)]
pub struct Catalog {
    symptoms: Vec<Symptom>,
    conditions: Vec<Condition>,
    symptom_index: HashMap<&'static str, usize>,
    condition_index: HashMap<&'static str, usize>,
    /// Union of taxonomy red flags and every condition's red flags.
    red_flags: HashSet<&'static str>,
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    pub fn new(symptoms: Vec<Symptom>, conditions: Vec<Condition>) -> Result<Self, CatalogError> {
        let mut symptom_index = HashMap::with_capacity(symptoms.len());
        let mut red_flags = HashSet::new();
        for (pos, symptom) in symptoms.iter().enumerate() {
            if symptom_index.insert(symptom.id, pos).is_some() {
                return Err(CatalogError::DuplicateSymptom(symptom.id.to_string()));
            }
            if symptom.red_flag {
                red_flags.insert(symptom.id);
            }
        }

        let mut condition_index = HashMap::with_capacity(conditions.len());
        for (pos, condition) in conditions.iter().enumerate() {
            if condition_index.insert(condition.id, pos).is_some() {
                return Err(CatalogError::DuplicateCondition(condition.id.to_string()));
            }
            if let Some(flag) = condition.red_flags.iter().find(|f| condition.has_symptom(f)) {
                return Err(CatalogError::RedFlagOverlap {
                    condition: condition.id.to_string(),
                    symptom: flag.to_string(),
                });
            }
            red_flags.extend(condition.red_flags.iter().copied());

            if !condition.is_scorable() {
                tracing::warn!(condition = condition.id, "Condition has no symptoms, excluded from scoring");
            }
            let unknown = condition
                .symptoms
                .iter()
                .filter(|id| !symptom_index.contains_key(*id))
                .count();
            if unknown > 0 {
                tracing::warn!(
                    condition = condition.id,
                    unknown,
                    "Condition references symptoms outside the taxonomy"
                );
            }
        }

        Ok(Self {
            symptoms,
            conditions,
            symptom_index,
            condition_index,
            red_flags,
        })
    }

    /// The process-wide built-in catalog, built on first use.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| {
            Catalog::new(taxonomy::SYMPTOMS.to_vec(), conditions::CONDITIONS.to_vec())
                .expect("built-in catalog tables are well-formed")
        })
    }

    // ── Symptoms ────────────────────────────────────────────

    pub fn symptom(&self, id: &str) -> Option<&Symptom> {
        self.symptom_index.get(id).map(|&pos| &self.symptoms[pos])
    }

    /// All symptoms in declaration order.
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn symptoms_in(&self, category: SymptomCategory) -> impl Iterator<Item = &Symptom> + '_ {
        self.symptoms.iter().filter(move |s| s.category == category)
    }

    pub fn is_red_flag(&self, id: &str) -> bool {
        self.red_flags.contains(id)
    }

    /// Red-flag ids, taxonomy entries first in declaration order, then any
    /// extra flags contributed only by conditions.
    pub fn red_flag_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self
            .symptoms
            .iter()
            .filter(|s| self.red_flags.contains(s.id))
            .map(|s| s.id)
            .collect();
        for condition in &self.conditions {
            for flag in condition.red_flags {
                if !ids.contains(flag) {
                    ids.push(*flag);
                }
            }
        }
        ids
    }

    // ── Conditions ──────────────────────────────────────────

    pub fn condition(&self, id: &str) -> Option<&Condition> {
        self.condition_index.get(id).map(|&pos| &self.conditions[pos])
    }

    /// All conditions in declaration order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn conditions_for_symptom<'a>(&'a self, symptom_id: &'a str) -> impl Iterator<Item = &'a Condition> + 'a {
        self.conditions.iter().filter(move |c| c.has_symptom(symptom_id))
    }
}
