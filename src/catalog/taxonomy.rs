//! Built-in symptom taxonomy and per-category display table.

use serde::Serialize;

use crate::models::{Symptom, SymptomCategory};

// ═══════════════════════════════════════════
// Symptoms: declaration order drives "common symptoms"
// ═══════════════════════════════════════════

pub static SYMPTOMS: &[Symptom] = &[
    // Emotional
    Symptom::new("sadness", "Persistent Sadness", SymptomCategory::Emotional),
    Symptom::new("anxiety", "Excessive Worry", SymptomCategory::Emotional),
    Symptom::new("irritability", "Irritability", SymptomCategory::Emotional),
    Symptom::new("hopelessness", "Hopelessness", SymptomCategory::Emotional),
    Symptom::new("mood_swings", "Mood Swings", SymptomCategory::Emotional),
    Symptom::new("numbness", "Emotional Numbness", SymptomCategory::Emotional),
    // Cognitive
    Symptom::new("brain_fog", "Brain Fog", SymptomCategory::Cognitive),
    Symptom::new("concentration", "Difficulty Concentrating", SymptomCategory::Cognitive),
    Symptom::new("racing_thoughts", "Racing Thoughts", SymptomCategory::Cognitive),
    Symptom::new("memory", "Memory Issues", SymptomCategory::Cognitive),
    Symptom::new("intrusive_thoughts", "Intrusive Thoughts", SymptomCategory::Cognitive),
    // Physical
    Symptom::new("fatigue", "Fatigue", SymptomCategory::Physical),
    Symptom::new("insomnia", "Insomnia", SymptomCategory::Physical),
    Symptom::new("oversleeping", "Oversleeping", SymptomCategory::Physical),
    Symptom::new("appetite_loss", "Loss of Appetite", SymptomCategory::Physical),
    Symptom::new("appetite_gain", "Increased Appetite", SymptomCategory::Physical),
    Symptom::new("palpitations", "Heart Palpitations", SymptomCategory::Physical),
    Symptom::new("tension", "Muscle Tension", SymptomCategory::Physical),
    // Behavioral
    Symptom::new("isolation", "Social Withdrawal", SymptomCategory::Behavioral),
    Symptom::new("procrastination", "Avoidance/Procrastination", SymptomCategory::Behavioral),
    Symptom::new("compulsions", "Repetitive Behaviors", SymptomCategory::Behavioral),
    Symptom::new("risk_taking", "Risky Behavior", SymptomCategory::Behavioral),
    // Referenced by the GAD, OCD and burnout profiles
    Symptom::new("worry", "Constant Worrying", SymptomCategory::Emotional),
    Symptom::new("cynicism", "Cynicism/Detachment", SymptomCategory::Emotional),
    // Red flags
    Symptom::red_flag("suicidal_thoughts", "Thoughts of Self-Harm", SymptomCategory::Emotional),
    Symptom::red_flag("hallucinations", "Seeing/Hearing things", SymptomCategory::Cognitive),
];

// ═══════════════════════════════════════════
// Category display table
// ═══════════════════════════════════════════

/// How the presentation layer badges a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub label: &'static str,
    /// Theme colour token for the category badge.
    pub accent: &'static str,
}

static CATEGORY_STYLES: &[(SymptomCategory, CategoryStyle)] = &[
    (
        SymptomCategory::Emotional,
        CategoryStyle { label: "Emotional", accent: "blue" },
    ),
    (
        SymptomCategory::Cognitive,
        CategoryStyle { label: "Cognitive", accent: "purple" },
    ),
    (
        SymptomCategory::Physical,
        CategoryStyle { label: "Physical", accent: "amber" },
    ),
    (
        SymptomCategory::Behavioral,
        CategoryStyle { label: "Behavioral", accent: "green" },
    ),
];

/// Fallback badge, matches the behavioural accent.
const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    label: "Other",
    accent: "green",
};

pub fn category_style(category: SymptomCategory) -> CategoryStyle {
    CATEGORY_STYLES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}
