use serde::{Deserialize, Serialize};

use crate::models::Condition;

/// One ranked condition with its computed confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionMatch {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Share of the condition's symptom set present in the selection, 0-100.
    pub match_rate: u8,
    pub recommended_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    /// Search term for the provider directory ("find care" link).
    #[serde(default)]
    pub find_care_query: String,
}

impl ConditionMatch {
    pub fn from_condition(condition: &Condition, match_rate: u8) -> Self {
        Self {
            id: condition.id.to_string(),
            name: condition.name.to_string(),
            description: condition.description.to_string(),
            match_rate,
            recommended_action: condition.recommended_action.to_string(),
            article_id: condition.article_id.map(str::to_string),
            find_care_query: condition.name.to_string(),
        }
    }
}

/// Engine output.
///
/// Wire shape is `{ "isCrisis": true }` or
/// `{ "isCrisis": false, "conditions": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TriageOutcomeWire", into = "TriageOutcomeWire")]
pub enum TriageOutcome {
    /// A red-flag symptom was selected. No scores exist for this outcome.
    Crisis,
    /// Ranked, filtered, capped matches. May be empty.
    Matches(Vec<ConditionMatch>),
}

impl TriageOutcome {
    pub fn is_crisis(&self) -> bool {
        matches!(self, Self::Crisis)
    }

    /// Ranked matches, empty for a crisis.
    pub fn conditions(&self) -> &[ConditionMatch] {
        match self {
            Self::Crisis => &[],
            Self::Matches(list) => list,
        }
    }

    pub fn top_match(&self) -> Option<&ConditionMatch> {
        self.conditions().first()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriageOutcomeWire {
    is_crisis: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditions: Option<Vec<ConditionMatch>>,
}

impl From<TriageOutcome> for TriageOutcomeWire {
    fn from(outcome: TriageOutcome) -> Self {
        match outcome {
            TriageOutcome::Crisis => Self {
                is_crisis: true,
                conditions: None,
            },
            TriageOutcome::Matches(list) => Self {
                is_crisis: false,
                conditions: Some(list),
            },
        }
    }
}

impl From<TriageOutcomeWire> for TriageOutcome {
    fn from(wire: TriageOutcomeWire) -> Self {
        if wire.is_crisis {
            // Any conditions sent alongside a crisis flag are dropped.
            TriageOutcome::Crisis
        } else {
            TriageOutcome::Matches(wire.conditions.unwrap_or_default())
        }
    }
}
