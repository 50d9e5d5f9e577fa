use serde::Serialize;

/// A candidate condition the engine can rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Symptom ids associated with the condition. Confidence is the share
    /// of this set present in the selection.
    pub symptoms: &'static [&'static str],
    /// Symptom ids that route to crisis instead of scoring.
    pub red_flags: &'static [&'static str],
    pub recommended_action: &'static str,
    /// Reference article in the content catalog. Not resolved here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<&'static str>,
}

impl Condition {
    pub fn has_symptom(&self, symptom_id: &str) -> bool {
        self.symptoms.iter().any(|s| *s == symptom_id)
    }

    /// Conditions without associated symptoms cannot be scored.
    pub fn is_scorable(&self) -> bool {
        !self.symptoms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Condition {
        Condition {
            id: "sample",
            name: "Sample",
            description: "",
            symptoms: &["fatigue", "insomnia"],
            red_flags: &[],
            recommended_action: "Rest.",
            article_id: None,
        }
    }

    #[test]
    fn has_symptom_checks_membership() {
        let c = sample();
        assert!(c.has_symptom("fatigue"));
        assert!(!c.has_symptom("sadness"));
    }

    #[test]
    fn empty_condition_is_not_scorable() {
        let mut c = sample();
        assert!(c.is_scorable());
        c.symptoms = &[];
        assert!(!c.is_scorable());
    }

    #[test]
    fn serializes_camel_case_and_skips_missing_article() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["recommendedAction"], "Rest.");
        assert!(json.get("articleId").is_none());
    }
}
