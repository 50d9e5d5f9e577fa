//! Built-in condition catalog. Declaration order is the ranking tie-break.

use crate::models::Condition;

pub static CONDITIONS: &[Condition] = &[
    Condition {
        id: "depression",
        name: "Major Depressive Disorder",
        description: "A mood disorder that causes a persistent feeling of sadness and loss of interest.",
        symptoms: &[
            "sadness",
            "hopelessness",
            "fatigue",
            "insomnia",
            "oversleeping",
            "appetite_loss",
            "appetite_gain",
            "concentration",
            "isolation",
            "numbness",
        ],
        red_flags: &["suicidal_thoughts"],
        recommended_action: "Consult a mental health professional for a full evaluation. Therapy (CBT) and medication are common treatments.",
        article_id: Some("1"),
    },
    Condition {
        id: "gad",
        name: "Generalized Anxiety Disorder",
        description: "Severe, ongoing anxiety that interferes with daily activities.",
        symptoms: &[
            "anxiety",
            "worry",
            "tension",
            "palpitations",
            "insomnia",
            "racing_thoughts",
            "irritability",
            "brain_fog",
        ],
        red_flags: &[],
        recommended_action: "Therapy, particularly CBT, is highly effective. Mindfulness and lifestyle changes also help.",
        article_id: Some("understanding-anxiety-guide"),
    },
    Condition {
        id: "burnout",
        name: "Professional Burnout",
        description: "A state of emotional, physical, and mental exhaustion caused by excessive and prolonged stress.",
        symptoms: &[
            "fatigue",
            "cynicism",
            "irritability",
            "brain_fog",
            "procrastination",
            "numbness",
            "insomnia",
        ],
        red_flags: &[],
        recommended_action: "Prioritize rest and boundary setting. Evaluate work-life balance and consider professional support.",
        article_id: None,
    },
    Condition {
        id: "adhd",
        name: "ADHD (Inattentive Type)",
        description: "A chronic condition including attention difficulty, hyperactivity, and impulsiveness.",
        symptoms: &[
            "concentration",
            "brain_fog",
            "procrastination",
            "memory",
            "racing_thoughts",
            "isolation",
        ],
        red_flags: &[],
        recommended_action: "A specialist can provide a formal diagnosis. Medication and coaching are effective management strategies.",
        article_id: None,
    },
    Condition {
        id: "ocd",
        name: "Obsessive-Compulsive Disorder",
        description: "Excessive thoughts (obsessions) that lead to repetitive behaviors (compulsions).",
        symptoms: &["intrusive_thoughts", "compulsions", "anxiety", "worry"],
        red_flags: &[],
        recommended_action: "ERP (Exposure and Response Prevention) therapy is the gold standard treatment for OCD.",
        article_id: None,
    },
];
