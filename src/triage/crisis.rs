use serde::Serialize;

/// How a crisis resource is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactChannel {
    Call,
    Text,
}

/// A single crisis line shown on the safety screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisResource {
    pub name: &'static str,
    pub channel: ContactChannel,
    /// Number to dial or text.
    pub contact: &'static str,
    /// Keyword to send, for text lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<&'static str>,
    pub instructions: &'static str,
    /// `tel:` / `sms:` link for one-tap contact.
    pub href: &'static str,
}

/// Safety content rendered whenever triage routes to crisis.
///
/// Shown unconditionally; nothing in scoring can suppress it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisResources {
    pub heading: &'static str,
    pub message: &'static str,
    /// Primary line, rendered as the main call-to-action.
    pub primary: CrisisResource,
    pub others: Vec<CrisisResource>,
}

const LIFELINE: CrisisResource = CrisisResource {
    name: "988 Suicide & Crisis Lifeline",
    channel: ContactChannel::Call,
    contact: "988",
    keyword: None,
    instructions: "Call 988. Free, confidential, 24/7.",
    href: "tel:988",
};

const TEXT_LINE: CrisisResource = CrisisResource {
    name: "Crisis Text Line",
    channel: ContactChannel::Text,
    contact: "741741",
    keyword: Some("HOME"),
    instructions: "Text HOME to 741741",
    href: "sms:741741?body=HOME",
};

const EMERGENCY: CrisisResource = CrisisResource {
    name: "Emergency Services",
    channel: ContactChannel::Call,
    contact: "911",
    keyword: None,
    instructions: "Call 911",
    href: "tel:911",
};

pub fn crisis_resources() -> CrisisResources {
    CrisisResources {
        heading: "Immediate Help Available",
        message: "Your responses suggest you might be going through a difficult time. \
                  You don't have to face this alone. Confidential support is available 24/7.",
        primary: LIFELINE,
        others: vec![TEXT_LINE, EMERGENCY],
    }
}
