use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde wire name.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// Every variant, in declaration order.
            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(SymptomCategory {
    Emotional => "emotional",
    Cognitive => "cognitive",
    Physical => "physical",
    Behavioral => "behavioral",
});

str_enum!(DurationBucket {
    Today => "today",
    AFewDays => "a few days",
    Weeks => "weeks",
    MonthsPlus => "months+",
});

str_enum!(IntakeStep {
    Search => "search",
    Refine => "refine",
    Analyze => "analyze",
});

impl DurationBucket {
    /// Button label shown in the Refine stage.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Just today",
            Self::AFewDays => "A few days",
            Self::Weeks => "Weeks",
            Self::MonthsPlus => "Months+",
        }
    }
}

impl IntakeStep {
    /// 1-based position used for the progress bar.
    pub fn number(&self) -> u8 {
        match self {
            Self::Search => 1,
            Self::Refine => 2,
            Self::Analyze => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Search => "Symptoms",
            Self::Refine => "Refine",
            Self::Analyze => "Analysis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn symptom_category_round_trip() {
        for (variant, s) in [
            (SymptomCategory::Emotional, "emotional"),
            (SymptomCategory::Cognitive, "cognitive"),
            (SymptomCategory::Physical, "physical"),
            (SymptomCategory::Behavioral, "behavioral"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(SymptomCategory::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn duration_bucket_uses_display_strings_on_the_wire() {
        let json = serde_json::to_string(&DurationBucket::AFewDays).unwrap();
        assert_eq!(json, "\"a few days\"");
        let parsed: DurationBucket = serde_json::from_str("\"months+\"").unwrap();
        assert_eq!(parsed, DurationBucket::MonthsPlus);
    }

    #[test]
    fn intake_steps_are_numbered_in_order() {
        let numbers: Vec<u8> = IntakeStep::all().iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(SymptomCategory::from_str("spiritual").is_err());
        assert!(DurationBucket::from_str("years").is_err());
        assert!(IntakeStep::from_str("").is_err());
    }
}
