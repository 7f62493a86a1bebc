//! Plan duration labels and their day counts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A requested plan span. Built from a human-readable label via a closed table;
/// unknown labels fall back to `OneMonth`, so parsing never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlanDuration {
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
    FourWeeks,
    #[default]
    OneMonth,
}

impl PlanDuration {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "1 week" => PlanDuration::OneWeek,
            "2 weeks" => PlanDuration::TwoWeeks,
            "3 weeks" => PlanDuration::ThreeWeeks,
            "4 weeks" => PlanDuration::FourWeeks,
            _ => PlanDuration::OneMonth,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanDuration::OneWeek => "1 week",
            PlanDuration::TwoWeeks => "2 weeks",
            PlanDuration::ThreeWeeks => "3 weeks",
            PlanDuration::FourWeeks => "4 weeks",
            PlanDuration::OneMonth => "1 month",
        }
    }

    pub fn days(self) -> usize {
        match self {
            PlanDuration::OneWeek => 7,
            PlanDuration::TwoWeeks => 14,
            PlanDuration::ThreeWeeks => 21,
            PlanDuration::FourWeeks | PlanDuration::OneMonth => 30,
        }
    }
}

impl Serialize for PlanDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PlanDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(PlanDuration::from_label(&label))
    }
}
