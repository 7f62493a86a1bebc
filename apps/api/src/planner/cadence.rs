//! Posting cadence — which calendar days a plan schedules entries on.
//!
//! The normalizer defaults to `Cadence::Daily` (one entry per calendar day). The other
//! cadences are only used when frequency-aware dates are switched on in config.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    #[default]
    Daily,
    /// Monday, Wednesday, Friday.
    ThreeTimesWeekly,
    /// Monday through Friday.
    WeekdaysOnly,
}

impl Cadence {
    /// Maps a planner form frequency label. Unknown and "custom" labels post daily.
    pub fn from_frequency(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "3x/week" | "3x per week" | "three_times_weekly" => Cadence::ThreeTimesWeekly,
            "weekdays only" | "weekdays" | "weekdays_only" => Cadence::WeekdaysOnly,
            _ => Cadence::Daily,
        }
    }

    fn includes(self, day: Weekday) -> bool {
        match self {
            Cadence::Daily => true,
            Cadence::ThreeTimesWeekly => matches!(day, Weekday::Mon | Weekday::Wed | Weekday::Fri),
            Cadence::WeekdaysOnly => !matches!(day, Weekday::Sat | Weekday::Sun),
        }
    }

    /// Posting dates on or after `start`, ascending and without repeats.
    pub fn dates(self, start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        std::iter::successors(Some(start), |d| d.checked_add_days(Days::new(1)))
            .filter(move |d| self.includes(d.weekday()))
    }
}
