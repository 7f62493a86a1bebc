//! Plan Text Normalizer — turns free-form generator prose into dated plan entries.
//!
//! The generator is asked for a "date / topic / caption" list but nothing enforces it,
//! so the text is salvaged line by line:
//! 1. Drop blank lines; consider at most `duration.days()` of the rest.
//! 2. A line qualifies if it has a `:` or is longer than 20 chars.
//! 3. `topic: caption` split on the first colon, both hard-cut to their limits.
//! 4. Dates follow output position on the configured cadence, starting at `today`.
//! 5. Pad with placeholders up to `min(duration.days(), 30)` entries.
//!
//! Normalization never fails. Callers that need to know whether the generator
//! produced anything usable compare captions with `PLACEHOLDER_CAPTION`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::planner::cadence::Cadence;
use crate::planner::duration::PlanDuration;

pub const MAX_TOPIC_CHARS: usize = 100;
pub const MAX_CAPTION_CHARS: usize = 500;
/// Padding never goes past this many entries, whatever the duration.
pub const MAX_PADDED_ENTRIES: usize = 30;
/// Lines without a colon must be longer than this to count as content.
const MIN_FREE_LINE_CHARS: usize = 20;

pub const PLACEHOLDER_CAPTION: &str =
    "Share valuable insights and engage with your audience on this topic.";

/// One dated unit of a content calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub date: NaiveDate,
    pub topic: String,
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Converts generator output into plan entries. Swap implementations to change the
/// parsing strategy without touching callers.
pub trait PlanNormalizer: Send + Sync {
    fn normalize(&self, raw_text: &str, duration: PlanDuration, today: NaiveDate)
        -> Vec<PlanEntry>;
}

/// Line-salvage normalizer. `cadence` picks the posting days; the default posts daily.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicNormalizer {
    pub cadence: Cadence,
}

impl HeuristicNormalizer {
    pub fn new(cadence: Cadence) -> Self {
        Self { cadence }
    }
}

impl PlanNormalizer for HeuristicNormalizer {
    fn normalize(
        &self,
        raw_text: &str,
        duration: PlanDuration,
        today: NaiveDate,
    ) -> Vec<PlanEntry> {
        let duration_days = duration.days();
        let floor = duration_days.min(MAX_PADDED_ENTRIES);
        let mut dates = self.cadence.dates(today);
        let mut entries = Vec::with_capacity(floor);

        let candidates = raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(duration_days)
            .filter(|line| qualifies(line));

        for line in candidates {
            let Some(date) = dates.next() else { break };
            let (topic, caption) = split_line(line, entries.len());
            entries.push(PlanEntry {
                date,
                topic,
                caption,
                platform: None,
            });
        }

        while entries.len() < floor {
            let Some(date) = dates.next() else { break };
            entries.push(placeholder(entries.len(), date));
        }

        entries
    }
}

/// True when the caption is the synthetic padding text.
pub fn is_placeholder(entry: &PlanEntry) -> bool {
    entry.caption == PLACEHOLDER_CAPTION
}

fn qualifies(line: &str) -> bool {
    line.contains(':') || line.chars().count() > MIN_FREE_LINE_CHARS
}

fn split_line(line: &str, index: usize) -> (String, String) {
    let (before, after) = line.split_once(':').unwrap_or((line, ""));

    let topic = match before.trim() {
        "" => format!("Content Idea {}", index + 1),
        t => t.to_string(),
    };
    let caption = match after.trim() {
        "" => line,
        c => c,
    };

    (
        truncate_chars(&topic, MAX_TOPIC_CHARS),
        truncate_chars(caption, MAX_CAPTION_CHARS),
    )
}

fn placeholder(index: usize, date: NaiveDate) -> PlanEntry {
    PlanEntry {
        date,
        topic: format!("Content Topic {}", index + 1),
        caption: PLACEHOLDER_CAPTION.to_string(),
        platform: None,
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
