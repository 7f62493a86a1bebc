//! Plan export — text renderings for clipboard, download, share and spreadsheets.

use serde::{Deserialize, Serialize};

use crate::planner::normalizer::PlanEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// `{date}: {topic}` header with the caption underneath.
    Copy,
    /// Labelled blocks separated by a dashed rule, served as a `.txt` file.
    Download,
    /// One `{date}: {topic}` line per entry.
    Share,
    Csv,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            _ => "text/plain; charset=utf-8",
        }
    }

    /// Attachment filename, or `None` for formats meant to be pasted.
    pub fn filename(self, duration_label: &str) -> Option<String> {
        let stem = format!("content-plan-{}", duration_label.trim().replace(' ', "-"));
        match self {
            ExportFormat::Download => Some(format!("{stem}.txt")),
            ExportFormat::Csv => Some(format!("{stem}.csv")),
            ExportFormat::Copy | ExportFormat::Share => None,
        }
    }
}

pub fn render(entries: &[PlanEntry], format: ExportFormat) -> String {
    match format {
        ExportFormat::Copy => entries
            .iter()
            .map(|e| format!("{}: {}\n{}\n", e.date, e.topic, e.caption))
            .collect::<Vec<_>>()
            .join("\n"),
        ExportFormat::Download => entries
            .iter()
            .map(|e| {
                format!(
                    "Date: {}\nTopic: {}\nCaption: {}\n{}\n",
                    e.date,
                    e.topic,
                    e.caption,
                    "-".repeat(50)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ExportFormat::Share => entries
            .iter()
            .map(|e| format!("{}: {}", e.date, e.topic))
            .collect::<Vec<_>>()
            .join("\n"),
        ExportFormat::Csv => render_csv(entries),
    }
}

fn render_csv(entries: &[PlanEntry]) -> String {
    let mut out = String::from("date,topic,caption,platform\r\n");
    for e in entries {
        let row = [
            e.date.to_string(),
            csv_field(&e.topic),
            csv_field(&e.caption),
            csv_field(e.platform.as_deref().unwrap_or_default()),
        ];
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Quotes a field when it holds a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Applies a calendar edit: every entry matching the original date and topic is
/// replaced by `edited`. Returns how many entries changed.
pub fn replace_entry(
    plan: &mut [PlanEntry],
    original_date: chrono::NaiveDate,
    original_topic: &str,
    edited: &PlanEntry,
) -> usize {
    let mut replaced = 0;
    for entry in plan
        .iter_mut()
        .filter(|e| e.date == original_date && e.topic == original_topic)
    {
        *entry = edited.clone();
        replaced += 1;
    }
    replaced
}
