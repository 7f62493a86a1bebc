// Prompt text for the content planner.

use crate::planner::handlers::PlannerForm;

/// Instructions appended to every planner prompt. Spacing rules are passed to the
/// generator verbatim; the normalizer does not rely on the model following them.
const PLAN_FORMAT_INSTRUCTIONS: &str = "Please provide a structured content plan with specific dates, topics, and draft captions.
Format your response as a clear list with:
- Date (use YYYY-MM-DD format, starting from today)
- Topic
- Draft Caption (50-100 words, engaging and relevant to the platform)

Make sure the posting frequency matches their preference and cover the full duration requested.
For \"weekdays only\" frequency, only include Monday through Friday dates.
For \"daily\" frequency, include all 7 days of the week.
For \"3x/week\" frequency, space out posts across the week (like Monday, Wednesday, Friday).
Provide practical, actionable content ideas that align with their industry and goals.";

const DEFAULT_DURATION_LABEL: &str = "1 week";

/// Builds the planner prompt. Empty form fields are left out entirely.
pub fn build_plan_prompt(form: &PlannerForm) -> String {
    let duration = non_empty(&form.duration).unwrap_or(DEFAULT_DURATION_LABEL);
    let industry = non_empty(&form.industry)
        .map(|i| format!(" for {i}"))
        .unwrap_or_default();

    let mut lines = vec![format!(
        "Create a personalized {duration} social media content strategy{industry}."
    )];

    if !form.platforms.is_empty() {
        lines.push(format!(
            "The user wants to post on {}.",
            form.platforms.join(", ")
        ));
    }
    if let Some(goal) = non_empty(&form.goal) {
        lines.push(format!("The main goal is {goal}."));
    }
    if !form.content_types.is_empty() {
        lines.push(format!("They prefer {}.", form.content_types.join(", ")));
    }
    if let Some(audience) = non_empty(&form.target_audience) {
        let age = non_empty(&form.age_range)
            .map(|a| format!(" (age range: {a})"))
            .unwrap_or_default();
        lines.push(format!("Target audience: {audience}{age}"));
    }
    if let Some(frequency) = non_empty(&form.posting_frequency) {
        lines.push(format!("Posting frequency: {frequency}"));
    }

    lines.push(String::new());
    lines.push(PLAN_FORMAT_INSTRUCTIONS.to_string());
    lines.join("\n")
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}
