//! Axum route handlers for the Content Planner API.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::planner::cadence::Cadence;
use crate::planner::duration::PlanDuration;
use crate::planner::export::{render, replace_entry, ExportFormat};
use crate::planner::normalizer::{
    is_placeholder, HeuristicNormalizer, PlanEntry, PlanNormalizer, MAX_CAPTION_CHARS,
    MAX_TOPIC_CHARS,
};
use crate::planner::prompts::build_plan_prompt;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Planner form as submitted by the client. Every field may be left empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlannerForm {
    pub industry: String,
    pub platforms: Vec<String>,
    pub goal: String,
    pub content_types: Vec<String>,
    pub target_audience: String,
    pub age_range: String,
    pub posting_frequency: String,
    pub duration: String,
}

impl PlannerForm {
    /// The duration label used for both the prompt and normalization.
    pub fn duration(&self) -> PlanDuration {
        match self.duration.trim() {
            "" => PlanDuration::OneWeek,
            label => PlanDuration::from_label(label),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub duration: PlanDuration,
    pub duration_days: usize,
    pub entries: Vec<PlanEntry>,
    /// Entries that are padding rather than generated content.
    pub placeholder_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub entries: Vec<PlanEntry>,
    pub format: ExportFormat,
    #[serde(default)]
    pub duration: Option<PlanDuration>,
}

#[derive(Debug, Deserialize)]
pub struct EditPlanRequest {
    pub entries: Vec<PlanEntry>,
    pub original_date: NaiveDate,
    pub original_topic: String,
    pub edited: PlanEntry,
}

#[derive(Debug, Serialize)]
pub struct EditPlanResponse {
    pub entries: Vec<PlanEntry>,
    pub replaced: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/plans
///
/// Asks the generator for a plan and normalizes whatever comes back.
/// A provider failure is not an error here: the plan degrades to placeholders.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Json(form): Json<PlannerForm>,
) -> Result<Json<PlanResponse>, AppError> {
    let duration = form.duration();
    let prompt = build_plan_prompt(&PlannerForm {
        duration: duration.label().to_string(),
        ..form.clone()
    });

    let raw_text = match state.generator.generate_text(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Plan generation failed, falling back to placeholders: {e}");
            String::new()
        }
    };

    let normalizer = plan_normalizer(state.config.plan_frequency_aware_dates, &form);
    let today = Utc::now().date_naive();
    let entries = normalizer.normalize(&raw_text, duration, today);
    let placeholder_count = entries.iter().filter(|e| is_placeholder(e)).count();

    info!(
        "Generated {} plan with {} entries ({} placeholders)",
        duration.label(),
        entries.len(),
        placeholder_count
    );

    Ok(Json(PlanResponse {
        duration,
        duration_days: duration.days(),
        entries,
        placeholder_count,
    }))
}

/// POST /api/v1/plans/export
///
/// Renders a plan as text. Download and CSV formats come back as attachments.
pub async fn handle_export_plan(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    let body = render(&request.entries, request.format);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(request.format.content_type()),
    );

    let duration = request.duration.unwrap_or(PlanDuration::OneWeek);
    if let Some(filename) = request.format.filename(duration.label()) {
        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid export filename: {e}")))?;
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((headers, body).into_response())
}

/// POST /api/v1/plans/edit
///
/// Applies a single calendar edit to a plan held by the client.
pub async fn handle_edit_plan(
    Json(request): Json<EditPlanRequest>,
) -> Result<Json<EditPlanResponse>, AppError> {
    let edited = &request.edited;
    if edited.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }
    if edited.topic.chars().count() > MAX_TOPIC_CHARS {
        return Err(AppError::Validation(format!(
            "topic must be at most {MAX_TOPIC_CHARS} characters"
        )));
    }
    if edited.caption.chars().count() > MAX_CAPTION_CHARS {
        return Err(AppError::Validation(format!(
            "caption must be at most {MAX_CAPTION_CHARS} characters"
        )));
    }

    let mut entries = request.entries;
    let replaced = replace_entry(
        &mut entries,
        request.original_date,
        &request.original_topic,
        edited,
    );
    if replaced == 0 {
        return Err(AppError::NotFound(format!(
            "No plan entry on {} with topic '{}'",
            request.original_date, request.original_topic
        )));
    }

    Ok(Json(EditPlanResponse { entries, replaced }))
}

/// Picks the normalizer for a request. Dates advance one calendar day per entry
/// unless frequency-aware spacing is switched on.
fn plan_normalizer(frequency_aware: bool, form: &PlannerForm) -> impl PlanNormalizer {
    let cadence = if frequency_aware {
        Cadence::from_frequency(&form.posting_frequency)
    } else {
        Cadence::Daily
    };
    HeuristicNormalizer::new(cadence)
}
