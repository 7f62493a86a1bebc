//! Content Generation — one provider call per selected platform.
//!
//! Flow: validate → for each platform (in request order): content prompt → generate →
//!       optional image-prompt generate → persist to history → return results.
//!
//! Platforms are processed sequentially; a provider failure on any platform's text
//! aborts the whole request. Image prompts are best-effort.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::platform::Platform;
use crate::generation::prompts::{build_content_prompt, build_image_prompt};
use crate::history::store::HistoryStore;
use crate::llm_client::{Generator, LlmError};
use crate::models::content::GenerationResult;
use crate::models::history::NewHistoryEntry;

/// Content used when the provider answers without any text.
pub const EMPTY_CONTENT_FALLBACK: &str = "Failed to generate content";
/// Image prompt used when the image-prompt call fails or returns nothing.
pub const IMAGE_PROMPT_FALLBACK: &str = "Visual content suggestion";

/// Request body for content generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Uuid,
    pub prompt: String,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub generate_images: bool,
}

/// Response from the generation pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// `None` when saving to history failed; the results are still returned.
    pub history_id: Option<Uuid>,
    pub results: Vec<GenerationResult>,
}

/// Runs generation for every requested platform and saves the batch to history.
pub async fn generate_content(
    generator: &dyn Generator,
    history: &dyn HistoryStore,
    request: GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }
    if request.platforms.is_empty() {
        return Err(AppError::Validation(
            "at least one platform must be selected".to_string(),
        ));
    }

    let mut results = Vec::with_capacity(request.platforms.len());
    for platform in &request.platforms {
        info!("Generating content for {platform}");
        let result =
            generate_for_platform(generator, platform, &request.prompt, request.generate_images)
                .await?;
        info!(
            "Generated {} chars for {} (image prompt: {})",
            result.content().chars().count(),
            result.platform(),
            result.image_prompt().is_some()
        );
        results.push(result);
    }

    let history_id = match history
        .insert(NewHistoryEntry {
            user_id: request.user_id,
            prompt: request.prompt,
            platforms: request.platforms,
            results: results.clone(),
        })
        .await
    {
        Ok(entry) => Some(entry.id),
        Err(e) => {
            warn!("Failed to save generation to history: {e}");
            None
        }
    };

    Ok(GenerateResponse {
        history_id,
        results,
    })
}

async fn generate_for_platform(
    generator: &dyn Generator,
    platform: &Platform,
    user_prompt: &str,
    with_image: bool,
) -> Result<GenerationResult, AppError> {
    let prompt = build_content_prompt(platform, user_prompt);
    let content = match generator.generate_text(&prompt).await {
        Ok(text) => text,
        Err(LlmError::EmptyContent) => EMPTY_CONTENT_FALLBACK.to_string(),
        Err(e) => {
            return Err(AppError::Llm(format!(
                "Content generation for {platform} failed: {e}"
            )))
        }
    };

    if !with_image {
        return Ok(GenerationResult::Text {
            platform: platform.clone(),
            content,
        });
    }

    let image_prompt = match generator
        .generate_text(&build_image_prompt(platform, &content))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("Image prompt for {platform} failed, using fallback: {e}");
            IMAGE_PROMPT_FALLBACK.to_string()
        }
    };

    Ok(GenerationResult::TextWithImage {
        platform: platform.clone(),
        content,
        image_prompt,
    })
}
