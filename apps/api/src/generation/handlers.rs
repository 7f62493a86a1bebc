//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{generate_content, GenerateRequest, GenerateResponse};
use crate::generation::platform::Platform;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    /// `data:` URL ready to drop into an `<img src>`.
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub platform: Platform,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// `None` when the platform cannot be shared to directly; copy the text instead.
    pub share_url: Option<String>,
}

/// POST /api/v1/content/generate
///
/// Generates content for each selected platform and records it in history.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response =
        generate_content(state.generator.as_ref(), state.history.as_ref(), request).await?;
    Ok(Json(response))
}

/// POST /api/v1/images
///
/// Renders an image prompt into an image.
pub async fn handle_generate_image(
    State(state): State<AppState>,
    Json(request): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation(
            "prompt is required for image generation".to_string(),
        ));
    }

    let image_url = state
        .generator
        .generate_image(&request.prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Image generation failed: {e}")))?;

    Ok(Json(ImageResponse { image_url }))
}

/// POST /api/v1/share
///
/// Builds a pre-filled share link for a generated or saved post.
pub async fn handle_share_link(Json(request): Json<ShareRequest>) -> Json<ShareResponse> {
    Json(ShareResponse {
        share_url: request.platform.share_url(&request.content),
    })
}
