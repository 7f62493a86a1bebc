/// LLM Client — the single point of entry for all Gemini API calls in Postcraft.
///
/// ARCHITECTURAL RULE: No other module may call the provider directly.
/// Handlers depend on the `Generator` trait; `LlmClient` is the production backend.
///
/// Models are hardcoded to keep generations comparable across history entries.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Text model used for every content and planner call.
pub const MODEL: &str = "gemini-1.5-flash";
/// Image model used by the image endpoint.
pub const IMAGE_MODEL: &str = "imagen-3.0-generate-001";
const API_KEY_HEADER: &str = "x-goog-api-key";
const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text and image generation as seen by the rest of the service.
///
/// Carried in `AppState` as `Arc<dyn Generator>`.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Sends a free-form instruction and returns the provider's prose.
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError>;

    /// Generates an image and returns it as a data URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub output_tokens: u32,
}

impl GenerateContentResponse {
    /// Extracts the text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Debug, Serialize)]
struct GenerateImageRequest<'a> {
    prompt: &'a str,
    config: ImageConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: &'static str,
    safety_filter_level: &'static str,
    person_generation: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateImageResponse {
    #[serde(default)]
    candidates: Vec<ImageCandidate>,
}

#[derive(Debug, Deserialize)]
struct ImageCandidate {
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by all services in Postcraft.
/// Wraps the Gemini REST API with bounded retry.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    max_retries: u32,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, max_retries: u32) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            max_retries,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Points the client at another models endpoint, e.g. a local stand-in.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// POSTs `body` to `{model}:{method}` and returns the raw success body.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff,
    /// up to `max_retries` extra attempts.
    async fn post<B: Serialize + ?Sized>(
        &self,
        model: &str,
        method: &str,
        body: &B,
    ) -> Result<String, LlmError> {
        let url = format!("{}/{model}:{method}", self.base_url);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1).min(5)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e.without_url()));
                    continue;
                }
            };

            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 || status.is_server_error() {
                warn!("LLM API returned {}: {}", status, text);
                last_error = Some(retryable_error(status.as_u16(), &text, self.max_retries));
                continue;
            }

            if !status.is_success() {
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: error_message(&text),
                });
            }

            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.max_retries,
        }))
    }
}

#[async_trait]
impl Generator for LlmClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let body = self.post(MODEL, "generateContent", &request).await?;
        let response: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_tokens, usage.output_tokens
            );
        }

        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateImageRequest {
            prompt,
            config: ImageConfig {
                aspect_ratio: "1:1",
                safety_filter_level: "BLOCK_ONLY_HIGH",
                person_generation: "ALLOW_ADULT",
            },
        };

        let body = self.post(IMAGE_MODEL, "generateImage", &request).await?;
        let response: GenerateImageResponse = serde_json::from_str(&body)?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.image)
            .filter(|image| !image.is_empty())
            .map(|image| to_data_url(&image))
            .ok_or(LlmError::EmptyContent)
    }
}

/// Error recorded for a retryable status. 429 means the quota is exhausted for now.
fn retryable_error(status: u16, body: &str, retries: u32) -> LlmError {
    if status == 429 {
        LlmError::RateLimited { retries }
    } else {
        LlmError::Api {
            status,
            message: error_message(body),
        }
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<GeminiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Prefixes a bare base64 payload so browsers can render it directly.
fn to_data_url(image: &str) -> String {
    if image.starts_with("data:") {
        image.to_string()
    } else {
        format!("{JPEG_DATA_URL_PREFIX}{image}")
    }
}
