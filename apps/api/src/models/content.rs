use serde::{Deserialize, Serialize};

use crate::generation::platform::Platform;

/// Output of one platform's generation. Image prompts only exist on the second variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationResult {
    Text {
        platform: Platform,
        content: String,
    },
    TextWithImage {
        platform: Platform,
        content: String,
        image_prompt: String,
    },
}

impl GenerationResult {
    pub fn platform(&self) -> &Platform {
        match self {
            GenerationResult::Text { platform, .. }
            | GenerationResult::TextWithImage { platform, .. } => platform,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            GenerationResult::Text { content, .. }
            | GenerationResult::TextWithImage { content, .. } => content,
        }
    }

    pub fn image_prompt(&self) -> Option<&str> {
        match self {
            GenerationResult::Text { .. } => None,
            GenerationResult::TextWithImage { image_prompt, .. } => Some(image_prompt),
        }
    }
}
