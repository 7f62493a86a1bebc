use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::generation::platform::Platform;
use crate::models::content::GenerationResult;

/// One saved generation: the prompt, the platforms asked for and what came back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub prompt: String,
    pub platforms: Vec<Platform>,
    pub results: Vec<GenerationResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub user_id: Uuid,
    pub prompt: String,
    pub platforms: Vec<Platform>,
    pub results: Vec<GenerationResult>,
}

/// Replacement values for an edited history entry.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryUpdate {
    pub prompt: String,
    pub platforms: Vec<Platform>,
    pub results: Vec<GenerationResult>,
}

#[derive(Debug, FromRow)]
pub struct ContentHistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub prompt: String,
    pub platforms: Vec<String>,
    pub results: Json<Vec<GenerationResult>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentHistoryRow> for HistoryEntry {
    fn from(row: ContentHistoryRow) -> Self {
        HistoryEntry {
            id: row.id,
            user_id: row.user_id,
            prompt: row.prompt,
            platforms: row.platforms.into_iter().map(Platform::from).collect(),
            results: row.results.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
