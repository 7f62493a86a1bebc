//! Test doubles for the generator and the history store.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::history::store::HistoryStore;
use crate::llm_client::{Generator, LlmError};
use crate::models::history::{HistoryEntry, HistoryUpdate, NewHistoryEntry};

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        gemini_api_key: "test-key".to_string(),
        gemini_api_base: "http://127.0.0.1:1".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        llm_max_retries: 0,
        plan_frequency_aware_dates: false,
        history_page_size: 50,
    }
}

/// Replays canned provider answers in order and records every prompt it was sent.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::Api {
                status: 503,
                message: "script exhausted".to_string(),
            }))
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.next(prompt)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError> {
        self.next(prompt)
    }
}

#[derive(Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
    fail: bool,
}

impl InMemoryHistoryStore {
    /// A store whose every operation errors.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Internal(anyhow::anyhow!("history unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn insert(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, AppError> {
        self.check()?;
        let now = Utc::now();
        let saved = HistoryEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            prompt: entry.prompt,
            platforms: entry.platforms,
            results: entry.results,
            created_at: now,
            updated_at: now,
        };
        self.entries.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<HistoryEntry>, AppError> {
        self.check()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| !(e.id == id && e.user_id == user_id));
        Ok(entries.len() < before)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: HistoryUpdate,
    ) -> Result<Option<HistoryEntry>, AppError> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries
            .iter_mut()
            .find(|e| e.id == id && e.user_id == user_id)
        else {
            return Ok(None);
        };
        entry.prompt = update.prompt;
        entry.platforms = update.platforms;
        entry.results = update.results;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }
}
