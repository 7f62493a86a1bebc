//! History store — persistence for past generations.
//!
//! `AppState` holds an `Arc<dyn HistoryStore>`; `PgHistoryStore` is the production
//! backend. Every operation is scoped to the owning `user_id`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::history::{ContentHistoryRow, HistoryEntry, HistoryUpdate, NewHistoryEntry};

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn insert(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, AppError>;

    /// Most recent first, at most `limit` entries.
    async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<HistoryEntry>, AppError>;

    /// Returns false when no entry matched.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Overwrites prompt, platforms and results and stamps `updated_at`.
    /// Returns `None` when no entry matched.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: HistoryUpdate,
    ) -> Result<Option<HistoryEntry>, AppError>;
}

pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn platform_ids(platforms: &[crate::generation::platform::Platform]) -> Vec<String> {
    platforms.iter().map(|p| p.id().to_string()).collect()
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn insert(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, AppError> {
        let row = sqlx::query_as::<_, ContentHistoryRow>(
            r#"
            INSERT INTO content_history (id, user_id, prompt, platforms, results)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(&entry.prompt)
        .bind(platform_ids(&entry.platforms))
        .bind(Json(&entry.results))
        .fetch_one(&self.pool)
        .await?;

        info!("Saved history entry {} for user {}", row.id, row.user_id);
        Ok(row.into())
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<HistoryEntry>, AppError> {
        let rows = sqlx::query_as::<_, ContentHistoryRow>(
            r#"
            SELECT * FROM content_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM content_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: HistoryUpdate,
    ) -> Result<Option<HistoryEntry>, AppError> {
        let row = sqlx::query_as::<_, ContentHistoryRow>(
            r#"
            UPDATE content_history
            SET prompt = $3, platforms = $4, results = $5, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.prompt)
        .bind(platform_ids(&update.platforms))
        .bind(Json(&update.results))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(HistoryEntry::from))
    }
}
