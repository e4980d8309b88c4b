use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use super::models::ScoreRecord;
use super::ScoreStore;

/// PostgreSQL-backed score store.
pub struct PgScoreStore {
    pool: PgPool,
}

impl PgScoreStore {
    pub fn new(pool: PgPool) -> Self {
        PgScoreStore { pool }
    }
}

#[async_trait]
impl ScoreStore for PgScoreStore {
    async fn insert_score(&self, name: &str, score: u32) -> Result<ScoreRecord> {
        sqlx::query_as::<_, ScoreRecord>(
            "INSERT INTO leaderboard (name, score) VALUES ($1, $2) \
             RETURNING id, name, score, timestamp",
        )
        .bind(name)
        .bind(score as i32)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert score")
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        sqlx::query_as::<_, ScoreRecord>(
            "SELECT id, name, score, timestamp FROM leaderboard \
             ORDER BY score DESC, timestamp ASC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch leaderboard")
    }
}
