pub mod models;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;

use models::ScoreRecord;

/// Persistence boundary for the leaderboard.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Insert a score and return the stored row; id and timestamp are
    /// assigned by the store.
    async fn insert_score(&self, name: &str, score: u32) -> Result<ScoreRecord>;

    /// Top `limit` rows, score descending, earlier submission first on ties.
    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>>;
}
