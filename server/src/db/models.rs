use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScoreRecord {
    pub id: i32,
    pub name: String,
    pub score: i32,
    pub timestamp: DateTime<Utc>,
}
