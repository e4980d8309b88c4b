//! Wire types shared between the score service and its clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted player name, enforced by both the submit form and the API.
pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    pub name: String,
    pub score: u32,
}

/// A stored leaderboard record, id and timestamp assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredScore {
    pub id: i32,
    pub name: String,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

/// A ranked row as served by the leaderboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}
