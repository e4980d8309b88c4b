use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Mutex;

use server::db::models::ScoreRecord;
use server::db::ScoreStore;

/// In-memory ScoreStore so API tests run without PostgreSQL. Timestamps are
/// assigned monotonically so tie-breaking is deterministic.
pub struct MemoryScoreStore {
    rows: Mutex<Vec<ScoreRecord>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        MemoryScoreStore {
            rows: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn insert_score(&self, name: &str, score: u32) -> Result<ScoreRecord> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let record = ScoreRecord {
            id,
            name: name.to_string(),
            score: score as i32,
            timestamp: base + Duration::seconds(id as i64),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.timestamp.cmp(&b.timestamp))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}
