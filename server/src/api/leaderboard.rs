use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use common::score::{
    LeaderboardEntry, LeaderboardResponse, StoredScore, SubmitScoreRequest, MAX_NAME_LEN,
};

use crate::api::error::ApiError;
use crate::db::ScoreStore;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

/// Query parameters for the leaderboard endpoint
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Number of entries to return (default: 10, max: 100)
    pub limit: Option<usize>,
}

/// State for leaderboard endpoints
#[derive(Clone)]
pub struct LeaderboardState {
    pub store: Arc<dyn ScoreStore>,
}

/// Store a score. The name is trimmed and must be non-empty and at most
/// [`MAX_NAME_LEN`] characters; the timestamp is assigned by the store.
pub async fn submit_score(
    State(state): State<LeaderboardState>,
    Json(request): Json<SubmitScoreRequest>,
) -> Result<(StatusCode, Json<StoredScore>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Name cannot be empty.".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "Name must be at most {} characters.",
            MAX_NAME_LEN
        )));
    }

    let record = state.store.insert_score(name, request.score).await?;
    info!("Stored score {} for {}", record.score, record.name);

    Ok((
        StatusCode::CREATED,
        Json(StoredScore {
            id: record.id,
            name: record.name,
            score: record.score as u32,
            timestamp: record.timestamp,
        }),
    ))
}

/// Get the leaderboard, ranked by score descending with earlier submissions
/// winning ties.
pub async fn get_leaderboard(
    State(state): State<LeaderboardState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT).max(1);

    let records = state.store.top_scores(limit).await?;

    let entries = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| LeaderboardEntry {
            rank: idx + 1,
            name: record.name,
            score: record.score as u32,
            timestamp: record.timestamp,
        })
        .collect();

    Ok(Json(LeaderboardResponse { entries }))
}
