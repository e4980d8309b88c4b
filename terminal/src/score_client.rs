use anyhow::{bail, Context, Result};
use std::time::Duration;

use common::score::{LeaderboardEntry, LeaderboardResponse, SubmitScoreRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking HTTP client for the score service.
pub struct ScoreClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ScoreClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(ScoreClient { base_url, http })
    }

    pub fn submit_score(&self, name: &str, score: u32) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/api/scores", self.base_url))
            .json(&SubmitScoreRequest {
                name: name.to_string(),
                score,
            })
            .send()
            .context("Failed to reach score service")?;
        if !response.status().is_success() {
            bail!("Score service returned {}", response.status());
        }
        Ok(())
    }

    pub fn top_scores(&self, count: usize) -> Result<Vec<LeaderboardEntry>> {
        let response = self
            .http
            .get(format!("{}/api/scores", self.base_url))
            .query(&[("limit", count)])
            .send()
            .context("Failed to reach score service")?
            .error_for_status()
            .context("Score service rejected the request")?;
        let body: LeaderboardResponse = response
            .json()
            .context("Malformed leaderboard response")?;
        Ok(body.entries)
    }
}
