//! Jikan (unofficial MyAnimeList API) recommendation lookups.
//!
//! Calls are blocking and strictly sequential. The service allows roughly one
//! request per second, so every successful call is followed by a fixed pause,
//! and HTTP 429 responses are retried with a linearly growing wait. Every other
//! failure degrades to "no recommendations for this title".

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{RecommendationEntry, RetryPolicy};
use crate::error::AppError;

/// Anything that can suggest titles related to a given identifier.
pub trait RecommendationSource {
    /// Suggestions in service order; empty when the lookup failed.
    fn recommendations(&self, id: &str) -> Vec<RecommendationEntry>;
}

/// Blocking pause between calls.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Per-attempt failure classification.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("HTTP Error {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

pub struct JikanClient<S: Sleeper = ThreadSleeper> {
    client: Client,
    base_url: String,
    policy: RetryPolicy,
    sleeper: S,
}

impl JikanClient {
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Result<Self, AppError> {
        Self::with_sleeper(base_url, policy, ThreadSleeper)
    }
}

impl<S: Sleeper> JikanClient<S> {
    pub fn with_sleeper(
        base_url: impl Into<String>,
        policy: RetryPolicy,
        sleeper: S,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(policy.request_timeout)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            policy,
            sleeper,
        })
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    fn endpoint(&self, id: &str) -> String {
        format!("{}/v4/anime/{id}/recommendations", self.base_url)
    }

    fn fetch_once(&self, id: &str) -> Result<Vec<RecommendationEntry>, FetchError> {
        let url = self.endpoint(id);
        tracing::debug!(%url, "requesting recommendations");

        let resp = self.client.get(&url).send().map_err(FetchError::Transport)?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: RecommendationsResponse = resp.json().map_err(FetchError::Decode)?;
        Ok(body.data.into_iter().map(|item| item.entry).collect())
    }
}

impl<S: Sleeper> RecommendationSource for JikanClient<S> {
    fn recommendations(&self, id: &str) -> Vec<RecommendationEntry> {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.fetch_once(id) {
                Ok(entries) => {
                    tracing::debug!(id, count = entries.len(), attempt, "recommendations received");
                    self.sleeper.sleep(self.policy.rate_limit_delay);
                    return entries;
                }
                Err(FetchError::RateLimited) if attempt < max_attempts => {
                    let wait = self.policy.backoff_for(attempt);
                    tracing::warn!(id, attempt, wait_secs = wait.as_secs_f64(), "rate limited");
                    println!("  Rate limited, waiting {}s...", wait.as_secs_f64());
                    self.sleeper.sleep(wait);
                }
                Err(FetchError::RateLimited) => {
                    tracing::debug!(id, attempt, "rate limited on final attempt");
                }
                Err(err) => {
                    tracing::warn!(id, attempt, error = %err, "recommendation fetch failed");
                    println!("{}", failure_line(&err));
                    return Vec::new();
                }
            }
        }

        tracing::warn!(id, max_attempts, "giving up after repeated rate limiting");
        println!("  Failed after {max_attempts} retries");
        Vec::new()
    }
}

/// Progress-report line for a fetch that ended without results.
fn failure_line(err: &FetchError) -> String {
    match err {
        FetchError::Status(_) => format!("  {err}"),
        _ => format!("  Error: {err}"),
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationsResponse {
    #[serde(default)]
    data: Vec<RecommendationItem>,
}

#[derive(Debug, Deserialize)]
struct RecommendationItem {
    entry: RecommendationEntry,
}
