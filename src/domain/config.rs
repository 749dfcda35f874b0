//! Run thresholds.
//!
//! All knobs that shape a run live here with their defaults, so the CLI,
//! the fetcher and the aggregation loop read the same values.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LIST_PATH: &str = "animelist.xml";
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe";

/// Inclusive score threshold for "top-rated".
pub const DEFAULT_MIN_SCORE: u32 = 8;
/// Upper bound on how many top-rated titles are queried.
pub const DEFAULT_MAX_SOURCES: usize = 25;
/// Recommendations considered per queried title.
pub const DEFAULT_PER_TITLE_LIMIT: usize = 8;
/// Titles shown in the final report.
pub const DEFAULT_REPORT_SIZE: usize = 20;
/// Top-rated titles listed in the preview block.
pub const DEFAULT_PREVIEW_COUNT: usize = 10;
/// Total attempts per fetch (only HTTP 429 triggers another attempt).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// A 429 on attempt `n` waits `n * BACKOFF_UNIT`.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(2);
/// Pause after each successful call (service limit: one request per second).
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub list_path: PathBuf,
    pub base_url: String,
    pub min_score: u32,
    pub max_sources: usize,
    pub per_title_limit: usize,
    pub report_size: usize,
    pub preview_count: usize,
    pub retry: RetryPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            list_path: PathBuf::from(DEFAULT_LIST_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            min_score: DEFAULT_MIN_SCORE,
            max_sources: DEFAULT_MAX_SOURCES,
            per_title_limit: DEFAULT_PER_TITLE_LIMIT,
            report_size: DEFAULT_REPORT_SIZE,
            preview_count: DEFAULT_PREVIEW_COUNT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Timing and retry settings for the recommendation fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_unit: Duration,
    pub rate_limit_delay: Duration,
    pub request_timeout: Duration,
}

impl RetryPolicy {
    /// Wait before retrying after a 429 on `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            rate_limit_delay: DEFAULT_RATE_LIMIT_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
