//! Command-line parsing.
//!
//! Every flag is optional; running `recs` with no arguments uses the defaults
//! from [`crate::domain::config`].

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{
    DEFAULT_BASE_URL, DEFAULT_LIST_PATH, DEFAULT_MAX_SOURCES, DEFAULT_MIN_SCORE,
    DEFAULT_PER_TITLE_LIMIT, DEFAULT_PREVIEW_COUNT, DEFAULT_REPORT_SIZE, RetryPolicy, RunConfig,
};
use crate::error::AppError;

/// Environment override for the recommendation service host.
pub const BASE_URL_ENV: &str = "JIKAN_BASE_URL";

#[derive(Debug, Parser, Clone)]
#[command(
    name = "recs",
    version,
    about = "Anime recommendations from your MyAnimeList export"
)]
pub struct Cli {
    /// MyAnimeList XML export.
    #[arg(short = 'l', long = "list", default_value = DEFAULT_LIST_PATH)]
    pub list: PathBuf,

    /// Minimum score (inclusive) for a title to count as top-rated.
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub min_score: u32,

    /// Maximum number of top-rated titles to query.
    #[arg(long, default_value_t = DEFAULT_MAX_SOURCES)]
    pub max_sources: usize,

    /// Recommendations considered per queried title.
    #[arg(long = "per-title", default_value_t = DEFAULT_PER_TITLE_LIMIT)]
    pub per_title: usize,

    /// Number of recommendations in the final report.
    #[arg(short = 'n', long, default_value_t = DEFAULT_REPORT_SIZE)]
    pub top: usize,

    /// Number of top-rated titles listed before fetching.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_COUNT)]
    pub preview: usize,

    /// Recommendation service base URL (falls back to $JIKAN_BASE_URL).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log fetch details to stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration. `env_base_url` is the value of
    /// `$JIKAN_BASE_URL`, if any; an explicit `--base-url` wins over it.
    pub fn to_config(&self, env_base_url: Option<String>) -> Result<RunConfig, AppError> {
        if !(1..=10).contains(&self.min_score) {
            return Err(AppError::input("--min-score must be between 1 and 10."));
        }

        let base_url = self
            .base_url
            .clone()
            .or(env_base_url)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(RunConfig {
            list_path: self.list.clone(),
            base_url,
            min_score: self.min_score,
            max_sources: self.max_sources,
            per_title_limit: self.per_title,
            report_size: self.top,
            preview_count: self.preview,
            retry: RetryPolicy::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_yields_defaults() {
        let cli = Cli::parse_from(["recs"]);
        let config = cli.to_config(None).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "recs",
            "--list",
            "export.xml",
            "--min-score",
            "9",
            "--max-sources",
            "5",
            "--per-title",
            "3",
            "-n",
            "7",
        ]);
        let config = cli.to_config(None).unwrap();
        assert_eq!(config.list_path, PathBuf::from("export.xml"));
        assert_eq!(config.min_score, 9);
        assert_eq!(config.max_sources, 5);
        assert_eq!(config.per_title_limit, 3);
        assert_eq!(config.report_size, 7);
    }

    #[test]
    fn base_url_precedence() {
        let env = Some("http://env.local".to_string());

        let cli = Cli::parse_from(["recs"]);
        assert_eq!(cli.to_config(env.clone()).unwrap().base_url, "http://env.local");

        let cli = Cli::parse_from(["recs", "--base-url", "http://flag.local"]);
        assert_eq!(cli.to_config(env).unwrap().base_url, "http://flag.local");

        let cli = Cli::parse_from(["recs"]);
        assert_eq!(cli.to_config(Some(" ".to_string())).unwrap().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn out_of_range_min_score_is_rejected() {
        let cli = Cli::parse_from(["recs", "--min-score", "11"]);
        let err = cli.to_config(None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
