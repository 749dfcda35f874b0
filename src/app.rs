//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment
//! - parses the MyAnimeList export
//! - runs the fetch/tally pipeline against Jikan
//! - prints the report

use std::io::Write;

use clap::Parser;

use crate::cli::{BASE_URL_ENV, Cli};
use crate::data::{JikanClient, RecommendationSource};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::{ParsedList, parse_animelist};

pub mod pipeline;

/// Entry point for the `recs` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let config = cli.to_config(std::env::var(BASE_URL_ENV).ok())?;
    tracing::debug!(?config, "starting run");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", crate::report::format_header()).map_err(write_error)?;
    out.flush().map_err(write_error)?;

    let list = parse_animelist(&config.list_path)?;
    let client = JikanClient::new(config.base_url.clone(), config.retry)?;

    report_run(&mut out, &config, &list, &client)
}

/// Write the full report for `list` to `out`, fetching from `source` as it goes.
pub fn report_run<W: Write>(
    out: &mut W,
    config: &RunConfig,
    list: &ParsedList,
    source: &dyn RecommendationSource,
) -> Result<(), AppError> {
    let plan = pipeline::RunPlan::new(config, list);

    writeln!(out, "{}", crate::report::format_summary(&plan.summary)).map_err(write_error)?;
    writeln!(
        out,
        "{}",
        crate::report::format_top_rated(&plan.top_rated, config.min_score, config.preview_count)
    )
    .map_err(write_error)?;
    writeln!(out, "{}", crate::report::format_fetch_header(plan.queried)).map_err(write_error)?;

    // Progress lines interleave with fetch notices on stdout, so flush each one.
    let mut progress_err = None;
    let run = pipeline::run_recommendations(config, list, plan, source, |idx, total, entry| {
        if progress_err.is_some() {
            return;
        }
        let line = crate::report::format_progress(idx, total, &entry.title);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            progress_err = Some(e);
        }
    });
    if let Some(e) = progress_err {
        return Err(write_error(e));
    }

    writeln!(out).map_err(write_error)?;
    write!(out, "{}", crate::report::format_recommendations(&run.top)).map_err(write_error)?;
    out.flush().map_err(write_error)
}

fn write_error(e: std::io::Error) -> AppError {
    AppError::new(4, format!("Failed to write report: {e}"))
}
