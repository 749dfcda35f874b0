//! The recommendation pipeline:
//! parsed list -> top-rated subset -> sequential fetches -> filtered tally -> top-N.
//!
//! Presentation stays in `app`/`report`; this module only computes.

use crate::data::RecommendationSource;
use crate::domain::{KnownIds, ListEntry, RunConfig};
use crate::io::ParsedList;
use crate::report::{RunSummary, Tally};

/// What a run will do, computed before any network call.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub summary: RunSummary,
    pub top_rated: Vec<ListEntry>,
    pub queried: usize,
}

impl RunPlan {
    pub fn new(config: &RunConfig, list: &ParsedList) -> Self {
        let top_rated = top_rated(&list.rated, config.min_score);
        let queried = query_count(top_rated.len(), config.max_sources);
        Self {
            summary: RunSummary::from_list(list),
            top_rated,
            queried,
        }
    }

    /// Entries that will be queried, highest score first.
    pub fn queue(&self) -> &[ListEntry] {
        &self.top_rated[..self.queried]
    }
}

/// Everything computed during one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub plan: RunPlan,
    pub tally: Tally,
    pub top: Vec<(String, usize)>,
}

/// Rated entries with `score >= min_score`, keeping the rated order.
pub fn top_rated(rated: &[ListEntry], min_score: u32) -> Vec<ListEntry> {
    rated.iter().filter(|e| e.score >= min_score).cloned().collect()
}

/// How many top-rated titles to actually query.
pub fn query_count(top_rated: usize, max_sources: usize) -> usize {
    top_rated.min(max_sources)
}

/// Query each entry in `queue` in order and tally titles the user doesn't
/// already know about. Only the first `per_title_limit` suggestions per
/// entry are considered.
///
/// `on_progress` is called before each fetch with the 1-based index.
pub fn collect_recommendations<F>(
    queue: &[ListEntry],
    source: &dyn RecommendationSource,
    known: &KnownIds,
    per_title_limit: usize,
    mut on_progress: F,
) -> Tally
where
    F: FnMut(usize, usize, &ListEntry),
{
    let mut tally = Tally::new();
    let total = queue.len();

    for (idx, entry) in queue.iter().enumerate() {
        on_progress(idx + 1, total, entry);

        let recs = source.recommendations(&entry.id);
        let mut skipped = 0usize;
        for rec in recs.iter().take(per_title_limit) {
            if known.contains(&rec.id()) {
                skipped += 1;
                continue;
            }
            tally.increment(&rec.title);
        }
        tracing::debug!(
            id = %entry.id,
            returned = recs.len(),
            skipped_known = skipped,
            "tallied recommendations"
        );
    }

    tally
}

/// Execute `plan` against an already-parsed list.
pub fn run_recommendations<F>(
    config: &RunConfig,
    list: &ParsedList,
    plan: RunPlan,
    source: &dyn RecommendationSource,
    on_progress: F,
) -> RunOutput
where
    F: FnMut(usize, usize, &ListEntry),
{
    let tally = collect_recommendations(
        plan.queue(),
        source,
        &list.known,
        config.per_title_limit,
        on_progress,
    );
    let top = tally.most_common(config.report_size);

    tracing::info!(
        queried = plan.queried,
        distinct_titles = tally.len(),
        reported = top.len(),
        "recommendation run finished"
    );

    RunOutput { plan, tally, top }
}
