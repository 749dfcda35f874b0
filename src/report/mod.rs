//! Reporting utilities: run statistics, recommendation tally, formatted output.

use std::collections::HashMap;

use crate::domain::{ListEntry, WatchStatus};
use crate::io::ParsedList;

pub mod format;

pub use format::*;

/// Headline numbers about the parsed list.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub known_count: usize,
    pub rated_count: usize,
    pub average_score: f64,
    /// Records per watch status, most common first.
    pub status_counts: Vec<(WatchStatus, usize)>,
}

impl RunSummary {
    pub fn from_list(list: &ParsedList) -> Self {
        let mut counts: Vec<(WatchStatus, usize)> = Vec::new();
        for status in &list.statuses {
            match counts.iter_mut().find(|(s, _)| s == status) {
                Some((_, n)) => *n += 1,
                None => counts.push((status.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            known_count: list.known.len(),
            rated_count: list.rated.len(),
            average_score: average_score(&list.rated),
            status_counts: counts,
        }
    }
}

/// Mean score of `rated`, or 0 for an empty list.
pub fn average_score(rated: &[ListEntry]) -> f64 {
    if rated.is_empty() {
        return 0.0;
    }
    let total: u64 = rated.iter().map(|e| u64::from(e.score)).sum();
    total as f64 / rated.len() as f64
}

/// Occurrence count per recommended title.
///
/// Ties in [`Tally::most_common`] are broken by first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    counts: HashMap<String, TallySlot>,
}

#[derive(Debug, Clone, Copy)]
struct TallySlot {
    count: usize,
    first_seen: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, title: &str) {
        let next = self.counts.len();
        self.counts
            .entry(title.to_string())
            .or_insert(TallySlot {
                count: 0,
                first_seen: next,
            })
            .count += 1;
    }

    pub fn get(&self, title: &str) -> usize {
        self.counts.get(title).map_or(0, |slot| slot.count)
    }

    /// Number of distinct titles.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Up to `n` titles by descending count.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut rows: Vec<(&String, &TallySlot)> = self.counts.iter().collect();
        rows.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then_with(|| a.1.first_seen.cmp(&b.1.first_seen))
        });
        rows.into_iter()
            .take(n)
            .map(|(title, slot)| (title.clone(), slot.count))
            .collect()
    }
}
