//! Shared domain types.
//!
//! Everything here lives for a single run; nothing is written back to the export.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Watch status as written by the MyAnimeList exporter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
    /// Anything the exporter emits that we don't recognise, kept verbatim.
    Other(String),
}

impl WatchStatus {
    pub fn display_name(&self) -> &str {
        match self {
            WatchStatus::Watching => "Watching",
            WatchStatus::Completed => "Completed",
            WatchStatus::OnHold => "On-Hold",
            WatchStatus::Dropped => "Dropped",
            WatchStatus::PlanToWatch => "Plan to Watch",
            WatchStatus::Other(raw) => raw,
        }
    }
}

impl FromStr for WatchStatus {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "watching" => WatchStatus::Watching,
            "completed" => WatchStatus::Completed,
            "on-hold" | "on hold" => WatchStatus::OnHold,
            "dropped" => WatchStatus::Dropped,
            "plan to watch" => WatchStatus::PlanToWatch,
            _ => WatchStatus::Other(trimmed.to_string()),
        })
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One rated title from the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub title: String,
    /// 1..=10 for rated entries.
    pub score: u32,
    pub status: WatchStatus,
}

/// Every identifier present in the export, rated or not.
#[derive(Debug, Clone, Default)]
pub struct KnownIds(HashSet<String>);

impl KnownIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A single suggestion returned by the recommendation service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendationEntry {
    pub mal_id: u64,
    pub title: String,
}

impl RecommendationEntry {
    /// Identifier in the same string form the export uses.
    pub fn id(&self) -> String {
        self.mal_id.to_string()
    }
}
