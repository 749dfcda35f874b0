//! Formatted terminal output.
//!
//! Formatting lives in one place so the pipeline stays free of presentation
//! details and output changes are localized.

use crate::domain::ListEntry;
use crate::report::RunSummary;

pub fn format_header() -> String {
    "🎌 Analyzing your anime list...\n".to_string()
}

/// Dataset stats: list size, rated count, mean score, status breakdown.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total anime in your list: {}\n", summary.known_count));
    out.push_str(&format!("Total anime with ratings: {}\n", summary.rated_count));
    out.push_str(&format!("Average score: {:.1}\n", summary.average_score));

    if !summary.status_counts.is_empty() {
        let parts: Vec<String> = summary
            .status_counts
            .iter()
            .map(|(status, n)| format!("{status}: {n}"))
            .collect();
        out.push_str(&format!("By status: {}\n", parts.join(" | ")));
    }
    out
}

/// The top-rated block: total count plus the first `preview` titles.
pub fn format_top_rated(top_rated: &[ListEntry], min_score: u32, preview: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Your top-rated anime ({} with score ≥ {min_score}):\n",
        top_rated.len()
    ));
    for entry in top_rated.iter().take(preview) {
        out.push_str(&format!("  • {} - Score: {}\n", entry.title, entry.score));
    }
    out
}

pub fn format_fetch_header(query_count: usize) -> String {
    format!("🔍 Fetching recommendations based on your top {query_count} favorites...\n")
}

pub fn format_progress(index: usize, total: usize, title: &str) -> String {
    format!("[{index}/{total}] {title}")
}

/// Enumerated `(title, count)` list with a footer.
pub fn format_recommendations(rows: &[(String, usize)]) -> String {
    let mut out = String::new();
    out.push_str("✨ Top Recommendations for You:\n\n");

    if rows.is_empty() {
        out.push_str("  (no new recommendations found)\n");
    }
    for (i, (title, count)) in rows.iter().enumerate() {
        out.push_str(&format!("{:2}. {title} (recommended {count} times)\n", i + 1));
    }

    out.push_str(
        "\n💡 These are based on what people who liked your top-rated anime also enjoyed!\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WatchStatus;

    fn entry(title: &str, score: u32) -> ListEntry {
        ListEntry {
            id: title.to_string(),
            title: title.to_string(),
            score,
            status: WatchStatus::Completed,
        }
    }

    #[test]
    fn summary_rounds_average_to_one_decimal() {
        let summary = RunSummary {
            known_count: 12,
            rated_count: 3,
            average_score: 7.666,
            status_counts: vec![(WatchStatus::Completed, 10), (WatchStatus::Dropped, 2)],
        };
        let out = format_summary(&summary);
        assert!(out.contains("Total anime in your list: 12"));
        assert!(out.contains("Total anime with ratings: 3"));
        assert!(out.contains("Average score: 7.7"));
        assert!(out.contains("By status: Completed: 10 | Dropped: 2"));
    }

    #[test]
    fn top_rated_preview_is_truncated() {
        let top: Vec<ListEntry> = (0..12).map(|i| entry(&format!("Show {i}"), 9)).collect();
        let out = format_top_rated(&top, 8, 10);
        assert!(out.starts_with("Your top-rated anime (12 with score ≥ 8):"));
        assert!(out.contains("  • Show 9 - Score: 9"));
        assert!(!out.contains("Show 10"));
    }

    #[test]
    fn recommendations_are_enumerated() {
        let rows = vec![("Mushishi".to_string(), 3), ("Haibane Renmei".to_string(), 1)];
        let out = format_recommendations(&rows);
        assert!(out.contains(" 1. Mushishi (recommended 3 times)"));
        assert!(out.contains(" 2. Haibane Renmei (recommended 1 times)"));
    }

    #[test]
    fn empty_recommendations_say_so() {
        let out = format_recommendations(&[]);
        assert!(out.contains("no new recommendations found"));
    }

    #[test]
    fn progress_line() {
        assert_eq!(format_progress(3, 25, "Cowboy Bebop"), "[3/25] Cowboy Bebop");
    }
}
