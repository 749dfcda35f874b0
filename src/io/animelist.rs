//! MyAnimeList XML export ingest.
//!
//! The export is a `<myanimelist>` root holding one `<myinfo>` block and one
//! `<anime>` element per title. We only read four children of each `<anime>`:
//!
//! ```xml
//! <anime>
//!     <series_animedb_id>1</series_animedb_id>
//!     <series_title><![CDATA[Cowboy Bebop]]></series_title>
//!     <my_score>9</my_score>
//!     <my_status>Completed</my_status>
//! </anime>
//! ```
//!
//! Any structural problem is fatal (exit code 2): a missing element, an
//! empty id, or a score that isn't an integer. An empty `<my_score>` is
//! allowed and means "unrated".

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::domain::{KnownIds, ListEntry, WatchStatus};
use crate::error::AppError;

const TAG_ANIME: &str = "anime";
const TAG_ID: &str = "series_animedb_id";
const TAG_TITLE: &str = "series_title";
const TAG_SCORE: &str = "my_score";
const TAG_STATUS: &str = "my_status";

/// Parser output.
#[derive(Debug, Clone, Default)]
pub struct ParsedList {
    /// Entries with a score > 0, highest score first.
    pub rated: Vec<ListEntry>,
    /// Identifiers of every record, rated or not.
    pub known: KnownIds,
    /// Number of `<anime>` records read.
    pub records: usize,
    /// Status of every record (rated or not), in file order.
    pub statuses: Vec<WatchStatus>,
}

/// Read and parse the export at `path`.
pub fn parse_animelist(path: &Path) -> Result<ParsedList, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::input(format!("Failed to read anime list '{}': {e}", path.display()))
    })?;
    let parsed = ParsedList::from_xml(&text)
        .map_err(|e| AppError::input(format!("{}: {}", path.display(), e.message())))?;

    tracing::debug!(
        path = %path.display(),
        records = parsed.records,
        rated = parsed.rated.len(),
        "parsed anime list"
    );
    Ok(parsed)
}

impl ParsedList {
    pub fn from_xml(text: &str) -> Result<Self, AppError> {
        let doc = Document::parse(text)
            .map_err(|e| AppError::input(format!("Malformed anime list XML: {e}")))?;

        let mut out = ParsedList::default();
        let records = doc
            .root_element()
            .children()
            .filter(|n| n.is_element() && n.has_tag_name(TAG_ANIME));

        for (idx, node) in records.enumerate() {
            let record = idx + 1;

            let id = required_text(node, TAG_ID, record)?.trim().to_string();
            if id.is_empty() {
                return Err(AppError::input(format!("Record {record}: empty <{TAG_ID}>.")));
            }
            let title = required_text(node, TAG_TITLE, record)?.to_string();
            let score = parse_score(required_text(node, TAG_SCORE, record)?, record)?;
            let Ok(status) = required_text(node, TAG_STATUS, record)?.parse::<WatchStatus>();

            out.known.insert(id.clone());
            out.statuses.push(status.clone());
            out.records += 1;

            if let Some(score) = score {
                out.rated.push(ListEntry {
                    id,
                    title,
                    score,
                    status,
                });
            }
        }

        // Stable: equal scores keep file order.
        out.rated.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(out)
    }
}

/// Text of the child element `tag`. The element must exist; empty text is `""`.
fn required_text<'a>(node: Node<'a, '_>, tag: &str, record: usize) -> Result<&'a str, AppError> {
    node.children()
        .find(|c| c.is_element() && c.has_tag_name(tag))
        .map(|c| c.text().unwrap_or(""))
        .ok_or_else(|| AppError::input(format!("Record {record}: missing <{tag}> element.")))
}

/// `None` for unrated (empty or <= 0); error if the text isn't an integer.
fn parse_score(raw: &str, record: usize) -> Result<Option<u32>, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: i64 = trimmed.parse().map_err(|_| {
        AppError::input(format!("Record {record}: invalid <{TAG_SCORE}> '{trimmed}'."))
    })?;
    if value <= 0 {
        return Ok(None);
    }
    u32::try_from(value)
        .map(Some)
        .map_err(|_| AppError::input(format!("Record {record}: <{TAG_SCORE}> out of range '{trimmed}'.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, score: &str, status: &str) -> String {
        format!(
            "<anime>\
                <series_animedb_id>{id}</series_animedb_id>\
                <series_title><![CDATA[{title}]]></series_title>\
                <series_type>TV</series_type>\
                <my_score>{score}</my_score>\
                <my_status>{status}</my_status>\
            </anime>"
        )
    }

    fn export(records: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\
             <myanimelist>\
                <myinfo><user_name>someone</user_name></myinfo>\
                {}\
             </myanimelist>",
            records.concat()
        )
    }

    #[test]
    fn rated_only_when_score_positive() {
        let xml = export(&[
            record("1", "Cowboy Bebop", "9", "Completed"),
            record("5", "Trigun", "0", "Plan to Watch"),
            record("6", "Monster", "", "Watching"),
            record("7", "Bad Entry", "-3", "Dropped"),
        ]);
        let parsed = ParsedList::from_xml(&xml).unwrap();

        assert_eq!(parsed.records, 4);
        assert_eq!(parsed.rated.len(), 1);
        assert_eq!(parsed.rated[0].id, "1");
        assert_eq!(parsed.rated[0].title, "Cowboy Bebop");
        assert_eq!(parsed.rated[0].status, WatchStatus::Completed);
    }

    #[test]
    fn known_ids_include_unrated_records() {
        let xml = export(&[
            record("1", "Cowboy Bebop", "9", "Completed"),
            record("5", "Trigun", "0", "Plan to Watch"),
        ]);
        let parsed = ParsedList::from_xml(&xml).unwrap();

        assert_eq!(parsed.known.len(), 2);
        assert!(parsed.known.contains("1"));
        assert!(parsed.known.contains("5"));
        for entry in &parsed.rated {
            assert!(parsed.known.contains(&entry.id));
        }
    }

    #[test]
    fn rated_sorted_by_descending_score() {
        let xml = export(&[
            record("10", "Seven", "7", "Completed"),
            record("11", "Nine A", "9", "Completed"),
            record("12", "Three", "3", "Dropped"),
            record("13", "Nine B", "9", "Completed"),
        ]);
        let parsed = ParsedList::from_xml(&xml).unwrap();

        let scores: Vec<u32> = parsed.rated.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 9, 7, 3]);
        // Equal scores keep file order.
        assert_eq!(parsed.rated[0].id, "11");
        assert_eq!(parsed.rated[1].id, "13");
    }

    #[test]
    fn missing_required_element_is_fatal() {
        let xml = export(&[
            record("1", "Cowboy Bebop", "9", "Completed"),
            "<anime><series_animedb_id>2</series_animedb_id><series_title>X</series_title><my_status>Completed</my_status></anime>"
                .to_string(),
        ]);
        let err = ParsedList::from_xml(&xml).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("Record 2"), "{err}");
        assert!(err.message().contains("my_score"), "{err}");
    }

    #[test]
    fn non_integer_score_is_fatal() {
        let xml = export(&[record("1", "Cowboy Bebop", "nine", "Completed")]);
        let err = ParsedList::from_xml(&xml).unwrap_err();
        assert!(err.message().contains("invalid <my_score>"), "{err}");
    }

    #[test]
    fn empty_id_is_fatal() {
        let xml = export(&[record("", "Nameless", "8", "Completed")]);
        assert!(ParsedList::from_xml(&xml).is_err());
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let err = ParsedList::from_xml("<myanimelist><anime>").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().starts_with("Malformed anime list XML"));
    }

    #[test]
    fn parse_animelist_reads_file() {
        let path = std::env::temp_dir().join(format!("anime_recs_list_{}.xml", std::process::id()));
        fs::write(&path, export(&[record("30", "Mushishi", "10", "Completed")])).unwrap();

        let parsed = parse_animelist(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(parsed.rated.len(), 1);
        assert_eq!(parsed.rated[0].score, 10);
    }

    #[test]
    fn parse_animelist_missing_file_is_input_error() {
        let err = parse_animelist(Path::new("definitely/not/here.xml")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("Failed to read anime list"));
    }
}
