//! Substring search over a journal snapshot.
//!
//! Search is deliberately independent of the grouped projection and the diff
//! engine: results are transient and small, so the caller re-renders them
//! wholesale on every keystroke.

use crate::{dates, Entry};

/// Returns the entries whose description or long-form creation date (e.g.
/// `"Friday 15 February"`) contains `query`, case-insensitively.
///
/// Result order is snapshot order (newest first); no grouping. An empty or
/// whitespace-only query matches nothing — callers only invoke search with
/// non-empty text, but the behaviour is defined either way.
#[must_use]
pub fn search<'a>(query: &str, snapshot: &'a [Entry]) -> Vec<&'a Entry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    snapshot
        .iter()
        .filter(|entry| {
            entry.description.to_lowercase().contains(&needle)
                || dates::long_date(entry.created_at)
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, mo: u32, d: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap().timestamp()
    }

    fn entry(id: &str, description: &str, created_at: i64) -> Entry {
        Entry {
            id: id.to_string(),
            description: description.to_string(),
            created_at,
            mood: None,
            image: None,
            location: None,
        }
    }

    #[test]
    fn test_matches_description_case_insensitively() {
        let snapshot = vec![
            entry("a", "Weekend in Paris", ts(2024, 3, 10)),
            entry("b", "Rainy day at home", ts(2024, 3, 9)),
        ];
        let results = search("paris", &snapshot);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[test]
    fn test_matches_formatted_date() {
        // 2019-02-15 was a Friday
        let snapshot = vec![
            entry("a", "Quiet evening", ts(2019, 2, 15)),
            entry("b", "Quiet evening", ts(2019, 2, 16)),
        ];
        let results = search("friday", &snapshot);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[test]
    fn test_preserves_snapshot_order() {
        let snapshot = vec![
            entry("newest", "walk", ts(2024, 3, 10)),
            entry("oldest", "walk", ts(2024, 3, 1)),
        ];
        let ids: Vec<&str> = search("walk", &snapshot).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "oldest"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let snapshot = vec![entry("a", "Weekend in Paris", ts(2024, 3, 10))];
        assert!(search("tokyo", &snapshot).is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let snapshot = vec![entry("a", "Weekend in Paris", ts(2024, 3, 10))];
        assert!(search("", &snapshot).is_empty());
        assert!(search("   ", &snapshot).is_empty());
    }
}
