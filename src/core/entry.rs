use serde::{Deserialize, Serialize};

/// Highest valid mood rating. Valid moods are `0..=MOOD_MAX`; an entry with
/// no recorded mood carries `None`, which is distinct from every valid value.
pub const MOOD_MAX: u8 = 10;

/// A named geographic point owned by exactly one [`Entry`].
///
/// Immutable once created; it is only ever written as a side effect of
/// creating or updating its owning entry, and removed when that entry is
/// deleted or its place is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub description: String,
    /// Unix seconds, set once at creation. Sole primary sort key.
    pub created_at: i64,
    pub mood: Option<u8>,
    pub image: Option<Vec<u8>>,
    pub location: Option<Location>,
}

impl Entry {
    /// Whether two entries carry the same user-visible content, ignoring
    /// identity and creation time. The diff engine uses this to decide
    /// between "unchanged" and a row update.
    #[must_use]
    pub fn same_content(&self, other: &Entry) -> bool {
        self.description == other.description
            && self.mood == other.mood
            && self.image == other.image
            && self.location == other.location
    }
}

/// The full desired content of an entry, as supplied by the edit screen.
///
/// Used for both create and update; an update replaces the entry's content
/// wholesale (the caller passes current values for fields it did not touch).
/// `id` and `created_at` are never part of a draft.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub description: String,
    pub mood: Option<u8>,
    pub image: Option<Vec<u8>>,
    pub place: Option<Location>,
}

impl EntryDraft {
    /// Convenience constructor for a text-only draft.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: &str) -> Entry {
        Entry {
            id: "test-id".to_string(),
            description: description.to_string(),
            created_at: 1234567890,
            mood: Some(7),
            image: None,
            location: None,
        }
    }

    #[test]
    fn test_same_content_ignores_id_and_creation_time() {
        let a = entry("Went hiking");
        let mut b = entry("Went hiking");
        b.id = "other-id".to_string();
        b.created_at = 987654321;
        assert!(a.same_content(&b));
    }

    #[test]
    fn test_same_content_detects_mood_change() {
        let a = entry("Went hiking");
        let mut b = entry("Went hiking");
        b.mood = None;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_same_content_detects_location_change() {
        let a = entry("Went hiking");
        let mut b = entry("Went hiking");
        b.location = Some(Location {
            name: "Ben Nevis".to_string(),
            latitude: 56.796,
            longitude: -5.004,
        });
        assert!(!a.same_content(&b));
    }
}
