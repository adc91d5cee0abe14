//! Month-grouped projection of a journal snapshot.
//!
//! The original app let the database layer section its fetched results by a
//! derived "creation month" key. Here the same view is a pure function: give
//! it a snapshot, get back the sectioned list. Re-projecting an identical
//! snapshot yields deep-equal output, which the diff engine relies on.

use crate::{dates, Entry};
use serde::{Deserialize, Serialize};

/// One month-year group of entries, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Group key, e.g. `"March 2024"`.
    pub key: String,
    pub entries: Vec<Entry>,
}

/// The sectioned list view: groups ordered by their newest member's creation
/// date descending, entries within each group creation-date descending.
///
/// Derived, never stored. A projection is only ever replaced wholesale and
/// then compared against its predecessor with [`diff`](crate::diff).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupedProjection {
    pub sections: Vec<Section>,
}

impl GroupedProjection {
    /// Projects `snapshot` into month-year sections using the default
    /// UTC English month key ([`dates::month_key`]).
    #[must_use]
    pub fn project(snapshot: &[Entry]) -> Self {
        Self::project_with(snapshot, dates::month_key)
    }

    /// Projects `snapshot` with a caller-supplied group-key function.
    ///
    /// `key_fn` must be pure and deterministic over the creation timestamp;
    /// it is injected so hosts can group in local time and tests can pin the
    /// key format.
    ///
    /// The input order of `snapshot` does not matter: entries are re-sorted
    /// by creation date descending (ID ascending on ties) before grouping,
    /// so two entries from the same month always share a section.
    #[must_use]
    pub fn project_with(snapshot: &[Entry], key_fn: impl Fn(i64) -> String) -> Self {
        let mut ordered: Vec<&Entry> = snapshot.iter().collect();
        ordered.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut sections: Vec<Section> = Vec::new();
        for entry in ordered {
            let key = key_fn(entry.created_at);
            match sections.iter_mut().find(|s| s.key == key) {
                Some(section) => section.entries.push(entry.clone()),
                None => sections.push(Section {
                    key,
                    entries: vec![entry.clone()],
                }),
            }
        }
        Self { sections }
    }

    /// Total number of entries across all sections.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The entry at `(section, row)`, if both indices are in range.
    #[must_use]
    pub fn entry_at(&self, section: usize, row: usize) -> Option<&Entry> {
        self.sections.get(section)?.entries.get(row)
    }
}
