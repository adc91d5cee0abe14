//! Minimal ordered change operations between two grouped projections.
//!
//! The original app received these as fetched-results delegate callbacks and
//! replayed them onto the table view inside a begin/end-updates batch. Here
//! the same stream is computed by a pure function over two projection
//! snapshots, so it can be tested without a UI.
//!
//! Conventions, matching a batch-applying list renderer:
//!
//! - section operations are emitted before any row operation, so structural
//!   changes resolve before row indices are addressed;
//! - deletes (section and row) are expressed in the *old* projection's
//!   indices, inserts and updates in the *new* projection's indices;
//! - an entry whose month group changed is a `RowDelete` plus `RowInsert`,
//!   never a cross-section `RowUpdate` — the renderer's update operation only
//!   refreshes a row in place.

use crate::{DiaryError, Entry, GroupedProjection, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One structural or content change to the sectioned list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOp {
    SectionInsert { section: usize },
    SectionDelete { section: usize },
    RowInsert { section: usize, row: usize },
    RowDelete { section: usize, row: usize },
    RowUpdate { section: usize, row: usize },
}

/// An ordered batch of operations transforming one projection into another.
/// Produced by one [`diff`] call, consumed by one render, then discarded.
pub type ChangeSet = Vec<ChangeOp>;

/// Computes the ordered, minimal [`ChangeSet`] transforming `old` into `new`.
///
/// Both inputs must be well-formed projections (unique keys and IDs, groups
/// and rows sorted newest-first, surviving groups in the same relative
/// order). A malformed input is a bug in the caller, not user input.
///
/// # Errors
///
/// Returns [`DiaryError::InvariantViolation`] if either projection, or the
/// pair, violates the ordering assumptions.
pub fn diff(old: &GroupedProjection, new: &GroupedProjection) -> Result<ChangeSet> {
    check_well_formed(old, "old")?;
    check_well_formed(new, "new")?;

    let old_keys: Vec<&str> = old.sections.iter().map(|s| s.key.as_str()).collect();
    let new_keys: Vec<&str> = new.sections.iter().map(|s| s.key.as_str()).collect();

    // Surviving groups may not be permuted; the projection's ordering rule
    // only ever inserts or removes whole groups.
    let old_survivors: Vec<&str> = old_keys
        .iter()
        .copied()
        .filter(|k| new_keys.contains(k))
        .collect();
    let new_survivors: Vec<&str> = new_keys
        .iter()
        .copied()
        .filter(|k| old_keys.contains(k))
        .collect();
    if old_survivors != new_survivors {
        return violation(format!(
            "surviving groups reordered: {old_survivors:?} vs {new_survivors:?}"
        ));
    }

    let mut ops: ChangeSet = Vec::new();

    // Section deletes in descending old indices, then inserts in ascending
    // new indices.
    for (index, key) in old_keys.iter().enumerate().rev() {
        if !new_keys.contains(key) {
            ops.push(ChangeOp::SectionDelete { section: index });
        }
    }
    for (index, key) in new_keys.iter().enumerate() {
        if !old_keys.contains(key) {
            ops.push(ChangeOp::SectionInsert { section: index });
        }
    }

    let old_index = index_entries(old);
    let new_index = index_entries(new);

    // An entry counts as removed from its old position when it is gone
    // entirely or has migrated to another group; symmetrically for inserts.
    let mut row_deletes: Vec<(usize, usize)> = Vec::new();
    let mut row_inserts: Vec<(usize, usize)> = Vec::new();
    let mut row_updates: Vec<(usize, usize)> = Vec::new();

    for (id, placed) in &old_index {
        match new_index.get(id) {
            None => row_deletes.push((placed.section, placed.row)),
            Some(now) if now.key != placed.key => {
                row_deletes.push((placed.section, placed.row));
            }
            Some(_) => {}
        }
    }
    for (id, placed) in &new_index {
        match old_index.get(id) {
            None => row_inserts.push((placed.section, placed.row)),
            Some(was) if was.key != placed.key => {
                row_inserts.push((placed.section, placed.row));
            }
            Some(was) => {
                if !was.entry.same_content(placed.entry) {
                    row_updates.push((placed.section, placed.row));
                }
            }
        }
    }

    // Deterministic order: deletes bottom-up in old coordinates, inserts and
    // updates top-down in new coordinates.
    row_deletes.sort_by(|a, b| b.cmp(a));
    row_inserts.sort();
    row_updates.sort();

    ops.extend(
        row_deletes
            .into_iter()
            .map(|(section, row)| ChangeOp::RowDelete { section, row }),
    );
    ops.extend(
        row_inserts
            .into_iter()
            .map(|(section, row)| ChangeOp::RowInsert { section, row }),
    );
    ops.extend(
        row_updates
            .into_iter()
            .map(|(section, row)| ChangeOp::RowUpdate { section, row }),
    );

    Ok(ops)
}

struct Placed<'a> {
    key: &'a str,
    section: usize,
    row: usize,
    entry: &'a Entry,
}

fn index_entries(projection: &GroupedProjection) -> HashMap<&str, Placed<'_>> {
    let mut index = HashMap::new();
    for (section, s) in projection.sections.iter().enumerate() {
        for (row, entry) in s.entries.iter().enumerate() {
            index.insert(
                entry.id.as_str(),
                Placed {
                    key: s.key.as_str(),
                    section,
                    row,
                    entry,
                },
            );
        }
    }
    index
}

fn check_well_formed(projection: &GroupedProjection, which: &str) -> Result<()> {
    let mut seen_keys = Vec::new();
    let mut seen_ids = Vec::new();
    let mut previous_section_newest: Option<i64> = None;

    for section in &projection.sections {
        if seen_keys.contains(&section.key.as_str()) {
            return violation(format!(
                "{which} projection has duplicate group '{}'",
                section.key
            ));
        }
        seen_keys.push(section.key.as_str());

        let Some(newest) = section.entries.first() else {
            return violation(format!(
                "{which} projection has empty group '{}'",
                section.key
            ));
        };
        if let Some(previous) = previous_section_newest {
            if newest.created_at > previous {
                return violation(format!(
                    "{which} projection groups not ordered newest-first at '{}'",
                    section.key
                ));
            }
        }
        previous_section_newest = Some(newest.created_at);

        let mut previous_row: Option<i64> = None;
        for entry in &section.entries {
            if seen_ids.contains(&entry.id.as_str()) {
                return violation(format!(
                    "{which} projection contains entry '{}' twice",
                    entry.id
                ));
            }
            seen_ids.push(entry.id.as_str());

            if let Some(previous) = previous_row {
                if entry.created_at > previous {
                    return violation(format!(
                        "{which} projection group '{}' not sorted newest-first",
                        section.key
                    ));
                }
            }
            previous_row = Some(entry.created_at);
        }
    }
    Ok(())
}

fn violation<T>(message: String) -> Result<T> {
    log::error!("change diff rejected its input: {message}");
    Err(DiaryError::InvariantViolation(message))
}
