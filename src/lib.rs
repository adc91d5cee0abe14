//! Core library for a local-first personal diary.
//!
//! The primary entry point is [`Journal`], which represents an open diary
//! database file. All entry mutations go through `Journal` methods; reads
//! come back as immutable snapshots.
//!
//! On top of the journal sit three pure views:
//!
//! - [`GroupedProjection::project`] sections a snapshot into month-year
//!   groups, newest first;
//! - [`diff`] computes the minimal ordered [`ChangeSet`] between two
//!   projections, for incremental list rendering;
//! - [`search`] filters a snapshot by case-insensitive substring.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    dates,
    diff::{diff, ChangeOp, ChangeSet},
    entry::{Entry, EntryDraft, Location, MOOD_MAX},
    error::{DiaryError, Result},
    journal::Journal,
    projection::{GroupedProjection, Section},
    search::search,
    storage::Storage,
};
