//! High-level diary operations over a SQLite database.

use crate::{DiaryError, Entry, EntryDraft, Location, Result, Storage, MOOD_MAX};
use rusqlite::Connection;
use std::path::Path;
use uuid::Uuid;

/// An open diary backed by a SQLite database.
///
/// `Journal` is the single source of truth for entries and their locations,
/// and the only writer. Every successful mutation is durably committed before
/// it returns, so the next [`snapshot`](Journal::snapshot) always reflects it.
/// The grouping and diffing machinery never touches the journal directly; it
/// works on the immutable snapshots this type hands out.
///
/// Mutations are atomic: an entry and its newly selected location are written
/// in one transaction, so a failed commit leaves the previous state intact.
pub struct Journal {
    storage: Storage,
}

impl Journal {
    /// Creates a new diary database at `path` and initialises the schema.
    ///
    /// # Errors
    ///
    /// Returns [`DiaryError::Database`] for any SQLite failure.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::create(path)?;
        Ok(Self { storage })
    }

    /// Opens an existing diary database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DiaryError::InvalidStore`] if the file is not a diary
    /// database, or [`DiaryError::Database`] for any SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::open(path)?;
        Ok(Self { storage })
    }

    /// Returns the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        self.storage.connection()
    }

    /// Fetches a single entry by ID.
    ///
    /// # Errors
    ///
    /// Returns [`DiaryError::EntryNotFound`] if no entry has this ID.
    pub fn get_entry(&self, entry_id: &str) -> Result<Entry> {
        self.storage
            .connection()
            .query_row(
                "SELECT e.id, e.description, e.created_at, e.mood, e.image,
                        l.name, l.latitude, l.longitude
                 FROM entries e
                 LEFT JOIN locations l ON l.entry_id = e.id
                 WHERE e.id = ?1",
                [entry_id],
                map_entry_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DiaryError::EntryNotFound(entry_id.to_string())
                }
                other => DiaryError::Database(other),
            })
    }

    /// Creates a new entry from `draft`, assigning a fresh ID and the current
    /// time as its creation date. If the draft carries a place, an owned
    /// location row is written in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DiaryError::EmptyDescription`] if the description is blank
    /// after trimming, [`DiaryError::Validation`] for an out-of-range mood or
    /// coordinate, or [`DiaryError::CommitFailure`] if the write is rejected.
    pub fn create_entry(&mut self, draft: EntryDraft) -> Result<Entry> {
        let description = validate_draft(&draft)?;

        let entry = Entry {
            id: Uuid::new_v4().to_string(),
            description,
            created_at: chrono::Utc::now().timestamp(),
            mood: draft.mood,
            image: draft.image,
            location: draft.place,
        };

        let tx = self
            .storage
            .connection_mut()
            .transaction()
            .map_err(DiaryError::CommitFailure)?;
        tx.execute(
            "INSERT INTO entries (id, description, created_at, mood, image)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                entry.id,
                entry.description,
                entry.created_at,
                entry.mood,
                entry.image
            ],
        )
        .map_err(DiaryError::CommitFailure)?;
        if let Some(location) = &entry.location {
            tx.execute(
                "INSERT INTO locations (entry_id, name, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![entry.id, location.name, location.latitude, location.longitude],
            )
            .map_err(DiaryError::CommitFailure)?;
        }
        tx.commit().map_err(DiaryError::CommitFailure)?;

        log::debug!("created entry {}", entry.id);
        Ok(entry)
    }

    /// Replaces the content of entry `entry_id` with `draft`.
    ///
    /// The entry's ID and creation date never change. The previously owned
    /// location is discarded; if the draft carries a place a new location row
    /// is written, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DiaryError::EntryNotFound`] if no entry has this ID, plus
    /// the same validation and commit errors as
    /// [`create_entry`](Journal::create_entry).
    pub fn update_entry(&mut self, entry_id: &str, draft: EntryDraft) -> Result<Entry> {
        let description = validate_draft(&draft)?;

        let tx = self
            .storage
            .connection_mut()
            .transaction()
            .map_err(DiaryError::CommitFailure)?;
        tx.execute(
            "UPDATE entries SET description = ?1, mood = ?2, image = ?3 WHERE id = ?4",
            rusqlite::params![description, draft.mood, draft.image, entry_id],
        )
        .map_err(DiaryError::CommitFailure)?;

        // SQLite UPDATE on a missing row succeeds but touches zero rows.
        // Surface this as EntryNotFound; the open transaction is rolled back
        // on drop, so nothing is committed.
        if tx.changes() == 0 {
            return Err(DiaryError::EntryNotFound(entry_id.to_string()));
        }

        // The old location is replaced wholesale, whether the draft carries a
        // new place or none at all.
        tx.execute("DELETE FROM locations WHERE entry_id = ?1", [entry_id])
            .map_err(DiaryError::CommitFailure)?;
        if let Some(place) = &draft.place {
            tx.execute(
                "INSERT INTO locations (entry_id, name, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![entry_id, place.name, place.latitude, place.longitude],
            )
            .map_err(DiaryError::CommitFailure)?;
        }
        tx.commit().map_err(DiaryError::CommitFailure)?;

        // Re-fetch the persisted row, keeping row-mapping logic in one place.
        self.get_entry(entry_id)
    }

    /// Deletes entry `entry_id`. Its owned location row, if any, is removed
    /// by the cascade rule on the `locations` table.
    ///
    /// # Errors
    ///
    /// Returns [`DiaryError::EntryNotFound`] if no entry has this ID, or
    /// [`DiaryError::CommitFailure`] if the write is rejected.
    pub fn delete_entry(&mut self, entry_id: &str) -> Result<()> {
        let deleted = self
            .storage
            .connection()
            .execute("DELETE FROM entries WHERE id = ?1", [entry_id])
            .map_err(DiaryError::CommitFailure)?;
        if deleted == 0 {
            return Err(DiaryError::EntryNotFound(entry_id.to_string()));
        }
        log::debug!("deleted entry {entry_id}");
        Ok(())
    }

    /// Returns a point-in-time copy of every entry, newest first
    /// (`created_at` descending, ID ascending for equal timestamps).
    ///
    /// This ordering is what [`GroupedProjection::project`] and
    /// [`search`](crate::search) expect.
    ///
    /// [`GroupedProjection::project`]: crate::GroupedProjection::project
    pub fn snapshot(&self) -> Result<Vec<Entry>> {
        let mut stmt = self.storage.connection().prepare(
            "SELECT e.id, e.description, e.created_at, e.mood, e.image,
                    l.name, l.latitude, l.longitude
             FROM entries e
             LEFT JOIN locations l ON l.entry_id = e.id
             ORDER BY e.created_at DESC, e.id ASC",
        )?;
        let entries = stmt
            .query_map([], map_entry_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Returns the number of stored entries.
    pub fn entry_count(&self) -> Result<usize> {
        let count: i64 =
            self.storage
                .connection()
                .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Forces an entry's creation date, for exercising cross-month scenarios.
    /// Creation dates are immutable through the public API.
    #[cfg(test)]
    pub(crate) fn set_created_at(&mut self, entry_id: &str, created_at: i64) -> Result<()> {
        let changed = self.storage.connection().execute(
            "UPDATE entries SET created_at = ?1 WHERE id = ?2",
            rusqlite::params![created_at, entry_id],
        )?;
        if changed == 0 {
            return Err(DiaryError::EntryNotFound(entry_id.to_string()));
        }
        Ok(())
    }

    /// Number of location rows, for asserting cascade behaviour.
    #[cfg(test)]
    pub(crate) fn location_count(&self) -> Result<usize> {
        let count: i64 =
            self.storage
                .connection()
                .query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Validates a draft and returns its trimmed description.
fn validate_draft(draft: &EntryDraft) -> Result<String> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(DiaryError::EmptyDescription);
    }
    if let Some(mood) = draft.mood {
        if mood > MOOD_MAX {
            return Err(DiaryError::Validation {
                field: "mood",
                message: format!("Mood must be between 0 and {MOOD_MAX}"),
            });
        }
    }
    if let Some(place) = &draft.place {
        if !(-90.0..=90.0).contains(&place.latitude) {
            return Err(DiaryError::Validation {
                field: "latitude",
                message: format!("Latitude {} is out of range", place.latitude),
            });
        }
        if !(-180.0..=180.0).contains(&place.longitude) {
            return Err(DiaryError::Validation {
                field: "longitude",
                message: format!("Longitude {} is out of range", place.longitude),
            });
        }
    }
    Ok(description.to_string())
}

fn map_entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
    let mood: Option<u8> = row.get(3)?;
    let location_name: Option<String> = row.get(5)?;
    let location = match location_name {
        Some(name) => Some(Location {
            name,
            latitude: row.get(6)?,
            longitude: row.get(7)?,
        }),
        None => None,
    };
    Ok(Entry {
        id: row.get(0)?,
        description: row.get(1)?,
        created_at: row.get(2)?,
        mood,
        image: row.get(4)?,
        location,
    })
}
