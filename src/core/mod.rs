//! Internal domain modules for the diary core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod dates;
pub mod diff;
pub mod entry;
pub mod error;
pub mod journal;
pub mod projection;
pub mod search;
pub mod storage;

#[doc(inline)]
pub use diff::{diff, ChangeOp, ChangeSet};
#[doc(inline)]
pub use entry::{Entry, EntryDraft, Location, MOOD_MAX};
#[doc(inline)]
pub use error::{DiaryError, Result};
#[doc(inline)]
pub use journal::Journal;
#[doc(inline)]
pub use projection::{GroupedProjection, Section};
#[doc(inline)]
pub use search::search;
#[doc(inline)]
pub use storage::Storage;
