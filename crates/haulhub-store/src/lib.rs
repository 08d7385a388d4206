//! Document storage for HaulHub.
//!
//! Entities live in versioned in-memory collections. All mutation goes
//! through compare-and-swap keyed on the document version, which turns each
//! find-then-save sequence into an at-most-one-winner transition under
//! contention. Collections snapshot to JSON files.

pub mod collection;
pub mod lockmap;
pub mod snapshot;

pub use collection::Collection;
pub use lockmap::LockMap;
pub use snapshot::{load_snapshot, save_snapshot};
