//! Document-store capability surface.
//!
//! The editor never touches record data directly. It depends on the
//! [`DocumentStore`] trait for three things: resolving a live record
//! snapshot, reading cell metadata, and submitting mutation batches that
//! the store applies atomically and groups for undo. Any document model can
//! stand behind the trait; [`MemoryStore`] is the in-process reference
//! implementation used by tests and lightweight embedders.

mod memory;

pub use memory::MemoryStore;

use waygrid_core::{Batch, CellKind, PathgridData, RecordId, Result};

/// Transactional access to pathgrid records.
///
/// Implementations own record storage, atomic batch application, and
/// undo/redo grouping. The editor holds an `Arc<S>` and calls `resolve` at
/// the head of every operation; a record can disappear between any two
/// calls, and `resolve` returning `None` is a routine outcome, not an
/// error.
pub trait DocumentStore {
    /// Owned snapshot of the record body, or `None` if the id is unknown
    /// or the record is marked deleted.
    fn resolve(&self, id: &RecordId) -> Option<PathgridData>;

    /// Whether the owning cell is interior or exterior, independent of the
    /// record's deletion state.
    fn cell_kind(&self, id: &RecordId) -> Option<CellKind>;

    /// Apply one gesture's mutations atomically, as a single undo step.
    fn submit(&self, batch: Batch) -> Result<()>;
}
