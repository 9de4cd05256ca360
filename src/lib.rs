//! Public facade for the waygrid pathgrid editing core.
//!
//! This crate re-exports the types embedders need from the member crates
//! with a single clean interface:
//!
//! - [`EditSession`] — the user-facing editing operations for one pathgrid,
//!   each translated into a [`Batch`] of described mutations.
//! - [`DocumentStore`] — the capability trait the session depends on for
//!   snapshot resolution, cell metadata, and batch submission.
//! - [`MemoryStore`] — an in-memory reference store with atomic batch
//!   application and undo/redo grouping.
//!
//! ```ignore
//! let store = Arc::new(MemoryStore::new());
//! store.insert_record(RecordId::from("cell-0-0"), CellKind::Exterior);
//!
//! let scene = Arc::new(Mutex::new(SceneGroup::default()));
//! let mut session = EditSession::new(
//!     store.clone(),
//!     scene,
//!     RecordId::from("cell-0-0"),
//!     CellCoordinates::new(0, 0),
//! );
//!
//! let mut batch = Batch::new();
//! session.add_point(&mut batch, WorldPoint::new(128.0, 96.0, 0.0));
//! store.submit(batch)?;
//! session.notify_record_changed();
//! session.update();
//! ```

// Record and mutation vocabulary
pub use waygrid_core::{
    Batch, CellCoordinates, CellKind, Edge, Error, LocalPoint, Mutation, NestedField,
    NestedTable, PathgridData, Point, RecordId, Result, WorldPoint, WorldVec, CELL_EXTENT,
    CELL_SIZE,
};

// Store capability and reference implementation
pub use waygrid_store::{DocumentStore, MemoryStore};

// Editing session and its collaborators
pub use waygrid_editor::{
    EditSession, GeometryCache, SceneAnchor, SceneGroup, SceneNode, SelectionSet, Wireframe,
};
