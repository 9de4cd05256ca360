//! Core types for the waygrid pathgrid editor.
//!
//! A pathgrid is a navigation graph attached to one map cell: integer 3D
//! points connected by directed edges. This crate holds the record types,
//! the described-mutation vocabulary that editing gestures are translated
//! into, and the shared error type. It has no opinion on how records are
//! stored or rendered.

pub mod error;
pub mod mutation;
pub mod types;

pub use error::{Error, Result};
pub use mutation::{Batch, Mutation, NestedField, NestedTable};
pub use types::{
    CellCoordinates, CellKind, Edge, LocalPoint, LocalSpace, PathgridData, Point, RecordId,
    WorldPoint, WorldSpace, WorldVec, CELL_EXTENT, CELL_SIZE,
};
