//! Shared error type.
//!
//! Only store-level batch validation and undo/redo underflow produce
//! errors. Editing-session operations are policy no-ops on failure (absent
//! record, duplicate edge) and never error across their boundary.

use thiserror::Error;

use crate::mutation::{NestedField, NestedTable};
use crate::types::RecordId;

/// Errors produced by document-store batch application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The batch addresses a record that does not exist or is deleted.
    #[error("no live pathgrid record '{0}'")]
    RecordNotFound(RecordId),

    /// A mutation addresses a row outside the table.
    #[error("row {row} out of range for the {table} table of '{record}' ({len} rows)")]
    RowOutOfRange {
        record: RecordId,
        table: NestedTable,
        row: usize,
        len: usize,
    },

    /// A `SetField` mutation pairs a field with the wrong table.
    #[error("field {field} does not belong to the {table} table")]
    FieldTableMismatch {
        table: NestedTable,
        field: NestedField,
    },

    /// An edge-endpoint value does not fit a point row index.
    #[error("value {value} does not fit an edge endpoint")]
    ValueOutOfRange { value: i32 },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_target() {
        let err = Error::RowOutOfRange {
            record: RecordId::from("cell-1-1"),
            table: NestedTable::Points,
            row: 9,
            len: 4,
        };
        assert_eq!(
            err.to_string(),
            "row 9 out of range for the points table of 'cell-1-1' (4 rows)"
        );

        let err = Error::FieldTableMismatch {
            table: NestedTable::Edges,
            field: NestedField::PointX,
        };
        assert_eq!(
            err.to_string(),
            "field point-x does not belong to the edges table"
        );
    }
}
