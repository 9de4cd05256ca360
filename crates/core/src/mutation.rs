//! Described mutations and gesture batches.
//!
//! Every durable edit is expressed as a sequence of [`Mutation`]s pushed
//! onto a [`Batch`] and submitted to the document store, which applies the
//! batch atomically and groups it as one undo step. The editor never writes
//! record data directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// Which nested table of a pathgrid record a mutation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedTable {
    Points,
    Edges,
}

impl fmt::Display for NestedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedTable::Points => f.write_str("points"),
            NestedTable::Edges => f.write_str("edges"),
        }
    }
}

/// A single column within a nested table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NestedField {
    PointX,
    PointY,
    PointZ,
    EdgeFrom,
    EdgeTo,
}

impl NestedField {
    /// The table this field belongs to.
    pub fn table(&self) -> NestedTable {
        match self {
            NestedField::PointX | NestedField::PointY | NestedField::PointZ => {
                NestedTable::Points
            }
            NestedField::EdgeFrom | NestedField::EdgeTo => NestedTable::Edges,
        }
    }
}

impl fmt::Display for NestedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NestedField::PointX => "point-x",
            NestedField::PointY => "point-y",
            NestedField::PointZ => "point-z",
            NestedField::EdgeFrom => "edge-from",
            NestedField::EdgeTo => "edge-to",
        };
        f.write_str(name)
    }
}

/// One described mutation against a pathgrid record.
///
/// `InsertRow` inserts *at* `row`, shifting later rows up. Batch
/// construction relies on this: all row indices in one gesture are computed
/// from a single pre-batch snapshot, and insert-at keeps every later
/// mutation in the batch addressed correctly while earlier inserts land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    InsertRow {
        record: RecordId,
        table: NestedTable,
        row: usize,
    },
    SetField {
        record: RecordId,
        table: NestedTable,
        row: usize,
        field: NestedField,
        value: i32,
    },
    DeleteRow {
        record: RecordId,
        table: NestedTable,
        row: usize,
    },
}

impl Mutation {
    /// The record this mutation addresses.
    pub fn record(&self) -> &RecordId {
        match self {
            Mutation::InsertRow { record, .. }
            | Mutation::SetField { record, .. }
            | Mutation::DeleteRow { record, .. } => record,
        }
    }

    /// The nested table this mutation addresses.
    pub fn table(&self) -> NestedTable {
        match self {
            Mutation::InsertRow { table, .. }
            | Mutation::SetField { table, .. }
            | Mutation::DeleteRow { table, .. } => *table,
        }
    }
}

/// An ordered group of mutations produced by one user gesture.
///
/// The store applies a batch atomically and undoes it as a unit. An aborted
/// gesture never constructs a batch, so it leaves no undo step behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    mutations: Vec<Mutation>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mutation, preserving gesture order.
    pub fn push(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }
}
