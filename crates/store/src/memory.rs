//! In-memory reference store.
//!
//! Records live in a `HashMap` behind a `parking_lot::RwLock`. A submitted
//! batch is validated and applied against cloned record bodies first and
//! only then written back, so a failing mutation anywhere in the batch
//! leaves the store untouched. Each successful batch pushes one history
//! entry (whole-record before/after snapshots of the records it touched);
//! `undo` and `redo` restore those snapshots as a unit, which models the
//! external document model's "jointly undoable batch" contract.

use std::collections::HashMap;

use parking_lot::RwLock;

use waygrid_core::{
    Batch, CellKind, Error, Mutation, NestedField, NestedTable, PathgridData, RecordId, Result,
};

use crate::DocumentStore;

struct RecordEntry {
    data: PathgridData,
    cell: CellKind,
    deleted: bool,
}

/// Before/after record bodies for one applied batch.
struct HistoryEntry {
    before: Vec<(RecordId, PathgridData)>,
    after: Vec<(RecordId, PathgridData)>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<RecordId, RecordEntry>,
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

/// In-memory [`DocumentStore`] with atomic batches and undo/redo grouping.
///
/// Clone-free shared use: hold it in an `Arc` and hand clones of the `Arc`
/// to each editing session.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty pathgrid record for the given cell.
    pub fn insert_record(&self, id: RecordId, cell: CellKind) {
        self.insert_record_with(id, cell, PathgridData::default());
    }

    /// Create a pathgrid record with an initial body.
    pub fn insert_record_with(&self, id: RecordId, cell: CellKind, data: PathgridData) {
        let mut inner = self.inner.write();
        inner.records.insert(
            id,
            RecordEntry {
                data,
                cell,
                deleted: false,
            },
        );
    }

    /// Mark a record deleted. `resolve` reports it absent until restored;
    /// this is how external deletion races reach the editor.
    pub fn remove_record(&self, id: &RecordId) {
        if let Some(entry) = self.inner.write().records.get_mut(id) {
            entry.deleted = true;
        }
    }

    /// Clear a record's deleted mark, as an external undo would.
    pub fn restore_record(&self, id: &RecordId) {
        if let Some(entry) = self.inner.write().records.get_mut(id) {
            entry.deleted = false;
        }
    }

    /// Reclassify the owning cell. Sessions resolve their clamping policy
    /// once at construction, so a live session will not observe this.
    pub fn set_cell_kind(&self, id: &RecordId, cell: CellKind) {
        if let Some(entry) = self.inner.write().records.get_mut(id) {
            entry.cell = cell;
        }
    }

    /// Restore the record bodies from before the most recent batch.
    pub fn undo(&self) -> Result<()> {
        let mut inner = self.inner.write();
        let entry = inner.undo.pop().ok_or(Error::NothingToUndo)?;
        for (id, data) in &entry.before {
            if let Some(record) = inner.records.get_mut(id) {
                record.data = data.clone();
            }
        }
        tracing::debug!(target: "waygrid::store", records = entry.before.len(), "undid batch");
        inner.redo.push(entry);
        Ok(())
    }

    /// Reapply the most recently undone batch.
    pub fn redo(&self) -> Result<()> {
        let mut inner = self.inner.write();
        let entry = inner.redo.pop().ok_or(Error::NothingToRedo)?;
        for (id, data) in &entry.after {
            if let Some(record) = inner.records.get_mut(id) {
                record.data = data.clone();
            }
        }
        inner.undo.push(entry);
        Ok(())
    }

    /// Depth of the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.inner.read().undo.len()
    }
}

impl DocumentStore for MemoryStore {
    fn resolve(&self, id: &RecordId) -> Option<PathgridData> {
        let inner = self.inner.read();
        let entry = inner.records.get(id)?;
        if entry.deleted {
            return None;
        }
        Some(entry.data.clone())
    }

    fn cell_kind(&self, id: &RecordId) -> Option<CellKind> {
        self.inner.read().records.get(id).map(|entry| entry.cell)
    }

    fn submit(&self, batch: Batch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut inner = self.inner.write();

        // Work on clones of every touched record, in first-touch order.
        let mut work: Vec<(RecordId, PathgridData)> = Vec::new();
        for mutation in batch.mutations() {
            let id = mutation.record();
            if work.iter().any(|(wid, _)| wid == id) {
                continue;
            }
            let entry = inner
                .records
                .get(id)
                .filter(|entry| !entry.deleted)
                .ok_or_else(|| Error::RecordNotFound(id.clone()))?;
            work.push((id.clone(), entry.data.clone()));
        }

        for mutation in batch.mutations() {
            let data = work
                .iter_mut()
                .find(|(id, _)| id == mutation.record())
                .map(|(_, data)| data)
                .expect("touched record collected above");
            apply_mutation(data, mutation)?;
        }

        tracing::debug!(
            target: "waygrid::store",
            mutations = batch.len(),
            records = work.len(),
            "applying batch"
        );

        let mut history = HistoryEntry {
            before: Vec::with_capacity(work.len()),
            after: Vec::with_capacity(work.len()),
        };
        for (id, data) in work {
            let entry = inner
                .records
                .get_mut(&id)
                .expect("record existed when cloned");
            history.before.push((id.clone(), entry.data.clone()));
            history.after.push((id, data.clone()));
            entry.data = data;
        }
        inner.undo.push(history);
        inner.redo.clear();
        Ok(())
    }
}

fn apply_mutation(data: &mut PathgridData, mutation: &Mutation) -> Result<()> {
    match mutation {
        Mutation::InsertRow { record, table, row } => match table {
            NestedTable::Points => {
                check_insert(record, *table, *row, data.points.len())?;
                data.points.insert(*row, Default::default());
                Ok(())
            }
            NestedTable::Edges => {
                check_insert(record, *table, *row, data.edges.len())?;
                data.edges.insert(*row, Default::default());
                Ok(())
            }
        },
        Mutation::SetField {
            record,
            table,
            row,
            field,
            value,
        } => {
            if field.table() != *table {
                return Err(Error::FieldTableMismatch {
                    table: *table,
                    field: *field,
                });
            }
            match field {
                NestedField::PointX | NestedField::PointY | NestedField::PointZ => {
                    let len = data.points.len();
                    let point = data.points.get_mut(*row).ok_or(Error::RowOutOfRange {
                        record: record.clone(),
                        table: *table,
                        row: *row,
                        len,
                    })?;
                    match field {
                        NestedField::PointX => point.x = *value,
                        NestedField::PointY => point.y = *value,
                        _ => point.z = *value,
                    }
                    Ok(())
                }
                NestedField::EdgeFrom | NestedField::EdgeTo => {
                    let endpoint = u16::try_from(*value)
                        .map_err(|_| Error::ValueOutOfRange { value: *value })?;
                    let len = data.edges.len();
                    let edge = data.edges.get_mut(*row).ok_or(Error::RowOutOfRange {
                        record: record.clone(),
                        table: *table,
                        row: *row,
                        len,
                    })?;
                    match field {
                        NestedField::EdgeFrom => edge.from = endpoint,
                        _ => edge.to = endpoint,
                    }
                    Ok(())
                }
            }
        }
        Mutation::DeleteRow { record, table, row } => match table {
            NestedTable::Points => {
                check_delete(record, *table, *row, data.points.len())?;
                data.points.remove(*row);
                Ok(())
            }
            NestedTable::Edges => {
                check_delete(record, *table, *row, data.edges.len())?;
                data.edges.remove(*row);
                Ok(())
            }
        },
    }
}

fn check_insert(record: &RecordId, table: NestedTable, row: usize, len: usize) -> Result<()> {
    // Insert-at semantics: `row == len` appends.
    if row > len {
        return Err(Error::RowOutOfRange {
            record: record.clone(),
            table,
            row,
            len,
        });
    }
    Ok(())
}

fn check_delete(record: &RecordId, table: NestedTable, row: usize, len: usize) -> Result<()> {
    if row >= len {
        return Err(Error::RowOutOfRange {
            record: record.clone(),
            table,
            row,
            len,
        });
    }
    Ok(())
}
