//! The editing session for one pathgrid.
//!
//! Every operation that needs graph data re-resolves the record first and
//! silently does nothing if it is gone — records are deleted and recreated
//! under the editor by external undo/redo, and "target no longer exists" is
//! a routine outcome, not a failure. Durable edits are pushed onto a
//! caller-supplied [`Batch`]; the caller submits the batch to the store,
//! which applies it atomically as one undo step.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use waygrid_core::{
    Batch, CellCoordinates, CellKind, Mutation, NestedField, NestedTable, PathgridData,
    RecordId, WorldPoint, WorldVec, CELL_EXTENT,
};
use waygrid_store::DocumentStore;

use crate::cache::GeometryCache;
use crate::scene::{SceneAnchor, SceneGroup};
use crate::selection::SelectionSet;

/// Interactive editor for one pathgrid record.
///
/// Generic over the store capability so it never depends on a concrete
/// document model. Owns the selection, the pending edge endpoint
/// (connection indicator), the visual drag offset, and the geometry cache;
/// the authoritative record is only ever read, never written directly.
pub struct EditSession<S: DocumentStore> {
    store: Arc<S>,
    id: RecordId,
    coordinates: CellCoordinates,
    interior: bool,
    selection: SelectionSet,
    indicator: Option<u16>,
    cache: GeometryCache,
    anchor: SceneAnchor,
}

impl<S: DocumentStore> EditSession<S> {
    /// Open a session for `id`, anchoring its overlay under `scene` at the
    /// cell's world origin.
    ///
    /// The interior/exterior classification is resolved here, once; a later
    /// change to the owning cell's kind is not observed (the clamping
    /// policy stays as constructed, matching the source document model).
    pub fn new(
        store: Arc<S>,
        scene: Arc<Mutex<SceneGroup>>,
        id: RecordId,
        coordinates: CellCoordinates,
    ) -> Self {
        let interior = matches!(store.cell_kind(&id), Some(CellKind::Interior));
        let anchor = SceneAnchor::new(scene, coordinates);

        Self {
            store,
            id,
            coordinates,
            interior,
            selection: SelectionSet::new(),
            indicator: None,
            cache: GeometryCache::new(),
            anchor,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn coordinates(&self) -> CellCoordinates {
        self.coordinates
    }

    pub fn anchor(&self) -> &SceneAnchor {
        &self.anchor
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Whether any node is selected.
    pub fn is_selected(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Selected node indices in insertion order.
    pub fn selected(&self) -> &[u16] {
        self.selection.members()
    }

    pub fn select_all(&mut self) {
        match self.source() {
            Some(source) => self.selection.select_all(source.point_count()),
            None => self.selection.clear(),
        }
        self.cache.mark_selection_dirty();
    }

    pub fn toggle_selected(&mut self, node: u16) {
        self.selection.toggle(node);
        self.cache.mark_selection_dirty();
    }

    pub fn invert_selected(&mut self) {
        match self.source() {
            Some(source) => self.selection.invert(source.point_count()),
            None => self.selection.clear(),
        }
        self.cache.mark_selection_dirty();
    }

    pub fn clear_selected(&mut self) {
        self.selection.clear();
        self.cache.mark_selection_dirty();
    }

    // =========================================================================
    // Drag and connection gestures (transient, no document mutation)
    // =========================================================================

    /// Shift the selection's visual node. The record is untouched until
    /// [`commit_move`](Self::commit_move).
    pub fn move_selection(&self, delta: WorldVec) {
        self.anchor.nudge_selection(delta);
    }

    /// Pin `node` as the pending endpoint of an edge-creation gesture. It
    /// is rendered last in the highlight so it draws topmost.
    pub fn set_connection_indicator(&mut self, node: u16) {
        self.indicator = Some(node);
        self.cache.mark_selection_dirty();
    }

    pub fn connection_indicator(&self) -> Option<u16> {
        self.indicator
    }

    /// Abort the gesture in progress: zero the drag offset and drop the
    /// connection indicator. No batch is constructed, so an aborted gesture
    /// leaves no undo step behind.
    pub fn reset_move(&mut self) {
        self.anchor.reset_selection_offset();
        if self.indicator.take().is_some() {
            self.cache.mark_selection_dirty();
        }
    }

    // =========================================================================
    // Batch-building operations
    // =========================================================================

    /// Queue insertion of a new point at `world_pos`.
    ///
    /// The insert must precede the coordinate sets: the coordinate
    /// mutations address the new row by its post-insertion index.
    pub fn add_point(&self, batch: &mut Batch, world_pos: WorldPoint) {
        let Some(source) = self.source() else {
            return;
        };

        let local = world_pos - self.anchor.origin();
        let x = self.clamp_to_cell(local.x as i32);
        let y = self.clamp_to_cell(local.y as i32);
        let z = self.clamp_to_cell(local.z as i32);

        let row = source.point_count();
        batch.push(Mutation::InsertRow {
            record: self.id.clone(),
            table: NestedTable::Points,
            row,
        });
        self.push_point_fields(batch, row, x, y, z);

        tracing::debug!(target: "waygrid::session", row, x, y, z, "queued point insert");
    }

    /// Queue the accumulated drag offset as coordinate updates for every
    /// selected node, then reset the visual offset — commit ends the
    /// gesture. The offset itself is never written to the record.
    pub fn commit_move(&self, batch: &mut Batch) {
        let Some(source) = self.source() else {
            self.anchor.reset_selection_offset();
            return;
        };

        let offset = self.anchor.selection_offset();
        let (dx, dy, dz) = (offset.x as i32, offset.y as i32, offset.z as i32);

        for &node in self.selection.members() {
            let Some(point) = source.points.get(node as usize) else {
                continue;
            };
            self.push_point_fields(
                batch,
                node as usize,
                self.clamp_to_cell(point.x + dx),
                self.clamp_to_cell(point.y + dy),
                self.clamp_to_cell(point.z + dz),
            );
        }

        tracing::debug!(
            target: "waygrid::session",
            nodes = self.selection.len(),
            dx,
            dy,
            dz,
            "queued selection move"
        );
        self.anchor.reset_selection_offset();
    }

    /// Queue the bidirectional edge pair between two nodes. Each direction
    /// is inserted only if it does not already exist; re-running the same
    /// gesture queues nothing.
    pub fn add_edge(&self, batch: &mut Batch, node1: u16, node2: u16) {
        if let Some(source) = self.source() {
            self.push_edge_pair(batch, &source, node1, node2);
        }
    }

    /// Queue edges between `node` and every selected node, in selection
    /// order, with the same duplicate-skipping rule per pair.
    pub fn add_edges_from_selection(&self, batch: &mut Batch, node: u16) {
        let Some(source) = self.source() else {
            return;
        };
        for &selected in self.selection.members() {
            self.push_edge_pair(batch, &source, node, selected);
        }
    }

    /// Queue deletion of every selected point, highest row first so the
    /// remaining row indices in the batch stay valid, then clear the
    /// selection. The selection is cleared even with no live record.
    pub fn remove_selected_points(&mut self, batch: &mut Batch) {
        if self.source().is_some() {
            let mut rows: SmallVec<[u16; 8]> = SmallVec::from_slice(self.selection.members());
            rows.sort_unstable_by(|a, b| b.cmp(a));

            for &row in &rows {
                batch.push(Mutation::DeleteRow {
                    record: self.id.clone(),
                    table: NestedTable::Points,
                    row: row as usize,
                });
            }

            tracing::debug!(
                target: "waygrid::session",
                rows = rows.len(),
                "queued point removal"
            );
        }

        self.clear_selected();
    }

    /// Queue deletion of every edge whose both endpoints are selected,
    /// checking both directions per unordered pair. Rows are collected into
    /// a set (a pair can surface the same row only once) and deleted in
    /// descending order.
    pub fn remove_selected_edges(&self, batch: &mut Batch) {
        let Some(source) = self.source() else {
            return;
        };

        let members = self.selection.members();
        let mut rows = BTreeSet::new();
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                if let Some(row) = source.edge_row(members[i], members[j]) {
                    rows.insert(row);
                }
                if let Some(row) = source.edge_row(members[j], members[i]) {
                    rows.insert(row);
                }
            }
        }

        for &row in rows.iter().rev() {
            batch.push(Mutation::DeleteRow {
                record: self.id.clone(),
                table: NestedTable::Edges,
                row,
            });
        }
    }

    // =========================================================================
    // Per-frame refresh
    // =========================================================================

    /// Host signal that the record changed underneath the session (a batch
    /// applied, or external undo/redo). Flags the full graph for rebuild on
    /// the next tick.
    pub fn notify_record_changed(&mut self) {
        self.cache.mark_graph_dirty();
    }

    /// Per-tick entry point: resolve the snapshot once and rebuild
    /// whatever geometry is flagged stale.
    pub fn update(&mut self) {
        let source = self.source();
        self.cache
            .refresh(source.as_ref(), &self.selection, self.indicator, &self.anchor);
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn source(&self) -> Option<PathgridData> {
        self.store.resolve(&self.id)
    }

    fn clamp_to_cell(&self, v: i32) -> i32 {
        if self.interior {
            v
        } else {
            v.clamp(0, CELL_EXTENT)
        }
    }

    fn push_point_fields(&self, batch: &mut Batch, row: usize, x: i32, y: i32, z: i32) {
        for (field, value) in [
            (NestedField::PointX, x),
            (NestedField::PointY, y),
            (NestedField::PointZ, z),
        ] {
            batch.push(Mutation::SetField {
                record: self.id.clone(),
                table: NestedTable::Points,
                row,
                field,
                value,
            });
        }
    }

    /// Queue `node1 → node2` and `node2 → node1`, each only if absent. Row
    /// indices count up from the snapshot's edge table length; with
    /// insert-at semantics the batch lands both rows correctly.
    fn push_edge_pair(&self, batch: &mut Batch, source: &PathgridData, node1: u16, node2: u16) {
        let mut row = source.edge_count();

        if source.edge_row(node1, node2).is_none() {
            self.push_edge_insert(batch, row, node1, node2);
            row += 1;
        }
        if source.edge_row(node2, node1).is_none() {
            self.push_edge_insert(batch, row, node2, node1);
        }
    }

    fn push_edge_insert(&self, batch: &mut Batch, row: usize, from: u16, to: u16) {
        batch.push(Mutation::InsertRow {
            record: self.id.clone(),
            table: NestedTable::Edges,
            row,
        });
        batch.push(Mutation::SetField {
            record: self.id.clone(),
            table: NestedTable::Edges,
            row,
            field: NestedField::EdgeFrom,
            value: from as i32,
        });
        batch.push(Mutation::SetField {
            record: self.id.clone(),
            table: NestedTable::Edges,
            row,
            field: NestedField::EdgeTo,
            value: to as i32,
        });
    }
}
