//! Lazy geometry rebuild.
//!
//! Mutation and rendering are decoupled by two dirty flags. Editing
//! operations and store-change notifications only set flags; the single
//! [`GeometryCache::refresh`] entry point, invoked once per visual tick,
//! rebuilds whatever is flagged against the current snapshot. Rebuilds are
//! all-or-nothing per artifact — no incremental patching, so shifted row
//! indices after a deletion can never leave partial geometry behind.

use smallvec::SmallVec;

use waygrid_core::PathgridData;

use crate::scene::SceneAnchor;
use crate::selection::SelectionSet;
use crate::wireframe;

/// Dirty-flag pair driving wireframe rebuilds.
#[derive(Debug)]
pub struct GeometryCache {
    graph_dirty: bool,
    selection_dirty: bool,
}

impl Default for GeometryCache {
    fn default() -> Self {
        // Start dirty so the first tick builds the initial geometry.
        Self {
            graph_dirty: true,
            selection_dirty: true,
        }
    }
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag the full graph stale. Row indices may have shifted, so the
    /// selection artifact is stale with it.
    pub fn mark_graph_dirty(&mut self) {
        self.graph_dirty = true;
        self.selection_dirty = true;
    }

    /// Flag only the selection highlight stale.
    pub fn mark_selection_dirty(&mut self) {
        self.selection_dirty = true;
    }

    pub fn is_graph_dirty(&self) -> bool {
        self.graph_dirty
    }

    pub fn is_selection_dirty(&self) -> bool {
        self.selection_dirty
    }

    /// Rebuild flagged artifacts into the anchor's nodes.
    ///
    /// With no live snapshot, flagged artifacts are discarded instead of
    /// rebuilt — the record was removed from under the editor.
    pub fn refresh(
        &mut self,
        source: Option<&PathgridData>,
        selection: &SelectionSet,
        indicator: Option<u16>,
        anchor: &SceneAnchor,
    ) {
        if self.graph_dirty {
            match source {
                Some(source) => {
                    tracing::trace!(
                        target: "waygrid::cache",
                        points = source.point_count(),
                        edges = source.edge_count(),
                        "rebuilding graph wireframe"
                    );
                    anchor.set_graph_drawable(Some(wireframe::full_graph(source)));
                }
                None => anchor.set_graph_drawable(None),
            }
        }

        if self.selection_dirty {
            match source {
                Some(source) => {
                    let order = highlight_order(selection, indicator);
                    anchor.set_selection_drawable(Some(wireframe::selection_highlight(
                        source, &order,
                    )));
                }
                None => anchor.set_selection_drawable(None),
            }
        }

        self.graph_dirty = false;
        self.selection_dirty = false;
    }
}

/// Highlight list for the selection wireframe. With a connection indicator
/// set, the indicator node is demoted out of its selection position and
/// appended last, so it always draws topmost.
pub(crate) fn highlight_order(
    selection: &SelectionSet,
    indicator: Option<u16>,
) -> SmallVec<[u16; 8]> {
    let mut order: SmallVec<[u16; 8]> = SmallVec::from_slice(selection.members());
    if let Some(node) = indicator {
        if let Some(at) = order.iter().position(|&n| n == node) {
            order.remove(at);
        }
        order.push(node);
    }
    order
}
