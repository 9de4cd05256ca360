//! Scene placement of the editable overlay.
//!
//! The anchor owns two visual nodes attached under a host-provided group:
//! one holding the full-graph wireframe at the cell's world origin, one
//! holding the selection highlight. The selection node additionally carries
//! the drag offset, so dragging moves only the selection's visual node and
//! never the authoritative record. On drop the anchor detaches its nodes
//! from the parent.

use std::sync::Arc;

use parking_lot::Mutex;

use waygrid_core::{CellCoordinates, WorldVec};

use crate::wireframe::Wireframe;

/// A visual node: a world-space translation plus an optional drawable.
#[derive(Debug)]
pub struct SceneNode {
    position: WorldVec,
    drawable: Option<Wireframe>,
}

impl SceneNode {
    pub fn new(position: WorldVec) -> Self {
        Self {
            position,
            drawable: None,
        }
    }

    pub fn position(&self) -> WorldVec {
        self.position
    }

    pub fn set_position(&mut self, position: WorldVec) {
        self.position = position;
    }

    pub fn drawable(&self) -> Option<&Wireframe> {
        self.drawable.as_ref()
    }

    /// Replace the drawable, discarding the previous one.
    pub fn set_drawable(&mut self, drawable: Option<Wireframe>) {
        self.drawable = drawable;
    }
}

/// Shared handle to a scene node.
pub type SharedNode = Arc<Mutex<SceneNode>>;

/// A host-owned collection of attached nodes.
#[derive(Default)]
pub struct SceneGroup {
    children: Vec<SharedNode>,
}

impl SceneGroup {
    pub fn attach(&mut self, node: SharedNode) {
        self.children.push(node);
    }

    pub fn detach(&mut self, node: &SharedNode) {
        self.children.retain(|child| !Arc::ptr_eq(child, node));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, node: &SharedNode) -> bool {
        self.children.iter().any(|child| Arc::ptr_eq(child, node))
    }
}

/// Anchors one pathgrid overlay in world space.
pub struct SceneAnchor {
    parent: Arc<Mutex<SceneGroup>>,
    graph_node: SharedNode,
    selection_node: SharedNode,
    origin: WorldVec,
}

impl SceneAnchor {
    /// Attach graph and selection nodes under `parent` at the cell origin.
    pub fn new(parent: Arc<Mutex<SceneGroup>>, coordinates: CellCoordinates) -> Self {
        let origin = coordinates.world_origin();
        let graph_node = Arc::new(Mutex::new(SceneNode::new(origin)));
        let selection_node = Arc::new(Mutex::new(SceneNode::new(origin)));

        {
            let mut group = parent.lock();
            group.attach(graph_node.clone());
            group.attach(selection_node.clone());
        }

        Self {
            parent,
            graph_node,
            selection_node,
            origin,
        }
    }

    /// World-space origin of the overlay.
    pub fn origin(&self) -> WorldVec {
        self.origin
    }

    /// Accumulated drag offset of the selection node.
    pub fn selection_offset(&self) -> WorldVec {
        self.selection_node.lock().position() - self.origin
    }

    /// Shift the selection node by `delta` (visual only).
    pub fn nudge_selection(&self, delta: WorldVec) {
        let mut node = self.selection_node.lock();
        let position = node.position() + delta;
        node.set_position(position);
    }

    /// Snap the selection node back onto the cell origin.
    pub fn reset_selection_offset(&self) {
        self.selection_node.lock().set_position(self.origin);
    }

    pub fn set_graph_drawable(&self, drawable: Option<Wireframe>) {
        self.graph_node.lock().set_drawable(drawable);
    }

    pub fn set_selection_drawable(&self, drawable: Option<Wireframe>) {
        self.selection_node.lock().set_drawable(drawable);
    }

    pub fn graph_node(&self) -> &SharedNode {
        &self.graph_node
    }

    pub fn selection_node(&self) -> &SharedNode {
        &self.selection_node
    }
}

impl Drop for SceneAnchor {
    fn drop(&mut self) {
        let mut group = self.parent.lock();
        group.detach(&self.graph_node);
        group.detach(&self.selection_node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Arc<Mutex<SceneGroup>> {
        Arc::new(Mutex::new(SceneGroup::default()))
    }

    #[test]
    fn anchor_attaches_two_nodes_at_cell_origin() {
        let parent = group();
        let anchor = SceneAnchor::new(parent.clone(), CellCoordinates::new(1, -1));

        assert_eq!(parent.lock().len(), 2);
        assert_eq!(anchor.origin(), CellCoordinates::new(1, -1).world_origin());
        assert_eq!(anchor.graph_node().lock().position(), anchor.origin());
        assert_eq!(anchor.selection_offset(), WorldVec::zero());
    }

    #[test]
    fn nudge_accumulates_and_reset_zeroes() {
        let anchor = SceneAnchor::new(group(), CellCoordinates::new(0, 0));
        anchor.nudge_selection(WorldVec::new(10.0, 0.0, 0.0));
        anchor.nudge_selection(WorldVec::new(5.0, -2.0, 1.0));
        assert_eq!(anchor.selection_offset(), WorldVec::new(15.0, -2.0, 1.0));

        anchor.reset_selection_offset();
        assert_eq!(anchor.selection_offset(), WorldVec::zero());
    }

    #[test]
    fn drag_offset_does_not_move_graph_node() {
        let anchor = SceneAnchor::new(group(), CellCoordinates::new(2, 3));
        anchor.nudge_selection(WorldVec::new(100.0, 100.0, 0.0));
        assert_eq!(anchor.graph_node().lock().position(), anchor.origin());
    }

    #[test]
    fn drop_detaches_from_parent() {
        let parent = group();
        {
            let _anchor = SceneAnchor::new(parent.clone(), CellCoordinates::new(0, 0));
            assert_eq!(parent.lock().len(), 2);
        }
        assert!(parent.lock().is_empty());
    }

    #[test]
    fn drop_leaves_sibling_anchors_attached() {
        let parent = group();
        let kept = SceneAnchor::new(parent.clone(), CellCoordinates::new(0, 0));
        {
            let _dropped = SceneAnchor::new(parent.clone(), CellCoordinates::new(1, 0));
            assert_eq!(parent.lock().len(), 4);
        }
        assert_eq!(parent.lock().len(), 2);
        assert!(parent.lock().contains(kept.graph_node()));
    }
}
