//! Host-agnostic wireframe artifacts.
//!
//! Two drawables are derived from a record snapshot: the full-graph
//! wireframe (a diamond marker per point, a line per directed edge) and the
//! selection highlight (a larger marker per highlighted node, in highlight
//! order). The host decides how to rasterize the line lists; this module
//! only produces vertices and index pairs in record-local space.

use waygrid_core::{LocalPoint, PathgridData};

/// Marker half-extent for ordinary points.
pub const POINT_RADIUS: f32 = 16.0;

/// Marker half-extent for highlighted points; larger so the highlight
/// reads over the base marker.
pub const HIGHLIGHT_RADIUS: f32 = 20.0;

/// A line-list drawable: vertices plus index pairs into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wireframe {
    vertices: Vec<LocalPoint>,
    lines: Vec<[u32; 2]>,
}

impl Wireframe {
    pub fn vertices(&self) -> &[LocalPoint] {
        &self.vertices
    }

    pub fn lines(&self) -> &[[u32; 2]] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push_vertex(&mut self, vertex: LocalPoint) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    fn push_line(&mut self, a: u32, b: u32) {
        self.lines.push([a, b]);
    }

    /// Octahedral diamond marker: apex above and below, four equator
    /// vertices, twelve lines.
    fn push_marker(&mut self, center: LocalPoint, radius: f32) {
        let top = self.push_vertex(LocalPoint::new(center.x, center.y, center.z + radius));
        let bottom = self.push_vertex(LocalPoint::new(center.x, center.y, center.z - radius));
        let east = self.push_vertex(LocalPoint::new(center.x + radius, center.y, center.z));
        let west = self.push_vertex(LocalPoint::new(center.x - radius, center.y, center.z));
        let north = self.push_vertex(LocalPoint::new(center.x, center.y + radius, center.z));
        let south = self.push_vertex(LocalPoint::new(center.x, center.y - radius, center.z));

        for equator in [east, north, west, south] {
            self.push_line(top, equator);
            self.push_line(bottom, equator);
        }
        self.push_line(east, north);
        self.push_line(north, west);
        self.push_line(west, south);
        self.push_line(south, east);
    }
}

/// Build the full-graph wireframe from a record snapshot.
///
/// Edges whose endpoints fall outside the point table are skipped; the
/// builder renders whatever the store returned, including records made
/// inconsistent by an external actor, and must not panic on them.
pub fn full_graph(source: &PathgridData) -> Wireframe {
    let mut wireframe = Wireframe::default();

    let mut centers = Vec::with_capacity(source.points.len());
    for point in &source.points {
        let center = wireframe.push_vertex(point.local());
        centers.push(center);
        wireframe.push_marker(point.local(), POINT_RADIUS);
    }

    for edge in &source.edges {
        let (from, to) = (edge.from as usize, edge.to as usize);
        if from < centers.len() && to < centers.len() {
            wireframe.push_line(centers[from], centers[to]);
        }
    }

    wireframe
}

/// Build the selection highlight for the given node indices, emitted in
/// the order supplied (the connection indicator, when present, comes last
/// so it draws topmost). Out-of-range indices are skipped.
pub fn selection_highlight(source: &PathgridData, order: &[u16]) -> Wireframe {
    let mut wireframe = Wireframe::default();
    for &node in order {
        if let Some(point) = source.points.get(node as usize) {
            wireframe.push_marker(point.local(), HIGHLIGHT_RADIUS);
        }
    }
    wireframe
}
