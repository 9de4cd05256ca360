//! Record and geometry primitive types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// World-space unit tag for euclid points and vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldSpace;

/// Record-local unit tag; wireframe geometry is built in this space and
/// placed in the world by the owning scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSpace;

/// A position in world space.
pub type WorldPoint = euclid::Point3D<f64, WorldSpace>;
/// A translation or drag offset in world space.
pub type WorldVec = euclid::Vector3D<f64, WorldSpace>;
/// A wireframe vertex in record-local space.
pub type LocalPoint = euclid::Point3D<f32, LocalSpace>;

/// Edge length of one exterior cell in world units.
pub const CELL_SIZE: f64 = 8192.0;

/// Maximum coordinate magnitude inside an exterior cell; exterior point
/// coordinates are clamped to `[0, CELL_EXTENT]` per axis.
pub const CELL_EXTENT: i32 = 8192;

/// A pathgrid node. Identified only by its row index within the owning
/// record's point table; there is no stable identity beyond that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    /// Create a point from record-local integer coordinates.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The point's position as a record-local vertex.
    pub fn local(&self) -> LocalPoint {
        LocalPoint::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// A directed connection between two point rows. Bidirectional
/// connectivity is two edges (A→B and B→A) maintained together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: u16,
    pub to: u16,
}

impl Edge {
    pub fn new(from: u16, to: u16) -> Self {
        Self { from, to }
    }
}

/// The body of one pathgrid record: the authoritative point and edge
/// tables. `DocumentStore::resolve` hands out owned clones of this, so the
/// editor always works against a consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathgridData {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
}

impl PathgridData {
    /// Number of point rows.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of edge rows.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Row index of the directed edge `from → to`, if it exists.
    ///
    /// Linear scan; edge tables are small and this is the existence check
    /// that keeps duplicate directed edges out of the record.
    pub fn edge_row(&self, from: u16, to: u16) -> Option<usize> {
        self.edges
            .iter()
            .position(|e| e.from == from && e.to == to)
    }
}

/// Identity of a pathgrid record in the document store. The editor holds
/// only this and re-resolves the live record on every operation, because
/// the record may be deleted or recreated externally at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Grid position of the owning cell. The pathgrid overlay is anchored in
/// the world at `coordinates × CELL_SIZE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCoordinates {
    pub x: i32,
    pub y: i32,
}

impl CellCoordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World-space origin of this cell.
    pub fn world_origin(&self) -> WorldVec {
        WorldVec::new(self.x as f64 * CELL_SIZE, self.y as f64 * CELL_SIZE, 0.0)
    }
}

/// Whether the owning cell is indoors. Interior pathgrid coordinates are
/// unclamped; exterior coordinates are clamped to the cell extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Interior,
    Exterior,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_row_finds_exact_directed_pair() {
        let data = PathgridData {
            points: vec![Point::default(); 3],
            edges: vec![Edge::new(0, 1), Edge::new(1, 0), Edge::new(2, 1)],
        };
        assert_eq!(data.edge_row(0, 1), Some(0));
        assert_eq!(data.edge_row(1, 0), Some(1));
        assert_eq!(data.edge_row(2, 1), Some(2));
        assert_eq!(data.edge_row(1, 2), None);
        assert_eq!(data.edge_row(0, 2), None);
    }

    #[test]
    fn cell_origin_scales_by_cell_size() {
        let origin = CellCoordinates::new(-2, 3).world_origin();
        assert_eq!(origin.x, -2.0 * CELL_SIZE);
        assert_eq!(origin.y, 3.0 * CELL_SIZE);
        assert_eq!(origin.z, 0.0);
    }

    #[test]
    fn point_local_preserves_coordinates() {
        let local = Point::new(-50, 9000, 3).local();
        assert_eq!(local.x, -50.0);
        assert_eq!(local.y, 9000.0);
        assert_eq!(local.z, 3.0);
    }

    #[test]
    fn serde_roundtrip_pathgrid_data() {
        let data = PathgridData {
            points: vec![Point::new(1, 2, 3), Point::new(-4, 5, -6)],
            edges: vec![Edge::new(0, 1)],
        };
        let json = serde_json::to_string(&data).unwrap();
        let restored: PathgridData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, restored);
    }

    #[test]
    fn cell_kind_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&CellKind::Interior).unwrap(),
            "\"interior\""
        );
        assert_eq!(
            serde_json::to_string(&CellKind::Exterior).unwrap(),
            "\"exterior\""
        );
    }

    #[test]
    fn record_id_display_matches_inner() {
        let id = RecordId::from("cell-1-2");
        assert_eq!(id.to_string(), "cell-1-2");
        assert_eq!(id.as_str(), "cell-1-2");
    }
}
