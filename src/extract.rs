//! Taking one horizontal cross-section.

use crate::float_types::Real;
use crate::polygon::SlicePolygon;
use crate::traits::Sliceable;

/// Result of cutting a mesh at one height.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceOutcome {
    Polygon(SlicePolygon),
    /// The plane passes above, below or through a gap in the mesh.
    NoIntersection,
}

impl SliceOutcome {
    pub fn into_polygon(self) -> Option<SlicePolygon> {
        match self {
            SliceOutcome::Polygon(p) => Some(p),
            SliceOutcome::NoIntersection => None,
        }
    }
}

/// Cuts `mesh` with the plane through `(0, 0, z)` with normal `+z`.
pub fn extract_slice<M: Sliceable + ?Sized>(mesh: &M, z: Real) -> SliceOutcome {
    match mesh.slice_at_height(z) {
        Some(polygon) if !polygon.is_empty() => SliceOutcome::Polygon(polygon),
        _ => SliceOutcome::NoIntersection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TriMesh;

    #[test]
    fn above_the_mesh_is_no_intersection() {
        let cube = TriMesh::cube(1.0);
        assert_eq!(extract_slice(&cube, 1.01), SliceOutcome::NoIntersection);
        assert_eq!(extract_slice(&cube, -0.5), SliceOutcome::NoIntersection);
    }

    #[test]
    fn inside_the_mesh_is_a_polygon() {
        let cube = TriMesh::cube(1.0);
        let polygon = extract_slice(&cube, 0.5).into_polygon().unwrap();
        assert!(polygon.len() >= 4);
    }
}
