//! Simple closed shapes as `TriMesh`es

use super::TriMesh;
use crate::float_types::Real;
use nalgebra::Point3;

impl TriMesh {
    /// Axis-aligned box spanning `(0,0,0)` to `(width, length, height)`.
    ///
    /// ```text
    /// Vertex Layout (8 vertices total):
    ///     4-------5
    ///    /|      /|
    ///   0-------1 |
    ///   | |     | |
    ///   | 7-----|-6
    ///   |/      |/
    ///   3-------2
    /// ```
    ///
    /// Each face is split into two triangles, CCW when seen from outside.
    pub fn cuboid(width: Real, length: Real, height: Real) -> TriMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),          // 0: origin
            Point3::new(width, 0.0, 0.0),        // 1: +X
            Point3::new(width, length, 0.0),     // 2: +X+Y
            Point3::new(0.0, length, 0.0),       // 3: +Y
            Point3::new(0.0, 0.0, height),       // 4: +Z
            Point3::new(width, 0.0, height),     // 5: +X+Z
            Point3::new(width, length, height),  // 6: +X+Y+Z
            Point3::new(0.0, length, height),    // 7: +Y+Z
        ];

        let faces: [[u32; 4]; 6] = [
            [0, 3, 2, 1], // Bottom
            [4, 5, 6, 7], // Top
            [0, 1, 5, 4], // Front
            [3, 7, 6, 2], // Back
            [0, 4, 7, 3], // Left
            [1, 2, 6, 5], // Right
        ];

        let triangles = faces
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
            .collect();

        TriMesh::new(vertices, triangles)
    }

    pub fn cube(width: Real) -> TriMesh {
        Self::cuboid(width, width, width)
    }

    /// Square pyramid: base `[0, base]²` at z = 0, apex above the base center at `height`.
    pub fn pyramid(base: Real, height: Real) -> TriMesh {
        let half = base * 0.5;
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(base, 0.0, 0.0),
            Point3::new(base, base, 0.0),
            Point3::new(0.0, base, 0.0),
            Point3::new(half, half, height),
        ];
        let triangles = vec![
            [0, 2, 1],
            [0, 3, 2],
            [0, 1, 4],
            [1, 2, 4],
            [2, 3, 4],
            [3, 0, 4],
        ];
        TriMesh::new(vertices, triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_twelve_triangles() {
        let mesh = TriMesh::cuboid(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn pyramid_apex_is_highest_point() {
        let mesh = TriMesh::pyramid(2.0, 5.0);
        let bb = mesh.bounding_box();
        assert_eq!(bb.maxs.z, 5.0);
        assert_eq!(bb.mins.z, 0.0);
    }
}
