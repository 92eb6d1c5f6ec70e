//! `TriMesh` struct: an indexed triangle mesh with cached bounds

use crate::float_types::{
    Real,
    parry3d::bounding_volume::Aabb,
};
use nalgebra::{Point3, Vector3, partial_max, partial_min};
use std::sync::OnceLock;

pub mod shapes;
pub mod slice;

/// An indexed triangle mesh.
///
/// Triangles reference `vertices` by index; every index is expected to be in range
/// (the loaders in [`crate::io`] guarantee it).
#[derive(Clone, Debug, Default)]
pub struct TriMesh {
    /// Vertex positions
    pub vertices: Vec<Point3<Real>>,

    /// Triangles as triples of indices into `vertices`
    pub triangles: Vec<[u32; 3]>,

    /// Lazily calculated AABB that spans `vertices`.
    pub bounding_box: OnceLock<Aabb>,
}

impl TriMesh {
    pub fn new(vertices: Vec<Point3<Real>>, triangles: Vec<[u32; 3]>) -> Self {
        TriMesh {
            vertices,
            triangles,
            bounding_box: OnceLock::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of triangle `index`.
    #[inline]
    pub fn triangle(&self, index: usize) -> [Point3<Real>; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Iterate over all triangles as corner positions.
    pub fn iter_triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        (0..self.triangles.len()).map(|i| self.triangle(i))
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `vertices`.
    ///
    /// [`parry3d::bounding_volume::Aabb`]: crate::float_types::parry3d::bounding_volume::Aabb
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut min_x = Real::MAX;
            let mut min_y = Real::MAX;
            let mut min_z = Real::MAX;
            let mut max_x = -Real::MAX;
            let mut max_y = -Real::MAX;
            let mut max_z = -Real::MAX;

            for v in &self.vertices {
                min_x = *partial_min(&min_x, &v.x).unwrap_or(&min_x);
                min_y = *partial_min(&min_y, &v.y).unwrap_or(&min_y);
                min_z = *partial_min(&min_z, &v.z).unwrap_or(&min_z);

                max_x = *partial_max(&max_x, &v.x).unwrap_or(&max_x);
                max_y = *partial_max(&max_y, &v.y).unwrap_or(&max_y);
                max_z = *partial_max(&max_z, &v.z).unwrap_or(&max_z);
            }

            // If still uninitialized (e.g., no vertices), return a trivial AABB at origin
            if min_x > max_x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(
                Point3::new(min_x, min_y, min_z),
                Point3::new(max_x, max_y, max_z),
            )
        })
    }

    /// Invalidates the cached bounding box.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Mean of all vertex positions, or `None` for an empty mesh.
    pub fn centroid(&self) -> Option<Point3<Real>> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Some(Point3::from(sum / self.vertices.len() as Real))
    }

    /// Returns a new mesh translated by x, y, and z.
    pub fn translate(&self, x: Real, y: Real, z: Real) -> TriMesh {
        let offset = Vector3::new(x, y, z);
        TriMesh::new(
            self.vertices.iter().map(|v| *v + offset).collect(),
            self.triangles.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_spans_vertices() {
        let mesh = TriMesh::cuboid(2.0, 3.0, 4.0).translate(-1.0, 0.5, 10.0);
        let bb = mesh.bounding_box();
        assert_eq!(bb.mins, Point3::new(-1.0, 0.5, 10.0));
        assert_eq!(bb.maxs, Point3::new(1.0, 3.5, 14.0));
    }

    #[test]
    fn empty_mesh_has_trivial_bounds_and_no_centroid() {
        let mesh = TriMesh::default();
        let bb = mesh.bounding_box();
        assert_eq!(bb.mins, Point3::origin());
        assert_eq!(bb.maxs, Point3::origin());
        assert!(mesh.centroid().is_none());
    }

    #[test]
    fn centroid_of_cube_is_its_center() {
        let c = TriMesh::cube(2.0).centroid().unwrap();
        assert_eq!(c, Point3::new(1.0, 1.0, 1.0));
    }
}
