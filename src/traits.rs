use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::polygon::SlicePolygon;
use nalgebra::{Point3, Vector3};

/// Anything that can be cut by a plane into a 2D boundary.
///
/// The height sampler, rasterizer and batch driver only see meshes through this
/// trait, so a different geometry backend only has to provide these two methods.
pub trait Sliceable {
    /// Axis-aligned bounds of the geometry.
    fn bounding_box(&self) -> Aabb;

    /// Intersect with the plane through `origin` perpendicular to `normal`.
    ///
    /// Returns `None` when the plane does not meet the geometry.
    fn slice(&self, origin: Point3<Real>, normal: Vector3<Real>) -> Option<SlicePolygon>;

    /// Intersect with the horizontal plane `z = height`.
    fn slice_at_height(&self, height: Real) -> Option<SlicePolygon> {
        self.slice(Point3::new(0.0, 0.0, height), Vector3::z())
    }
}
