//! Slicing planes.

use crate::float_types::{EPSILON, Real, tolerance};
use nalgebra::{Point3, Vector3};

// Plane classification constants
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane in Hessian normal form: `normal · p = w`, with `normal` of unit length.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a new plane from a normal vector and offset along it.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        if len < EPSILON {
            return Plane {
                normal: Vector3::z(),
                w,
            };
        }
        Plane {
            normal: normal / len,
            w: w / len,
        }
    }

    /// Create the plane through `origin` perpendicular to `normal`.
    pub fn from_origin_normal(origin: Point3<Real>, normal: Vector3<Real>) -> Self {
        let len = normal.norm();
        let normal = if len < EPSILON {
            Vector3::z()
        } else {
            normal / len
        };
        Plane {
            normal,
            w: normal.dot(&origin.coords),
        }
    }

    /// The horizontal plane `z = height`.
    pub fn horizontal(height: Real) -> Self {
        Plane {
            normal: Vector3::z(),
            w: height,
        }
    }

    /// Signed distance from `point` to the plane.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`] using the crate tolerance.
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let d = self.signed_distance(point);
        let tol = tolerance();
        if d > tol {
            FRONT
        } else if d < -tol {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Orthonormal in-plane axes `(u, v)` with `u × v = normal`.
    ///
    /// The reference axis is the world axis least aligned with the normal, preferring
    /// x over y over z, so a plane with normal `+z` gets `u = x`, `v = y`.
    pub fn basis(&self) -> (Vector3<Real>, Vector3<Real>) {
        let n = self.normal;
        let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
        let reference = if ax <= ay && ax <= az {
            Vector3::x()
        } else if ay <= az {
            Vector3::y()
        } else {
            Vector3::z()
        };
        let u = (reference - n * n.dot(&reference)).normalize();
        let v = n.cross(&u);
        (u, v)
    }

    /// Project a point into the plane's 2D coordinate system (see [`Plane::basis`]).
    pub fn project_2d(&self, point: &Point3<Real>) -> (Real, Real) {
        let (u, v) = self.basis();
        (u.dot(&point.coords), v.dot(&point.coords))
    }
}
