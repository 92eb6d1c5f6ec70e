//! Plane / mesh intersection

use super::TriMesh;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb, tolerance};
use crate::plane::{BACK, COPLANAR, FRONT, Plane, SPANNING};
use crate::polygon::SlicePolygon;
use crate::traits::Sliceable;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

/// Point where the edge `a → b` crosses the plane, given the signed distances of its ends.
#[inline]
fn edge_crossing(a: &Point3<Real>, b: &Point3<Real>, da: Real, db: Real) -> Point3<Real> {
    let t = da / (da - db);
    a + (b - a) * t
}

/// The piece of `plane` covered by triangle `tri`, if it is a line segment.
///
/// - all three corners in the plane: nothing (the neighbouring faces supply the edges)
/// - two corners in the plane: that edge
/// - one corner in the plane, the others on opposite sides: corner to opposite crossing
/// - one corner in the plane, the others on the same side: nothing (a touch, not a cut)
/// - no corner in the plane and spanning: between the two edge crossings
fn triangle_segment(plane: &Plane, tri: &[Point3<Real>; 3]) -> Option<[Point3<Real>; 2]> {
    let dist = tri.map(|p| plane.signed_distance(&p));
    let types = tri.map(|p| plane.orient_point(&p));
    let on_plane: Vec<usize> = (0..3).filter(|&i| types[i] == COPLANAR).collect();

    match on_plane.len() {
        3 => None,
        2 => Some([tri[on_plane[0]], tri[on_plane[1]]]),
        1 => {
            let i = on_plane[0];
            let (j, k) = ((i + 1) % 3, (i + 2) % 3);
            if types[j] | types[k] == SPANNING {
                Some([tri[i], edge_crossing(&tri[j], &tri[k], dist[j], dist[k])])
            } else {
                None
            }
        },
        _ => {
            let polygon_type = types.iter().fold(0, |acc, &t| acc | t);
            if polygon_type != SPANNING {
                return None;
            }
            let mut crossings = (0..3).filter_map(|i| {
                let j = (i + 1) % 3;
                if (types[i] == FRONT && types[j] == BACK)
                    || (types[i] == BACK && types[j] == FRONT)
                {
                    Some(edge_crossing(&tri[i], &tri[j], dist[i], dist[j]))
                } else {
                    None
                }
            });
            Some([crossings.next()?, crossings.next()?])
        },
    }
}

/// Collects intersection segments and merges coincident endpoints.
struct SliceBuilder {
    plane: Plane,
    u: Vector3<Real>,
    v: Vector3<Real>,
    scale: Real,
    seen: HashMap<(i64, i64), usize>,
    polygon: SlicePolygon,
}

impl SliceBuilder {
    fn new(plane: &Plane) -> Self {
        let (u, v) = plane.basis();
        SliceBuilder {
            plane: plane.clone(),
            u,
            v,
            scale: 1.0 / (tolerance() * 10.0),
            seen: HashMap::new(),
            polygon: SlicePolygon::default(),
        }
    }

    fn to_2d(&self, p: &Point3<Real>) -> (Real, Real) {
        (self.u.dot(&p.coords), self.v.dot(&p.coords))
    }

    fn add_vertex(&mut self, p: (Real, Real)) {
        let key = (
            (p.0 * self.scale).round() as i64,
            (p.1 * self.scale).round() as i64,
        );
        if !self.seen.contains_key(&key) {
            self.seen.insert(key, self.polygon.len());
            self.polygon.push_point(p);
        }
    }

    fn push(&mut self, [a, b]: [Point3<Real>; 2]) {
        let (a, b) = (self.to_2d(&a), self.to_2d(&b));
        self.add_vertex(a);
        self.add_vertex(b);
        self.polygon.push_segment(a, b);
    }

    fn finish(self) -> Option<SlicePolygon> {
        log::trace!(
            "slice at w={}: {} segments, {} vertices",
            self.plane.w,
            self.polygon.segments.0.len(),
            self.polygon.len()
        );
        if self.polygon.segments.0.is_empty() {
            None
        } else {
            Some(self.polygon)
        }
    }
}

impl TriMesh {
    /// Slice this mesh with `plane`, returning the cross-section boundary in the plane's
    /// 2D coordinates (see [`Plane::basis`]), or `None` if the plane misses the mesh.
    ///
    /// # Example
    /// ```
    /// use ctslice::mesh::TriMesh;
    /// use ctslice::plane::Plane;
    ///
    /// let cube = TriMesh::cube(1.0);
    /// let section = cube.slice_plane(&Plane::horizontal(0.5)).unwrap();
    /// assert!(section.contains_point(1.0, 1.0, 1e-9));
    /// assert!(cube.slice_plane(&Plane::horizontal(1.01)).is_none());
    /// ```
    pub fn slice_plane(&self, plane: &Plane) -> Option<SlicePolygon> {
        let bb = self.bounding_box();
        if self.vertices.is_empty() || !aabb_meets_plane(&bb, plane) {
            return None;
        }

        let mut builder = SliceBuilder::new(plane);
        for tri in self.iter_triangles() {
            if let Some(segment) = triangle_segment(plane, &tri) {
                builder.push(segment);
            }
        }
        builder.finish()
    }

    /// Parallel cross-sections at each offset along `plane_normal`.
    pub fn multi_slice(
        &self,
        plane_normal: Vector3<Real>,
        distances: &[Real],
    ) -> Vec<Option<SlicePolygon>> {
        distances
            .iter()
            .map(|&distance| self.slice_plane(&Plane::from_normal(plane_normal, distance)))
            .collect()
    }
}

/// Quick rejection: does the plane pass within tolerance of the box?
fn aabb_meets_plane(bb: &Aabb, plane: &Plane) -> bool {
    let center = bb.center();
    let half = bb.half_extents();
    let n = plane.normal;
    let radius = half.x * n.x.abs() + half.y * n.y.abs() + half.z * n.z.abs();
    plane.signed_distance(&center).abs() <= radius + tolerance()
}

impl Sliceable for TriMesh {
    fn bounding_box(&self) -> Aabb {
        TriMesh::bounding_box(self)
    }

    fn slice(&self, origin: Point3<Real>, normal: Vector3<Real>) -> Option<SlicePolygon> {
        self.slice_plane(&Plane::from_origin_normal(origin, normal))
    }
}
