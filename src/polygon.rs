//! `SlicePolygon`: the boundary data of one planar cross-section

use crate::float_types::Real;
use geo::{BoundingRect, LineString, MultiLineString, MultiPoint, Point, Rect};

/// The boundary of a cross-section in plane coordinates.
///
/// `points` are the merged boundary vertices in the order they were first found. They
/// are *not* a traversal-ordered ring. `segments` keeps the raw two-point pieces each
/// intersected triangle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePolygon {
    pub points: MultiPoint<Real>,
    pub segments: MultiLineString<Real>,
}

impl Default for SlicePolygon {
    fn default() -> Self {
        SlicePolygon {
            points: MultiPoint::new(Vec::new()),
            segments: MultiLineString::new(Vec::new()),
        }
    }
}

impl SlicePolygon {
    /// Build a polygon from bare boundary points (no segment data).
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (Real, Real)>,
    {
        SlicePolygon {
            points: MultiPoint::new(points.into_iter().map(Point::from).collect()),
            segments: MultiLineString::new(Vec::new()),
        }
    }

    pub(crate) fn push_segment(&mut self, a: (Real, Real), b: (Real, Real)) {
        self.segments.0.push(LineString::from(vec![a, b]));
    }

    pub(crate) fn push_point(&mut self, p: (Real, Real)) {
        self.points.0.push(Point::from(p));
    }

    /// Number of boundary vertices.
    pub fn len(&self) -> usize {
        self.points.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.0.is_empty()
    }

    /// Iterate over the boundary vertices as `(x, y)`.
    pub fn iter(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.points.iter().map(|p| (p.x(), p.y()))
    }

    /// Axis-aligned extent of the boundary vertices, `None` when empty.
    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        self.points.bounding_rect()
    }

    /// Returns true if the polygon has a point within `eps` of `(x, y)`.
    pub fn contains_point(&self, x: Real, y: Real, eps: Real) -> bool {
        self.iter()
            .any(|(px, py)| (px - x).abs() < eps && (py - y).abs() < eps)
    }
}
