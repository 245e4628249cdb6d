use crate::error::{GeometryError, Result};

use super::{Line, LineLineRelation, LineSegment, Point, Vector3};

/// A half-line: the points of a line on one side of a start point
/// (the start included).
///
/// The stored direction is unit length and orientation-preserving, so
/// two rays are equal (within epsilon) iff they share a start point
/// and point the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    p: Point,
    v: Vector3,
    line: Line,
}

/// Relationship between two rays.
#[derive(Debug, Clone, PartialEq)]
pub enum RayRayRelation {
    /// One ray is contained in the other (collinear, same direction):
    /// the intersection is the ray starting further along.
    Ray(Ray),
    /// Collinear, opposite directions, overlapping: the segment
    /// between the start points.
    Segment(LineSegment),
    /// A single shared point.
    Point(Point),
    /// No shared point.
    Disjoint,
}

/// Relationship between a ray and a line.
#[derive(Debug, Clone, PartialEq)]
pub enum RayLineRelation {
    /// The line contains the whole ray.
    Ray(Ray),
    /// A single shared point.
    Point(Point),
    /// No shared point.
    Disjoint,
}

/// Relationship between a ray and a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum RaySegmentRelation {
    /// A collinear overlap of positive length.
    Segment(LineSegment),
    /// A single shared point.
    Point(Point),
    /// No shared point.
    Disjoint,
}

impl Ray {
    /// Creates a ray from a start point and a direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction's norm is within `epsilon` of
    /// zero.
    pub fn new(p: Point, direction: &Vector3, epsilon: f64) -> Result<Self> {
        let n = direction.norm();
        if n <= epsilon {
            return Err(GeometryError::ZeroVector.into());
        }
        let line = Line::new(p, direction, epsilon)?;
        Ok(Self {
            p,
            v: direction / n,
            line,
        })
    }

    /// Creates the ray starting at `a` and passing through `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide within `epsilon`.
    pub fn from_points(a: &Point, b: &Point, epsilon: f64) -> Result<Self> {
        let direction = a.vector_to(b);
        if direction.norm() <= epsilon {
            return Err(GeometryError::CoincidentPoints("ray").into());
        }
        Self::new(*a, &direction, epsilon)
    }

    /// The start point.
    #[must_use]
    pub fn start(&self) -> &Point {
        &self.p
    }

    /// The unit (orientation-preserving) direction.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.v
    }

    /// The carrier line.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Whether the point lies on the ray: within `epsilon` of the
    /// carrier line, at a parameter no further than `epsilon` behind
    /// the start.
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        self.line.contains(point, epsilon) && self.parameter_of(point) >= -epsilon
    }

    /// Parameter of a point assumed on the carrier line, measured from
    /// the start along the ray direction (non-negative on the ray).
    #[must_use]
    pub fn parameter_of(&self, point: &Point) -> f64 {
        self.p.vector_to(point).dot(&self.v)
    }

    /// Whether the two rays point the same way within `epsilon`.
    #[must_use]
    pub fn same_direction(&self, other: &Self, epsilon: f64) -> bool {
        (self.v - other.v).norm() <= epsilon
    }

    /// Intersects two rays; the same case analysis as the exact model.
    #[must_use]
    pub fn intersection(&self, other: &Self, epsilon: f64) -> RayRayRelation {
        if self.line.coincides(&other.line, epsilon) {
            return self.collinear_intersection(other, epsilon);
        }
        if self.line.is_parallel(&other.line, epsilon) {
            return RayRayRelation::Disjoint;
        }
        match self.line.cross_point(&other.line, epsilon) {
            Some(x) if self.contains(&x, epsilon) && other.contains(&x, epsilon) => {
                RayRayRelation::Point(x)
            }
            _ => RayRayRelation::Disjoint,
        }
    }

    fn collinear_intersection(&self, other: &Self, epsilon: f64) -> RayRayRelation {
        if self.same_direction(other, epsilon) {
            // The later start wins.
            return if self.contains(&other.p, epsilon) {
                RayRayRelation::Ray(*other)
            } else {
                RayRayRelation::Ray(*self)
            };
        }
        // Opposite directions.
        if self.p.coincides(&other.p, epsilon) {
            return RayRayRelation::Point(self.p);
        }
        if self.contains(&other.p, epsilon) && other.contains(&self.p, epsilon) {
            match LineSegment::new(self.p, other.p, epsilon) {
                Ok(s) => RayRayRelation::Segment(s),
                // Unreachable: the starts are distinct.
                Err(_) => RayRayRelation::Disjoint,
            }
        } else {
            RayRayRelation::Disjoint
        }
    }

    /// Intersects the ray with a line.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line, epsilon: f64) -> RayLineRelation {
        match self.line.intersection(line, epsilon) {
            LineLineRelation::Coincident => RayLineRelation::Ray(*self),
            LineLineRelation::Point(x) if self.contains(&x, epsilon) => RayLineRelation::Point(x),
            _ => RayLineRelation::Disjoint,
        }
    }

    /// Intersects the ray with a segment, clipping a collinear overlap
    /// at the ray start.
    #[must_use]
    pub fn intersection_with_segment(
        &self,
        segment: &LineSegment,
        epsilon: f64,
    ) -> RaySegmentRelation {
        if self.line.coincides(segment.line(), epsilon) {
            let tp = self.parameter_of(segment.p());
            let tq = self.parameter_of(segment.q());
            let (lo, lo_pt, hi, hi_pt) = if tp <= tq {
                (tp, *segment.p(), tq, *segment.q())
            } else {
                (tq, *segment.q(), tp, *segment.p())
            };
            if hi < -epsilon {
                return RaySegmentRelation::Disjoint;
            }
            let (lo, lo_pt) = if lo < 0.0 { (0.0, self.p) } else { (lo, lo_pt) };
            return if hi - lo <= epsilon {
                RaySegmentRelation::Point(hi_pt)
            } else {
                match LineSegment::new(lo_pt, hi_pt, epsilon) {
                    Ok(s) => RaySegmentRelation::Segment(s),
                    Err(_) => RaySegmentRelation::Disjoint,
                }
            };
        }
        if self.line.is_parallel(segment.line(), epsilon) {
            return RaySegmentRelation::Disjoint;
        }
        match self.line.cross_point(segment.line(), epsilon) {
            Some(x) if self.contains(&x, epsilon) && segment.contains(&x, epsilon) => {
                RaySegmentRelation::Point(x)
            }
            _ => RaySegmentRelation::Disjoint,
        }
    }

    /// Squared distance from a point to the ray: the line distance
    /// ahead of the start, the start distance behind it.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> f64 {
        if self.parameter_of(point) < 0.0 {
            self.p.distance_squared(point)
        } else {
            self.line.distance_squared(point)
        }
    }

    /// Distance from a point to the ray.
    #[must_use]
    pub fn distance(&self, point: &Point) -> f64 {
        self.distance_squared(point).sqrt()
    }

    /// Returns the ray translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
        Self {
            p: self.p.translate(v),
            v: self.v,
            line: self.line.translate(v),
        }
    }

    /// Rotates the ray about an axis (see [`Point::rotate`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero within `epsilon`.
    pub fn rotate(
        &self,
        axis_point: &Point,
        axis_dir: &Vector3,
        theta: f64,
        epsilon: f64,
    ) -> Result<Self> {
        let p = self.p.rotate(axis_point, axis_dir, theta, epsilon)?;
        let ahead = Point::from_vector(self.p.position().coords + self.v)
            .rotate(axis_point, axis_dir, theta, epsilon)?;
        Self::from_points(&p, &ahead, epsilon)
    }

    /// Ray equality within `epsilon`: coincident starts, same
    /// direction.
    #[must_use]
    pub fn coincides(&self, other: &Self, epsilon: f64) -> bool {
        self.p.coincides(&other.p, epsilon) && self.same_direction(other, epsilon)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::from_coords(x, y, z)
    }

    fn ray(a: (f64, f64, f64), b: (f64, f64, f64)) -> Ray {
        Ray::from_points(&p(a.0, a.1, a.2), &p(b.0, b.1, b.2), EPS).unwrap()
    }

    fn seg(a: (f64, f64, f64), b: (f64, f64, f64)) -> LineSegment {
        LineSegment::new(p(a.0, a.1, a.2), p(b.0, b.1, b.2), EPS).unwrap()
    }

    #[test]
    fn contains_ahead_not_behind() {
        let r = ray((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        assert!(r.contains(&p(0.0, 0.0, 0.0), EPS));
        assert!(r.contains(&p(5.0, 0.0, 0.0), EPS));
        assert!(!r.contains(&p(-1.0, 0.0, 0.0), EPS));
        assert!(!r.contains(&p(1.0, 1.0, 0.0), EPS));
    }

    #[test]
    fn same_direction_later_start_wins() {
        let a = ray((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let b = ray((3.0, 0.0, 0.0), (4.0, 0.0, 0.0));
        let RayRayRelation::Ray(r) = a.intersection(&b, EPS) else {
            panic!("expected a ray");
        };
        assert!(r.coincides(&b, EPS));
    }

    #[test]
    fn opposite_directions_overlapping_give_segment() {
        let a = ray((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let b = ray((1.0, 0.0, 0.0), (0.0, 0.0, 0.0));
        let RayRayRelation::Segment(s) = a.intersection(&b, EPS) else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&seg((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)), EPS));
        let RayRayRelation::Segment(t) = b.intersection(&a, EPS) else {
            panic!("expected a segment");
        };
        assert!(s.equals_ignore_direction(&t, EPS));
    }

    #[test]
    fn opposite_directions_disjoint() {
        let a = ray((1.0, 0.0, 0.0), (2.0, 0.0, 0.0));
        let b = ray((0.0, 0.0, 0.0), (-1.0, 0.0, 0.0));
        assert_eq!(a.intersection(&b, EPS), RayRayRelation::Disjoint);
    }

    #[test]
    fn crossing_rays_meet_when_both_reach() {
        let a = ray((-1.0, -1.0, 0.0), (1.0, 1.0, 0.0));
        let b = ray((1.0, -1.0, 0.0), (-1.0, 1.0, 0.0));
        let RayRayRelation::Point(x) = a.intersection(&b, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(0.0, 0.0, 0.0), 1e-9));
        let c = ray((1.0, -1.0, 0.0), (2.0, -2.0, 0.0));
        assert_eq!(a.intersection(&c, EPS), RayRayRelation::Disjoint);
    }

    #[test]
    fn segment_clipped_at_ray_start() {
        let r = ray((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let s = seg((-2.0, 0.0, 0.0), (3.0, 0.0, 0.0));
        let RaySegmentRelation::Segment(out) = r.intersection_with_segment(&s, EPS) else {
            panic!("expected a segment");
        };
        assert!(out.equals_ignore_direction(&seg((0.0, 0.0, 0.0), (3.0, 0.0, 0.0)), 1e-9));
    }

    #[test]
    fn segment_touching_ray_start_is_point() {
        let r = ray((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        let s = seg((-2.0, 0.0, 0.0), (0.0, 0.0, 0.0));
        let RaySegmentRelation::Point(x) = r.intersection_with_segment(&s, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(0.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn distance_ahead_uses_line_behind_uses_start() {
        let r = ray((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
        assert!((r.distance(&p(5.0, 2.0, 0.0)) - 2.0).abs() < 1e-9);
        assert!((r.distance(&p(-3.0, 4.0, 0.0)) - 5.0).abs() < 1e-9);
        assert!(r.distance_squared(&p(7.0, 0.0, 0.0)) < EPS);
    }
}
