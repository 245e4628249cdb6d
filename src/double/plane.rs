use nalgebra::{Rotation3, Unit};

use crate::error::{GeometryError, Result};

use super::{Line, LineSegment, Point, Ray, Vector3};

/// An infinite plane defined by a point and a unit normal vector.
///
/// The normal keeps the orientation it was constructed with (for three
/// points, the right-hand rule over `p → q → r`); [`Plane::coincides`]
/// however ignores the normal's sign, so two planes with opposite
/// normals through the same points coincide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    p: Point,
    n: Vector3,
}

/// Relationship between two planes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanePairRelation {
    /// The planes are the same.
    Coincident,
    /// Parallel but distinct; no intersection.
    Parallel,
    /// The planes cross along a line.
    Line(Line),
}

/// Relationship of a line with a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum LinePlaneRelation {
    /// The line lies entirely on the plane.
    OnPlane,
    /// Parallel to the plane, off it; no intersection.
    Parallel,
    /// The line pierces the plane at a single point.
    Point(Point),
}

/// Relationship of a line segment with a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentPlaneRelation {
    /// Both endpoints (and so the whole segment) lie on the plane.
    OnPlane(LineSegment),
    /// The segment crosses or touches the plane at a single point.
    Point(Point),
    /// Entirely on one side; no intersection.
    Disjoint,
}

/// Relationship of a ray with a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum RayPlaneRelation {
    /// The whole ray lies on the plane.
    OnPlane(Ray),
    /// The ray pierces the plane at a single point.
    Point(Point),
    /// No intersection.
    Disjoint,
}

/// Classification of a point against a plane's oriented normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPlaneSide {
    /// On the normal side.
    Front,
    /// Opposite the normal.
    Back,
    /// On the plane.
    On,
}

impl Plane {
    /// Creates a plane from a point on it and a normal vector. The
    /// normal is scaled to unit length; its orientation is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal's norm is within `epsilon` of
    /// zero.
    pub fn new(p: Point, normal: &Vector3, epsilon: f64) -> Result<Self> {
        let norm = normal.norm();
        if norm <= epsilon {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { p, n: normal / norm })
    }

    /// Creates the plane through three points, with the normal
    /// `(q − p) × (r − p)` (right-hand rule over the point order).
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear (or coincident)
    /// within `epsilon`.
    pub fn from_points(p: &Point, q: &Point, r: &Point, epsilon: f64) -> Result<Self> {
        let n = p.vector_to(q).cross(&p.vector_to(r));
        if n.norm() <= epsilon {
            return Err(GeometryError::CollinearPoints("plane").into());
        }
        Self::new(*p, &n, epsilon)
    }

    /// The plane `x = 0`.
    #[must_use]
    pub fn x0() -> Self {
        Self {
            p: Point::origin(),
            n: Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// The plane `y = 0`.
    #[must_use]
    pub fn y0() -> Self {
        Self {
            p: Point::origin(),
            n: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    /// The plane `z = 0`.
    #[must_use]
    pub fn z0() -> Self {
        Self {
            p: Point::origin(),
            n: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    /// A point on the plane.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.p
    }

    /// The oriented unit normal vector.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.n
    }

    /// The signed distance of `point` from the plane along the unit
    /// normal.
    #[must_use]
    pub fn signed_component(&self, point: &Point) -> f64 {
        self.n.dot(&self.p.vector_to(point))
    }

    /// Classifies a point against the oriented normal, treating a
    /// signed distance within `epsilon` as on the plane.
    #[must_use]
    pub fn classify(&self, point: &Point, epsilon: f64) -> PointPlaneSide {
        let s = self.signed_component(point);
        if s.abs() <= epsilon {
            PointPlaneSide::On
        } else if s > 0.0 {
            PointPlaneSide::Front
        } else {
            PointPlaneSide::Back
        }
    }

    /// Whether the point lies within `epsilon` of the plane.
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        self.signed_component(point).abs() <= epsilon
    }

    /// Whether both of the segment's endpoints (and so all of it) lie
    /// within `epsilon` of the plane.
    #[must_use]
    pub fn is_on_plane(&self, segment: &LineSegment, epsilon: f64) -> bool {
        self.contains(segment.p(), epsilon) && self.contains(segment.q(), epsilon)
    }

    /// Whether the planes' normals are parallel within `epsilon`.
    #[must_use]
    pub fn is_parallel(&self, other: &Self, epsilon: f64) -> bool {
        self.n.cross(&other.n).norm() <= epsilon
    }

    /// Whether the line is parallel to the plane (normal orthogonal to
    /// the direction within `epsilon`); contained lines count as
    /// parallel.
    #[must_use]
    pub fn is_parallel_to_line(&self, line: &Line, epsilon: f64) -> bool {
        self.n.dot(line.direction()).abs() <= epsilon
    }

    /// Squared distance from a point to the plane.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> f64 {
        let s = self.signed_component(point);
        s * s
    }

    /// Distance from a point to the plane.
    #[must_use]
    pub fn distance(&self, point: &Point) -> f64 {
        self.signed_component(point).abs()
    }

    /// Squared distance between two planes: zero unless they are
    /// parallel and distinct.
    #[must_use]
    pub fn distance_squared_to_plane(&self, other: &Self, epsilon: f64) -> f64 {
        if self.is_parallel(other, epsilon) {
            self.distance_squared(&other.p)
        } else {
            0.0
        }
    }

    /// Intersects two planes.
    ///
    /// Crossing planes meet in the line whose direction is `n₁ × n₂`;
    /// its anchor point `p₁ + s·n₁ + t·n₂` is found by solving both
    /// plane equations for `s` and `t` with the unit normals.
    #[must_use]
    pub fn intersection(&self, other: &Self, epsilon: f64) -> PlanePairRelation {
        let dir = self.n.cross(&other.n);
        if dir.norm() <= epsilon {
            return if self.contains(&other.p, epsilon) {
                PlanePairRelation::Coincident
            } else {
                PlanePairRelation::Parallel
            };
        }

        let dot = self.n.dot(&other.n);
        let d2 = other.n.dot(&self.p.vector_to(&other.p));
        let denom = 1.0 - dot * dot;
        let t = d2 / denom;
        let s = -dot * t;
        let anchor = self.p.translate(&(self.n * s + other.n * t));

        match Line::new(anchor, &dir, epsilon) {
            Ok(line) => PlanePairRelation::Line(line),
            // Unreachable: dir's norm exceeds epsilon.
            Err(_) => PlanePairRelation::Parallel,
        }
    }

    /// Intersects a line with the plane by substituting its parametric
    /// form into the plane equation.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line, epsilon: f64) -> LinePlaneRelation {
        let denom = self.n.dot(line.direction());
        let numer = self.signed_component(line.point());
        if denom.abs() <= epsilon {
            if numer.abs() <= epsilon {
                LinePlaneRelation::OnPlane
            } else {
                LinePlaneRelation::Parallel
            }
        } else {
            LinePlaneRelation::Point(line.point_at(-numer / denom))
        }
    }

    /// Intersects a segment with the plane: the endpoints' signed
    /// distances decide between lying on the plane, crossing it once,
    /// and missing it.
    #[must_use]
    pub fn intersection_with_segment(
        &self,
        segment: &LineSegment,
        epsilon: f64,
    ) -> SegmentPlaneRelation {
        let s0 = self.signed_component(segment.p());
        let s1 = self.signed_component(segment.q());
        if s0.abs() <= epsilon && s1.abs() <= epsilon {
            return SegmentPlaneRelation::OnPlane(*segment);
        }
        if s0.abs() <= epsilon {
            return SegmentPlaneRelation::Point(*segment.p());
        }
        if s1.abs() <= epsilon {
            return SegmentPlaneRelation::Point(*segment.q());
        }
        if (s0 > 0.0) == (s1 > 0.0) {
            return SegmentPlaneRelation::Disjoint;
        }
        // Opposite strict signs: s0 − s1 is bounded away from zero.
        let t = s0 / (s0 - s1);
        SegmentPlaneRelation::Point(segment.point_at(t))
    }

    /// Intersects a ray with the plane.
    #[must_use]
    pub fn intersection_with_ray(&self, ray: &Ray, epsilon: f64) -> RayPlaneRelation {
        match self.intersection_with_line(ray.line(), epsilon) {
            LinePlaneRelation::OnPlane => RayPlaneRelation::OnPlane(*ray),
            LinePlaneRelation::Point(x) if ray.contains(&x, epsilon) => RayPlaneRelation::Point(x),
            _ => RayPlaneRelation::Disjoint,
        }
    }

    /// Returns the plane translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
        Self {
            p: self.p.translate(v),
            n: self.n,
        }
    }

    /// Rotates the plane about an axis (see [`Point::rotate`]).
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
        let axis = Unit::try_new(*axis_dir, epsilon).ok_or(GeometryError::ZeroVector)?;
        let rot = Rotation3::from_axis_angle(&axis, theta);
        Ok(Self {
            p: self.p.rotate(axis_point, axis_dir, theta, epsilon)?,
            n: rot * self.n,
        })
    }

    /// Plane equality within `epsilon`: parallel normals (either sign)
    /// and a shared point.
    #[must_use]
    pub fn coincides(&self, other: &Self, epsilon: f64) -> bool {
        self.is_parallel(other, epsilon) && self.contains(&other.p, epsilon)
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

    // ── construction and coincidence tests ──

    #[test]
    fn collinear_points_rejected() {
        assert!(
            Plane::from_points(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(2.0, 0.0, 0.0), EPS)
                .is_err()
        );
    }

    #[test]
    fn right_hand_rule_normal() {
        let pl =
            Plane::from_points(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), &p(0.0, 1.0, 0.0), EPS)
                .unwrap();
        assert!((pl.normal() - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        // Reversing the winding flips the normal but not the plane.
        let rev =
            Plane::from_points(&p(0.0, 0.0, 0.0), &p(0.0, 1.0, 0.0), &p(1.0, 0.0, 0.0), EPS)
                .unwrap();
        assert!((rev.normal() + Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        assert!(pl.coincides(&rev, EPS));
    }

    #[test]
    fn normal_is_scaled_to_unit_length() {
        let pl = Plane::new(p(1.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, -7.0), EPS).unwrap();
        assert!((pl.normal().norm() - 1.0).abs() < 1e-12);
        assert!(pl.normal().z < 0.0);
    }

    #[test]
    fn axis_plane_constants_match_constructed_planes() {
        let built =
            Plane::from_points(&p(0.0, 0.0, 0.0), &p(0.0, 1.0, 0.0), &p(0.0, 0.0, 1.0), EPS)
                .unwrap();
        assert!(built.coincides(&Plane::x0(), EPS));
        assert!(!Plane::x0().coincides(&Plane::y0(), EPS));
    }

    // ── membership and classification tests ──

    #[test]
    fn contains_and_classify() {
        let pl = Plane::z0();
        assert!(pl.contains(&p(3.0, -4.0, 0.0), EPS));
        assert_eq!(pl.classify(&p(0.0, 0.0, 5.0), EPS), PointPlaneSide::Front);
        assert_eq!(pl.classify(&p(0.0, 0.0, -5.0), EPS), PointPlaneSide::Back);
        assert_eq!(pl.classify(&p(1.0, 2.0, 0.0), EPS), PointPlaneSide::On);
    }

    #[test]
    fn segment_on_plane() {
        let pl = Plane::z0();
        let s = LineSegment::from_coords((0.0, 0.0, 0.0), (3.0, 1.0, 0.0), EPS).unwrap();
        assert!(pl.is_on_plane(&s, EPS));
        let t = LineSegment::from_coords((0.0, 0.0, 0.0), (3.0, 1.0, 1.0), EPS).unwrap();
        assert!(!pl.is_on_plane(&t, EPS));
    }

    // ── plane/plane intersection tests ──

    #[test]
    fn unit_planes_cross_in_expected_line() {
        // x = 1 meets y = 1 in the vertical line through (1, 1, 0).
        let x1 = Plane::new(p(1.0, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0), EPS).unwrap();
        let y1 = Plane::new(p(0.0, 1.0, 0.0), &Vector3::new(0.0, 1.0, 0.0), EPS).unwrap();
        let PlanePairRelation::Line(l) = x1.intersection(&y1, EPS) else {
            panic!("expected a line");
        };
        let expected = Line::from_points(&p(1.0, 1.0, 0.0), &p(1.0, 1.0, 1.0), EPS).unwrap();
        assert!(l.coincides(&expected, 1e-9));
        // Symmetric call agrees.
        let PlanePairRelation::Line(m) = y1.intersection(&x1, EPS) else {
            panic!("expected a line");
        };
        assert!(m.coincides(&expected, 1e-9));
    }

    #[test]
    fn coincident_and_parallel_planes() {
        let a = Plane::z0();
        let b = Plane::new(p(7.0, -2.0, 0.0), &Vector3::new(0.0, 0.0, -3.0), EPS).unwrap();
        assert_eq!(a.intersection(&b, EPS), PlanePairRelation::Coincident);
        let c = Plane::new(p(0.0, 0.0, 4.0), &Vector3::new(0.0, 0.0, 1.0), EPS).unwrap();
        assert_eq!(a.intersection(&c, EPS), PlanePairRelation::Parallel);
        assert!((a.distance_squared_to_plane(&c, EPS) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn skewed_planes_meet_on_both() {
        let a = Plane::new(p(0.0, 0.0, 0.0), &Vector3::new(1.0, 0.0, 3.0), EPS).unwrap();
        let b = Plane::new(p(0.0, 0.0, 1.0), &Vector3::new(-1.0, 0.0, 3.0), EPS).unwrap();
        let PlanePairRelation::Line(l) = a.intersection(&b, EPS) else {
            panic!("expected a line");
        };
        // Every point of the result satisfies both plane equations.
        assert!(a.contains(l.point(), 1e-9));
        assert!(b.contains(l.point(), 1e-9));
        let q = l.point_at(5.0);
        assert!(a.contains(&q, 1e-9));
        assert!(b.contains(&q, 1e-9));
    }

    // ── line/segment/ray against plane tests ──

    #[test]
    fn line_pierces_plane() {
        let l = Line::from_points(&p(0.0, 0.0, -1.0), &p(2.0, 2.0, 1.0), EPS).unwrap();
        let LinePlaneRelation::Point(x) = Plane::z0().intersection_with_line(&l, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(1.0, 1.0, 0.0), 1e-9));
    }

    #[test]
    fn line_on_and_off_parallel() {
        let on = Line::x_axis();
        assert_eq!(
            Plane::z0().intersection_with_line(&on, EPS),
            LinePlaneRelation::OnPlane
        );
        let off = Line::from_points(&p(0.0, 0.0, 1.0), &p(1.0, 0.0, 1.0), EPS).unwrap();
        assert_eq!(
            Plane::z0().intersection_with_line(&off, EPS),
            LinePlaneRelation::Parallel
        );
    }

    #[test]
    fn segment_crossing_touching_missing() {
        let pl = Plane::z0();
        let crossing = LineSegment::from_coords((0.0, 0.0, -1.0), (0.0, 0.0, 3.0), EPS).unwrap();
        let SegmentPlaneRelation::Point(x) = pl.intersection_with_segment(&crossing, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(0.0, 0.0, 0.0), 1e-9));

        let touching = LineSegment::from_coords((1.0, 1.0, 0.0), (1.0, 1.0, 5.0), EPS).unwrap();
        let SegmentPlaneRelation::Point(y) = pl.intersection_with_segment(&touching, EPS) else {
            panic!("expected a point");
        };
        assert!(y.coincides(&p(1.0, 1.0, 0.0), 1e-9));

        let missing = LineSegment::from_coords((0.0, 0.0, 1.0), (0.0, 0.0, 5.0), EPS).unwrap();
        assert_eq!(
            pl.intersection_with_segment(&missing, EPS),
            SegmentPlaneRelation::Disjoint
        );
    }

    #[test]
    fn ray_reaches_or_misses_plane() {
        let pl = Plane::z0();
        let towards = Ray::from_points(&p(0.0, 0.0, 2.0), &p(0.0, 0.0, 1.0), EPS).unwrap();
        let RayPlaneRelation::Point(x) = pl.intersection_with_ray(&towards, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(0.0, 0.0, 0.0), 1e-9));
        let away = Ray::from_points(&p(0.0, 0.0, 2.0), &p(0.0, 0.0, 3.0), EPS).unwrap();
        assert_eq!(
            pl.intersection_with_ray(&away, EPS),
            RayPlaneRelation::Disjoint
        );
    }

    // ── distance and transform tests ──

    #[test]
    fn point_distance_is_signed_component_magnitude() {
        let pl = Plane::z0();
        assert!((pl.distance_squared(&p(9.0, 9.0, 4.0)) - 16.0).abs() < 1e-9);
        assert!((pl.distance(&p(9.0, 9.0, -4.0)) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_maps_x0_to_y0() {
        let r = Plane::x0()
            .rotate(
                &Point::origin(),
                &Vector3::new(0.0, 0.0, 1.0),
                std::f64::consts::FRAC_PI_2,
                EPS,
            )
            .unwrap();
        assert!(r.coincides(&Plane::y0(), 1e-9));
    }
}
