use num_traits::{Signed, Zero};

use crate::error::{GeometryError, Result};
use crate::number::{Oom, Rat, RatSqrt, RoundingMode};

use super::{Line, LineSegment, Point, Ray, Vector};

/// An infinite plane defined by a point and a normal vector.
///
/// The normal keeps the orientation it was constructed with (for three
/// points, the right-hand rule over `p → q → r`); equality, however, is
/// coincidence, so two planes with opposite normals through the same
/// points compare equal.
#[derive(Debug, Clone)]
pub struct Plane {
    p: Point,
    n: Vector,
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
    /// Creates a plane from a point on it and a normal vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is the zero vector.
    pub fn new(p: Point, normal: Vector) -> Result<Self> {
        if normal.is_zero() {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { p, n: normal })
    }

    /// Creates the plane through three points, with the normal
    /// `(q − p) × (r − p)` (right-hand rule over the point order).
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear (or coincident).
    pub fn from_points(p: &Point, q: &Point, r: &Point) -> Result<Self> {
        let n = p.vector_to(q).cross(&p.vector_to(r));
        if n.is_zero() {
            return Err(GeometryError::CollinearPoints("plane").into());
        }
        Ok(Self { p: p.clone(), n })
    }

    /// The plane `x = 0`.
    #[must_use]
    pub fn x0() -> Self {
        Self {
            p: Point::origin(),
            n: Vector::from_ints(1, 0, 0),
        }
    }

    /// The plane `y = 0`.
    #[must_use]
    pub fn y0() -> Self {
        Self {
            p: Point::origin(),
            n: Vector::from_ints(0, 1, 0),
        }
    }

    /// The plane `z = 0`.
    #[must_use]
    pub fn z0() -> Self {
        Self {
            p: Point::origin(),
            n: Vector::from_ints(0, 0, 1),
        }
    }

    /// A point on the plane.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.p
    }

    /// The oriented normal vector.
    #[must_use]
    pub fn normal(&self) -> &Vector {
        &self.n
    }

    /// The signed component of `point` along the normal, zero exactly
    /// when the point is on the plane. Exact (unnormalized: scaled by
    /// `|n|` relative to a true distance).
    #[must_use]
    pub fn signed_component(&self, point: &Point) -> Rat {
        self.n.dot(&self.p.vector_to(point))
    }

    /// Classifies a point against the oriented normal. Exact.
    #[must_use]
    pub fn classify(&self, point: &Point) -> PointPlaneSide {
        let s = self.signed_component(point);
        if s.is_zero() {
            PointPlaneSide::On
        } else if s.is_positive() {
            PointPlaneSide::Front
        } else {
            PointPlaneSide::Back
        }
    }

    /// Whether the point lies on the plane. Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.signed_component(point).is_zero()
    }

    /// Whether both of the segment's endpoints (and so all of it) lie
    /// on the plane. Exact.
    #[must_use]
    pub fn is_on_plane(&self, segment: &LineSegment) -> bool {
        self.contains(segment.p()) && self.contains(segment.q())
    }

    /// Whether the planes' normals are proportional. Exact.
    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        self.n.cross(&other.n).is_zero()
    }

    /// Whether the line is parallel to the plane (normal orthogonal to
    /// the direction); contained lines count as parallel. Exact.
    #[must_use]
    pub fn is_parallel_to_line(&self, line: &Line) -> bool {
        self.n.dot(line.direction()).is_zero()
    }

    /// Squared distance from a point to the plane,
    /// `(n·w)² / |n|²`. Exact.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> Rat {
        let s = self.signed_component(point);
        (&s * &s) / self.n.magnitude_squared()
    }

    /// Distance from a point to the plane, rounded at `oom`.
    #[must_use]
    pub fn distance(&self, point: &Point, oom: Oom, rm: RoundingMode) -> Rat {
        RatSqrt::non_negative(self.distance_squared(point)).sqrt(oom, rm)
    }

    /// Squared distance between two planes: zero unless they are
    /// parallel and distinct. Exact.
    #[must_use]
    pub fn distance_squared_to_plane(&self, other: &Self) -> Rat {
        if self.is_parallel(other) {
            self.distance_squared(&other.p)
        } else {
            Rat::zero()
        }
    }

    /// Intersects two planes.
    ///
    /// Crossing planes meet in the line whose direction is `n₁ × n₂`;
    /// its anchor point is found by solving both plane equations with
    /// the coordinate of the largest-magnitude direction component
    /// held at zero, so the 2×2 determinant — that very component — is
    /// the denominator farthest from zero.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> PlanePairRelation {
        let dir = self.n.cross(&other.n);
        if dir.is_zero() {
            return if self.contains(&other.p) {
                PlanePairRelation::Coincident
            } else {
                PlanePairRelation::Parallel
            };
        }

        let d1 = self.n.dot(&self.p.position());
        let d2 = other.n.dot(&other.p.position());
        let (n1, n2) = (&self.n, &other.n);

        let (ax, ay, az) = (dir.dx().abs(), dir.dy().abs(), dir.dz().abs());
        let anchor = if az >= ax && az >= ay {
            // z = 0; solve for x and y.
            let x = (&d1 * n2.dy() - &d2 * n1.dy()) / dir.dz();
            let y = (n1.dx() * &d2 - n2.dx() * &d1) / dir.dz();
            Vector::new(x, y, Rat::zero())
        } else if ax >= ay {
            // x = 0; solve for y and z.
            let y = (&d1 * n2.dz() - &d2 * n1.dz()) / dir.dx();
            let z = (n1.dy() * &d2 - n2.dy() * &d1) / dir.dx();
            Vector::new(Rat::zero(), y, z)
        } else {
            // y = 0; solve for z and x.
            let z = (&d1 * n2.dx() - &d2 * n1.dx()) / dir.dy();
            let x = (n1.dz() * &d2 - n2.dz() * &d1) / dir.dy();
            Vector::new(x, Rat::zero(), z)
        };

        match Line::new(Point::from_vector(anchor), &dir) {
            Ok(line) => PlanePairRelation::Line(line),
            // Unreachable: dir is non-zero.
            Err(_) => PlanePairRelation::Parallel,
        }
    }

    /// Intersects a line with the plane by substituting its parametric
    /// form into the plane equation.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line) -> LinePlaneRelation {
        let denom = self.n.dot(line.direction());
        let numer = self.signed_component(line.point());
        if denom.is_zero() {
            if numer.is_zero() {
                LinePlaneRelation::OnPlane
            } else {
                LinePlaneRelation::Parallel
            }
        } else {
            let t = -numer / denom;
            LinePlaneRelation::Point(line.point_at(&t))
        }
    }

    /// Intersects a segment with the plane: the endpoints' signed
    /// components decide between lying on the plane, crossing it once,
    /// and missing it.
    #[must_use]
    pub fn intersection_with_segment(&self, segment: &LineSegment) -> SegmentPlaneRelation {
        let s0 = self.signed_component(segment.p());
        let s1 = self.signed_component(segment.q());
        if s0.is_zero() && s1.is_zero() {
            return SegmentPlaneRelation::OnPlane(segment.clone());
        }
        if s0.is_zero() {
            return SegmentPlaneRelation::Point(segment.p().clone());
        }
        if s1.is_zero() {
            return SegmentPlaneRelation::Point(segment.q().clone());
        }
        if s0.is_positive() == s1.is_positive() {
            return SegmentPlaneRelation::Disjoint;
        }
        // Opposite strict signs: s0 − s1 is non-zero.
        let t = &s0 / (&s0 - &s1);
        SegmentPlaneRelation::Point(segment.point_at(&t))
    }

    /// Intersects a ray with the plane.
    #[must_use]
    pub fn intersection_with_ray(&self, ray: &Ray) -> RayPlaneRelation {
        match self.intersection_with_line(ray.line()) {
            LinePlaneRelation::OnPlane => RayPlaneRelation::OnPlane(ray.clone()),
            LinePlaneRelation::Point(x) if ray.contains(&x) => RayPlaneRelation::Point(x),
            _ => RayPlaneRelation::Disjoint,
        }
    }

    /// Returns the plane translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector) -> Self {
        Self {
            p: self.p.translate(v),
            n: self.n.clone(),
        }
    }

    /// Rotates the plane about an axis (see [`Point::rotate`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the supplied `cos θ`/`sin θ` collapse the
    /// normal to zero (only possible for a degenerate pair).
    pub fn rotate(
        &self,
        axis_point: &Point,
        axis_dir: &Vector,
        cos_t: &Rat,
        sin_t: &Rat,
    ) -> Result<Self> {
        Self::new(
            self.p.rotate(axis_point, axis_dir, cos_t, sin_t),
            self.n.rotate(axis_dir, cos_t, sin_t),
        )
    }
}

impl PartialEq for Plane {
    /// Coincidence: proportional normals (either sign) and a shared
    /// point.
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other) && self.contains(&other.p)
    }
}

impl Eq for Plane {}
