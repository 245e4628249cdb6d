use num_traits::Signed;

use crate::error::Result;
use crate::number::{Oom, Rat, RatSqrt, RoundingMode};

use super::{Line, LineLineRelation, LineSegment, Point, Vector};

/// A half-line: the points of a line on one side of a start point
/// (the start included).
///
/// The stored direction is canonical up to positive scale (its first
/// non-zero component is `±1`), so two rays are equal iff they share a
/// start point and point the same way.
#[derive(Debug, Clone)]
pub struct Ray {
    p: Point,
    v: Vector,
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
    /// Returns an error if the direction is the zero vector.
    pub fn new(p: Point, direction: &Vector) -> Result<Self> {
        let v = direction.canonical_directed()?;
        let line = Line::new(p.clone(), direction)?;
        Ok(Self { p, v, line })
    }

    /// Creates the ray starting at `a` and passing through `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn from_points(a: &Point, b: &Point) -> Result<Self> {
        Self::new(a.clone(), &a.vector_to(b))
    }

    /// The start point.
    #[must_use]
    pub fn start(&self) -> &Point {
        &self.p
    }

    /// The canonical (orientation-preserving) direction.
    #[must_use]
    pub fn direction(&self) -> &Vector {
        &self.v
    }

    /// The carrier line.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Whether the point lies on the ray: on the carrier line, at a
    /// non-negative parameter from the start. Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.line.contains(point) && !self.parameter_of(point).is_negative()
    }

    /// Parameter of a point assumed on the carrier line, measured from
    /// the start in units of the ray direction (non-negative on the
    /// ray).
    #[must_use]
    pub fn parameter_of(&self, point: &Point) -> Rat {
        self.p.vector_to(point).dot(&self.v) / self.v.magnitude_squared()
    }

    /// Whether the two rays point the same way (collinear or not).
    #[must_use]
    pub fn same_direction(&self, other: &Self) -> bool {
        self.v == other.v
    }

    /// Intersects two rays.
    ///
    /// Collinear rays pointing the same way meet in whichever ray
    /// starts further along. Collinear rays pointing opposite ways
    /// meet in the segment between their starts when each start lies
    /// on the other ray, in a single point when the starts coincide,
    /// and not at all otherwise. Non-collinear rays meet where their
    /// carrier lines cross, provided the crossing lies on both
    /// half-lines.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> RayRayRelation {
        if self.line == other.line {
            return self.collinear_intersection(other);
        }
        if self.line.is_parallel(&other.line) {
            return RayRayRelation::Disjoint;
        }
        match self.line.cross_point(&other.line) {
            Some(x) if self.contains(&x) && other.contains(&x) => RayRayRelation::Point(x),
            _ => RayRayRelation::Disjoint,
        }
    }

    fn collinear_intersection(&self, other: &Self) -> RayRayRelation {
        if self.same_direction(other) {
            // The later start wins.
            return if self.contains(&other.p) {
                RayRayRelation::Ray(other.clone())
            } else {
                RayRayRelation::Ray(self.clone())
            };
        }
        // Opposite directions.
        if self.p.coincides(&other.p) {
            return RayRayRelation::Point(self.p.clone());
        }
        if self.contains(&other.p) && other.contains(&self.p) {
            match LineSegment::new(self.p.clone(), other.p.clone()) {
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
    pub fn intersection_with_line(&self, line: &Line) -> RayLineRelation {
        match self.line.intersection(line) {
            LineLineRelation::Coincident => RayLineRelation::Ray(self.clone()),
            LineLineRelation::Point(x) if self.contains(&x) => RayLineRelation::Point(x),
            _ => RayLineRelation::Disjoint,
        }
    }

    /// Intersects the ray with a segment: the segment's carrier-line
    /// relation filtered by the ray's half-line, clipping a collinear
    /// overlap at the ray start.
    #[must_use]
    pub fn intersection_with_segment(&self, segment: &LineSegment) -> RaySegmentRelation {
        if self.line == *segment.line() {
            let tp = self.parameter_of(segment.p());
            let tq = self.parameter_of(segment.q());
            let (lo, lo_pt, hi, hi_pt) = if tp <= tq {
                (tp, segment.p().clone(), tq, segment.q().clone())
            } else {
                (tq, segment.q().clone(), tp, segment.p().clone())
            };
            if hi.is_negative() {
                return RaySegmentRelation::Disjoint;
            }
            let (lo, lo_pt) = if lo.is_negative() {
                (Rat::from_integer(0.into()), self.p.clone())
            } else {
                (lo, lo_pt)
            };
            return if lo == hi {
                RaySegmentRelation::Point(hi_pt)
            } else {
                match LineSegment::new(lo_pt, hi_pt) {
                    Ok(s) => RaySegmentRelation::Segment(s),
                    // Unreachable: lo < hi gives distinct endpoints.
                    Err(_) => RaySegmentRelation::Disjoint,
                }
            };
        }
        if self.line.is_parallel(segment.line()) {
            return RaySegmentRelation::Disjoint;
        }
        match self.line.cross_point(segment.line()) {
            Some(x) if self.contains(&x) && segment.contains(&x) => {
                RaySegmentRelation::Point(x)
            }
            _ => RaySegmentRelation::Disjoint,
        }
    }

    /// Squared distance from a point to the ray. Exact.
    ///
    /// The point projects either onto the half-line (line distance) or
    /// behind the start (start distance).
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> Rat {
        let t = self.p.vector_to(point).dot(&self.v);
        if t.is_negative() {
            self.p.distance_squared(point)
        } else {
            self.line.distance_squared(point)
        }
    }

    /// Distance from a point to the ray, rounded at `oom`.
    #[must_use]
    pub fn distance(&self, point: &Point, oom: Oom, rm: RoundingMode) -> Rat {
        RatSqrt::non_negative(self.distance_squared(point)).sqrt(oom, rm)
    }

    /// Returns the ray translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector) -> Self {
        Self {
            p: self.p.translate(v),
            v: self.v.clone(),
            line: self.line.translate(v),
        }
    }

    /// Rotates the ray about an axis (see [`Point::rotate`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the supplied `cos θ`/`sin θ` collapse the
    /// direction to zero (only possible for a degenerate pair).
    pub fn rotate(
        &self,
        axis_point: &Point,
        axis_dir: &Vector,
        cos_t: &Rat,
        sin_t: &Rat,
    ) -> Result<Self> {
        Self::new(
            self.p.rotate(axis_point, axis_dir, cos_t, sin_t),
            &self.v.rotate(axis_dir, cos_t, sin_t),
        )
    }
}

impl PartialEq for Ray {
    fn eq(&self, other: &Self) -> bool {
        self.p.coincides(&other.p) && self.v == other.v
    }
}

impl Eq for Ray {}
