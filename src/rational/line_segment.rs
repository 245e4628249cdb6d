use num_traits::{One, Signed, Zero};

use crate::error::Result;
use crate::number::{Oom, Rat, RatSqrt, RoundingMode};

use super::{Envelope, Line, LineSegmentsCollinear, Point, Vector};

/// A bounded segment of a line between two endpoint points.
///
/// Endpoint order is not significant for the geometry of the segment
/// but is preserved: it drives directional operations and strict
/// equality (see [`LineSegment::equals_ignore_direction`]).
#[derive(Debug, Clone)]
pub struct LineSegment {
    p: Point,
    q: Point,
    line: Line,
}

/// Relationship between two line segments.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentSegmentRelation {
    /// No shared point.
    Disjoint,
    /// The segments touch or cross at a single point.
    Point(Point),
    /// The segments overlap in a collinear sub-segment.
    Segment(LineSegment),
    /// Collinear but not overlapping: reported as the pair rather than
    /// as an empty result, so callers can see the shared line.
    CollinearDisjoint(LineSegmentsCollinear),
}

/// The union of two collinear segments.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentUnion {
    /// Touching or overlapping: one enclosing segment.
    Segment(LineSegment),
    /// Disjoint: both segments, as a collinear collection.
    Collinear(LineSegmentsCollinear),
}

impl LineSegment {
    /// Creates a segment between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn new(p: Point, q: Point) -> Result<Self> {
        let line = Line::from_points(&p, &q)?;
        Ok(Self { p, q, line })
    }

    /// Creates a segment between integer coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn from_ints(p: (i64, i64, i64), q: (i64, i64, i64)) -> Result<Self> {
        Self::new(
            Point::from_ints(p.0, p.1, p.2),
            Point::from_ints(q.0, q.1, q.2),
        )
    }

    /// The first endpoint.
    #[must_use]
    pub fn p(&self) -> &Point {
        &self.p
    }

    /// The second endpoint.
    #[must_use]
    pub fn q(&self) -> &Point {
        &self.q
    }

    /// The carrier line.
    #[must_use]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// The segment vector `q - p`. Exact.
    #[must_use]
    pub fn vector(&self) -> Vector {
        self.p.vector_to(&self.q)
    }

    /// Squared length. Exact.
    #[must_use]
    pub fn length_squared(&self) -> Rat {
        self.p.distance_squared(&self.q)
    }

    /// Length, rounded at `oom` under `rm`.
    #[must_use]
    pub fn length(&self, oom: Oom, rm: RoundingMode) -> Rat {
        self.p.distance(&self.q, oom, rm)
    }

    /// The midpoint. Exact.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        let half = Rat::new(1.into(), 2.into());
        self.p.translate(&self.vector().scale(&half))
    }

    /// Parameter of a point assumed on the carrier line, scaled so the
    /// segment spans `[0, 1]` from `p` to `q`.
    #[must_use]
    pub fn parameter_of(&self, point: &Point) -> Rat {
        let v = self.vector();
        self.p.vector_to(point).dot(&v) / v.magnitude_squared()
    }

    /// The point at segment parameter `t` (0 at `p`, 1 at `q`).
    #[must_use]
    pub fn point_at(&self, t: &Rat) -> Point {
        self.p.translate(&self.vector().scale(t))
    }

    /// Whether the point lies on the segment (endpoints included).
    /// Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        if !self.line.contains(point) {
            return false;
        }
        let t = self.parameter_of(point);
        !t.is_negative() && t <= Rat::one()
    }

    /// Geometric equality that ignores endpoint order.
    #[must_use]
    pub fn equals_ignore_direction(&self, other: &Self) -> bool {
        (self.p.coincides(&other.p) && self.q.coincides(&other.q))
            || (self.p.coincides(&other.q) && self.q.coincides(&other.p))
    }

    /// Returns the segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            p: self.q.clone(),
            q: self.p.clone(),
            line: self.line.clone(),
        }
    }

    /// Intersects two segments.
    ///
    /// The carrier-line intersection is computed first, then clipped
    /// to both parameter ranges. Overlapping collinear segments yield
    /// the shared sub-segment, touching ones a point, and collinear
    /// disjoint ones the two-member collection.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> SegmentSegmentRelation {
        if self.line == other.line {
            return self.collinear_intersection(other);
        }
        if self.line.is_parallel(&other.line) {
            return SegmentSegmentRelation::Disjoint;
        }
        match self.line.cross_point(&other.line) {
            Some(x) if self.contains(&x) && other.contains(&x) => {
                SegmentSegmentRelation::Point(x)
            }
            _ => SegmentSegmentRelation::Disjoint,
        }
    }

    fn collinear_intersection(&self, other: &Self) -> SegmentSegmentRelation {
        let (lo_a, hi_a) = self.line_param_range();
        let (lo_b, hi_b) = other.line_param_range_on(&self.line);
        let lo = if lo_a.0 >= lo_b.0 { lo_a } else { lo_b };
        let hi = if hi_a.0 <= hi_b.0 { hi_a } else { hi_b };
        if lo.0 < hi.0 {
            SegmentSegmentRelation::Segment(Self {
                line: self.line.clone(),
                p: lo.1,
                q: hi.1,
            })
        } else if lo.0 == hi.0 {
            SegmentSegmentRelation::Point(lo.1)
        } else {
            let both = LineSegmentsCollinear::new(vec![self.clone(), other.clone()]);
            match both {
                Ok(c) => SegmentSegmentRelation::CollinearDisjoint(c),
                // Unreachable: carrier lines were just compared equal.
                Err(_) => SegmentSegmentRelation::Disjoint,
            }
        }
    }

    /// Endpoints tagged by their parameter along the carrier line,
    /// ordered low to high.
    fn line_param_range(&self) -> ((Rat, Point), (Rat, Point)) {
        self.line_param_range_on(&self.line)
    }

    /// Like [`LineSegment::line_param_range`] but parameterized along
    /// another (equal) line, so ranges from both segments share a
    /// scale.
    fn line_param_range_on(&self, line: &Line) -> ((Rat, Point), (Rat, Point)) {
        let tp = line.parameter_of(&self.p);
        let tq = line.parameter_of(&self.q);
        if tp <= tq {
            ((tp, self.p.clone()), (tq, self.q.clone()))
        } else {
            ((tq, self.q.clone()), (tp, self.p.clone()))
        }
    }

    /// The union of two segments: a single enclosing segment when they
    /// are collinear and touching or overlapping, a collinear
    /// collection when collinear and disjoint, `None` when the
    /// segments do not share a carrier line. Commutative.
    #[must_use]
    pub fn union_of(a: &Self, b: &Self) -> Option<SegmentUnion> {
        if a.line != b.line {
            return None;
        }
        let (lo_a, hi_a) = a.line_param_range();
        let (lo_b, hi_b) = b.line_param_range_on(&a.line);
        let overlap_lo = if lo_a.0 >= lo_b.0 { &lo_a } else { &lo_b };
        let overlap_hi = if hi_a.0 <= hi_b.0 { &hi_a } else { &hi_b };
        if overlap_lo.0 <= overlap_hi.0 {
            let lo = if lo_a.0 <= lo_b.0 { lo_a.1 } else { lo_b.1 };
            let hi = if hi_a.0 >= hi_b.0 { hi_a.1 } else { hi_b.1 };
            Some(SegmentUnion::Segment(Self {
                line: a.line.clone(),
                p: lo,
                q: hi,
            }))
        } else {
            LineSegmentsCollinear::new(vec![a.clone(), b.clone()])
                .ok()
                .map(SegmentUnion::Collinear)
        }
    }

    /// Squared distance from a point to the segment. Exact.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> Rat {
        let t = self.parameter_of(point);
        let clamped = if t.is_negative() {
            Rat::zero()
        } else if t > Rat::one() {
            Rat::one()
        } else {
            t
        };
        self.point_at(&clamped).distance_squared(point)
    }

    /// Distance from a point to the segment, rounded at `oom`.
    #[must_use]
    pub fn distance(&self, point: &Point, oom: Oom, rm: RoundingMode) -> Rat {
        RatSqrt::non_negative(self.distance_squared(point)).sqrt(oom, rm)
    }

    /// Squared distance between two segments. Exact.
    ///
    /// Zero when they intersect. Otherwise the minimum over the
    /// interior-to-interior closest approach (when it falls inside
    /// both parameter ranges) and the four endpoint-to-segment
    /// distances.
    #[must_use]
    pub fn distance_squared_to_segment(&self, other: &Self) -> Rat {
        let d1 = self.vector();
        let d2 = other.vector();
        let w = other.p.vector_to(&self.p);

        let a = d1.magnitude_squared();
        let b = d1.dot(&d2);
        let c = d2.magnitude_squared();
        let d = d1.dot(&w);
        let e = d2.dot(&w);
        let den = &a * &c - &b * &b;

        let mut best: Option<Rat> = None;
        if !den.is_zero() {
            let t = (&b * &e - &c * &d) / &den;
            let u = (&a * &e - &b * &d) / &den;
            let in_range =
                |x: &Rat| !x.is_negative() && *x <= Rat::one();
            if in_range(&t) && in_range(&u) {
                let pa = self.point_at(&t);
                let pb = other.point_at(&u);
                best = Some(pa.distance_squared(&pb));
            }
        }
        for candidate in [
            self.distance_squared(&other.p),
            self.distance_squared(&other.q),
            other.distance_squared(&self.p),
            other.distance_squared(&self.q),
        ] {
            best = Some(match best {
                Some(b) if b <= candidate => b,
                _ => candidate,
            });
        }
        // The candidate list is never empty.
        best.unwrap_or_else(Rat::zero)
    }

    /// Distance between two segments, rounded at `oom`.
    #[must_use]
    pub fn distance_to_segment(&self, other: &Self, oom: Oom, rm: RoundingMode) -> Rat {
        RatSqrt::non_negative(self.distance_squared_to_segment(other)).sqrt(oom, rm)
    }

    /// The axis-aligned bounding box over the endpoints.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_points([&self.p, &self.q])
    }

    /// Returns the segment translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector) -> Self {
        Self {
            p: self.p.translate(v),
            q: self.q.translate(v),
            line: self.line.translate(v),
        }
    }

    /// Rotates the segment about an axis (see [`Point::rotate`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the supplied `cos θ`/`sin θ` collapse the
    /// segment (only possible for a degenerate pair).
    pub fn rotate(
        &self,
        axis_point: &Point,
        axis_dir: &Vector,
        cos_t: &Rat,
        sin_t: &Rat,
    ) -> Result<Self> {
        Self::new(
            self.p.rotate(axis_point, axis_dir, cos_t, sin_t),
            self.q.rotate(axis_point, axis_dir, cos_t, sin_t),
        )
    }
}

impl PartialEq for LineSegment {
    /// Strict equality: endpoint order matters.
    fn eq(&self, other: &Self) -> bool {
        self.p.coincides(&other.p) && self.q.coincides(&other.q)
    }
}

impl Eq for LineSegment {}
