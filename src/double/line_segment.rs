use crate::error::Result;

use super::{Envelope, Line, LineSegmentsCollinear, Point, Vector3};

/// A bounded segment of a line between two endpoint points.
///
/// Endpoint order is not significant for the geometry of the segment
/// but is preserved: it drives directional operations and strict
/// equality.
#[derive(Debug, Clone, Copy, PartialEq)]
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
    /// Returns an error if the points coincide within `epsilon`.
    pub fn new(p: Point, q: Point, epsilon: f64) -> Result<Self> {
        let line = Line::from_points(&p, &q, epsilon)?;
        Ok(Self { p, q, line })
    }

    /// Creates a segment between two coordinate triples.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide within `epsilon`.
    pub fn from_coords(p: (f64, f64, f64), q: (f64, f64, f64), epsilon: f64) -> Result<Self> {
        Self::new(
            Point::from_coords(p.0, p.1, p.2),
            Point::from_coords(q.0, q.1, q.2),
            epsilon,
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

    /// The segment vector `q - p`.
    #[must_use]
    pub fn vector(&self) -> Vector3 {
        self.p.vector_to(&self.q)
    }

    /// Squared length.
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.p.distance_squared(&self.q)
    }

    /// Length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.p.distance(&self.q)
    }

    /// The midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.p.translate(&(self.vector() / 2.0))
    }

    /// Parameter of a point assumed on the carrier line, scaled so the
    /// segment spans `[0, 1]` from `p` to `q`.
    #[must_use]
    pub fn parameter_of(&self, point: &Point) -> f64 {
        let v = self.vector();
        self.p.vector_to(point).dot(&v) / v.norm_squared()
    }

    /// The point at segment parameter `t` (0 at `p`, 1 at `q`).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        self.p.translate(&(self.vector() * t))
    }

    /// Whether the point lies within `epsilon` of the segment
    /// (endpoints included).
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        self.distance(point) <= epsilon
    }

    /// Geometric equality within `epsilon` that ignores endpoint
    /// order.
    #[must_use]
    pub fn equals_ignore_direction(&self, other: &Self, epsilon: f64) -> bool {
        (self.p.coincides(&other.p, epsilon) && self.q.coincides(&other.q, epsilon))
            || (self.p.coincides(&other.q, epsilon) && self.q.coincides(&other.p, epsilon))
    }

    /// Returns the segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            p: self.q,
            q: self.p,
            line: self.line,
        }
    }

    /// Intersects two segments; the same case analysis as the exact
    /// model, with `epsilon` deciding coincidence and containment.
    #[must_use]
    pub fn intersection(&self, other: &Self, epsilon: f64) -> SegmentSegmentRelation {
        if self.line.coincides(other.line(), epsilon) {
            return self.collinear_intersection(other, epsilon);
        }
        if self.line.is_parallel(other.line(), epsilon) {
            return SegmentSegmentRelation::Disjoint;
        }
        match self.line.cross_point(other.line(), epsilon) {
            Some(x) if self.contains(&x, epsilon) && other.contains(&x, epsilon) => {
                SegmentSegmentRelation::Point(x)
            }
            _ => SegmentSegmentRelation::Disjoint,
        }
    }

    fn collinear_intersection(&self, other: &Self, epsilon: f64) -> SegmentSegmentRelation {
        let (lo_a, hi_a) = self.line_param_range_on(&self.line);
        let (lo_b, hi_b) = other.line_param_range_on(&self.line);
        let lo = if lo_a.0 >= lo_b.0 { lo_a } else { lo_b };
        let hi = if hi_a.0 <= hi_b.0 { hi_a } else { hi_b };
        if hi.0 - lo.0 > epsilon {
            SegmentSegmentRelation::Segment(Self {
                line: self.line,
                p: lo.1,
                q: hi.1,
            })
        } else if hi.0 - lo.0 >= -epsilon {
            SegmentSegmentRelation::Point(lo.1)
        } else {
            match LineSegmentsCollinear::new(vec![*self, *other], epsilon) {
                Ok(c) => SegmentSegmentRelation::CollinearDisjoint(c),
                // Unreachable: carrier lines were just compared equal.
                Err(_) => SegmentSegmentRelation::Disjoint,
            }
        }
    }

    /// Endpoints tagged by their parameter along `line` (assumed to
    /// coincide with the carrier), ordered low to high, so ranges from
    /// both segments share a scale.
    fn line_param_range_on(&self, line: &Line) -> ((f64, Point), (f64, Point)) {
        let tp = line.parameter_of(&self.p);
        let tq = line.parameter_of(&self.q);
        if tp <= tq {
            ((tp, self.p), (tq, self.q))
        } else {
            ((tq, self.q), (tp, self.p))
        }
    }

    /// The union of two segments: a single enclosing segment when they
    /// are collinear and touching or overlapping, a collinear
    /// collection when collinear and disjoint, `None` when the
    /// segments do not share a carrier line. Commutative.
    #[must_use]
    pub fn union_of(a: &Self, b: &Self, epsilon: f64) -> Option<SegmentUnion> {
        if !a.line.coincides(b.line(), epsilon) {
            return None;
        }
        let (lo_a, hi_a) = a.line_param_range_on(&a.line);
        let (lo_b, hi_b) = b.line_param_range_on(&a.line);
        let overlap_lo = if lo_a.0 >= lo_b.0 { &lo_a } else { &lo_b };
        let overlap_hi = if hi_a.0 <= hi_b.0 { &hi_a } else { &hi_b };
        if overlap_lo.0 - overlap_hi.0 <= epsilon {
            let lo = if lo_a.0 <= lo_b.0 { lo_a.1 } else { lo_b.1 };
            let hi = if hi_a.0 >= hi_b.0 { hi_a.1 } else { hi_b.1 };
            Some(SegmentUnion::Segment(Self {
                line: a.line,
                p: lo,
                q: hi,
            }))
        } else {
            LineSegmentsCollinear::new(vec![*a, *b], epsilon)
                .ok()
                .map(SegmentUnion::Collinear)
        }
    }

    /// Squared distance from a point to the segment (parameter clamped
    /// to `[0, 1]`).
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> f64 {
        let t = self.parameter_of(point).clamp(0.0, 1.0);
        self.point_at(t).distance_squared(point)
    }

    /// Distance from a point to the segment.
    #[must_use]
    pub fn distance(&self, point: &Point) -> f64 {
        self.distance_squared(point).sqrt()
    }

    /// Squared distance between two segments: the interior closest
    /// approach when it falls inside both parameter ranges, else the
    /// best of the four endpoint-to-segment distances.
    #[must_use]
    pub fn distance_squared_to_segment(&self, other: &Self) -> f64 {
        let d1 = self.vector();
        let d2 = other.vector();
        let w = other.p.vector_to(&self.p);

        let a = d1.norm_squared();
        let b = d1.dot(&d2);
        let c = d2.norm_squared();
        let d = d1.dot(&w);
        let e = d2.dot(&w);
        let den = a * c - b * b;

        let mut best = f64::INFINITY;
        if den != 0.0 {
            let t = (b * e - c * d) / den;
            let u = (a * e - b * d) / den;
            if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
                best = self.point_at(t).distance_squared(&other.point_at(u));
            }
        }
        for candidate in [
            self.distance_squared(&other.p),
            self.distance_squared(&other.q),
            other.distance_squared(&self.p),
            other.distance_squared(&self.q),
        ] {
            if candidate < best {
                best = candidate;
            }
        }
        best
    }

    /// Distance between two segments.
    #[must_use]
    pub fn distance_to_segment(&self, other: &Self) -> f64 {
        self.distance_squared_to_segment(other).sqrt()
    }

    /// The axis-aligned bounding box over the endpoints.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_points([&self.p, &self.q])
    }

    /// Returns the segment translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
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
    /// Returns an error if the axis direction is zero within `epsilon`.
    pub fn rotate(
        &self,
        axis_point: &Point,
        axis_dir: &Vector3,
        theta: f64,
        epsilon: f64,
    ) -> Result<Self> {
        Self::new(
            self.p.rotate(axis_point, axis_dir, theta, epsilon)?,
            self.q.rotate(axis_point, axis_dir, theta, epsilon)?,
            epsilon,
        )
    }
}
