use crate::number::{round_rat, Oom, Rat, RatSqrt, RoundingMode};

use super::Vector;

/// A position in 3D space, held as a translation `offset` plus a
/// `rel` vector; the absolute position is their (exact) sum.
///
/// Keeping the two parts separate lets a whole constellation of points
/// share one translation: translating an entity adds to each point's
/// offset and leaves the relative geometry untouched.
#[derive(Debug, Clone)]
pub struct Point {
    offset: Vector,
    rel: Vector,
}

impl Point {
    /// Creates a point from an offset and a relative vector.
    #[must_use]
    pub fn new(offset: Vector, rel: Vector) -> Self {
        Self { offset, rel }
    }

    /// Creates a point at the given absolute position (zero offset).
    #[must_use]
    pub fn from_vector(rel: Vector) -> Self {
        Self::new(Vector::zero(), rel)
    }

    /// Creates a point from integer absolute coordinates.
    #[must_use]
    pub fn from_ints(x: i64, y: i64, z: i64) -> Self {
        Self::from_vector(Vector::from_ints(x, y, z))
    }

    /// The origin.
    #[must_use]
    pub fn origin() -> Self {
        Self::from_ints(0, 0, 0)
    }

    /// The translation part.
    #[must_use]
    pub fn offset(&self) -> &Vector {
        &self.offset
    }

    /// The relative part.
    #[must_use]
    pub fn rel(&self) -> &Vector {
        &self.rel
    }

    /// The absolute position, `offset + rel`. Exact.
    #[must_use]
    pub fn position(&self) -> Vector {
        &self.offset + &self.rel
    }

    /// The exact vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Self) -> Vector {
        &other.position() - &self.position()
    }

    /// Exact positional equality, independent of how the position is
    /// split between offset and relative parts.
    #[must_use]
    pub fn coincides(&self, other: &Self) -> bool {
        self.vector_to(other).is_zero()
    }

    /// Equality at a precision: absolute positions are rounded to
    /// `10^oom` under `rm` and then compared component-wise.
    #[must_use]
    pub fn equals(&self, other: &Self, oom: Oom, rm: RoundingMode) -> bool {
        let a = self.position();
        let b = other.position();
        round_rat(a.dx(), oom, rm) == round_rat(b.dx(), oom, rm)
            && round_rat(a.dy(), oom, rm) == round_rat(b.dy(), oom, rm)
            && round_rat(a.dz(), oom, rm) == round_rat(b.dz(), oom, rm)
    }

    /// Returns the point translated by `v` (added to the offset).
    #[must_use]
    pub fn translate(&self, v: &Vector) -> Self {
        Self::new(&self.offset + v, self.rel.clone())
    }

    /// Squared distance to another point. Exact.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> Rat {
        self.vector_to(other).magnitude_squared()
    }

    /// Distance to another point as a lazy root.
    #[must_use]
    pub fn distance_sqrt(&self, other: &Self) -> RatSqrt {
        RatSqrt::non_negative(self.distance_squared(other))
    }

    /// Distance to another point, rounded at `oom` under `rm`.
    #[must_use]
    pub fn distance(&self, other: &Self, oom: Oom, rm: RoundingMode) -> Rat {
        self.distance_sqrt(other).sqrt(oom, rm)
    }

    /// Rotates about an axis through the origin of the axis line, with
    /// exact rational `cos θ` / `sin θ` (see [`Vector::rotate`]).
    ///
    /// `axis_point` is a point on the axis and `axis_dir` its unit
    /// direction; the point is expressed relative to the axis, rotated,
    /// and re-expressed absolutely.
    #[must_use]
    pub fn rotate(&self, axis_point: &Self, axis_dir: &Vector, cos_t: &Rat, sin_t: &Rat) -> Self {
        let local = axis_point.vector_to(self);
        let rotated = local.rotate(axis_dir, cos_t, sin_t);
        Self::new(axis_point.position(), rotated)
    }
}

impl PartialEq for Point {
    /// Positional equality (see [`Point::coincides`]): the same
    /// absolute position, however it is split between offset and
    /// relative parts.
    fn eq(&self, other: &Self) -> bool {
        self.coincides(other)
    }
}

impl Eq for Point {}
