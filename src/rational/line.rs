use num_traits::Signed;

use crate::error::{GeometryError, Result};
use crate::number::{Oom, Rat, RoundingMode};

use super::{Point, Vector};

/// An infinite line defined by a point and a direction vector.
///
/// The parametric form is `P(t) = p + t * v`. The stored direction is
/// canonical (scaled so its first non-zero component is `1`), so two
/// lines through the same pair of points compare equal no matter which
/// two of their points defined them, and parallelism is plain equality
/// of directions.
#[derive(Debug, Clone)]
pub struct Line {
    p: Point,
    v: Vector,
}

/// Relationship between two lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineLineRelation {
    /// The lines are the same.
    Coincident,
    /// Parallel but distinct; no intersection.
    Parallel,
    /// The lines cross at a single point.
    Point(Point),
    /// Neither parallel nor crossing; no intersection.
    Skew,
}

impl Line {
    /// Creates a line through `p` with the given direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction is the zero vector.
    pub fn new(p: Point, direction: &Vector) -> Result<Self> {
        let v = direction.canonical()?;
        Ok(Self { p, v })
    }

    /// Creates the line through two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn from_points(a: &Point, b: &Point) -> Result<Self> {
        let direction = a.vector_to(b);
        if direction.is_zero() {
            return Err(GeometryError::CoincidentPoints("line").into());
        }
        Self::new(a.clone(), &direction)
    }

    /// The x axis.
    #[must_use]
    pub fn x_axis() -> Self {
        Self {
            p: Point::origin(),
            v: Vector::from_ints(1, 0, 0),
        }
    }

    /// The y axis.
    #[must_use]
    pub fn y_axis() -> Self {
        Self {
            p: Point::origin(),
            v: Vector::from_ints(0, 1, 0),
        }
    }

    /// The z axis.
    #[must_use]
    pub fn z_axis() -> Self {
        Self {
            p: Point::origin(),
            v: Vector::from_ints(0, 0, 1),
        }
    }

    /// A point on the line.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.p
    }

    /// The canonical direction vector.
    #[must_use]
    pub fn direction(&self) -> &Vector {
        &self.v
    }

    /// The point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: &Rat) -> Point {
        self.p.translate(&self.v.scale(t))
    }

    /// The parameter of a point assumed to lie on the line.
    #[must_use]
    pub fn parameter_of(&self, point: &Point) -> Rat {
        self.p.vector_to(point).dot(&self.v) / self.v.magnitude_squared()
    }

    /// Whether the point lies on the line: the vector from `p` to the
    /// candidate is parallel to the direction (zero cross product).
    /// Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.v.cross(&self.p.vector_to(point)).is_zero()
    }

    /// Whether the lines have proportional directions. Exact.
    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        self.v == other.v
    }

    /// Intersects two lines.
    ///
    /// Case order: coincident, parallel-distinct, crossing at a point,
    /// skew. The point solve picks the coordinate pair whose cross
    /// product component has the largest magnitude as its pivot, so
    /// the division is always by the denominator farthest from zero,
    /// then verifies the remaining equation to rule out skew lines.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> LineLineRelation {
        if self.is_parallel(other) {
            return if self.contains(&other.p) {
                LineLineRelation::Coincident
            } else {
                LineLineRelation::Parallel
            };
        }

        match self.cross_point(other) {
            Some(point) => LineLineRelation::Point(point),
            None => LineLineRelation::Skew,
        }
    }

    /// The unique crossing point of two non-parallel lines, or `None`
    /// when they are skew.
    pub(crate) fn cross_point(&self, other: &Self) -> Option<Point> {
        let cross = self.v.cross(&other.v);
        let d = self.p.vector_to(&other.p);
        let (v1, v2) = (&self.v, &other.v);

        // Solve the 2x2 subsystem with the largest pivot; check the
        // held-out coordinate equation afterwards.
        let (cx, cy, cz) = (cross.dx().abs(), cross.dy().abs(), cross.dz().abs());
        let (t, u) = if cz >= cx && cz >= cy {
            solve_pair(
                (d.dx(), d.dy()),
                (v1.dx(), v1.dy()),
                (v2.dx(), v2.dy()),
                cross.dz(),
            )
        } else if cx >= cy {
            solve_pair(
                (d.dy(), d.dz()),
                (v1.dy(), v1.dz()),
                (v2.dy(), v2.dz()),
                cross.dx(),
            )
        } else {
            solve_pair(
                (d.dz(), d.dx()),
                (v1.dz(), v1.dx()),
                (v2.dz(), v2.dx()),
                cross.dy(),
            )
        };

        let on_self = self.point_at(&t);
        let on_other = other.point_at(&u);
        if on_self.coincides(&on_other) {
            Some(on_self)
        } else {
            None
        }
    }

    /// Squared distance from a point to the line,
    /// `|w × v|² / |v|²`. Exact.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> Rat {
        let w = self.p.vector_to(point);
        w.cross(&self.v).magnitude_squared() / self.v.magnitude_squared()
    }

    /// Distance from a point to the line, rounded at `oom`.
    #[must_use]
    pub fn distance(&self, point: &Point, oom: Oom, rm: RoundingMode) -> Rat {
        crate::number::RatSqrt::non_negative(self.distance_squared(point)).sqrt(oom, rm)
    }

    /// Squared distance between two lines. Exact.
    ///
    /// Zero for crossing or coincident lines; the point-to-line
    /// distance for parallel lines; `(w·(v₁×v₂))² / |v₁×v₂|²` for
    /// skew lines.
    #[must_use]
    pub fn distance_squared_to_line(&self, other: &Self) -> Rat {
        if self.is_parallel(other) {
            return self.distance_squared(&other.p);
        }
        let n = self.v.cross(&other.v);
        let w = self.p.vector_to(&other.p);
        let proj = w.dot(&n);
        (&proj * &proj) / n.magnitude_squared()
    }

    /// Distance between two lines, rounded at `oom`.
    #[must_use]
    pub fn distance_to_line(&self, other: &Self, oom: Oom, rm: RoundingMode) -> Rat {
        crate::number::RatSqrt::non_negative(self.distance_squared_to_line(other)).sqrt(oom, rm)
    }

    /// Returns the line translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector) -> Self {
        Self {
            p: self.p.translate(v),
            v: self.v.clone(),
        }
    }

    /// Rotates the line about an axis (see [`Point::rotate`]).
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
        let p = self.p.rotate(axis_point, axis_dir, cos_t, sin_t);
        let v = self.v.rotate(axis_dir, cos_t, sin_t);
        Self::new(p, &v)
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.contains(&other.p)
    }
}

impl Eq for Line {}

/// Cramer's rule on the coordinate pair `(a, b)`: solves
/// `t*v1 - u*v2 = d` given the non-zero determinant
/// `det = v1.a*v2.b - v1.b*v2.a`.
fn solve_pair(
    d: (&Rat, &Rat),
    v1: (&Rat, &Rat),
    v2: (&Rat, &Rat),
    det: &Rat,
) -> (Rat, Rat) {
    let t = (d.0 * v2.1 - d.1 * v2.0) / det;
    let u = (d.0 * v1.1 - d.1 * v1.0) / det;
    (t, u)
}
