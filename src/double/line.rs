use crate::error::{GeometryError, Result};

use super::{canonical_direction, Point, Vector3};

/// An infinite line defined by a point and a unit direction vector.
///
/// The parametric form is `P(t) = p + t * v`. The stored direction is
/// canonical (unit length, sign fixed by the first significant
/// component), so two lines through the same pair of points compare
/// equal no matter which two of their points defined them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    p: Point,
    v: Vector3,
}

/// Relationship between two lines.
#[derive(Debug, Clone, PartialEq)]
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
    /// Returns an error if the direction's norm is within `epsilon` of
    /// zero.
    pub fn new(p: Point, direction: &Vector3, epsilon: f64) -> Result<Self> {
        let v = canonical_direction(direction, epsilon).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { p, v })
    }

    /// Creates the line through two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide within `epsilon`.
    pub fn from_points(a: &Point, b: &Point, epsilon: f64) -> Result<Self> {
        let direction = a.vector_to(b);
        if direction.norm() <= epsilon {
            return Err(GeometryError::CoincidentPoints("line").into());
        }
        Self::new(*a, &direction, epsilon)
    }

    /// The x axis.
    #[must_use]
    pub fn x_axis() -> Self {
        Self {
            p: Point::origin(),
            v: Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// The y axis.
    #[must_use]
    pub fn y_axis() -> Self {
        Self {
            p: Point::origin(),
            v: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    /// The z axis.
    #[must_use]
    pub fn z_axis() -> Self {
        Self {
            p: Point::origin(),
            v: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    /// A point on the line.
    #[must_use]
    pub fn point(&self) -> &Point {
        &self.p
    }

    /// The canonical unit direction vector.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.v
    }

    /// The point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        self.p.translate(&(self.v * t))
    }

    /// The parameter of a point assumed to lie on the line.
    #[must_use]
    pub fn parameter_of(&self, point: &Point) -> f64 {
        self.p.vector_to(point).dot(&self.v)
    }

    /// Whether the point lies within `epsilon` of the line.
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        self.distance(point) <= epsilon
    }

    /// Whether the lines' directions are parallel within `epsilon`.
    #[must_use]
    pub fn is_parallel(&self, other: &Self, epsilon: f64) -> bool {
        self.v.cross(&other.v).norm() <= epsilon
    }

    /// Intersects two lines.
    ///
    /// Case order: coincident, parallel-distinct, crossing at a point,
    /// skew. The crossing point is the midpoint of the two closest
    /// points of approach, so the symmetric call yields the same point.
    #[must_use]
    pub fn intersection(&self, other: &Self, epsilon: f64) -> LineLineRelation {
        if self.is_parallel(other, epsilon) {
            return if self.contains(&other.p, epsilon) {
                LineLineRelation::Coincident
            } else {
                LineLineRelation::Parallel
            };
        }

        match self.cross_point(other, epsilon) {
            Some(point) => LineLineRelation::Point(point),
            None => LineLineRelation::Skew,
        }
    }

    /// The crossing point of two non-parallel lines, or `None` when the
    /// closest approach exceeds `epsilon` (skew).
    ///
    /// Closest-approach solve with unit directions: `t = (d − b·e) /
    /// (1 − b²)` and `u = (b·d − e) / (1 − b²)` with `b = v₁·v₂`,
    /// `d = v₁·w`, `e = v₂·w`.
    pub(crate) fn cross_point(&self, other: &Self, epsilon: f64) -> Option<Point> {
        let w = self.p.vector_to(&other.p);
        let b = self.v.dot(&other.v);
        let d = self.v.dot(&w);
        let e = other.v.dot(&w);
        let denom = 1.0 - b * b;

        let t = (d - b * e) / denom;
        let u = (b * d - e) / denom;
        let on_self = self.point_at(t);
        let on_other = other.point_at(u);
        if on_self.coincides(&on_other, epsilon) {
            Some(Point::from_vector(
                (on_self.position().coords + on_other.position().coords) / 2.0,
            ))
        } else {
            None
        }
    }

    /// Squared distance from a point to the line.
    #[must_use]
    pub fn distance_squared(&self, point: &Point) -> f64 {
        self.p.vector_to(point).cross(&self.v).norm_squared()
    }

    /// Distance from a point to the line.
    #[must_use]
    pub fn distance(&self, point: &Point) -> f64 {
        self.distance_squared(point).sqrt()
    }

    /// Distance between two lines: the point-to-line distance for
    /// parallel lines, else the projection of the offset onto the
    /// common normal.
    #[must_use]
    pub fn distance_to_line(&self, other: &Self, epsilon: f64) -> f64 {
        let n = self.v.cross(&other.v);
        let w = self.p.vector_to(&other.p);
        if n.norm() <= epsilon {
            return self.distance(&other.p);
        }
        w.dot(&n).abs() / n.norm()
    }

    /// Returns the line translated by `v`.
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
        Self {
            p: self.p.translate(v),
            v: self.v,
        }
    }

    /// Rotates the line about an axis (see [`Point::rotate`]).
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
        let q = self
            .point_at(1.0)
            .rotate(axis_point, axis_dir, theta, epsilon)?;
        Self::from_points(&p, &q, epsilon)
    }

    /// Line equality within `epsilon`: parallel directions and mutual
    /// point containment.
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

    #[test]
    fn coincident_points_rejected() {
        assert!(Line::from_points(&p(1.0, 2.0, 3.0), &p(1.0, 2.0, 3.0), EPS).is_err());
    }

    #[test]
    fn line_equality_is_independent_of_defining_points() {
        let a = Line::from_points(&p(0.0, 0.0, 0.0), &p(1.0, 1.0, 1.0), EPS).unwrap();
        let b = Line::from_points(&p(2.0, 2.0, 2.0), &p(-3.0, -3.0, -3.0), EPS).unwrap();
        assert!(a.coincides(&b, EPS));
    }

    #[test]
    fn axis_constants_match_constructed_lines() {
        let x = Line::from_points(&p(5.0, 0.0, 0.0), &p(-2.0, 0.0, 0.0), EPS).unwrap();
        assert!(x.coincides(&Line::x_axis(), EPS));
        assert!(!Line::x_axis().coincides(&Line::y_axis(), EPS));
    }

    #[test]
    fn diagonal_meets_vertical_at_unit_corner() {
        let a = Line::from_points(&p(-1.0, -1.0, -1.0), &p(1.0, 1.0, 1.0), EPS).unwrap();
        let b = Line::from_points(&p(1.0, 1.0, 0.0), &p(1.0, 1.0, 2.0), EPS).unwrap();
        let LineLineRelation::Point(x) = a.intersection(&b, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&p(1.0, 1.0, 1.0), 1e-9));
        let LineLineRelation::Point(y) = b.intersection(&a, EPS) else {
            panic!("expected a point");
        };
        assert!(x.coincides(&y, 1e-9));
    }

    #[test]
    fn parallel_and_coincident_cases() {
        let a = Line::from_points(&p(0.0, 0.0, 0.0), &p(1.0, 0.0, 0.0), EPS).unwrap();
        let b = Line::from_points(&p(0.0, 1.0, 0.0), &p(1.0, 1.0, 0.0), EPS).unwrap();
        assert_eq!(a.intersection(&b, EPS), LineLineRelation::Parallel);
        let c = Line::from_points(&p(-7.0, 0.0, 0.0), &p(4.0, 0.0, 0.0), EPS).unwrap();
        assert_eq!(a.intersection(&c, EPS), LineLineRelation::Coincident);
    }

    #[test]
    fn skew_lines_do_not_intersect() {
        let a = Line::x_axis();
        let b = Line::from_points(&p(0.0, 1.0, 1.0), &p(0.0, 2.0, 1.0), EPS).unwrap();
        assert_eq!(a.intersection(&b, EPS), LineLineRelation::Skew);
        assert!((a.distance_to_line(&b, EPS) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn point_distance() {
        let l = Line::x_axis();
        assert!((l.distance(&p(5.0, 3.0, 4.0)) - 5.0).abs() < 1e-9);
        assert!(l.distance_squared(&p(-2.0, 0.0, 0.0)) < EPS);
    }

    #[test]
    fn quarter_turn_maps_x_axis_to_y_axis() {
        let r = Line::x_axis()
            .rotate(
                &Point::origin(),
                &Vector3::new(0.0, 0.0, 1.0),
                std::f64::consts::FRAC_PI_2,
                EPS,
            )
            .unwrap();
        assert!(r.coincides(&Line::y_axis(), 1e-9));
    }

    #[test]
    fn parameterization_round_trip() {
        let l = Line::from_points(&p(1.0, 0.0, 0.0), &p(1.0, 4.0, 0.0), EPS).unwrap();
        let x = l.point_at(1.5);
        assert!((l.parameter_of(&x) - 1.5).abs() < 1e-9);
    }
}
