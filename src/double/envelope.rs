use super::Point;

/// An axis-aligned bounding box over a set of points.
///
/// Envelopes are recomputed on demand from an entity's points rather
/// than maintained incrementally, and serve only as a fast-reject
/// pre-test: a positive [`Envelope::intersects`] must always be
/// followed by the precise geometric test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    z_min: f64,
    z_max: f64,
}

impl Envelope {
    /// The bounding box of a non-empty set of points.
    ///
    /// An empty iterator yields the degenerate box at the origin.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter
            .next()
            .map_or_else(|| Point::origin().position(), Point::position);
        let mut env = Self {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
            z_min: first.z,
            z_max: first.z,
        };
        for point in iter {
            let pos = point.position();
            env.x_min = env.x_min.min(pos.x);
            env.x_max = env.x_max.max(pos.x);
            env.y_min = env.y_min.min(pos.y);
            env.y_max = env.y_max.max(pos.y);
            env.z_min = env.z_min.min(pos.z);
            env.z_max = env.z_max.max(pos.z);
        }
        env
    }

    /// Lower x bound.
    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Upper x bound.
    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Lower y bound.
    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Upper y bound.
    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Lower z bound.
    #[must_use]
    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    /// Upper z bound.
    #[must_use]
    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// The smallest envelope containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
            z_min: self.z_min.min(other.z_min),
            z_max: self.z_max.max(other.z_max),
        }
    }

    /// Whether the point lies inside or within `epsilon` of the
    /// boundary.
    #[must_use]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        let pos = point.position();
        pos.x >= self.x_min - epsilon
            && pos.x <= self.x_max + epsilon
            && pos.y >= self.y_min - epsilon
            && pos.y <= self.y_max + epsilon
            && pos.z >= self.z_min - epsilon
            && pos.z <= self.z_max + epsilon
    }

    /// Per-axis range overlap, boundaries included within `epsilon`.
    /// A fast reject for the precise intersection tests, never the
    /// final answer.
    #[must_use]
    pub fn intersects(&self, other: &Self, epsilon: f64) -> bool {
        self.x_min <= other.x_max + epsilon
            && other.x_min <= self.x_max + epsilon
            && self.y_min <= other.y_max + epsilon
            && other.y_min <= self.y_max + epsilon
            && self.z_min <= other.z_max + epsilon
            && other.z_min <= self.z_max + epsilon
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
    fn bounds_over_points() {
        let pts = [p(1.0, -2.0, 3.0), p(-1.0, 2.0, 0.0), p(0.0, 0.0, 5.0)];
        let e = Envelope::from_points(pts.iter());
        assert_eq!(e.x_min(), -1.0);
        assert_eq!(e.x_max(), 1.0);
        assert_eq!(e.y_min(), -2.0);
        assert_eq!(e.y_max(), 2.0);
        assert_eq!(e.z_min(), 0.0);
        assert_eq!(e.z_max(), 5.0);
    }

    #[test]
    fn contains_boundary_and_interior() {
        let e = Envelope::from_points([&p(0.0, 0.0, 0.0), &p(2.0, 2.0, 2.0)]);
        assert!(e.contains(&p(0.0, 0.0, 0.0), EPS));
        assert!(e.contains(&p(1.0, 1.0, 1.0), EPS));
        assert!(!e.contains(&p(3.0, 1.0, 1.0), EPS));
    }

    #[test]
    fn union_covers_both() {
        let a = Envelope::from_points([&p(0.0, 0.0, 0.0), &p(1.0, 1.0, 1.0)]);
        let b = Envelope::from_points([&p(4.0, 4.0, 4.0), &p(5.0, 5.0, 5.0)]);
        assert!(a.union(&b).contains(&p(3.0, 3.0, 3.0), EPS));
    }

    #[test]
    fn overlap_tests_each_axis() {
        let a = Envelope::from_points([&p(0.0, 0.0, 0.0), &p(2.0, 2.0, 2.0)]);
        let b = Envelope::from_points([&p(2.0, 2.0, 2.0), &p(4.0, 4.0, 4.0)]);
        let c = Envelope::from_points([&p(3.0, 0.0, 0.0), &p(4.0, 1.0, 1.0)]);
        assert!(a.intersects(&b, EPS)); // touch at a corner
        assert!(!a.intersects(&c, EPS)); // separated on x
        assert!(!b.intersects(&c, EPS)); // x ranges overlap, y ranges do not
        let d = Envelope::from_points([&p(3.0, 2.0, 2.0), &p(4.0, 3.0, 3.0)]);
        assert!(b.intersects(&d, EPS));
    }
}
