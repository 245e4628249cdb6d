use crate::number::Rat;

use super::{Point, Vector};

/// An axis-aligned bounding box over a set of points.
///
/// Envelopes are recomputed on demand from an entity's points rather
/// than maintained incrementally, and serve only as a fast-reject
/// pre-test: a positive [`Envelope::intersects`] must always be
/// followed by the precise geometric test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    x_min: Rat,
    x_max: Rat,
    y_min: Rat,
    y_max: Rat,
    z_min: Rat,
    z_max: Rat,
}

impl Envelope {
    /// The bounding box of a non-empty set of points.
    ///
    /// The implementation accepts any iterator of point references;
    /// an empty iterator yields the degenerate box at the origin.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter
            .next()
            .map_or_else(Vector::zero, Point::position);
        let mut env = Self::at(&first);
        for point in iter {
            env = env.expanded_to(&point.position());
        }
        env
    }

    fn at(position: &Vector) -> Self {
        Self {
            x_min: position.dx().clone(),
            x_max: position.dx().clone(),
            y_min: position.dy().clone(),
            y_max: position.dy().clone(),
            z_min: position.dz().clone(),
            z_max: position.dz().clone(),
        }
    }

    fn expanded_to(self, position: &Vector) -> Self {
        Self {
            x_min: self.x_min.min(position.dx().clone()),
            x_max: self.x_max.max(position.dx().clone()),
            y_min: self.y_min.min(position.dy().clone()),
            y_max: self.y_max.max(position.dy().clone()),
            z_min: self.z_min.min(position.dz().clone()),
            z_max: self.z_max.max(position.dz().clone()),
        }
    }

    /// Lower x bound.
    #[must_use]
    pub fn x_min(&self) -> &Rat {
        &self.x_min
    }

    /// Upper x bound.
    #[must_use]
    pub fn x_max(&self) -> &Rat {
        &self.x_max
    }

    /// Lower y bound.
    #[must_use]
    pub fn y_min(&self) -> &Rat {
        &self.y_min
    }

    /// Upper y bound.
    #[must_use]
    pub fn y_max(&self) -> &Rat {
        &self.y_max
    }

    /// Lower z bound.
    #[must_use]
    pub fn z_min(&self) -> &Rat {
        &self.z_min
    }

    /// Upper z bound.
    #[must_use]
    pub fn z_max(&self) -> &Rat {
        &self.z_max
    }

    /// The smallest envelope containing both. Exact.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.clone().min(other.x_min.clone()),
            x_max: self.x_max.clone().max(other.x_max.clone()),
            y_min: self.y_min.clone().min(other.y_min.clone()),
            y_max: self.y_max.clone().max(other.y_max.clone()),
            z_min: self.z_min.clone().min(other.z_min.clone()),
            z_max: self.z_max.clone().max(other.z_max.clone()),
        }
    }

    /// Whether the point lies inside or on the boundary. Exact.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        let pos = point.position();
        *pos.dx() >= self.x_min
            && *pos.dx() <= self.x_max
            && *pos.dy() >= self.y_min
            && *pos.dy() <= self.y_max
            && *pos.dz() >= self.z_min
            && *pos.dz() <= self.z_max
    }

    /// Per-axis range overlap, boundaries included. A fast reject for
    /// the exact intersection tests, never the final answer.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
            && self.z_min <= other.z_max
            && other.z_min <= self.z_max
    }
}
