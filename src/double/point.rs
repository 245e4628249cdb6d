use nalgebra::{Rotation3, Unit};

use crate::error::{GeometryError, Result};

use super::{Point3, Vector3};

/// A position in 3D space, held as a translation `offset` plus a `rel`
/// vector; the absolute position is their sum.
///
/// The floating-point counterpart of the exact model's point: the same
/// offset/relative split, with `f64` components.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    offset: Vector3,
    rel: Vector3,
}

impl Point {
    /// Creates a point from an offset and a relative vector.
    #[must_use]
    pub fn new(offset: Vector3, rel: Vector3) -> Self {
        Self { offset, rel }
    }

    /// Creates a point at the given absolute position (zero offset).
    #[must_use]
    pub fn from_vector(rel: Vector3) -> Self {
        Self::new(Vector3::zeros(), rel)
    }

    /// Creates a point from absolute coordinates.
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::from_vector(Vector3::new(x, y, z))
    }

    /// The origin.
    #[must_use]
    pub fn origin() -> Self {
        Self::from_coords(0.0, 0.0, 0.0)
    }

    /// The translation part.
    #[must_use]
    pub fn offset(&self) -> &Vector3 {
        &self.offset
    }

    /// The relative part.
    #[must_use]
    pub fn rel(&self) -> &Vector3 {
        &self.rel
    }

    /// The absolute position, `offset + rel`.
    #[must_use]
    pub fn position(&self) -> Point3 {
        Point3::from(self.offset + self.rel)
    }

    /// The vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Self) -> Vector3 {
        other.position() - self.position()
    }

    /// Positional equality within `epsilon`, independent of how the
    /// position is split between offset and relative parts.
    #[must_use]
    pub fn coincides(&self, other: &Self, epsilon: f64) -> bool {
        self.vector_to(other).norm() <= epsilon
    }

    /// Returns the point translated by `v` (added to the offset).
    #[must_use]
    pub fn translate(&self, v: &Vector3) -> Self {
        Self::new(self.offset + v, self.rel)
    }

    /// Squared distance to another point.
    #[must_use]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        self.vector_to(other).norm_squared()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.vector_to(other).norm()
    }

    /// Rotates about the axis through `axis_point` with direction
    /// `axis_dir` by `theta` radians; the point is expressed relative
    /// to the axis, rotated, and re-expressed absolutely.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction's norm is within
    /// `epsilon` of zero.
    pub fn rotate(
        &self,
        axis_point: &Self,
        axis_dir: &Vector3,
        theta: f64,
        epsilon: f64,
    ) -> Result<Self> {
        let axis = Unit::try_new(*axis_dir, epsilon).ok_or(GeometryError::ZeroVector)?;
        let rot = Rotation3::from_axis_angle(&axis, theta);
        let local = axis_point.vector_to(self);
        Ok(Self::new(axis_point.position().coords, rot * local))
    }
}

impl PartialEq for Point {
    /// Positional equality (bitwise on the summed coordinates): the
    /// same absolute position, however it is split between offset and
    /// relative parts. Computed positions still want
    /// [`Point::coincides`] with a tolerance.
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}
