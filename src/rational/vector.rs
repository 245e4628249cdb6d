use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{Signed, Zero};

use crate::error::{GeometryError, Result};
use crate::number::{round_rat, Oom, Rat, RatSqrt, RoundingMode};

/// A free 3-component direction/offset with exact rational components.
///
/// All of the vector algebra (addition, scaling, dot and cross
/// products, squared magnitude) stays inside ℚ and is exact; only the
/// magnitude itself and unit vectors may require a square root, which
/// is deferred through [`RatSqrt`] and rounded at the caller's
/// requested order of magnitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    dx: Rat,
    dy: Rat,
    dz: Rat,
}

impl Vector {
    /// Creates a vector from its components.
    #[must_use]
    pub fn new(dx: Rat, dy: Rat, dz: Rat) -> Self {
        Self { dx, dy, dz }
    }

    /// Creates a vector from integer components.
    #[must_use]
    pub fn from_ints(dx: i64, dy: i64, dz: i64) -> Self {
        Self::new(
            Rat::from_integer(dx.into()),
            Rat::from_integer(dy.into()),
            Rat::from_integer(dz.into()),
        )
    }

    /// The zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_ints(0, 0, 0)
    }

    /// The x component.
    #[must_use]
    pub fn dx(&self) -> &Rat {
        &self.dx
    }

    /// The y component.
    #[must_use]
    pub fn dy(&self) -> &Rat {
        &self.dy
    }

    /// The z component.
    #[must_use]
    pub fn dz(&self) -> &Rat {
        &self.dz
    }

    /// Whether every component is zero. Exact.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx.is_zero() && self.dy.is_zero() && self.dz.is_zero()
    }

    /// Scales by a rational factor. Exact.
    #[must_use]
    pub fn scale(&self, s: &Rat) -> Self {
        Self::new(&self.dx * s, &self.dy * s, &self.dz * s)
    }

    /// Dot product. Exact.
    #[must_use]
    pub fn dot(&self, other: &Self) -> Rat {
        &self.dx * &other.dx + &self.dy * &other.dy + &self.dz * &other.dz
    }

    /// Cross product. Exact.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            &self.dy * &other.dz - &self.dz * &other.dy,
            &self.dz * &other.dx - &self.dx * &other.dz,
            &self.dx * &other.dy - &self.dy * &other.dx,
        )
    }

    /// Squared magnitude, always an exact rational.
    #[must_use]
    pub fn magnitude_squared(&self) -> Rat {
        self.dot(self)
    }

    /// Magnitude as a lazy square root; no precision is committed
    /// until the caller rounds it.
    #[must_use]
    pub fn magnitude(&self) -> RatSqrt {
        RatSqrt::non_negative(self.magnitude_squared())
    }

    /// Whether `other` is a (non-zero) scalar multiple of `self`. Exact.
    #[must_use]
    pub fn is_scalar_multiple(&self, other: &Self) -> bool {
        !self.is_zero() && !other.is_zero() && self.cross(other).is_zero()
    }

    /// A canonical representative of this vector's line direction: the
    /// vector scaled so its first non-zero component is `1`.
    ///
    /// Two vectors are scalar multiples of one another (either sign)
    /// iff their canonical forms are equal, so this is the equality
    /// key for undirected entities (lines, plane normals).
    ///
    /// # Errors
    ///
    /// Returns an error for the zero vector.
    pub fn canonical(&self) -> Result<Self> {
        let pivot = self.first_non_zero().ok_or(GeometryError::ZeroVector)?;
        Ok(self.scale(&pivot.recip()))
    }

    /// Like [`Vector::canonical`], but preserves orientation: scaled by
    /// the reciprocal of the *absolute value* of the first non-zero
    /// component, so the result's first non-zero component is `±1`.
    ///
    /// This is the equality key for directed entities (rays).
    ///
    /// # Errors
    ///
    /// Returns an error for the zero vector.
    pub fn canonical_directed(&self) -> Result<Self> {
        let pivot = self.first_non_zero().ok_or(GeometryError::ZeroVector)?;
        Ok(self.scale(&pivot.abs().recip()))
    }

    fn first_non_zero(&self) -> Option<Rat> {
        [&self.dx, &self.dy, &self.dz]
            .into_iter()
            .find(|c| !c.is_zero())
            .cloned()
    }

    /// The unit vector in this direction, with components rounded at
    /// `oom` under `rm`.
    ///
    /// The magnitude root is taken two orders finer than requested so
    /// that only the final reported division is rounded at `oom`.
    ///
    /// # Errors
    ///
    /// Returns an error for the zero vector.
    pub fn unit_vector(&self, oom: Oom, rm: RoundingMode) -> Result<Self> {
        if self.is_zero() {
            return Err(GeometryError::ZeroVector.into());
        }
        let m = self.magnitude().sqrt(oom - 2, rm);
        Ok(Self::new(
            round_rat(&(&self.dx / &m), oom, rm),
            round_rat(&(&self.dy / &m), oom, rm),
            round_rat(&(&self.dz / &m), oom, rm),
        ))
    }

    /// Rodrigues rotation about the unit axis `k` given exact rational
    /// `cos θ` and `sin θ`.
    ///
    /// `v' = v cosθ + (k×v) sinθ + k (k·v)(1 − cosθ)`. The algebra is
    /// exact over the supplied cosine and sine, so quarter-turn
    /// rotations (`cos = 0, sin = ±1`) are exact end to end.
    #[must_use]
    pub fn rotate(&self, axis: &Self, cos_t: &Rat, sin_t: &Rat) -> Self {
        let one_minus_cos = Rat::from_integer(1.into()) - cos_t;
        let term1 = self.scale(cos_t);
        let term2 = axis.cross(self).scale(sin_t);
        let term3 = axis.scale(&(axis.dot(self) * one_minus_cos));
        &(&term1 + &term2) + &term3
    }

    /// Rodrigues rotation by an angle in radians.
    ///
    /// `cos θ` and `sin θ` are irrational in general, so they are
    /// taken from floating point and rounded at `oom` before the
    /// (then exact) rotation algebra is applied, and the axis is
    /// normalized at the same precision.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis is the zero vector.
    pub fn rotate_angle(&self, axis: &Self, theta: f64, oom: Oom, rm: RoundingMode) -> Result<Self> {
        let k = axis.unit_vector(oom, rm)?;
        let cos_t = rat_from_f64(theta.cos(), oom, rm);
        let sin_t = rat_from_f64(theta.sin(), oom, rm);
        Ok(self.rotate(&k, &cos_t, &sin_t))
    }
}

/// Converts a float to a rational rounded at `oom`; non-finite input
/// collapses to zero.
fn rat_from_f64(x: f64, oom: Oom, rm: RoundingMode) -> Rat {
    Rat::from_float(x).map_or_else(Rat::zero, |r| round_rat(&r, oom, rm))
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Vector {
        Vector::new(&self.dx + &rhs.dx, &self.dy + &rhs.dy, &self.dz + &rhs.dz)
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Vector {
        Vector::new(&self.dx - &rhs.dx, &self.dy - &rhs.dy, &self.dz - &rhs.dz)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-&self.dx, -&self.dy, -&self.dz)
    }
}

impl Mul<&Rat> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: &Rat) -> Vector {
        self.scale(rhs)
    }
}
