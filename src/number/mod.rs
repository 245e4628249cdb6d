mod sqrt;

pub use sqrt::RatSqrt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Arbitrary-precision rational number.
pub type Rat = num_rational::BigRational;

/// Order of magnitude: an integer exponent of 10 naming the coarsest
/// unit of precision a rounded result must be accurate to.
///
/// `oom = -3` means "accurate to the nearest 0.001"; `oom = 2` means
/// "accurate to the nearest 100".
pub type Oom = i32;

/// Rounding mode applied when a rational must be truncated to a
/// requested [`Oom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Toward zero.
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To nearest; ties away from zero.
    HalfUp,
    /// To nearest; ties toward zero.
    HalfDown,
    /// To nearest; ties to the even neighbour.
    HalfEven,
}

/// Builds a rational from an integer numerator and denominator.
///
/// # Panics
///
/// Panics if `d` is zero.
#[must_use]
pub fn rat(n: i64, d: i64) -> Rat {
    Rat::new(BigInt::from(n), BigInt::from(d))
}

/// Builds a rational from an integer.
#[must_use]
pub fn rat_int(n: i64) -> Rat {
    Rat::from_integer(BigInt::from(n))
}

/// Returns `10^oom` as a rational (exact for negative exponents too).
#[must_use]
pub fn ten_pow(oom: Oom) -> Rat {
    let p = BigInt::from(10).pow(oom.unsigned_abs());
    if oom >= 0 {
        Rat::from_integer(p)
    } else {
        Rat::new(BigInt::one(), p)
    }
}

/// Rounds `x` to the nearest multiple of `10^oom` under `rm`.
///
/// The rounding is exact rational arithmetic throughout; no precision
/// beyond the requested order of magnitude is retained.
#[must_use]
pub fn round_rat(x: &Rat, oom: Oom, rm: RoundingMode) -> Rat {
    let unit = ten_pow(oom);
    round_to_integer(&(x / &unit), rm) * unit
}

/// Rounds a rational to a whole integer (as a rational) under `rm`.
#[must_use]
pub fn round_to_integer(x: &Rat, rm: RoundingMode) -> Rat {
    if x.is_integer() {
        return x.clone();
    }
    let floor = x.floor();
    let frac = x - &floor;
    debug_assert!(frac.is_positive());

    let up = match rm {
        RoundingMode::Ceiling => true,
        RoundingMode::Floor => false,
        RoundingMode::Up => x.is_positive(),
        RoundingMode::Down => x.is_negative(),
        RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
            let twice = &frac + &frac;
            if twice > Rat::one() {
                true
            } else if twice < Rat::one() {
                false
            } else {
                match rm {
                    RoundingMode::HalfUp => x.is_positive(),
                    RoundingMode::HalfDown => x.is_negative(),
                    // HalfEven: round up iff the floor is odd.
                    _ => (floor.to_integer() % 2i32) != BigInt::zero(),
                }
            }
        }
    };

    if up {
        floor + Rat::one()
    } else {
        floor
    }
}
