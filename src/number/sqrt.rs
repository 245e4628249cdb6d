use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{NumberError, Result};

use super::{ten_pow, Oom, Rat, RoundingMode};

/// A lazy, precision-bounded rational square root.
///
/// Pairs a non-negative rational radicand with an on-demand rounded
/// approximation of its square root. The approximation is computed only
/// to the order of magnitude a caller asks for and cached per request;
/// the exact root is materialized only when the radicand is a perfect
/// rational square.
///
/// A `RatSqrt` carries a sign so that plain rationals embed losslessly
/// via [`RatSqrt::from_rat`]: the represented value is
/// `±sqrt(radicand)`.
#[derive(Clone)]
pub struct RatSqrt {
    /// Non-negative radicand; the represented value is `±sqrt(x)`.
    x: Rat,
    negative: bool,
    /// Unsigned exact root, when `x` is a perfect rational square.
    exact: Option<Rat>,
    /// Most recent rounded approximation, keyed by the request.
    cache: RefCell<Option<((Oom, RoundingMode), Rat)>>,
}

impl RatSqrt {
    /// Creates the square root of a non-negative rational.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is negative.
    pub fn new(x: Rat) -> Result<Self> {
        if x.is_negative() {
            return Err(NumberError::NegativeRadicand(x.to_string()).into());
        }
        let exact = exact_root(&x);
        Ok(Self {
            x,
            negative: false,
            exact,
            cache: RefCell::new(None),
        })
    }

    /// Creates the square root of a rational known to be non-negative
    /// (a squared magnitude, a sum of squares).
    ///
    /// # Panics
    ///
    /// Debug-asserts on a negative radicand; callers own the
    /// non-negativity argument.
    #[must_use]
    pub fn non_negative(x: Rat) -> Self {
        debug_assert!(!x.is_negative());
        let exact = exact_root(&x);
        Self {
            x,
            negative: false,
            exact,
            cache: RefCell::new(None),
        }
    }

    /// Embeds a rational `r` as the (exact) square root of `r²`,
    /// keeping its sign.
    #[must_use]
    pub fn from_rat(r: &Rat) -> Self {
        Self {
            x: r * r,
            negative: r.is_negative(),
            exact: Some(r.abs()),
            cache: RefCell::new(None),
        }
    }

    /// The non-negative radicand.
    #[must_use]
    pub fn radicand(&self) -> &Rat {
        &self.x
    }

    /// The square of the represented value. Identical to the radicand;
    /// named for call sites comparing squared magnitudes.
    #[must_use]
    pub fn squared(&self) -> &Rat {
        &self.x
    }

    /// Whether the root is exactly representable as a rational.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.exact.is_some()
    }

    /// The exact signed value, when the radicand is a perfect square.
    #[must_use]
    pub fn exact_value(&self) -> Option<Rat> {
        self.exact.as_ref().map(|r| self.signed(r.clone()))
    }

    /// The signed root, rounded to a multiple of `10^oom` under `rm`.
    ///
    /// Exact roots are returned unrounded (they are within every order
    /// of magnitude of themselves). Approximations are cached per
    /// `(oom, rm)` request, so repeated queries at one precision do not
    /// recompute, and finer precision than requested is never produced.
    #[must_use]
    pub fn sqrt(&self, oom: Oom, rm: RoundingMode) -> Rat {
        if let Some(exact) = &self.exact {
            return self.signed(exact.clone());
        }
        if let Some(((c_oom, c_rm), value)) = self.cache.borrow().as_ref() {
            if *c_oom == oom && *c_rm == rm {
                return value.clone();
            }
        }
        let value = self.signed(approx_root(&self.x, oom, magnitude_mode(rm, self.negative)));
        *self.cache.borrow_mut() = Some(((oom, rm), value.clone()));
        value
    }

    fn signed(&self, magnitude: Rat) -> Rat {
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    fn sign(&self) -> i8 {
        if self.x.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }
}

impl fmt::Debug for RatSqrt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatSqrt")
            .field("radicand", &self.x)
            .field("negative", &self.negative)
            .finish()
    }
}

impl PartialEq for RatSqrt {
    fn eq(&self, other: &Self) -> bool {
        self.sign() == other.sign() && self.x == other.x
    }
}

impl Eq for RatSqrt {}

impl PartialOrd for RatSqrt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RatSqrt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal => {
                let by_radicand = self.x.cmp(&other.x);
                if self.sign() < 0 {
                    by_radicand.reverse()
                } else {
                    by_radicand
                }
            }
            unequal => unequal,
        }
    }
}

/// The exact rational root of `x`, when numerator and denominator are
/// both perfect squares.
fn exact_root(x: &Rat) -> Option<Rat> {
    let rn = x.numer().sqrt();
    if &rn * &rn != *x.numer() {
        return None;
    }
    let rd = x.denom().sqrt();
    if &rd * &rd != *x.denom() {
        return None;
    }
    Some(Rat::new(rn, rd))
}

/// Maps a signed rounding mode onto the rounding direction to apply to
/// the magnitude of a value with the given sign.
fn magnitude_mode(rm: RoundingMode, negative: bool) -> RoundingMode {
    match rm {
        RoundingMode::Up => RoundingMode::Ceiling,
        RoundingMode::Down => RoundingMode::Floor,
        RoundingMode::Ceiling if negative => RoundingMode::Floor,
        RoundingMode::Floor if negative => RoundingMode::Ceiling,
        RoundingMode::HalfUp => RoundingMode::HalfUp,
        RoundingMode::HalfDown => RoundingMode::HalfDown,
        other => other,
    }
}

/// `sqrt(x)` for non-negative `x`, rounded to a multiple of `10^oom`.
///
/// `rm` here is a magnitude-space mode: `Ceiling` rounds the magnitude
/// up, `Floor` down, and the half modes break ties accordingly.
fn approx_root(x: &Rat, oom: Oom, rm: RoundingMode) -> Rat {
    // Scale so one unit of the integer root is one unit of 10^oom:
    // y = x / 10^(2*oom), and floor(sqrt(y)) = isqrt(floor(y)).
    let unit = ten_pow(oom);
    let y = x / (&unit * &unit);
    let i = y.floor().to_integer().sqrt();

    let i_rat = Rat::from_integer(i.clone());
    let is_exact = &i_rat * &i_rat == y;

    let units = match rm {
        RoundingMode::Floor | RoundingMode::Down => i,
        RoundingMode::Ceiling | RoundingMode::Up => {
            if is_exact {
                i
            } else {
                i + BigInt::one()
            }
        }
        _ => {
            // Compare y against the midpoint (i + 1/2)² without leaving ℚ:
            // 4y vs (2i + 1)².
            let four_y = &y * Rat::from_integer(BigInt::from(4));
            let mid = {
                let m = (&i * BigInt::from(2)) + BigInt::one();
                Rat::from_integer(&m * &m)
            };
            match four_y.cmp(&mid) {
                Ordering::Greater => i + BigInt::one(),
                Ordering::Less => i,
                Ordering::Equal => match rm {
                    RoundingMode::HalfUp => i + BigInt::one(),
                    RoundingMode::HalfDown => i,
                    // HalfEven: keep i when it is even.
                    _ => {
                        if (&i % BigInt::from(2)).is_zero() {
                            i
                        } else {
                            i + BigInt::one()
                        }
                    }
                },
            }
        }
    };

    Rat::from_integer(units) * unit
}
