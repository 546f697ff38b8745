/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub, Mul, Neg};

use num_traits::{Zero, One};
use lalg_assert_close::{CheckClose, CheckCloseError, Tolerances};

/// Error for division (true or floor) by a zero scalar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("division by zero")]
pub struct ZeroDivisionError;

/// A numeric component: either an integer or a real.
///
/// Arithmetic between two `Int`s stays integral (promoting to `Real` on overflow
/// rather than wrapping); anything involving a `Real` is `Real`. True division is
/// always `Real`.
///
/// Equality and ordering are numeric, so `Int(1) == Real(1.0)`.
#[derive(Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Scalar {
    Int(i64),
    Real(f64),
}

impl Scalar {
    #[inline]
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Int(x) => x as f64,
            Scalar::Real(x) => x,
        }
    }

    #[inline]
    pub fn is_int(self) -> bool {
        match self {
            Scalar::Int(_) => true,
            Scalar::Real(_) => false,
        }
    }

    /// The value of an `Int`. Integral reals are *not* converted.
    #[inline]
    pub fn as_int(self) -> Option<i64> {
        match self {
            Scalar::Int(x) => Some(x),
            Scalar::Real(_) => None,
        }
    }

    /// Division that always produces a real.
    pub fn truediv(self, rhs: Scalar) -> Result<Scalar, ZeroDivisionError> {
        if rhs.is_zero() {
            return Err(ZeroDivisionError);
        }
        Ok(Scalar::Real(self.to_f64() / rhs.to_f64()))
    }

    /// Division rounded toward negative infinity.
    ///
    /// Integral when both operands are `Int`.
    pub fn floordiv(self, rhs: Scalar) -> Result<Scalar, ZeroDivisionError> {
        if rhs.is_zero() {
            return Err(ZeroDivisionError);
        }
        Ok(match (self, rhs) {
            (Scalar::Int(a), Scalar::Int(b)) => match floor_div_i64(a, b) {
                Some(q) => Scalar::Int(q),
                None => Scalar::Real(floor_div_f64(a as f64, b as f64)),
            },
            (a, b) => Scalar::Real(floor_div_f64(a.to_f64(), b.to_f64())),
        })
    }

    /// Round to `places` decimal digits, with ties going to the even neighbor.
    ///
    /// Negative `places` round to the left of the decimal point.
    pub fn round(self, places: i32) -> Scalar {
        match self {
            Scalar::Int(x) => match places >= 0 {
                true => Scalar::Int(x),
                false => round_i64(x, places),
            },
            Scalar::Real(x) => Scalar::Real(round_f64(x, places)),
        }
    }

    #[inline]
    pub fn abs(self) -> Scalar {
        match self {
            Scalar::Int(x) => match x.checked_abs() {
                Some(a) => Scalar::Int(a),
                None => Scalar::Real((x as f64).abs()),
            },
            Scalar::Real(x) => Scalar::Real(x.abs()),
        }
    }

    /// Wrapper whose `Display` writes integral reals without a fractional part.
    pub fn compact(self) -> Compact {
        Compact(self)
    }
}

fn floor_div_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a.checked_rem(b)?;
    match r != 0 && ((r < 0) != (b < 0)) {
        true => q.checked_sub(1),
        false => Some(q),
    }
}

fn round_i64(x: i64, places: i32) -> Scalar {
    debug_assert!(places < 0);
    let unit = match 10i64.checked_pow(places.unsigned_abs()) {
        Some(unit) => unit,
        // every i64 is closer to zero than to the unit
        None => return Scalar::Int(0),
    };
    let q = x.div_euclid(unit);
    let r = x.rem_euclid(unit);
    let q = match (2 * (r as i128)).cmp(&(unit as i128)) {
        Ordering::Greater => q + 1,
        Ordering::Equal if q % 2 != 0 => q + 1,
        _ => q,
    };
    match q.checked_mul(unit) {
        Some(out) => Scalar::Int(out),
        None => Scalar::Real(q as f64 * unit as f64),
    }
}

// Derived from the remainder rather than from `floor(a / b)`, which is off by
// one whenever the quotient rounds up to an integer (e.g. `1 // 0.1`).
fn floor_div_f64(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && ((b < 0.0) != (rem < 0.0)) {
        div -= 1.0;
    }
    if div == 0.0 {
        return 0f64.copysign(a / b);
    }
    // div is within an ulp or so of an integer
    let floor = div.floor();
    match div - floor > 0.5 {
        true => floor + 1.0,
        false => floor,
    }
}

// Past this many digits, every finite f64 is already exactly representable.
const MAX_ROUND_PLACES: i32 = 323;

fn round_f64(x: f64, places: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    if places >= 0 {
        if places > MAX_ROUND_PLACES {
            return x;
        }
        // Formatting rounds the exact binary value (ties to even), whereas
        // scaling by 10^places would round once more before we ever look.
        return format!("{:.*}", places as usize, x).parse().unwrap_or(x);
    }
    let unit = 10f64.powi(places.saturating_abs());
    if !unit.is_finite() {
        return 0.0 * x;
    }
    (x / unit).round_ties_even() * unit
}

// ---------------------------------------------------------------------------

macro_rules! impl_arith {
    ($Trait:ident, $method:ident, $checked:ident, $op:tt) => {
        impl $Trait for Scalar {
            type Output = Scalar;

            #[inline]
            fn $method(self, rhs: Scalar) -> Scalar {
                match (self, rhs) {
                    (Scalar::Int(a), Scalar::Int(b)) => match a.$checked(b) {
                        Some(x) => Scalar::Int(x),
                        None => Scalar::Real(a as f64 $op b as f64),
                    },
                    (a, b) => Scalar::Real(a.to_f64() $op b.to_f64()),
                }
            }
        }

        impl<'a> $Trait<&'a Scalar> for Scalar {
            type Output = Scalar;

            #[inline(always)]
            fn $method(self, rhs: &'a Scalar) -> Scalar
            { $Trait::$method(self, *rhs) }
        }
    };
}

impl_arith!(Add, add, checked_add, +);
impl_arith!(Sub, sub, checked_sub, -);
impl_arith!(Mul, mul, checked_mul, *);

impl Neg for Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        match self {
            Scalar::Int(x) => match x.checked_neg() {
                Some(x) => Scalar::Int(x),
                None => Scalar::Real(-(x as f64)),
            },
            Scalar::Real(x) => Scalar::Real(-x),
        }
    }
}

impl Zero for Scalar {
    #[inline(always)]
    fn zero() -> Self { Scalar::Int(0) }

    #[inline]
    fn is_zero(&self) -> bool {
        match *self {
            Scalar::Int(x) => x == 0,
            Scalar::Real(x) => x == 0.0,
        }
    }
}

impl One for Scalar {
    #[inline(always)]
    fn one() -> Self { Scalar::Int(1) }
}

impl std::iter::Sum for Scalar {
    fn sum<I: Iterator<Item=Scalar>>(iter: I) -> Self {
        iter.fold(Scalar::zero(), |a, b| a + b)
    }
}

impl<'a> std::iter::Sum<&'a Scalar> for Scalar {
    fn sum<I: Iterator<Item=&'a Scalar>>(iter: I) -> Self {
        iter.fold(Scalar::zero(), |a, b| a + b)
    }
}

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Scalar) -> bool {
        match (*self, *other) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (a, b) => a.to_f64() == b.to_f64(),
        }
    }
}

impl PartialOrd for Scalar {
    #[inline]
    fn partial_cmp(&self, other: &Scalar) -> Option<Ordering> {
        match (*self, *other) {
            (Scalar::Int(a), Scalar::Int(b)) => a.partial_cmp(&b),
            (a, b) => a.to_f64().partial_cmp(&b.to_f64()),
        }
    }
}

macro_rules! impl_from {
    ($($T:ty => $Variant:ident as $Target:ty;)+) => {$(
        impl From<$T> for Scalar {
            #[inline(always)]
            fn from(x: $T) -> Scalar { Scalar::$Variant(x as $Target) }
        }
    )+};
}

impl_from!{
    i64 => Int as i64;
    i32 => Int as i64;
    i16 => Int as i64;
    i8 => Int as i64;
    u32 => Int as i64;
    u16 => Int as i64;
    u8 => Int as i64;
    f64 => Real as f64;
    f32 => Real as f64;
}

impl<'a> From<&'a Scalar> for Scalar {
    #[inline(always)]
    fn from(x: &'a Scalar) -> Scalar { *x }
}

// ---------------------------------------------------------------------------

// Reals always show a fractional part (`1.0`), so that the variant can be
// told apart when debugging.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::Int(x) => write!(f, "{}", x),
            Scalar::Real(x) => write!(f, "{:?}", x),
        }
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { fmt::Display::fmt(self, f) }
}

/// See [`Scalar::compact`].
#[derive(Debug, Copy, Clone)]
pub struct Compact(Scalar);

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Scalar::Real(x) if x.is_finite() && x.fract() == 0.0 => {
                // (+ 0.0 turns a negative zero into a positive one)
                write!(f, "{}", x + 0.0)
            },
            s => write!(f, "{}", s),
        }
    }
}

// ---------------------------------------------------------------------------

impl CheckClose for Scalar {
    type Scalar = f64;

    #[inline]
    fn check_close(&self, other: &Scalar, tol: Tolerances) -> Result<(), CheckCloseError<f64>>
    { self.to_f64().check_close(&other.to_f64(), tol) }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::Scalar::{Int, Real};

    #[test]
    fn int_arithmetic_stays_integral() {
        assert!((Int(2) + Int(3)).is_int());
        assert!((Int(2) * Int(-3)).is_int());
        assert!(!(Int(2) + Real(3.0)).is_int());
        assert_eq!(Int(6), Int(2) * Int(3));
    }

    #[test]
    fn overflow_promotes() {
        let big = Int(i64::max_value());
        let sum = big + Int(1);
        assert!(!sum.is_int());
        assert_close!(9.223372036854775808e18, sum.to_f64());
        assert!(!(-Int(i64::min_value())).is_int());
    }

    #[test]
    fn mixed_equality() {
        assert_eq!(Int(1), Real(1.0));
        assert_ne!(Int(1), Real(1.5));
        assert!(Int(1) < Real(1.5));
    }

    #[test]
    fn truediv() {
        assert_eq!(Ok(Real(2.5)), Int(5).truediv(Int(2)));
        assert_eq!(Err(ZeroDivisionError), Int(5).truediv(Int(0)));
        assert_eq!(Err(ZeroDivisionError), Real(5.0).truediv(Real(0.0)));
    }

    #[test]
    fn floordiv_rounds_down() {
        let q = |a: i64, b: i64| Int(a).floordiv(Int(b)).unwrap().as_int().unwrap();
        assert_eq!(3, q(7, 2));
        assert_eq!(-4, q(-7, 2));
        assert_eq!(-4, q(7, -2));
        assert_eq!(3, q(-7, -2));
        assert_eq!(-3, q(-6, 2));

        assert_eq!(Ok(Real(3.0)), Real(7.5).floordiv(Int(2)));
        assert_eq!(Ok(Real(-4.0)), Real(-7.5).floordiv(Int(2)));
        assert_eq!(Err(ZeroDivisionError), Real(7.5).floordiv(Real(0.0)));

        // the one quotient that doesn't fit
        assert!(!Int(i64::min_value()).floordiv(Int(-1)).unwrap().is_int());
    }

    #[test]
    fn round_half_even() {
        assert_eq!(Real(2.0), Real(2.5).round(0));
        assert_eq!(Real(4.0), Real(3.5).round(0));
        assert_eq!(Real(-2.0), Real(-2.5).round(0));
        assert_close!(1.23, Real(1.234).round(2).to_f64());
        assert_eq!(Real(1200.0), Real(1250.0).round(-2));
        assert_eq!(Real(1200.0), Real(1234.5).round(-2));
        assert!(Real(2.5).round(0).to_f64().is_sign_positive());
    }

    #[test]
    fn round_sees_the_stored_value() {
        // each literal is stored slightly below the written tie
        assert_eq!(Real(0.1), Real(0.15).round(1));
        assert_eq!(Real(2.67), Real(2.675).round(2));
        assert_eq!(Real(-49.5), Real(-49.55).round(1));
        // exact ties still go to even
        assert_eq!(Real(0.12), Real(0.125).round(2));
        assert_eq!(Real(0.38), Real(0.375).round(2));

        assert!(Real(-0.04).round(1).to_f64().is_sign_negative());
        assert_eq!(Real(1e-300), Real(1e-300).round(400));
    }

    #[test]
    fn floordiv_of_reals_uses_the_remainder() {
        assert_eq!(Ok(Real(9.0)), Int(1).floordiv(Real(0.1)));
        assert_eq!(Ok(Real(-10.0)), Int(-1).floordiv(Real(0.1)));
        assert_eq!(Ok(Real(2.0)), Real(0.7).floordiv(Real(0.3)));
        assert!(Real(-0.0).floordiv(Real(5.0)).unwrap().to_f64().is_sign_negative());
        assert!(Real(1.0).floordiv(Real(-5.0)).unwrap().to_f64() == -1.0);
    }

    #[test]
    fn round_int() {
        assert_eq!(Int(17), Int(17).round(3));
        assert_eq!(Int(20), Int(15).round(-1));
        assert_eq!(Int(20), Int(25).round(-1));
        assert_eq!(Int(-20), Int(-15).round(-1));
        assert_eq!(Int(1200), Int(1234).round(-2));
        assert_eq!(Int(0), Int(5).round(-30));
        assert!(Int(1234).round(-2).is_int());
    }

    #[test]
    fn display() {
        assert_eq!("3", format!("{}", Int(3)));
        assert_eq!("3.0", format!("{}", Real(3.0)));
        assert_eq!("7.3", format!("{}", Real(7.3)));
        assert_eq!("3", format!("{}", Real(3.0).compact()));
        assert_eq!("0", format!("{}", Real(-0.0).compact()));
        assert_eq!("-4.5", format!("{}", Real(-4.5).compact()));
    }

    #[test]
    fn sum() {
        let xs = vec![Int(1), Int(2), Real(0.5)];
        assert_eq!(Real(3.5), xs.iter().sum());
        assert_eq!(Int(0), Vec::<Scalar>::new().into_iter().sum());
    }
}
