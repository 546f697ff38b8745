/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Elementwise arithmetic on slices of [`Scalar`]s.
//!
//! Pairwise functions zip their inputs and stop at the end of the shorter one.
//! That is not an error here; callers who need equal lengths check first.

#[cfg(test)]
#[macro_use]
extern crate lalg_assert_close;

pub use self::scalar::{Scalar, Compact, ZeroDivisionError};
mod scalar;

/// Elementwise sum.
pub fn add(a: &[Scalar], b: &[Scalar]) -> Vec<Scalar>
{ zip_map(a, b, |x, y| x + y) }

/// Elementwise difference.
pub fn sub(a: &[Scalar], b: &[Scalar]) -> Vec<Scalar>
{ zip_map(a, b, |x, y| x - y) }

/// Elementwise product.
pub fn mul(a: &[Scalar], b: &[Scalar]) -> Vec<Scalar>
{ zip_map(a, b, |x, y| x * y) }

/// Elementwise true division. Fails if any divisor that gets used is zero.
pub fn truediv(a: &[Scalar], b: &[Scalar]) -> Result<Vec<Scalar>, ZeroDivisionError>
{ a.iter().zip(b).map(|(&x, &y)| x.truediv(y)).collect() }

/// Elementwise floor division. Fails if any divisor that gets used is zero.
pub fn floordiv(a: &[Scalar], b: &[Scalar]) -> Result<Vec<Scalar>, ZeroDivisionError>
{ a.iter().zip(b).map(|(&x, &y)| x.floordiv(y)).collect() }

/// Multiply every element by a scalar.
pub fn scalar_mul(a: &[Scalar], k: Scalar) -> Vec<Scalar>
{ a.iter().map(|&x| x * k).collect() }

/// True-divide every element by a scalar.
pub fn scalar_truediv(a: &[Scalar], k: Scalar) -> Result<Vec<Scalar>, ZeroDivisionError>
{ a.iter().map(|&x| x.truediv(k)).collect() }

/// Floor-divide every element by a scalar.
pub fn scalar_floordiv(a: &[Scalar], k: Scalar) -> Result<Vec<Scalar>, ZeroDivisionError>
{ a.iter().map(|&x| x.floordiv(k)).collect() }

/// Sum of pairwise products (truncating like the others).
pub fn dot(a: &[Scalar], b: &[Scalar]) -> Scalar
{ a.iter().zip(b).map(|(&x, &y)| x * y).sum() }

/// Sum of squares.
pub fn sqnorm(a: &[Scalar]) -> Scalar
{ dot(a, a) }

#[inline]
fn zip_map(a: &[Scalar], b: &[Scalar], f: impl Fn(Scalar, Scalar) -> Scalar) -> Vec<Scalar>
{ a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect() }

#[cfg(test)]
mod tests {
    use super::*;
    use super::Scalar::{Int, Real};

    fn ints(xs: &[i64]) -> Vec<Scalar>
    { xs.iter().map(|&x| Int(x)).collect() }

    #[test]
    fn pairwise_truncates() {
        let a = ints(&[1, 2, 3]);
        let b = ints(&[10, 20]);
        assert_eq!(ints(&[11, 22]), add(&a, &b));
        assert_eq!(ints(&[-9, -18]), sub(&a, &b));
        assert_eq!(ints(&[10, 40]), mul(&b, &a));
        assert_eq!(Vec::<Scalar>::new(), add(&a, &[]));
    }

    #[test]
    fn pairwise_division() {
        let a = ints(&[7, -7, 1]);
        let b = ints(&[2, 2]);
        assert_eq!(Ok(vec![Real(3.5), Real(-3.5)]), truediv(&a, &b));
        assert_eq!(Ok(ints(&[3, -4])), floordiv(&a, &b));

        assert_eq!(Err(ZeroDivisionError), truediv(&a, &ints(&[1, 0])));
        assert_eq!(Err(ZeroDivisionError), floordiv(&a, &ints(&[0])));
        // the zero is past the end of `a`, so it is never used
        assert_eq!(Ok(ints(&[7])), floordiv(&a[..1], &ints(&[1, 0])));
    }

    #[test]
    fn broadcast() {
        let a = vec![Int(2), Real(1.5)];
        assert_eq!(vec![Int(6), Real(4.5)], scalar_mul(&a, Int(3)));
        assert_eq!(Ok(vec![Real(1.0), Real(0.75)]), scalar_truediv(&a, Int(2)));
        assert_eq!(Ok(vec![Int(1), Real(0.0)]), scalar_floordiv(&a, Int(2)));
        assert_eq!(Err(ZeroDivisionError), scalar_truediv(&a, Real(0.0)));
        assert_eq!(Err(ZeroDivisionError), scalar_floordiv(&a, Int(0)));
        assert_eq!(Ok(vec![]), scalar_truediv(&[], Int(0)));
    }

    #[test]
    fn dot_and_sqnorm() {
        assert_eq!(Int(32), dot(&ints(&[1, 2, 3]), &ints(&[4, 5, 6])));
        assert_eq!(Int(25), sqnorm(&ints(&[3, 4])));
        assert_eq!(Int(0), sqnorm(&[]));
    }

    #[test]
    fn prop_sub_undoes_add() {
        for _ in 0..10 {
            let a: Vec<Scalar> = (0..4).map(|_| Real(::rand::random())).collect();
            let b: Vec<Scalar> = (0..4).map(|_| Real(::rand::random())).collect();
            let back = sub(&add(&a, &b), &b);
            for (x, y) in back.iter().zip(&a) {
                assert_close!(abs=1e-12, x.to_f64(), y.to_f64());
            }
        }
    }
}
