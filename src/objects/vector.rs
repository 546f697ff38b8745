/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Matrix, Operand, Round};
use crate::errors::{Error, Result};

use std::fmt;
use std::ops::{Add, Sub, Mul, Div, Index};

use lalg_slice_math::{self as sm, Scalar};
use lalg_assert_close::{CheckClose, CheckCloseError, Tolerances};
use log::debug;

/// A variable-length vector of integer-or-real components.
///
/// Arithmetic produces new vectors; the only ways to change a vector in place
/// are [`Vector::set_components`], [`Vector::round`] and [`Vector::resize`].
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector {
    components: Vec<Scalar>,
}

/// Unit for [`Vector::get_angle`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AngleUnit { Radians, Degrees }

impl Default for AngleUnit {
    fn default() -> Self { AngleUnit::Radians }
}

impl Vector {
    pub fn new<I>(components: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    { Vector { components: components.into_iter().map(Into::into).collect() } }

    /// A vector of `dimensions` integer zeros.
    pub fn zero(dimensions: usize) -> Self
    { Vector { components: vec![Scalar::Int(0); dimensions] } }

    #[inline]
    pub fn components(&self) -> &[Scalar]
    { &self.components }

    #[inline]
    pub fn dimensions(&self) -> usize
    { self.components.len() }

    /// Replace all of the components.
    pub fn set_components<I>(&mut self, components: I)
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    { *self = Vector::new(components); }

    pub fn into_components(self) -> Vec<Scalar>
    { self.components }

    pub fn iter(&self) -> std::slice::Iter<'_, Scalar>
    { self.components.iter() }
}

// ---------------------------------------------------------------------------
// arithmetic

impl Vector {
    /// Elementwise sum of two vectors with the same dimensions.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.check_same_dims(other, "+")?;
        Ok(Vector { components: sm::add(&self.components, &other.components) })
    }

    /// Elementwise difference of two vectors with the same dimensions.
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.check_same_dims(other, "-")?;
        Ok(Vector { components: sm::sub(&self.components, &other.components) })
    }

    pub fn scalar_mul(&self, k: impl Into<Scalar>) -> Vector
    { Vector { components: sm::scalar_mul(&self.components, k.into()) } }

    pub fn scalar_truediv(&self, k: impl Into<Scalar>) -> Result<Vector>
    { Ok(Vector { components: sm::scalar_truediv(&self.components, k.into())? }) }

    pub fn scalar_floordiv(&self, k: impl Into<Scalar>) -> Result<Vector>
    { Ok(Vector { components: sm::scalar_floordiv(&self.components, k.into())? }) }

    /// Multiplication by a scalar operand.
    ///
    /// Vectors and matrices are rejected; products of two vectors are
    /// [`Vector::dot`] and [`Vector::cross`].
    pub fn mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Vector>
    { Ok(self.scalar_mul(scalar_operand(rhs.into(), "multiplication")?)) }

    /// True division by a scalar operand.
    pub fn truediv<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Vector>
    { self.scalar_truediv(scalar_operand(rhs.into(), "true division")?) }

    /// Floor division by a scalar operand.
    pub fn floordiv<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Vector>
    { self.scalar_floordiv(scalar_operand(rhs.into(), "floor division")?) }

    /// Structural equality. Anything that isn't a vector is unequal.
    pub fn equals<'a>(&self, other: impl Into<Operand<'a>>) -> bool {
        match other.into() {
            Operand::Vector(other) => self == other,
            _ => false,
        }
    }

    pub fn not_equals<'a>(&self, other: impl Into<Operand<'a>>) -> bool
    { !self.equals(other) }

    fn check_same_dims(&self, other: &Vector, op: &str) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimensions(format!(
                "operand {} requires two vectors with the same dimensions (got {} and {})",
                op, self.dimensions(), other.dimensions(),
            )));
        }
        Ok(())
    }
}

fn scalar_operand(rhs: Operand<'_>, what: &str) -> Result<Scalar> {
    match rhs {
        Operand::Scalar(k) => Ok(k),
        other => Err(Error::type_error(format!(
            "vector {} is for scalars only (got {}); for products of two vectors, \
             use Vector::dot or Vector::cross",
            what, other.type_name(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// shape editing

impl Vector {
    /// Round every component in place.
    pub fn round(&mut self, places: i32) {
        debug!("rounding {}-dimensional vector to {} places", self.dimensions(), places);
        for x in &mut self.components {
            *x = x.round(places);
        }
    }

    /// Get a rounded copy.
    pub fn rounded(&self, places: i32) -> Vector {
        let mut out = self.clone();
        out.round(places);
        out
    }

    /// Truncate or zero-pad to the given number of dimensions.
    ///
    /// Nothing about the direction or magnitude is preserved; this just makes
    /// e.g. a 2D vector usable in [`Vector::cross`].
    pub fn resize(&mut self, dimensions: usize) {
        debug!("resizing vector from {} to {} dimensions", self.dimensions(), dimensions);
        self.components.resize(dimensions, Scalar::Int(0));
    }
}

impl Round for Vector {
    fn rounded(&self, places: i32) -> Self
    { Vector::rounded(self, places) }
}

// ---------------------------------------------------------------------------
// geometry

impl Vector {
    /// Euclidean norm.
    pub fn magnitude(&self) -> f64
    { sm::sqnorm(&self.components).to_f64().sqrt() }

    /// Inner product.
    ///
    /// It is recommended you write this as `Vector::dot(a, b)`, rather than `a.dot(b)`.
    pub fn dot(&self, other: &Vector) -> Result<Scalar> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimensions(format!(
                "dot product requires two vectors with the same dimensions (got {} and {})",
                self.dimensions(), other.dimensions(),
            )));
        }
        Ok(sm::dot(&self.components, &other.components))
    }

    /// Cross product of two 3-dimensional vectors.
    ///
    /// Swapping the operands negates the result.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        match (&self.components[..], &other.components[..]) {
            (&[a1, a2, a3], &[b1, b2, b3]) => Ok(Vector::new(vec![
                a2 * b3 - a3 * b2,
                a3 * b1 - a1 * b3,
                a1 * b2 - a2 * b1,
            ])),
            _ => Err(Error::dimensions(format!(
                "cross product is only supported for 3-dimensional vectors (got {} and {})",
                self.dimensions(), other.dimensions(),
            ))),
        }
    }

    /// Get the shortest angle between two vectors, as a value in `[0, pi]`
    /// (or `[0, 180]` for degrees).
    ///
    /// Reflex and signed angles are never produced.
    pub fn get_angle(&self, other: &Vector, unit: AngleUnit) -> Result<f64> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimensions(format!(
                "cannot get the angle between vectors of different dimensions ({} and {})",
                self.dimensions(), other.dimensions(),
            )));
        }
        let (m1, m2) = (self.magnitude(), other.magnitude());
        if m1 == 0.0 || m2 == 0.0 {
            return Err(Error::ZeroMagnitude);
        }
        let cos = Vector::dot(self, other)?.to_f64() / (m1 * m2);
        let rad = cos.min(1.0).max(-1.0).acos();
        Ok(match unit {
            AngleUnit::Radians => rad,
            AngleUnit::Degrees => rad.to_degrees(),
        })
    }
}

// ---------------------------------------------------------------------------
// std integration

impl Index<usize> for Vector {
    type Output = Scalar;

    #[inline(always)]
    fn index(&self, i: usize) -> &Scalar
    { &self.components[i] }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Scalar;
    type IntoIter = std::slice::Iter<'a, Scalar>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter
    { self.components.iter() }
}

impl<X: Into<Scalar>> std::iter::FromIterator<X> for Vector {
    fn from_iter<I: IntoIterator<Item=X>>(iter: I) -> Self
    { Vector::new(iter) }
}

impl PartialEq<Matrix> for Vector {
    fn eq(&self, _: &Matrix) -> bool { false }
}

impl<'a, 'b> Add<&'b Vector> for &'a Vector {
    type Output = Result<Vector>;

    fn add(self, rhs: &'b Vector) -> Self::Output
    { Vector::add(self, rhs) }
}

impl<'a, 'b> Sub<&'b Vector> for &'a Vector {
    type Output = Result<Vector>;

    fn sub(self, rhs: &'b Vector) -> Self::Output
    { Vector::sub(self, rhs) }
}

impl<'a, K: Into<Scalar>> Mul<K> for &'a Vector {
    type Output = Vector;

    fn mul(self, k: K) -> Vector
    { self.scalar_mul(k) }
}

impl<'a, K: Into<Scalar>> Div<K> for &'a Vector {
    type Output = Result<Vector>;

    fn div(self, k: K) -> Self::Output
    { self.scalar_truediv(k) }
}

// Written as `Vector(1, 3, 7.3)`.  Integral reals are written like integers.
// A single component is `Vector(1)`, with no trailing comma.
impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector(")?;
        for (i, x) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x.compact())?;
        }
        write!(f, ")")
    }
}

// Same as Display, except that reals keep their fractional part.
impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector(")?;
        for (i, x) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ")")
    }
}

impl CheckClose for Vector {
    type Scalar = f64;

    fn check_close(&self, other: &Vector, tol: Tolerances) -> std::result::Result<(), CheckCloseError<f64>>
    { self.components.check_close(&other.components, tol) }
}

// ---------------------------------------------------------------------------
