/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Operations on values whose kinds are only known at run time.
//!
//! The statically typed API makes most operand mix-ups unrepresentable.
//! [`Value`] brings them back for callers like script interpreters, and
//! reports them as [`Error::Type`].

use crate::{Vector, Matrix, Operand, Product, AngleUnit, Round};
use crate::errors::{Error, Result, unsupported};

use std::fmt;

use lalg_slice_math::Scalar;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Vector(Vector),
    Matrix(Matrix),
}

impl Value {
    pub fn type_name(&self) -> &'static str
    { self.as_operand().type_name() }

    pub fn as_operand(&self) -> Operand<'_> {
        match self {
            Value::Scalar(x) => Operand::Scalar(*x),
            Value::Vector(v) => Operand::Vector(v),
            Value::Matrix(m) => Operand::Matrix(m),
        }
    }

    pub fn add(&self, rhs: &Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(*a + *b)),
            (Value::Vector(a), Value::Vector(b)) => a.add(b).map(Value::Vector),
            (Value::Matrix(a), Value::Matrix(b)) => a.add(b).map(Value::Matrix),
            _ => Err(unsupported("+", self.type_name(), rhs.type_name())),
        }
    }

    pub fn sub(&self, rhs: &Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(*a - *b)),
            (Value::Vector(a), Value::Vector(b)) => a.sub(b).map(Value::Vector),
            (Value::Matrix(a), Value::Matrix(b)) => a.sub(b).map(Value::Matrix),
            _ => Err(unsupported("-", self.type_name(), rhs.type_name())),
        }
    }

    /// Multiplication, with the left operand choosing the behavior.
    ///
    /// A vector only accepts scalars; a matrix accepts anything.
    /// Nothing may be multiplied on the right by a vector or matrix.
    pub fn mul(&self, rhs: &Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(*a * *b)),
            (Value::Vector(a), _) => a.mul(rhs.as_operand()).map(Value::Vector),
            (Value::Matrix(a), _) => a.multiply(rhs.as_operand()).map(Value::from),
            _ => Err(unsupported("*", self.type_name(), rhs.type_name())),
        }
    }

    pub fn truediv(&self, rhs: &Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a.truediv(*b)?)),
            (Value::Vector(a), _) => a.truediv(rhs.as_operand()).map(Value::Vector),
            _ => Err(unsupported("/", self.type_name(), rhs.type_name())),
        }
    }

    pub fn floordiv(&self, rhs: &Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a.floordiv(*b)?)),
            (Value::Vector(a), _) => a.floordiv(rhs.as_operand()).map(Value::Vector),
            _ => Err(unsupported("//", self.type_name(), rhs.type_name())),
        }
    }

    /// Never fails; values of different kinds are simply unequal.
    pub fn equals(&self, rhs: &Value) -> bool {
        match self {
            Value::Scalar(a) => match rhs {
                Value::Scalar(b) => a == b,
                _ => false,
            },
            Value::Vector(a) => a.equals(rhs.as_operand()),
            Value::Matrix(a) => a.equals(rhs.as_operand()),
        }
    }

    pub fn not_equals(&self, rhs: &Value) -> bool
    { !self.equals(rhs) }

    pub fn dot(&self, rhs: &Value) -> Result<Scalar> {
        let (a, b) = two_vectors("dot product", self, rhs)?;
        Vector::dot(a, b)
    }

    pub fn cross(&self, rhs: &Value) -> Result<Vector> {
        let (a, b) = two_vectors("cross product", self, rhs)?;
        Vector::cross(a, b)
    }

    pub fn get_angle(&self, rhs: &Value, unit: AngleUnit) -> Result<f64> {
        let (a, b) = two_vectors("get_angle", self, rhs)?;
        Vector::get_angle(a, b, unit)
    }

    pub fn magnitude(&self) -> Result<f64> {
        match self {
            Value::Vector(v) => Ok(v.magnitude()),
            _ => Err(Error::type_error(format!("a {} has no magnitude", self.type_name()))),
        }
    }

    /// Dimensions as a list: one entry for a vector, two for a matrix,
    /// and none for a scalar.
    pub fn dimensions(&self) -> Vec<usize> {
        match self {
            Value::Scalar(_) => vec![],
            Value::Vector(v) => vec![v.dimensions()],
            Value::Matrix(m) => {
                let (rows, cols) = m.dimensions();
                vec![rows, cols]
            },
        }
    }

    /// In-place rounding. Works on every kind of value.
    pub fn round(&mut self, places: i32) {
        match self {
            Value::Vector(v) => v.round(places),
            _ => *self = self.rounded(places),
        }
    }

    /// Resize a vector in place.
    ///
    /// The new size must be a non-negative integer scalar.
    pub fn resize(&mut self, dimensions: &Value) -> Result<()> {
        let n = match *dimensions {
            Value::Scalar(Scalar::Int(n)) if n >= 0 => n as usize,
            _ => return Err(Error::type_error(format!(
                "dimensions should be a non-negative int (got {} {})",
                dimensions.type_name(), dimensions,
            ))),
        };
        match self {
            Value::Vector(v) => {
                v.resize(n);
                Ok(())
            },
            _ => Err(Error::type_error(format!("cannot resize a {}", self.type_name()))),
        }
    }
}

fn two_vectors<'a>(what: &str, a: &'a Value, b: &'a Value) -> Result<(&'a Vector, &'a Vector)> {
    match (a, b) {
        (Value::Vector(a), Value::Vector(b)) => Ok((a, b)),
        _ => Err(Error::type_error(format!(
            "{} only accepts two vectors (got {} and {})",
            what, a.type_name(), b.type_name(),
        ))),
    }
}

impl Round for Value {
    fn rounded(&self, places: i32) -> Self {
        match self {
            Value::Scalar(x) => Value::Scalar(x.round(places)),
            Value::Vector(v) => Value::Vector(v.rounded(places)),
            Value::Matrix(m) => Value::Matrix(m.rounded(places)),
        }
    }
}

impl From<Scalar> for Value {
    fn from(x: Scalar) -> Self { Value::Scalar(x) }
}

impl From<Vector> for Value {
    fn from(x: Vector) -> Self { Value::Vector(x) }
}

impl From<Matrix> for Value {
    fn from(x: Matrix) -> Self { Value::Matrix(x) }
}

impl From<Product> for Value {
    fn from(x: Product) -> Self {
        match x {
            Product::Matrix(m) => Value::Matrix(m),
            Product::Vector(v) => Value::Vector(v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(x) => fmt::Display::fmt(x, f),
            Value::Vector(v) => fmt::Display::fmt(v, f),
            Value::Matrix(m) => fmt::Display::fmt(m, f),
        }
    }
}
