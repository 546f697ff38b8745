/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Vector, Matrix};
use lalg_slice_math::Scalar;

/// Borrowed right-hand side of a binary operation.
///
/// Operations that behave differently for scalars, vectors and matrices
/// (`Matrix::multiply`, `Vector::mul`, equality) take `impl Into<Operand>`,
/// so any of `3`, `2.5`, `&vector` or `&matrix` can be passed directly.
#[derive(Debug, Copy, Clone)]
pub enum Operand<'a> {
    Scalar(Scalar),
    Vector(&'a Vector),
    Matrix(&'a Matrix),
}

impl<'a> Operand<'a> {
    /// Name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Scalar(Scalar::Int(_)) => "int",
            Operand::Scalar(Scalar::Real(_)) => "float",
            Operand::Vector(_) => "Vector",
            Operand::Matrix(_) => "Matrix",
        }
    }
}

impl<'a> From<Scalar> for Operand<'a> {
    #[inline(always)]
    fn from(x: Scalar) -> Self { Operand::Scalar(x) }
}

impl<'a> From<&'a Vector> for Operand<'a> {
    #[inline(always)]
    fn from(x: &'a Vector) -> Self { Operand::Vector(x) }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    #[inline(always)]
    fn from(x: &'a Matrix) -> Self { Operand::Matrix(x) }
}

macro_rules! impl_from_primitive {
    ($($T:ty)+) => {$(
        impl<'a> From<$T> for Operand<'a> {
            #[inline(always)]
            fn from(x: $T) -> Self { Operand::Scalar(x.into()) }
        }
    )+};
}

impl_from_primitive!{ i64 i32 u32 f64 f32 }
