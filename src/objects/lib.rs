/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Vector and matrix value types.
//!
//! Binary operations check that their operands have compatible shapes and
//! report mismatches as [`Error::Dimensions`]. Results are always new values.

#[cfg(test)]
#[macro_use]
extern crate lalg_assert_close;

pub use lalg_slice_math::{Scalar, ZeroDivisionError};

pub use crate::errors::{Error, ErrorKind, Result};
mod errors;

pub use crate::operand::Operand;
mod operand;

pub use crate::vector::{Vector, AngleUnit};
mod vector;

pub use crate::matrix::{Matrix, Product};
mod matrix;

pub use crate::dynamic::Value;
pub mod dynamic;

/// Types that can produce a copy of themselves rounded to some number of
/// decimal places.
pub trait Round: Sized {
    fn rounded(&self, places: i32) -> Self;
}

/// Free-function form of [`Round::rounded`].
#[inline(always)]
pub fn round<T: Round>(x: &T, places: i32) -> T
{ x.rounded(places) }
