/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Vectors and matrices with dimension-checked arithmetic.
//!
//! ```
//! use lalg::{Vector, Matrix};
//!
//! let m = Matrix::new(vec![vec![2, 3], vec![1, 2]]).unwrap();
//! let v = Vector::new(vec![1, 1]);
//! assert_eq!(m.mul_vector(&v).unwrap(), Vector::new(vec![5, 3]));
//! ```

pub use lalg_objects::{
    Vector, AngleUnit, Matrix, Product, Operand, Value,
    Scalar, Round, round,
    Error, ErrorKind, Result, ZeroDivisionError,
};

/// Elementwise operations on plain slices of scalars.
///
/// These do not check lengths; the longer input is truncated.
pub mod utilities {
    pub use lalg_slice_math::{
        add, sub, mul, truediv, floordiv,
        scalar_mul, scalar_truediv, scalar_floordiv,
        dot, sqnorm,
    };
}

pub use lalg_tasks::{Script, Step, Op, Evaluator, run_script};
