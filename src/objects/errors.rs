/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use lalg_slice_math::ZeroDivisionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An operand of the wrong kind (non-numeric data, vector used as a scalar,
    /// non-integer size, ...).
    #[error("{}", .0)]
    Type(String),

    /// Shapes that are incompatible for the requested operation.
    #[error("{}", .0)]
    Dimensions(String),

    #[error(transparent)]
    Division(#[from] ZeroDivisionError),

    #[error("cannot get the angle between two vectors if either has zero magnitude")]
    ZeroMagnitude,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind { Type, Dimensions, Division, ZeroMagnitude }

impl Error {
    pub fn type_error(msg: impl Into<String>) -> Self
    { Error::Type(msg.into()) }

    pub fn dimensions(msg: impl Into<String>) -> Self
    { Error::Dimensions(msg.into()) }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Type(_) => ErrorKind::Type,
            Error::Dimensions(_) => ErrorKind::Dimensions,
            Error::Division(_) => ErrorKind::Division,
            Error::ZeroMagnitude => ErrorKind::ZeroMagnitude,
        }
    }

    /// True for every failure that amounts to dividing by zero.
    ///
    /// This includes [`Error::ZeroMagnitude`], since the angle formula
    /// divides by both magnitudes.
    pub fn is_division(&self) -> bool {
        match self.kind() {
            ErrorKind::Division | ErrorKind::ZeroMagnitude => true,
            ErrorKind::Type | ErrorKind::Dimensions => false,
        }
    }
}

/// Unsupported operand error for a binary operation.
pub(crate) fn unsupported(op: &str, lhs: &str, rhs: &str) -> Error {
    Error::type_error(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'", op, lhs, rhs,
    ))
}
