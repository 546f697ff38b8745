/* ************************************************************************ **
** This file is part of lalg, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{Vector, Operand, Round};
use crate::errors::{Error, Result};

use std::fmt;
use std::ops::{Add, Sub, Mul, Index};

use itertools::Itertools;
use lalg_slice_math::{self as sm, Scalar};
use lalg_assert_close::{CheckClose, CheckCloseError, Tolerances};
use log::trace;

/// Owned dense matrix with C layout.
///
/// There is always at least one row. Rows may be empty.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vec<Scalar>>", into = "Vec<Vec<Scalar>>"))]
pub struct Matrix {
    // c-contiguous, row-contiguous data
    data: Vec<Scalar>,
    // invariant: height * width == data.len()
    height: usize,
    width: usize,
}

/// Result of [`Matrix::multiply`], whose type depends on the operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Matrix(Matrix),
    Vector(Vector),
}

impl Product {
    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Product::Matrix(m) => Some(m),
            Product::Vector(_) => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Product::Matrix(_) => None,
            Product::Vector(v) => Some(v),
        }
    }
}

impl Matrix {
    /// Build a matrix from its rows.
    ///
    /// Fails if there are no rows or if the rows differ in length.
    pub fn new<R>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: Into<Scalar>,
    {
        let mut data = vec![];
        let mut height = 0;
        let mut width = None;
        for row in rows {
            let start = data.len();
            data.extend(row.into_iter().map(Into::into));
            let len = data.len() - start;
            match width {
                None => width = Some(len),
                Some(width) if width != len => {
                    return Err(Error::dimensions(format!(
                        "matrix rows should all be the same length (row 0 has {}, row {} has {})",
                        width, height, len,
                    )));
                },
                Some(_) => {},
            }
            height += 1;
        }
        match width {
            None => Err(Error::dimensions("a matrix needs at least one row")),
            Some(width) => Ok(Matrix { data, height, width }),
        }
    }

    fn from_row_major_data((height, width): (usize, usize), data: Vec<Scalar>) -> Self {
        debug_assert_eq!(data.len(), height * width);
        Matrix { data, height, width }
    }

    /// Replace all of the rows.
    ///
    /// On failure, the matrix is left unchanged.
    pub fn set_components<R>(&mut self, rows: R) -> Result<()>
    where
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: Into<Scalar>,
    {
        *self = Matrix::new(rows)?;
        Ok(())
    }

    /// `(rows, cols)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize)
    { (self.height, self.width) }

    #[inline]
    pub fn num_rows(&self) -> usize { self.height }

    #[inline]
    pub fn num_cols(&self) -> usize { self.width }

    pub fn row(&self, r: usize) -> &[Scalar]
    { &self.data[r * self.width..(r + 1) * self.width] }

    // (chunks() would choke on zero-width rows)
    pub fn rows(&self) -> impl ExactSizeIterator<Item=&[Scalar]> + '_
    { (0..self.height).map(move |r| self.row(r)) }

    /// The rows as nested vectors.
    pub fn components(&self) -> Vec<Vec<Scalar>>
    { self.rows().map(|row| row.to_vec()).collect() }

    pub fn row_major_data(&self) -> &[Scalar]
    { &self.data }

    fn to_transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.width {
            for r in 0..self.height {
                data.push(self[(r, c)]);
            }
        }
        Matrix::from_row_major_data((self.width, self.height), data)
    }
}

// ---------------------------------------------------------------------------
// arithmetic

impl Matrix {
    /// Entrywise sum of two matrices with the same dimensions.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_dims(other, "+")?;
        let data = self.rows().zip(other.rows())
            .flat_map(|(a, b)| sm::add(a, b))
            .collect();
        Ok(Matrix::from_row_major_data(self.dimensions(), data))
    }

    /// Entrywise difference of two matrices with the same dimensions.
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_dims(other, "-")?;
        let data = self.rows().zip(other.rows())
            .flat_map(|(a, b)| sm::sub(a, b))
            .collect();
        Ok(Matrix::from_row_major_data(self.dimensions(), data))
    }

    /// Multiply by a scalar, vector, or matrix (with `self` on the left).
    ///
    /// A vector operand produces a vector; the others produce a matrix.
    pub fn multiply<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Product> {
        match rhs.into() {
            Operand::Scalar(k) => Ok(Product::Matrix(self.scalar_mul(k))),
            Operand::Vector(v) => self.mul_vector(v).map(Product::Vector),
            Operand::Matrix(m) => self.matmul(m).map(Product::Matrix),
        }
    }

    pub fn scalar_mul(&self, k: impl Into<Scalar>) -> Matrix {
        let k = k.into();
        let data = self.rows().flat_map(|row| sm::scalar_mul(row, k)).collect();
        Matrix::from_row_major_data(self.dimensions(), data)
    }

    /// Matrix-vector product.
    pub fn mul_vector(&self, v: &Vector) -> Result<Vector> {
        if self.width != v.dimensions() {
            return Err(Error::dimensions(format!(
                "incompatible matrix-vector multiplication: a {}x{} matrix needs a vector \
                 with {} dimensions (got {})",
                self.height, self.width, self.width, v.dimensions(),
            )));
        }
        trace!("matrix-vector product: ({}, {}) x ({})", self.height, self.width, v.dimensions());
        Ok(self.rows().map(|row| sm::dot(row, v.components())).collect())
    }

    /// Matrix-matrix product.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        let (a_rows, a_cols) = self.dimensions();
        let (b_rows, b_cols) = other.dimensions();
        if a_cols != b_rows {
            return Err(Error::dimensions(format!(
                "incompatible matrices for multiplication: \
                 an m x n matrix can only be multiplied by an n x p matrix (got {}x{} and {}x{})",
                a_rows, a_cols, b_rows, b_cols,
            )));
        }
        trace!("matrix product: ({}, {}) x ({}, {})", a_rows, a_cols, b_rows, b_cols);

        // this is suboptimal.  who cares.
        let b_t = other.to_transpose();
        let mut data = Vec::with_capacity(a_rows * b_cols);
        for a_row in self.rows() {
            data.extend(b_t.rows().map(|b_col| sm::dot(a_row, b_col)));
        }
        Ok(Matrix::from_row_major_data((a_rows, b_cols), data))
    }

    /// Structural equality. Anything that isn't a matrix is unequal.
    pub fn equals<'a>(&self, other: impl Into<Operand<'a>>) -> bool {
        match other.into() {
            Operand::Matrix(other) => self == other,
            _ => false,
        }
    }

    pub fn not_equals<'a>(&self, other: impl Into<Operand<'a>>) -> bool
    { !self.equals(other) }

    fn check_same_dims(&self, other: &Matrix, op: &str) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimensions(format!(
                "operand {} requires two matrices with the same dimensions (got {:?} and {:?})",
                op, self.dimensions(), other.dimensions(),
            )));
        }
        Ok(())
    }
}

impl Round for Matrix {
    fn rounded(&self, places: i32) -> Self {
        let data = self.data.iter().map(|x| x.round(places)).collect();
        Matrix::from_row_major_data(self.dimensions(), data)
    }
}

// ---------------------------------------------------------------------------
// std integration

impl Index<(usize, usize)> for Matrix {
    type Output = Scalar;

    #[inline(always)] // inlining should often remove bounds checks
    fn index(&self, (r, c): (usize, usize)) -> &Scalar {
        assert!(c < self.width, "column {} out of bounds for width {}", c, self.width);
        &self.data[r * self.width + c]
    }
}

impl PartialEq<Vector> for Matrix {
    fn eq(&self, _: &Vector) -> bool { false }
}

impl<'a, 'b> Add<&'b Matrix> for &'a Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: &'b Matrix) -> Self::Output
    { Matrix::add(self, rhs) }
}

impl<'a, 'b> Sub<&'b Matrix> for &'a Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: &'b Matrix) -> Self::Output
    { Matrix::sub(self, rhs) }
}

impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: &'b Matrix) -> Self::Output
    { self.matmul(rhs) }
}

impl<'a, 'b> Mul<&'b Vector> for &'a Matrix {
    type Output = Result<Vector>;

    fn mul(self, rhs: &'b Vector) -> Self::Output
    { self.mul_vector(rhs) }
}

impl<'a> Mul<Scalar> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Scalar) -> Matrix
    { self.scalar_mul(rhs) }
}

impl std::convert::TryFrom<Vec<Vec<Scalar>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<Scalar>>) -> Result<Matrix>
    { Matrix::new(rows) }
}

impl From<Matrix> for Vec<Vec<Scalar>> {
    fn from(m: Matrix) -> Self
    { m.components() }
}

// Written as `Matrix([8, 15], [5, 10])`.  A single row has no trailing comma.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix(")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}]", row.iter().format(", "))?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { fmt::Display::fmt(self, f) }
}

impl CheckClose for Matrix {
    type Scalar = f64;

    fn check_close(&self, other: &Matrix, tol: Tolerances) -> std::result::Result<(), CheckCloseError<f64>> {
        if self.width != other.width {
            return Err(CheckCloseError::Lengths(self.width, other.width));
        }
        self.data.check_close(&other.data, tol)
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use lalg_slice_math::Scalar::{Int, Real};

    fn mat(rows: Vec<Vec<i64>>) -> Matrix
    { Matrix::new(rows).unwrap() }

    fn random_matrix((rows, cols): (usize, usize)) -> Matrix {
        Matrix::new((0..rows).map(|_| {
            (0..cols).map(|_| ::rand::random::<f64>() - 0.5).collect::<Vec<_>>()
        })).unwrap()
    }

    #[test]
    fn construction() {
        let m = mat(vec![vec![2, 3, 2], vec![1, 2, 5]]);
        assert_eq!((2, 3), m.dimensions());
        assert_eq!(vec![vec![Int(2), Int(3), Int(2)], vec![Int(1), Int(2), Int(5)]], m.components());
        assert_eq!(Int(5), m[(1, 2)]);

        let err = Matrix::new(vec![vec![2, 3], vec![2]]).unwrap_err();
        assert_eq!(ErrorKind::Dimensions, err.kind());

        let err = Matrix::new(Vec::<Vec<i64>>::new()).unwrap_err();
        assert_eq!(ErrorKind::Dimensions, err.kind());

        let empty_rows = Matrix::new(vec![Vec::<i64>::new(), vec![]]).unwrap();
        assert_eq!((2, 0), empty_rows.dimensions());
        assert_eq!(2, empty_rows.rows().len());
    }

    #[test]
    fn set_components_is_atomic() {
        let mut m = mat(vec![vec![1, 2]]);
        m.set_components(vec![vec![1.5], vec![2.5]]).unwrap();
        assert_eq!((2, 1), m.dimensions());

        let before = m.clone();
        assert!(m.set_components(vec![vec![1, 2], vec![3]]).is_err());
        assert_eq!(before, m);
    }

    #[test]
    fn add_sub() {
        let a = mat(vec![vec![1, 2], vec![3, 4]]);
        let b = mat(vec![vec![10, 20], vec![30, 40]]);
        assert_eq!(mat(vec![vec![11, 22], vec![33, 44]]), a.add(&b).unwrap());
        assert_eq!(mat(vec![vec![9, 18], vec![27, 36]]), b.sub(&a).unwrap());
        assert_eq!(mat(vec![vec![11, 22], vec![33, 44]]), (&a + &b).unwrap());

        let c = mat(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(ErrorKind::Dimensions, a.add(&c).unwrap_err().kind());
        assert_eq!(ErrorKind::Dimensions, (&a - &c).unwrap_err().kind());
        let tall = mat(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!(ErrorKind::Dimensions, a.sub(&tall).unwrap_err().kind());
    }

    #[test]
    fn multiply_scalar() {
        let a = mat(vec![vec![1, 2], vec![3, 4]]);
        let out = a.multiply(2).unwrap().into_matrix().unwrap();
        assert_eq!(mat(vec![vec![2, 4], vec![6, 8]]), out);

        let out = a.multiply(0.5).unwrap().into_matrix().unwrap();
        assert_eq!(Matrix::new(vec![vec![0.5, 1.0], vec![1.5, 2.0]]).unwrap(), out);
        assert_eq!(out, &a * Real(0.5));
    }

    #[test]
    fn multiply_matrix() {
        let a = mat(vec![vec![2, 3], vec![1, 2]]);
        let b = mat(vec![vec![1, 0], vec![2, 5]]);
        let out = a.multiply(&b).unwrap().into_matrix().unwrap();
        assert_eq!(mat(vec![vec![8, 15], vec![5, 10]]), out);

        // non-square
        let a = mat(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let b = mat(vec![vec![7], vec![8], vec![9]]);
        assert_eq!(mat(vec![vec![50], vec![122]]), a.matmul(&b).unwrap());
        assert_eq!(ErrorKind::Dimensions, b.matmul(&a).unwrap_err().kind());
        let tall = mat(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!((3, 3), tall.matmul(&a).unwrap().dimensions());
        assert_eq!(mat(vec![vec![9, 12, 15], vec![19, 26, 33], vec![29, 40, 51]]), tall.matmul(&a).unwrap());

        assert_eq!(ErrorKind::Dimensions, a.multiply(&a).unwrap_err().kind());
    }

    #[test]
    fn multiply_vector() {
        let a = mat(vec![vec![2, 3, 2], vec![1, 2, 5]]);
        let err = a.multiply(&Vector::new(vec![1, 2])).unwrap_err();
        assert_eq!(ErrorKind::Dimensions, err.kind());

        let out = a.multiply(&Vector::new(vec![1, 2, 3])).unwrap().into_vector().unwrap();
        assert_eq!(Vector::new(vec![14, 20]), out);
        assert_eq!(out, (&a * &Vector::new(vec![1, 2, 3])).unwrap());
    }

    #[test]
    fn prop_matmul_associates() {
        for _ in 0..10 {
            let a = random_matrix((2, 3));
            let b = random_matrix((3, 4));
            let c = random_matrix((4, 2));
            let ab_c = a.matmul(&b).unwrap().matmul(&c).unwrap();
            let a_bc = a.matmul(&b.matmul(&c).unwrap()).unwrap();
            assert_close!(abs=1e-12, ab_c, a_bc);
        }
    }

    #[test]
    fn matmul_does_not_commute() {
        let a = mat(vec![vec![2, 3], vec![1, 2]]);
        let b = mat(vec![vec![1, 0], vec![2, 5]]);
        assert_ne!(a.matmul(&b).unwrap(), b.matmul(&a).unwrap());
    }

    #[test]
    fn equality() {
        let a = mat(vec![vec![1, 2]]);
        assert!(a.equals(&Matrix::new(vec![vec![1.0, 2.0]]).unwrap()));
        assert!(a.not_equals(&mat(vec![vec![1], vec![2]])));
        assert!(!a.equals(&Vector::new(vec![1, 2])));
        assert!(a.not_equals(3));
        assert!(a != Vector::new(vec![1, 2]));
    }

    #[test]
    fn rounded() {
        let m = Matrix::new(vec![vec![1.26, 2.0], vec![-0.34, 7.0]]).unwrap();
        let expected = Matrix::new(vec![vec![1.3, 2.0], vec![-0.3, 7.0]]).unwrap();
        assert_close!(expected, crate::round(&m, 1));
    }

    #[test]
    fn display() {
        let m = Matrix::new(vec![vec![Int(8), Int(15)], vec![Real(5.0), Real(10.5)]]).unwrap();
        assert_eq!("Matrix([8, 15], [5.0, 10.5])", m.to_string());
        assert_eq!("Matrix([])", Matrix::new(vec![Vec::<i64>::new()]).unwrap().to_string());
        assert_eq!("Matrix([8, 15])", mat(vec![vec![8, 15]]).to_string());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let m: Matrix = serde_json::from_str("[[1, 2], [3, 4.5]]").unwrap();
        assert_eq!(Matrix::new(vec![vec![Int(1), Int(2)], vec![Int(3), Real(4.5)]]).unwrap(), m);
        assert_eq!("[[1,2],[3,4.5]]", serde_json::to_string(&m).unwrap());
        assert!(serde_json::from_str::<Matrix>("[[1, 2], [3]]").is_err());
        assert!(serde_json::from_str::<Matrix>("[]").is_err());
    }
}
