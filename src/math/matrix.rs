use crate::Error;
use nalgebra::{DMatrix, DVector};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A dense matrix of `f64`, backed by [`nalgebra::DMatrix`].
///
/// Only what the datum shift algebra needs is exposed: element access,
/// multiplication, inversion, and a few predicates for affine matrices.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    inner: DMatrix<f64>,
}

// ----- C O N S T R U C T O R S ---------------------------------------------

impl Matrix {
    /// A `rows`×`cols` matrix of zeros
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Matrix {
        Matrix {
            inner: DMatrix::zeros(rows, cols),
        }
    }

    /// The `n`×`n` identity matrix
    #[must_use]
    pub fn identity(n: usize) -> Matrix {
        Matrix {
            inner: DMatrix::identity(n, n),
        }
    }

    /// Build a matrix from a slice of rows. All rows must have the same,
    /// non-zero, length.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Matrix, Error> {
        let cols = rows.first().map_or(0, |r| r.len());
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return Err(Error::IllegalMatrixSize {
                rows: rows.len(),
                cols,
            });
        }
        let elements: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Ok(Matrix {
            inner: DMatrix::from_row_slice(rows.len(), cols, &elements),
        })
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(inner: DMatrix<f64>) -> Matrix {
        Matrix { inner }
    }
}

// ----- A C C E S S O R S ---------------------------------------------------

impl Matrix {
    pub fn num_row(&self) -> usize {
        self.inner.nrows()
    }

    pub fn num_col(&self) -> usize {
        self.inner.ncols()
    }

    /// The element at (`row`, `col`). Panics if out of bounds.
    #[must_use]
    pub fn element(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    /// Set the element at (`row`, `col`). Panics if out of bounds.
    pub fn set_element(&mut self, row: usize, col: usize, value: f64) {
        self[(row, col)] = value;
    }

    pub fn is_square(&self) -> bool {
        self.inner.is_square()
    }

    /// The underlying `nalgebra` matrix
    pub fn as_nalgebra(&self) -> &DMatrix<f64> {
        &self.inner
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.inner[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.inner[index]
    }
}

// ----- A L G E B R A -------------------------------------------------------

impl Matrix {
    /// The matrix product `self · other`. Applied to column vectors, the
    /// result transforms by `other` first, then by `self`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, Error> {
        if self.num_col() != other.num_row() {
            return Err(Error::IllegalMatrixSize {
                rows: other.num_row(),
                cols: other.num_col(),
            });
        }
        Ok(Matrix {
            inner: &self.inner * &other.inner,
        })
    }

    /// The inverse matrix. The inverse of an affine matrix is affine, with
    /// its last row exactly `[0, …, 0, 1]`.
    pub fn invert(&self) -> Result<Matrix, Error> {
        if !self.is_square() {
            return Err(Error::IllegalMatrixSize {
                rows: self.num_row(),
                cols: self.num_col(),
            });
        }
        let mut inverse = self
            .inner
            .clone()
            .try_inverse()
            .ok_or(Error::NoninvertibleMatrix)?;
        if inverse.iter().any(|e| !e.is_finite()) {
            return Err(Error::NoninvertibleMatrix);
        }
        if self.is_affine() {
            let last = self.num_row() - 1;
            inverse.row_mut(last).fill(0.);
            inverse[(last, last)] = 1.;
        }
        Ok(Matrix { inner: inverse })
    }
}

// ----- P R E D I C A T E S -------------------------------------------------

impl Matrix {
    /// An affine matrix is square, with a last row of `[0, …, 0, 1]`
    pub fn is_affine(&self) -> bool {
        if !self.is_square() || self.num_row() == 0 {
            return false;
        }
        let last = self.num_row() - 1;
        self.inner
            .row(last)
            .iter()
            .enumerate()
            .all(|(j, &e)| e == if j == last { 1. } else { 0. })
    }

    /// True if all elements are within `tolerance` of the identity matrix
    pub fn is_identity(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        self.equals(&Matrix::identity(self.num_row()), tolerance)
    }

    /// Element-wise comparison with absolute tolerance
    pub fn equals(&self, other: &Matrix, tolerance: f64) -> bool {
        self.inner.shape() == other.inner.shape()
            && self
                .inner
                .iter()
                .zip(other.inner.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Apply a 4×4 affine matrix to the 3D point `p`, in homogenous
    /// coordinates `(x, y, z, 1)`.
    pub fn transform_point(&self, p: [f64; 3]) -> Result<[f64; 3], Error> {
        if self.inner.shape() != (4, 4) {
            return Err(Error::IllegalMatrixSize {
                rows: self.num_row(),
                cols: self.num_col(),
            });
        }
        let v = &self.inner * DVector::from_column_slice(&[p[0], p[1], p[2], 1.]);
        Ok([v[0], v[1], v[2]])
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.inner.row_iter() {
            write!(f, "[")?;
            for (j, e) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{e:>20.12}")?;
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() -> Result<(), Error> {
        let m = Matrix::from_rows(&[&[1., 2., 3.], &[4., 5., 6.]])?;
        assert_eq!(m.num_row(), 2);
        assert_eq!(m.num_col(), 3);
        assert_eq!(m.element(1, 2), 6.);
        assert!(!m.is_square());

        assert!(matches!(
            Matrix::from_rows(&[&[1., 2.], &[3.]]),
            Err(Error::IllegalMatrixSize { .. })
        ));
        assert!(Matrix::from_rows(&[]).is_err());

        let i = Matrix::identity(4);
        assert!(i.is_affine());
        assert!(i.is_identity(0.));
        assert_eq!(Matrix::from(nalgebra::DMatrix::<f64>::identity(4, 4)), i);
        assert_eq!(i.as_nalgebra().shape(), (4, 4));

        // Row major input
        let m = Matrix::from_rows(&[&[1., 2.], &[3., 4.]])?;
        assert_eq!(m[(0, 1)], 2.);
        assert_eq!(m[(1, 0)], 3.);
        assert!(format!("{m}").starts_with("[      1.000000000000,       2.000000000000 ]"));
        Ok(())
    }

    #[test]
    fn multiplication_order() -> Result<(), Error> {
        // Translate by 1 along x, then scale by 2
        let mut translate = Matrix::identity(4);
        translate.set_element(0, 3, 1.);
        let mut scale = Matrix::identity(4);
        for i in 0..3 {
            scale.set_element(i, i, 2.);
        }
        let combined = scale.multiply(&translate)?;
        let p = combined.transform_point([1., 1., 1.])?;
        assert_eq!(p, [4., 2., 2.]);

        let p = translate.multiply(&scale)?.transform_point([1., 1., 1.])?;
        assert_eq!(p, [3., 2., 2.]);

        let wrong = Matrix::new(3, 3);
        assert!(scale.multiply(&wrong).is_err());
        Ok(())
    }

    #[test]
    fn inversion() -> Result<(), Error> {
        let m = Matrix::from_rows(&[
            &[0., 2., 0., 5.],
            &[1., 0., 0., -3.],
            &[0., 0., 4., 1.],
            &[0., 0., 0., 1.],
        ])?;
        let inv = m.invert()?;
        assert!(inv.multiply(&m)?.is_identity(1e-15));
        assert!(m.multiply(&inv)?.is_identity(1e-15));
        assert!(inv.is_affine());

        // The inverse of a Helmert-like matrix, with rotations and scale
        let helmert = Matrix::from_rows(&[
            &[1.000_01, -2e-6, 3e-6, 100.],
            &[2e-6, 1.000_01, -1e-6, -50.],
            &[-3e-6, 1e-6, 1.000_01, 25.],
            &[0., 0., 0., 1.],
        ])?;
        let inv = helmert.invert()?;
        assert!(inv.is_affine());
        let p = [3_500_000., 800_000., 5_200_000.];
        let q = inv.transform_point(helmert.transform_point(p)?)?;
        for i in 0..3 {
            assert!((p[i] - q[i]).abs() < 1e-6);
        }

        let singular = Matrix::from_rows(&[&[1., 2.], &[2., 4.]])?;
        assert!(matches!(singular.invert(), Err(Error::NoninvertibleMatrix)));
        assert!(Matrix::new(2, 3).invert().is_err());
        assert!(matches!(Matrix::new(4, 4).invert(), Err(Error::NoninvertibleMatrix)));
        Ok(())
    }

    #[test]
    fn affine_predicate() -> Result<(), Error> {
        let mut m = Matrix::identity(4);
        m.set_element(3, 0, 1e-20);
        assert!(!m.is_affine());
        assert!(!Matrix::new(3, 4).is_affine());
        assert!(Matrix::new(4, 4).transform_point([0.; 3]).is_ok());
        assert!(Matrix::new(3, 3).transform_point([0.; 3]).is_err());
        Ok(())
    }
}
