//! The seven parameter Helmert transformation, in the Bursa-Wolf formulation.
//!
//! The parameters describe the shift from the datum carrying them to a
//! target datum, applied to geocentric cartesian coordinates:
//!
//! ```txt
//! X' = (1 + ppm/1e6) · R · X + T
//! ```
//!
//! with the small angle rotation matrix `R` in the position vector convention
//! (EPSG method 1033), rotations given in arc seconds. See
//! [IOGP 2019](crate::Bibliography::Iogp19), section 4.4.3.
use crate::datum::GeodeticDatum;
use crate::internal::*;
use crate::math::Matrix;
use std::f64::consts::PI;

/// Arc seconds to radians
const SEC_TO_RAD: f64 = PI / (180. * 3600.);

/// Parameters of a datum shift towards `target_datum`.
///
/// The numeric fields are plain values: Translations in meters, rotations
/// in arc seconds, and scale in parts per million.
#[derive(Clone, Debug)]
pub struct BursaWolfParameters {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub ex: f64,
    pub ey: f64,
    pub ez: f64,
    pub ppm: f64,
    target: Arc<GeodeticDatum>,
}

impl BursaWolfParameters {
    /// The identity shift towards `target`
    #[must_use]
    pub fn new(target: Arc<GeodeticDatum>) -> BursaWolfParameters {
        BursaWolfParameters {
            dx: 0.,
            dy: 0.,
            dz: 0.,
            ex: 0.,
            ey: 0.,
            ez: 0.,
            ppm: 0.,
            target,
        }
    }

    #[must_use]
    pub fn with_translation(mut self, dx: f64, dy: f64, dz: f64) -> BursaWolfParameters {
        self.dx = dx;
        self.dy = dy;
        self.dz = dz;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, ex: f64, ey: f64, ez: f64) -> BursaWolfParameters {
        self.ex = ex;
        self.ey = ey;
        self.ez = ez;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, ppm: f64) -> BursaWolfParameters {
        self.ppm = ppm;
        self
    }

    /// Parameters towards `target`, decoded from an affine matrix.
    /// See [`set_affine_transform`](Self::set_affine_transform).
    pub fn from_affine_transform(
        target: Arc<GeodeticDatum>,
        matrix: &Matrix,
        eps: f64,
    ) -> Result<BursaWolfParameters, Error> {
        let mut parameters = BursaWolfParameters::new(target);
        parameters.set_affine_transform(matrix, eps)?;
        Ok(parameters)
    }

    pub fn target_datum(&self) -> &GeodeticDatum {
        &self.target
    }

    /// The shared handle to the target datum
    pub fn target(&self) -> &Arc<GeodeticDatum> {
        &self.target
    }

    /// True if all seven parameters are zero
    pub fn is_identity(&self) -> bool {
        self.is_translation() && self.dx == 0. && self.dy == 0. && self.dz == 0.
    }

    /// True if rotations and scale are zero
    pub fn is_translation(&self) -> bool {
        self.ex == 0. && self.ey == 0. && self.ez == 0. && self.ppm == 0.
    }

    /// The approximate inverse: All parameters negated, the target kept.
    /// Accurate to first order in the rotations and the scale.
    #[must_use]
    pub fn invert(&self) -> BursaWolfParameters {
        BursaWolfParameters {
            dx: -self.dx,
            dy: -self.dy,
            dz: -self.dz,
            ex: -self.ex,
            ey: -self.ey,
            ez: -self.ez,
            ppm: -self.ppm,
            target: self.target.clone(),
        }
    }
}

// ----- A F F I N E   E N C O D I N G -------------------------------------------------

impl BursaWolfParameters {
    /// The 4×4 affine matrix of the shift, for geocentric cartesian
    /// coordinates in homogenous form
    #[must_use]
    pub fn affine_transform(&self) -> Matrix {
        let s = 1. + self.ppm / 1e6;
        let rs = SEC_TO_RAD * s;

        let mut matrix = Matrix::identity(4);
        matrix[(0, 0)] = s;
        matrix[(1, 1)] = s;
        matrix[(2, 2)] = s;

        matrix[(0, 1)] = -self.ez * rs;
        matrix[(0, 2)] = self.ey * rs;
        matrix[(1, 0)] = self.ez * rs;
        matrix[(1, 2)] = -self.ex * rs;
        matrix[(2, 0)] = -self.ey * rs;
        matrix[(2, 1)] = self.ex * rs;

        matrix[(0, 3)] = self.dx;
        matrix[(1, 3)] = self.dy;
        matrix[(2, 3)] = self.dz;
        matrix
    }

    /// Decode the parameters from an affine matrix of the form produced by
    /// [`affine_transform`](Self::affine_transform). The target datum is
    /// left unchanged.
    ///
    /// The scale is the mean of the diagonal terms; each of them must agree
    /// with the mean to within `eps` ppm. The rotation terms must be
    /// antisymmetric to within `eps` arc seconds. On error, `self` is
    /// left untouched.
    pub fn set_affine_transform(&mut self, matrix: &Matrix, eps: f64) -> Result<(), Error> {
        if matrix.num_row() != 4 || matrix.num_col() != 4 {
            return Err(Error::IllegalMatrixSize {
                rows: matrix.num_row(),
                cols: matrix.num_col(),
            });
        }
        if !matrix.is_affine() {
            return Err(Error::NonAffine);
        }

        let s = (matrix[(0, 0)] + matrix[(1, 1)] + matrix[(2, 2)]) / 3.;
        let ppm = (s - 1.) * 1e6;
        for i in 0..3 {
            let deviation = (matrix[(i, i)] - 1.) * 1e6 - ppm;
            if deviation.abs() > eps {
                return Err(Error::NonUniformScale(deviation));
            }
        }

        let rs = SEC_TO_RAD * s;
        let (mut ex, mut ey, mut ez) = (0., 0., 0.);
        for j in 0..2 {
            for i in j + 1..3 {
                let elt1 = matrix[(j, i)] / rs;
                let elt2 = matrix[(i, j)] / rs;
                let asymmetry = elt1 + elt2;
                if asymmetry.abs() > eps {
                    return Err(Error::NotAntisymmetric(asymmetry));
                }
                let value = 0.5 * (elt1 - elt2);
                match (j, i) {
                    (0, 1) => ez = -value,
                    (0, 2) => ey = value,
                    _ => ex = -value,
                }
            }
        }

        self.dx = matrix[(0, 3)];
        self.dy = matrix[(1, 3)];
        self.dz = matrix[(2, 3)];
        self.ex = ex;
        self.ey = ey;
        self.ez = ez;
        self.ppm = ppm;
        Ok(())
    }
}

// ----- E Q U A L I T Y ---------------------------------------------------------------

impl PartialEq for BursaWolfParameters {
    fn eq(&self, other: &Self) -> bool {
        self.dx == other.dx
            && self.dy == other.dy
            && self.dz == other.dz
            && self.ex == other.ex
            && self.ey == other.ey
            && self.ez == other.ez
            && self.ppm == other.ppm
            && (Arc::ptr_eq(&self.target, &other.target)
                || self.target.equals(&other.target, ComparisonMode::Strict))
    }
}

// ----- W K T -------------------------------------------------------------------------

impl FormatWkt for BursaWolfParameters {
    fn keyword(&self) -> &'static str {
        "TOWGS84"
    }

    fn format_wkt(&self, formatter: &mut Formatter) {
        if !GeodeticDatum::is_wgs84(&self.target) {
            formatter.set_invalid_wkt("TOWGS84 parameters towards a datum other than WGS84");
        }
        for value in [self.dx, self.dy, self.dz, self.ex, self.ey, self.ez, self.ppm] {
            formatter.append_f64(value);
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------
