//! *Geodetic datums, reference ellipsoids and the algebra of datum shifts*.
//!
//! Ellipsoids and spheres
//! ======================
//!
//! An [`Ellipsoid`] is defined either by its two semi-axes or by the
//! semi-major axis and the inverse flattening. The factories pick the
//! spherical specialization automatically, and
//! [`orthodromic_distance`](Ellipsoid::orthodromic_distance) uses the
//! closed form for spheres and [Vincenty's](crate::Bibliography::Vin75)
//! algorithm for everything else.
//!
//! Datums and datum shifts
//! -----------------------
//!
//! A [`GeodeticDatum`] ties an ellipsoid and a [`PrimeMeridian`] together,
//! and may carry any number of [`BursaWolfParameters`], each describing the
//! seven parameter shift towards some other geodetic datum.
//! [`GeodeticDatum::affine_transform`] searches those parameters for a
//! direct, inverse or two-hop path between two datums, and returns the
//! corresponding 4×4 affine matrix for use on geocentric cartesian
//! coordinates.
//!
//! ```rust
//! use geodatum::prelude::*;
//!
//! let ed50 = registry::Registry::new().datum("ED50")?;
//! let matrix = GeodeticDatum::affine_transform(&ed50, &constants::WGS84_DATUM);
//! assert!(matrix.is_some());
//! # Ok::<(), geodatum::Error>(())
//! ```

mod bibliography;
pub mod bursa_wolf;
pub mod constants;
pub mod datum;
pub mod ellipsoid;
pub mod math;
pub mod meridian;
pub mod metadata;
pub mod registry;
pub mod units;
pub mod wkt;

pub use bibliography::Bibliography;
pub use bursa_wolf::BursaWolfParameters;
pub use datum::Datum;
pub use datum::DatumCommon;
pub use datum::EngineeringDatum;
pub use datum::GeodeticDatum;
pub use datum::TemporalDatum;
pub use datum::VerticalDatum;
pub use datum::VerticalDatumType;
pub use ellipsoid::Ellipsoid;
pub use ellipsoid::EllipsoidBase;
pub use math::Matrix;
pub use meridian::PrimeMeridian;
pub use metadata::Comparable;
pub use metadata::ComparisonMode;
pub use metadata::IdentifiedObject;
pub use units::AngularUnit;
pub use units::LinearUnit;

/// The bread-and-butter, shrink-wrapped for external use
pub mod prelude {
    pub use crate::constants;
    pub use crate::registry;
    pub use crate::BursaWolfParameters;
    pub use crate::Comparable;
    pub use crate::ComparisonMode;
    pub use crate::Datum;
    pub use crate::DatumCommon;
    pub use crate::Ellipsoid;
    pub use crate::EllipsoidBase;
    pub use crate::Error;
    pub use crate::GeodeticDatum;
    pub use crate::IdentifiedObject;
    pub use crate::Matrix;
    pub use crate::PrimeMeridian;
    pub use crate::{AngularUnit, LinearUnit};
    pub use crate::wkt::FormatWkt;
}

/// Preamble for crate-internal modules
pub(crate) mod internal {
    pub use std::sync::Arc;

    pub use log::debug;
    pub use log::trace;
    pub use log::warn;

    pub use crate::metadata::Comparable;
    pub use crate::metadata::ComparisonMode;
    pub use crate::metadata::IdentifiedObject;
    pub use crate::units::AngularUnit;
    pub use crate::units::LinearUnit;
    pub use crate::wkt::FormatWkt;
    pub use crate::wkt::Formatter;
    pub use crate::Error;
}

use thiserror::Error;

/// The crate wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("error: {0}")]
    General(&'static str),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("{0} not found in {1}")]
    NotFound(String, String),

    #[error("invalid value for parameter {0}: {1}")]
    InvalidParameter(String, String),

    #[error("illegal matrix size: {rows}×{cols}")]
    IllegalMatrixSize { rows: usize, cols: usize },

    #[error("matrix is not affine: bottom row must be [0, …, 0, 1]")]
    NonAffine,

    #[error("scale not uniform (deviation: {0} ppm)")]
    NonUniformScale(f64),

    #[error("matrix not antisymmetric (deviation: {0}\")")]
    NotAntisymmetric(f64),

    #[error("matrix is not invertible")]
    NoninvertibleMatrix,

    #[error("{0} did not converge")]
    NoConvergence(&'static str),
}
