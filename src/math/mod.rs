//! Miscellaneous math functions for general use

/// Free functions for handling and converting between
/// different representations of angles.
pub mod angular;

/// A thin matrix type over `nalgebra`, sufficient for the
/// affine algebra of datum shifts.
pub mod matrix;
pub use matrix::Matrix;
