use super::*;

use std::f64::consts::FRAC_PI_2;

impl Ellipsoid {
    // ----- Cartesian <--> Geographic conversion ----------------------------------

    /// Geographic to earth centered cartesian conversion. Input is
    /// `[longitude, latitude, height]`, angles in radians, height in the
    /// unit of the ellipsoid axes.
    ///
    /// Follows the the derivation given by
    /// Bowring ([1976](crate::Bibliography::Bow76) and
    /// [1985](crate::Bibliography::Bow85))
    #[must_use]
    #[allow(non_snake_case)] // make it possible to mimic math notation from the paper
    pub fn cartesian(&self, geographic: [f64; 3]) -> [f64; 3] {
        let [lam, phi, h] = geographic;

        let N = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;

        [X, Y, Z]
    }

    /// Cartesian to geogaphic conversion, the inverse of
    /// [`cartesian`](Ellipsoid::cartesian).
    ///
    /// Uses the closed form of Fukushima ([1999](crate::Bibliography::Fuk99)),
    /// with the height expression from Bowring ([1985](crate::Bibliography::Bow85))
    #[must_use]
    #[allow(non_snake_case)]
    pub fn geographic(&self, cartesian: [f64; 3]) -> [f64; 3] {
        let [X, Y, Z] = cartesian;

        let b = self.b;
        let eps = self.second_eccentricity_squared();
        let es = self.eccentricity_squared();

        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis
        let p = X.hypot(Y);

        // Below 1 picometer from the axis, the point is on a pole
        if p < 1.0e-12 {
            let phi = FRAC_PI_2.copysign(Z);
            let h = Z.abs() - b;
            return [lam, phi, h];
        }

        let T = (Z * self.a) / (p * b);
        let c = 1.0 / (1.0 + T * T).sqrt();
        let s = c * T;

        let phi_num = Z + eps * b * s.powi(3);
        let phi_denom = p - es * self.a * c.powi(3);
        let phi = phi_num.atan2(phi_denom);

        let lenphi = phi_num.hypot(phi_denom);
        let sinphi = phi_num / lenphi;
        let cosphi = phi_denom / lenphi;

        let N = self.a / (1.0 - sinphi.powi(2) * es).sqrt();

        // More accurate than h = p / cosphi - N, near the poles
        let h = p * cosphi + Z * sinphi - self.a * self.a / N;

        [lam, phi, h]
    }
}
