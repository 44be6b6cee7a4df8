use std::f64::consts::PI;

/// Transformation from the sexagesimal DDD.MMSSsss representation
/// (EPSG unit 9110) to degrees-with-decimals. The fractional part
/// holds minutes in its first two decimals and seconds (with
/// decimals) in the remainder, so 2.3020 reads 2°30'20".
pub fn sexagesimal_to_dd(dms: f64) -> f64 {
    let sign = dms.signum();
    let dms = dms.abs();
    let d = dms.trunc();
    // Round away the representation error picked up by the fractional
    // part, before splitting into minutes and seconds
    let mmss = ((dms - d) * 10_000. * 1e6).round() / 1e6;
    let m = (mmss / 100.).trunc();
    let s = mmss - m * 100.;
    sign * (d + (m + s / 60.) / 60.)
}

/// Transformation from degrees-with-decimals to the sexagesimal
/// DDD.MMSSsss representation.
pub fn dd_to_sexagesimal(dd: f64) -> f64 {
    let sign = dd.signum();
    let dd = dd.abs();
    let d = dd.floor();
    let mm = (dd - d) * 60.;
    let m = mm.floor();
    let s = (mm - m) * 60.;
    sign * (d + m / 100. + s / 10_000.)
}

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    let angle = (angle + PI) % (2.0 * PI);
    if angle < 0. {
        return angle + PI;
    }
    angle - PI
}

// ----- Tests ---------------------------------------------------------------------
