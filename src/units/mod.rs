//! Linear and angular units of measure.
//!
//! Conversions are performed by means of a pivot unit: meters for linear
//! units and radians for angular units. The sexagesimal DDD.MMSSsss
//! representation (EPSG unit 9110) is not a scaled unit, and is converted
//! through decimal degrees instead.
//!
//! Units are taken from PROJ <https://github.com/OSGeo/PROJ/blob/master/src/units.c>
use crate::math::angular;
use crate::Error;
use std::fmt;

// ----- L I N E A R   U N I T S -----------------------------------------------------

/// A linear unit and its conversion factor to meters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearUnit {
    name: &'static str,
    description: &'static str,
    to_meter: f64,
}

impl LinearUnit {
    pub const METER: LinearUnit = LinearUnit::new("m", "Meter", 1.0);
    pub const KILOMETER: LinearUnit = LinearUnit::new("km", "Kilometer", 1000.0);
    pub const FOOT: LinearUnit = LinearUnit::new("ft", "International Foot", 0.3048);
    pub const US_SURVEY_FOOT: LinearUnit =
        LinearUnit::new("us-ft", "U.S. Surveyor's Foot", 1200.0 / 3937.0);

    const fn new(name: &'static str, description: &'static str, to_meter: f64) -> LinearUnit {
        LinearUnit {
            name,
            description,
            to_meter,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The multiplier taking a value in this unit to meters
    pub fn multiplier(&self) -> f64 {
        self.to_meter
    }

    /// Look up a unit by its abbreviation, e.g. "m", "ft", "us-ft"
    pub fn named(name: &str) -> Result<LinearUnit, Error> {
        LINEAR_UNITS
            .iter()
            .find(|u| u.name == name)
            .copied()
            .ok_or_else(|| Error::NotFound(name.to_string(), "linear units".to_string()))
    }

    /// Convert `value`, given in this unit, to `target`
    #[must_use]
    pub fn convert(&self, value: f64, target: &LinearUnit) -> f64 {
        if self == target {
            return value;
        }
        value * self.to_meter / target.to_meter
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The known linear units and their conversion to meters.
#[rustfmt::skip]
pub const LINEAR_UNITS: [LinearUnit; 21] = [
    LinearUnit::new("km",      "Kilometer",                    1000.0),
    LinearUnit::new("m",       "Meter",                        1.0),
    LinearUnit::new("dm",      "Decimeter",                    0.1),
    LinearUnit::new("cm",      "Centimeter",                   0.01),
    LinearUnit::new("mm",      "Millimeter",                   0.001),
    LinearUnit::new("kmi",     "International Nautical Mile",  1852.0),
    LinearUnit::new("in",      "International Inch",           0.0254),
    LinearUnit::new("ft",      "International Foot",           0.3048),
    LinearUnit::new("yd",      "International Yard",           0.9144),
    LinearUnit::new("mi",      "International Statute Mile",   1609.344),
    LinearUnit::new("fath",    "International Fathom",         1.8288),
    LinearUnit::new("ch",      "International Chain",          20.1168),
    LinearUnit::new("link",    "International Link",           0.201168),
    LinearUnit::new("us-in",   "U.S. Surveyor's Inch",         100.0 / 3937.0),
    LinearUnit::new("us-ft",   "U.S. Surveyor's Foot",         1200.0 / 3937.0),
    LinearUnit::new("us-yd",   "U.S. Surveyor's Yard",         3600.0 / 3937.0),
    LinearUnit::new("us-ch",   "U.S. Surveyor's Chain",        79200.0 / 3937.0),
    LinearUnit::new("us-mi",   "U.S. Surveyor's Statute Mile", 6336000.0 / 3937.0),
    LinearUnit::new("ind-yd",  "Indian Yard",                  0.91439523),
    LinearUnit::new("ind-ft",  "Indian Foot",                  0.30479841),
    LinearUnit::new("ind-ch",  "Indian Chain",                 20.11669506),
];

// ----- A N G U L A R   U N I T S ---------------------------------------------------

const DEG_TO_RAD: f64 = 0.017453292519943296;
const GRAD_TO_RAD: f64 = 0.015707963267948967;

/// How an angular unit relates to radians
#[derive(Clone, Copy, Debug, PartialEq)]
enum AngularScale {
    Factor(f64),
    /// DDD.MMSSsss, EPSG 9110
    Sexagesimal,
}

/// An angular unit and its conversion to radians
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularUnit {
    name: &'static str,
    description: &'static str,
    scale: AngularScale,
}

impl AngularUnit {
    pub const RADIAN: AngularUnit = AngularUnit::scaled("rad", "Radian", 1.0);
    pub const DEGREE: AngularUnit = AngularUnit::scaled("deg", "Degree", DEG_TO_RAD);
    pub const GRAD: AngularUnit = AngularUnit::scaled("grad", "Grad", GRAD_TO_RAD);
    pub const ARC_SECOND: AngularUnit =
        AngularUnit::scaled("arcsec", "Arc-second", DEG_TO_RAD / 3600.);
    pub const SEXAGESIMAL_DMS: AngularUnit = AngularUnit {
        name: "sexagesimal",
        description: "Sexagesimal DDD.MMSSsss",
        scale: AngularScale::Sexagesimal,
    };

    const fn scaled(name: &'static str, description: &'static str, to_radian: f64) -> AngularUnit {
        AngularUnit {
            name,
            description,
            scale: AngularScale::Factor(to_radian),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Look up a unit by its abbreviation, e.g. "deg", "grad", "sexagesimal"
    pub fn named(name: &str) -> Result<AngularUnit, Error> {
        ANGULAR_UNITS
            .iter()
            .find(|u| u.name == name)
            .copied()
            .ok_or_else(|| Error::NotFound(name.to_string(), "angular units".to_string()))
    }

    /// Convert `value`, given in this unit, to radians
    #[must_use]
    pub fn to_radians(&self, value: f64) -> f64 {
        match self.scale {
            AngularScale::Factor(f) => value * f,
            AngularScale::Sexagesimal => angular::sexagesimal_to_dd(value).to_radians(),
        }
    }

    /// Convert `value`, given in radians, to this unit
    #[must_use]
    pub fn from_radians(&self, value: f64) -> f64 {
        match self.scale {
            AngularScale::Factor(f) => value / f,
            AngularScale::Sexagesimal => angular::dd_to_sexagesimal(value.to_degrees()),
        }
    }

    /// Convert `value`, given in this unit, to `target`
    #[must_use]
    pub fn convert(&self, value: f64, target: &AngularUnit) -> f64 {
        if self == target {
            return value;
        }
        // Straight to degrees, not via radians
        if *target == AngularUnit::DEGREE {
            return match self.scale {
                AngularScale::Sexagesimal => angular::sexagesimal_to_dd(value),
                AngularScale::Factor(f) => value * (f / DEG_TO_RAD),
            };
        }
        target.from_radians(self.to_radians(value))
    }
}

impl fmt::Display for AngularUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// Angular units and their conversion to radians
#[rustfmt::skip]
pub const ANGULAR_UNITS: [AngularUnit; 7] = [
    AngularUnit::RADIAN,
    AngularUnit::DEGREE,
    AngularUnit::GRAD,
    AngularUnit::scaled("arcmin",  "Arc-minute",  DEG_TO_RAD / 60.),
    AngularUnit::ARC_SECOND,
    AngularUnit::scaled("urad",    "Microradian", 1e-6),
    AngularUnit::SEXAGESIMAL_DMS,
];

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn linear() -> Result<(), Error> {
        let ft = LinearUnit::named("ft")?;
        assert_eq!(ft, LinearUnit::FOOT);
        assert_float_eq!(ft.convert(1000., &LinearUnit::METER), 304.8, abs <= 1e-12);
        assert_float_eq!(
            LinearUnit::KILOMETER.convert(6378.137, &LinearUnit::METER),
            6_378_137.,
            rmax <= 1e-15
        );
        assert_eq!(LinearUnit::METER.convert(42., &LinearUnit::METER), 42.);
        assert!(LinearUnit::named("furlong").is_err());
        Ok(())
    }

    #[test]
    fn angular() -> Result<(), Error> {
        let grad = AngularUnit::named("grad")?;
        // The Paris meridian
        let paris = grad.convert(2.5969213, &AngularUnit::DEGREE);
        assert_float_eq!(paris, 2.33722917, abs <= 1e-8);
        assert_float_eq!(
            grad.convert(100., &AngularUnit::RADIAN),
            std::f64::consts::FRAC_PI_2,
            abs <= 1e-15
        );

        let dms = AngularUnit::SEXAGESIMAL_DMS;
        assert_float_eq!(dms.convert(2.2014025, &AngularUnit::DEGREE), 2.33722917, abs <= 1e-8);
        assert_float_eq!(
            AngularUnit::DEGREE.convert(55.51, &dms),
            55.3036,
            abs <= 1e-12
        );
        assert_float_eq!(
            AngularUnit::ARC_SECOND.convert(3600., &AngularUnit::DEGREE),
            1.,
            abs <= 1e-15
        );
        assert!(AngularUnit::named("mil").is_err());
        Ok(())
    }
}
