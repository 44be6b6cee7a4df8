mod cartesians;
mod geodesics;

pub use geodesics::Geodesic;

use crate::constants::ELLIPSOID_LIST;
use crate::internal::*;

// ----- T H E   E L L I P S O I D   I N T E R F A C E --------------------------------

/// The defining parameters of a reference ellipsoid, as offered by any
/// ellipsoid representation. Derived shape descriptors come for free.
pub trait EllipsoidBase {
    fn identification(&self) -> &IdentifiedObject;

    /// The semimajor axis, *a*
    fn semimajor_axis(&self) -> f64;

    /// The semiminor axis, *b*
    fn semiminor_axis(&self) -> f64;

    /// The inverse flattening, *1/f*. Infinite for a sphere.
    fn inverse_flattening(&self) -> f64;

    /// True if the inverse flattening is the defining quantity,
    /// false if the semiminor axis is.
    fn is_ivf_definitive(&self) -> bool;

    /// The unit of the axes
    fn axis_unit(&self) -> LinearUnit;

    fn is_sphere(&self) -> bool {
        self.semimajor_axis() == self.semiminor_axis()
    }

    /// The flattening, *f = (a - b)/a*
    fn flattening(&self) -> f64 {
        let a = self.semimajor_axis();
        (a - self.semiminor_axis()) / a
    }

    /// The squared eccentricity *e² = (a² - b²) / a² = 2f - f²*.
    fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2_f64 - f)
    }

    /// The eccentricity *e*
    fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    /// The second eccentricity *e'*
    fn second_eccentricity(&self) -> f64 {
        self.second_eccentricity_squared().sqrt()
    }

    /// Downcast, for representations that already are an [`Ellipsoid`]
    fn as_ellipsoid(&self) -> Option<&Ellipsoid> {
        None
    }
}

// ----- T H E   E L L I P S O I D -----------------------------------------------------

/// An ellipsoid of revolution, or a sphere.
///
/// Exactly one of the semiminor axis and the inverse flattening is the
/// defining quantity. The other one is derived at construction time, and
/// the ellipsoid is immutable thereafter.
#[derive(Clone, Debug)]
pub struct Ellipsoid {
    id: IdentifiedObject,
    a: f64,
    b: f64,
    ivf: f64,
    ivf_definitive: bool,
    unit: LinearUnit,
}

impl EllipsoidBase for Ellipsoid {
    fn identification(&self) -> &IdentifiedObject {
        &self.id
    }

    fn semimajor_axis(&self) -> f64 {
        self.a
    }

    fn semiminor_axis(&self) -> f64 {
        self.b
    }

    fn inverse_flattening(&self) -> f64 {
        self.ivf
    }

    fn is_ivf_definitive(&self) -> bool {
        self.ivf_definitive
    }

    fn axis_unit(&self) -> LinearUnit {
        self.unit
    }

    fn flattening(&self) -> f64 {
        if self.ivf_definitive {
            return 1. / self.ivf;
        }
        (self.a - self.b) / self.a
    }

    fn as_ellipsoid(&self) -> Option<&Ellipsoid> {
        Some(self)
    }
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        crate::constants::GRS80.clone()
    }
}

fn check_axis(key: &str, value: f64) -> Result<(), Error> {
    if value > 0. && value.is_finite() {
        return Ok(());
    }
    Err(Error::InvalidParameter(
        key.to_string(),
        format!("{value} is not a positive length"),
    ))
}

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// An ellipsoid defined by its two semi-axes. If they are equal, a
    /// sphere is returned.
    pub fn create_ellipsoid(
        id: impl Into<IdentifiedObject>,
        semimajor_axis: f64,
        semiminor_axis: f64,
        unit: LinearUnit,
    ) -> Result<Ellipsoid, Error> {
        let id = id.into();
        id.validate("ellipsoid")?;
        check_axis("semimajor_axis", semimajor_axis)?;
        check_axis("semiminor_axis", semiminor_axis)?;

        let (a, b) = (semimajor_axis, semiminor_axis);
        #[allow(clippy::float_cmp)]
        let ivf = if a == b { f64::INFINITY } else { a / (a - b) };
        Ok(Ellipsoid {
            id,
            a,
            b,
            ivf,
            ivf_definitive: false,
            unit,
        })
    }

    /// An ellipsoid defined by its semimajor axis and inverse flattening.
    /// An infinite inverse flattening gives a sphere.
    pub fn create_flattened_sphere(
        id: impl Into<IdentifiedObject>,
        semimajor_axis: f64,
        inverse_flattening: f64,
        unit: LinearUnit,
    ) -> Result<Ellipsoid, Error> {
        if inverse_flattening.is_nan() {
            return Err(Error::InvalidParameter(
                "inverse_flattening".to_string(),
                "NaN".to_string(),
            ));
        }
        if inverse_flattening.is_infinite() {
            return Ellipsoid::create_ellipsoid(id, semimajor_axis, semimajor_axis, unit);
        }

        let id = id.into();
        id.validate("ellipsoid")?;
        check_axis("semimajor_axis", semimajor_axis)?;
        let b = semimajor_axis * (1. - 1. / inverse_flattening);
        check_axis("semiminor_axis", b)?;
        Ok(Ellipsoid {
            id,
            a: semimajor_axis,
            b,
            ivf: inverse_flattening,
            ivf_definitive: true,
            unit,
        })
    }

    /// Turn any ellipsoid representation into an `Ellipsoid`, retaining the
    /// choice of defining quantity.
    pub fn wrap(ellipsoid: &dyn EllipsoidBase) -> Result<Ellipsoid, Error> {
        if let Some(e) = ellipsoid.as_ellipsoid() {
            return Ok(e.clone());
        }
        let id = ellipsoid.identification().clone();
        let a = ellipsoid.semimajor_axis();
        let unit = ellipsoid.axis_unit();
        if ellipsoid.is_ivf_definitive() {
            return Ellipsoid::create_flattened_sphere(id, a, ellipsoid.inverse_flattening(), unit);
        }
        Ellipsoid::create_ellipsoid(id, a, ellipsoid.semiminor_axis(), unit)
    }

    /// Construct from trusted parameters, in meters. EPSG convention: zero
    /// reciproque flattening indicates a sphere.
    pub(crate) fn predefined(id: IdentifiedObject, a: f64, rf: f64) -> Ellipsoid {
        if rf == 0. || rf.is_infinite() {
            return Ellipsoid {
                id,
                a,
                b: a,
                ivf: f64::INFINITY,
                ivf_definitive: false,
                unit: LinearUnit::METER,
            };
        }
        Ellipsoid {
            id,
            a,
            b: a * (1. - 1. / rf),
            ivf: rf,
            ivf_definitive: true,
            unit: LinearUnit::METER,
        }
    }

    /// Predefined ellipsoid; built-in, or given as a string formatted
    /// (a, rf) tuple, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        // Is it one of the few builtins?
        let wanted = name.trim();
        if let Some(e) = ELLIPSOID_LIST.iter().find(|e| {
            e.0.eq_ignore_ascii_case(wanted) || e.1.eq_ignore_ascii_case(wanted)
        }) {
            let id = IdentifiedObject::new(e.0).with_alias(e.1);
            return Ok(Ellipsoid::predefined(id, e.2, e.3));
        }

        // Remove optional parenthesis
        let mut inner = wanted;
        if let Some(stripped) = inner.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            inner = stripped;
        }

        // The "semimajor, reciproque-flattening" form, e.g. "6378137, 298.3"
        let a_and_rf = inner.split(',').collect::<Vec<_>>();
        if a_and_rf.len() == 2_usize {
            if let Ok(a) = a_and_rf[0].trim().parse::<f64>() {
                if let Ok(rf) = a_and_rf[1].trim().parse::<f64>() {
                    let rf = if rf == 0. { f64::INFINITY } else { rf };
                    return Ellipsoid::create_flattened_sphere(wanted, a, rf, LinearUnit::METER);
                }
            }
        }

        Err(Error::NotFound(
            String::from(name),
            String::from("Ellipsoid::named()"),
        ))
    }
}

impl Ellipsoid {
    /// Name, aliases and authority codes
    pub fn identification(&self) -> &IdentifiedObject {
        &self.id
    }
}

// ----- C U R V A T U R E S -----------------------------------------------------------

impl Ellipsoid {
    /// The radius of curvature in the prime vertical, *N*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.is_sphere() {
            return self.a;
        }
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *M*
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.is_sphere() {
            return self.a;
        }
        let num = self.a * (1.0 - self.eccentricity_squared());
        let denom = (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).powf(1.5);
        num / denom
    }

    /// The polar radius of curvature, *c*
    #[must_use]
    pub fn polar_radius_of_curvature(&self) -> f64 {
        self.a * self.a / self.b
    }
}

// ----- E Q U A L I T Y ---------------------------------------------------------------

impl Comparable for Ellipsoid {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        if mode == ComparisonMode::Strict {
            return self.id == other.id
                && self.unit == other.unit
                && self.ivf_definitive == other.ivf_definitive
                && self.a == other.a
                && self.b == other.b;
        }

        if self.unit == other.unit {
            return self.a == other.a && self.b == other.b;
        }
        let a = other.unit.convert(other.a, &self.unit);
        let b = other.unit.convert(other.b, &self.unit);
        let tolerance = 4. * f64::EPSILON;
        float_eq::float_eq!(a, self.a, rmax <= tolerance)
            && float_eq::float_eq!(b, self.b, rmax <= tolerance)
    }
}

impl PartialEq for Ellipsoid {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, ComparisonMode::Strict)
    }
}

// ----- W K T -------------------------------------------------------------------------

impl FormatWkt for Ellipsoid {
    fn keyword(&self) -> &'static str {
        "SPHEROID"
    }

    fn identification(&self) -> Option<&IdentifiedObject> {
        Some(&self.id)
    }

    fn format_wkt(&self, formatter: &mut Formatter) {
        let unit = formatter.linear_unit();
        formatter.append_f64(self.unit.convert(self.a, &unit));
        // WKT convention: Zero inverse flattening for spheres
        let ivf = if self.ivf.is_infinite() { 0. } else { self.ivf };
        formatter.append_f64(ivf);
    }
}

// ----- Tests ---------------------------------------------------------------------
