use super::*;
use crate::bursa_wolf::BursaWolfParameters;
use crate::ellipsoid::Ellipsoid;
use crate::math::Matrix;
use crate::meridian::PrimeMeridian;

/// A geodetic datum: An ellipsoid, a prime meridian, and the datum shifts
/// known to apply towards other geodetic datums.
#[derive(Clone, Debug)]
pub struct GeodeticDatum {
    common: DatumCommon,
    ellipsoid: Ellipsoid,
    prime_meridian: PrimeMeridian,
    bursa_wolf: Vec<BursaWolfParameters>,
}

impl GeodeticDatum {
    pub fn new(
        common: DatumCommon,
        ellipsoid: Ellipsoid,
        prime_meridian: PrimeMeridian,
    ) -> Result<GeodeticDatum, Error> {
        common.identification().validate("geodetic datum")?;
        Ok(GeodeticDatum::predefined(common, ellipsoid, prime_meridian))
    }

    pub(crate) fn predefined(
        common: DatumCommon,
        ellipsoid: Ellipsoid,
        prime_meridian: PrimeMeridian,
    ) -> GeodeticDatum {
        GeodeticDatum {
            common,
            ellipsoid,
            prime_meridian,
            bursa_wolf: Vec::new(),
        }
    }

    /// Attach datum shift parameters. Parameter sets equal to one already
    /// attached are ignored.
    #[must_use]
    pub fn with_bursa_wolf<I>(mut self, parameters: I) -> GeodeticDatum
    where
        I: IntoIterator<Item = BursaWolfParameters>,
    {
        for p in parameters {
            if !self.bursa_wolf.contains(&p) {
                self.bursa_wolf.push(p);
            }
        }
        self
    }

    pub fn common(&self) -> &DatumCommon {
        &self.common
    }

    pub fn name(&self) -> &str {
        self.common.name()
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn prime_meridian(&self) -> &PrimeMeridian {
        &self.prime_meridian
    }

    /// All attached datum shift parameters, in order of attachment
    pub fn bursa_wolf_parameters(&self) -> &[BursaWolfParameters] {
        &self.bursa_wolf
    }

    /// The first parameter set towards `target` (ignoring metadata), if any
    pub fn bursa_wolf_parameters_to(&self, target: &GeodeticDatum) -> Option<BursaWolfParameters> {
        self.parameters_to(target).cloned()
    }

    fn parameters_to(&self, target: &GeodeticDatum) -> Option<&BursaWolfParameters> {
        self.bursa_wolf
            .iter()
            .find(|p| p.target_datum().equals(target, ComparisonMode::IgnoreMetadata))
    }

    /// Is `datum` WGS84, disregarding metadata and attached datum shifts?
    pub fn is_wgs84(datum: &GeodeticDatum) -> bool {
        crate::constants::WGS84_DATUM.equals(datum, ComparisonMode::IgnoreMetadata)
    }
}

// ----- D A T U M   S H I F T   S E A R C H -------------------------------------------

impl GeodeticDatum {
    /// The affine matrix taking geocentric cartesian coordinates from `source`
    /// to `target`, or `None` if no way is known.
    ///
    /// Tried in order: Parameters held by `source` towards `target`, the
    /// inverse of parameters held by `target` towards `source`, and finally
    /// a two step shift through a datum both of them hold parameters towards.
    pub fn affine_transform(source: &GeodeticDatum, target: &GeodeticDatum) -> Option<Matrix> {
        let mut exclusion = Vec::new();
        GeodeticDatum::search(source, target, &mut exclusion)
    }

    fn search<'a>(
        source: &'a GeodeticDatum,
        target: &'a GeodeticDatum,
        exclusion: &mut Vec<&'a GeodeticDatum>,
    ) -> Option<Matrix> {
        if let Some(parameters) = source.parameters_to(target) {
            trace!("Datum shift {} -> {}: direct", source.name(), target.name());
            return Some(parameters.affine_transform());
        }

        if let Some(parameters) = target.parameters_to(source) {
            match parameters.affine_transform().invert() {
                Ok(matrix) => {
                    trace!("Datum shift {} -> {}: inverse", source.name(), target.name());
                    return Some(matrix);
                }
                Err(e) => warn!(
                    "Datum shift {} -> {}: cannot invert ({e})",
                    target.name(),
                    source.name()
                ),
            }
        }

        // Each datum is used at most once along a path
        fn excluded(datum: &GeodeticDatum, exclusion: &[&GeodeticDatum]) -> bool {
            exclusion
                .iter()
                .any(|d| d.equals(datum, ComparisonMode::IgnoreMetadata))
        }
        if excluded(source, exclusion) {
            return None;
        }
        let mark = exclusion.len();
        exclusion.push(source);
        if excluded(target, exclusion) {
            exclusion.truncate(mark);
            return None;
        }
        exclusion.push(target);

        let mut result = None;
        'search: for source_step in source.bursa_wolf.iter().map(|p| p.target_datum()) {
            for target_step in target.bursa_wolf.iter().map(|p| p.target_datum()) {
                if !source_step.equals(target_step, ComparisonMode::IgnoreMetadata) {
                    continue;
                }
                let Some(step1) = GeodeticDatum::search(source, source_step, exclusion) else {
                    continue;
                };
                let Some(step2) = GeodeticDatum::search(target_step, target, exclusion) else {
                    continue;
                };
                // Apply step1 first, then step2
                match step2.multiply(&step1) {
                    Ok(matrix) => {
                        debug!(
                            "Datum shift {} -> {}: via {}",
                            source.name(),
                            target.name(),
                            source_step.name()
                        );
                        result = Some(matrix);
                        break 'search;
                    }
                    Err(e) => warn!("Datum shift via {}: {e}", source_step.name()),
                }
            }
        }

        exclusion.truncate(mark);
        result
    }
}

// ----- E Q U A L I T Y ---------------------------------------------------------------

/// When ignoring metadata, the attached datum shifts are ignored too:
/// Only names, ellipsoid and prime meridian count.
impl Comparable for GeodeticDatum {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        if !self.common.equals(&other.common, mode)
            || !self.ellipsoid.equals(&other.ellipsoid, mode)
            || !self.prime_meridian.equals(&other.prime_meridian, mode)
        {
            return false;
        }
        match mode {
            ComparisonMode::Strict => self.bursa_wolf == other.bursa_wolf,
            ComparisonMode::IgnoreMetadata => true,
        }
    }
}

impl PartialEq for GeodeticDatum {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, ComparisonMode::Strict)
    }
}

// ----- W K T -------------------------------------------------------------------------

impl FormatWkt for GeodeticDatum {
    fn keyword(&self) -> &'static str {
        "DATUM"
    }

    fn identification(&self) -> Option<&IdentifiedObject> {
        Some(self.common.identification())
    }

    fn format_wkt(&self, formatter: &mut Formatter) {
        formatter.append(&self.ellipsoid);
        let towgs84 = self
            .bursa_wolf
            .iter()
            .find(|p| GeodeticDatum::is_wgs84(p.target_datum()));
        if let Some(parameters) = towgs84 {
            formatter.append(parameters);
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------
