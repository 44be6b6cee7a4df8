use crate::internal::*;

/// A prime meridian, given by its longitude relative to Greenwich,
/// positive eastwards.
#[derive(Clone, Debug)]
pub struct PrimeMeridian {
    id: IdentifiedObject,
    greenwich_longitude: f64,
    unit: AngularUnit,
}

impl PrimeMeridian {
    /// A meridian named "Greenwich" must be at zero longitude
    pub fn new(
        id: impl Into<IdentifiedObject>,
        greenwich_longitude: f64,
        unit: AngularUnit,
    ) -> Result<PrimeMeridian, Error> {
        let id = id.into();
        id.validate("prime meridian")?;
        if !greenwich_longitude.is_finite() {
            return Err(Error::InvalidParameter(
                "greenwich_longitude".to_string(),
                format!("{greenwich_longitude}"),
            ));
        }
        if id.name().eq_ignore_ascii_case("greenwich") && greenwich_longitude != 0. {
            return Err(Error::InvalidParameter(
                "greenwich_longitude".to_string(),
                format!("Greenwich is at zero longitude, not {greenwich_longitude}"),
            ));
        }
        Ok(PrimeMeridian::predefined(id, greenwich_longitude, unit))
    }

    pub(crate) fn predefined(
        id: IdentifiedObject,
        greenwich_longitude: f64,
        unit: AngularUnit,
    ) -> PrimeMeridian {
        PrimeMeridian {
            id,
            greenwich_longitude,
            unit,
        }
    }

    pub fn identification(&self) -> &IdentifiedObject {
        &self.id
    }

    /// The longitude, in the unit given by [`angular_unit`](Self::angular_unit)
    pub fn greenwich_longitude(&self) -> f64 {
        self.greenwich_longitude
    }

    pub fn angular_unit(&self) -> AngularUnit {
        self.unit
    }

    /// The longitude, converted to `unit`
    #[must_use]
    pub fn greenwich_longitude_in(&self, unit: &AngularUnit) -> f64 {
        self.unit.convert(self.greenwich_longitude, unit)
    }
}

impl Comparable for PrimeMeridian {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        match mode {
            ComparisonMode::Strict => {
                self.id == other.id
                    && self.greenwich_longitude == other.greenwich_longitude
                    && self.unit == other.unit
            }
            // Compare in degrees, as the units may differ
            ComparisonMode::IgnoreMetadata => {
                let deg = AngularUnit::DEGREE;
                let this = self.greenwich_longitude_in(&deg);
                let that = other.greenwich_longitude_in(&deg);
                float_eq::float_eq!(this, that, abs <= 1e-12)
            }
        }
    }
}

impl PartialEq for PrimeMeridian {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, ComparisonMode::Strict)
    }
}

impl FormatWkt for PrimeMeridian {
    fn keyword(&self) -> &'static str {
        "PRIMEM"
    }

    fn identification(&self) -> Option<&IdentifiedObject> {
        Some(&self.id)
    }

    fn format_wkt(&self, formatter: &mut Formatter) {
        let unit = formatter.angular_unit();
        formatter.append_f64(self.greenwich_longitude_in(&unit));
    }
}

// ----- T E S T S ---------------------------------------------------------------------
