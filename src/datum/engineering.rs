use super::*;

/// A local datum, e.g. for a construction site, a ship, or a laboratory.
/// Nothing but the common datum attributes.
#[derive(Clone, Debug)]
pub struct EngineeringDatum {
    common: DatumCommon,
}

impl EngineeringDatum {
    pub fn new(common: DatumCommon) -> Result<EngineeringDatum, Error> {
        common.identification().validate("engineering datum")?;
        Ok(EngineeringDatum { common })
    }

    pub fn common(&self) -> &DatumCommon {
        &self.common
    }
}

impl Comparable for EngineeringDatum {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        self.common.equals(&other.common, mode)
    }
}

impl PartialEq for EngineeringDatum {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, ComparisonMode::Strict)
    }
}

impl FormatWkt for EngineeringDatum {
    fn keyword(&self) -> &'static str {
        "LOCAL_DATUM"
    }

    fn identification(&self) -> Option<&IdentifiedObject> {
        Some(self.common.identification())
    }

    // The datum type code is undefined for local datums
    fn format_wkt(&self, formatter: &mut Formatter) {
        formatter.append_integer(0);
    }
}
