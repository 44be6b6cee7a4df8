use super::*;

/// The kind of vertical reference, with the legacy numeric codes of the
/// OGC 01-009 WKT specification (see [OGC 2001](crate::Bibliography::Ogc01))
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalDatumType {
    Other,
    Orthometric,
    Ellipsoidal,
    Barometric,
    Geoidal,
    Depth,
}

#[rustfmt::skip]
const LEGACY_CODES: [(VerticalDatumType, i32); 6] = [
    (VerticalDatumType::Other,       2000),
    (VerticalDatumType::Orthometric, 2001),
    (VerticalDatumType::Ellipsoidal, 2002),
    (VerticalDatumType::Barometric,  2003),
    (VerticalDatumType::Geoidal,     2005),
    (VerticalDatumType::Depth,       2006),
];

impl VerticalDatumType {
    pub fn legacy_code(&self) -> i32 {
        match self {
            VerticalDatumType::Other => 2000,
            VerticalDatumType::Orthometric => 2001,
            VerticalDatumType::Ellipsoidal => 2002,
            VerticalDatumType::Barometric => 2003,
            VerticalDatumType::Geoidal => 2005,
            VerticalDatumType::Depth => 2006,
        }
    }

    /// `None` for codes not in the table
    pub fn from_legacy_code(code: i32) -> Option<VerticalDatumType> {
        LEGACY_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(t, _)| *t)
    }
}

/// A vertical datum, the reference for heights or depths
#[derive(Clone, Debug)]
pub struct VerticalDatum {
    common: DatumCommon,
    vertical_datum_type: VerticalDatumType,
}

impl VerticalDatum {
    pub fn new(
        common: DatumCommon,
        vertical_datum_type: VerticalDatumType,
    ) -> Result<VerticalDatum, Error> {
        common.identification().validate("vertical datum")?;
        Ok(VerticalDatum {
            common,
            vertical_datum_type,
        })
    }

    pub fn common(&self) -> &DatumCommon {
        &self.common
    }

    pub fn vertical_datum_type(&self) -> VerticalDatumType {
        self.vertical_datum_type
    }
}

impl Comparable for VerticalDatum {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        self.common.equals(&other.common, mode)
            && self.vertical_datum_type == other.vertical_datum_type
    }
}

impl PartialEq for VerticalDatum {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, ComparisonMode::Strict)
    }
}

impl FormatWkt for VerticalDatum {
    fn keyword(&self) -> &'static str {
        "VERT_DATUM"
    }

    fn identification(&self) -> Option<&IdentifiedObject> {
        Some(self.common.identification())
    }

    fn format_wkt(&self, formatter: &mut Formatter) {
        formatter.append_integer(self.vertical_datum_type.legacy_code().into());
    }
}

// ----- T E S T S ---------------------------------------------------------------------
