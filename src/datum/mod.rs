//! Datums: The reference frames to which coordinates are tied.
//!
//! All datum kinds share the attributes in [`DatumCommon`]. The kinds are
//! gathered in the [`Datum`] enum, which dispatches equality and WKT output
//! to the kind specific implementations.
mod engineering;
mod geodetic;
mod temporal;
mod vertical;

pub use engineering::EngineeringDatum;
pub use geodetic::GeodeticDatum;
pub use temporal::TemporalDatum;
pub use vertical::VerticalDatum;
pub use vertical::VerticalDatumType;

use crate::internal::*;
use crate::metadata::Extent;
use chrono::{DateTime, Utc};

// ----- C O M M O N   A T T R I B U T E S ---------------------------------------------

/// The attributes shared by all kinds of datums
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatumCommon {
    id: IdentifiedObject,
    anchor_point: Option<String>,
    realization_epoch: Option<DateTime<Utc>>,
    domain_of_validity: Option<Extent>,
    scope: Option<String>,
}

impl DatumCommon {
    #[must_use]
    pub fn new(id: impl Into<IdentifiedObject>) -> DatumCommon {
        DatumCommon {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Description of the point or points used to anchor the datum
    #[must_use]
    pub fn with_anchor_point(mut self, anchor_point: &str) -> DatumCommon {
        self.anchor_point = Some(anchor_point.to_string());
        self
    }

    /// The time at which the datum was realized
    #[must_use]
    pub fn with_realization_epoch(mut self, epoch: DateTime<Utc>) -> DatumCommon {
        self.realization_epoch = Some(epoch);
        self
    }

    #[must_use]
    pub fn with_domain_of_validity(mut self, domain: Extent) -> DatumCommon {
        self.domain_of_validity = Some(domain);
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: &str) -> DatumCommon {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn identification(&self) -> &IdentifiedObject {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn anchor_point(&self) -> Option<&str> {
        self.anchor_point.as_deref()
    }

    /// `None` if the realization epoch is undefined
    pub fn realization_epoch(&self) -> Option<DateTime<Utc>> {
        self.realization_epoch
    }

    pub fn domain_of_validity(&self) -> Option<&Extent> {
        self.domain_of_validity.as_ref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

/// Strict equality compares everything. When ignoring metadata, datums
/// sharing a name (or an alias) are presumed to be the same reference frame.
impl Comparable for DatumCommon {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        match mode {
            ComparisonMode::Strict => self == other,
            ComparisonMode::IgnoreMetadata => self.id.same_name(&other.id),
        }
    }
}

// ----- T H E   D A T U M   K I N D S -------------------------------------------------

/// A datum of any kind
#[derive(Clone, Debug, PartialEq)]
pub enum Datum {
    Geodetic(Arc<GeodeticDatum>),
    Vertical(VerticalDatum),
    Temporal(TemporalDatum),
    Engineering(EngineeringDatum),
}

impl Datum {
    pub fn common(&self) -> &DatumCommon {
        match self {
            Datum::Geodetic(d) => d.common(),
            Datum::Vertical(d) => d.common(),
            Datum::Temporal(d) => d.common(),
            Datum::Engineering(d) => d.common(),
        }
    }

    pub fn name(&self) -> &str {
        self.common().name()
    }

    pub fn as_geodetic(&self) -> Option<&Arc<GeodeticDatum>> {
        match self {
            Datum::Geodetic(d) => Some(d),
            _ => None,
        }
    }
}

/// Datums of different kinds are never equal
impl Comparable for Datum {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        match (self, other) {
            (Datum::Geodetic(a), Datum::Geodetic(b)) => a.equals(b, mode),
            (Datum::Vertical(a), Datum::Vertical(b)) => a.equals(b, mode),
            (Datum::Temporal(a), Datum::Temporal(b)) => a.equals(b, mode),
            (Datum::Engineering(a), Datum::Engineering(b)) => a.equals(b, mode),
            _ => false,
        }
    }
}

impl FormatWkt for Datum {
    fn keyword(&self) -> &'static str {
        match self {
            Datum::Geodetic(d) => d.keyword(),
            Datum::Vertical(d) => d.keyword(),
            Datum::Temporal(d) => d.keyword(),
            Datum::Engineering(d) => d.keyword(),
        }
    }

    fn identification(&self) -> Option<&IdentifiedObject> {
        Some(self.common().identification())
    }

    fn format_wkt(&self, formatter: &mut Formatter) {
        match self {
            Datum::Geodetic(d) => d.format_wkt(formatter),
            Datum::Vertical(d) => d.format_wkt(formatter),
            Datum::Temporal(d) => d.format_wkt(formatter),
            Datum::Engineering(d) => d.format_wkt(formatter),
        }
    }
}

impl From<GeodeticDatum> for Datum {
    fn from(datum: GeodeticDatum) -> Datum {
        Datum::Geodetic(Arc::new(datum))
    }
}

impl From<Arc<GeodeticDatum>> for Datum {
    fn from(datum: Arc<GeodeticDatum>) -> Datum {
        Datum::Geodetic(datum)
    }
}

impl From<VerticalDatum> for Datum {
    fn from(datum: VerticalDatum) -> Datum {
        Datum::Vertical(datum)
    }
}

impl From<TemporalDatum> for Datum {
    fn from(datum: TemporalDatum) -> Datum {
        Datum::Temporal(datum)
    }
}

impl From<EngineeringDatum> for Datum {
    fn from(datum: EngineeringDatum) -> Datum {
        Datum::Engineering(datum)
    }
}

// ----- T E S T S ---------------------------------------------------------------------
