//! Identification and descriptive metadata, shared by ellipsoids,
//! prime meridians and datums, and the two-tier equality contract
//! they all implement.

// ----- C O M P A R I S O N -----------------------------------------------------------

/// How thoroughly two objects are compared.
///
/// `Strict` compares everything, including purely descriptive metadata.
/// `IgnoreMetadata` compares only what matters for coordinate
/// transformations: Two ellipsoids with the same axes, given in
/// different units, are then the same ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonMode {
    Strict,
    IgnoreMetadata,
}

/// The two-tier equality contract
pub trait Comparable {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool;
}

// ----- I D E N T I F I C A T I O N ---------------------------------------------------

/// An authority code, e.g. EPSG:6326
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub authority: String,
    pub code: String,
}

/// Name, aliases, identifiers and remarks of a named object.
///
/// The primary name must be non-empty; this is checked by the constructors of
/// the objects carrying an `IdentifiedObject`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentifiedObject {
    name: String,
    aliases: Vec<String>,
    identifiers: Vec<Identifier>,
    remarks: Option<String>,
}

impl IdentifiedObject {
    #[must_use]
    pub fn new(name: &str) -> IdentifiedObject {
        IdentifiedObject {
            name: name.trim().to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> IdentifiedObject {
        self.aliases.push(alias.trim().to_string());
        self
    }

    #[must_use]
    pub fn with_identifier(mut self, authority: &str, code: &str) -> IdentifiedObject {
        self.identifiers.push(Identifier {
            authority: authority.to_string(),
            code: code.to_string(),
        });
        self
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: &str) -> IdentifiedObject {
        self.remarks = Some(remarks.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// True if `name` matches the primary name or one of the aliases,
    /// ignoring case and surrounding whitespace.
    pub fn name_matches(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Name based identity, tried in both directions, so an alias on either
    /// side is sufficient.
    pub fn same_name(&self, other: &IdentifiedObject) -> bool {
        self.name_matches(&other.name) || other.name_matches(&self.name)
    }

    /// Ensure the primary name is usable
    pub(crate) fn validate(&self, what: &str) -> Result<(), crate::Error> {
        if self.name.is_empty() {
            return Err(crate::Error::InvalidParameter(
                "name".to_string(),
                format!("{what} must be named"),
            ));
        }
        Ok(())
    }
}

impl From<&str> for IdentifiedObject {
    fn from(name: &str) -> Self {
        IdentifiedObject::new(name)
    }
}

impl From<String> for IdentifiedObject {
    fn from(name: String) -> Self {
        IdentifiedObject::new(&name)
    }
}

/// Descriptive metadata never participates in transformation related
/// comparisons, so `IgnoreMetadata` is always true here. Objects needing
/// name based identity (the datums) ask for it explicitly.
impl Comparable for IdentifiedObject {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        match mode {
            ComparisonMode::Strict => self == other,
            ComparisonMode::IgnoreMetadata => true,
        }
    }
}

// ----- E X T E N T -------------------------------------------------------------------

/// Geographic bounding box, in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeographicBoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeographicBoundingBox {
    #[must_use]
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> GeographicBoundingBox {
        GeographicBoundingBox {
            west,
            south,
            east,
            north,
        }
    }

    /// Does the box contain the point (`lon`, `lat`)? Boxes crossing the
    /// antimeridian have `west > east`.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if lat < self.south || lat > self.north {
            return false;
        }
        if self.west <= self.east {
            return self.west <= lon && lon <= self.east;
        }
        lon >= self.west || lon <= self.east
    }
}

/// Domain of validity
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extent {
    pub description: Option<String>,
    pub bbox: Option<GeographicBoundingBox>,
}

impl Extent {
    #[must_use]
    pub fn new(description: &str, bbox: Option<GeographicBoundingBox>) -> Extent {
        Extent {
            description: Some(description.to_string()),
            bbox,
        }
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_aliases() {
        let wgs84 = IdentifiedObject::new("WGS84")
            .with_alias("WGS 84")
            .with_identifier("EPSG", "6326");
        assert_eq!(wgs84.name(), "WGS84");
        assert!(wgs84.name_matches("wgs84"));
        assert!(wgs84.name_matches(" WGS 84 "));
        assert!(!wgs84.name_matches("World Geodetic System 1972"));
        assert!(!wgs84.name_matches(""));

        // Either direction suffices
        let plain = IdentifiedObject::new("WGS 84");
        assert!(wgs84.same_name(&plain));
        assert!(plain.same_name(&wgs84));
        assert!(!plain.name_matches("WGS84"));

        assert!(!wgs84.equals(&plain, ComparisonMode::Strict));
        assert!(wgs84.equals(&plain, ComparisonMode::IgnoreMetadata));
        assert!(IdentifiedObject::new("").validate("datum").is_err());
    }

    #[test]
    fn bounding_box() {
        let europe = GeographicBoundingBox::new(-16.1, 32.88, 40.18, 84.73);
        assert!(europe.contains(12., 55.));
        assert!(!europe.contains(-52., 64.));

        let pacific = GeographicBoundingBox::new(160., -30., -160., 30.);
        assert!(pacific.contains(175., 0.));
        assert!(pacific.contains(-170., 0.));
        assert!(!pacific.contains(0., 0.));
    }
}
