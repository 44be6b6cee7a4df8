//! Well Known Text (WKT 1) output.
//!
//! Every object that can be represented in WKT implements [`FormatWkt`]. The
//! [`Formatter`] drives the output: it writes the keyword and the name of the
//! object, lets the object append its own body, and closes the element with
//! the authority code, if any. Objects nest by calling
//! [`Formatter::append`] on their components.
//!
//! ```rust
//! use geodatum::prelude::*;
//! let wgs84 = Ellipsoid::named("WGS84")?;
//! assert_eq!(wgs84.to_wkt(), r#"SPHEROID["WGS 84", 6378137.0, 298.257223563]"#);
//! # Ok::<(), geodatum::Error>(())
//! ```
use crate::metadata::IdentifiedObject;
use crate::units::{AngularUnit, LinearUnit};

/// The visitor side of the WKT formatting protocol
pub trait FormatWkt {
    /// The element keyword, e.g. `DATUM` or `SPHEROID`
    fn keyword(&self) -> &'static str;

    /// Name and authority code. Anonymous elements, like `TOWGS84`, return `None`
    fn identification(&self) -> Option<&IdentifiedObject> {
        None
    }

    /// Append the body of the element, i.e. everything between the name and
    /// the authority code
    fn format_wkt(&self, formatter: &mut Formatter);

    /// Format with default settings
    fn to_wkt(&self) -> String
    where
        Self: Sized,
    {
        let mut formatter = Formatter::new();
        formatter.append(self);
        formatter.into_string()
    }
}

/// Accumulates WKT text, and the units in which lengths and angles are written
#[derive(Debug)]
pub struct Formatter {
    buffer: String,
    linear_unit: LinearUnit,
    angular_unit: AngularUnit,
    warning: Option<String>,
    needs_separator: bool,
}

impl Default for Formatter {
    fn default() -> Formatter {
        Formatter {
            buffer: String::new(),
            linear_unit: LinearUnit::METER,
            angular_unit: AngularUnit::DEGREE,
            warning: None,
            needs_separator: false,
        }
    }
}

impl Formatter {
    /// A formatter writing lengths in meters and angles in degrees
    #[must_use]
    pub fn new() -> Formatter {
        Formatter::default()
    }

    pub fn linear_unit(&self) -> LinearUnit {
        self.linear_unit
    }

    pub fn angular_unit(&self) -> AngularUnit {
        self.angular_unit
    }

    pub fn set_linear_unit(&mut self, unit: LinearUnit) {
        self.linear_unit = unit;
    }

    pub fn set_angular_unit(&mut self, unit: AngularUnit) {
        self.angular_unit = unit;
    }

    fn separate(&mut self) {
        if self.needs_separator {
            self.buffer.push_str(", ");
        }
        self.needs_separator = true;
    }

    /// Append a complete element: `KEYWORD["name", body, AUTHORITY[...]]`
    pub fn append(&mut self, object: &dyn FormatWkt) {
        let keyword = object.keyword();
        self.element(keyword, |formatter| {
            let id = object.identification();
            if let Some(id) = id {
                formatter.append_text(id.name());
            }
            object.format_wkt(formatter);
            if let Some(identifier) = id.and_then(|id| id.identifiers().first()) {
                formatter.element("AUTHORITY", |formatter| {
                    formatter.append_text(&identifier.authority);
                    formatter.append_text(&identifier.code);
                });
            }
        });
    }

    /// Append an element with a body given by `body`
    pub fn element<F: FnOnce(&mut Formatter)>(&mut self, keyword: &str, body: F) {
        self.separate();
        self.buffer.push_str(keyword);
        self.buffer.push('[');
        self.needs_separator = false;
        body(self);
        self.buffer.push(']');
        self.needs_separator = true;
    }

    pub fn append_f64(&mut self, value: f64) {
        self.separate();
        // Debug formatting keeps the decimal point of integral values
        self.buffer.push_str(&format!("{value:?}"));
    }

    pub fn append_integer(&mut self, value: i64) {
        self.separate();
        self.buffer.push_str(&format!("{value}"));
    }

    /// Append a quoted string. Embedded quotes are doubled.
    pub fn append_text(&mut self, text: &str) {
        self.separate();
        self.buffer.push('"');
        self.buffer.push_str(&text.replace('"', "\"\""));
        self.buffer.push('"');
    }

    /// Append `text` verbatim, as a separate item
    pub fn append_raw(&mut self, text: &str) {
        self.separate();
        self.buffer.push_str(text);
    }

    /// Flag the output as not strictly valid WKT. Only the first reason is kept.
    pub fn set_invalid_wkt(&mut self, reason: &str) {
        if self.warning.is_none() {
            log::debug!("WKT: {reason}");
            self.warning = Some(reason.to_string());
        }
    }

    /// The reason the output is not strictly valid WKT, if any
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Parcel {
        id: IdentifiedObject,
        corners: Vec<Corner>,
    }

    struct Corner(f64, f64);

    impl FormatWkt for Corner {
        fn keyword(&self) -> &'static str {
            "CORNER"
        }
        fn format_wkt(&self, formatter: &mut Formatter) {
            formatter.append_f64(self.0);
            formatter.append_f64(self.1);
        }
    }

    impl FormatWkt for Parcel {
        fn keyword(&self) -> &'static str {
            "PARCEL"
        }
        fn identification(&self) -> Option<&IdentifiedObject> {
            Some(&self.id)
        }
        fn format_wkt(&self, formatter: &mut Formatter) {
            for corner in &self.corners {
                formatter.append(corner);
            }
            formatter.element("SURVEYED", |f| f.append_integer(1888));
        }
    }

    #[test]
    fn nesting() {
        let parcel = Parcel {
            id: IdentifiedObject::new("Matr. \"7a\"").with_identifier("DK", "7a"),
            corners: vec![Corner(1., 2.), Corner(-0.5, 1e-3)],
        };
        assert_eq!(
            parcel.to_wkt(),
            r#"PARCEL["Matr. ""7a""", CORNER[1.0, 2.0], CORNER[-0.5, 0.001], SURVEYED[1888], AUTHORITY["DK", "7a"]]"#
        );
        assert_eq!(Corner(0., 0.).to_wkt(), "CORNER[0.0, 0.0]");
    }

    #[test]
    fn units_and_warnings() {
        let mut formatter = Formatter::new();
        assert_eq!(formatter.linear_unit(), LinearUnit::METER);
        assert_eq!(formatter.angular_unit(), AngularUnit::DEGREE);
        formatter.set_linear_unit(LinearUnit::KILOMETER);
        formatter.set_angular_unit(AngularUnit::GRAD);
        assert_eq!(formatter.linear_unit(), LinearUnit::KILOMETER);
        assert_eq!(formatter.angular_unit(), AngularUnit::GRAD);

        assert!(formatter.warning().is_none());
        formatter.set_invalid_wkt("first");
        formatter.set_invalid_wkt("second");
        assert_eq!(formatter.warning(), Some("first"));

        formatter.append_raw("RAW");
        formatter.append_text("x");
        assert_eq!(formatter.as_str(), r#"RAW, "x""#);
    }

    #[test]
    fn numbers() {
        let mut formatter = Formatter::new();
        formatter.append_integer(-7);
        formatter.append_f64(1e-3);
        formatter.append_f64(6378137.);
        formatter.append_integer(0);
        assert_eq!(formatter.into_string(), "-7, 0.001, 6378137.0, 0");
    }
}
