use float_eq::assert_float_eq;
use geodatum::prelude::*;
use geodatum::{EngineeringDatum, TemporalDatum, VerticalDatum, VerticalDatumType};
use std::sync::Arc;

// ----- U S E R   P R O V I D E D   E L L I P S O I D --------------------------------

/// An ellipsoid representation living outside of the crate, given by its
/// axes in kilometers. Integration tests are independent crates, so this
/// shows how third party representations plug in through `EllipsoidBase`.
pub struct Kilometric {
    id: IdentifiedObject,
    a: f64,
    b: f64,
}

impl EllipsoidBase for Kilometric {
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
        self.a / (self.a - self.b)
    }
    fn is_ivf_definitive(&self) -> bool {
        false
    }
    fn axis_unit(&self) -> LinearUnit {
        LinearUnit::KILOMETER
    }
}

#[test]
fn user_provided_ellipsoid() -> Result<(), Error> {
    let clarke = Kilometric {
        id: IdentifiedObject::new("Clarke 1866 (km)"),
        a: 6378.2064,
        b: 6356.5838,
    };
    let wrapped = Ellipsoid::wrap(&clarke)?;
    assert!(!wrapped.is_ivf_definitive());
    assert_eq!(wrapped.axis_unit(), LinearUnit::KILOMETER);
    // The semiminor axes differ in the 13th digit
    assert!(!wrapped.equals(&constants::CLARKE_1866, ComparisonMode::IgnoreMetadata));

    // Axis/flattening roundtrip
    let again = Ellipsoid::create_flattened_sphere(
        "again",
        wrapped.semimajor_axis(),
        wrapped.inverse_flattening(),
        LinearUnit::KILOMETER,
    )?;
    assert_float_eq!(again.semiminor_axis(), clarke.b, rmax <= 1e-14);

    // Distances come out in the unit of the axes
    let d = wrapped.orthodromic_distance(12., 55., 2., 49.)?;
    assert!((d - 956.0).abs() < 1.0, "{d}");
    Ok(())
}

// ----- D A T U M   S H I F T S -------------------------------------------------------

#[test]
fn builtin_shifts() -> Result<(), Error> {
    let registry = registry::Registry::new();
    let ed50 = registry.datum("ED50")?;
    let nad27 = registry.datum("NAD27")?;
    let wgs84 = registry.datum("WGS 84")?;

    // Direct
    let m = GeodeticDatum::affine_transform(&ed50, &wgs84).ok_or(Error::General("direct"))?;
    assert_eq!(m.element(0, 3), -87.);

    // Inverse
    let m = GeodeticDatum::affine_transform(&wgs84, &ed50).ok_or(Error::General("inverse"))?;
    assert_float_eq!(m.element(2, 3), 121., abs <= 1e-9);

    // Two hops, through WGS84: the translations add up
    let m = GeodeticDatum::affine_transform(&ed50, &nad27).ok_or(Error::General("two hops"))?;
    assert_float_eq!(m.element(0, 3), -87. + 8., abs <= 1e-9);
    assert_float_eq!(m.element(1, 3), -98. - 160., abs <= 1e-9);
    assert_float_eq!(m.element(2, 3), -121. - 176., abs <= 1e-9);
    Ok(())
}

#[test]
fn shifted_coordinates() -> Result<(), Error> {
    // A point in Copenhagen, moved from ED50 to WGS84 and back again
    let registry = registry::Registry::new();
    let ed50 = registry.datum("ED50")?;
    let wgs84 = &constants::WGS84_DATUM;

    let geo = [12_f64.to_radians(), 55_f64.to_radians(), 0.];
    let cart = ed50.ellipsoid().cartesian(geo);

    let forward = GeodeticDatum::affine_transform(&ed50, wgs84).ok_or(Error::General("fwd"))?;
    let shifted = forward.transform_point(cart)?;
    let wgs = wgs84.ellipsoid().geographic(shifted);

    // In Denmark, ED50 coordinates are some 70 m north of their WGS84 counterparts
    let dlat = (wgs[1] - geo[1]).to_degrees() * 111_000.;
    assert!(dlat < -50. && dlat > -90., "{dlat}");

    let inverse = GeodeticDatum::affine_transform(wgs84, &ed50).ok_or(Error::General("inv"))?;
    let back = inverse.transform_point(shifted)?;
    for i in 0..3 {
        assert_float_eq!(back[i], cart[i], abs <= 1e-6);
    }
    Ok(())
}

#[test]
fn rotations_roundtrip() -> Result<(), Error> {
    let osgb36 = registry::Registry::new().datum("OSGB36")?;
    let parameters = osgb36
        .bursa_wolf_parameters_to(&constants::WGS84_DATUM)
        .ok_or(Error::General("towgs84"))?;
    let matrix = parameters.affine_transform();
    let decoded = BursaWolfParameters::from_affine_transform(
        parameters.target().clone(),
        &matrix,
        1e-6,
    )?;
    for (a, b) in [
        (decoded.dx, 446.448),
        (decoded.dy, -125.157),
        (decoded.dz, 542.06),
        (decoded.ex, 0.15),
        (decoded.ey, 0.247),
        (decoded.ez, 0.842),
        (decoded.ppm, -20.489),
    ] {
        assert_float_eq!(a, b, abs <= 1e-6);
    }
    Ok(())
}

#[test]
fn wgs84_equality_ignores_shifts() -> Result<(), Error> {
    // WGS84, as found in a WKT TOWGS84[0,0,0,0,0,0,0] definition
    let parsed = GeodeticDatum::new(
        DatumCommon::new("WGS 84"),
        constants::WGS84.clone(),
        constants::GREENWICH.clone(),
    )?
    .with_bursa_wolf([BursaWolfParameters::new(constants::WGS84_DATUM.clone())]);
    assert!(GeodeticDatum::is_wgs84(&parsed));
    assert!(constants::WGS84_DATUM.equals(&parsed, ComparisonMode::IgnoreMetadata));
    assert!(!constants::WGS84_DATUM.equals(&parsed, ComparisonMode::Strict));
    Ok(())
}

#[test]
fn unconnected_datums() -> Result<(), Error> {
    let island = Arc::new(GeodeticDatum::new(
        DatumCommon::new("Island"),
        Ellipsoid::named("intl")?,
        constants::GREENWICH.clone(),
    )?);
    let mut registry = registry::Registry::new();
    registry.register_datum(island.clone());
    let ed50 = registry.datum("ED50")?;
    assert!(GeodeticDatum::affine_transform(&island, &ed50).is_none());
    assert!(GeodeticDatum::affine_transform(&ed50, &island).is_none());
    Ok(())
}

// ----- W K T -------------------------------------------------------------------------

#[test]
fn wkt() -> Result<(), Error> {
    assert_eq!(
        constants::WGS84_DATUM.to_wkt(),
        r#"DATUM["WGS84", SPHEROID["WGS 84", 6378137.0, 298.257223563], AUTHORITY["EPSG", "6326"]]"#
    );
    assert_eq!(
        constants::ED50_DATUM.to_wkt(),
        concat!(
            r#"DATUM["ED50", SPHEROID["International 1924", 6378388.0, 297.0], "#,
            r#"TOWGS84[-87.0, -98.0, -121.0, 0.0, 0.0, 0.0, 0.0], AUTHORITY["EPSG", "6230"]]"#
        )
    );

    let datums: Vec<Datum> = vec![
        VerticalDatum::new(DatumCommon::new("DVR90"), VerticalDatumType::Geoidal)?.into(),
        EngineeringDatum::new(DatumCommon::new("Ship"))?.into(),
        constants::ED50_DATUM.clone().into(),
    ];
    let mut formatter = geodatum::wkt::Formatter::new();
    for datum in &datums {
        formatter.append(datum);
    }
    let expected = r#"VERT_DATUM["DVR90", 2005], LOCAL_DATUM["Ship", 0], DATUM["ED50""#;
    assert!(formatter.as_str().starts_with(expected));
    assert!(formatter.warning().is_none());

    let unix = TemporalDatum::new(
        DatumCommon::new("Unix"),
        chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
    )?;
    assert!(unix.to_wkt().contains("TIMEORIGIN"));
    Ok(())
}
