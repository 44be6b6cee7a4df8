//! Named ellipsoids, prime meridians and geodetic datums, built on first use.
//!
//! Datum shift parameters are towards WGS84, in the position vector
//! convention, and taken from the EPSG dataset.
use crate::bursa_wolf::BursaWolfParameters;
use crate::datum::{DatumCommon, GeodeticDatum};
use crate::ellipsoid::Ellipsoid;
use crate::internal::*;
use crate::meridian::PrimeMeridian;
use crate::metadata::{Extent, GeographicBoundingBox};
use once_cell::sync::Lazy;

// ----- E L L I P S O I D S -----------------------------------------------------------

/// Name, alias, semimajor axis (m), inverse flattening, and description.
/// Zero inverse flattening indicates a sphere.
#[rustfmt::skip]
pub const ELLIPSOID_LIST: [(&str, &str, f64, f64, &str); 9] = [
    ("WGS 84",              "WGS84",     6378137.0, 298.257223563,     "World Geodetic System 1984"),
    ("GRS 1980",            "GRS80",     6378137.0, 298.257222101,     "Geodetic Reference System 1980"),
    ("International 1924",  "intl",      6378388.0, 297.0,             "Hayford 1909, adopted by the IUGG in 1924"),
    ("Clarke 1866",         "clrk66",    6378206.4, 294.9786982,       "Clarke 1866, North America"),
    ("Clarke 1880 (IGN)",   "clrk80ign", 6378249.2, 293.4660212936269, "Clarke 1880, as used by IGN France"),
    ("Airy 1830",           "airy",      6377563.396, 299.3249646,     "Airy 1830, Great Britain"),
    ("Bessel 1841",         "bessel",    6377397.155, 299.1528128,     "Bessel 1841, Central Europe"),
    ("GRS 1967",            "GRS67",     6378160.0, 298.247167427,     "Geodetic Reference System 1967"),
    ("Unit sphere",         "unitsphere", 1.0,      0.0,               "The unit sphere"),
];

fn builtin(alias: &str) -> Ellipsoid {
    let e = ELLIPSOID_LIST
        .iter()
        .find(|e| e.1 == alias)
        .unwrap_or(&ELLIPSOID_LIST[0]);
    Ellipsoid::predefined(IdentifiedObject::new(e.0).with_alias(e.1), e.2, e.3)
}

pub static WGS84: Lazy<Ellipsoid> = Lazy::new(|| builtin("WGS84"));
pub static GRS80: Lazy<Ellipsoid> = Lazy::new(|| builtin("GRS80"));
pub static INTERNATIONAL_1924: Lazy<Ellipsoid> = Lazy::new(|| builtin("intl"));
pub static CLARKE_1866: Lazy<Ellipsoid> = Lazy::new(|| builtin("clrk66"));
pub static CLARKE_1880_IGN: Lazy<Ellipsoid> = Lazy::new(|| builtin("clrk80ign"));
pub static AIRY_1830: Lazy<Ellipsoid> = Lazy::new(|| builtin("airy"));
pub static BESSEL_1841: Lazy<Ellipsoid> = Lazy::new(|| builtin("bessel"));
pub static UNIT_SPHERE: Lazy<Ellipsoid> = Lazy::new(|| builtin("unitsphere"));

// ----- P R I M E   M E R I D I A N S -------------------------------------------------

pub static GREENWICH: Lazy<PrimeMeridian> = Lazy::new(|| {
    let id = IdentifiedObject::new("Greenwich").with_identifier("EPSG", "8901");
    PrimeMeridian::predefined(id, 0., AngularUnit::DEGREE)
});

pub static PARIS: Lazy<PrimeMeridian> = Lazy::new(|| {
    let id = IdentifiedObject::new("Paris").with_identifier("EPSG", "8903");
    PrimeMeridian::predefined(id, 2.5969213, AngularUnit::GRAD)
});

// ----- D A T U M S -------------------------------------------------------------------

fn datum(
    id: IdentifiedObject,
    ellipsoid: &Ellipsoid,
    towgs84: Option<[f64; 7]>,
) -> GeodeticDatum {
    datum_with_meridian(id, ellipsoid, &GREENWICH, towgs84)
}

fn datum_with_meridian(
    id: IdentifiedObject,
    ellipsoid: &Ellipsoid,
    prime_meridian: &PrimeMeridian,
    towgs84: Option<[f64; 7]>,
) -> GeodeticDatum {
    let datum = GeodeticDatum::predefined(
        DatumCommon::new(id),
        ellipsoid.clone(),
        prime_meridian.clone(),
    );
    let Some([dx, dy, dz, ex, ey, ez, ppm]) = towgs84 else {
        return datum;
    };
    datum.with_bursa_wolf([BursaWolfParameters::new(WGS84_DATUM.clone())
        .with_translation(dx, dy, dz)
        .with_rotation(ex, ey, ez)
        .with_scale(ppm)])
}

pub static WGS84_DATUM: Lazy<Arc<GeodeticDatum>> = Lazy::new(|| {
    let id = IdentifiedObject::new("WGS84")
        .with_alias("WGS 84")
        .with_alias("World Geodetic System 1984")
        .with_alias("D_WGS_1984")
        .with_identifier("EPSG", "6326");
    let common = DatumCommon::new(id)
        .with_domain_of_validity(Extent::new(
            "World",
            Some(GeographicBoundingBox::new(-180., -90., 180., 90.)),
        ))
        .with_scope("Satellite navigation");
    Arc::new(GeodeticDatum::predefined(common, WGS84.clone(), GREENWICH.clone()))
});

pub static ETRS89_DATUM: Lazy<Arc<GeodeticDatum>> = Lazy::new(|| {
    let id = IdentifiedObject::new("ETRS89")
        .with_alias("European Terrestrial Reference System 1989")
        .with_identifier("EPSG", "6258");
    Arc::new(datum(id, &GRS80, Some([0.; 7])))
});

pub static ED50_DATUM: Lazy<Arc<GeodeticDatum>> = Lazy::new(|| {
    let id = IdentifiedObject::new("ED50")
        .with_alias("European Datum 1950")
        .with_identifier("EPSG", "6230");
    let towgs84 = [-87., -98., -121., 0., 0., 0., 0.];
    Arc::new(datum(id, &INTERNATIONAL_1924, Some(towgs84)))
});

pub static NAD27_DATUM: Lazy<Arc<GeodeticDatum>> = Lazy::new(|| {
    let id = IdentifiedObject::new("NAD27")
        .with_alias("North American Datum 1927")
        .with_identifier("EPSG", "6267");
    let towgs84 = [-8., 160., 176., 0., 0., 0., 0.];
    Arc::new(datum(id, &CLARKE_1866, Some(towgs84)))
});

pub static OSGB36_DATUM: Lazy<Arc<GeodeticDatum>> = Lazy::new(|| {
    let id = IdentifiedObject::new("OSGB36")
        .with_alias("Ordnance Survey of Great Britain 1936")
        .with_identifier("EPSG", "6277");
    let towgs84 = [446.448, -125.157, 542.06, 0.15, 0.247, 0.842, -20.489];
    Arc::new(datum(id, &AIRY_1830, Some(towgs84)))
});

pub static DHDN_DATUM: Lazy<Arc<GeodeticDatum>> = Lazy::new(|| {
    let id = IdentifiedObject::new("DHDN")
        .with_alias("Deutsches Hauptdreiecksnetz")
        .with_identifier("EPSG", "6314");
    let towgs84 = [598.1, 73.7, 418.2, 0.202, 0.045, -2.455, 6.7];
    Arc::new(datum(id, &BESSEL_1841, Some(towgs84)))
});

pub static NTF_DATUM: Lazy<Arc<GeodeticDatum>> = Lazy::new(|| {
    let id = IdentifiedObject::new("NTF")
        .with_alias("Nouvelle Triangulation Francaise (Paris)")
        .with_identifier("EPSG", "6807");
    let towgs84 = [-168., -60., 320., 0., 0., 0., 0.];
    Arc::new(datum_with_meridian(id, &CLARKE_1880_IGN, &PARIS, Some(towgs84)))
});

/// All the builtin geodetic datums
pub fn builtin_datums() -> Vec<Arc<GeodeticDatum>> {
    [
        &WGS84_DATUM,
        &ETRS89_DATUM,
        &ED50_DATUM,
        &NAD27_DATUM,
        &OSGB36_DATUM,
        &DHDN_DATUM,
        &NTF_DATUM,
    ]
    .iter()
    .map(|d| Arc::clone(d))
    .collect()
}

// ----- T E S T S ---------------------------------------------------------------------
