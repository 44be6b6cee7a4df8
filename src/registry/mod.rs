//! A registry of named ellipsoids, prime meridians and geodetic datums.
//!
//! [`Registry::new`] holds the builtins from [`constants`](crate::constants).
//! Further definitions are read from plain text, one object per line:
//!
//! ```txt
//! # kind       name      key=value ...
//! ellipsoid    hayford   a=6378388 rf=297 alias=intl1924
//! ellipsoid    ball      a=6371000 b=6371000 unit=m
//! meridian     paris     lon=2.5969213 unit=grad
//! datum        ED50_DK   ellps=intl pm=greenwich towgs84=-81.1,-89.4,-115.8,0.485,0.024,0.413,-0.54
//! ```
//!
//! Ellipsoids take `a`, and one of `rf` (zero for a sphere) and `b`, in the
//! linear unit given by `unit` (default `m`). Meridians take `lon`, in the
//! angular unit given by `unit` (default `deg`). Datums take `ellps` and
//! optionally `pm` (default Greenwich), `towgs84` (3 or 7 values) and `epsg`.
//! All kinds accept any number of `alias`es. Later definitions shadow
//! earlier ones of the same name.
use crate::constants;
use crate::datum::{DatumCommon, GeodeticDatum};
use crate::ellipsoid::{Ellipsoid, EllipsoidBase};
use crate::internal::*;
use crate::meridian::PrimeMeridian;
use crate::BursaWolfParameters;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Registry {
    ellipsoids: Vec<Ellipsoid>,
    prime_meridians: Vec<PrimeMeridian>,
    datums: Vec<Arc<GeodeticDatum>>,
    paths: Vec<PathBuf>,
}

impl Default for Registry {
    fn default() -> Registry {
        let ellipsoids = [
            &constants::WGS84,
            &constants::GRS80,
            &constants::INTERNATIONAL_1924,
            &constants::CLARKE_1866,
            &constants::CLARKE_1880_IGN,
            &constants::AIRY_1830,
            &constants::BESSEL_1841,
            &constants::UNIT_SPHERE,
        ]
        .iter()
        .map(|e| Ellipsoid::clone(e))
        .collect();

        let prime_meridians = vec![constants::GREENWICH.clone(), constants::PARIS.clone()];

        let mut paths = Vec::new();
        let localpath: PathBuf = [".", "geodesy"].iter().collect();
        paths.push(localpath);

        #[cfg(feature = "with_plain")]
        if let Some(mut userpath) = dirs::data_local_dir() {
            userpath.push("geodesy");
            paths.push(userpath);
        }

        Registry {
            ellipsoids,
            prime_meridians,
            datums: constants::builtin_datums(),
            paths,
        }
    }
}

impl Registry {
    /// A registry holding the builtin definitions
    #[must_use]
    pub fn new() -> Registry {
        Registry::default()
    }

    /// The builtins, extended with the definitions in `datums.txt` from the
    /// search paths: `./geodesy/` and the `geodesy` directory under the
    /// platform specific local data directory.
    #[cfg(feature = "with_plain")]
    pub fn with_user_definitions() -> Result<Registry, Error> {
        let mut registry = Registry::new();
        for path in registry.paths.clone() {
            let file = path.join("datums.txt");
            if file.is_file() {
                registry.load_file(&file)?;
            }
        }
        Ok(registry)
    }

    /// The directories searched by `with_user_definitions`
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Read definitions from a file. Returns the number of objects defined.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, Error> {
        let text = std::fs::read_to_string(path)?;
        let count = self.load(&text)?;
        log::info!("Registry: {count} definitions from {}", path.display());
        Ok(count)
    }

    /// Read definitions from `text`. Returns the number of objects defined.
    /// Stops at the first erroneous line.
    pub fn load(&mut self, text: &str) -> Result<usize, Error> {
        let mut count = 0;
        for (index, line) in text.lines().enumerate() {
            // Remove comments
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            self.define(line).map_err(|e| match e {
                Error::Syntax(msg) => Error::Syntax(format!("line {}: {msg}", index + 1)),
                e => e,
            })?;
            count += 1;
        }
        Ok(count)
    }

    fn define(&mut self, line: &str) -> Result<(), Error> {
        let mut tokens = line.split_whitespace();
        let kind = tokens.next().unwrap_or("");
        let name = tokens
            .next()
            .ok_or_else(|| Error::Syntax(format!("{kind}: missing name")))?;
        let definition = Definition::parse(name, tokens)?;
        match kind {
            "ellipsoid" => {
                let ellipsoid = definition.ellipsoid()?;
                trace!("Registry: ellipsoid {name}");
                self.ellipsoids.push(ellipsoid);
            }
            "meridian" => {
                let meridian = definition.prime_meridian()?;
                trace!("Registry: meridian {name}");
                self.prime_meridians.push(meridian);
            }
            "datum" => {
                let datum = definition.datum(self)?;
                trace!("Registry: datum {name}");
                self.datums.push(Arc::new(datum));
            }
            _ => return Err(Error::Syntax(format!("unknown kind '{kind}'"))),
        }
        Ok(())
    }
}

// ----- L O O K U P -------------------------------------------------------------------

impl Registry {
    /// Registered ellipsoids by name or alias, then the `Ellipsoid::named`
    /// forms, e.g. "6378137, 298.25"
    pub fn ellipsoid(&self, name: &str) -> Result<Ellipsoid, Error> {
        if let Some(e) = self
            .ellipsoids
            .iter()
            .rev()
            .find(|e| e.identification().name_matches(name))
        {
            return Ok(e.clone());
        }
        Ellipsoid::named(name)
    }

    pub fn prime_meridian(&self, name: &str) -> Result<PrimeMeridian, Error> {
        self.prime_meridians
            .iter()
            .rev()
            .find(|pm| pm.identification().name_matches(name))
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string(), "prime meridians".to_string()))
    }

    pub fn datum(&self, name: &str) -> Result<Arc<GeodeticDatum>, Error> {
        self.datums
            .iter()
            .rev()
            .find(|d| d.common().identification().name_matches(name))
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string(), "geodetic datums".to_string()))
    }

    pub fn ellipsoids(&self) -> &[Ellipsoid] {
        &self.ellipsoids
    }

    pub fn prime_meridians(&self) -> &[PrimeMeridian] {
        &self.prime_meridians
    }

    pub fn datums(&self) -> &[Arc<GeodeticDatum>] {
        &self.datums
    }

    pub fn register_ellipsoid(&mut self, ellipsoid: Ellipsoid) {
        self.ellipsoids.push(ellipsoid);
    }

    pub fn register_prime_meridian(&mut self, prime_meridian: PrimeMeridian) {
        self.prime_meridians.push(prime_meridian);
    }

    pub fn register_datum(&mut self, datum: Arc<GeodeticDatum>) {
        self.datums.push(datum);
    }
}

// ----- P A R S I N G -----------------------------------------------------------------

/// The name and key=value pairs of a definition line
struct Definition<'a> {
    name: &'a str,
    aliases: Vec<&'a str>,
    params: Vec<(&'a str, &'a str)>,
}

impl<'a> Definition<'a> {
    fn parse<I: Iterator<Item = &'a str>>(name: &'a str, tokens: I) -> Result<Definition<'a>, Error> {
        let mut aliases = Vec::new();
        let mut params = Vec::new();
        for token in tokens {
            let Some((key, value)) = token.split_once('=') else {
                return Err(Error::Syntax(format!("{name}: expected key=value, got '{token}'")));
            };
            if key == "alias" {
                aliases.push(value);
                continue;
            }
            if params.iter().any(|(k, _)| *k == key) {
                return Err(Error::Syntax(format!("{name}: repeated key '{key}'")));
            }
            params.push((key, value));
        }
        Ok(Definition {
            name,
            aliases,
            params,
        })
    }

    fn check_keys(&self, allowed: &[&str]) -> Result<(), Error> {
        match self.params.iter().find(|(k, _)| !allowed.contains(k)) {
            Some((key, _)) => Err(Error::Syntax(format!("{}: unknown key '{key}'", self.name))),
            None => Ok(()),
        }
    }

    fn id(&self) -> IdentifiedObject {
        let mut id = IdentifiedObject::new(self.name);
        for alias in &self.aliases {
            id = id.with_alias(alias);
        }
        id
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn number(&self, key: &str) -> Result<Option<f64>, Error> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| Error::Syntax(format!("{}: {key}={value} is not a number", self.name)))
    }

    fn required(&self, key: &str) -> Result<f64, Error> {
        self.number(key)?
            .ok_or_else(|| Error::Syntax(format!("{}: missing {key}", self.name)))
    }

    fn ellipsoid(&self) -> Result<Ellipsoid, Error> {
        self.check_keys(&["a", "b", "rf", "unit"])?;
        let unit = LinearUnit::named(self.get("unit").unwrap_or("m"))?;
        let a = self.required("a")?;
        match (self.number("rf")?, self.number("b")?) {
            (Some(rf), None) => {
                let rf = if rf == 0. { f64::INFINITY } else { rf };
                Ellipsoid::create_flattened_sphere(self.id(), a, rf, unit)
            }
            (None, Some(b)) => Ellipsoid::create_ellipsoid(self.id(), a, b, unit),
            _ => Err(Error::Syntax(format!("{}: need exactly one of rf and b", self.name))),
        }
    }

    fn prime_meridian(&self) -> Result<PrimeMeridian, Error> {
        self.check_keys(&["lon", "unit"])?;
        let unit = AngularUnit::named(self.get("unit").unwrap_or("deg"))?;
        PrimeMeridian::new(self.id(), self.required("lon")?, unit)
    }

    fn datum(&self, registry: &Registry) -> Result<GeodeticDatum, Error> {
        self.check_keys(&["ellps", "pm", "towgs84", "epsg"])?;
        let ellps = self
            .get("ellps")
            .ok_or_else(|| Error::Syntax(format!("{}: missing ellps", self.name)))?;
        let ellipsoid = registry.ellipsoid(ellps)?;
        let prime_meridian = registry.prime_meridian(self.get("pm").unwrap_or("greenwich"))?;

        let mut id = self.id();
        if let Some(code) = self.get("epsg") {
            id = id.with_identifier("EPSG", code);
        }
        let datum = GeodeticDatum::new(DatumCommon::new(id), ellipsoid, prime_meridian)?;

        let Some(towgs84) = self.get("towgs84") else {
            return Ok(datum);
        };
        let values = towgs84
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::Syntax(format!("{}: bad towgs84 '{towgs84}'", self.name)))?;
        let mut parameters = BursaWolfParameters::new(constants::WGS84_DATUM.clone());
        match values[..] {
            [dx, dy, dz] => parameters = parameters.with_translation(dx, dy, dz),
            [dx, dy, dz, ex, ey, ez, ppm] => {
                parameters = parameters
                    .with_translation(dx, dy, dz)
                    .with_rotation(ex, ey, ez)
                    .with_scale(ppm)
            }
            _ => {
                return Err(Error::Syntax(format!(
                    "{}: towgs84 takes 3 or 7 values, not {}",
                    self.name,
                    values.len()
                )))
            }
        }
        Ok(datum.with_bursa_wolf([parameters]))
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    const DEFINITIONS: &str = "
        # kind       name      key=value ...
        ellipsoid    hayford   a=6378388 rf=297 alias=intl1924
        ellipsoid    ball      a=6371 b=6371 unit=km   # a sphere
        meridian     paris_deg lon=2.33722917

        datum        ED50_DK   ellps=intl pm=greenwich towgs84=-81.1,-89.4,-115.8,0.485,0.024,0.413,-0.54
        datum        local     ellps=hayford towgs84=1,2,3 alias=LCL epsg=9999
    ";

    #[test]
    fn builtins() -> Result<(), Error> {
        let registry = Registry::new();
        assert_eq!(registry.ellipsoid("GRS80")?.inverse_flattening(), 298.257222101);
        assert_eq!(registry.ellipsoid("grs 1980")?.semimajor_axis(), 6378137.);
        assert!(registry.ellipsoid("6378137, 298.25").is_ok());
        assert_eq!(registry.prime_meridian("PARIS")?.angular_unit(), AngularUnit::GRAD);
        assert_eq!(registry.datum("European Datum 1950")?.name(), "ED50");
        assert!(matches!(registry.datum("Mars 2000"), Err(Error::NotFound(..))));
        assert_eq!(registry.search_paths()[0], PathBuf::from("./geodesy"));
        Ok(())
    }

    #[test]
    fn definitions() -> Result<(), Error> {
        let mut registry = Registry::new();
        assert_eq!(registry.load(DEFINITIONS)?, 5);

        let hayford = registry.ellipsoid("intl1924")?;
        assert!(hayford.equals(&registry.ellipsoid("intl")?, ComparisonMode::IgnoreMetadata));

        let ball = registry.ellipsoid("Ball")?;
        assert!(ball.is_sphere());
        assert_eq!(ball.axis_unit(), LinearUnit::KILOMETER);

        let paris = registry.prime_meridian("paris_deg")?;
        assert!(paris.equals(&constants::PARIS, ComparisonMode::IgnoreMetadata));

        let ed50_dk = registry.datum("ed50_dk")?;
        let towgs84 = ed50_dk
            .bursa_wolf_parameters_to(&constants::WGS84_DATUM)
            .ok_or(Error::General("towgs84"))?;
        assert_float_eq!(towgs84.ppm, -0.54, abs <= 1e-15);

        let local = registry.datum("LCL")?;
        assert!(local.bursa_wolf_parameters()[0].is_translation());
        assert_eq!(local.common().identification().identifiers()[0].code, "9999");

        // Two hops, through WGS84
        assert!(GeodeticDatum::affine_transform(&ed50_dk, &local).is_some());
        Ok(())
    }

    #[test]
    fn shadowing() -> Result<(), Error> {
        let mut registry = Registry::new();
        registry.load("ellipsoid GRS80 a=6378137 rf=300")?;
        assert_eq!(registry.ellipsoid("GRS80")?.inverse_flattening(), 300.);
        Ok(())
    }

    #[test]
    fn errors() {
        let mut registry = Registry::new();
        let syntax = [
            "spheroid x a=1 rf=0",
            "ellipsoid",
            "ellipsoid x a=6378137",
            "ellipsoid x a=6378137 rf=298 b=6356752",
            "ellipsoid x a=6378137 rf=flat",
            "ellipsoid x a=6378137 rf=298 colour=blue",
            "ellipsoid x a=6378137 a=6378137 rf=298",
            "ellipsoid x 6378137",
            "meridian x",
            "datum x pm=greenwich",
            "datum x ellps=GRS80 towgs84=1,2",
            "datum x ellps=GRS80 towgs84=1,2,three",
        ];
        for line in syntax {
            assert!(matches!(registry.load(line), Err(Error::Syntax(_))), "{line}");
        }

        assert!(matches!(registry.load("datum x ellps=Mars"), Err(Error::NotFound(..))));
        assert!(matches!(registry.load("datum x ellps=GRS80 pm=atlantis"), Err(Error::NotFound(..))));
        assert!(matches!(registry.load("ellipsoid x a=1 rf=0 unit=furlong"), Err(Error::NotFound(..))));
        assert!(matches!(registry.load("meridian greenwich lon=1"), Err(Error::InvalidParameter(..))));

        let err = registry.load("\n\nellipsoid x a=-1 b=1\n");
        assert!(matches!(err, Err(Error::InvalidParameter(..))));
        let err = registry.load("\n\nellipsoid x a=1\n");
        assert!(matches!(err, Err(Error::Syntax(msg)) if msg.starts_with("line 3")));
        assert!(registry.load_file(Path::new("/no/such/file")).is_err());
    }
}
