/// dshift: Datum shift matrices, datum descriptions and orthodromic distances
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use geodatum::prelude::*;
use geodatum::wkt::Formatter;
use log::{debug, trace, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dshift")]
#[command(author, version, about = "Datum shift matrices and orthodromic distances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Plain text definitions of ellipsoids, meridians and datums (repeatable)
    #[arg(long = "definitions", global = true)]
    definitions: Vec<PathBuf>,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered ellipsoids, prime meridians and datums
    List,

    /// Orthodromic distance between two points, given in decimal degrees
    Distance {
        /// Name of the ellipsoid, or "a, rf"
        #[arg(long, default_value = "GRS80")]
        ellps: String,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
    },

    /// The affine matrix shifting geocentric coordinates from SOURCE to TARGET
    Matrix { source: String, target: String },

    /// WKT description of a datum
    Wkt { name: String },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    trace!("This is dshift, with args: {:#?}", cli);

    let mut registry = registry::Registry::with_user_definitions()?;
    for path in &cli.definitions {
        let count = registry
            .load_file(path)
            .with_context(|| format!("reading definitions from {}", path.display()))?;
        debug!("{count} definitions from {}", path.display());
    }

    match cli.command {
        Command::List => list(&registry),
        Command::Distance {
            ellps,
            lon1,
            lat1,
            lon2,
            lat2,
        } => {
            let ellps = registry.ellipsoid(&ellps)?;
            let distance = ellps.orthodromic_distance(lon1, lat1, lon2, lat2)?;
            println!("{distance:.4} {}", ellps.axis_unit());
        }
        Command::Matrix { source, target } => {
            let source = registry.datum(&source)?;
            let target = registry.datum(&target)?;
            if source.equals(&target, ComparisonMode::IgnoreMetadata) {
                println!("{}", Matrix::identity(4));
                return Ok(());
            }
            let Some(matrix) = GeodeticDatum::affine_transform(&source, &target) else {
                bail!(
                    "no datum shift known from {} to {}",
                    source.name(),
                    target.name()
                );
            };
            println!("{matrix}");
        }
        Command::Wkt { name } => {
            let datum = registry.datum(&name)?;
            let mut formatter = Formatter::new();
            formatter.append(datum.as_ref());
            if let Some(warning) = formatter.warning() {
                warn!("{name}: {warning}");
            }
            println!("{}", formatter.as_str());
        }
    }
    Ok(())
}

fn list(registry: &registry::Registry) {
    println!("Ellipsoids:");
    for e in registry.ellipsoids() {
        let id = e.identification();
        let ivf = e.inverse_flattening();
        println!(
            "    {:<24} a={} {} 1/f={ivf} {}",
            id.name(),
            e.semimajor_axis(),
            e.axis_unit(),
            id.aliases().join(", ")
        );
    }

    println!("Prime meridians:");
    for pm in registry.prime_meridians() {
        println!(
            "    {:<24} {} {}",
            pm.identification().name(),
            pm.greenwich_longitude(),
            pm.angular_unit()
        );
    }

    println!("Datums:");
    for datum in registry.datums() {
        let targets = datum
            .bursa_wolf_parameters()
            .iter()
            .map(|p| p.target_datum().name())
            .collect::<Vec<_>>();
        println!(
            "    {:<24} {:<24} -> {}",
            datum.name(),
            datum.ellipsoid().identification().name(),
            targets.join(", ")
        );
    }
}
