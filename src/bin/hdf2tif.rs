//! CLI binary for hdf2tif.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and reports results.

use anyhow::{Context, Result};
use clap::Parser;
use hdf2tif::{convert, convert_to, inspect, ConversionConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (output path derived: scene.hdf → scene.tif)
  hdf2tif -i scene.hdf -b ndvi

  # Explicit output path
  hdf2tif -i scene.hdf -b evi -o evi.tif

  # Reproject the result to UTM zone 33N
  hdf2tif -i scene.hdf -b ndvi -p epsg:32633

  # Suppress the HEG tools' stdout
  hdf2tif -i scene.hdf -b ndvi -s

  # Print the granule's header report without converting
  hdf2tif -i scene.hdf -b ndvi --inspect-only

BAND ALIASES (MOD13Q1 / MYD13Q1):
  ndvi        250m 16 days NDVI
  evi         250m 16 days EVI
  vi-quality  250m 16 days VI Quality
  red         250m 16 days red reflectance
  nir         250m 16 days NIR reflectance
  blue        250m 16 days blue reflectance
  mir         250m 16 days MIR reflectance
  day         250m 16 days composite day of the year
  pix-rel     250m 16 days pixel reliability

  An alias that is not in the table is passed to the resampler verbatim,
  so exact HDF-EOS field names work for any product.

ENVIRONMENT VARIABLES:
  HEG_ROOT   HEG installation root (default: /usr/local/heg)
  HEGUSER    Identity handed to the HEG tools (default: BOB)

SETUP:
  1. Install the HEG toolchain and point --heg-root (or HEG_ROOT) at it.
  2. Install GDAL if you want reprojection (-p); gdalwarp must be on PATH
     or named via --warp-cmd.
"#;

/// Convert MODIS HDF-EOS granules to georeferenced GeoTIFF.
#[derive(Parser, Debug)]
#[command(
    name = "hdf2tif",
    version,
    about = "Convert MODIS HDF-EOS granules to georeferenced GeoTIFF via the HEG toolchain",
    long_about = "Convert MODIS HDF-EOS granules (MOD13Q1/MYD13Q1 and friends) to georeferenced \
GeoTIFF by orchestrating the HEG hegtool/resample tools, optionally reprojecting the result \
with gdalwarp.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input HDF-EOS granule.
    #[arg(short, long)]
    input: PathBuf,

    /// Band alias (e.g. ndvi, evi) or exact field name.
    #[arg(short, long)]
    band: String,

    /// Output GeoTIFF path. Default: input with .hdf replaced by .tif.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suppress the external tools' stdout.
    #[arg(short, long)]
    silence: bool,

    /// Reproject the output to this SRS (e.g. epsg:32633).
    #[arg(short, long)]
    projection: Option<String>,

    /// HEG installation root.
    #[arg(long, env = "HEG_ROOT", default_value = hdf2tif::config::DEFAULT_HEG_ROOT)]
    heg_root: PathBuf,

    /// Identity handed to the HEG tools.
    #[arg(long, env = "HEGUSER", default_value = hdf2tif::config::DEFAULT_HEG_USER)]
    heg_user: String,

    /// Reprojection command.
    #[arg(long, default_value = "gdalwarp")]
    warp_cmd: PathBuf,

    /// Print the granule's header report, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        // Contract: failures report as "error: <message>" on stdout and
        // exit with status 1.
        println!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.silence {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConversionConfig::builder()
        .band(&cli.band)
        .verbose(!cli.silence)
        .heg_root(&cli.heg_root)
        .heg_user(&cli.heg_user)
        .warp_cmd(&cli.warp_cmd);
    if let Some(ref srs) = cli.projection {
        builder = builder.projection(srs);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let report = inspect(&cli.input, &config).context("Failed to inspect granule")?;
        let mut fields: Vec<(&str, &str)> = report.iter().collect();
        fields.sort_unstable();
        for (key, value) in fields {
            println!("{key} = {value}");
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let output = match cli.output {
        Some(ref output) => {
            convert_to(&cli.input, output, &config).context("Conversion failed")?;
            output.clone()
        }
        None => convert(&cli.input, &config).context("Conversion failed")?,
    };

    if !cli.silence {
        eprintln!("wrote {}", output.display());
    }
    Ok(())
}
