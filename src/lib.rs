//! # hdf2tif
//!
//! Convert MODIS HDF-EOS granules to georeferenced GeoTIFF by driving the
//! HEG toolchain, with optional reprojection via GDAL.
//!
//! ## Why this crate?
//!
//! The HEG resampler does the real work but has a hostile interface: it is
//! driven by a hand-written parameter file whose spatial-subset corners,
//! grid object name and field name must be copied out of a separate
//! `hegtool` report, and both tools scatter fixed-named logs and scratch
//! files across whatever directory they run in. This crate automates the
//! whole dance for one granule and cleans up afterwards.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HDF granule
//!  │
//!  ├─ 1. Stat      hegtool -h <granule> → HegHdr.hdr key/value report
//!  ├─ 2. Assemble  merge grid corners, object and field names into the
//!  │               resample parameter block
//!  ├─ 3. Convert   resample -p <params> → GeoTIFF
//!  ├─ 4. Cleanup   logs, parameter file, .met sidecar, scratch files
//!  └─ 5. Warp      gdalwarp <tif> <staging> -t_srs <SRS>, atomic swap
//!                  (only when a projection is requested)
//! ```
//!
//! Each run gets its own temporary working directory, so concurrent
//! conversions cannot trample each other's tool droppings, and the HEG
//! environment variables are scoped to the child processes rather than
//! written into this process's environment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hdf2tif::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .band("ndvi")
//!         .projection("epsg:32633")
//!         .heg_root("/opt/heg")
//!         .build()?;
//!     let tif = convert("MOD13Q1.A2017145.h13v10.hdf", &config)?;
//!     println!("wrote {}", tif.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `hdf2tif` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! hdf2tif = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod header;
pub mod params;
pub mod pipeline;
pub mod products;
pub mod tool;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_to, derive_output_path, inspect};
pub use error::Hdf2TifError;
pub use header::HeaderReport;
pub use params::ResampleParams;
