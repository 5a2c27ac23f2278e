//! Error types for the hdf2tif library.
//!
//! Every failure in this crate is fatal: the pipeline is a strict sequence of
//! external tool invocations, and once a step fails there is nothing sensible
//! to salvage — a half-written GeoTIFF is worthless. [`Hdf2TifError`] is
//! therefore a single flat enum rather than a fatal/non-fatal split, and no
//! error is ever retried or downgraded to a warning.
//!
//! The only deliberately *tolerated* condition is a missing file during
//! cleanup, which is swallowed inside [`crate::pipeline::cleanup`] and never
//! reaches this type.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All errors returned by the hdf2tif library.
#[derive(Debug, Error)]
pub enum Hdf2TifError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input granule was not found at the given path.
    #[error("HDF granule not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    // ── External tool errors ──────────────────────────────────────────────
    /// The tool binary could not be spawned at all (not installed, not
    /// executable, wrong --heg-root).
    #[error("failed to launch '{tool}': {source}\nCheck that the HEG toolchain is installed and --heg-root points at it.")]
    ToolLaunchFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// A tool ran but exited with a non-zero status (or was killed by a
    /// signal). The tool's own stderr carries the detail.
    #[error("'{tool}' failed: {status}")]
    ToolFailed { tool: String, status: ExitStatus },

    // ── Header report errors ──────────────────────────────────────────────
    /// hegtool exited successfully but its header report could not be read.
    #[error("failed to read header report '{path}': {source}")]
    HeaderUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field the pipeline needs is absent from the parsed header report.
    #[error("header report is missing required field '{field}'")]
    MissingHeaderField { field: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the per-run working directory.
    #[error("failed to create working directory: {source}")]
    WorkdirFailed {
        #[source]
        source: std::io::Error,
    },

    /// Could not write the serialized resample parameter file.
    #[error("failed to write parameter file '{path}': {source}")]
    ParamWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not move the warped raster over the original output.
    #[error("failed to replace output file '{path}': {source}")]
    OutputReplaceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cleanup removal failed for a reason other than the file being
    /// absent (absence is always tolerated).
    #[error("failed to remove '{path}': {source}")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
