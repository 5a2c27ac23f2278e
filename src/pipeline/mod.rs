//! Pipeline stages for HDF-to-GeoTIFF conversion.
//!
//! Each submodule implements exactly one stage. Keeping stages separate
//! makes each independently testable against mock tool scripts without
//! running the others.
//!
//! ## Data Flow
//!
//! ```text
//! stat ──▶ resample ──▶ warp
//! (hegtool) (HEG resample) (gdalwarp, optional)
//! ```
//!
//! 1. [`stat`]     — run `hegtool -h` and parse its `HegHdr.hdr` report
//! 2. [`resample`] — assemble the parameter block, run `resample -p`,
//!    clean up the tool's droppings
//! 3. [`warp`]     — reproject with `gdalwarp` and atomically swap the
//!    result over the original output
//! 4. [`cleanup`]  — shared best-effort removal helpers
//!
//! Every stage runs inside a per-run temporary working directory so the
//! fixed-named side-effect files the HEG tools write cannot collide
//! between concurrent conversions.

pub mod cleanup;
pub mod resample;
pub mod stat;
pub mod warp;
