//! Stat stage: extract granule metadata with `hegtool`.
//!
//! `hegtool -h <granule>` does not print its report — it drops a
//! fixed-named `HegHdr.hdr` (and a `hegtool.log`) into its current
//! working directory. The stage therefore runs the tool inside the
//! per-run working directory, reads the header from there and removes
//! both files afterwards.

use crate::config::ConversionConfig;
use crate::error::Hdf2TifError;
use crate::header::HeaderReport;
use crate::pipeline::cleanup;
use crate::tool::ExternalTool;
use std::path::Path;
use tracing::{debug, info};

/// Fixed name of the header report hegtool writes into its cwd.
pub const HEADER_FILENAME: &str = "HegHdr.hdr";

/// Fixed name of the log file hegtool writes into its cwd.
pub const LOG_FILENAME: &str = "hegtool.log";

/// Run the stat tool on `input` and parse its header report.
///
/// `input` must be an absolute path: the tool runs with `workdir` as its
/// cwd, so a relative path would resolve against the wrong directory.
pub fn stat_granule(
    input: &Path,
    workdir: &Path,
    config: &ConversionConfig,
) -> Result<HeaderReport, Hdf2TifError> {
    info!(input = %input.display(), "extracting granule metadata");

    ExternalTool::new(config.stat_cmd())
        .arg("-h")
        .arg(input)
        .envs(&config.env_overrides())
        .current_dir(workdir)
        .verbose(config.verbose)
        .run()?;

    let header_path = workdir.join(HEADER_FILENAME);
    let text = std::fs::read_to_string(&header_path).map_err(|e| {
        Hdf2TifError::HeaderUnreadable {
            path: header_path.clone(),
            source: e,
        }
    })?;
    let report = HeaderReport::parse(&text);
    debug!(fields = report.len(), "parsed header report");

    cleanup::remove_if_exists(&workdir.join(LOG_FILENAME))?;
    cleanup::remove_if_exists(&header_path)?;

    Ok(report)
}
