//! Convert stage: drive the HEG `resample` tool.
//!
//! The stage merges the run-specific values — input/output paths, the
//! spatial subset corners and object name taken from the header report,
//! and the band's resolved field name — into the parameter template,
//! serializes the block to a temp file inside the working directory and
//! hands it to `resample -p`. Afterwards it sweeps up the tool's
//! droppings: its log, the `<output>.met` sidecar and two families of
//! transient scratch files.

use crate::config::ConversionConfig;
use crate::error::Hdf2TifError;
use crate::header::{self, HeaderReport};
use crate::params::{self, ResampleParams};
use crate::pipeline::cleanup;
use crate::products;
use crate::tool::ExternalTool;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fixed name of the log file resample writes into its cwd.
pub const LOG_FILENAME: &str = "resample.log";

/// Name prefixes of the scratch files resample leaves in its cwd.
pub const TRANSIENT_PREFIXES: [&str; 2] = ["filetable.temp_", "GetAttrtemp_"];

/// Run the conversion for one granule. `input` and `output` must be
/// absolute paths (the tool runs with `workdir` as its cwd).
pub fn resample_granule(
    input: &Path,
    output: &Path,
    report: &HeaderReport,
    workdir: &Path,
    config: &ConversionConfig,
) -> Result<(), Hdf2TifError> {
    let params = build_params(input, output, report, config)?;
    debug!(
        field_name = params.get(params::FIELD_NAME),
        object_name = params.get(params::OBJECT_NAME),
        "assembled resample parameters"
    );

    let param_file = write_param_file(&params, workdir)?;
    info!(output = %output.display(), "converting granule");

    let run_result = ExternalTool::new(config.resample_cmd())
        .arg("-p")
        .arg(param_file.path())
        .envs(&config.env_overrides())
        .current_dir(workdir)
        .verbose(config.verbose)
        .run();

    // The parameter file is removed when `param_file` drops, even on the
    // failure path.
    run_result?;

    cleanup::remove_if_exists(&workdir.join(LOG_FILENAME))?;
    cleanup::remove_if_exists(&met_sidecar(output))?;
    for prefix in TRANSIENT_PREFIXES {
        cleanup::remove_with_prefix(workdir, prefix)?;
    }

    Ok(())
}

/// Merge the run-specific values over the parameter template.
pub(crate) fn build_params(
    input: &Path,
    output: &Path,
    report: &HeaderReport,
    config: &ConversionConfig,
) -> Result<ResampleParams, Hdf2TifError> {
    let mut params =
        ResampleParams::template(&config.resampling_type, &config.ellipsoid_code);

    params.set(params::INPUT_FILENAME, input.display().to_string());
    params.set(params::OUTPUT_FILENAME, output.display().to_string());

    params.set(
        params::SPATIAL_SUBSET_UL_CORNER,
        format!("( {} )", report.require(header::GRID_UL_CORNER_LATLON)?),
    );
    params.set(
        params::SPATIAL_SUBSET_LR_CORNER,
        format!("( {} )", report.require(header::GRID_LR_CORNER_LATLON)?),
    );

    // The resampler addresses the grid as "<name>|"; hegtool reports the
    // grid list comma-terminated.
    let object_name = report
        .require(header::GRID_NAMES)?
        .replace(',', "")
        + "|";
    params.set(params::OBJECT_NAME, object_name);

    let product = report.require(header::INPUT_SHORTNAME)?;
    params.set(
        params::FIELD_NAME,
        products::field_name(product, &config.band),
    );

    Ok(params)
}

/// Serialize the parameter block to a temp file inside `workdir`.
fn write_param_file(
    params: &ResampleParams,
    workdir: &Path,
) -> Result<tempfile::NamedTempFile, Hdf2TifError> {
    let mut file = tempfile::Builder::new()
        .prefix("HegParam")
        .suffix(".prm")
        .tempfile_in(workdir)
        .map_err(|e| Hdf2TifError::ParamWriteFailed {
            path: workdir.to_path_buf(),
            source: e,
        })?;
    file.write_all(params.to_config_text().as_bytes())
        .map_err(|e| Hdf2TifError::ParamWriteFailed {
            path: file.path().to_path_buf(),
            source: e,
        })?;
    debug!(path = %file.path().display(), "wrote parameter file");
    Ok(file)
}

/// The `.met` sidecar resample creates next to the output raster.
pub(crate) fn met_sidecar(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".met");
    output.with_file_name(name)
}
