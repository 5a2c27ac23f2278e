//! Conversion entry points.
//!
//! [`convert`] and [`convert_to`] drive the whole pipeline for one
//! granule; [`inspect`] runs only the stat stage and hands back the parsed
//! header report, which is useful for discovering a granule's product
//! shortname and grid layout without converting anything.

use crate::config::{self, ConversionConfig};
use crate::error::Hdf2TifError;
use crate::header::HeaderReport;
use crate::pipeline::{resample, stat, warp};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::info;

/// Convert a granule, deriving the output path from the input path.
///
/// Returns the path of the produced GeoTIFF.
///
/// # Errors
/// Any stage failure is fatal: a tool that cannot be launched or exits
/// non-zero, an unreadable or incomplete header report, or a filesystem
/// error while staging files. Nothing is retried.
pub fn convert(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<PathBuf, Hdf2TifError> {
    let output = derive_output_path(input.as_ref());
    convert_to(input, &output, config)?;
    Ok(output)
}

/// Convert a granule to an explicit output path.
pub fn convert_to(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<(), Hdf2TifError> {
    let input = absolute_existing(input.as_ref())?;
    let output = absolutize(output.as_ref());
    info!(input = %input.display(), output = %output.display(), "starting conversion");

    // Per-run isolation: every tool gets this directory as its cwd, so the
    // fixed-named files the HEG tools drop cannot collide across runs.
    let workdir = TempDir::new().map_err(|e| Hdf2TifError::WorkdirFailed { source: e })?;

    let report = stat::stat_granule(&input, workdir.path(), config)?;
    resample::resample_granule(&input, &output, &report, workdir.path(), config)?;

    if let Some(ref srs) = config.projection {
        warp::warp_raster(&output, srs, config)?;
    }

    info!(output = %output.display(), "conversion complete");
    Ok(())
}

/// Run only the stat stage and return the parsed header report.
pub fn inspect(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<HeaderReport, Hdf2TifError> {
    let input = absolute_existing(input.as_ref())?;
    let workdir = TempDir::new().map_err(|e| Hdf2TifError::WorkdirFailed { source: e })?;
    stat::stat_granule(&input, workdir.path(), config)
}

/// Derive the default output path: a case-insensitive `.hdf` suffix is
/// replaced by `.tif`, anything else gets `.tif` appended.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let s = input.to_string_lossy();
    let bytes = s.as_bytes();
    if bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".hdf") {
        PathBuf::from(format!("{}.tif", &s[..s.len() - 4]))
    } else {
        PathBuf::from(format!("{s}.tif"))
    }
}

/// Validate `path` exists and absolutize it. The tools run with a
/// different cwd, so relative paths must be pinned down first.
fn absolute_existing(path: &Path) -> Result<PathBuf, Hdf2TifError> {
    config::existing_file(path)?;
    Ok(absolutize(path))
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hdf_extension_is_replaced() {
        assert_eq!(
            derive_output_path(Path::new("scene.hdf")),
            PathBuf::from("scene.tif")
        );
    }

    #[test]
    fn hdf_extension_is_case_insensitive() {
        assert_eq!(
            derive_output_path(Path::new("SCENE.HDF")),
            PathBuf::from("SCENE.tif")
        );
        assert_eq!(
            derive_output_path(Path::new("scene.Hdf")),
            PathBuf::from("scene.tif")
        );
    }

    #[test]
    fn other_extension_gets_tif_appended() {
        assert_eq!(
            derive_output_path(Path::new("scene.dat")),
            PathBuf::from("scene.dat.tif")
        );
    }

    #[test]
    fn no_extension_gets_tif_appended() {
        assert_eq!(
            derive_output_path(Path::new("scene")),
            PathBuf::from("scene.tif")
        );
    }

    #[test]
    fn directories_are_preserved() {
        assert_eq!(
            derive_output_path(Path::new("/data/granules/scene.hdf")),
            PathBuf::from("/data/granules/scene.tif")
        );
    }

    #[test]
    fn missing_input_is_rejected_before_any_tool_runs() {
        let config = ConversionConfig::builder().band("ndvi").build().unwrap();
        let err = convert("/definitely/not/a/granule.hdf", &config).unwrap_err();
        assert!(matches!(err, Hdf2TifError::FileNotFound { .. }));
    }
}
