//! Warp stage: reproject the produced raster with `gdalwarp`.
//!
//! gdalwarp cannot warp a file onto itself, so the stage writes into a
//! staging path in the same directory as the output and renames it over
//! the original on success. Same directory means same filesystem, which
//! keeps the rename atomic.

use crate::config::ConversionConfig;
use crate::error::Hdf2TifError;
use crate::pipeline::cleanup;
use crate::tool::ExternalTool;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reproject `raster` in place to the target SRS.
pub fn warp_raster(
    raster: &Path,
    srs: &str,
    config: &ConversionConfig,
) -> Result<(), Hdf2TifError> {
    let srs = srs.to_uppercase();
    info!(raster = %raster.display(), srs = %srs, "reprojecting");

    let staging = staging_path(raster);
    let run_result = ExternalTool::new(&config.warp_cmd)
        .arg(raster)
        .arg(&staging)
        .arg("-t_srs")
        .arg(&srs)
        .verbose(config.verbose)
        .run();

    if let Err(e) = run_result {
        // Don't leave a half-written staging file behind.
        let _ = cleanup::remove_if_exists(&staging);
        return Err(e);
    }

    std::fs::rename(&staging, raster).map_err(|e| Hdf2TifError::OutputReplaceFailed {
        path: raster.to_path_buf(),
        source: e,
    })
}

/// A not-yet-existing sibling path for gdalwarp to write into.
///
/// Includes the pid so two processes warping the same output cannot
/// trample each other's staging file.
fn staging_path(raster: &Path) -> PathBuf {
    let mut name = raster.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".warp{}.tif", std::process::id()));
    raster.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_path_is_a_sibling() {
        let staging = staging_path(Path::new("/data/scene.tif"));
        assert_eq!(staging.parent(), Some(Path::new("/data")));
        let name = staging.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("scene.tif.warp"));
        assert!(name.ends_with(".tif"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_warp_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let raster = dir.path().join("scene.tif");
        std::fs::write(&raster, "tif").unwrap();

        // A warp command that always fails.
        let config = ConversionConfig::builder()
            .band("ndvi")
            .warp_cmd("/bin/false")
            .build()
            .unwrap();

        let err = warp_raster(&raster, "epsg:4326", &config).unwrap_err();
        assert!(matches!(err, Hdf2TifError::ToolFailed { .. }));
        assert!(raster.is_file(), "original output must survive a failed warp");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().contains(".warp"))
            .collect();
        assert!(leftovers.is_empty(), "staging file not cleaned up");
    }
}
