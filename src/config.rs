//! Configuration types for HDF-to-GeoTIFF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct means
//! a single value describes a whole run — handy for logging and for driving
//! the same conversion from the CLI, a test, or another crate.
//!
//! The HEG toolchain is located through a single root directory
//! ([`ConversionConfig::heg_root`]); the stat and resample binaries, the
//! `MRTDATADIR` data directory and the `PGSHOME` toolkit directory are all
//! derived from it. Individual tool paths can still be overridden, which is
//! what the end-to-end tests use to substitute mock scripts.

use crate::error::Hdf2TifError;
use std::path::{Path, PathBuf};

/// Default HEG installation root when neither `--heg-root` nor `HEG_ROOT`
/// is given.
pub const DEFAULT_HEG_ROOT: &str = "/usr/local/heg";

/// Default `HEGUSER` identity passed to the HEG tools. The tools refuse to
/// run without one; the value itself is not meaningful.
pub const DEFAULT_HEG_USER: &str = "BOB";

/// Configuration for one HDF-to-GeoTIFF conversion.
///
/// Built via [`ConversionConfig::builder()`].
///
/// # Example
/// ```rust
/// use hdf2tif::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .band("ndvi")
///     .projection("epsg:32633")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Band alias selecting the data layer to extract, e.g. "ndvi", "evi".
    ///
    /// Resolved against the product band table
    /// ([`crate::products::field_name`]); an alias with no table entry is
    /// passed to the resampler verbatim, so exact field names work too.
    pub band: String,

    /// Target SRS for reprojection, e.g. "epsg:32633". `None` skips the
    /// warp stage entirely. Upper-cased before being handed to gdalwarp.
    pub projection: Option<String>,

    /// Stream the external tools' stdout to the terminal. Default: true.
    ///
    /// When false the children's stdout goes to the null device; stderr is
    /// never touched so tool failures stay diagnosable.
    pub verbose: bool,

    /// HEG installation root. `bin/hegtool`, `bin/resample`, `data` and
    /// `TOOLKIT_MTD` are resolved beneath it.
    pub heg_root: PathBuf,

    /// `HEGUSER` identity handed to the HEG tools. Default: "BOB".
    pub heg_user: String,

    /// Explicit path to the stat tool, overriding `heg_root/bin/hegtool`.
    pub stat_cmd: Option<PathBuf>,

    /// Explicit path to the resampler, overriding `heg_root/bin/resample`.
    pub resample_cmd: Option<PathBuf>,

    /// Reprojection command. Default: "gdalwarp" (found on PATH).
    pub warp_cmd: PathBuf,

    /// Resampling kernel written into the parameter block. Default: "BI"
    /// (bilinear).
    pub resampling_type: String,

    /// Reference ellipsoid written into the parameter block. Default:
    /// "WGS84".
    pub ellipsoid_code: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            band: String::new(),
            projection: None,
            verbose: true,
            heg_root: PathBuf::from(DEFAULT_HEG_ROOT),
            heg_user: DEFAULT_HEG_USER.to_string(),
            stat_cmd: None,
            resample_cmd: None,
            warp_cmd: PathBuf::from("gdalwarp"),
            resampling_type: "BI".to_string(),
            ellipsoid_code: "WGS84".to_string(),
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolved path of the stat tool.
    pub fn stat_cmd(&self) -> PathBuf {
        self.stat_cmd
            .clone()
            .unwrap_or_else(|| self.heg_root.join("bin").join("hegtool"))
    }

    /// Resolved path of the resampler.
    pub fn resample_cmd(&self) -> PathBuf {
        self.resample_cmd
            .clone()
            .unwrap_or_else(|| self.heg_root.join("bin").join("resample"))
    }

    /// The three environment overrides the HEG tools require.
    ///
    /// These are passed per child process, never written into this
    /// process's own environment.
    pub fn env_overrides(&self) -> Vec<(String, String)> {
        vec![
            ("HEGUSER".to_string(), self.heg_user.clone()),
            (
                "MRTDATADIR".to_string(),
                self.heg_root.join("data").display().to_string(),
            ),
            (
                "PGSHOME".to_string(),
                self.heg_root.join("TOOLKIT_MTD").display().to_string(),
            ),
        ]
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn band(mut self, band: impl Into<String>) -> Self {
        self.config.band = band.into();
        self
    }

    pub fn projection(mut self, srs: impl Into<String>) -> Self {
        self.config.projection = Some(srs.into());
        self
    }

    pub fn verbose(mut self, v: bool) -> Self {
        self.config.verbose = v;
        self
    }

    pub fn heg_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.heg_root = root.into();
        self
    }

    pub fn heg_user(mut self, user: impl Into<String>) -> Self {
        self.config.heg_user = user.into();
        self
    }

    pub fn stat_cmd(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.stat_cmd = Some(path.into());
        self
    }

    pub fn resample_cmd(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.resample_cmd = Some(path.into());
        self
    }

    pub fn warp_cmd(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.warp_cmd = path.into();
        self
    }

    pub fn resampling_type(mut self, kind: impl Into<String>) -> Self {
        self.config.resampling_type = kind.into();
        self
    }

    pub fn ellipsoid_code(mut self, code: impl Into<String>) -> Self {
        self.config.ellipsoid_code = code.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Hdf2TifError> {
        let c = &self.config;
        if c.band.trim().is_empty() {
            return Err(Hdf2TifError::InvalidConfig(
                "band must not be empty".into(),
            ));
        }
        if let Some(ref srs) = c.projection {
            if srs.trim().is_empty() {
                return Err(Hdf2TifError::InvalidConfig(
                    "projection must not be an empty string".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

/// Check whether `path` names an existing regular file.
pub(crate) fn existing_file(path: &Path) -> Result<(), Hdf2TifError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Hdf2TifError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
