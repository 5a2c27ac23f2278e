//! The resample parameter block and its on-disk text format.
//!
//! The HEG resampler is driven by a parameter file: a `NUM_RUNS` count
//! followed by a `BEGIN`/`END` block of `NAME = value` lines. The tool is
//! picky about which parameters appear and in which order, so the block is
//! modelled as an insertion-ordered list seeded from a fixed template —
//! overriding a value never moves it.
//!
//! Values are inserted verbatim. The format has no quoting or escaping, so
//! a value containing a newline would corrupt the file; HEG itself imposes
//! the same constraint and no field the pipeline computes can contain one.

use std::fmt::Write as _;

// Parameter names, template order.
pub const INPUT_FILENAME: &str = "input_filename";
pub const OBJECT_NAME: &str = "object_name";
pub const FIELD_NAME: &str = "field_name";
pub const BAND_NUMBER: &str = "band_number";
pub const SPATIAL_SUBSET_UL_CORNER: &str = "spatial_subset_ul_corner";
pub const SPATIAL_SUBSET_LR_CORNER: &str = "spatial_subset_lr_corner";
pub const RESAMPLING_TYPE: &str = "resampling_type";
pub const OUTPUT_PROJECTION_TYPE: &str = "output_projection_type";
pub const ELLIPSOID_CODE: &str = "ellipsoid_code";
pub const OUTPUT_PROJECTION_PARAMETERS: &str = "output_projection_parameters";
pub const OUTPUT_FILENAME: &str = "output_filename";
pub const OUTPUT_TYPE: &str = "output_type";

const DEFAULT_PROJECTION_PARAMETERS: &str =
    "( 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0 0.0  )";

/// An insertion-ordered resample parameter set.
///
/// Seed it with [`ResampleParams::template`], fill in the run-specific
/// values with [`set`](Self::set), then serialize with
/// [`to_config_text`](Self::to_config_text).
#[derive(Debug, Clone)]
pub struct ResampleParams {
    entries: Vec<(String, String)>,
}

impl ResampleParams {
    /// The default template. Paths, object/field names and the spatial
    /// subset corners are left empty for the pipeline to fill in.
    pub fn template(resampling_type: &str, ellipsoid_code: &str) -> Self {
        let entries = vec![
            (INPUT_FILENAME.to_string(), String::new()),
            (OBJECT_NAME.to_string(), String::new()),
            (FIELD_NAME.to_string(), String::new()),
            (BAND_NUMBER.to_string(), "1".to_string()),
            (SPATIAL_SUBSET_UL_CORNER.to_string(), String::new()),
            (SPATIAL_SUBSET_LR_CORNER.to_string(), String::new()),
            (RESAMPLING_TYPE.to_string(), resampling_type.to_string()),
            (OUTPUT_PROJECTION_TYPE.to_string(), "GEO".to_string()),
            (ELLIPSOID_CODE.to_string(), ellipsoid_code.to_string()),
            (
                OUTPUT_PROJECTION_PARAMETERS.to_string(),
                DEFAULT_PROJECTION_PARAMETERS.to_string(),
            ),
            (OUTPUT_FILENAME.to_string(), String::new()),
            (OUTPUT_TYPE.to_string(), "GEO".to_string()),
        ];
        Self { entries }
    }

    /// Set `name` to `value`. An existing entry is updated in place,
    /// keeping its position; an unknown name is appended at the end.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Look up the current value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters in the block.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the HEG parameter file format:
    ///
    /// ```text
    /// NUM_RUNS = 1
    ///
    /// BEGIN
    /// NAME = value
    /// ...
    /// END
    /// ```
    ///
    /// Names are upper-cased; order is insertion order.
    pub fn to_config_text(&self) -> String {
        let mut out = String::from("NUM_RUNS = 1\n\nBEGIN\n");
        for (name, value) in &self.entries {
            let _ = writeln!(out, "{} = {}", name.to_uppercase(), value);
        }
        out.push_str("END\n");
        out
    }
}
