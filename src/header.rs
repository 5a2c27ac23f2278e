//! Parser for the header report (`HegHdr.hdr`) that hegtool writes.
//!
//! The report is line-oriented `KEY = VALUE` text with two quirks:
//! long values are wrapped with backslash-newline continuations, and the
//! tool uses tabs as structural whitespace. Parsing normalises both away,
//! lower-cases the keys and keeps the values as raw strings — no type
//! validation happens here. Consumers pull out the handful of fields they
//! need by name and fail hard when one is absent.

use crate::error::Hdf2TifError;
use std::collections::HashMap;

// Header fields the pipeline consumes.
pub const GRID_NAMES: &str = "grid_names";
pub const GRID_UL_CORNER_LATLON: &str = "grid_ul_corner_latlon";
pub const GRID_LR_CORNER_LATLON: &str = "grid_lr_corner_latlon";
pub const INPUT_SHORTNAME: &str = "input_shortname";

/// A parsed header report: flat map from lower-cased key to raw value.
///
/// Duplicate keys in the report silently overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct HeaderReport {
    fields: HashMap<String, String>,
}

impl HeaderReport {
    /// Parse the textual report.
    ///
    /// Continuation lines (ending in `\`) are joined, tabs become spaces,
    /// blank lines are dropped and each remaining line is split on its
    /// first `=`. Lines without a `=` are ignored.
    pub fn parse(text: &str) -> Self {
        let text = text.replace("\\\n", "").replace('\t', " ");

        let mut fields = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                fields.insert(key.trim().to_lowercase(), value.trim().to_string());
            }
        }
        Self { fields }
    }

    /// Look up a field by (lower-cased) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Look up a field the pipeline cannot proceed without.
    pub fn require(&self, key: &str) -> Result<&str, Hdf2TifError> {
        self.get(key).ok_or_else(|| Hdf2TifError::MissingHeaderField {
            field: key.to_string(),
        })
    }

    /// Number of parsed fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all parsed fields, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
