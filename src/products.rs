//! Product band tables: map a human-friendly band alias to the exact field
//! name the HEG resampler expects.
//!
//! The resampler addresses a data layer by its full HDF-EOS field name
//! (`"250m 16 days NDVI"`), which nobody wants to type on a command line.
//! Each supported product carries a table of short aliases for its fields.
//! An alias with no table entry is returned verbatim, so callers who know
//! the exact field name can always bypass the table.

use once_cell::sync::Lazy;
use std::collections::HashMap;

type BandTable = HashMap<&'static str, &'static str>;

/// Band aliases shared by the Terra (MOD13Q1) and Aqua (MYD13Q1) 16-day
/// 250 m vegetation-index products. The two products expose identical
/// field layouts.
fn vi_250m_16day_bands() -> BandTable {
    HashMap::from([
        ("ndvi", "250m 16 days NDVI"),
        ("evi", "250m 16 days EVI"),
        ("vi-quality", "250m 16 days VI Quality"),
        ("red", "250m 16 days red reflectance"),
        ("nir", "250m 16 days NIR reflectance"),
        ("blue", "250m 16 days blue reflectance"),
        ("mir", "250m 16 days MIR reflectance"),
        ("day", "250m 16 days composite day of the year"),
        ("pix-rel", "250m 16 days pixel reliability"),
    ])
}

static BAND_TABLES: Lazy<HashMap<&'static str, BandTable>> = Lazy::new(|| {
    HashMap::from([
        ("MOD13Q1", vi_250m_16day_bands()),
        ("MYD13Q1", vi_250m_16day_bands()),
    ])
});

/// Products with a band table.
pub fn supported_products() -> Vec<&'static str> {
    let mut products: Vec<&'static str> = BAND_TABLES.keys().copied().collect();
    products.sort_unstable();
    products
}

/// Resolve a band alias to the resampler field name for `product`.
///
/// Falls back to the literal alias when either the product or the alias is
/// unknown.
pub fn field_name(product: &str, band: &str) -> String {
    BAND_TABLES
        .get(product)
        .and_then(|table| table.get(band))
        .map(|s| s.to_string())
        .unwrap_or_else(|| band.to_string())
}
