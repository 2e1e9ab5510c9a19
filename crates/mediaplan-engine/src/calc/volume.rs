//! Purchased-unit volume calculator.
//!
//! Converts an effective budget (media budget plus bonus, never the raw
//! input) into a purchased-unit count. Impression-like unit types are
//! priced per mille, so their volume is scaled by 1000.
//!
//! Returns 0 when the unit price is not positive.

use crate::constants::volume::{IMPRESSION_MARKERS, PER_MILLE};

/// Whether a unit type identifier denotes an impression/CPM-like unit.
///
/// Matching is a case-insensitive substring test, so taxonomy spellings
/// like "Impressions (display)" or "video CPM" qualify.
#[must_use]
pub fn is_impression_unit(unit_type: &str) -> bool {
    let lowered = unit_type.to_lowercase();
    IMPRESSION_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Number of purchased units an effective budget buys.
#[must_use]
pub fn unit_volume(effective_budget: f64, unit_price: f64, unit_type: &str) -> i64 {
    if unit_price <= 0.0 {
        return 0;
    }
    let units = effective_budget / unit_price;
    let scaled = if is_impression_unit(unit_type) { units * PER_MILLE } else { units };
    scaled.round() as i64
}
