//! Product name normalization service
//!
//! Normalizes free-text product names to a canonical form so the same
//! product listed by different sellers folds into one price group.

use crate::types::Category;

/// Normalize a product name to canonical form.
///
/// Transformations, in order:
/// - Lower-case: "Mango" → "mango"
/// - Trim outer whitespace: "mango " → "mango"
/// - Drop every character that is not a lowercase ASCII letter, an ASCII
///   digit, or whitespace: "apple!!" → "apple" (punctuation, accented
///   letters and emoji all go; inner spaces stay)
/// - Trim again, since dropping characters can expose new outer whitespace
///
/// The result is idempotent: normalizing an already-normalized name is a
/// no-op.
///
/// # Examples
/// ```
/// use farmstand::services::normalizer::normalize_product_name;
///
/// assert_eq!(normalize_product_name("Apple!!"), "apple");
/// assert_eq!(normalize_product_name("  MANGO "), "mango");
/// ```
pub fn normalize_product_name(name: &str) -> String {
    let lowered = name.to_lowercase();

    let kept: String = lowered
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    kept.trim().to_string()
}

/// Derive the display form of a normalized name: first character upper-cased.
///
/// Operates on the *normalized* name, so inputs "Mango" and "MANGO " both
/// display as "Mango" no matter which record reached the group first — the
/// original casing of individual listings is discarded on purpose.
pub fn display_name(normalized: &str) -> String {
    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Build the grouping key for a listing: normalized name and category slug
/// joined by `-`. Normalization strips `-` from names, so the join cannot
/// collide with name content.
pub fn group_key(name: &str, category: Category) -> String {
    format!("{}-{}", normalize_product_name(name), category)
}
