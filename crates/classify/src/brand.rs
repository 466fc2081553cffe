//! Brand and product inference from display names.
//!
//! Creators decorate their brand in a handful of recognizable ways —
//! `[Brand] Item`, `*Brand* Item`, `.::Brand::. Item`, `~Brand~ Item`,
//! `::Brand:: Item`, `Brand :: Item`, `Brand - Item` — and the matching
//! order here is the priority order. Only the first matching pattern's
//! capture is returned; there is no fallback scoring across patterns.

use crate::consts;
use crate::normalize;
use tracing::instrument;

/// Single-token artifacts that look like a dash-separated brand but never
/// are. Lowercase; compared against the lowercased candidate.
const BRAND_STOPLIST: [&str; 3] = ["demo", "v1", "v2"];

/// Attempts to extract a brand name from an item or folder name.
///
/// The name is normalized first, then each decoration pattern is tried in
/// declared priority order. The dash pattern is the loosest, so its capture
/// is additionally rejected when it is too short (≤ 2 chars) or a stoplist
/// artifact like `"Demo"`.
///
/// # Examples
///
/// ```
/// use sortie_classify::extract_brand;
///
/// assert_eq!(extract_brand("[Magika] Sadie Hair"), Some("Magika".to_string()));
/// assert_eq!(extract_brand("Stealthic :: Vice"), Some("Stealthic".to_string()));
/// assert_eq!(extract_brand("Demo - Summer Dress"), None);
/// ```
#[instrument(level = "trace")]
pub fn extract_brand(name: &str) -> Option<String> {
    let normalized = normalize(name);

    for pattern in [
        &consts::BRAND_BRACKET_REGEX,
        &consts::BRAND_ASTERISK_REGEX,
        &consts::BRAND_DECORATIVE_REGEX,
        &consts::BRAND_TILDE_REGEX,
        &consts::BRAND_DOUBLE_COLON_REGEX,
        &consts::BRAND_SPACED_COLON_REGEX,
    ] {
        if let Some(captures) = pattern.captures(&normalized)
            && let Some(brand) = captures.get(1)
        {
            return Some(brand.as_str().trim().to_string());
        }
    }

    if let Some(captures) = consts::BRAND_DASH_REGEX.captures(&normalized)
        && let Some(candidate) = captures.get(1)
    {
        let candidate = candidate.as_str().trim();
        if candidate.chars().count() > 2 && !BRAND_STOPLIST.contains(&candidate.to_lowercase().as_str()) {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Derives a product name from a folder name, given an already-extracted
/// brand.
///
/// Strips the brand prefix (case-insensitive, including any separator run),
/// known trailing descriptors (`Hair`, `Skin`, `(BOX)`, …), trailing version
/// numbers, and trailing separator punctuation. Returns `None` when nothing
/// remains after stripping.
///
/// # Examples
///
/// ```
/// use sortie_classify::extract_product;
///
/// assert_eq!(extract_product("Magika - Sadie Hair", Some("Magika")), Some("Sadie".to_string()));
/// assert_eq!(extract_product("Magika - Hair", Some("Magika")), None);
/// ```
#[instrument(level = "trace")]
pub fn extract_product(name: &str, brand: Option<&str>) -> Option<String> {
    let mut normalized = normalize(name);

    if let Some(brand) = brand {
        // The brand may still be wrapped in its decoration ("[Magika] Sadie"),
        // so the prefix pattern eats decoration on both sides of it.
        let prefix = format!(r"(?i)^[\[\*~:.\s]*{}[\]\*~:.\s]*[-–—:]*\s*", regex::escape(brand));
        if let Ok(prefix) = regex::Regex::new(&prefix) {
            normalized = prefix.replace(&normalized, "").to_string();
        }
    }

    normalized = consts::PRODUCT_DESCRIPTOR_REGEX.replace(&normalized, "").to_string();
    normalized = consts::PRODUCT_VERSION_REGEX.replace(&normalized, "").to_string();
    normalized = consts::PRODUCT_TRAILING_SEPARATOR_REGEX.replace(&normalized, "").to_string();

    let product = normalized.trim();
    (!product.is_empty()).then(|| product.to_string())
}
