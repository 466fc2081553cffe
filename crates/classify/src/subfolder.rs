//! Item-type subfolder detection.
//!
//! When a product folder is merged into the taxonomy, its individual items
//! are routed into type subfolders (`Hair/`, `HUDs/`, `Skin/`, …) so that
//! wardrobe tooling can find them. Detection is a fixed, ordered set of
//! keyword-group tests over the lowercased normalized name; the first group
//! that fires wins. HUD detection runs first on purpose: a "Hood HUD" is a
//! HUD, not equipment.

use crate::normalize;

/// Returns the canonical subfolder label for an item name, or `None` when
/// the item belongs directly in the base target folder.
///
/// # Examples
///
/// ```
/// use sortie_classify::detect_subfolder;
///
/// assert_eq!(detect_subfolder("Platinum Hood HUD"), Some("HUDs"));
/// assert_eq!(detect_subfolder("Sadie Hair - Blonde"), Some("Hair"));
/// assert_eq!(detect_subfolder("Pink Recliner Chair"), None);
/// ```
pub fn detect_subfolder(name: &str) -> Option<&'static str> {
    let name = normalize(name).to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|kw| name.contains(kw));

    if name.contains("hud") {
        return Some("HUDs");
    }
    // "chair" contains "hair"; exclude it explicitly.
    if contains_any(&["hair", "bangs", "pigtail", "ponytail", "braid", "wig"]) && !name.contains("chair") {
        return Some("Hair");
    }
    if name.contains("skin") {
        return Some("Skin");
    }
    if name.contains("shape") {
        return Some("Shape");
    }
    if name.contains("eye") && !name.contains("eyeshadow") {
        return Some("Eyes");
    }
    if name.contains("head") {
        return Some("Head");
    }
    if name.contains("body") {
        return Some("Body");
    }
    if name.contains("animation") || name.contains(" ao ") || name.ends_with(" ao") {
        return Some("Animations");
    }
    if name.contains("tattoo") || name.contains("applier") {
        return Some("Appliers");
    }
    if contains_any(&["makeup", "lipstick", "eyeshadow", "blush", "liner"]) {
        return Some("Makeup");
    }
    if contains_any(&["dress", "top", "pants", "skirt", "shirt", "jacket", "coat"]) {
        return Some("Clothing");
    }
    if contains_any(&["shoe", "boot", "heel", "sandal", "sneaker"]) {
        return Some("Shoes");
    }
    if contains_any(&["ring", "necklace", "earring", "bracelet", "collar", "cuff"]) {
        return Some("Accessories");
    }
    if name.contains("script") || name.contains("updater") {
        return Some("Scripts");
    }
    if name.contains("landmark") || name.ends_with(".lm") {
        return Some("Landmarks");
    }
    if contains_any(&["notecard", "read me", "readme", "instructions"]) {
        return Some("Docs");
    }
    if name.contains("poster") || name.contains("ad ") || name.contains(" ad") {
        return Some("Extras");
    }
    None
}
