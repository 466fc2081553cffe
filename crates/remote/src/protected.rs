//! Protected (system) folders.
//!
//! The store manages these folders specially; they must never be used as a
//! sort source or target, recursed into, or deleted. The resolver itself is
//! indifferent — enforcement is the reconciler's job via [`is_protected`].

use sortie_classify::normalize;

/// Fixed-name folders the external store manages. Constant across accounts.
pub const PROTECTED_FOLDERS: [&str; 16] = [
    "Calling Cards",
    "Current Outfit",
    "Landmarks",
    "Lost And Found",
    "Materials",
    "My Favorites",
    "My Outfits",
    "Notecards",
    "Photo Album",
    "Trash",
    "Inbox",
    "Received Items",
    "Animation Overrides",
    "#RLV",
    "Animations",
    "Library",
];

/// Returns `true` when the (normalized) folder name is a protected system
/// folder.
pub fn is_protected(name: &str) -> bool {
    let normalized = normalize(name);
    PROTECTED_FOLDERS.iter().any(|p| *p == normalized)
}
