//! Display-name normalization.
//!
//! Virtual-world item names are free text typed (or generated) by creators
//! and routinely contain non-breaking spaces, ideographic spaces, embedded
//! tabs and newlines, and runs of padding spaces used for in-viewer
//! alignment. Every matcher in this crate operates on the normalized form so
//! that a rule written against `"Magika - Sadie"` also catches
//! `"Magika\u{00A0}-  Sadie "`.

/// Unicode space variants that are folded into a plain ASCII space before
/// matching. Zero-width space is included because it renders invisibly but
/// still breaks substring matches.
const UNICODE_SPACES: [char; 16] = [
    '\u{00A0}', // Non-breaking space
    '\u{2000}', // En quad
    '\u{2001}', // Em quad
    '\u{2002}', // En space
    '\u{2003}', // Em space
    '\u{2004}', // Three-per-em space
    '\u{2005}', // Four-per-em space
    '\u{2006}', // Six-per-em space
    '\u{2007}', // Figure space
    '\u{2008}', // Punctuation space
    '\u{2009}', // Thin space
    '\u{200A}', // Hair space
    '\u{200B}', // Zero-width space
    '\u{202F}', // Narrow no-break space
    '\u{205F}', // Medium mathematical space
    '\u{3000}', // Ideographic space
];

/// Canonicalizes a display name for matching.
///
/// Total and deterministic: never fails, and `normalize(normalize(x))`
/// always equals `normalize(x)` (the empty string maps to itself).
///
/// - Unicode space variants become ASCII spaces.
/// - Tabs and newlines become spaces; carriage returns are dropped.
/// - Runs of whitespace collapse to a single space.
/// - Leading and trailing whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use sortie_classify::normalize;
///
/// assert_eq!(normalize("  Magika\u{00A0}-  Sadie\tHair \n"), "Magika - Sadie Hair");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut pending_space = false;
    for c in name.chars() {
        let c = match c {
            '\r' => continue,
            '\t' | '\n' => ' ',
            c if UNICODE_SPACES.contains(&c) => ' ',
            c => c,
        };
        if c == ' ' || c.is_whitespace() {
            pending_space = !result.is_empty();
        } else {
            if pending_space {
                result.push(' ');
                pending_space = false;
            }
            result.push(c);
        }
    }
    result
}
