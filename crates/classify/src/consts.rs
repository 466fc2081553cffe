use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Brand markers, tried strictly in this order (first capture wins).
regex!(BRAND_BRACKET_REGEX, r"^\[([^\]]+)\]");
regex!(BRAND_ASTERISK_REGEX, r"^\*([^*]+)\*");
regex!(BRAND_DECORATIVE_REGEX, r"^[.\s]*::([^:]+)::[.\s]*");
regex!(BRAND_TILDE_REGEX, r"^~([^~]+)~");
regex!(BRAND_DOUBLE_COLON_REGEX, r"^::([^:]+)::");
regex!(BRAND_SPACED_COLON_REGEX, r"^([^:]+?)\s*::\s");
regex!(BRAND_DASH_REGEX, r"^([^-]+?)\s*[-–—]\s");

// Trailing descriptors stripped when deriving a product name.
regex!(
    PRODUCT_DESCRIPTOR_REGEX,
    r"(?i)\s*(Hair|Skin|Head|Body|Eyes|Shape|\(BOX\)|\(boxed\)|boxed|box)\s*$"
);
regex!(PRODUCT_VERSION_REGEX, r"(?i)\s*v?\d+\.?\d*\s*$");
regex!(PRODUCT_TRAILING_SEPARATOR_REGEX, r"\s*[-–—:]+\s*$");
