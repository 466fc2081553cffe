//! The built-in rule table.
//!
//! Priorities are spaced so that specific product categories claim a name
//! before generic ones: boxed/demo detection first, then kink equipment
//! (which would otherwise be swallowed by generic clothing), then body
//! parts, clothing, and finally furniture and review buckets. Each rule
//! either searches a pattern or whole-word-matches a keyword list.

use super::{Matcher, Rule};

/// Compile a built-in search pattern.
fn pattern(p: &str) -> Matcher {
    // Infallible: built-in patterns are constants exercised by the tests below.
    Matcher::pattern(p).unwrap()
}

fn keywords<const N: usize>(kws: [&str; N]) -> Matcher {
    Matcher::keywords(kws)
}

/// Returns the default rules in declaration order. [`RuleSet::new`](super::RuleSet::new)
/// performs the stable priority sort.
pub(super) fn rules() -> Vec<Rule> {
    vec![
        // Boxed items - highest priority.
        Rule::new("Boxed Items", "Boxed Items", 100, pattern(r"(Box|Add\s*Me|Rezz\s*Me|Unpack)")),
        // Demos.
        Rule::new("Demos", "_Demos", 90, pattern(r"\bdemo\b")),
        // Kink equipment outranks generic clothing: a leather hood is
        // equipment, not headwear.
        Rule::new(
            "BDSM Equipment",
            "BDSM/Equipment",
            89,
            keywords([
                "hood",
                "armbinder",
                "gag",
                "muzzle",
                "blindfold",
                "cuff",
                "cuffs",
                "spreader",
                "straitjacket",
                "chastity",
                "restraint",
                "bondage",
                "padlock",
            ]),
        ),
        // Brands that only make equipment.
        Rule::new("KDC Equipment", "BDSM/Equipment", 89, pattern(r"\bKDC\b")),
        Rule::new("CC Chastity", "BDSM/Equipment", 89, pattern(r"CC[\/\\]T&T|Chastity Belt")),
        Rule::new(
            "BDSM Restraints",
            "BDSM",
            88,
            keywords(["collar", "leash", "harness", "prisoner", "prison", "slave", "submissa"]),
        ),
        Rule::new("NGW Equipment", "BDSM/Equipment", 89, pattern(r"\bNGW\b")),
        Rule::new(
            "BDSM Brands",
            "BDSM",
            87,
            // \* escapes the literal asterisks in the *HDM* decoration.
            pattern(
                r"(\*HDM\*|\bHDM\b|Vixen|~?Silenced~?|RR&Co|Bad Bunny|OpenCollar|Realrestraint|Decima|Aphasia|SNUGGLIES|CryBunBun|LnB|BioDoll|Size:KaS|KaS\b)",
            ),
        ),
        Rule::new(
            "BDSM Animations",
            "Animations/BDSM",
            87,
            keywords(["BDSM animations", "BDSM anim", "bondage animations"]),
        ),
        // Corsets match on product type, not brand.
        Rule::new("Corsets", "BDSM/Clothing/Corsets", 87, keywords(["corset", "corsets"])),
        Rule::new(
            "BDSM Latex",
            "BDSM",
            86,
            keywords(["latex catsuit", "rubber doll", "latex doll", "kink add-on", "open body", "polyform latex"]),
        ),
        // Whips/crops are accessories, not restraints.
        Rule::new("Whips", "Clothing/Accessories", 85, keywords(["whip", "crop", "riding crop"])),
        Rule::new(
            "Animation Overrides",
            "Animation Overrides",
            86,
            pattern(r"(\bAO\b|Animation Override|BENTO AO|BodyLanguage.*AO|AO.*Pack)"),
        ),
        Rule::new("Dance Gestures", "Gestures/Dances", 85, keywords(["dance", "dancing", "dances"])),
        Rule::new(
            "Expression Gestures",
            "Gestures/Expressions",
            84,
            keywords(["laugh", "cry", "smile", "wave", "clap", "cheer", "boo", "shrug"]),
        ),
        // Hair gets brand/product segments appended at classification time.
        // Lower priority than heads: some head brands also make hair.
        Rule::new(
            "Hair",
            "Body Parts/Hair",
            78,
            keywords([
                "Hair",
                "Hairstyle",
                "Magika",
                "Stealthic",
                "Doux",
                "Truth",
                "Sintiklia",
                "Wasabi",
                "Tableau Vivant",
                "KUNI",
            ]),
        ),
        Rule::new(
            "Shoes",
            "Clothing/Shoes",
            75,
            keywords([
                "Boots",
                "Heels",
                "Shoes",
                "Sneakers",
                "Sandals",
                "Flats",
                "Pumps",
                "Loafers",
                "Stilettos",
                "Cuban heel",
            ]),
        ),
        Rule::new("Shoe Brands", "Clothing/Shoes", 74, pattern(r"\berratic\b")),
        Rule::new(
            "Clothing",
            "Clothing",
            70,
            keywords([
                "Dress",
                "Gown",
                "Skirt",
                "Pants",
                "Shirt",
                "Top",
                "Sweater",
                "Lingerie",
                "Bikini",
                "Blouse",
                "Jacket",
                "Coat",
                "Jeans",
                "Shorts",
                "Leggings",
                "Thong",
                "Panties",
                "Bra",
                "Underwear",
                "Pantyhose",
                "Stockings",
                "Bodysuit",
                "Catsuit",
                "Suit",
            ]),
        ),
        // Hosiery outranks generic clothing by one.
        Rule::new(
            "Hosiery",
            "Clothing/Hosiery",
            71,
            keywords(["Pantyhose", "Stockings", "Tights", "Hosiery", "Nylons"]),
        ),
        // Heads require brand + "Head" so "Dress for LeLUTKA" stays clothing.
        Rule::new(
            "Mesh Heads",
            "Body Parts/Heads",
            82,
            pattern(r"((LeLUTKA|GENUS|Catwa|LAQ|Akeruka|Logo).*Head|Mesh Head)"),
        ),
        // Bodies match product names, not brand names: "Maitreya Dress" must
        // not land here, "Maitreya Lara Body" must.
        Rule::new(
            "Mesh Bodies",
            "Body Parts/Bodies",
            64,
            pattern(r"(Lara\b|LaraX|Mesh Body|Reborn\b|Kupra|Perky|Freya|Isis|Venus|Hourglass|Physique|Legacy.*Body|eBody.*Reborn)"),
        ),
        Rule::new(
            "Body Deformers",
            "Body Parts/Bodies",
            63,
            keywords(["deformer", "fixer", "butt fixer", "flat ass", "morph", "kuromori", "Influence"]),
        ),
        // Skins by product type; brands make multiple products.
        Rule::new("Skins", "Body Parts/Skins", 62, keywords(["Skin", "Skins", "Body Skin", "Head Skin", "BOM Skin"])),
        Rule::new("Skin Brands", "Body Parts/Skins", 62, pattern(r"(VELOUR|Pepe Skins|Ipanema Body)")),
        Rule::new("Body Parts", "Body Parts", 60, keywords(["Skin", "Shape", "Eyes", "Bento", "BOM", "Applier"])),
        Rule::new(
            "Body Accessories",
            "Body Parts/Accessories",
            61,
            keywords(["nipple rings", "nipple piercing", "piercing", "body jewelry", "belly ring"]),
        ),
        Rule::new("Tattoos", "Body Parts/Tattoos", 59, keywords(["tattoo", "tattoos", "tat", "barcode"])),
        Rule::new(
            "Utility HUDs",
            "Objects/Utilities",
            55,
            keywords(["Teleporter", "Auto Teleporter", "Pose Adjuster", "Resizer", "Animator", "Face Light", "AO HUD"]),
        ),
        Rule::new("Updaters", "Objects/Updaters", 54, pattern(r"(Update folder|Updater|RR Update)")),
        Rule::new("OMY Animations", "Animations", 54, pattern(r"\bOMY\b")),
        Rule::new(
            "Furniture",
            "Objects/Furniture",
            50,
            keywords([
                "Chair",
                "Table",
                "Lamp",
                "Rug",
                "Furniture",
                "Sofa",
                "Bed",
                "Couch",
                "Desk",
                "Shelf",
                "Cabinet",
                "Cage",
                "Cross",
                "Rack",
                "Stocks",
                "Pillory",
                "Frame",
                "Dungeon",
                "Throne",
            ]),
        ),
        // Boxed items that need manual review.
        Rule::new("Check Items", "Objects/Check", 40, pattern(r"(Unpacker|unpack|rez to unpack|wear.*unpack)")),
    ]
}

#[cfg(test)]
mod tests {
    use crate::RuleSet;
    use rstest::rstest;

    #[test]
    fn test_all_default_patterns_compile() {
        // Forces every LazyLock/inline pattern in the table.
        assert!(!RuleSet::defaults().is_empty());
    }

    #[rstest]
    #[case("Mysterious Gacha Box", "Boxed Items")]
    #[case("DEMO - Summer Dress", "Demos")]
    #[case("Leather Hood (strict)", "BDSM Equipment")]
    #[case("LeLUTKA Avalon Head", "Mesh Heads")]
    #[case("Dress for LeLUTKA", "Clothing")]
    #[case("Maitreya Lara Body", "Mesh Bodies")]
    #[case("Bento AO - Confident", "Animation Overrides")]
    #[case("Salsa Dance Pack", "Dance Gestures")]
    #[case("Magika Hairstyle Pack", "Hair")]
    #[case("Cuban heel pumps", "Shoes")]
    #[case("Sheer Stockings", "Hosiery")]
    #[case("VELOUR Ipanema Glow", "Skin Brands")]
    #[case("Oak Dining Table", "Furniture")]
    fn test_default_table_dispatch(#[case] name: &str, #[case] expected_rule: &str) {
        let rules = RuleSet::defaults();
        assert_eq!(rules.find_match(name).unwrap().name, expected_rule);
    }

    #[test]
    fn test_equipment_outranks_clothing() {
        let rules = RuleSet::defaults();
        // "catsuit" is a clothing keyword, but "latex catsuit" is kink gear.
        assert_eq!(rules.find_match("Polyform Latex Catsuit").unwrap().name, "BDSM Latex");
    }
}
