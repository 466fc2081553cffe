//! Name classification for virtual-world inventory.
//!
//! The pipeline: [`normalize`] canonicalizes a free-text display name, the
//! heuristic extractors ([`extract_brand`], [`extract_product`],
//! [`detect_subfolder`]) infer taxonomy segments from it, and the
//! [`RuleSet`] resolves the name to at most one [`Rule`] whose target path,
//! combined with the inferred segments via [`classify`], becomes the logical
//! destination in the store.
//!
//! Classification is heuristic and order-dependent by design: rules are
//! evaluated descending by priority with declaration order breaking ties,
//! and the first matching predicate wins.

mod brand;
mod consts;
pub mod error;
mod normalize;
mod rules;
mod subfolder;

pub use crate::brand::{extract_brand, extract_product};
pub use crate::normalize::normalize;
pub use crate::rules::{Classification, Matcher, Rule, RuleDefinition, RuleDocument, RuleSet};
pub use crate::rules::{classify, load_rules_file, parse_rules};
pub use crate::subfolder::detect_subfolder;
