//! External rules document support.
//!
//! Custom rules are the only persisted configuration the classification core
//! consumes directly: a JSON document listing, per rule, a name, a target
//! path, a priority, and either a regular-expression pattern or a keyword
//! list. Parsed rules are merged into the active set via
//! [`RuleSet::with_rules`](super::RuleSet::with_rules).

use super::{Matcher, Rule};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Deserialize;
use std::path::Path;

/// Top-level shape of the rules document.
#[derive(Debug, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// One rule entry. Exactly one of `regex`/`keywords` is expected; entries
/// with neither are skipped with a warning rather than failing the whole
/// document.
#[derive(Debug, Deserialize)]
pub struct RuleDefinition {
    #[serde(default)]
    pub name: Option<String>,
    pub target_path: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub regex: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Parses a rules document from its JSON source.
///
/// # Errors
/// Returns [`ErrorKind::Document`] for malformed JSON and
/// [`ErrorKind::InvalidPattern`] when a rule's regex does not compile.
/// A definition carrying neither `regex` nor `keywords` is logged and
/// skipped.
pub fn parse_rules(json: &str) -> Result<Vec<Rule>> {
    let document: RuleDocument = serde_json::from_str(json).or_raise(|| ErrorKind::Document)?;
    let mut rules = Vec::with_capacity(document.rules.len());
    for definition in document.rules {
        let name = definition.name.unwrap_or_else(|| "Custom Rule".to_string());
        let matcher = match (definition.regex, definition.keywords) {
            (Some(pattern), _) => Matcher::pattern(&pattern)?,
            (None, Some(keywords)) => Matcher::keywords(keywords),
            (None, None) => {
                tracing::warn!(rule = %name, "rule definition has neither regex nor keywords; skipping");
                continue;
            },
        };
        rules.push(Rule::new(name, definition.target_path, definition.priority, matcher));
    }
    Ok(rules)
}

/// Reads and parses a rules document from disk.
pub fn load_rules_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let json = std::fs::read_to_string(path.as_ref()).map_err(|e| exn::Exn::from(ErrorKind::Io(e)))?;
    parse_rules(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSet;

    const DOCUMENT: &str = r#"{
        "rules": [
            {
                "name": "Gacha Machines",
                "target_path": "Objects/Gacha",
                "priority": 95,
                "regex": "gacha"
            },
            {
                "name": "Pet Supplies",
                "target_path": "Objects/Pets",
                "priority": 45,
                "keywords": ["kibble", "pet bed", "aquarium"]
            },
            {
                "name": "Useless",
                "target_path": "Nowhere"
            }
        ]
    }"#;

    #[test]
    fn test_parses_both_matcher_shapes() {
        let rules = parse_rules(DOCUMENT).unwrap();
        // The matcher-less entry is skipped, not an error.
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].name, "Gacha Machines");
        assert_eq!(rules[1].priority, 45);
        assert!(rules[1].matcher.matches("fresh kibble refill"));
        assert!(!rules[1].matcher.matches("kibbles")); // whole-word
    }

    #[test]
    fn test_merges_into_default_set() {
        let rules = RuleSet::defaults().with_rules(parse_rules(DOCUMENT).unwrap());
        // Priority 95 beats the demo rule (90) but not boxed items (100).
        assert_eq!(rules.find_match("Gacha DEMO").unwrap().name, "Gacha Machines");
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_rules("{ not json").unwrap_err();
        assert!(matches!(&*err, ErrorKind::Document));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = parse_rules(r#"{"rules": [{"target_path": "X", "regex": "(unclosed"}]}"#).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPattern(_)));
    }
}
