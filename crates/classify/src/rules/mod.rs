//! Priority-ordered classification rules.
//!
//! A rule is a plain data record — name, target path, priority, matcher —
//! not a polymorphic object, so the active set stays auditable: dump the
//! table, read it top to bottom, and you know exactly which rule claims a
//! name. Dispatch is a stable sort (descending priority, declaration order
//! breaking ties) followed by a first-match linear scan. Rule order *is* the
//! tie-break mechanism: reordering equal-priority rules changes the
//! classification of any name that matches more than one predicate.

mod custom;
mod defaults;

pub use self::custom::{RuleDefinition, RuleDocument, load_rules_file, parse_rules};
use crate::error::{ErrorKind, Result};
use crate::{extract_brand, extract_product, normalize};
use exn::ResultExt;
use regex::Regex;
use std::cmp::Reverse;
use tracing::instrument;

/// A compiled rule predicate. Two canonical shapes only, spelled out rather
/// than boxed closures so the rule table stays inspectable.
#[derive(Debug)]
pub enum Matcher {
    /// Case-insensitive regular-expression search against the normalized name.
    Pattern(Regex),
    /// Case-insensitive whole-word search; any keyword alternative matches.
    Keywords(Vec<Regex>),
}

impl Matcher {
    /// Compiles a case-insensitive search pattern.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex =
            Regex::new(&format!("(?i){pattern}")).or_raise(|| ErrorKind::InvalidPattern(pattern.to_string()))?;
        Ok(Self::Pattern(regex))
    }

    /// Compiles a whole-word matcher over keyword alternatives.
    pub fn keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = keywords
            .into_iter()
            // Infallible: the keyword is escaped, so the pattern always compiles.
            .map(|kw| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw.as_ref()))).unwrap())
            .collect();
        Self::Keywords(patterns)
    }

    /// Evaluates the predicate against an already-normalized name.
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(normalized),
            Self::Keywords(patterns) => patterns.iter().any(|p| p.is_match(normalized)),
        }
    }
}

/// A named, prioritized classification unit. Immutable once constructed.
#[derive(Debug)]
pub struct Rule {
    /// Human-readable rule name, used for reporting which rule claimed a name.
    pub name: String,
    /// Base target path in the taxonomy, e.g. `"Body Parts/Hair"`. Brand and
    /// product segments are appended at classification time.
    pub target: String,
    /// Higher wins. Ties resolve to the earlier-declared rule.
    pub priority: i32,
    pub matcher: Matcher,
}

impl Rule {
    pub fn new(name: impl Into<String>, target: impl Into<String>, priority: i32, matcher: Matcher) -> Self {
        Self { name: name.into(), target: target.into(), priority, matcher }
    }
}

/// The active, ordered rule collection.
///
/// Construction sorts descending by priority with a *stable* sort, so rules
/// sharing a priority keep their declaration order — a core invariant, not
/// an implementation detail.
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| Reverse(r.priority));
        Self { rules }
    }

    /// The built-in rule table (see [`defaults`](self::defaults)).
    pub fn defaults() -> Self {
        Self::new(defaults::rules())
    }

    /// Merges externally-supplied rules into the set and re-sorts.
    ///
    /// The sort is stable, so pre-existing rules keep their relative order;
    /// a custom rule with an equal priority slots in after the built-ins it
    /// ties with.
    pub fn with_rules(mut self, extra: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(extra);
        Self::new(self.rules)
    }

    /// Finds the highest-priority rule whose predicate matches the name.
    ///
    /// Total and side-effect free: the name is normalized, then rules are
    /// scanned in order and the first match is returned. `None` means "no
    /// classification" — left for manual handling, never an error.
    #[instrument(level = "trace", skip(self), fields(rules = self.rules.len()))]
    pub fn find_match(&self, name: &str) -> Option<&Rule> {
        let normalized = normalize(name);
        self.rules.iter().find(|rule| rule.matcher.matches(&normalized))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// A classification decision: which rule claimed the name and the concrete
/// target path it resolves to (base target plus any inferred brand/product
/// segments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Name of the matched rule.
    pub rule: String,
    /// Concrete slash-delimited logical target path.
    pub target: String,
    pub brand: Option<String>,
    pub product: Option<String>,
}

/// Classifies a name against the rule set.
///
/// The matched rule's base target is extended with the extracted brand
/// segment, then the product segment, in that order — omitting whichever is
/// absent. Product extraction is only attempted once a brand is known;
/// without a brand prefix to strip, the "product" would just be the whole
/// name again.
///
/// # Examples
///
/// ```
/// use sortie_classify::{RuleSet, classify};
///
/// let rules = RuleSet::defaults();
/// let decision = classify("[Magika] Sadie Hair", &rules).unwrap();
/// assert_eq!(decision.target, "Body Parts/Hair/Magika/Sadie");
/// ```
#[instrument(level = "debug", skip(rules))]
pub fn classify(name: &str, rules: &RuleSet) -> Option<Classification> {
    let rule = rules.find_match(name)?;
    let brand = extract_brand(name);
    let product = brand.as_deref().and_then(|b| extract_product(name, Some(b)));

    let mut target = rule.target.clone();
    if let Some(brand) = &brand {
        target.push('/');
        target.push_str(brand);
        if let Some(product) = &product {
            target.push('/');
            target.push_str(product);
        }
    }
    tracing::debug!(rule = %rule.name, %target, "classified");
    Some(Classification { rule: rule.name.clone(), target, brand, product })
}
