//! Registry of available checks.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::diagnostic::Severity;
use crate::error::LinterError;
use crate::rule::Rule;
use crate::rules;

/// Static metadata describing a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Canonical id, e.g. `MD001`.
    pub id: &'static str,
    /// Canonical name, e.g. `heading-increment`.
    pub name: &'static str,
    /// Alternative names accepted wherever a rule can be referenced.
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub default_severity: Severity,
    pub default_enabled: bool,
    /// Link to the rule's documentation.
    pub documentation: &'static str,
}

impl RuleDescriptor {
    /// Returns the id, name and aliases in that order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        [self.id, self.name]
            .into_iter()
            .chain(self.aliases.iter().copied())
    }

    /// Returns the normalized form of every key.
    pub fn normalized_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.keys().map(normalize_rule_key)
    }

    /// Returns true if `key` refers to this rule.
    pub fn matches(&self, key: &str) -> bool {
        let key = normalize_rule_key(key);
        self.normalized_keys().any(|k| k == key)
    }
}

/// Normalizes a rule reference for lookup.
///
/// Lookups are case-insensitive and treat `-` and `_` as the same character.
pub fn normalize_rule_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

static BUILTIN: LazyLock<Arc<RuleCatalog>> = LazyLock::new(|| {
    let catalog = RuleCatalog::new(rules::builtin_rules())
        .unwrap_or_else(|e| panic!("built-in rule registration is inconsistent: {e}"));
    Arc::new(catalog)
});

/// Immutable set of registered checks, indexed by every key they answer to.
pub struct RuleCatalog {
    rules: Vec<Arc<dyn Rule>>,
    index: HashMap<String, usize>,
}

impl RuleCatalog {
    /// Builds a catalog from an explicit list of checks.
    ///
    /// Fails if two checks share an id, or if any name or alias would resolve
    /// to more than one check.
    pub fn new(rules: Vec<Arc<dyn Rule>>) -> Result<Self, LinterError> {
        let mut index: HashMap<String, usize> = HashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            let descriptor = rule.descriptor();
            for key in descriptor.normalized_keys() {
                match index.get(&key) {
                    Some(&existing) if existing == position => {}
                    Some(&existing) => {
                        let other: &RuleDescriptor = rules[existing].descriptor();
                        return Err(LinterError::DuplicateRule(format!(
                            "'{}' is registered by both {} and {}",
                            key, other.id, descriptor.id
                        )));
                    }
                    None => {
                        index.insert(key, position);
                    }
                }
            }
        }

        Ok(Self { rules, index })
    }

    /// Returns the shared catalog of built-in checks.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Looks up a descriptor by id, name or alias.
    pub fn lookup(&self, key: &str) -> Option<&RuleDescriptor> {
        self.rule(key).map(|rule| rule.descriptor())
    }

    /// Looks up a check by id, name or alias.
    pub fn rule(&self, key: &str) -> Option<&Arc<dyn Rule>> {
        self.index
            .get(&normalize_rule_key(key))
            .map(|&position| &self.rules[position])
    }

    /// Returns all descriptors in registration order.
    pub fn descriptors(&self) -> impl ExactSizeIterator<Item = &RuleDescriptor> {
        self.rules.iter().map(|rule| rule.descriptor())
    }

    /// Returns all checks in registration order.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.descriptors().map(|d| d.id).collect::<Vec<_>>())
            .finish()
    }
}
