//! Per-file settings sources.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::catalog::{RuleDescriptor, normalize_rule_key};
use crate::error::LinterError;

/// Prefix marking a settings key as a rule setting.
pub const RULE_KEY_PREFIX: &str = "md_";

/// A source of raw per-file `key = value` settings.
///
/// Keys are expected in lower case. Errors are reported to the caller; the
/// resolver logs them and continues without per-file settings.
pub trait SettingsSource: Send + Sync {
    fn load(&self, path: &Path) -> Result<HashMap<String, String>, LinterError>;
}

/// A fixed settings map applied to every file.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    entries: HashMap<String, String>,
}

impl StaticSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry; the key is lower-cased.
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.entries
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StaticSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |settings, (k, v)| settings.with(k, v))
    }
}

impl SettingsSource for StaticSettings {
    fn load(&self, _path: &Path) -> Result<HashMap<String, String>, LinterError> {
        Ok(self.entries.clone())
    }
}

/// Per-file settings indexed for rule lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    rules: HashMap<String, String>,
    parameters: HashMap<String, BTreeMap<String, String>>,
    indent_size: Option<usize>,
}

impl FileSettings {
    /// Indexes a raw settings map.
    ///
    /// `md_<rule>` keys become rule values and `md_<rule>.<param>` keys become
    /// named parameters; the rule part is normalized like catalog keys.
    pub fn from_raw(raw: &HashMap<String, String>) -> Self {
        let mut settings = Self::default();
        for (key, value) in raw {
            let key = key.to_ascii_lowercase();
            if let Some(rest) = key.strip_prefix(RULE_KEY_PREFIX) {
                match rest.split_once('.') {
                    Some((rule, param)) => {
                        settings
                            .parameters
                            .entry(normalize_rule_key(rule))
                            .or_default()
                            .insert(param.trim().to_string(), value.trim().to_string());
                    }
                    None => {
                        settings
                            .rules
                            .insert(normalize_rule_key(rest), value.clone());
                    }
                }
            }
        }
        settings.indent_size = Self::parse_indent_size(raw);
        settings
    }

    fn parse_indent_size(raw: &HashMap<String, String>) -> Option<usize> {
        let positive = |key: &str| {
            raw.get(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
        };
        match raw.get("indent_size").map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "tab" => positive("tab_width"),
            Some(_) => positive("indent_size"),
            None => None,
        }
    }

    /// Returns the raw rule value, trying the id, then the name, then aliases.
    pub fn rule_value(&self, descriptor: &RuleDescriptor) -> Option<&str> {
        descriptor
            .normalized_keys()
            .find_map(|key| self.rules.get(&key))
            .map(String::as_str)
    }

    /// Returns named parameters for the rule, merged over all its keys.
    ///
    /// Entries under the id win over the name, which wins over aliases.
    pub fn parameters(&self, descriptor: &RuleDescriptor) -> BTreeMap<String, String> {
        let keys: Vec<String> = descriptor.normalized_keys().collect();
        let mut merged = BTreeMap::new();
        for key in keys.iter().rev() {
            if let Some(params) = self.parameters.get(key) {
                merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        merged
    }

    pub fn indent_size(&self) -> Option<usize> {
        self.indent_size
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.parameters.is_empty() && self.indent_size.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use pretty_assertions::assert_eq;

    const DESCRIPTOR: RuleDescriptor = RuleDescriptor {
        id: "MD013",
        name: "line-length",
        aliases: &["max-line"],
        description: "",
        default_severity: Severity::Warning,
        default_enabled: false,
        documentation: "",
    };

    fn raw(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rule_value_precedence() {
        let settings = FileSettings::from_raw(&raw(&[
            ("md_max_line", "alias"),
            ("md_line-length", "name"),
        ]));
        assert_eq!(settings.rule_value(&DESCRIPTOR), Some("name"));

        let settings = FileSettings::from_raw(&raw(&[
            ("md_md013", "id"),
            ("md_line_length", "name"),
        ]));
        assert_eq!(settings.rule_value(&DESCRIPTOR), Some("id"));
    }

    #[test]
    fn test_unprefixed_keys_are_not_rules() {
        let settings = FileSettings::from_raw(&raw(&[("line_length", "false")]));
        assert_eq!(settings.rule_value(&DESCRIPTOR), None);
    }

    #[test]
    fn test_parameters_merge() {
        let settings = FileSettings::from_raw(&raw(&[
            ("md_line-length.line_length", "120"),
            ("md_max_line.line_length", "90"),
            ("md_max_line.code_blocks", "false"),
        ]));
        let params = settings.parameters(&DESCRIPTOR);
        assert_eq!(params.get("line_length").map(String::as_str), Some("120"));
        assert_eq!(params.get("code_blocks").map(String::as_str), Some("false"));
    }

    #[test]
    fn test_indent_size() {
        let settings = FileSettings::from_raw(&raw(&[("indent_size", "2")]));
        assert_eq!(settings.indent_size(), Some(2));

        let settings = FileSettings::from_raw(&raw(&[("indent_size", "tab"), ("tab_width", "8")]));
        assert_eq!(settings.indent_size(), Some(8));

        let settings = FileSettings::from_raw(&raw(&[("indent_size", "0")]));
        assert_eq!(settings.indent_size(), None);
    }

    #[test]
    fn test_static_settings() {
        let source: StaticSettings = [("MD_MD001", "false")].into_iter().collect();
        let map = source.load(Path::new("any.md")).unwrap();
        assert_eq!(map.get("md_md001").map(String::as_str), Some("false"));
        assert!(FileSettings::from_raw(&HashMap::new()).is_empty());
    }
}
