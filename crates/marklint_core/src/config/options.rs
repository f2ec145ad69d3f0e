//! Global options: the `.marklint.json` configuration file.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::catalog::{RuleDescriptor, normalize_rule_key};
use crate::error::LinterError;

/// Configuration file names searched for, in order.
pub const CONFIG_FILES: &[&str] = &[".marklint.json", "marklint.json"];

/// A global, file-independent source of rule enable flags.
pub trait OptionsSource: Send + Sync {
    /// Returns the global enabled flag for a rule, or `None` if unset.
    fn rule_enabled(&self, descriptor: &RuleDescriptor) -> Option<bool>;
}

/// Global linter configuration.
///
/// ```json
/// { "default": true, "rules": { "MD013": false, "heading-increment": true } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Enabled flag for rules not listed in `rules`. `true` defers to each
    /// rule's own default.
    #[serde(default = "default_true")]
    pub default: bool,

    /// Per-rule enabled flags keyed by normalized id, name or alias.
    ///
    /// Keys that normalize to the same text keep the flag written last.
    #[serde(default, deserialize_with = "normalized_rules")]
    rules: HashMap<String, bool>,

    /// File this configuration was loaded from.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn normalized_rules<'de, D>(deserializer: D) -> Result<HashMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RulesVisitor;

    impl<'de> Visitor<'de> for RulesVisitor {
        type Value = HashMap<String, bool>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of rule keys to booleans")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut rules = HashMap::new();
            while let Some((key, enabled)) = access.next_entry::<String, bool>()? {
                rules.insert(normalize_rule_key(&key), enabled);
            }
            Ok(rules)
        }
    }

    deserializer.deserialize_map(RulesVisitor)
}

impl LinterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global enabled flag for a rule id, name or alias.
    pub fn set_rule(&mut self, key: &str, enabled: bool) {
        self.rules.insert(normalize_rule_key(key), enabled);
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        serde_json::from_str(json).map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Finds the configuration file for `start`.
    ///
    /// Searches `start` and its ancestors, then the user config directory.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let local = start.ancestors().find_map(|dir| {
            CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        });

        local.or_else(|| {
            let global = dirs::config_dir()?.join("marklint").join("config.json");
            global.is_file().then_some(global)
        })
    }

    /// Loads the discovered configuration, or the default when none exists.
    pub fn load_default(start: &Path) -> Result<Self, LinterError> {
        match Self::discover(start) {
            Some(path) => {
                debug!("Using configuration {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            default: true,
            rules: HashMap::new(),
            source: None,
        }
    }
}

impl OptionsSource for LinterConfig {
    fn rule_enabled(&self, descriptor: &RuleDescriptor) -> Option<bool> {
        let listed = descriptor
            .normalized_keys()
            .find_map(|key| self.rules.get(&key).copied());

        listed.or((!self.default).then_some(false))
    }
}

/// Options held in memory, for hosts that manage settings themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOptions {
    flags: HashMap<String, bool>,
}

impl InMemoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, enabled: bool) {
        self.flags.insert(normalize_rule_key(key), enabled);
    }

    pub fn with(mut self, key: &str, enabled: bool) -> Self {
        self.set(key, enabled);
        self
    }
}

impl OptionsSource for InMemoryOptions {
    fn rule_enabled(&self, descriptor: &RuleDescriptor) -> Option<bool> {
        descriptor
            .normalized_keys()
            .find_map(|key| self.flags.get(&key).copied())
    }
}
