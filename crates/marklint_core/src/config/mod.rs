//! Rule configuration.
//!
//! Three layers feed a [`RuleConfiguration`], first hit wins:
//!
//! 1. Per-file settings from a [`SettingsSource`] (`.editorconfig` by default),
//!    looked up by rule id, then name, then alias.
//! 2. The global enabled flag from an [`OptionsSource`] (`.marklint.json`),
//!    combined with the rule's default severity.
//! 3. The rule's compiled defaults.

mod cache;
mod editorconfig;
mod options;
mod resolver;
mod settings;
mod value;

pub use cache::{DEFAULT_SETTINGS_TTL, SettingsCache};
pub use editorconfig::{EDITORCONFIG_FILE, EditorConfigFile, EditorConfigSource};
pub use options::{CONFIG_FILES, InMemoryOptions, LinterConfig, OptionsSource};
pub use resolver::ConfigurationResolver;
pub use settings::{FileSettings, RULE_KEY_PREFIX, SettingsSource, StaticSettings};
pub use value::{RuleConfiguration, SettingValue};
