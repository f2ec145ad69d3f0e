//! Merges settings layers into one effective configuration per check.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use super::cache::SettingsCache;
use super::editorconfig::EditorConfigSource;
use super::options::{LinterConfig, OptionsSource};
use super::settings::{FileSettings, SettingsSource};
use super::value::{RuleConfiguration, SettingValue};
use crate::catalog::RuleDescriptor;

/// Resolves [`RuleConfiguration`]s from per-file settings, global options and
/// rule defaults, in that order of precedence.
pub struct ConfigurationResolver {
    settings: Arc<dyn SettingsSource>,
    options: Arc<dyn OptionsSource>,
    cache: SettingsCache,
}

impl ConfigurationResolver {
    pub fn new(settings: Arc<dyn SettingsSource>, options: Arc<dyn OptionsSource>) -> Self {
        Self::with_cache(settings, options, SettingsCache::new())
    }

    pub fn with_cache(
        settings: Arc<dyn SettingsSource>,
        options: Arc<dyn OptionsSource>,
        cache: SettingsCache,
    ) -> Self {
        Self {
            settings,
            options,
            cache,
        }
    }

    /// Resolver reading `.editorconfig` files with default global options.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(EditorConfigSource::new()),
            Arc::new(LinterConfig::default()),
        )
    }

    /// Resolves the effective configuration of one check.
    ///
    /// Without a path only global options and defaults apply.
    pub fn resolve(&self, descriptor: &RuleDescriptor, path: Option<&Path>) -> RuleConfiguration {
        let settings = path.map(|p| self.file_settings(p));
        Self::resolve_with(descriptor, settings.as_deref(), self.options.as_ref())
    }

    /// Resolves every descriptor against a single settings lookup.
    pub fn resolve_all<'d>(
        &self,
        descriptors: impl IntoIterator<Item = &'d RuleDescriptor>,
        path: Option<&Path>,
    ) -> Vec<(&'d RuleDescriptor, RuleConfiguration)> {
        let settings = path.map(|p| self.file_settings(p));
        descriptors
            .into_iter()
            .map(|d| {
                let config = Self::resolve_with(d, settings.as_deref(), self.options.as_ref());
                (d, config)
            })
            .collect()
    }

    fn resolve_with(
        descriptor: &RuleDescriptor,
        settings: Option<&FileSettings>,
        options: &dyn OptionsSource,
    ) -> RuleConfiguration {
        let mut config = RuleConfiguration::from_descriptor(descriptor);

        match settings.and_then(|s| s.rule_value(descriptor)) {
            Some(raw) => {
                // An explicit per-file entry turns the rule on unless it says otherwise.
                config.enabled = true;
                SettingValue::parse(raw).apply_to(&mut config);
            }
            None => {
                if let Some(enabled) = options.rule_enabled(descriptor) {
                    config.enabled = enabled;
                }
            }
        }

        if let Some(settings) = settings {
            config.parameters = settings.parameters(descriptor);
            config.indent_size = settings.indent_size();
        }

        config
    }

    /// Returns the indexed per-file settings, loading them through the cache.
    ///
    /// A failing source is logged and yields empty settings.
    pub fn file_settings(&self, path: &Path) -> Arc<FileSettings> {
        self.cache.get_or_load(path, || match self.settings.load(path) {
            Ok(raw) => FileSettings::from_raw(&raw),
            Err(e) => {
                warn!("Ignoring settings for {}: {}", path.display(), e);
                FileSettings::default()
            }
        })
    }

    /// Clears all cached per-file settings.
    pub fn invalidate(&self) {
        debug!("Settings invalidated");
        self.cache.invalidate();
    }

    /// Reacts to a changed file: a settings file clears the whole cache.
    ///
    /// Returns true if the cache was cleared.
    pub fn on_file_changed(&self, path: &Path) -> bool {
        if EditorConfigSource::is_settings_file(path) {
            self.invalidate();
            true
        } else {
            false
        }
    }

    pub fn cache(&self) -> &SettingsCache {
        &self.cache
    }
}

impl Default for ConfigurationResolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}
