//! Time-bounded cache of per-file settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use super::settings::FileSettings;

/// How long loaded settings stay valid.
pub const DEFAULT_SETTINGS_TTL: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct CacheEntry {
    settings: Arc<FileSettings>,
    loaded_at: Instant,
}

/// Concurrent cache of indexed settings keyed by file path.
///
/// Loading happens outside the lock, so two threads racing on an expired
/// entry may both load; the later insert wins.
#[derive(Debug)]
pub struct SettingsCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
    ttl: Duration,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SETTINGS_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns cached settings for `path`, loading them if absent or expired.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Arc<FileSettings>
    where
        F: FnOnce() -> FileSettings,
    {
        if let Some(entry) = self.entries.read().get(path)
            && entry.loaded_at.elapsed() < self.ttl
        {
            debug!("Settings cache hit: {}", path.display());
            return Arc::clone(&entry.settings);
        }

        debug!("Settings cache miss: {}", path.display());
        let settings = Arc::new(load());
        self.entries.write().insert(
            path.to_path_buf(),
            CacheEntry {
                settings: Arc::clone(&settings),
                loaded_at: Instant::now(),
            },
        );
        settings
    }

    /// Drops every cached entry.
    pub fn invalidate(&self) {
        let mut entries = self.entries.write();
        debug!("Invalidating {} cached settings entries", entries.len());
        entries.clear();
    }

    /// Drops the entry for one file.
    pub fn invalidate_path(&self, path: &Path) {
        self.entries.write().remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new()
    }
}
