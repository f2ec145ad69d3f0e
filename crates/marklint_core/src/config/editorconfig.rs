//! `.editorconfig` backed settings source.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use super::settings::SettingsSource;
use crate::error::LinterError;

pub const EDITORCONFIG_FILE: &str = ".editorconfig";

/// Reads settings from `.editorconfig` files above the linted file.
///
/// Files are collected from the file's directory upwards until one declares
/// `root = true`. Nearer files override farther ones and later sections
/// override earlier ones within a file.
#[derive(Debug, Clone, Default)]
pub struct EditorConfigSource;

impl EditorConfigSource {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if a change to `path` should invalidate cached settings.
    pub fn is_settings_file(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name == EDITORCONFIG_FILE)
    }

    fn collect_files(path: &Path) -> Result<Vec<(PathBuf, EditorConfigFile)>, LinterError> {
        let mut files = Vec::new();
        let Some(start) = path.parent() else {
            return Ok(files);
        };

        for dir in start.ancestors() {
            let candidate = dir.join(EDITORCONFIG_FILE);
            if !candidate.is_file() {
                continue;
            }
            let content = fs::read_to_string(&candidate)?;
            let parsed = EditorConfigFile::parse(&content).map_err(|e| {
                LinterError::settings(format!("{}: {}", candidate.display(), e))
            })?;
            debug!("Loaded settings from {}", candidate.display());
            let is_root = parsed.root;
            files.push((dir.to_path_buf(), parsed));
            if is_root {
                break;
            }
        }

        Ok(files)
    }
}

impl SettingsSource for EditorConfigSource {
    fn load(&self, path: &Path) -> Result<HashMap<String, String>, LinterError> {
        let path = std::path::absolute(path)?;
        let mut merged = HashMap::new();
        for (dir, file) in Self::collect_files(&path)?.into_iter().rev() {
            let relative = path.strip_prefix(&dir).unwrap_or(&path);
            file.apply(relative, &mut merged);
        }
        Ok(merged)
    }
}

/// A parsed `.editorconfig` file.
#[derive(Debug, Default)]
pub struct EditorConfigFile {
    /// Whether the file stops the upward search.
    pub root: bool,
    sections: Vec<Section>,
}

#[derive(Debug)]
struct Section {
    matcher: GlobMatcher,
    properties: Vec<(String, String)>,
}

impl EditorConfigFile {
    /// Parses file content. Only an invalid section glob is an error.
    pub fn parse(content: &str) -> Result<Self, LinterError> {
        let mut file = Self::default();
        let mut in_preamble = true;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(pattern) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                in_preamble = false;
                file.sections.push(Section {
                    matcher: section_matcher(pattern)?,
                    properties: Vec::new(),
                });
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().to_string();

            if in_preamble {
                if key == "root" {
                    file.root = value.eq_ignore_ascii_case("true");
                }
            } else if let Some(section) = file.sections.last_mut() {
                section.properties.push((key, value));
            }
        }

        Ok(file)
    }

    /// Applies every section matching `relative` onto `into`.
    pub fn apply(&self, relative: &Path, into: &mut HashMap<String, String>) {
        for section in &self.sections {
            if section.matcher.is_match(relative) {
                into.extend(section.properties.iter().cloned());
            }
        }
    }
}

/// Builds a matcher for a section header, relative to the file's directory.
///
/// A pattern without `/` matches the file name at any depth; one with a `/`
/// is anchored at the directory holding the `.editorconfig`.
fn section_matcher(pattern: &str) -> Result<GlobMatcher, LinterError> {
    let glob = if let Some(anchored) = pattern.strip_prefix('/') {
        anchored.to_string()
    } else if pattern.contains('/') {
        pattern.to_string()
    } else {
        format!("**/{}", pattern)
    };

    GlobBuilder::new(&glob)
        .literal_separator(true)
        .build()
        .map(|g| g.compile_matcher())
        .map_err(|e| LinterError::settings(format!("Invalid section glob '{}': {}", pattern, e)))
}
