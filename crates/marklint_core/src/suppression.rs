//! Inline suppression directives.
//!
//! Directives are HTML comments of the form
//! `<!-- markdownlint-<directive> [RULE...] -->`:
//!
//! - `disable` / `enable`: toggle rules from this line on
//! - `disable-line` / `disable-next-line`: silence a single line
//! - `capture` / `restore`: save and restore the current state
//! - `disable-file` / `configure-file`: silence rules for the whole file
//!
//! File-level directives are resolved first over the whole document, so they
//! apply to lines before the comment too. Everything else is applied in line
//! order.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{RuleCatalog, RuleDescriptor, normalize_rule_key};
use crate::document::{Document, LineFilter};

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!--\s*markdownlint-([a-z]+(?:-[a-z]+)*)(?:\s+(.*?))?\s*-->")
        .expect("directive pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveKind {
    Disable,
    Enable,
    DisableLine,
    DisableNextLine,
    Capture,
    Restore,
    DisableFile,
    ConfigureFile,
}

impl DirectiveKind {
    fn parse(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "disable" => Self::Disable,
            "enable" => Self::Enable,
            "disable-line" => Self::DisableLine,
            "disable-next-line" => Self::DisableNextLine,
            "capture" => Self::Capture,
            "restore" => Self::Restore,
            "disable-file" => Self::DisableFile,
            "configure-file" => Self::ConfigureFile,
            _ => return None,
        })
    }
}

#[derive(Debug)]
struct Directive {
    kind: DirectiveKind,
    /// Normalized rule keys, expanded to every key of each known rule.
    /// `None` when the directive names no rule list at all.
    rules: Option<HashSet<String>>,
}

/// Extracts the directives on one line, left to right. Unknown directives are skipped.
fn parse_directives(line: &str, catalog: &RuleCatalog) -> Vec<Directive> {
    if !line.contains("<!--") {
        return Vec::new();
    }

    DIRECTIVE
        .captures_iter(line)
        .filter_map(|caps| {
            let kind = DirectiveKind::parse(caps.get(1)?.as_str())?;
            let rules = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|list| !list.trim().is_empty())
                .map(|list| expand_rules(list, catalog));
            Some(Directive { kind, rules })
        })
        .collect()
}

/// Splits a rule list and expands each token to all keys of its rule.
///
/// Tokens that name no known rule are kept in normalized form.
fn expand_rules(list: &str, catalog: &RuleCatalog) -> HashSet<String> {
    let mut rules = HashSet::new();
    for token in list
        .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .filter(|t| !t.is_empty())
    {
        match catalog.lookup(token) {
            Some(descriptor) => rules.extend(descriptor.normalized_keys()),
            None => {
                rules.insert(normalize_rule_key(token));
            }
        }
    }
    rules
}

/// Suppression state active while walking the document.
#[derive(Debug, Clone, Default)]
struct ScopeState {
    disable_all: bool,
    disabled: HashSet<String>,
}

/// Single-line suppression collected from `disable-line` and `disable-next-line`.
#[derive(Debug, Default)]
struct LineOnly {
    all: bool,
    rules: HashSet<String>,
}

impl LineOnly {
    fn add(&mut self, rules: Option<&HashSet<String>>) {
        match rules {
            Some(rules) => self.rules.extend(rules.iter().cloned()),
            None => self.all = true,
        }
    }
}

/// Which rules are silenced on which lines of one document.
#[derive(Debug, Clone, Default)]
pub struct SuppressionMap {
    line_count: usize,
    file_all: bool,
    file_rules: HashSet<String>,
    all_lines: HashSet<usize>,
    rule_lines: HashMap<usize, HashSet<String>>,
}

impl SuppressionMap {
    /// Builds the map for a document.
    pub fn from_document(document: &Document, catalog: &RuleCatalog) -> Self {
        Self::parse(document.lines(LineFilter::ALL).map(|(_, text)| text), catalog)
    }

    /// Builds the map from line texts, in order.
    pub fn parse<'a, I>(lines: I, catalog: &RuleCatalog) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parsed: Vec<Vec<Directive>> = lines
            .into_iter()
            .map(|line| parse_directives(line, catalog))
            .collect();

        let mut map = Self {
            line_count: parsed.len(),
            ..Self::default()
        };

        for directive in parsed.iter().flatten() {
            match (directive.kind, &directive.rules) {
                (DirectiveKind::DisableFile, None) => {
                    map.file_all = true;
                    return map;
                }
                (DirectiveKind::DisableFile | DirectiveKind::ConfigureFile, Some(rules)) => {
                    map.file_rules.extend(rules.iter().cloned());
                }
                _ => {}
            }
        }

        map.apply_scoped(&parsed);
        map
    }

    fn apply_scoped(&mut self, parsed: &[Vec<Directive>]) {
        let mut state = ScopeState::default();
        let mut stack: Vec<ScopeState> = Vec::new();
        let mut pending: Option<LineOnly> = None;

        for (line, directives) in parsed.iter().enumerate() {
            let mut only_here = pending.take().unwrap_or_default();
            let mut next = LineOnly::default();
            let mut has_next = false;

            for directive in directives {
                let rules = directive.rules.as_ref();
                match (directive.kind, rules) {
                    (DirectiveKind::Disable, None) => state.disable_all = true,
                    (DirectiveKind::Disable, Some(rules)) => {
                        state.disabled.extend(rules.iter().cloned());
                    }
                    (DirectiveKind::Enable, None) => state = ScopeState::default(),
                    (DirectiveKind::Enable, Some(rules)) => {
                        state.disabled.retain(|r| !rules.contains(r));
                    }
                    (DirectiveKind::DisableLine, _) => only_here.add(rules),
                    (DirectiveKind::DisableNextLine, _) => {
                        next.add(rules);
                        has_next = true;
                    }
                    (DirectiveKind::Capture, _) => stack.push(state.clone()),
                    (DirectiveKind::Restore, _) => state = stack.pop().unwrap_or_default(),
                    (DirectiveKind::DisableFile | DirectiveKind::ConfigureFile, _) => {}
                }
            }

            if has_next && line + 1 < parsed.len() {
                pending = Some(next);
            }

            if state.disable_all || only_here.all {
                self.all_lines.insert(line);
                continue;
            }

            let silenced: HashSet<String> = state
                .disabled
                .iter()
                .chain(only_here.rules.iter())
                .cloned()
                .collect();
            if !silenced.is_empty() {
                self.rule_lines.insert(line, silenced);
            }
        }
    }

    /// Returns true if `rule` (id, name or alias) is silenced on `line`.
    pub fn is_suppressed(&self, line: usize, rule: &str) -> bool {
        if line >= self.line_count {
            return false;
        }
        if self.file_all || self.all_lines.contains(&line) {
            return true;
        }
        let key = normalize_rule_key(rule);
        self.file_rules.contains(&key)
            || self
                .rule_lines
                .get(&line)
                .is_some_and(|rules| rules.contains(&key))
    }

    /// Returns true if the rule is silenced on `line` under any of its keys.
    pub fn is_rule_suppressed(&self, line: usize, descriptor: &RuleDescriptor) -> bool {
        if line >= self.line_count {
            return false;
        }
        if self.file_all || self.all_lines.contains(&line) {
            return true;
        }
        descriptor.normalized_keys().any(|key| {
            self.file_rules.contains(&key)
                || self
                    .rule_lines
                    .get(&line)
                    .is_some_and(|rules| rules.contains(&key))
        })
    }

    /// Returns true if every rule is silenced on `line`.
    pub fn all_suppressed(&self, line: usize) -> bool {
        line < self.line_count && (self.file_all || self.all_lines.contains(&line))
    }

    /// Returns true if the document contains any effective suppression.
    pub fn has_any_suppressions(&self) -> bool {
        self.file_all
            || !self.file_rules.is_empty()
            || !self.all_lines.is_empty()
            || !self.rule_lines.is_empty()
    }
}
