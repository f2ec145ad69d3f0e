//! Resolved rule configuration and the settings value grammar.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::catalog::RuleDescriptor;
use crate::diagnostic::Severity;

/// Effective configuration of one check for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfiguration {
    pub enabled: bool,
    pub severity: Severity,
    /// Residual value left after the grammar consumed booleans and severities.
    pub value: Option<String>,
    /// Named parameters, keyed by lower-case parameter name.
    pub parameters: BTreeMap<String, String>,
    /// Indent size inherited from the surrounding settings, if any.
    pub indent_size: Option<usize>,
}

impl RuleConfiguration {
    /// Configuration consisting solely of the descriptor's compiled defaults.
    pub fn from_descriptor(descriptor: &RuleDescriptor) -> Self {
        Self {
            enabled: descriptor.default_enabled,
            severity: descriptor.default_severity,
            value: None,
            parameters: BTreeMap::new(),
            indent_size: None,
        }
    }

    /// Returns true if the check should run at all.
    pub fn is_active(&self) -> bool {
        self.enabled && self.severity != Severity::None
    }

    /// Returns a named parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns a named parameter parsed as `T`; unparsable values count as absent.
    pub fn parameter_as<T: FromStr>(&self, name: &str) -> Option<T> {
        self.parameter(name).and_then(|v| v.trim().parse().ok())
    }

    /// Returns a boolean parameter, accepting `true|on|yes` and `false|off|no`.
    pub fn parameter_flag(&self, name: &str) -> Option<bool> {
        match self.parameter(name)?.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" => Some(true),
            "false" | "off" | "no" => Some(false),
            _ => None,
        }
    }
}

/// A settings value decomposed by the value grammar.
///
/// Each field is `None` when the value did not mention it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingValue {
    pub enabled: Option<bool>,
    pub severity: Option<Severity>,
    pub value: Option<String>,
}

impl SettingValue {
    /// Parses a raw settings string.
    ///
    /// - `false`, `off`, `none` disable the check.
    /// - `true`, `on` enable it without touching severity.
    /// - A severity keyword sets the severity only.
    /// - `value:severity` splits at the last colon when the suffix is a
    ///   severity keyword.
    /// - Anything else is kept verbatim as the residual value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        if let Some(parsed) = Self::parse_simple(raw) {
            return parsed;
        }

        if let Some((head, tail)) = raw.rsplit_once(':')
            && let Some(severity) = Severity::parse_keyword(tail)
        {
            let head = head.trim();
            let mut parsed = match parse_bool(head) {
                Some(enabled) => Self {
                    enabled: Some(enabled),
                    ..Self::default()
                },
                None if head.is_empty() => Self::default(),
                None => Self {
                    value: Some(head.to_string()),
                    ..Self::default()
                },
            };
            parsed.severity = Some(severity);
            return parsed;
        }

        Self {
            value: Some(raw.to_string()),
            ..Self::default()
        }
    }

    fn parse_simple(raw: &str) -> Option<Self> {
        if let Some(enabled) = parse_bool(raw) {
            return Some(Self {
                enabled: Some(enabled),
                ..Self::default()
            });
        }
        Severity::parse_keyword(raw).map(|severity| Self {
            severity: Some(severity),
            ..Self::default()
        })
    }

    /// Applies the mentioned parts onto a configuration.
    pub fn apply_to(&self, config: &mut RuleConfiguration) {
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(severity) = self.severity {
            config.severity = severity;
        }
        if let Some(value) = &self.value {
            config.value = Some(value.clone());
        }
    }
}

fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "false" | "off" | "none" => Some(false),
        "true" | "on" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn setting(
        enabled: Option<bool>,
        severity: Option<Severity>,
        value: Option<&str>,
    ) -> SettingValue {
        SettingValue {
            enabled,
            severity,
            value: value.map(str::to_string),
        }
    }

    #[rstest]
    #[case("", setting(None, None, None))]
    #[case("false", setting(Some(false), None, None))]
    #[case("OFF", setting(Some(false), None, None))]
    #[case("none", setting(Some(false), None, None))]
    #[case("true", setting(Some(true), None, None))]
    #[case("on", setting(Some(true), None, None))]
    #[case("warning", setting(None, Some(Severity::Warning), None))]
    #[case("info", setting(None, Some(Severity::Suggestion), None))]
    #[case("refactoring", setting(None, Some(Severity::Silent), None))]
    #[case("atx:error", setting(None, Some(Severity::Error), Some("atx")))]
    #[case("true:error", setting(Some(true), Some(Severity::Error), None))]
    #[case("a:b:hint", setting(None, Some(Severity::Suggestion), Some("a:b")))]
    #[case("atx:bogus", setting(None, None, Some("atx:bogus")))]
    #[case("setext_with_atx", setting(None, None, Some("setext_with_atx")))]
    #[case("  atx_closed  ", setting(None, None, Some("atx_closed")))]
    fn test_parse_value_grammar(#[case] raw: &str, #[case] expected: SettingValue) {
        assert_eq!(SettingValue::parse(raw), expected);
    }

    fn descriptor() -> RuleDescriptor {
        RuleDescriptor {
            id: "MD003",
            name: "heading-style",
            aliases: &["header-style"],
            description: "Heading style",
            default_severity: Severity::Warning,
            default_enabled: true,
            documentation: "",
        }
    }

    #[test]
    fn test_apply_keeps_unmentioned_fields() {
        let mut config = RuleConfiguration::from_descriptor(&descriptor());
        config.value = Some("consistent".to_string());

        SettingValue::parse("error").apply_to(&mut config);
        assert_eq!(config.severity, Severity::Error);
        assert_eq!(config.value.as_deref(), Some("consistent"));
        assert!(config.enabled);

        SettingValue::parse("off").apply_to(&mut config);
        assert!(!config.enabled);
        assert_eq!(config.severity, Severity::Error);
    }

    #[test]
    fn test_is_active() {
        let mut config = RuleConfiguration::from_descriptor(&descriptor());
        assert!(config.is_active());
        config.severity = Severity::None;
        assert!(!config.is_active());
        config.severity = Severity::Silent;
        assert!(config.is_active());
        config.enabled = false;
        assert!(!config.is_active());
    }

    #[test]
    fn test_parameters() {
        let mut config = RuleConfiguration::from_descriptor(&descriptor());
        config
            .parameters
            .insert("line_length".to_string(), " 100 ".to_string());
        config
            .parameters
            .insert("code_blocks".to_string(), "No".to_string());

        assert_eq!(config.parameter("LINE_LENGTH"), Some(" 100 "));
        assert_eq!(config.parameter_as::<usize>("line_length"), Some(100));
        assert_eq!(config.parameter_as::<usize>("missing"), None);
        assert_eq!(config.parameter_flag("code_blocks"), Some(false));
        assert_eq!(config.parameter_flag("line_length"), None);
    }
}
