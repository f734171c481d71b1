//! Pattern library for PII detection

use crate::detection::checksum::Validator;
use crate::detection::config::{DetectionConfig, RuleOverrides};
use crate::detection::detector::context::ContextRule;
use crate::detection::models::PiiCategory;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// How an entry finds candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    #[default]
    Regex,
    LineKeywords,
    Entropy,
}

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Unique rule name
    pub name: String,
    /// PII category label
    pub category: String,
    #[serde(default)]
    pub kind: MatcherKind,
    /// Regex (`regex` and `entropy` kinds)
    #[serde(default)]
    pub regex: Option<String>,
    /// Capture group to emit instead of the whole match
    #[serde(default)]
    pub group: Option<usize>,
    #[serde(default)]
    pub validator: Option<Validator>,
    /// Context keywords; empty means no context rule
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub context_window: Option<usize>,
    #[serde(default)]
    pub accept_prefix: Option<String>,
    #[serde(default)]
    pub isolated: bool,
    /// Trigger keywords (`line_keywords` kind); `stem*` matches as a prefix
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Whole-word pattern for a keyword, or a prefix pattern for a `stem*`
fn keyword_pattern(keyword: &str) -> String {
    let keyword = keyword.trim().to_lowercase();
    match keyword.strip_suffix('*') {
        Some(stem) => regex::escape(stem),
        None => format!(r"{}\b", regex::escape(&keyword)),
    }
}

/// Compiled candidate finder
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Whole match, or capture `group`
    Regex { regex: Regex, group: usize },
    /// Trimmed line containing a trigger keyword
    LineKeywords(Regex),
    /// Token run whose entropy exceeds `threshold`
    Entropy {
        token: Regex,
        min_length: usize,
        threshold: f64,
    },
}

/// Compiled catalog entry
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub category: PiiCategory,
    pub matcher: Matcher,
    pub validator: Option<Validator>,
    pub context: Option<ContextRule>,
    pub accept_prefix: Option<String>,
    pub isolated: bool,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: Vec<PatternDefinition>,
}

const DEFAULT_CONTEXT_WINDOW: usize = 40;
const DEFAULT_ENTROPY_THRESHOLD: f64 = 4.0;
const DEFAULT_ENTROPY_MIN_LENGTH: usize = 20;

/// Immutable, ordered set of compiled rules
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    rules: Vec<CompiledRule>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with(path, &RuleOverrides::default())
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::from_toml_with(content, &RuleOverrides::default())
    }

    /// Create a default pattern registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        Self::from_toml(DEFAULT_LIBRARY)
    }

    /// Builds the registry described by a detection configuration
    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        let overrides = config.rule_overrides()?;
        match config.pattern_library {
            Some(ref path) => Self::from_file_with(path, &overrides),
            None => Self::from_toml_with(DEFAULT_LIBRARY, &overrides),
        }
    }

    pub fn from_file_with<P: AsRef<Path>>(path: P, overrides: &RuleOverrides) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml_with(&content, overrides)
    }

    pub fn from_toml_with(content: &str, overrides: &RuleOverrides) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut names = BTreeSet::new();
        let mut rules = Vec::with_capacity(library.patterns.len());

        for def in library.patterns {
            if !names.insert(def.name.clone()) {
                anyhow::bail!("Duplicate pattern name '{}'", def.name);
            }

            let category: PiiCategory = def
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .with_context(|| {
                    format!("Invalid category in pattern '{}': {}", def.name, def.category)
                })?;

            if overrides.disabled.contains(&category) {
                tracing::debug!(pattern = %def.name, category = %category, "Pattern disabled");
                continue;
            }

            rules.push(Self::compile(def, category, overrides)?);
        }

        Ok(Self { rules })
    }

    fn compile(
        def: PatternDefinition,
        category: PiiCategory,
        overrides: &RuleOverrides,
    ) -> Result<CompiledRule> {
        let name = def.name;

        let matcher = match def.kind {
            MatcherKind::Regex => {
                let pattern = def
                    .regex
                    .as_deref()
                    .with_context(|| format!("Pattern '{name}' has no regex"))?;
                let regex = Regex::new(pattern)
                    .with_context(|| format!("Invalid regex in pattern '{name}': {pattern}"))?;
                let group = def.group.unwrap_or(0);
                if group >= regex.captures_len() {
                    anyhow::bail!("Pattern '{name}' has no capture group {group}");
                }
                Matcher::Regex { regex, group }
            }
            MatcherKind::LineKeywords => {
                if def.keywords.is_empty() {
                    anyhow::bail!("Pattern '{name}' has no keywords");
                }
                let alternation = def
                    .keywords
                    .iter()
                    .map(|k| keyword_pattern(k))
                    .collect::<Vec<_>>()
                    .join("|");
                let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})"))
                    .with_context(|| format!("Invalid keywords in pattern '{name}'"))?;
                Matcher::LineKeywords(regex)
            }
            MatcherKind::Entropy => {
                let pattern = def.regex.as_deref().unwrap_or(r"[A-Za-z0-9+/=_\-]{20,}");
                let token = Regex::new(pattern)
                    .with_context(|| format!("Invalid regex in pattern '{name}': {pattern}"))?;
                Matcher::Entropy {
                    token,
                    min_length: overrides
                        .entropy_min_length
                        .or(def.min_length)
                        .unwrap_or(DEFAULT_ENTROPY_MIN_LENGTH),
                    threshold: overrides
                        .entropy_threshold
                        .or(def.threshold)
                        .unwrap_or(DEFAULT_ENTROPY_THRESHOLD),
                }
            }
        };

        let context = if def.context.is_empty() {
            None
        } else {
            let window = overrides
                .context_windows
                .get(&category)
                .copied()
                .or(def.context_window)
                .unwrap_or(DEFAULT_CONTEXT_WINDOW);
            let rule = ContextRule::new(&def.context, window)
                .with_context(|| format!("Invalid context keywords in pattern '{name}'"))?;
            Some(rule)
        };

        Ok(CompiledRule {
            name,
            category,
            matcher,
            validator: def.validator,
            context,
            accept_prefix: def.accept_prefix.filter(|p| !p.is_empty()),
            isolated: def.isolated,
        })
    }

    /// Get all rules, in catalog order
    pub fn all_rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Get rules for a specific category
    pub fn rules_for_category(&self, category: PiiCategory) -> Vec<&CompiledRule> {
        self.rules.iter().filter(|r| r.category == category).collect()
    }

    /// Looks up a rule by name
    pub fn rule(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Categories with at least one compiled rule
    pub fn categories(&self) -> BTreeSet<PiiCategory> {
        self.rules.iter().map(|r| r.category).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

const DEFAULT_LIBRARY: &str = include_str!("../../../../patterns/pii_patterns.toml");

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_of(rule: &CompiledRule) -> &Regex {
        match &rule.matcher {
            Matcher::Regex { regex, .. } => regex,
            Matcher::LineKeywords(regex) => regex,
            Matcher::Entropy { token, .. } => token,
        }
    }

    #[test]
    fn test_load_default_patterns() {
        let registry = PatternRegistry::default_patterns().unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.categories().len(), PiiCategory::ALL.len());
    }

    #[test]
    fn test_email_pattern() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let rules = registry.rules_for_category(PiiCategory::Email);
        assert_eq!(rules.len(), 1);

        let regex = regex_of(rules[0]);
        assert!(regex.is_match("test@example.com"));
        assert!(!regex.is_match("not-an-email"));
    }

    #[test]
    fn test_checksum_categories_have_no_context() {
        let registry = PatternRegistry::default_patterns().unwrap();
        for rule in registry.all_rules() {
            if rule.category.is_checksum_gated() {
                assert!(rule.context.is_none(), "{} has a context rule", rule.name);
                assert!(rule.validator.is_some(), "{} has no validator", rule.name);
            }
        }
    }

    #[test]
    fn test_line_keywords_match_whole_words_or_stems() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let health = match &registry.rule("health_condition").unwrap().matcher {
            Matcher::LineKeywords(regex) => regex.clone(),
            other => panic!("unexpected matcher {other:?}"),
        };
        assert!(health.is_match("Tested HIV positive"));
        assert!(!health.is_match("The hive was moved"));
        assert!(!health.is_match("hivemind notes"));
        assert!(health.is_match("Diagnosed in 2019"));
        assert!(health.is_match("Severe allergies"));
    }

    #[test]
    fn test_default_windows() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let window = |name: &str| {
            registry
                .rule(name)
                .and_then(|r| r.context.as_ref())
                .map(|c| c.window())
        };
        assert_eq!(window("phone_number"), Some(20));
        assert_eq!(window("card_cvv"), Some(20));
        assert_eq!(window("one_time_password"), Some(30));
        assert_eq!(window("aba_routing"), Some(40));
        assert_eq!(window("bank_account"), Some(60));
        assert_eq!(window("labelled_digits"), Some(80));
    }

    #[test]
    fn test_overrides_change_windows_and_disable_categories() {
        let mut overrides = RuleOverrides::default();
        overrides.context_windows.insert(PiiCategory::Account, 120);
        overrides.disabled.insert(PiiCategory::HealthInfo);

        let registry = PatternRegistry::from_toml_with(DEFAULT_LIBRARY, &overrides).unwrap();
        let account = registry.rule("bank_account").unwrap();
        assert_eq!(account.context.as_ref().map(|c| c.window()), Some(120));
        assert!(registry.rules_for_category(PiiCategory::HealthInfo).is_empty());
    }

    #[test]
    fn test_invalid_library() {
        let bad_regex = r#"
[[patterns]]
name = "broken"
category = "email"
regex = "([a-z"
"#;
        assert!(PatternRegistry::from_toml(bad_regex).is_err());

        let bad_category = r#"
[[patterns]]
name = "zodiac"
category = "star_sign"
regex = "[a-z]+"
"#;
        assert!(PatternRegistry::from_toml(bad_category).is_err());

        let duplicate = r#"
[[patterns]]
name = "dup"
category = "email"
regex = "a"

[[patterns]]
name = "dup"
category = "phone"
regex = "b"
"#;
        assert!(PatternRegistry::from_toml(duplicate).is_err());
    }

    #[test]
    fn test_missing_capture_group() {
        let toml = r#"
[[patterns]]
name = "no_group"
category = "credential"
regex = "secret=\\S+"
group = 1
"#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }
}
