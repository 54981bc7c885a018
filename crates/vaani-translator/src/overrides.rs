use serde::{Deserialize, Serialize};
use vaani_types::{Language, LanguagePair};

/// Replaces backend output when the input starts with a known phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub pair: LanguagePair,
    /// Compared case-insensitively against the start of the input
    pub prefix: String,
    pub replacement: String,
}

impl OverrideRule {
    pub fn new(pair: LanguagePair, prefix: &str, replacement: &str) -> Self {
        Self {
            pair,
            prefix: prefix.to_lowercase(),
            replacement: replacement.to_string(),
        }
    }

    /// Checks the original input, not the backend output
    pub fn matches(&self, pair: LanguagePair, input: &str) -> bool {
        self.pair == pair
            && input
                .trim_start()
                .to_lowercase()
                .starts_with(&self.prefix.to_lowercase())
    }
}

/// Ordered rule list. The first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRules {
    rules: Vec<OverrideRule>,
}

impl OverrideRules {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Greetings the en -> hi model renders too literally
    pub fn builtin() -> Self {
        let en_hi = LanguagePair::new(Language::En, Language::Hi);
        Self {
            rules: vec![
                OverrideRule::new(en_hi, "good morning", "सुप्रभात"),
                OverrideRule::new(en_hi, "good night", "शुभ रात्रि"),
            ],
        }
    }

    pub fn push(&mut self, rule: OverrideRule) {
        self.rules.push(rule);
    }

    pub fn with(mut self, rule: OverrideRule) -> Self {
        self.push(rule);
        self
    }

    pub fn find(&self, pair: LanguagePair, input: &str) -> Option<&OverrideRule> {
        self.rules.iter().find(|rule| rule.matches(pair, input))
    }

    /// Replacement text for `input`, if any rule applies
    pub fn apply(&self, pair: LanguagePair, input: &str) -> Option<&str> {
        self.find(pair, input).map(|rule| rule.replacement.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverrideRule> {
        self.rules.iter()
    }
}

impl Extend<OverrideRule> for OverrideRules {
    fn extend<I: IntoIterator<Item = OverrideRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}
