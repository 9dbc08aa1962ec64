//! Regex-based text rewriting applied to descriptions and notes.

use regex::Regex;

use crate::error::{MigrationError, Result};

/// A pattern and its substitution template.
///
/// The template may reference capture groups with `$1`, `${name}` and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRewriteRule {
    pub pattern: String,
    pub replacement: String,
}

impl TextRewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Compiled rules, applied in the order they were declared.
#[derive(Debug, Clone, Default)]
pub struct RewriteRules {
    rules: Vec<(Regex, String)>,
}

impl RewriteRules {
    /// Compile every rule, failing on the first invalid pattern.
    pub fn compile(rules: &[TextRewriteRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|re| (re, rule.replacement.clone()))
                    .map_err(|source| MigrationError::BadRewritePattern {
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to `text`, each one to the output of the previous.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (re, replacement) in &self.rules {
            out = re.replace_all(&out, replacement.as_str()).into_owned();
        }
        out
    }
}
