use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::symbol::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("pattern contains an empty symbol")]
    EmptySymbol,
    #[error("rule has no templates")]
    EmptyTemplates,
    #[error("rule has a blank template")]
    BlankTemplate,
}

/// A pattern-to-narrative rule.
///
/// The pattern and the template list are never empty. Only the first
/// template is produced by rule matching; the rest are kept so catalogs
/// can carry alternates for tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleFields")]
pub struct TranslationRule {
    pub(crate) pattern: Vec<Symbol>,
    pub(crate) templates: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename = "TranslationRule")]
struct RuleFields {
    pattern: Vec<Symbol>,
    templates: Vec<String>,
}

impl TryFrom<RuleFields> for TranslationRule {
    type Error = RuleError;

    fn try_from(fields: RuleFields) -> Result<Self, Self::Error> {
        TranslationRule::new(fields.pattern, fields.templates)
    }
}

impl TranslationRule {
    pub fn new(pattern: Vec<Symbol>, templates: Vec<String>) -> Result<Self, RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        if pattern.iter().any(|s| s.as_str().is_empty()) {
            return Err(RuleError::EmptySymbol);
        }
        if templates.is_empty() {
            return Err(RuleError::EmptyTemplates);
        }
        if templates.iter().any(|t| t.trim().is_empty()) {
            return Err(RuleError::BlankTemplate);
        }
        Ok(Self { pattern, templates })
    }

    pub fn pattern(&self) -> &[Symbol] {
        &self.pattern
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// The template returned when this rule matches.
    pub fn primary_template(&self) -> &str {
        &self.templates[0]
    }
}
