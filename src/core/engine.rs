/// The translation engine: Symbols → narrative orchestration.
///
/// Wires together rule matching, fallback synthesis, theme extraction,
/// and validation over one shared, read-only catalog.

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::catalog::{CatalogError, RuleCatalog};
use crate::core::matcher::contains_pattern;
use crate::core::synthesis::{self, EMPTY_NARRATIVE};
use crate::core::validation::validate_sequence;
use crate::schema::symbol::Symbol;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Why a preview was refused. Both are caller input problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("emoji sequence cannot be empty")]
    Empty,
    #[error("invalid emoji sequence")]
    Invalid,
}

/// Result of previewing a sequence without storing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub translation: String,
    /// Sorted for stable output.
    pub themes: Vec<String>,
    pub emoji_count: usize,
}

/// The top-level translation engine. Built via `TranslationEngine::builder()`.
///
/// Cloning is cheap and shares the catalog. All methods take `&self`;
/// randomness comes from the caller or the thread-local generator.
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    catalog: Arc<RuleCatalog>,
}

/// Builder for constructing a `TranslationEngine`.
pub struct TranslationEngineBuilder {
    builtin: bool,
    catalog_paths: Vec<String>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<RuleCatalog>,
}

impl Default for TranslationEngine {
    fn default() -> Self {
        Self::from_catalog(RuleCatalog::builtin())
    }
}

impl TranslationEngine {
    pub fn builder() -> TranslationEngineBuilder {
        TranslationEngineBuilder {
            builtin: true,
            catalog_paths: Vec::new(),
            catalog: None,
        }
    }

    pub fn from_catalog(catalog: RuleCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Translate a sequence using the thread-local random generator.
    pub fn translate(&self, sequence: &[Symbol]) -> String {
        self.translate_with(sequence, &mut rand::thread_rng())
    }

    /// Translate a sequence with a caller-supplied random source.
    ///
    /// A matching rule always yields its first template; only the
    /// fallback consumes randomness.
    pub fn translate_with<R: Rng + ?Sized>(&self, sequence: &[Symbol], rng: &mut R) -> String {
        if sequence.is_empty() {
            return EMPTY_NARRATIVE.to_string();
        }

        if let Some(text) = self.match_rules(sequence) {
            return text.to_string();
        }

        debug!(len = sequence.len(), "No rule matched; synthesizing");
        self.synthesize_narrative_with(sequence, rng)
    }

    /// First rule in catalog order whose pattern the sequence contains.
    pub fn match_rules(&self, sequence: &[Symbol]) -> Option<&str> {
        for (index, rule) in self.catalog.rules().iter().enumerate() {
            if contains_pattern(sequence, rule.pattern()) {
                debug!(rule = index, "Rule matched");
                return Some(rule.primary_template());
            }
        }
        None
    }

    pub fn synthesize_narrative(&self, sequence: &[Symbol]) -> String {
        self.synthesize_narrative_with(sequence, &mut rand::thread_rng())
    }

    pub fn synthesize_narrative_with<R: Rng + ?Sized>(
        &self,
        sequence: &[Symbol],
        rng: &mut R,
    ) -> String {
        synthesis::synthesize(sequence, &self.catalog, rng)
    }

    /// Every candidate meaning of every known symbol, deduplicated.
    pub fn story_themes(&self, sequence: &[Symbol]) -> FxHashSet<String> {
        sequence
            .iter()
            .filter_map(|symbol| self.catalog.meanings(symbol))
            .flatten()
            .cloned()
            .collect()
    }

    pub fn validate_emoji_sequence(&self, sequence: &[Symbol]) -> bool {
        validate_sequence(sequence)
    }

    /// Validate, translate and collect themes without storing anything.
    pub fn preview(&self, sequence: &[Symbol]) -> Result<Preview, PreviewError> {
        self.preview_with(sequence, &mut rand::thread_rng())
    }

    pub fn preview_with<R: Rng + ?Sized>(
        &self,
        sequence: &[Symbol],
        rng: &mut R,
    ) -> Result<Preview, PreviewError> {
        if sequence.is_empty() {
            warn!("Preview rejected: empty sequence");
            return Err(PreviewError::Empty);
        }
        if !self.validate_emoji_sequence(sequence) {
            warn!(len = sequence.len(), "Preview rejected: invalid symbols");
            return Err(PreviewError::Invalid);
        }

        let translation = self.translate_with(sequence, rng);
        let mut themes: Vec<String> = self.story_themes(sequence).into_iter().collect();
        themes.sort();

        Ok(Preview {
            translation,
            themes,
            emoji_count: sequence.len(),
        })
    }
}

impl TranslationEngineBuilder {
    /// Start from the built-in catalog (default: true).
    pub fn builtin(mut self, enabled: bool) -> Self {
        self.builtin = enabled;
        self
    }

    /// Layer a RON catalog file over the base. May be called repeatedly;
    /// later files have lower rule priority.
    pub fn catalog_path(mut self, path: &str) -> Self {
        self.catalog_paths.push(path.to_string());
        self
    }

    /// Provide a catalog directly (for testing without files). Replaces
    /// the built-in base.
    pub fn with_catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<TranslationEngine, EngineError> {
        let mut catalog = match self.catalog {
            Some(catalog) => catalog,
            None if self.builtin => RuleCatalog::builtin(),
            None => RuleCatalog::default(),
        };

        // Load every file before touching the base so a bad file leaves
        // nothing half-merged.
        let mut layers = Vec::with_capacity(self.catalog_paths.len());
        for path in &self.catalog_paths {
            layers.push(RuleCatalog::load_from_ron(Path::new(path))?);
        }
        for layer in layers {
            catalog.merge(layer);
        }

        debug!(
            rules = catalog.rule_count(),
            meanings = catalog.meaning_count(),
            "Translation engine built"
        );
        Ok(TranslationEngine::from_catalog(catalog))
    }
}
