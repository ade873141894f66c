//! WASM bindings for emoji-story: powers the story page's live preview.

use wasm_bindgen::prelude::*;

use emoji_story::core::engine::TranslationEngine;
use emoji_story::schema::symbol::split_symbols;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct PreviewOutcome {
    ok: bool,
    translation: Option<String>,
    themes: Vec<String>,
    emoji_count: usize,
    error: Option<String>,
}

#[derive(serde::Serialize)]
struct ExampleSequence {
    emojis: &'static str,
    hint: &'static str,
}

const EXAMPLES: &[ExampleSequence] = &[
    ExampleSequence {
        emojis: "🐱 🐟",
        hint: "rule match",
    },
    ExampleSequence {
        emojis: "🐟 🐱",
        hint: "same symbols, any order",
    },
    ExampleSequence {
        emojis: "😀",
        hint: "one symbol",
    },
    ExampleSequence {
        emojis: "🏠 🎵 📚",
        hint: "three symbols",
    },
    ExampleSequence {
        emojis: "🌳 🌸 🦋 🌙",
        hint: "longer story",
    },
];

// ---------------------------------------------------------------------------
// StoryTranslator, the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct StoryTranslator {
    engine: TranslationEngine,
}

#[wasm_bindgen]
impl StoryTranslator {
    /// Create a translator backed by the built-in catalog.
    #[wasm_bindgen(constructor)]
    pub fn new() -> StoryTranslator {
        StoryTranslator {
            engine: TranslationEngine::default(),
        }
    }

    /// Translate space-separated emoji text.
    pub fn translate(&self, text: &str) -> String {
        self.engine.translate(&split_symbols(text))
    }

    /// Preview without saving. Always returns JSON; failures set `ok: false`
    /// and carry a message for the page to show.
    pub fn preview(&self, text: &str) -> Result<String, JsError> {
        let sequence = split_symbols(text);
        let outcome = match self.engine.preview(&sequence) {
            Ok(preview) => PreviewOutcome {
                ok: true,
                translation: Some(preview.translation),
                themes: preview.themes,
                emoji_count: preview.emoji_count,
                error: None,
            },
            Err(e) => PreviewOutcome {
                ok: false,
                translation: None,
                themes: Vec::new(),
                emoji_count: sequence.len(),
                error: Some(e.to_string()),
            },
        };
        serde_json::to_string(&outcome)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a sorted JSON array of theme words.
    pub fn themes(&self, text: &str) -> Result<String, JsError> {
        let mut themes: Vec<String> = self
            .engine
            .story_themes(&split_symbols(text))
            .into_iter()
            .collect();
        themes.sort();
        serde_json::to_string(&themes)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Whether every symbol is an emoji. Empty text is not valid here.
    pub fn validate(&self, text: &str) -> bool {
        let sequence = split_symbols(text);
        !sequence.is_empty() && self.engine.validate_emoji_sequence(&sequence)
    }

    /// Return a JSON array of sample sequences for the page's quick picks.
    pub fn example_sequences() -> String {
        serde_json::to_string(EXAMPLES).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for StoryTranslator {
    fn default() -> Self {
        Self::new()
    }
}
