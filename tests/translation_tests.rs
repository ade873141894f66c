/// Translation engine integration tests: sequence in, narrative out.

use emoji_story::core::catalog::RuleCatalog;
use emoji_story::core::engine::{PreviewError, TranslationEngine};
use emoji_story::schema::symbol::Symbol;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seq(items: &[&str]) -> Vec<Symbol> {
    Symbol::sequence(items)
}

/// Meaning words for a symbol in the built-in catalog.
fn meanings_of(engine: &TranslationEngine, symbol: &str) -> Vec<String> {
    engine
        .catalog()
        .meanings(&Symbol::from(symbol))
        .unwrap()
        .to_vec()
}

#[test]
fn non_empty_sequences_always_translate_to_text() {
    let engine = TranslationEngine::default();
    let samples: &[&[&str]] = &[
        &["😀"],
        &["🦖"],
        &["🐱", "🐟"],
        &["🏠", "🎵", "📚"],
        &["🌳", "🌸", "🌙", "⭐", "🦖"],
        &["☀️", "🏖️", "🍓"],
    ];
    for sample in samples {
        let text = engine.translate(&seq(sample));
        assert!(!text.is_empty(), "empty narrative for {:?}", sample);
    }
}

#[test]
fn every_builtin_rule_matches_its_own_pattern() {
    let engine = TranslationEngine::default();
    for rule in engine.catalog().rules() {
        assert_eq!(
            engine.match_rules(rule.pattern()),
            Some(rule.primary_template()),
            "rule {:?} did not match itself",
            rule.pattern()
        );
    }
}

#[test]
fn cat_and_fish_scenarios() {
    let engine = TranslationEngine::default();
    assert_eq!(
        engine.translate(&seq(&["🐱", "🐟"])),
        "The cat spotted its favorite meal"
    );
    assert_eq!(
        engine.translate(&seq(&["🐟", "🐱"])),
        "The cat spotted its favorite meal"
    );
    assert_eq!(
        engine.translate(&seq(&["😀", "🐟", "🎵", "🐱"])),
        "The cat spotted its favorite meal"
    );
}

#[test]
fn rule_match_is_deterministic() {
    let engine = TranslationEngine::default();
    let sequence = seq(&["🚗", "🛣️", "🎵"]);
    for _ in 0..20 {
        assert_eq!(engine.translate(&sequence), "Road trip vibes activated");
    }
}

#[test]
fn three_unmatched_symbols_shape() {
    let engine = TranslationEngine::default();
    let home = meanings_of(&engine, "🏠");
    let music = meanings_of(&engine, "🎵");
    let books = meanings_of(&engine, "📚");

    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = engine.translate_with(&seq(&["🏠", "🎵", "📚"]), &mut rng);
        let found = home.iter().any(|h| {
            music.iter().any(|m| {
                books.iter().any(|b| {
                    text == format!(
                        "Once upon a time, {} encountered {} and discovered {}.",
                        h, m, b
                    )
                })
            })
        });
        assert!(found, "unexpected narrative: {}", text);
    }
}

#[test]
fn long_sequence_shape() {
    let engine = TranslationEngine::default();
    let mut rng = StdRng::seed_from_u64(11);
    let text = engine.translate_with(&seq(&["🦖", "🦕", "🐉", "🦎", "🐊"]), &mut rng);
    assert_eq!(
        text,
        "Our story begins with something mysterious (🦖), followed by \
         something mysterious (🦕), something mysterious (🐉), \
         something mysterious (🦎), and finally something mysterious (🐊)."
    );
}

#[test]
fn fallback_varies_between_calls() {
    let engine = TranslationEngine::default();
    let sequence = seq(&["😀", "🐱", "🌳", "🎵"]);
    let first = engine.translate(&sequence);
    let varied = (0..200).any(|_| engine.translate(&sequence) != first);
    assert!(varied, "fallback narrative never changed across calls");
}

#[test]
fn themes_are_order_independent() {
    let engine = TranslationEngine::default();
    let forward = engine.story_themes(&seq(&["🐱", "🍕", "🦖", "🌙"]));
    let backward = engine.story_themes(&seq(&["🌙", "🦖", "🍕", "🐱"]));
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 9);
}

#[test]
fn themes_deduplicate_shared_words() {
    let engine = TranslationEngine::default();
    // "sweet" appears under both cake and strawberry.
    let themes = engine.story_themes(&seq(&["🍰", "🍓"]));
    assert_eq!(themes.len(), 5);
    assert!(themes.contains("sweet"));
}

#[test]
fn themes_empty_for_unknown_symbols() {
    let engine = TranslationEngine::default();
    assert!(engine.story_themes(&seq(&["🦖", "🐉"])).is_empty());
}

#[test]
fn validation_scenarios() {
    let engine = TranslationEngine::default();
    assert!(engine.validate_emoji_sequence(&seq(&["🐱", "🐟"])));
    assert!(!engine.validate_emoji_sequence(&seq(&["a", "b"])));
    assert!(engine.validate_emoji_sequence(&seq(&["🐱xyz"])));
}

#[test]
fn validation_is_pure() {
    let engine = TranslationEngine::default();
    let sequence = seq(&["🎄", "x"]);
    let first = engine.validate_emoji_sequence(&sequence);
    for _ in 0..10 {
        assert_eq!(engine.validate_emoji_sequence(&sequence), first);
    }
}

#[test]
fn preview_flow() {
    let engine = TranslationEngine::default();
    let preview = engine.preview(&seq(&["💪", "🔥"])).unwrap();
    assert_eq!(preview.translation, "Strength meets determination");
    assert!(preview.themes.is_empty());
    assert_eq!(preview.emoji_count, 2);

    let json = serde_json::to_value(&preview).unwrap();
    assert_eq!(json["emoji_count"], 2);

    assert_eq!(engine.preview(&[]), Err(PreviewError::Empty));
    assert_eq!(
        engine.preview(&seq(&["🐱", "dog"])),
        Err(PreviewError::Invalid)
    );
}

#[test]
fn custom_catalog_priority() {
    let catalog = RuleCatalog::load_from_ron(std::path::Path::new(
        "tests/fixtures/test_catalog.ron",
    ))
    .unwrap();
    let engine = TranslationEngine::builder()
        .with_catalog(catalog)
        .build()
        .unwrap();

    // Own cat rule is used when the built-in set is not loaded.
    assert_eq!(
        engine.translate(&seq(&["🐟", "🐱"])),
        "A custom cat chases a custom fish"
    );
    // Needs two waves.
    assert!(engine.match_rules(&seq(&["🌊", "🏄"])).is_none());
    assert_eq!(
        engine.translate(&seq(&["🌊", "🏄", "🌊"])),
        "Wave after wave, the surfer rides on"
    );
}
