/// Rule catalog: the ordered pattern rules and the symbol meaning table.

use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::schema::rule::{RuleError, TranslationRule};
use crate::schema::symbol::Symbol;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("rule {index}: {source}")]
    InvalidRule {
        index: usize,
        #[source]
        source: RuleError,
    },
    #[error("meaning table has an empty symbol key")]
    EmptyMeaningKey,
    #[error("symbol {0} appears twice in the meaning table")]
    DuplicateMeaning(Symbol),
    #[error("symbol {0} has no meanings")]
    EmptyMeanings(Symbol),
    #[error("symbol {0} has a blank meaning")]
    BlankMeaning(Symbol),
}

/// The fixed, ordered rule list plus the symbol → meanings table.
///
/// Rule order is priority order: the first matching rule wins. Nothing
/// mutates a catalog once an engine holds it.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<TranslationRule>,
    meanings: FxHashMap<Symbol, Vec<String>>,
}

// RON file shape. Symbols are plain strings in the file.

#[derive(Debug, Deserialize)]
#[serde(rename = "Rule")]
struct RonRule {
    pattern: Vec<String>,
    templates: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Catalog")]
struct RonCatalog {
    #[serde(default)]
    rules: Vec<RonRule>,
    #[serde(default, deserialize_with = "meaning_list")]
    meanings: Vec<(String, Vec<String>)>,
}

/// Read the meaning map as written, keeping repeated keys so they can be
/// rejected instead of silently overwritten.
fn meaning_list<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MeaningList;

    impl<'de> Visitor<'de> for MeaningList {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from symbol to meaning words")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(MeaningList)
}

impl RuleCatalog {
    /// Build a catalog from parts, checking every meaning entry first.
    ///
    /// Rules are already valid by construction. Either every meaning is
    /// valid and a catalog comes back, or nothing does.
    pub fn new(
        rules: Vec<TranslationRule>,
        meanings: FxHashMap<Symbol, Vec<String>>,
    ) -> Result<RuleCatalog, CatalogError> {
        for (symbol, words) in &meanings {
            check_meanings(symbol, words)?;
        }
        Ok(RuleCatalog { rules, meanings })
    }

    /// The reference catalog: sixteen two-symbol rules and meanings for
    /// thirty-four common emoji.
    pub fn builtin() -> RuleCatalog {
        let rules = BUILTIN_RULES
            .iter()
            .map(|(pattern, templates)| TranslationRule {
                pattern: Symbol::sequence(pattern),
                templates: templates.iter().map(|t| t.to_string()).collect(),
            })
            .collect();

        let meanings = BUILTIN_MEANINGS
            .iter()
            .map(|(symbol, words)| {
                (
                    Symbol::from(*symbol),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect();

        RuleCatalog { rules, meanings }
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<RuleCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::parse_ron(&contents)?;
        info!(
            path = %path.display(),
            rules = catalog.rule_count(),
            meanings = catalog.meaning_count(),
            "Loaded rule catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<RuleCatalog, CatalogError> {
        let raw: RonCatalog = ron::from_str(input)?;

        let rules = raw
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                let pattern = r.pattern.into_iter().map(Symbol::from).collect();
                TranslationRule::new(pattern, r.templates)
                    .map_err(|source| CatalogError::InvalidRule { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut meanings = FxHashMap::default();
        for (symbol, words) in raw.meanings {
            let symbol = Symbol::from(symbol);
            if meanings.contains_key(&symbol) {
                return Err(CatalogError::DuplicateMeaning(symbol));
            }
            meanings.insert(symbol, words);
        }

        Self::new(rules, meanings)
    }

    /// Layer another catalog over this one. Rules from `other` come after
    /// ours (lower priority); meanings from `other` replace ours for the
    /// same symbol.
    pub fn merge(&mut self, other: RuleCatalog) {
        self.rules.extend(other.rules);
        for (symbol, words) in other.meanings {
            self.meanings.insert(symbol, words);
        }
    }

    pub fn rules(&self) -> &[TranslationRule] {
        &self.rules
    }

    /// Candidate meanings for a symbol, if it is known.
    pub fn meanings(&self, symbol: &Symbol) -> Option<&[String]> {
        self.meanings.get(symbol).map(Vec::as_slice)
    }

    /// Iterate the meaning table in no particular order.
    pub fn meaning_entries(&self) -> impl Iterator<Item = (&Symbol, &[String])> {
        self.meanings.iter().map(|(s, w)| (s, w.as_slice()))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn meaning_count(&self) -> usize {
        self.meanings.len()
    }
}

fn check_meanings(symbol: &Symbol, words: &[String]) -> Result<(), CatalogError> {
    if symbol.as_str().is_empty() {
        return Err(CatalogError::EmptyMeaningKey);
    }
    if words.is_empty() {
        return Err(CatalogError::EmptyMeanings(symbol.clone()));
    }
    if words.iter().any(|w| w.trim().is_empty()) {
        return Err(CatalogError::BlankMeaning(symbol.clone()));
    }
    Ok(())
}

const BUILTIN_RULES: &[(&[&str], &[&str])] = &[
    // Animals and food
    (
        &["🐱", "🐟"],
        &[
            "The cat spotted its favorite meal",
            "Feline fishing adventures begin",
            "A hungry cat eyes the perfect catch",
        ],
    ),
    (
        &["🐶", "🦴"],
        &[
            "The dog found the ultimate treasure",
            "Puppy discovers bone paradise",
            "A good boy gets his reward",
        ],
    ),
    // Weather and activities
    (
        &["🏃", "🌧️"],
        &[
            "Someone ran from the rain",
            "Quick dash through the storm",
            "Racing against nature's shower",
        ],
    ),
    (
        &["☀️", "🏖️"],
        &[
            "Perfect beach day vibes",
            "Sun meets sand in harmony",
            "Paradise found under golden rays",
        ],
    ),
    // Romance and emotions
    (
        &["💕", "😍"],
        &[
            "Love is in the air",
            "Hearts flutter with joy",
            "Cupid strikes again",
        ],
    ),
    (
        &["😢", "🌈"],
        &[
            "After tears comes beauty",
            "Sadness transforms into hope",
            "The storm passes, revealing wonder",
        ],
    ),
    // Food
    (
        &["🍕", "😋"],
        &[
            "Pizza brings pure joy",
            "Cheesy happiness delivered",
            "The perfect slice of heaven",
        ],
    ),
    (
        &["🍰", "🎉"],
        &[
            "Celebration calls for cake",
            "Sweet moments deserve sweetness",
            "Party time with sugary delights",
        ],
    ),
    // Technology and modern life
    (
        &["📱", "😴"],
        &[
            "Late-night scrolling session",
            "Digital world meets dreamland",
            "Phone addiction strikes again",
        ],
    ),
    (
        &["💻", "☕"],
        &[
            "Coding fuel activated",
            "Productivity powered by caffeine",
            "The developer's essential combo",
        ],
    ),
    // Travel
    (
        &["✈️", "🗺️"],
        &[
            "Adventure awaits somewhere new",
            "Wings carry dreams to distant lands",
            "The journey begins with a single flight",
        ],
    ),
    (
        &["🚗", "🛣️"],
        &[
            "Road trip vibes activated",
            "Freedom found on the highway",
            "Four wheels and endless possibilities",
        ],
    ),
    // Seasonal
    (
        &["🎃", "👻"],
        &[
            "Spooky season is here",
            "Halloween magic fills the air",
            "Ghosts and gourds unite",
        ],
    ),
    (
        &["🎄", "🎁"],
        &[
            "Christmas magic unfolds",
            "Holiday joy wrapped with love",
            "Festive spirit brings surprises",
        ],
    ),
    // Achievement
    (
        &["🏆", "🎊"],
        &[
            "Victory tastes sweet",
            "Champions celebrate in style",
            "Success deserves confetti",
        ],
    ),
    (
        &["💪", "🔥"],
        &[
            "Strength meets determination",
            "Power ignites inner fire",
            "Unstoppable force activated",
        ],
    ),
];

const BUILTIN_MEANINGS: &[(&str, &[&str])] = &[
    // People and emotions
    ("😀", &["happiness", "joy", "smile"]),
    ("😢", &["sadness", "tears", "sorrow"]),
    ("😍", &["love", "adoration", "heart eyes"]),
    ("😴", &["sleep", "tired", "rest"]),
    ("😋", &["delicious", "yummy", "tasty"]),
    ("🤔", &["thinking", "pondering", "confused"]),
    ("😎", &["cool", "awesome", "confident"]),
    // Animals
    ("🐱", &["cat", "kitty", "feline"]),
    ("🐶", &["dog", "puppy", "canine"]),
    ("🦄", &["unicorn", "magic", "fantasy"]),
    ("🐸", &["frog", "amphibian", "green"]),
    ("🦋", &["butterfly", "transformation", "beauty"]),
    // Nature
    ("🌳", &["tree", "nature", "forest"]),
    ("🌸", &["flower", "spring", "bloom"]),
    ("🌙", &["moon", "night", "celestial"]),
    ("⭐", &["star", "shine", "twinkle"]),
    ("🌈", &["rainbow", "colorful", "hope"]),
    ("☀️", &["sun", "bright", "warm"]),
    ("🌧️", &["rain", "wet", "storm"]),
    // Food
    ("🍕", &["pizza", "cheesy", "Italian"]),
    ("🍰", &["cake", "sweet", "dessert"]),
    ("☕", &["coffee", "caffeine", "energy"]),
    ("🍔", &["burger", "fast food", "hungry"]),
    ("🍓", &["strawberry", "berry", "sweet"]),
    // Objects
    ("📱", &["phone", "mobile", "technology"]),
    ("💻", &["laptop", "computer", "work"]),
    ("🚗", &["car", "vehicle", "transport"]),
    ("✈️", &["airplane", "travel", "flight"]),
    ("🏠", &["house", "home", "shelter"]),
    // Activities
    ("🏃", &["running", "exercise", "fast"]),
    ("🎮", &["gaming", "play", "fun"]),
    ("📚", &["books", "reading", "study"]),
    ("🎵", &["music", "melody", "song"]),
    ("🎨", &["art", "creative", "painting"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_counts() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(catalog.rule_count(), 16);
        assert_eq!(catalog.meaning_count(), 34);
    }

    #[test]
    fn builtin_passes_validation() {
        let catalog = RuleCatalog::builtin();
        for rule in catalog.rules() {
            let rebuilt = TranslationRule::new(rule.pattern().to_vec(), rule.templates().to_vec());
            assert_eq!(rebuilt.as_ref(), Ok(rule));
        }
        let rebuilt = RuleCatalog::new(catalog.rules.clone(), catalog.meanings.clone());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn builtin_order_is_stable() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(catalog.rules()[0].pattern(), Symbol::sequence(&["🐱", "🐟"]));
        assert_eq!(catalog.rules()[15].pattern(), Symbol::sequence(&["💪", "🔥"]));
    }

    #[test]
    fn builtin_meanings_lookup() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(
            catalog.meanings(&Symbol::from("😀")),
            Some(&["happiness".to_string(), "joy".to_string(), "smile".to_string()][..])
        );
        assert!(catalog.meanings(&Symbol::from("🦴")).is_none());
    }

    #[test]
    fn parse_minimal_ron() {
        let input = r#"Catalog(
            rules: [
                Rule(pattern: ["🐸", "🌧️"], templates: ["The frog loves the rain", "Puddle party"]),
            ],
            meanings: {
                "🐸": ["frog"],
            },
        )"#;
        let catalog = RuleCatalog::parse_ron(input).unwrap();
        assert_eq!(catalog.rule_count(), 1);
        assert_eq!(catalog.rules()[0].templates().len(), 2);
        assert_eq!(
            catalog.meanings(&Symbol::from("🐸")),
            Some(&["frog".to_string()][..])
        );
    }

    #[test]
    fn parse_rejects_empty_pattern_atomically() {
        let input = r#"Catalog(
            rules: [
                Rule(pattern: ["🐸"], templates: ["fine"]),
                Rule(pattern: [], templates: ["broken"]),
            ],
        )"#;
        let err = RuleCatalog::parse_ron(input).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidRule {
                index: 1,
                source: RuleError::EmptyPattern
            }
        ));
    }

    #[test]
    fn parse_rejects_empty_templates() {
        let input = r#"Catalog(rules: [Rule(pattern: ["🐸"], templates: [])])"#;
        assert!(matches!(
            RuleCatalog::parse_ron(input),
            Err(CatalogError::InvalidRule {
                index: 0,
                source: RuleError::EmptyTemplates
            })
        ));
    }

    #[test]
    fn parse_rejects_blank_template() {
        let input = r#"Catalog(rules: [Rule(pattern: ["🐸"], templates: ["  "])])"#;
        assert!(matches!(
            RuleCatalog::parse_ron(input),
            Err(CatalogError::InvalidRule {
                index: 0,
                source: RuleError::BlankTemplate
            })
        ));
    }

    #[test]
    fn parse_rejects_empty_meaning_list() {
        let input = r#"Catalog(meanings: { "🐸": [] })"#;
        assert!(matches!(
            RuleCatalog::parse_ron(input),
            Err(CatalogError::EmptyMeanings(_))
        ));
    }

    #[test]
    fn parse_rejects_blank_meaning_word() {
        let input = r#"Catalog(meanings: { "🐸": ["frog", " "] })"#;
        match RuleCatalog::parse_ron(input) {
            Err(CatalogError::BlankMeaning(symbol)) => assert_eq!(symbol, Symbol::from("🐸")),
            other => panic!("expected BlankMeaning, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_empty_pattern_symbol() {
        let input = r#"Catalog(rules: [Rule(pattern: ["🐸", ""], templates: ["x"])])"#;
        assert!(matches!(
            RuleCatalog::parse_ron(input),
            Err(CatalogError::InvalidRule {
                index: 0,
                source: RuleError::EmptySymbol
            })
        ));
    }

    #[test]
    fn parse_rejects_empty_meaning_key() {
        let input = r#"Catalog(meanings: { "": ["x"] })"#;
        assert!(matches!(
            RuleCatalog::parse_ron(input),
            Err(CatalogError::EmptyMeaningKey)
        ));
    }

    #[test]
    fn parse_rejects_repeated_meaning_key() {
        let input = r#"Catalog(meanings: { "🐸": ["frog"], "🐸": ["toad"] })"#;
        match RuleCatalog::parse_ron(input) {
            Err(CatalogError::DuplicateMeaning(symbol)) => assert_eq!(symbol, Symbol::from("🐸")),
            other => panic!("expected DuplicateMeaning, got {:?}", other),
        }
    }

    #[test]
    fn load_rejects_repeated_meaning_fixture() {
        let path = std::path::PathBuf::from("tests/fixtures/duplicate_meaning_catalog.ron");
        assert!(matches!(
            RuleCatalog::load_from_ron(&path),
            Err(CatalogError::DuplicateMeaning(_))
        ));
    }

    #[test]
    fn parse_rejects_malformed_ron() {
        assert!(matches!(
            RuleCatalog::parse_ron("Catalog(rules: [Rule(pattern: "),
            Err(CatalogError::Ron(_))
        ));
    }

    #[test]
    fn merge_appends_rules_and_overrides_meanings() {
        let mut base = RuleCatalog::builtin();
        let extra = RuleCatalog::parse_ron(
            r#"Catalog(
                rules: [Rule(pattern: ["🐸", "🌧️"], templates: ["The frog loves the rain"])],
                meanings: { "😀": ["grin"], "🐢": ["turtle"] },
            )"#,
        )
        .unwrap();
        base.merge(extra);

        assert_eq!(base.rule_count(), 17);
        assert_eq!(base.rules()[16].primary_template(), "The frog loves the rain");
        assert_eq!(
            base.meanings(&Symbol::from("😀")),
            Some(&["grin".to_string()][..])
        );
        assert!(base.meanings(&Symbol::from("🐢")).is_some());
        assert_eq!(base.meaning_count(), 35);
    }

    #[test]
    fn load_test_catalog_from_ron() {
        let path = std::path::PathBuf::from("tests/fixtures/test_catalog.ron");
        let catalog = RuleCatalog::load_from_ron(&path).unwrap();
        assert_eq!(catalog.rule_count(), 3);
        assert!(catalog.meanings(&Symbol::from("🐢")).is_some());
    }
}
