/// Fallback narrative synthesis from per-symbol meanings.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::catalog::RuleCatalog;
use crate::schema::symbol::Symbol;

/// Narrative returned for an empty sequence.
pub const EMPTY_NARRATIVE: &str = "No emojis provided.";

/// Build a sentence by drawing one meaning per symbol.
///
/// Every call draws fresh; the same sequence can read differently each
/// time unless the caller passes a seeded `rng`.
pub fn synthesize<R: Rng + ?Sized>(
    sequence: &[Symbol],
    catalog: &RuleCatalog,
    rng: &mut R,
) -> String {
    let parts: Vec<String> = sequence
        .iter()
        .map(|symbol| resolve_part(symbol, catalog, rng))
        .collect();
    assemble(&parts)
}

/// One random meaning for a known symbol, or a placeholder naming it.
pub fn resolve_part<R: Rng + ?Sized>(symbol: &Symbol, catalog: &RuleCatalog, rng: &mut R) -> String {
    catalog
        .meanings(symbol)
        .and_then(|words| words.choose(rng))
        .cloned()
        .unwrap_or_else(|| mystery_part(symbol))
}

pub fn mystery_part(symbol: &Symbol) -> String {
    format!("something mysterious ({})", symbol)
}

/// Fit resolved parts into a sentence shape chosen by how many there are.
pub fn assemble(parts: &[String]) -> String {
    match parts {
        [] => EMPTY_NARRATIVE.to_string(),
        [only] => format!("A tale of {}.", only),
        [first, second] => format!("{} meets {}.", capitalize(first), second),
        [first, second, third] => format!(
            "Once upon a time, {} encountered {} and discovered {}.",
            first, second, third
        ),
        [first, middle @ .., last] => {
            let beginning = format!("Our story begins with {}", first);
            if middle.is_empty() {
                // Two parts are caught above; kept for completeness.
                format!("{} and {}.", beginning, last)
            } else {
                format!(
                    "{}, followed by {}, and finally {}.",
                    beginning,
                    middle.join(", "),
                    last
                )
            }
        }
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
