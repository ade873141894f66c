use serde::{Deserialize, Serialize};
use std::fmt;

/// A single pictographic token, usually one emoji grapheme.
///
/// Symbols are compared by exact string equality, so `"☀️"` (with the
/// variation selector) and `"☀"` are different symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an owned sequence from string slices.
    pub fn sequence(items: &[&str]) -> Vec<Symbol> {
        items.iter().map(|s| Symbol::from(*s)).collect()
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split whitespace-separated text into symbols.
///
/// Front ends hand us one string like `"🐱 🐟"`; grapheme segmentation is
/// left to whoever typed it.
pub fn split_symbols(text: &str) -> Vec<Symbol> {
    text.split_whitespace().map(Symbol::from).collect()
}
