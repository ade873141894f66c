/// Pictographic symbol validation.

use crate::schema::symbol::Symbol;

/// A named, inclusive code-point range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub name: &'static str,
    pub start: u32,
    pub end: u32,
}

impl CodeRange {
    const fn new(name: &'static str, start: u32, end: u32) -> Self {
        Self { name, start, end }
    }

    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&(c as u32))
    }
}

/// Ranges a symbol's leading code point must fall in.
///
/// The last entry is deliberately wide: it spans from the enclosed
/// alphanumerics through the enclosed ideographic supplement, which also
/// picks up the misc-symbols block (☀, ☕, ⭐) and arrows.
pub const PICTOGRAPHIC_RANGES: &[CodeRange] = &[
    CodeRange::new("emoticons", 0x1F600, 0x1F64F),
    CodeRange::new("misc symbols and pictographs", 0x1F300, 0x1F5FF),
    CodeRange::new("transport and map symbols", 0x1F680, 0x1F6FF),
    CodeRange::new("alchemical symbols", 0x1F700, 0x1F77F),
    CodeRange::new("geometric shapes extended", 0x1F780, 0x1F7FF),
    CodeRange::new("supplemental arrows-c", 0x1F800, 0x1F8FF),
    CodeRange::new("supplemental symbols and pictographs", 0x1F900, 0x1F9FF),
    CodeRange::new("chess symbols", 0x1FA00, 0x1FA6F),
    CodeRange::new("symbols and pictographs extended-a", 0x1FA70, 0x1FAFF),
    CodeRange::new("regional indicators", 0x1F1E0, 0x1F1FF),
    CodeRange::new("dingbats", 0x2702, 0x27B0),
    CodeRange::new("enclosed characters", 0x24C2, 0x1F251),
];

/// The range containing `c`, if any.
pub fn range_of(c: char) -> Option<&'static CodeRange> {
    PICTOGRAPHIC_RANGES.iter().find(|r| r.contains(c))
}

/// Whether a token starts with a pictographic code point.
///
/// Only the first character is checked, so `"🐱abc"` passes.
pub fn is_pictographic(token: &str) -> bool {
    token.chars().next().and_then(range_of).is_some()
}

/// Every symbol in the sequence is pictographic. Vacuously true for an
/// empty sequence; emptiness is the caller's concern.
pub fn validate_sequence(sequence: &[Symbol]) -> bool {
    sequence.iter().all(|s| is_pictographic(s.as_str()))
}
