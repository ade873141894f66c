/// Pattern containment checks used by rule matching.
///
/// A pattern is contained in a sequence when it appears as a contiguous
/// run, or failing that, when a single left-to-right consuming pass over
/// the sequence uses up every symbol of the pattern.

use crate::schema::symbol::Symbol;

/// True when the two checks below, tried in order, find the pattern.
pub fn contains_pattern(sequence: &[Symbol], pattern: &[Symbol]) -> bool {
    if pattern.is_empty() || pattern.len() > sequence.len() {
        return false;
    }
    contains_contiguous(sequence, pattern) || covers_multiset(sequence, pattern)
}

/// `pattern` occurs as an adjacent run somewhere in `sequence`.
pub fn contains_contiguous(sequence: &[Symbol], pattern: &[Symbol]) -> bool {
    if pattern.is_empty() || pattern.len() > sequence.len() {
        return false;
    }
    sequence.windows(pattern.len()).any(|window| window == pattern)
}

/// Walk `sequence` once; each symbol still owed by the pattern removes
/// one matching instance from a working copy. Succeeds when the copy
/// runs dry. Order within the pattern is not enforced.
pub fn covers_multiset(sequence: &[Symbol], pattern: &[Symbol]) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let mut remaining: Vec<&Symbol> = pattern.iter().collect();
    for symbol in sequence {
        if let Some(pos) = remaining.iter().position(|p| *p == symbol) {
            remaining.remove(pos);
        }
        if remaining.is_empty() {
            return true;
        }
    }
    false
}
