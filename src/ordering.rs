//! Suffix handles and the byte orderings shared by construction and search
//!
//! A [`Suffix`] is only an offset; the bytes it denotes live in the sequence
//! store and are passed in explicitly as `text`, which is always the valid
//! prefix of the buffer.

use std::cmp::Ordering;

/// One suffix of the sequence, identified by its start offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Suffix {
    start: usize,
}

impl Suffix {
    pub fn new(start: usize) -> Self {
        Self { start }
    }

    /// Offset of the first byte of this suffix
    pub fn start(&self) -> usize {
        self.start
    }

    /// The bytes this suffix denotes in `text`
    pub fn bytes<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        text.get(self.start..).unwrap_or_default()
    }

    /// Number of bytes from this suffix to the end of `text`
    pub fn remaining(&self, text: &[u8]) -> usize {
        text.len().saturating_sub(self.start)
    }
}

/// Lexicographic order of two suffixes of `text` by unsigned byte value.
///
/// A suffix that is a proper prefix of the other sorts first, so two distinct
/// offsets never compare equal.
pub fn compare_suffixes(text: &[u8], a: Suffix, b: Suffix) -> Ordering {
    a.bytes(text).cmp(b.bytes(text))
}

/// Outcome of comparing a pattern against the leading bytes of a suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOrdering {
    /// Pattern sorts before the suffix
    Before,
    /// Pattern sorts after the suffix
    After,
    /// The suffix starts with the whole pattern
    Match,
    /// The suffix is a proper prefix of the pattern: not enough bytes remain
    Exhausted,
}

impl PatternOrdering {
    pub fn is_match(self) -> bool {
        self == PatternOrdering::Match
    }

    /// Position of the pattern relative to the suffix in sorted order.
    ///
    /// An exhausted suffix is shorter than the pattern it agrees with, so the
    /// pattern sorts after it.
    pub fn as_ordering(self) -> Ordering {
        match self {
            PatternOrdering::Before => Ordering::Less,
            PatternOrdering::Match => Ordering::Equal,
            PatternOrdering::After | PatternOrdering::Exhausted => Ordering::Greater,
        }
    }
}

/// Compares `pattern` against the first `min(pattern.len(), remaining)` bytes
/// of `suffix`, never reading past the end of `text`.
pub fn compare_pattern(text: &[u8], suffix: Suffix, pattern: &[u8]) -> PatternOrdering {
    let tail = suffix.bytes(text);
    let window = pattern.len().min(tail.len());

    match pattern[..window].cmp(&tail[..window]) {
        Ordering::Less => PatternOrdering::Before,
        Ordering::Greater => PatternOrdering::After,
        Ordering::Equal if window == pattern.len() => PatternOrdering::Match,
        Ordering::Equal => PatternOrdering::Exhausted,
    }
}
