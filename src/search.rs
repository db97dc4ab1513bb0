//! Exact pattern search over a suffix index
//!
//! Every suffix starting with a pattern sits in one contiguous block of the
//! sorted index. [`PatternSearcher::find_one`] binary searches for any entry of
//! that block and [`PatternSearcher::match_range`] grows it outward until the
//! first non-matching neighbour on each side.

use crate::error::{Result, SearchError};
use crate::genome::SequenceSource;
use crate::index::SuffixIndex;
use crate::ordering::{compare_pattern, PatternOrdering};
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Range;
use tracing::{debug, trace};

/// Start offsets of every occurrence of a pattern, in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    offsets: Vec<usize>,
}

impl MatchSet {
    fn from_unsorted(mut offsets: Vec<usize>) -> Self {
        offsets.sort_unstable();
        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.offsets.binary_search(&offset).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.offsets
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter().copied()
    }
}

/// Read-only searcher binding an index to the sequence it was built from.
///
/// Holds only shared references, so one searcher can serve any number of
/// concurrent searches.
#[derive(Debug, Clone, Copy)]
pub struct PatternSearcher<'a> {
    index: &'a SuffixIndex,
    text: &'a [u8],
}

impl<'a> PatternSearcher<'a> {
    /// Pairs `index` with the valid bytes of `source`.
    ///
    /// Fails with `IndexMismatch` when the index does not cover exactly the
    /// valid bytes of `source`, i.e. it was built from a different store.
    pub fn new<S>(index: &'a SuffixIndex, source: &'a S) -> Result<Self>
    where
        S: SequenceSource + ?Sized,
    {
        let content = source.content();
        let valid_bytes = source.valid_bytes();
        if valid_bytes > content.len() {
            return Err(SearchError::construction(valid_bytes, content.len()));
        }
        if index.len() != valid_bytes {
            return Err(SearchError::index_mismatch(index.len(), valid_bytes));
        }

        Ok(Self {
            index,
            text: &content[..valid_bytes],
        })
    }

    fn compare_at(&self, position: usize, pattern: &[u8]) -> PatternOrdering {
        match self.index.get(position) {
            Some(suffix) => compare_pattern(self.text, suffix, pattern),
            None => PatternOrdering::Exhausted,
        }
    }

    fn matches_at(&self, position: usize, pattern: &[u8]) -> bool {
        self.compare_at(position, pattern).is_match()
    }

    /// Index position of some suffix starting with `pattern`, if any.
    ///
    /// Binary search over the half-open range `[lo, hi)`; any match lies
    /// inside it on every iteration.
    pub fn find_one(&self, pattern: &[u8]) -> Result<Option<usize>> {
        if pattern.is_empty() {
            return Err(SearchError::InvalidPattern);
        }

        let mut lo = 0;
        let mut hi = self.index.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.compare_at(mid, pattern) {
                PatternOrdering::Match => return Ok(Some(mid)),
                PatternOrdering::Before => hi = mid,
                PatternOrdering::After | PatternOrdering::Exhausted => lo = mid + 1,
            }
        }

        trace!(pattern_len = pattern.len(), "Binary search found no candidate");
        Ok(None)
    }

    /// Contiguous block of index positions whose suffixes start with `pattern`
    pub fn match_range(&self, pattern: &[u8]) -> Result<Option<Range<usize>>> {
        let Some(hit) = self.find_one(pattern)? else {
            return Ok(None);
        };

        let mut end = hit + 1;
        while end < self.index.len() && self.matches_at(end, pattern) {
            end += 1;
        }

        let mut start = hit;
        while start > 0 && self.matches_at(start - 1, pattern) {
            start -= 1;
        }

        Ok(Some(start..end))
    }

    /// Every offset at which `pattern` occurs
    pub fn find_all(&self, pattern: &[u8]) -> Result<MatchSet> {
        let matches = match self.match_range(pattern)? {
            Some(range) => {
                let offsets = self.index.as_slice()[range]
                    .iter()
                    .map(|suffix| suffix.start())
                    .collect();
                MatchSet::from_unsorted(offsets)
            }
            None => MatchSet::default(),
        };

        debug!(
            pattern_len = pattern.len(),
            occurrences = matches.len(),
            "Pattern search finished"
        );
        Ok(matches)
    }

    /// Number of occurrences of `pattern`
    pub fn count(&self, pattern: &[u8]) -> Result<usize> {
        Ok(self.match_range(pattern)?.map_or(0, |range| range.len()))
    }

    /// Runs independent searches on the rayon pool, results in input order
    pub fn search_batch<P>(&self, patterns: &[P]) -> Vec<Result<MatchSet>>
    where
        P: AsRef<[u8]> + Sync,
    {
        patterns
            .par_iter()
            .map(|pattern| self.find_all(pattern.as_ref()))
            .collect()
    }
}
