//! Suffix index construction
//!
//! The index is the list of every suffix offset of the valid sequence, sorted
//! by [`compare_suffixes`]. It is built once and never changes; searches only
//! read it.

use crate::error::{Result, SearchError};
use crate::genome::SequenceSource;
use crate::ordering::{compare_suffixes, Suffix};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use suffix::SuffixTable;
use tracing::{debug, info, warn};

/// How the suffix order is produced. Both strategies yield the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    /// Comparison sort over suffix offsets, O(n log n) comparisons
    #[default]
    Comparison,
    /// Linear-time SA-IS construction (ASCII data up to u32::MAX bytes)
    #[serde(alias = "sais")]
    SuffixArray,
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortAlgorithm::Comparison => write!(f, "comparison"),
            SortAlgorithm::SuffixArray => write!(f, "sais"),
        }
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "comparison" | "sort" => Ok(SortAlgorithm::Comparison),
            "sais" | "suffix_array" | "suffix-array" => Ok(SortAlgorithm::SuffixArray),
            other => Err(format!(
                "unknown sort algorithm '{}' (expected 'comparison' or 'sais')",
                other
            )),
        }
    }
}

/// Configuration for suffix index construction
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Construction strategy
    pub algorithm: SortAlgorithm,
    /// Sort on the rayon pool (comparison strategy only)
    pub parallel: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            algorithm: SortAlgorithm::Comparison,
            parallel: true,
        }
    }
}

/// All suffixes of a sequence in lexicographic order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixIndex {
    order: Vec<Suffix>,
}

impl SuffixIndex {
    /// Build the index over the valid bytes of `source`
    ///
    /// # Returns
    /// * `Ok(SuffixIndex)` - One entry per valid offset, sorted
    /// * `Err(SearchError::Construction)` - `valid_bytes` exceeds the buffer
    pub fn build<S>(source: &S, config: &IndexConfig) -> Result<Self>
    where
        S: SequenceSource + ?Sized,
    {
        let content = source.content();
        let valid_bytes = source.valid_bytes();
        if valid_bytes > content.len() {
            return Err(SearchError::construction(valid_bytes, content.len()));
        }

        let text = &content[..valid_bytes];
        let start = Instant::now();

        let order = match config.algorithm {
            SortAlgorithm::Comparison => Self::sort_comparison(text, config.parallel),
            SortAlgorithm::SuffixArray => match Self::sort_sais(text) {
                Some(order) => order,
                None => {
                    warn!(
                        valid_bytes,
                        "SA-IS needs ASCII input addressable by u32, falling back to comparison sort"
                    );
                    Self::sort_comparison(text, config.parallel)
                }
            },
        };

        info!(
            algorithm = %config.algorithm,
            suffixes = order.len(),
            elapsed = ?start.elapsed(),
            "Suffix index built"
        );

        Ok(Self { order })
    }

    fn sort_comparison(text: &[u8], parallel: bool) -> Vec<Suffix> {
        let mut order: Vec<Suffix> = (0..text.len()).map(Suffix::new).collect();

        // Offsets are distinct, so an unstable sort yields the unique order
        if parallel {
            order.par_sort_unstable_by(|&a, &b| compare_suffixes(text, a, b));
        } else {
            order.sort_unstable_by(|&a, &b| compare_suffixes(text, a, b));
        }

        debug!(parallel, suffixes = order.len(), "Comparison sort finished");
        order
    }

    fn sort_sais(text: &[u8]) -> Option<Vec<Suffix>> {
        if text.len() > u32::MAX as usize || !text.is_ascii() {
            return None;
        }
        if text.is_empty() {
            return Some(Vec::new());
        }

        // ASCII is valid UTF-8 and its byte order is the code point order
        let text = std::str::from_utf8(text).ok()?;
        let table = SuffixTable::new(text);

        Some(
            table
                .table()
                .iter()
                .map(|&offset| Suffix::new(offset as usize))
                .collect(),
        )
    }

    /// Number of suffixes (equals the valid byte count)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Suffix at a sorted position
    pub fn get(&self, position: usize) -> Option<Suffix> {
        self.order.get(position).copied()
    }

    pub fn as_slice(&self) -> &[Suffix] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = Suffix> + '_ {
        self.order.iter().copied()
    }

    /// Start offsets in sorted order
    pub fn offsets(&self) -> Vec<usize> {
        self.order.iter().map(Suffix::start).collect()
    }

    /// Checks that adjacent entries are strictly increasing over `text`
    pub fn is_sorted_over(&self, text: &[u8]) -> bool {
        self.order.len() == text.len()
            && self
                .order
                .windows(2)
                .all(|pair| compare_suffixes(text, pair[0], pair[1]).is_lt())
    }
}
