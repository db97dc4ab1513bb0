//! Exact substring search over genomic sequences with a suffix index.
//!
//! A [`genome::SequenceStore`] holds the loaded bytes, [`index::SuffixIndex`]
//! sorts every suffix of them once, and [`search::PatternSearcher`] answers
//! pattern queries by binary search over that order.

pub mod config;
pub mod error;
pub mod genome;
pub mod index;
pub mod logging;
pub mod ordering;
pub mod output;
pub mod search;

pub use error::{Result, SearchError};
pub use genome::{SequenceSource, SequenceStore};
pub use index::{IndexConfig, SortAlgorithm, SuffixIndex};
pub use search::{MatchSet, PatternSearcher};

/// Build a suffix index over `store` with the default configuration.
pub fn build_index<S: SequenceSource + ?Sized>(store: &S) -> Result<SuffixIndex> {
    SuffixIndex::build(store, &IndexConfig::default())
}

/// Every offset of `store` at which `pattern` occurs.
///
/// Fails only for an empty pattern, or when `index` was not built from `store`.
pub fn search<S: SequenceSource + ?Sized>(
    index: &SuffixIndex,
    store: &S,
    pattern: &[u8],
) -> Result<MatchSet> {
    PatternSearcher::new(index, store)?.find_all(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_search() {
        let store = SequenceStore::from_bytes(&b"AGCTAGCTA"[..]);
        let index = build_index(&store).unwrap();
        assert_eq!(index.len(), 9);
        assert!(index.is_sorted_over(store.sequence()));

        let matches = search(&index, &store, b"AGC").unwrap();
        assert_eq!(matches.as_slice(), &[0, 4]);
        assert!(matches!(
            search(&index, &store, b""),
            Err(SearchError::InvalidPattern)
        ));
    }

    #[test]
    fn test_works_through_trait_object() {
        let store = SequenceStore::from_parts(b"AAAA----".to_vec(), 4);
        let source: &dyn SequenceSource = &store;
        let index = build_index(source).unwrap();
        assert_eq!(search(&index, source, b"AA").unwrap().as_slice(), &[0, 1, 2]);
    }
}
