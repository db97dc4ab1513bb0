//! Human-readable and JSON rendering of indexes and search results

use crate::genome::SequenceStore;
use crate::index::SuffixIndex;
use crate::search::MatchSet;
use serde::Serialize;
use std::fmt;

/// Default number of bytes shown per suffix in a listing
pub const DEFAULT_PREVIEW_WIDTH: usize = 50;

const RULE: &str =
    "-------------------------------------------------------------------------";

/// Diagnostic table of every suffix in sorted order with a short preview
pub struct SuffixListing<'a> {
    index: &'a SuffixIndex,
    store: &'a SequenceStore,
    preview_width: usize,
}

impl<'a> SuffixListing<'a> {
    pub fn new(index: &'a SuffixIndex, store: &'a SequenceStore) -> Self {
        Self {
            index,
            store,
            preview_width: DEFAULT_PREVIEW_WIDTH,
        }
    }

    /// Maximum number of bytes shown for each suffix
    pub fn preview_width(mut self, width: usize) -> Self {
        self.preview_width = width;
        self
    }
}

impl fmt::Display for SuffixListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.store.sequence();

        writeln!(f, "{}", RULE)?;
        writeln!(f, "Index | Sequence")?;
        writeln!(f, "{}", RULE)?;
        for suffix in self.index.iter() {
            let bytes = suffix.bytes(text);
            let preview = &bytes[..bytes.len().min(self.preview_width)];
            writeln!(
                f,
                "  {:>3} | \"{}\"",
                suffix.start(),
                String::from_utf8_lossy(preview)
            )?;
        }
        writeln!(f, "{}", RULE)
    }
}

/// One reported occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchLocation {
    /// Offset in the concatenated sequence
    pub offset: usize,
    /// Record containing the offset, when loaded from FASTA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contig: Option<String>,
    /// Offset within that record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_offset: Option<usize>,
}

/// Result of one search, ready for printing
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub pattern: String,
    pub count: usize,
    pub matches: Vec<MatchLocation>,
}

impl MatchReport {
    pub fn new(pattern: &[u8], matches: &MatchSet, store: &SequenceStore) -> Self {
        let matches = matches
            .iter()
            .map(|offset| {
                let located = store.locate(offset);
                MatchLocation {
                    offset,
                    contig: located.map(|(contig, _)| contig.name.clone()),
                    local_offset: located.map(|(_, local)| local),
                }
            })
            .collect::<Vec<_>>();

        Self {
            pattern: String::from_utf8_lossy(pattern).into_owned(),
            count: matches.len(),
            matches,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.matches.is_empty() {
            return writeln!(f, "No occurrences of {} found.", self.pattern);
        }

        for location in &self.matches {
            write!(f, "Found {} at {}", self.pattern, location.offset)?;
            if let (Some(contig), Some(local)) = (&location.contig, location.local_offset) {
                write!(f, " ({}:{})", contig, local)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
