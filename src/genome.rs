//! Sequence storage and FASTA loading
//!
//! The index builder only needs a byte buffer and the count of leading bytes
//! that hold meaningful data; [`SequenceSource`] is that seam. [`SequenceStore`]
//! is the provided implementation, loaded from FASTA with the needletail parser
//! and remembering which record every byte came from.

use crate::error::Result;
use needletail::parse_fastx_file;
use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Read-only view of a loaded sequence.
///
/// Only `content()[..valid_bytes()]` is meaningful. Implementations must not
/// change either value once an index has been built over them.
pub trait SequenceSource {
    /// Raw backing buffer, possibly longer than the valid data
    fn content(&self) -> &[u8];

    /// Number of leading bytes of `content()` that hold sequence data
    fn valid_bytes(&self) -> usize;
}

/// Information about a single FASTA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContigInfo {
    /// Record identifier (header up to the first whitespace)
    pub name: String,
    /// Global start position in the concatenated sequence
    pub start: usize,
    /// Global end position (exclusive)
    pub end: usize,
}

impl ContigInfo {
    /// Returns the range of this contig in the global sequence
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Converts a global position to a position within this contig
    pub fn global_to_local(&self, global_pos: usize) -> Option<usize> {
        self.range().contains(&global_pos).then(|| global_pos - self.start)
    }
}

/// Immutable nucleotide buffer plus its valid length
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    content: Vec<u8>,
    valid_bytes: usize,
    contigs: Vec<ContigInfo>,
}

impl SequenceStore {
    /// Wraps a buffer and valid-byte count exactly as a loader produced them.
    ///
    /// The pair is not checked here; [`crate::index::SuffixIndex::build`]
    /// rejects a count larger than the buffer.
    pub fn from_parts(content: Vec<u8>, valid_bytes: usize) -> Self {
        Self {
            content,
            valid_bytes,
            contigs: Vec::new(),
        }
    }

    /// Store whose whole buffer is valid
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let content = bytes.into();
        let valid_bytes = content.len();
        Self::from_parts(content, valid_bytes)
    }

    /// Loads every record of a FASTA file into one contiguous buffer.
    ///
    /// Line breaks are dropped and record sequences are concatenated in file
    /// order; bytes are kept as they appear (no case folding). Records without
    /// bases are skipped and an empty file yields an empty store.
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // needletail refuses empty input, but an empty file is just an empty sequence
        if fs::metadata(path)?.len() == 0 {
            info!(path = %path.display(), "Empty FASTA file, nothing to load");
            return Ok(Self::default());
        }

        let mut reader = parse_fastx_file(path)?;
        let mut content = Vec::new();
        let mut contigs = Vec::new();

        while let Some(record) = reader.next() {
            let record = record?;
            let seq = record.seq();
            if seq.is_empty() {
                continue;
            }

            let name = contig_name(record.id());
            let start = content.len();
            content.extend_from_slice(&seq);
            debug!(contig = %name, length = seq.len(), "Loaded record");

            contigs.push(ContigInfo {
                name,
                start,
                end: content.len(),
            });
        }

        content.shrink_to_fit();
        let valid_bytes = content.len();

        info!(
            path = %path.display(),
            contigs = contigs.len(),
            valid_bytes,
            "FASTA file loaded"
        );

        Ok(Self {
            content,
            valid_bytes,
            contigs,
        })
    }

    /// The meaningful prefix of the buffer
    pub fn sequence(&self) -> &[u8] {
        &self.content[..self.valid_bytes.min(self.content.len())]
    }

    pub fn len(&self) -> usize {
        self.valid_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.valid_bytes == 0
    }

    /// Records the sequence was loaded from (empty for in-memory stores)
    pub fn contigs(&self) -> &[ContigInfo] {
        &self.contigs
    }

    /// Finds the record containing a global offset and the offset within it
    pub fn locate(&self, offset: usize) -> Option<(&ContigInfo, usize)> {
        let idx = self.contigs.partition_point(|contig| contig.end <= offset);
        let contig = self.contigs.get(idx)?;
        contig.global_to_local(offset).map(|local| (contig, local))
    }
}

impl SequenceSource for SequenceStore {
    fn content(&self) -> &[u8] {
        &self.content
    }

    fn valid_bytes(&self) -> usize {
        self.valid_bytes
    }
}

fn contig_name(id: &[u8]) -> String {
    let raw = String::from_utf8_lossy(id);
    raw.split_whitespace().next().unwrap_or_default().to_string()
}
