//! # Gram Index
//!
//! Maps every fixed-width byte gram occurring in the data log to the list
//! of byte offsets where it occurs. Postings are created lazily on first
//! write; one writer installs the posting, racers reuse it.

use crossbeam_skiplist::map::Entry;
use crossbeam_skiplist::SkipMap;
use tracing::trace;

use crate::offset_log::OffsetLog;

/// Width of an index gram in bytes. Substring queries shorter than this
/// cannot be answered from the index alone.
pub const GRAM_WIDTH: usize = 3;

type Gram = [u8; GRAM_WIDTH];

/// Inverted index from gram to occurrence offsets
pub struct GramIndex {
    postings: SkipMap<Gram, OffsetLog>,
}

impl GramIndex {
    pub fn new() -> Self {
        Self {
            postings: SkipMap::new(),
        }
    }

    /// Record that the gram at `bytes` occurs at log offset `offset`.
    ///
    /// `bytes` must be exactly `GRAM_WIDTH` long.
    pub fn record(&self, bytes: &[u8], offset: u32) {
        let gram = to_gram(bytes);
        let entry = self.postings.get_or_insert_with(gram, OffsetLog::new);
        entry.value().push(offset);
    }

    /// Snapshot the posting for a gram, if any offsets were ever recorded.
    ///
    /// The posting length is pinned at lookup time: offsets published after
    /// this call are invisible through the returned handle.
    pub fn posting(&self, bytes: &[u8]) -> Option<GramPosting<'_>> {
        let entry = self.postings.get(&to_gram(bytes))?;
        let len = entry.value().len();
        trace!(gram = ?bytes, len, "posting lookup");
        Some(GramPosting { entry, len })
    }

    /// Number of distinct grams indexed
    pub fn gram_count(&self) -> usize {
        self.postings.len()
    }
}

impl Default for GramIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn to_gram(bytes: &[u8]) -> Gram {
    debug_assert_eq!(bytes.len(), GRAM_WIDTH);
    let mut gram = [0u8; GRAM_WIDTH];
    gram.copy_from_slice(bytes);
    gram
}

/// Read handle over one gram's occurrence offsets, with its length pinned
/// to the moment of lookup
pub struct GramPosting<'a> {
    entry: Entry<'a, Gram, OffsetLog>,
    len: u32,
}

impl GramPosting<'_> {
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the offset at `idx`, which must be below `len()`
    pub fn get(&self, idx: u32) -> u32 {
        debug_assert!(idx < self.len);
        self.entry.value().get(idx)
    }
}
