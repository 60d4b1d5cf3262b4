//! # Log Store
//!
//! Orchestrates the append/get/search/delete/update paths across the data
//! log, the tail cursors, the per-key slot arrays and the gram index.
//!
//! ## Write Path
//!
//! ```text
//! append ──> reserve tail slot ──> register offsets ──> copy payload
//!                                                          │
//!            publish read tail <── index grams <───────────┘
//! ```
//!
//! ## Read Path
//!
//! ```text
//! search ──> snapshot read tail ──> gram postings ──> candidate offsets
//!              │                                          │
//!              └──> verify bytes <── resolve offset→key <─┘
//! ```
//!
//! Writers serialise only at publication; reservation, payload copy and
//! index updates all proceed in parallel. Readers never block writers.

use std::collections::{BTreeSet, HashSet};

use bytes::Bytes;
use tracing::{info, trace, warn};

use kiroku_core::config::StoreConfig;
use kiroku_core::error::{Error, Result};
use kiroku_core::metrics::Metrics;
use kiroku_core::types::{InternalKey, StoreStats};
use kiroku_index::{GramIndex, GRAM_WIDTH};

use crate::log::DataLog;
use crate::slots::{RecordSlots, TombstoneSlots};
use crate::tail::{append_increment, strip_key_increment, TailCursors, TailWord, DEL_INCR};

/// In-memory, append-only record store with substring search
pub struct LogStore {
    config: StoreConfig,
    log: DataLog,
    tails: TailCursors,
    records: RecordSlots,
    tombstones: TombstoneSlots,
    grams: GramIndex,
    metrics: Metrics,
}

impl LogStore {
    /// Allocate a store with the given capacities. All structures are
    /// sized up front; the log never grows.
    pub fn new(config: StoreConfig, metrics: Metrics) -> Result<Self> {
        config.validate()?;
        info!(
            max_keys = config.max_keys,
            log_capacity = config.log_capacity,
            "opening log store"
        );
        Ok(Self {
            log: DataLog::with_capacity(config.log_capacity as usize),
            tails: TailCursors::new(),
            records: RecordSlots::new(config.max_keys as usize),
            tombstones: TombstoneSlots::new(config.max_keys as usize),
            grams: GramIndex::new(),
            metrics,
            config,
        })
    }

    /// Append a record, returning its internal key.
    pub fn append(&self, payload: &[u8]) -> Result<InternalKey> {
        let (reserved, increment) = self.append_inner(payload)?;
        self.tails.publish(reserved, increment);
        self.metrics.record_append(payload.len() as u64);
        trace!(
            key = reserved.key(),
            offset = reserved.offset(),
            len = payload.len(),
            "appended record"
        );
        Ok(reserved.key())
    }

    /// Fetch a record's payload by internal key.
    pub fn get(&self, key: InternalKey) -> Result<Bytes> {
        self.metrics.record_get();
        let snapshot = self.tails.snapshot();
        if key >= snapshot.key() || key >= self.config.max_keys {
            self.metrics.record_get_miss();
            return Err(Error::NotFound { key });
        }
        let mark = self.tombstones.get(key);
        if mark != 0 && snapshot.offset() >= mark {
            self.metrics.record_get_miss();
            return Err(Error::NotFound { key });
        }
        let (start, len) = self.records.bounds(key);
        if len == 0 {
            self.metrics.record_get_miss();
            return Err(Error::NotFound { key });
        }
        let start = start as usize;
        Ok(Bytes::copy_from_slice(self.log.slice(start..start + len as usize)))
    }

    /// Substring search over record payloads. Returns the matching keys in
    /// ascending order, duplicates suppressed.
    pub fn search(&self, query: &[u8]) -> BTreeSet<InternalKey> {
        self.metrics.record_search();
        let mut results = BTreeSet::new();
        self.search_impl(query, |key| {
            results.insert(key);
        });
        results
    }

    /// Substring search returning keys in first-match order, duplicates
    /// suppressed.
    pub fn col_search(&self, query: &[u8]) -> Vec<InternalKey> {
        self.metrics.record_search();
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        self.search_impl(query, |key| {
            if seen.insert(key) {
                results.push(key);
            }
        });
        results
    }

    /// Logically delete a key.
    ///
    /// Returns `false` if the key was already deleted or not yet assigned.
    pub fn delete(&self, key: InternalKey) -> bool {
        let reserved = self.tails.reserve(DEL_INCR);
        let mut deleted = false;
        if key < reserved.key().min(self.config.max_keys)
            && u64::from(reserved.offset()) + 1 < u64::from(self.config.log_capacity)
        {
            deleted = self.tombstones.mark(key, reserved.offset() + 1);
        }
        // The sentinel byte is published even when the tombstone CAS lost;
        // an unpublished reservation would stall every later publication.
        self.tails.publish(reserved, DEL_INCR);
        if deleted {
            self.metrics.record_delete();
            trace!(key, "deleted record");
        } else {
            self.metrics.record_delete_conflict();
        }
        deleted
    }

    /// Replace a record: append the new payload, then invalidate the old
    /// key. Returns the new payload's internal key.
    pub fn update(&self, key: InternalKey, payload: &[u8]) -> Result<InternalKey> {
        let (reserved, increment) = self.append_inner(payload)?;
        // Invalidate the old key with the new record's start offset; the
        // outcome is deliberately ignored (the old key may already be gone).
        if key < reserved.key().min(self.config.max_keys) {
            let _ = self.tombstones.mark(key, reserved.offset() + 1);
        }
        self.tails.publish(reserved, increment);
        self.metrics.record_update();
        trace!(old = key, new = reserved.key(), "updated record");
        Ok(reserved.key())
    }

    /// Number of published internal keys
    pub fn num_keys(&self) -> u32 {
        self.tails.snapshot().key()
    }

    /// Published size of the data log in bytes
    pub fn size(&self) -> u32 {
        self.tails.snapshot().offset()
    }

    /// Distance between the reservation and publication cursors. Not
    /// atomic; diagnostic only.
    pub fn gap(&self) -> u64 {
        self.tails.gap()
    }

    /// Snapshot of the published state
    pub fn stats(&self) -> StoreStats {
        let snapshot = self.tails.snapshot();
        StoreStats {
            num_keys: snapshot.key(),
            size_bytes: snapshot.offset(),
            reservation_gap: self.tails.gap(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Reserve, register, copy and index a payload without publishing.
    ///
    /// A bounds-failed reservation is still published, as a tombstoned
    /// hole, so later publications can proceed.
    fn append_inner(&self, payload: &[u8]) -> Result<(TailWord, u64)> {
        if payload.is_empty() {
            return Err(Error::InvalidPayload {
                message: "payload must be non-empty".to_string(),
            });
        }
        if payload.len() as u64 >= u64::from(self.config.log_capacity) {
            return Err(Error::InvalidPayload {
                message: format!("payload of {} bytes cannot fit the data log", payload.len()),
            });
        }
        let len = payload.len() as u32;
        let increment = append_increment(len);
        let reserved = self.tails.reserve(increment);
        let key = reserved.key();
        let offset = reserved.offset();

        if key >= self.config.max_keys {
            self.seal_hole(reserved, increment);
            self.metrics.record_append_error();
            warn!(key, "append rejected: key space exhausted");
            return Err(Error::CapacityExceeded {
                resource: "internal keys",
                limit: u64::from(self.config.max_keys),
            });
        }
        if u64::from(offset) + u64::from(len) >= u64::from(self.config.log_capacity) {
            self.seal_hole(reserved, increment);
            self.metrics.record_append_error();
            warn!(key, offset, len, "append rejected: data log full");
            return Err(Error::CapacityExceeded {
                resource: "log bytes",
                limit: u64::from(self.config.log_capacity),
            });
        }

        // Uncontested until publication: this writer owns the key's slots
        // and the reserved byte range.
        self.records.set(key, offset, len);
        self.tombstones.clear(key);
        self.log.write(offset as usize, payload);
        self.index_payload(offset, payload);
        Ok((reserved, increment))
    }

    /// Publish a bounds-failed reservation as a tombstoned hole so readers
    /// see `NotFound` instead of unwritten bytes.
    ///
    /// A reservation rejected for being past the key space has no slot to
    /// seal; its key increment is stripped before publication so the
    /// published key count never exceeds `max_keys`.
    fn seal_hole(&self, reserved: TailWord, increment: u64) {
        let key = reserved.key();
        let increment = if key < self.config.max_keys {
            self.records.set(key, reserved.offset(), 0);
            self.tombstones.seal(key, reserved.offset().wrapping_add(1));
            increment
        } else {
            strip_key_increment(increment)
        };
        self.tails.publish(reserved, increment);
    }

    fn index_payload(&self, offset: u32, payload: &[u8]) {
        for (i, gram) in payload.windows(GRAM_WIDTH).enumerate() {
            self.grams.record(gram, offset + i as u32);
        }
    }

    fn search_impl<F: FnMut(InternalKey)>(&self, query: &[u8], mut emit: F) {
        let snapshot = self.tails.snapshot();
        if query.is_empty() || snapshot.key() == 0 {
            return;
        }
        if query.len() < GRAM_WIDTH {
            self.metrics.record_scan_fallback();
            self.scan_search(query, snapshot, &mut emit);
            return;
        }

        let Some(head) = self.grams.posting(&query[..GRAM_WIDTH]) else {
            return;
        };
        let Some(tail) = self.grams.posting(&query[query.len() - GRAM_WIDTH..]) else {
            return;
        };

        let max_off = snapshot.offset();
        if head.len() <= tail.len() {
            // Drive on the rarer head gram: a posting offset is a candidate
            // match start.
            for i in 0..head.len() {
                let start = head.get(i);
                if start < max_off {
                    self.try_candidate(start, query, snapshot, &mut emit);
                }
            }
        } else {
            // Drive on the rarer tail gram: back the offset up to the
            // candidate match start.
            let lead = (query.len() - GRAM_WIDTH) as u32;
            for i in 0..tail.len() {
                let off = tail.get(i);
                if off < max_off && off >= lead {
                    self.try_candidate(off - lead, query, snapshot, &mut emit);
                }
            }
        }
    }

    /// Verify that `query` occurs at `start` wholly inside one live record
    /// visible in `snapshot`, and emit the owning key if so.
    fn try_candidate<F: FnMut(InternalKey)>(
        &self,
        start: u32,
        query: &[u8],
        snapshot: TailWord,
        emit: &mut F,
    ) {
        let end = u64::from(start) + query.len() as u64;
        if end > u64::from(snapshot.offset()) {
            return;
        }
        let Some(key) = self.resolve_key(start, snapshot) else {
            return;
        };
        let (rec_start, rec_len) = self.records.bounds(key);
        if end > u64::from(rec_start) + u64::from(rec_len) {
            return;
        }
        let start = start as usize;
        if self.log.slice(start..start + query.len()) == query {
            emit(key);
        }
    }

    /// Binary search the value offsets for the record containing `offset`,
    /// dropping it if tombstoned relative to the snapshot.
    fn resolve_key(&self, offset: u32, snapshot: TailWord) -> Option<InternalKey> {
        let mut lo = 0u32;
        let mut hi = snapshot.key().min(self.config.max_keys);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.records.offset(mid) <= offset {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo == 0 {
            return None;
        }
        let key = lo - 1;
        let mark = self.tombstones.get(key);
        if mark != 0 && snapshot.offset() >= mark {
            return None;
        }
        Some(key)
    }

    /// Exhaustive scan of the published prefix, for queries shorter than
    /// the gram width.
    fn scan_search<F: FnMut(InternalKey)>(&self, query: &[u8], snapshot: TailWord, emit: &mut F) {
        let published = (snapshot.offset() as usize).min(self.log.capacity());
        let hay = self.log.slice(0..published);
        if hay.len() < query.len() {
            return;
        }
        for start in 0..=(hay.len() - query.len()) {
            if &hay[start..start + query.len()] == query {
                self.try_candidate(start as u32, query, snapshot, emit);
            }
        }
    }
}
