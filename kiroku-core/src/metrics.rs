//! # Metrics and Monitoring
//!
//! Provides metrics collection for monitoring KirokuDB.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

struct MetricsInner {
    // Write metrics
    appends: AtomicU64,
    bytes_appended: AtomicU64,
    append_errors: AtomicU64,
    deletes: AtomicU64,
    delete_conflicts: AtomicU64,
    updates: AtomicU64,

    // Read metrics
    gets: AtomicU64,
    get_misses: AtomicU64,
    searches: AtomicU64,
    scan_fallbacks: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                appends: AtomicU64::new(0),
                bytes_appended: AtomicU64::new(0),
                append_errors: AtomicU64::new(0),
                deletes: AtomicU64::new(0),
                delete_conflicts: AtomicU64::new(0),
                updates: AtomicU64::new(0),
                gets: AtomicU64::new(0),
                get_misses: AtomicU64::new(0),
                searches: AtomicU64::new(0),
                scan_fallbacks: AtomicU64::new(0),
            }),
        }
    }

    /// Record a successful append
    pub fn record_append(&self, bytes: u64) {
        self.inner.appends.fetch_add(1, Ordering::Relaxed);
        self.inner.bytes_appended.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a failed append reservation
    pub fn record_append_error(&self) {
        self.inner.append_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful delete
    pub fn record_delete(&self) {
        self.inner.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delete that lost to an earlier tombstone or missing key
    pub fn record_delete_conflict(&self) {
        self.inner.delete_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an update
    pub fn record_update(&self) {
        self.inner.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a point lookup
    pub fn record_get(&self) {
        self.inner.gets.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a point lookup miss
    pub fn record_get_miss(&self) {
        self.inner.get_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a substring search
    pub fn record_search(&self) {
        self.inner.searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a search that fell back to a full log scan
    pub fn record_scan_fallback(&self) {
        self.inner.scan_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            appends: self.inner.appends.load(Ordering::Relaxed),
            bytes_appended: self.inner.bytes_appended.load(Ordering::Relaxed),
            append_errors: self.inner.append_errors.load(Ordering::Relaxed),
            deletes: self.inner.deletes.load(Ordering::Relaxed),
            delete_conflicts: self.inner.delete_conflicts.load(Ordering::Relaxed),
            updates: self.inner.updates.load(Ordering::Relaxed),
            gets: self.inner.gets.load(Ordering::Relaxed),
            get_misses: self.inner.get_misses.load(Ordering::Relaxed),
            searches: self.inner.searches.load(Ordering::Relaxed),
            scan_fallbacks: self.inner.scan_fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub appends: u64,
    pub bytes_appended: u64,
    pub append_errors: u64,
    pub deletes: u64,
    pub delete_conflicts: u64,
    pub updates: u64,
    pub gets: u64,
    pub get_misses: u64,
    pub searches: u64,
    pub scan_fallbacks: u64,
}
