//! # Core Types
//!
//! Fundamental identifiers and statistics used throughout KirokuDB.

/// Dense 32-bit key assigned by the store to each appended record, in
/// append order starting at 0. Mapping to client-visible keys is external.
pub type InternalKey = u32;

/// Monotonically non-decreasing scalar identifying a point in a logical
/// update stream. Aggregate readers request values "as of" a version.
pub type Version = u64;

/// Snapshot of the store's published state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of published internal keys
    pub num_keys: u32,
    /// Published size of the data log in bytes
    pub size_bytes: u32,
    /// Distance between the reservation and publication cursors.
    /// Non-atomic; diagnostic only.
    pub reservation_gap: u64,
}
