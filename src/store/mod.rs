//! Store Module
//!
//! Sparse, offset-addressable storage for out-of-order writes.
//!
//! ## Responsibilities
//! - Accept writes at arbitrary offsets, later writes overriding earlier ones
//! - Keep only the written ranges in memory, as sorted segments
//! - Answer "is `[offset, offset + len)` fully written?" without copying
//! - Copy the written portions of a range into a caller buffer
//!
//! ## Data Structure Choice
//! A `Vec` of owned segments, sorted by offset:
//! - Binary search to place writes and to skip segments before a read
//! - Compaction after each write keeps segments disjoint, and merges small
//!   touching segments so the count stays bounded
//! - Single-threaded core; `SharedStore` adds an RwLock on top

mod segment;
mod shared;
mod sparse;

pub use shared::SharedStore;
pub use sparse::Store;

/// Snapshot of a store's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Logical size: highest `offset + len` ever written
    pub length: usize,

    /// Values physically held across all segments
    pub occupancy: usize,

    /// Number of physical segments
    pub segments: usize,

    /// Number of non-empty writes applied
    pub writes: u64,
}
