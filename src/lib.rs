//! # SparseStore
//!
//! A sparse, offset-addressable buffer:
//! - Writes land at any offset, in any order, possibly overlapping
//! - Later writes win over earlier ones where they overlap
//! - Only written ranges are held in memory
//! - Reads report whether the requested range is complete
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 SharedStore (optional)                       │
//! │              (RwLock: one writer, many readers)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                 │
//! │          set ──► insert ──► compact (merge / trim)           │
//! │          get / has ──► scan from first overlapping segment   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┬──────────────┐
//!          ▼                         ▼              ▼
//!   ┌─────────────┐          ┌─────────────┐  ┌─────────────┐
//!   │  Segment    │   gap    │  Segment    │  │  Segment    │
//!   │ [0, 4096)   │ ──────── │[8192,12288) │  │   ...       │
//!   └─────────────┘          └─────────────┘  └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sparsestore::Store;
//!
//! let mut store = Store::<u8>::new();
//! store.set(0, vec![0, 1, 2]);
//! store.set(4, vec![4]);
//!
//! let mut buf = [0u8; 5];
//! assert!(!store.get(0, &mut buf));
//! assert_eq!(buf, [0, 1, 2, 0, 4]);
//!
//! store.set(3, vec![3]);
//! assert!(store.has(0, 5));
//! assert_eq!(store.occupancy(), 5);
//! assert_eq!(store.length(), 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SparseError, Result};
pub use config::{Config, DEFAULT_MIN_CONTIGUOUS};
pub use store::{SharedStore, Store, StoreStats};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SparseStore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
