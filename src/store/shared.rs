//! Thread-safe store
//!
//! `Store` wrapped in a parking_lot RwLock.

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::Result;

use super::{Store, StoreStats};

/// A `Store` that can be shared across threads
///
/// ## Concurrency:
/// - `set`/`try_set`: exclusive write lock, one writer at a time
/// - `get`/`has`/counters: shared read lock, concurrent with each other
/// - All methods use `&self`; share with `Arc<SharedStore<T>>`
#[derive(Debug)]
pub struct SharedStore<T> {
    inner: RwLock<Store<T>>,
}

impl<T> SharedStore<T> {
    /// Create an empty shared store with the default configuration
    pub fn new() -> Self {
        Self::from_store(Store::new())
    }

    /// Create an empty shared store with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::from_store(Store::with_config(config)?))
    }

    /// Wrap an existing store
    pub fn from_store(store: Store<T>) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    /// Write `values` at `offset` (write lock)
    ///
    /// # Panics
    ///
    /// Panics if `offset + values.len()` overflows `usize`.
    pub fn set(&self, offset: usize, values: impl Into<Vec<T>>) {
        self.inner.write().set(offset, values);
    }

    /// Write `values` at `offset`, failing on an overflowing range (write lock)
    pub fn try_set(&self, offset: usize, values: impl Into<Vec<T>>) -> Result<()> {
        self.inner.write().try_set(offset, values)
    }

    /// Check whether `[offset, offset + len)` is fully written (read lock)
    pub fn has(&self, offset: usize, len: usize) -> bool {
        self.inner.read().has(offset, len)
    }

    /// Values physically held
    pub fn occupancy(&self) -> usize {
        self.inner.read().occupancy()
    }

    /// Logical size
    pub fn length(&self) -> usize {
        self.inner.read().length()
    }

    /// Number of physical segments
    pub fn segment_count(&self) -> usize {
        self.inner.read().segment_count()
    }

    /// Snapshot of the counters, taken under one lock
    pub fn stats(&self) -> StoreStats {
        self.inner.read().stats()
    }

    /// Unwrap the store
    pub fn into_inner(self) -> Store<T> {
        self.inner.into_inner()
    }
}

impl<T: Clone> SharedStore<T> {
    /// Copy stored values into `buf` and report completeness (read lock)
    pub fn get(&self, offset: usize, buf: &mut [T]) -> bool {
        self.inner.read().get(offset, buf)
    }
}

impl<T> Default for SharedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Store<T>> for SharedStore<T> {
    fn from(store: Store<T>) -> Self {
        Self::from_store(store)
    }
}
