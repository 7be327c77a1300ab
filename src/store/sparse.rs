//! Sparse store implementation
//!
//! Sorted, compacted segments with last-write-wins overlap resolution.

use crate::config::Config;
use crate::error::{range_end, Result};

use super::segment::Segment;
use super::StoreStats;

/// A sparse, offset-addressable buffer
///
/// Represents a logically contiguous array of unbounded length while only
/// holding the ranges that were written. Positions never written read back
/// as whatever the caller's buffer already held.
///
/// ## Invariants (after every operation)
/// - Segments are sorted by offset and never overlap
/// - No segment is empty
/// - `length` covers the end of every segment
/// - `occupancy` is the sum of all segment lengths
/// - Two touching segments whose combined length is at most
///   `min_contiguous` are always merged
///
/// ## Concurrency
/// None. `set` needs `&mut self`; wrap in [`super::SharedStore`] to share
/// across threads.
#[derive(Debug, Clone)]
pub struct Store<T> {
    /// Construction options (validated)
    config: Config,

    /// Stored runs, sorted by offset, disjoint
    segments: Vec<Segment<T>>,

    /// Order assigned to the next non-empty write
    next_order: u64,

    /// Values physically held
    occupancy: usize,

    /// Highest `offset + len` ever written
    length: usize,
}

impl<T> Store<T> {
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        Self::from_validated(Config::default())
    }

    /// Create an empty store with the given configuration
    ///
    /// Fails with `SparseError::Config` if `min_contiguous` is zero.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Create an empty store merging touching segments up to `entries` values
    pub fn with_min_contiguous(entries: usize) -> Result<Self> {
        Self::with_config(Config::builder().min_contiguous(entries).build())
    }

    fn from_validated(config: Config) -> Self {
        tracing::debug!(
            "Creating sparse store (min_contiguous={})",
            config.min_contiguous
        );

        Self {
            config,
            segments: Vec::new(),
            next_order: 0,
            occupancy: 0,
            length: 0,
        }
    }

    /// Write `values` at `offset`, overwriting anything already stored there
    ///
    /// Ownership of the values moves into the store. An empty write only
    /// extends `length`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + values.len()` overflows `usize`. Use
    /// [`Store::try_set`] to get an error instead.
    pub fn set(&mut self, offset: usize, values: impl Into<Vec<T>>) {
        if let Err(e) = self.try_set(offset, values) {
            panic!("{}", e);
        }
    }

    /// Write `values` at `offset`, failing on an overflowing range
    ///
    /// Steps:
    /// 1. Insert the new segment before any segment at or after `offset`
    /// 2. Grow `length` if needed
    /// 3. Add the values to `occupancy` (compaction corrects overlaps)
    /// 4. Compact
    pub fn try_set(&mut self, offset: usize, values: impl Into<Vec<T>>) -> Result<()> {
        let data = values.into();
        let end = range_end(offset, data.len())?;

        if end > self.length {
            self.length = end;
        }

        if data.is_empty() {
            return Ok(());
        }

        let written = data.len();
        let order = self.next_order;
        self.next_order += 1;

        let index = self.segments.partition_point(|seg| seg.offset < offset);
        self.segments.insert(index, Segment::new(offset, order, data));
        self.occupancy += written;

        // Pairs left of the new segment's predecessor are untouched by it.
        self.compact(index.saturating_sub(1));

        tracing::trace!(
            "set offset={} len={} order={}: {} segments, occupancy {}",
            offset,
            written,
            order,
            self.segments.len(),
            self.occupancy
        );

        Ok(())
    }

    /// Restore the invariants after an insertion, scanning pairs from `start`
    ///
    /// The comparison restarts at the same pair after every merge or removal,
    /// so cascades resolve in one pass.
    fn compact(&mut self, start: usize) {
        let min_contiguous = self.config.min_contiguous;
        let mut i = start;

        while i + 1 < self.segments.len() {
            let (cur_offset, cur_end, cur_order) = {
                let cur = &self.segments[i];
                (cur.offset, cur.end(), cur.order)
            };
            let (next_offset, next_end, next_order) = {
                let next = &self.segments[i + 1];
                (next.offset, next.end(), next.order)
            };

            if next_offset < cur_end {
                if next_end <= cur_end {
                    // Contained: keep its values only if it is newer.
                    let next = self.segments.remove(i + 1);
                    self.occupancy -= next.len();
                    if next_order > cur_order {
                        self.segments[i].overwrite_with(next);
                    }
                    continue;
                }

                // Partial overlap: cut the older one back so the pair touches.
                self.occupancy -= cur_end - next_offset;
                if cur_order < next_order {
                    self.segments[i].truncate_end(next_offset);
                    if self.segments[i].data.is_empty() {
                        self.segments.remove(i);
                    }
                    // The shrunk segment may now fit with its left neighbour.
                    i = i.saturating_sub(1);
                } else {
                    self.segments[i + 1].truncate_start(cur_end);
                }
                continue;
            }

            if cur_end == next_offset && next_end - cur_offset <= min_contiguous {
                let next = self.segments.remove(i + 1);
                self.segments[i].absorb(next);
                continue;
            }

            i += 1;
        }
    }

    /// Check whether `[offset, offset + len)` is fully written
    ///
    /// A zero-length range is always complete.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` overflows `usize`.
    pub fn has(&self, offset: usize, len: usize) -> bool {
        let end = checked_end(offset, len);

        let mut complete_to = offset;
        for seg in &self.segments[self.first_ending_after(offset)..] {
            if complete_to >= end || seg.offset > complete_to {
                break;
            }
            complete_to = seg.end();
        }

        complete_to >= end
    }

    /// Index of the first segment ending after `offset`
    ///
    /// Segments are disjoint and sorted, so their ends are sorted too.
    fn first_ending_after(&self, offset: usize) -> usize {
        self.segments.partition_point(|seg| seg.end() <= offset)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Values physically held (O(1))
    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    /// Logical size: highest `offset + len` ever written (O(1))
    pub fn length(&self) -> usize {
        self.length
    }

    /// Whether no values are held
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of physical segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Stored segments as `(offset, values)`, in offset order
    pub fn segments(&self) -> impl Iterator<Item = (usize, &[T])> + '_ {
        self.segments
            .iter()
            .map(|seg| (seg.offset, seg.data.as_slice()))
    }

    /// The merge threshold this store was built with
    pub fn min_contiguous(&self) -> usize {
        self.config.min_contiguous
    }

    /// The configuration this store was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            length: self.length,
            occupancy: self.occupancy,
            segments: self.segments.len(),
            writes: self.next_order,
        }
    }
}

impl<T: Clone> Store<T> {
    /// Copy the stored values for `[offset, offset + buf.len())` into `buf`
    ///
    /// Positions with no stored value are left as they were. Returns `true`
    /// only if the whole range is written with no gap; a gap does not stop
    /// the copy of later segments.
    ///
    /// # Panics
    ///
    /// Panics if `offset + buf.len()` overflows `usize`.
    pub fn get(&self, offset: usize, buf: &mut [T]) -> bool {
        let end = checked_end(offset, buf.len());

        let mut complete = true;
        let mut complete_to = offset;
        for seg in &self.segments[self.first_ending_after(offset)..] {
            if seg.offset >= end {
                break;
            }
            if seg.offset > complete_to {
                complete = false;
            }

            let from = seg.offset.max(offset);
            let to = seg.end().min(end);
            buf[from - offset..to - offset]
                .clone_from_slice(&seg.data[from - seg.offset..to - seg.offset]);

            complete_to = seg.end();
        }

        complete && complete_to >= end
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_end(offset: usize, len: usize) -> usize {
    match range_end(offset, len) {
        Ok(end) => end,
        Err(e) => panic!("{}", e),
    }
}
