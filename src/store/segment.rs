//! Segment
//!
//! One contiguous run of stored values.

/// A run of values starting at a logical offset
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Segment<T> {
    /// Logical start position
    pub offset: usize,

    /// Write sequence number; the larger one wins an overlap
    pub order: u64,

    /// Owned values covering `[offset, offset + data.len())`
    pub data: Vec<T>,
}

impl<T> Segment<T> {
    pub fn new(offset: usize, order: u64, data: Vec<T>) -> Self {
        Self { offset, order, data }
    }

    /// Number of values held
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// End offset (exclusive)
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.data.len()
    }

    /// Drop everything from `at` (a logical offset) onward.
    pub fn truncate_end(&mut self, at: usize) {
        debug_assert!(at >= self.offset && at <= self.end());
        self.data.truncate(at - self.offset);
    }

    /// Drop everything before `at` (a logical offset).
    pub fn truncate_start(&mut self, at: usize) {
        debug_assert!(at >= self.offset && at <= self.end());
        self.data.drain(..at - self.offset);
        self.offset = at;
    }

    /// Overwrite the values under `inner`, which must lie within this segment.
    pub fn overwrite_with(&mut self, inner: Segment<T>) {
        debug_assert!(inner.offset >= self.offset && inner.end() <= self.end());
        let start = inner.offset - self.offset;
        for (dst, src) in self.data[start..].iter_mut().zip(inner.data) {
            *dst = src;
        }
    }

    /// Append the touching segment `next` to this one.
    pub fn absorb(&mut self, next: Segment<T>) {
        debug_assert_eq!(self.end(), next.offset);
        self.data.reserve_exact(next.data.len());
        self.data.extend(next.data);
        self.order = self.order.max(next.order);
    }
}
