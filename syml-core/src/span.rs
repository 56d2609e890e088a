//! Zero-copy text spans into a document's source buffer.

use std::cmp::Ordering;
use std::ops::Range;

/// A `(offset, length)` reference into the source buffer.
///
/// This is 8 bytes: start (u32) + len (u32). It carries no pointer, so it
/// can only be turned into text together with the buffer it was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    len: u32,
}

impl Span {
    /// Create a span from a byte range.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start: start as u32,
            len: (end - start) as u32,
        }
    }

    /// Byte offset of the first byte.
    #[inline]
    pub fn start(&self) -> usize {
        self.start as usize
    }

    /// Byte offset one past the last byte.
    #[inline]
    pub fn end(&self) -> usize {
        self.start as usize + self.len as usize
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Resolve the span against the buffer it was taken from.
    #[inline]
    pub fn resolve<'s>(&self, source: &'s [u8]) -> &'s [u8] {
        &source[self.range()]
    }

    /// Total order used for key identity: shorter spans sort first, equal
    /// lengths compare by byte content.
    pub fn compare(&self, other: &Span, source: &[u8]) -> Ordering {
        self.len
            .cmp(&other.len)
            .then_with(|| self.resolve(source).cmp(other.resolve(source)))
    }

    /// Byte-content equality against an arbitrary key.
    #[inline]
    pub fn matches(&self, source: &[u8], key: &[u8]) -> bool {
        self.len() == key.len() && self.resolve(source) == key
    }
}
