//! Parser configuration.

/// Default number of numeric leaves reserved per slab block.
pub const DEFAULT_NUMBER_SLAB_CAPACITY: usize = 4096;

/// Default maximum nesting depth of maps and lists.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling allocation and limits for a single parse.
///
/// ```
/// use syml_core::{Document, ParseOptions};
///
/// let options = ParseOptions::default().with_number_slab_capacity(64);
/// let doc = Document::parse_with("nums: [1, 2, 3]\n", &options).unwrap();
/// assert_eq!(doc.root().key("nums").unwrap().len().unwrap(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Numbers reserved per slab block.
    pub number_slab_capacity: usize,
    /// Maximum nesting depth before parsing fails with `TooDeep`.
    pub max_depth: usize,
}

impl ParseOptions {
    /// Set the number slab block size (clamped to at least 1).
    pub fn with_number_slab_capacity(mut self, capacity: usize) -> Self {
        self.number_slab_capacity = capacity.max(1);
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            number_slab_capacity: DEFAULT_NUMBER_SLAB_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
