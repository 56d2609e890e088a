//! Bump-allocated slabs for fixed-size leaf records.
//!
//! Numbers are by far the most common node in numeric-heavy documents, so
//! they are not allocated one by one. A [`Slab`] reserves a whole block up
//! front and hands out slots by bumping an index; when a block fills a new
//! one is appended. Nothing is freed individually: all blocks go away when
//! the slab (and with it the owning document) is dropped.
//!
//! Slots are addressed by [`SlabIndex`] rather than by address, so growing
//! the slab never invalidates an index that was handed out earlier.

/// Index of a slot within a [`Slab`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlabIndex(u32);

impl SlabIndex {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        SlabIndex(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Growable list of fixed-capacity blocks.
#[derive(Debug)]
pub struct Slab<T> {
    /// Every block except possibly the last holds exactly `block_capacity` items
    blocks: Vec<Vec<T>>,
    block_capacity: usize,
    len: usize,
}

impl<T: Copy> Slab<T> {
    /// Create a slab whose blocks each hold `block_capacity` items.
    ///
    /// The first block is reserved lazily, on the first allocation.
    pub fn new(block_capacity: usize) -> Self {
        Self {
            blocks: Vec::new(),
            block_capacity: block_capacity.max(1),
            len: 0,
        }
    }

    /// Store `value`, returning its slot index.
    #[inline]
    pub fn alloc(&mut self, value: T) -> SlabIndex {
        let needs_block = match self.blocks.last() {
            Some(block) => block.len() == self.block_capacity,
            None => true,
        };
        if needs_block {
            self.grow();
        }
        let index = SlabIndex::new(self.len);
        // grow() guarantees a last block with room
        if let Some(block) = self.blocks.last_mut() {
            block.push(value);
        }
        self.len += 1;
        index
    }

    #[cold]
    fn grow(&mut self) {
        if !self.blocks.is_empty() {
            log::trace!(
                "slab: block {} full, reserving {} more slots",
                self.blocks.len(),
                self.block_capacity
            );
        }
        self.blocks.push(Vec::with_capacity(self.block_capacity));
    }

    /// Get the value in a slot.
    #[inline]
    pub fn get(&self, index: SlabIndex) -> Option<T> {
        let i = index.index();
        self.blocks
            .get(i / self.block_capacity)
            .and_then(|block| block.get(i % self.block_capacity))
            .copied()
    }

    /// Number of values allocated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of blocks currently reserved.
    pub fn blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Capacity of each block.
    pub fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    /// Iterate over all values in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.blocks.iter().flat_map(|block| block.iter().copied())
    }
}
