//! Packed visited-set for flood fills.

/// One bit per snapshot cell.
///
/// A full-height region is tens of millions of cells, so the mask packs
/// 64 cells per word instead of spending a byte on each.
#[derive(Clone, Debug)]
pub struct VisitedMask {
    words: Vec<u64>,
    len: usize,
}

impl VisitedMask {
    /// A mask of `len` unvisited cells.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the mask covers no cells.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether cell `i` has been marked. Out-of-range cells read as visited.
    pub fn is_set(&self, i: usize) -> bool {
        if i >= self.len {
            return true;
        }
        self.words[i / 64] & (1 << (i % 64)) != 0
    }

    /// Mark cell `i`, returning `true` if it was not marked before.
    /// Out-of-range cells are never newly marked.
    pub fn insert(&mut self, i: usize) -> bool {
        if i >= self.len {
            return false;
        }
        let word = &mut self.words[i / 64];
        let bit = 1u64 << (i % 64);
        let fresh = *word & bit == 0;
        *word |= bit;
        fresh
    }

    /// Number of marked cells.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
