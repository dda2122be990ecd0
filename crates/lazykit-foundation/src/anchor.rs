//! Scroll anchor value types.
//!
//! The scroll position of a lazy layout is described by the pair of the
//! first visible item index and the pixel offset the item is scrolled past
//! its leading edge. Both carry non-negativity invariants, so they are
//! modeled as validated value types instead of raw integers.

/// Zero-based logical position of an item in the data set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Wraps a zero-based index.
    #[inline]
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    /// Returns the raw index value.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Scroll position of a lazy list: the first visible item plus the amount
/// of pixels it is scrolled past its leading edge.
///
/// The offset is never negative once a measure pass completes; the
/// constructor enforces that so a violated invariant fails at construction
/// time rather than several passes later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollAnchor {
    index: ItemIndex,
    offset: i32,
}

impl ScrollAnchor {
    /// Creates an anchor. Panics if `offset` is negative.
    pub fn new(index: ItemIndex, offset: i32) -> Self {
        assert!(offset >= 0, "scroll offset must be non-negative, got {offset}");
        Self { index, offset }
    }

    /// The anchor at the very start of the list.
    pub fn zero() -> Self {
        Self {
            index: ItemIndex::new(0),
            offset: 0,
        }
    }

    /// Index of the first visible item.
    #[inline]
    pub fn index(self) -> ItemIndex {
        self.index
    }

    /// Pixels the first visible item is scrolled past its leading edge.
    #[inline]
    pub fn offset(self) -> i32 {
        self.offset
    }
}

impl Default for ScrollAnchor {
    fn default() -> Self {
        Self::zero()
    }
}
