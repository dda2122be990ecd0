//! Measured line representation for lazy grids.
//!
//! Grids scroll whole cross-axis lines at a time: the unit of measurement
//! is a line holding one or more items, each already resolved to a
//! cross-axis slot by the host's span logic.

use lazykit_layout::Axis;

use crate::anchor::ItemIndex;
use crate::measured_item::{MeasuredItem, PositionedItem};

/// Zero-based position of a line in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineIndex(usize);

impl LineIndex {
    /// Wraps a zero-based line index.
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

/// Scroll position of a lazy grid: the first visible line plus the amount
/// of pixels it is scrolled past its leading edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridScrollAnchor {
    line: LineIndex,
    offset: i32,
}

impl GridScrollAnchor {
    /// Creates an anchor. Panics if `offset` is negative.
    pub fn new(line: LineIndex, offset: i32) -> Self {
        assert!(offset >= 0, "scroll offset must be non-negative, got {offset}");
        Self { line, offset }
    }

    /// The anchor at the very start of the grid.
    pub fn zero() -> Self {
        Self {
            line: LineIndex::new(0),
            offset: 0,
        }
    }

    /// Index of the first visible line.
    #[inline]
    pub fn line(self) -> LineIndex {
        self.line
    }

    /// Pixels the first visible line is scrolled past its leading edge.
    #[inline]
    pub fn offset(self) -> i32 {
        self.offset
    }
}

impl Default for GridScrollAnchor {
    fn default() -> Self {
        Self::zero()
    }
}

/// Realizes whole grid lines into measured boxes on demand.
///
/// Which item indices make up a line, and which cross-axis slot each item
/// occupies, is the host's span logic. A line index past the end of the
/// data set must yield an empty line; that is how the measurer learns the
/// sequence is exhausted.
pub trait LineMeasurer {
    /// Realizes and measures the line at `index`.
    fn measure_line(&mut self, index: LineIndex) -> MeasuredLine;
}

impl<F> LineMeasurer for F
where
    F: FnMut(LineIndex) -> MeasuredLine,
{
    fn measure_line(&mut self, index: LineIndex) -> MeasuredLine {
        self(index)
    }
}

/// A measured grid line: its items plus their cross-axis slots.
///
/// The line's main-axis size is the largest item size in it; the size
/// including spacing is floored at zero like for list items.
#[derive(Clone, Debug)]
pub struct MeasuredLine {
    index: LineIndex,
    items: Vec<MeasuredItem>,
    cross_axis_offsets: Vec<i32>,
    main_axis_size: i32,
    main_axis_size_with_spacings: i32,
}

impl MeasuredLine {
    /// Creates a measured line. `items` and `cross_axis_offsets` pair up
    /// positionally. `space_between_lines` may be negative.
    pub fn new(
        index: LineIndex,
        items: Vec<MeasuredItem>,
        cross_axis_offsets: Vec<i32>,
        space_between_lines: i32,
    ) -> Self {
        assert_eq!(
            items.len(),
            cross_axis_offsets.len(),
            "every item needs a cross-axis slot"
        );
        let main_axis_size = items
            .iter()
            .map(MeasuredItem::main_axis_size)
            .max()
            .unwrap_or(0);
        Self {
            index,
            items,
            cross_axis_offsets,
            main_axis_size,
            main_axis_size_with_spacings: (main_axis_size + space_between_lines).max(0),
        }
    }

    /// A line with no items, signalling the end of the data set.
    pub fn empty(index: LineIndex) -> Self {
        Self::new(index, Vec::new(), Vec::new(), 0)
    }

    /// Index of this line in the grid.
    #[inline]
    pub fn index(&self) -> LineIndex {
        self.index
    }

    /// The items in this line.
    #[inline]
    pub fn items(&self) -> &[MeasuredItem] {
        &self.items
    }

    /// Returns true when the line holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the line's last item, if any.
    pub fn last_item_index(&self) -> Option<ItemIndex> {
        self.items.last().map(MeasuredItem::index)
    }

    /// Size in the main axis (largest item in the line).
    #[inline]
    pub fn main_axis_size(&self) -> i32 {
        self.main_axis_size
    }

    /// Main-axis size including the inter-line spacing, never negative.
    #[inline]
    pub fn main_axis_size_with_spacings(&self) -> i32 {
        self.main_axis_size_with_spacings
    }

    /// Resolves every item in the line to its final placement.
    pub fn position(
        &self,
        main_axis_offset: i32,
        layout_width: i32,
        layout_height: i32,
        axis: Axis,
        reverse_layout: bool,
    ) -> Vec<PositionedItem> {
        self.items
            .iter()
            .zip(&self.cross_axis_offsets)
            .map(|(item, &cross_axis_offset)| {
                item.position(
                    main_axis_offset,
                    cross_axis_offset,
                    layout_width,
                    layout_height,
                    axis,
                    reverse_layout,
                )
            })
            .collect()
    }
}
