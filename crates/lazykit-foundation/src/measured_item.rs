//! Measured and positioned item representations.
//!
//! A [`MeasuredItem`] is the result of asking the host to realize one item
//! into a sized box; a [`PositionedItem`] additionally carries the final
//! placement coordinates produced at the end of a measure pass.

use lazykit_layout::Axis;
use smallvec::SmallVec;

use crate::anchor::ItemIndex;

/// Inline capacity for realized-content handles.
/// Most items realize into one or two host boxes, so 4 avoids heap
/// allocation in the common case while keeping stack size reasonable.
pub type SmallHandleVec = SmallVec<[u64; 4]>;

/// A measured item in a lazy layout.
///
/// Sizes are whole pixels. `size_with_spacings` is the main-axis footprint
/// the item occupies in the scroll run: its size plus the inter-item
/// spacing, floored at zero so a large negative spacing can never make an
/// item consume negative room.
#[derive(Clone, Debug)]
pub struct MeasuredItem {
    index: ItemIndex,
    key: u64,
    main_axis_size: i32,
    cross_axis_size: i32,
    size_with_spacings: i32,
    handles: SmallHandleVec,
}

impl MeasuredItem {
    /// Creates a measured item. `space_between_items` may be negative.
    pub fn new(
        index: ItemIndex,
        key: u64,
        main_axis_size: i32,
        cross_axis_size: i32,
        space_between_items: i32,
    ) -> Self {
        Self {
            index,
            key,
            main_axis_size,
            cross_axis_size,
            size_with_spacings: (main_axis_size + space_between_items).max(0),
            handles: SmallVec::new(),
        }
    }

    /// Attaches opaque handles to the realized host content.
    ///
    /// The handles travel with the item through positioning and come back
    /// to the host with every placement command, so an emitter can address
    /// the boxes it realized without a side table.
    pub fn with_handles(mut self, handles: impl IntoIterator<Item = u64>) -> Self {
        self.handles.extend(handles);
        self
    }

    /// Index in the data set.
    #[inline]
    pub fn index(&self) -> ItemIndex {
        self.index
    }

    /// Stable key for the item.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Size in the main axis.
    #[inline]
    pub fn main_axis_size(&self) -> i32 {
        self.main_axis_size
    }

    /// Size in the cross axis.
    #[inline]
    pub fn cross_axis_size(&self) -> i32 {
        self.cross_axis_size
    }

    /// Main-axis size including the inter-item spacing, never negative.
    #[inline]
    pub fn size_with_spacings(&self) -> i32 {
        self.size_with_spacings
    }

    /// Resolves the item to its final placement.
    ///
    /// `main_axis_offset` stays in logical scroll space; the physical
    /// coordinate is mirrored when the layout is reversed.
    pub fn position(
        &self,
        main_axis_offset: i32,
        cross_axis_offset: i32,
        layout_width: i32,
        layout_height: i32,
        axis: Axis,
        reverse_layout: bool,
    ) -> PositionedItem {
        let main_axis_layout_size = if axis.is_vertical() {
            layout_height
        } else {
            layout_width
        };
        let physical_main = if reverse_layout {
            main_axis_layout_size - main_axis_offset - self.main_axis_size
        } else {
            main_axis_offset
        };
        let (x, y) = if axis.is_vertical() {
            (cross_axis_offset, physical_main)
        } else {
            (physical_main, cross_axis_offset)
        };
        PositionedItem {
            index: self.index,
            key: self.key,
            offset: main_axis_offset,
            main_axis_size: self.main_axis_size,
            cross_axis_size: self.cross_axis_size,
            x,
            y,
            handles: self.handles.clone(),
        }
    }
}

/// A measured item with its final placement resolved.
#[derive(Clone, Debug)]
pub struct PositionedItem {
    /// Index in the data set.
    pub index: ItemIndex,

    /// Stable key for the item.
    pub key: u64,

    /// Logical main-axis offset in scroll space (can be negative for items
    /// composed into the leading content padding).
    pub offset: i32,

    /// Size in the main axis.
    pub main_axis_size: i32,

    /// Size in the cross axis.
    pub cross_axis_size: i32,

    /// Final horizontal placement coordinate.
    pub x: i32,

    /// Final vertical placement coordinate.
    pub y: i32,

    /// Handles to realized host content.
    pub handles: SmallHandleVec,
}
