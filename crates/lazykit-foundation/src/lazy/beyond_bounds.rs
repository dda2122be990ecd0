//! Beyond-bounds item ranges.
//!
//! Items outside the visible window sometimes have to be realized anyway:
//! a fixed per-pass prefetch count, and retention intervals declared by the
//! host (focus traversal, accessibility). Both demand sources are merged
//! here into the auxiliary item lists measured before and after the
//! visible window; they never affect the scroll consumption math.

use crate::anchor::ItemIndex;
use crate::item_measurer::ItemMeasurer;
use crate::measured_item::MeasuredItem;

/// An inclusive index interval the host wants kept realized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeyondBoundsInterval {
    pub start: usize,
    pub end: usize,
}

/// Externally-declared retention intervals for a lazy list.
#[derive(Debug, Default)]
pub struct BeyondBoundsInfo {
    intervals: Vec<BeyondBoundsInterval>,
}

impl BeyondBoundsInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an interval. Panics if `start > end`.
    pub fn add_interval(&mut self, start: usize, end: usize) -> BeyondBoundsInterval {
        assert!(start <= end, "interval start {start} is after end {end}");
        let interval = BeyondBoundsInterval { start, end };
        self.intervals.push(interval);
        interval
    }

    /// Removes one occurrence of a previously added interval.
    pub fn remove_interval(&mut self, interval: BeyondBoundsInterval) {
        if let Some(position) = self.intervals.iter().position(|&i| i == interval) {
            self.intervals.remove(position);
        }
    }

    /// Returns true if any interval is declared.
    pub fn has_intervals(&self) -> bool {
        !self.intervals.is_empty()
    }

    /// Smallest declared start. Only meaningful when [`Self::has_intervals`].
    pub fn start(&self) -> usize {
        self.intervals
            .iter()
            .map(|interval| interval.start)
            .min()
            .unwrap_or(0)
    }

    /// Largest declared end. Only meaningful when [`Self::has_intervals`].
    pub fn end(&self) -> usize {
        self.intervals
            .iter()
            .map(|interval| interval.end)
            .max()
            .unwrap_or(0)
    }
}

/// Measures the auxiliary items after the visible window.
///
/// When both the fixed count and a declared interval demand items past the
/// last visible one, the measured range is their contiguous union so no
/// index is realized twice.
pub(crate) fn items_after_list<M: ItemMeasurer>(
    beyond_bounds: &BeyondBoundsInfo,
    last_visible_index: usize,
    measurer: &mut M,
    items_count: usize,
    beyond_bounds_item_count: usize,
) -> Vec<MeasuredItem> {
    let non_visible = if beyond_bounds_item_count != 0
        && last_visible_index + beyond_bounds_item_count <= items_count - 1
    {
        Some((
            last_visible_index,
            last_visible_index + beyond_bounds_item_count,
        ))
    } else {
        None
    };

    let declared = if beyond_bounds.has_intervals()
        && last_visible_index < beyond_bounds.end().min(items_count - 1)
    {
        let start = (last_visible_index + beyond_bounds_item_count).min(items_count - 1);
        let end = (beyond_bounds.end().min(items_count - 1) + beyond_bounds_item_count)
            .min(items_count - 1);
        Some((start, end))
    } else {
        None
    };

    match (non_visible, declared) {
        (Some((start, _)), Some((_, end))) => add_items_after(start, end, measurer),
        (Some((start, end)), None) => add_items_after(start, end, measurer),
        (None, Some((start, end))) => add_items_after(start, end, measurer),
        (None, None) => Vec::new(),
    }
}

/// Measures the auxiliary items before the visible window, closest first.
pub(crate) fn items_before_list<M: ItemMeasurer>(
    beyond_bounds: &BeyondBoundsInfo,
    first_visible_index: usize,
    measurer: &mut M,
    items_count: usize,
    beyond_bounds_item_count: usize,
) -> Vec<MeasuredItem> {
    let non_visible = if beyond_bounds_item_count != 0 && first_visible_index > beyond_bounds_item_count
    {
        Some((
            first_visible_index - 1,
            first_visible_index - beyond_bounds_item_count,
        ))
    } else {
        None
    };

    let declared = if beyond_bounds.has_intervals()
        && first_visible_index > beyond_bounds.start().min(items_count - 1)
    {
        let start = first_visible_index.saturating_sub(beyond_bounds_item_count + 1);
        let end = beyond_bounds
            .start()
            .min(items_count - 1)
            .saturating_sub(beyond_bounds_item_count);
        Some((start, end))
    } else {
        None
    };

    match (non_visible, declared) {
        (Some((start, _)), Some((_, end))) => add_items_before(start, end, measurer),
        (Some((start, end)), None) => add_items_before(start, end, measurer),
        (None, Some((start, end))) => add_items_before(start, end, measurer),
        (None, None) => Vec::new(),
    }
}

fn add_items_after<M: ItemMeasurer>(
    start_index: usize,
    end_index: usize,
    measurer: &mut M,
) -> Vec<MeasuredItem> {
    (start_index..end_index)
        .map(|index| measurer.measure(ItemIndex::new(index + 1)))
        .collect()
}

fn add_items_before<M: ItemMeasurer>(
    start_index: usize,
    end_index: usize,
    measurer: &mut M,
) -> Vec<MeasuredItem> {
    (end_index..=start_index)
        .rev()
        .map(|index| measurer.measure(ItemIndex::new(index)))
        .collect()
}
