//! Persisted scroll position state.
//!
//! The measurer itself is stateless between passes; the host keeps one
//! [`ScrollPosition`] per lazy list and feeds its anchor into the next
//! pass. Tracking the key of the anchored item keeps the scroll position
//! attached to the same logical item when the data set changes around it.

use std::ops::Range;

use crate::anchor::{ItemIndex, ScrollAnchor};
use crate::item_measurer::ItemMeasurer;

use super::lazy_list_measure::LazyListMeasureResult;

/// How many indices on each side of the anchor a key lookup may search.
const KEY_SEARCH_REACH: usize = 100;

/// How far the anchor may drift from the window center before the search
/// window is recentered.
const KEY_SEARCH_SLACK: usize = 30;

/// Index window that key lookups are restricted to.
///
/// The window spans [`KEY_SEARCH_REACH`] indices around the anchor and is
/// recentered only once the anchor drifts more than [`KEY_SEARCH_SLACK`]
/// indices from the last center, so consecutive passes of a slow scroll
/// see the identical range.
#[derive(Debug, Clone)]
struct KeySearchWindow {
    center: usize,
    value: Range<usize>,
}

impl KeySearchWindow {
    fn new(index: usize) -> Self {
        Self {
            center: index,
            value: Self::around(index),
        }
    }

    fn around(index: usize) -> Range<usize> {
        let start = index.saturating_sub(KEY_SEARCH_REACH);
        let end = index.saturating_add(KEY_SEARCH_REACH + 1);
        start..end
    }

    fn update(&mut self, index: usize) {
        if index.abs_diff(self.center) > KEY_SEARCH_SLACK {
            self.center = index;
            self.value = Self::around(index);
        }
    }

    fn range(&self) -> Range<usize> {
        self.value.clone()
    }
}

/// Scroll position of a lazy list, persisted between measure passes.
#[derive(Debug, Clone)]
pub struct ScrollPosition {
    anchor: ScrollAnchor,
    /// The last known key of the item the anchor points at.
    last_known_first_item_key: Option<u64>,
    key_search: KeySearchWindow,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ScrollPosition {
    /// Creates a scroll position anchored at `index` with `offset` pixels
    /// scrolled past the item's leading edge.
    pub fn new(index: usize, offset: i32) -> Self {
        Self {
            anchor: ScrollAnchor::new(ItemIndex::new(index), offset),
            last_known_first_item_key: None,
            key_search: KeySearchWindow::new(index),
        }
    }

    /// The current anchor to feed into the next measure pass.
    pub fn anchor(&self) -> ScrollAnchor {
        self.anchor
    }

    /// The index range key lookups are restricted to.
    pub fn key_search_range(&self) -> Range<usize> {
        self.key_search.range()
    }

    /// Adopts the anchor a measure pass produced.
    pub fn update_from_measure_result<T>(&mut self, result: &LazyListMeasureResult<T>) {
        self.last_known_first_item_key = result.first_visible_item_key;
        self.anchor = result.anchor;
        self.key_search.update(result.anchor.index().get());
    }

    /// Requests a programmatic scroll to `index`/`offset`.
    ///
    /// Forgets the last known key: an explicit scroll targets a position,
    /// not an item, so a later data set change must not snap back.
    pub fn request_position(&mut self, index: usize, offset: i32) {
        self.anchor = ScrollAnchor::new(ItemIndex::new(index), offset);
        self.last_known_first_item_key = None;
        self.key_search.update(index);
    }

    /// Re-anchors onto the item with the last known key after the data set
    /// changed, searching only the key-search window.
    ///
    /// Keeps the current index when the key is unknown or no longer found;
    /// the next measure pass clamps out-of-range indices on its own.
    pub fn update_if_data_set_changed<M: ItemMeasurer>(
        &mut self,
        measurer: &M,
        items_count: usize,
    ) {
        let Some(key) = self.last_known_first_item_key else {
            return;
        };
        let range = self.key_search.range();
        let search = range.start.min(items_count)..range.end.min(items_count);
        if let Some(index) = measurer.index_of_key(key, search) {
            if index != self.anchor.index() {
                log::debug!(
                    "scroll position follows key {} from index {} to {}",
                    key,
                    self.anchor.index().get(),
                    index.get()
                );
                self.anchor = ScrollAnchor::new(index, self.anchor.offset());
                self.key_search.update(index.get());
            }
        }
    }
}
