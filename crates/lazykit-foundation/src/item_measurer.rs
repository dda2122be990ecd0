//! Item measurement capability supplied by the host.

use std::ops::Range;

use crate::anchor::ItemIndex;
use crate::measured_item::MeasuredItem;

/// Realizes items of the data set into sized boxes on demand.
///
/// Implementations must be pure with respect to a single measure pass:
/// measuring the same index twice within one pass yields consistent sizes.
/// Measuring is also expected to be safe for indices that end up outside
/// the visible window (prefetch and retention ranges rely on that).
/// The callback must return synchronously; blocking on I/O or asynchronous
/// work inside a measure pass is a host defect.
pub trait ItemMeasurer {
    /// Realizes and measures the item at `index`.
    fn measure(&mut self, index: ItemIndex) -> MeasuredItem;

    /// Returns the stable key for the item at `index`.
    ///
    /// Keys keep the scroll position attached to the same logical item when
    /// the data set changes. Defaults to the index itself.
    fn key_for(&self, index: ItemIndex) -> u64 {
        index.get() as u64
    }

    /// Finds the index currently holding `key`, searching only `search`.
    ///
    /// Returns `None` if the key is not present in the searched range.
    fn index_of_key(&self, key: u64, search: Range<usize>) -> Option<ItemIndex> {
        search
            .map(ItemIndex::new)
            .find(|&index| self.key_for(index) == key)
    }
}

impl<F> ItemMeasurer for F
where
    F: FnMut(ItemIndex) -> MeasuredItem,
{
    fn measure(&mut self, index: ItemIndex) -> MeasuredItem {
        self(index)
    }
}
