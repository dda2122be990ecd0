//! Prefetch planning for lazy layouts.
//!
//! Realizing the items just outside the visible window before they scroll
//! in hides realization cost from the frame that first shows them. The
//! planner reads each finished measure pass and names the indices expected
//! to enter the viewport next; what to do with them (warm a cache, realize
//! into a recycle pool) is the host's business. The plan is purely
//! advisory and never affects the measure math.

use crate::anchor::ItemIndex;

use super::lazy_list_measure::LazyListMeasureResult;

/// Plans which items to realize ahead of the current scroll direction.
#[derive(Debug)]
pub struct PrefetchPlanner {
    reach: usize,
    planned: Vec<ItemIndex>,
}

impl PrefetchPlanner {
    /// Creates a planner that keeps up to `reach` items realized ahead.
    /// A reach of zero disables planning.
    pub fn new(reach: usize) -> Self {
        Self {
            reach,
            planned: Vec::new(),
        }
    }

    /// The indices the last plan picked, nearest to the viewport first.
    pub fn planned(&self) -> &[ItemIndex] {
        &self.planned
    }

    /// Re-plans from a finished measure pass.
    ///
    /// A pass that consumed scroll towards earlier items plans before the
    /// visible window; everything else plans past its end, matching the
    /// common case of reading forward through a list.
    pub fn plan<T>(&mut self, result: &LazyListMeasureResult<T>) -> &[ItemIndex] {
        self.planned.clear();
        let Some(first) = result.visible_items.first() else {
            return &self.planned;
        };
        let Some(last) = result.visible_items.last() else {
            return &self.planned;
        };

        if result.consumed_scroll > 0.0 {
            let stop = first.index.saturating_sub(self.reach);
            self.planned
                .extend((stop..first.index).rev().map(ItemIndex::new));
        } else {
            let start = last.index + 1;
            let stop = start
                .saturating_add(self.reach)
                .min(result.total_items_count);
            self.planned.extend((start..stop).map(ItemIndex::new));
        }
        &self.planned
    }
}
