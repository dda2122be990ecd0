//! Core measurement algorithm for lazy lists.
//!
//! This module implements the virtualized measurement logic that determines
//! which items must be realized and where they are placed, based on the
//! previous scroll anchor, the requested scroll delta and the viewport size.
//! Each pass recomputes the visible window from scratch; no object identity
//! survives between passes.

use lazykit_layout::{Axis, Constraints, LinearArrangement};

use crate::anchor::{ItemIndex, ScrollAnchor};
use crate::item_measurer::ItemMeasurer;
use crate::layout_emitter::{LayoutEmitter, PlacementBlock};
use crate::measured_item::{MeasuredItem, PositionedItem};

use super::beyond_bounds::{items_after_list, items_before_list, BeyondBoundsInfo};
use super::item_offsets::calculate_items_offsets;

/// Configuration of a lazy list that stays fixed across measure passes.
#[derive(Clone, Debug)]
pub struct LazyListMeasureConfig {
    /// The scroll axis.
    pub axis: Axis,

    /// Whether items are laid out from the far edge towards the start.
    pub reverse_layout: bool,

    /// Content padding before the first item. Must be non-negative.
    pub before_content_padding: i32,

    /// Content padding after the last item. Must be non-negative.
    pub after_content_padding: i32,

    /// Spacing between items. May be negative (overlapping items).
    pub space_between_items: i32,

    /// Fixed number of extra items to realize on each side of the visible
    /// window every pass.
    pub beyond_bounds_item_count: usize,

    /// Arrangement used when the content is shorter than the viewport.
    pub arrangement: LinearArrangement,
}

impl Default for LazyListMeasureConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            reverse_layout: false,
            before_content_padding: 0,
            after_content_padding: 0,
            space_between_items: 0,
            beyond_bounds_item_count: 0,
            arrangement: LinearArrangement::Start,
        }
    }
}

/// Per-item layout info exposed to the host after a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LazyListItemInfo {
    /// Index in the data set.
    pub index: usize,

    /// Stable key for the item.
    pub key: u64,

    /// Main-axis offset relative to the viewport start.
    pub offset: i32,

    /// Main-axis size.
    pub size: i32,
}

impl From<&PositionedItem> for LazyListItemInfo {
    fn from(item: &PositionedItem) -> Self {
        Self {
            index: item.index.get(),
            key: item.key,
            offset: item.offset,
            size: item.main_axis_size,
        }
    }
}

/// Everything one measure pass produces for the host.
#[derive(Debug)]
pub struct LazyListMeasureResult<T> {
    /// The new scroll anchor.
    pub anchor: ScrollAnchor,

    /// Key of the item the anchor points at, if any item is visible.
    pub first_visible_item_key: Option<u64>,

    /// True when more content exists past the viewport's trailing edge.
    pub can_scroll_forward: bool,

    /// How much of the requested scroll was actually applied.
    pub consumed_scroll: f32,

    /// The host's layout value, produced by its [`LayoutEmitter`].
    pub layout: T,

    /// All items placed this pass, including beyond-bounds ones, in draw order.
    pub positioned_items: Vec<PositionedItem>,

    /// Items intersecting the viewport, excluding beyond-bounds ones.
    pub visible_items: Vec<LazyListItemInfo>,

    /// Main-axis offset where the viewport starts (`-before_content_padding`).
    pub viewport_start_offset: i32,

    /// Main-axis offset where the viewport ends.
    pub viewport_end_offset: i32,

    /// Total number of items in the data set.
    pub total_items_count: usize,
}

/// Measures and calculates the positions for the requested items.
///
/// `main_axis_available_size` is the viewport extent in the scroll
/// direction, content padding excluded. `scroll_to_be_consumed` is the
/// requested scroll delta in pixels, negative when scrolling towards
/// later items; it is rounded exactly once per pass and all further
/// accumulation happens in whole pixels.
#[allow(clippy::too_many_arguments)]
pub fn measure_lazy_list<M, E>(
    items_count: usize,
    main_axis_available_size: i32,
    anchor: ScrollAnchor,
    scroll_to_be_consumed: f32,
    constraints: Constraints,
    beyond_bounds: &BeyondBoundsInfo,
    config: &LazyListMeasureConfig,
    measurer: &mut M,
    emitter: &mut E,
) -> LazyListMeasureResult<E::Output>
where
    M: ItemMeasurer,
    E: LayoutEmitter,
{
    assert!(
        config.before_content_padding >= 0,
        "negative before content padding"
    );
    assert!(
        config.after_content_padding >= 0,
        "negative after content padding"
    );

    if items_count == 0 {
        // empty data set. reset the current scroll and report zero size
        let layout = emitter.layout(
            constraints.min_width,
            constraints.min_height,
            PlacementBlock::new(&[]),
        );
        return LazyListMeasureResult {
            anchor: ScrollAnchor::zero(),
            first_visible_item_key: None,
            can_scroll_forward: false,
            consumed_scroll: 0.0,
            layout,
            positioned_items: Vec::new(),
            visible_items: Vec::new(),
            viewport_start_offset: -config.before_content_padding,
            viewport_end_offset: main_axis_available_size + config.after_content_padding,
            total_items_count: 0,
        };
    }

    let mut current_first_item_index = anchor.index().get();
    let mut current_first_item_scroll_offset = anchor.offset();
    if current_first_item_index >= items_count {
        // the data set has been updated and now we have less items than we
        // were scrolled to before
        log::debug!(
            "first visible item {} clamped to {}: the data set shrank to {} items",
            current_first_item_index,
            items_count - 1,
            items_count
        );
        current_first_item_index = items_count - 1;
        current_first_item_scroll_offset = 0;
    }

    // represents the real amount of scroll we applied as a result of this pass
    let mut scroll_delta = scroll_to_be_consumed.round() as i32;

    // applying the whole requested scroll offset. we will figure out if we
    // can't consume all of it later
    current_first_item_scroll_offset -= scroll_delta;

    // if the current scroll offset is less than minimally possible
    if current_first_item_index == 0 && current_first_item_scroll_offset < 0 {
        scroll_delta += current_first_item_scroll_offset;
        current_first_item_scroll_offset = 0;
    }

    // all the items representing the visible window
    let mut visible_items: Vec<MeasuredItem> = Vec::new();

    // define min and max offsets
    let min_offset = -config.before_content_padding + config.space_between_items.min(0);
    let max_offset = main_axis_available_size;

    // include the start padding so we compose items in the padding area and
    // neutralise item spacing (if the spacing is negative this will make
    // sure the previous item is composed) before starting scrolling forward
    // we will remove it back
    current_first_item_scroll_offset += min_offset;

    // max of cross axis sizes of all visible items
    let mut max_cross_axis = 0;

    // we had scrolled backward or we compose items in the start padding
    // area, which means items before the current offset should be visible.
    // compose them and update the offset
    while current_first_item_scroll_offset < 0 && current_first_item_index > 0 {
        let previous = current_first_item_index - 1;
        let measured_item = measurer.measure(ItemIndex::new(previous));
        max_cross_axis = max_cross_axis.max(measured_item.cross_axis_size());
        current_first_item_scroll_offset += measured_item.size_with_spacings();
        visible_items.insert(0, measured_item);
        current_first_item_index = previous;
    }

    // if we were scrolled backward, but there were not enough items before.
    // this means not the whole scroll was consumed
    if current_first_item_scroll_offset < min_offset {
        scroll_delta += current_first_item_scroll_offset;
        current_first_item_scroll_offset = min_offset;
    }

    // neutralize previously added padding as we stopped filling the before
    // content padding
    current_first_item_scroll_offset -= min_offset;

    let mut index = current_first_item_index;
    let max_main_axis = (max_offset + config.after_content_padding).max(0);
    let mut current_main_axis_offset = -current_first_item_scroll_offset;

    // first we need to skip items we already composed while composing backward
    for item in &visible_items {
        index += 1;
        current_main_axis_offset += item.size_with_spacings();
    }

    // then composing visible items forward until we fill the whole viewport.
    // we want at least one item in the visible window even if in fact all
    // the items are offscreen, which can happen when the content padding is
    // larger than the available size
    while index < items_count
        && (current_main_axis_offset < max_main_axis
            || current_main_axis_offset <= 0 // filling before content padding area
            || visible_items.is_empty())
    {
        let measured_item = measurer.measure(ItemIndex::new(index));
        current_main_axis_offset += measured_item.size_with_spacings();

        if current_main_axis_offset <= min_offset && index != items_count - 1 {
            // this item is offscreen and will not be placed. advance the
            // first visible item index
            current_first_item_index = index + 1;
            current_first_item_scroll_offset -= measured_item.size_with_spacings();
        } else {
            max_cross_axis = max_cross_axis.max(measured_item.cross_axis_size());
            visible_items.push(measured_item);
        }

        index += 1;
    }

    // we didn't fill the whole viewport with items starting from the first
    // visible one. lets try to scroll back if we have enough items before it
    if current_main_axis_offset < max_offset {
        let to_scroll_back = max_offset - current_main_axis_offset;
        current_first_item_scroll_offset -= to_scroll_back;
        current_main_axis_offset += to_scroll_back;
        while current_first_item_scroll_offset < config.before_content_padding
            && current_first_item_index > 0
        {
            let previous = current_first_item_index - 1;
            let measured_item = measurer.measure(ItemIndex::new(previous));
            max_cross_axis = max_cross_axis.max(measured_item.cross_axis_size());
            current_first_item_scroll_offset += measured_item.size_with_spacings();
            visible_items.insert(0, measured_item);
            current_first_item_index = previous;
        }
        scroll_delta += to_scroll_back;
        if current_first_item_scroll_offset < 0 {
            scroll_delta += current_first_item_scroll_offset;
            current_main_axis_offset += current_first_item_scroll_offset;
            current_first_item_scroll_offset = 0;
        }
    }

    // report the amount of pixels we consumed. scroll_delta can be smaller
    // than the request if there were not enough items to fill the offered
    // space, or larger if items were resized or the data set shrank below
    // the previous position
    let requested_rounded = scroll_to_be_consumed.round() as i32;
    let consumed_scroll = if requested_rounded.signum() == scroll_delta.signum()
        && requested_rounded.abs() >= scroll_delta.abs()
    {
        scroll_delta as f32
    } else {
        scroll_to_be_consumed
    };

    // the initial offset for items from the visible window
    assert!(
        current_first_item_scroll_offset >= 0,
        "scroll offset went negative after filling the viewport"
    );
    let visible_items_scroll_offset = -current_first_item_scroll_offset;
    let mut first_item_position = 0;

    // even if we compose items to fill the before content padding, items
    // fully located there are ignored for the scroll position reported to
    // the host
    if config.before_content_padding > 0 || config.space_between_items < 0 {
        for i in 0..visible_items.len() {
            let size = visible_items[i].size_with_spacings();
            if current_first_item_scroll_offset != 0
                && size <= current_first_item_scroll_offset
                && i != visible_items.len() - 1
            {
                current_first_item_scroll_offset -= size;
                first_item_position = i + 1;
            } else {
                break;
            }
        }
    }

    // realize extra items before the visible window
    let extra_items_before = items_before_list(
        beyond_bounds,
        current_first_item_index,
        measurer,
        items_count,
        config.beyond_bounds_item_count,
    );
    for item in &extra_items_before {
        max_cross_axis = max_cross_axis.max(item.cross_axis_size());
    }

    // realize extra items after the visible window
    let last_visible_index = visible_items[visible_items.len() - 1].index().get();
    let extra_items_after = items_after_list(
        beyond_bounds,
        last_visible_index,
        measurer,
        items_count,
        config.beyond_bounds_item_count,
    );
    for item in &extra_items_after {
        max_cross_axis = max_cross_axis.max(item.cross_axis_size());
    }

    let no_extra_items =
        first_item_position == 0 && extra_items_before.is_empty() && extra_items_after.is_empty();

    let layout_width = constraints.constrain_width(if config.axis.is_vertical() {
        max_cross_axis
    } else {
        current_main_axis_offset
    });
    let layout_height = constraints.constrain_height(if config.axis.is_vertical() {
        current_main_axis_offset
    } else {
        max_cross_axis
    });

    let positioned_items = calculate_items_offsets(
        &visible_items,
        &extra_items_before,
        &extra_items_after,
        layout_width,
        layout_height,
        current_main_axis_offset,
        max_offset,
        visible_items_scroll_offset,
        config.axis,
        &config.arrangement,
        config.reverse_layout,
    );

    let can_scroll_forward = index < items_count || current_main_axis_offset > max_offset;

    let layout = emitter.layout(
        layout_width,
        layout_height,
        PlacementBlock::new(&positioned_items),
    );

    let first_visible_index = visible_items[0].index().get();
    let visible_info = if no_extra_items {
        positioned_items.iter().map(LazyListItemInfo::from).collect()
    } else {
        positioned_items
            .iter()
            .filter(|item| {
                item.index.get() >= first_visible_index && item.index.get() <= last_visible_index
            })
            .map(LazyListItemInfo::from)
            .collect()
    };

    let first_item = &visible_items[first_item_position];
    LazyListMeasureResult {
        anchor: ScrollAnchor::new(first_item.index(), current_first_item_scroll_offset),
        first_visible_item_key: Some(first_item.key()),
        can_scroll_forward,
        consumed_scroll,
        layout,
        positioned_items,
        visible_items: visible_info,
        viewport_start_offset: -config.before_content_padding,
        viewport_end_offset: max_offset + config.after_content_padding,
        total_items_count: items_count,
    }
}
