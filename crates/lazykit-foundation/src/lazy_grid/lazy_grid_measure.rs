//! Core measurement algorithm for lazy grids.
//!
//! The grid variant of the lazy measurement loop. It walks whole lines
//! instead of single items: backward-fill, forward-fill, the short-list
//! back-scroll and the consumed-scroll arithmetic are the same as for
//! lists, with line sizes standing in for item sizes. The end of the data
//! set is signalled by an empty measured line rather than by an item count
//! comparison, because how many lines the items form is the host's span
//! logic.

use lazykit_layout::{Arrangement, Axis, Constraints, LinearArrangement};

use crate::layout_emitter::{LayoutEmitter, PlacementBlock};
use crate::measured_item::PositionedItem;

use super::measured_line::{GridScrollAnchor, LineIndex, LineMeasurer, MeasuredLine};

/// Configuration of a lazy grid that stays fixed across measure passes.
#[derive(Clone, Debug)]
pub struct LazyGridMeasureConfig {
    /// The scroll axis.
    pub axis: Axis,

    /// Whether lines are laid out from the far edge towards the start.
    pub reverse_layout: bool,

    /// Content padding before the first line. Must be non-negative.
    pub before_content_padding: i32,

    /// Content padding after the last line. Must be non-negative.
    pub after_content_padding: i32,

    /// Spacing between lines. May be negative.
    pub space_between_lines: i32,

    /// Arrangement used when the content is shorter than the viewport.
    pub arrangement: LinearArrangement,
}

impl Default for LazyGridMeasureConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            reverse_layout: false,
            before_content_padding: 0,
            after_content_padding: 0,
            space_between_lines: 0,
            arrangement: LinearArrangement::Start,
        }
    }
}

/// Everything one grid measure pass produces for the host.
#[derive(Debug)]
pub struct LazyGridMeasureResult<T> {
    /// The new scroll anchor.
    pub anchor: GridScrollAnchor,

    /// True when more content exists past the viewport's trailing edge.
    pub can_scroll_forward: bool,

    /// How much of the requested scroll was actually applied.
    pub consumed_scroll: f32,

    /// The host's layout value, produced by its [`LayoutEmitter`].
    pub layout: T,

    /// All items placed this pass, in draw order.
    pub positioned_items: Vec<PositionedItem>,

    /// Main-axis offset where the viewport starts.
    pub viewport_start_offset: i32,

    /// Main-axis offset where the viewport ends.
    pub viewport_end_offset: i32,

    /// Total number of items (not lines) in the data set.
    pub total_items_count: usize,
}

/// Measures and calculates the positions for the currently visible grid
/// lines.
///
/// `items_count` is the total item count of the data set; the line count
/// is not known up front, so the forward fill stops when the host yields
/// an empty line. `scroll_to_be_consumed` follows the list convention:
/// negative when scrolling towards later lines, rounded once per pass.
#[allow(clippy::too_many_arguments)]
pub fn measure_lazy_grid<L, E>(
    items_count: usize,
    main_axis_available_size: i32,
    anchor: GridScrollAnchor,
    scroll_to_be_consumed: f32,
    constraints: Constraints,
    config: &LazyGridMeasureConfig,
    line_measurer: &mut L,
    emitter: &mut E,
) -> LazyGridMeasureResult<E::Output>
where
    L: LineMeasurer,
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
        return LazyGridMeasureResult {
            anchor: GridScrollAnchor::zero(),
            can_scroll_forward: false,
            consumed_scroll: 0.0,
            layout,
            positioned_items: Vec::new(),
            viewport_start_offset: -config.before_content_padding,
            viewport_end_offset: main_axis_available_size + config.after_content_padding,
            total_items_count: 0,
        };
    }

    let mut current_first_line_index = anchor.line().get();
    let mut current_first_line_scroll_offset = anchor.offset();

    // represents the real amount of scroll we applied as a result of this pass
    let mut scroll_delta = scroll_to_be_consumed.round() as i32;

    // applying the whole requested scroll offset. we will figure out if we
    // can't consume all of it later
    current_first_line_scroll_offset -= scroll_delta;

    // if the current scroll offset is less than minimally possible
    if current_first_line_index == 0 && current_first_line_scroll_offset < 0 {
        scroll_delta += current_first_line_scroll_offset;
        current_first_line_scroll_offset = 0;
    }

    // all the measured lines representing the visible window
    let mut visible_lines: Vec<MeasuredLine> = Vec::new();

    // define min and max offsets
    let min_offset = -config.before_content_padding + config.space_between_lines.min(0);
    let max_offset = main_axis_available_size;

    // include the start padding so we compose lines in the padding area and
    // neutralise line spacing (if the spacing is negative this will make
    // sure the previous line is composed) before starting scrolling forward
    // we will remove it back
    current_first_line_scroll_offset += min_offset;

    // we had scrolled backward or we compose lines in the start padding
    // area, which means lines before the current offset should be visible.
    // compose them and update the offset
    while current_first_line_scroll_offset < 0 && current_first_line_index > 0 {
        let previous = current_first_line_index - 1;
        let measured_line = line_measurer.measure_line(LineIndex::new(previous));
        current_first_line_scroll_offset += measured_line.main_axis_size_with_spacings();
        visible_lines.insert(0, measured_line);
        current_first_line_index = previous;
    }

    // if we were scrolled backward, but there were not enough lines before.
    // this means not the whole scroll was consumed
    if current_first_line_scroll_offset < min_offset {
        scroll_delta += current_first_line_scroll_offset;
        current_first_line_scroll_offset = min_offset;
    }

    // neutralize previously added padding as we stopped filling the before
    // content padding
    current_first_line_scroll_offset -= min_offset;

    let mut index = current_first_line_index;
    let max_main_axis = (max_offset + config.after_content_padding).max(0);
    let mut current_main_axis_offset = -current_first_line_scroll_offset;

    // first we need to skip lines we already composed while composing backward
    for line in &visible_lines {
        index += 1;
        current_main_axis_offset += line.main_axis_size_with_spacings();
    }

    // then composing visible lines forward until we fill the whole viewport.
    // we want at least one line in the visible window even if in fact all
    // the lines are offscreen, which can happen when the content padding is
    // larger than the available size
    while index < items_count
        && (current_main_axis_offset < max_main_axis
            || current_main_axis_offset <= 0 // filling before content padding area
            || visible_lines.is_empty())
    {
        let measured_line = line_measurer.measure_line(LineIndex::new(index));
        if measured_line.is_empty() {
            // the data set ran out of items before this line
            index = index.saturating_sub(1);
            break;
        }

        current_main_axis_offset += measured_line.main_axis_size_with_spacings();
        if current_main_axis_offset <= min_offset
            && measured_line
                .last_item_index()
                .map_or(true, |item| item.get() != items_count - 1)
        {
            // this line is offscreen and will not be placed. advance the
            // first visible line index
            current_first_line_index = index + 1;
            current_first_line_scroll_offset -= measured_line.main_axis_size_with_spacings();
        } else {
            visible_lines.push(measured_line);
        }
        index += 1;
    }

    // we didn't fill the whole viewport with lines starting from the first
    // visible one. lets try to scroll back if we have enough lines before it
    if current_main_axis_offset < max_offset {
        let to_scroll_back = max_offset - current_main_axis_offset;
        current_first_line_scroll_offset -= to_scroll_back;
        current_main_axis_offset += to_scroll_back;
        while current_first_line_scroll_offset < config.before_content_padding
            && current_first_line_index > 0
        {
            let previous = current_first_line_index - 1;
            let measured_line = line_measurer.measure_line(LineIndex::new(previous));
            current_first_line_scroll_offset += measured_line.main_axis_size_with_spacings();
            visible_lines.insert(0, measured_line);
            current_first_line_index = previous;
        }
        scroll_delta += to_scroll_back;
        if current_first_line_scroll_offset < 0 {
            scroll_delta += current_first_line_scroll_offset;
            current_main_axis_offset += current_first_line_scroll_offset;
            current_first_line_scroll_offset = 0;
        }
    }

    // report the amount of pixels we consumed. scroll_delta can be smaller
    // than the request if there were not enough lines to fill the offered
    // space, or larger if lines were resized or the data set shrank below
    // the previous position
    let requested_rounded = scroll_to_be_consumed.round() as i32;
    let consumed_scroll = if requested_rounded.signum() == scroll_delta.signum()
        && requested_rounded.abs() >= scroll_delta.abs()
    {
        scroll_delta as f32
    } else {
        scroll_to_be_consumed
    };

    // the initial offset for lines from the visible window
    assert!(
        current_first_line_scroll_offset >= 0,
        "scroll offset went negative after filling the viewport"
    );
    let visible_lines_scroll_offset = -current_first_line_scroll_offset;
    let mut first_line_position = 0;

    // even if we compose lines to fill the before content padding, lines
    // fully located there are ignored for the scroll position reported to
    // the host
    if config.before_content_padding > 0 || config.space_between_lines < 0 {
        for i in 0..visible_lines.len() {
            let size = visible_lines[i].main_axis_size_with_spacings();
            if current_first_line_scroll_offset != 0
                && size <= current_first_line_scroll_offset
                && i != visible_lines.len() - 1
            {
                current_first_line_scroll_offset -= size;
                first_line_position = i + 1;
            } else {
                break;
            }
        }
    }

    // grids fill the cross axis; only the main axis is content-sized
    let layout_width = if config.axis.is_vertical() {
        constraints.max_width
    } else {
        constraints.constrain_width(current_main_axis_offset)
    };
    let layout_height = if config.axis.is_vertical() {
        constraints.constrain_height(current_main_axis_offset)
    } else {
        constraints.max_height
    };

    let positioned_items = calculate_lines_offsets(
        &visible_lines,
        layout_width,
        layout_height,
        current_main_axis_offset,
        max_offset,
        visible_lines_scroll_offset,
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

    let first_line = &visible_lines[first_line_position];
    LazyGridMeasureResult {
        anchor: GridScrollAnchor::new(first_line.index(), current_first_line_scroll_offset),
        can_scroll_forward,
        consumed_scroll,
        layout,
        positioned_items,
        viewport_start_offset: -config.before_content_padding,
        viewport_end_offset: max_offset + config.after_content_padding,
        total_items_count: items_count,
    }
}

/// Calculates the final offsets of the measured lines' items.
#[allow(clippy::too_many_arguments)]
fn calculate_lines_offsets(
    lines: &[MeasuredLine],
    layout_width: i32,
    layout_height: i32,
    final_main_axis_offset: i32,
    max_offset: i32,
    first_line_scroll_offset: i32,
    axis: Axis,
    arrangement: &LinearArrangement,
    reverse_layout: bool,
) -> Vec<PositionedItem> {
    let main_axis_layout_size = if axis.is_vertical() {
        layout_height
    } else {
        layout_width
    };
    let has_spare_space = final_main_axis_offset < main_axis_layout_size.min(max_offset);
    if has_spare_space {
        assert!(
            first_line_scroll_offset == 0,
            "spare-space placement with a non-zero scroll offset"
        );
    }

    let mut positioned_items =
        Vec::with_capacity(lines.iter().map(|line| line.items().len()).sum());

    if has_spare_space {
        let lines_count = lines.len();
        let reverse_aware =
            |index: usize| if reverse_layout { lines_count - index - 1 } else { index };

        let sizes: Vec<i32> = (0..lines_count)
            .map(|index| lines[reverse_aware(index)].main_axis_size())
            .collect();
        let mut offsets = vec![0; lines_count];
        arrangement.arrange(main_axis_layout_size, &sizes, &mut offsets);

        for position in 0..lines_count {
            let index = if reverse_layout {
                lines_count - position - 1
            } else {
                position
            };
            let absolute_offset = offsets[index];
            // when reverse_layout is set, offsets are stored in the
            // reversed order to lines
            let line = &lines[reverse_aware(index)];
            let relative_offset = if reverse_layout {
                main_axis_layout_size - absolute_offset - line.main_axis_size()
            } else {
                absolute_offset
            };
            positioned_items.extend(line.position(
                relative_offset,
                layout_width,
                layout_height,
                axis,
                reverse_layout,
            ));
        }
    } else {
        let mut current_main_axis = first_line_scroll_offset;
        for line in lines {
            positioned_items.extend(line.position(
                current_main_axis,
                layout_width,
                layout_height,
                axis,
                reverse_layout,
            ));
            current_main_axis += line.main_axis_size_with_spacings();
        }
    }
    positioned_items
}
