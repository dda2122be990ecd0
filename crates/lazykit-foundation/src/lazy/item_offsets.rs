//! Final offset calculation for measured items.
//!
//! Converts the ordered measured items of one pass into absolute placement
//! coordinates. Two modes exist: when the content is shorter than the
//! viewport and nothing is scrolled, an arrangement strategy distributes
//! the spare space; otherwise items are walked in order from the scroll
//! offset, with the auxiliary before/after items growing outwards.

use lazykit_layout::{Arrangement, Axis, LinearArrangement};

use crate::measured_item::{MeasuredItem, PositionedItem};

#[allow(clippy::too_many_arguments)]
pub(crate) fn calculate_items_offsets(
    items: &[MeasuredItem],
    extra_items_before: &[MeasuredItem],
    extra_items_after: &[MeasuredItem],
    layout_width: i32,
    layout_height: i32,
    final_main_axis_offset: i32,
    max_offset: i32,
    items_scroll_offset: i32,
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
            items_scroll_offset == 0,
            "spare-space placement with a non-zero scroll offset"
        );
    }

    let mut positioned_items =
        Vec::with_capacity(items.len() + extra_items_before.len() + extra_items_after.len());

    if has_spare_space {
        assert!(
            extra_items_before.is_empty() && extra_items_after.is_empty(),
            "spare-space placement cannot carry beyond-bounds items"
        );

        let items_count = items.len();
        let reverse_aware =
            |index: usize| if reverse_layout { items_count - index - 1 } else { index };

        // the arrangement runs in canonical coordinates; items are fed in
        // reverse-aware order and the offsets mirrored back afterwards
        let sizes: Vec<i32> = (0..items_count)
            .map(|index| items[reverse_aware(index)].main_axis_size())
            .collect();
        let mut offsets = vec![0; items_count];
        arrangement.arrange(main_axis_layout_size, &sizes, &mut offsets);

        for position in 0..items_count {
            let index = if reverse_layout {
                items_count - position - 1
            } else {
                position
            };
            let absolute_offset = offsets[index];
            // when reverse_layout is set, offsets are stored in the
            // reversed order to items
            let item = &items[reverse_aware(index)];
            let relative_offset = if reverse_layout {
                main_axis_layout_size - absolute_offset - item.main_axis_size()
            } else {
                absolute_offset
            };
            positioned_items.push(item.position(
                relative_offset,
                0,
                layout_width,
                layout_height,
                axis,
                reverse_layout,
            ));
        }
    } else {
        let mut current_main_axis = items_scroll_offset;
        for item in extra_items_before {
            current_main_axis -= item.size_with_spacings();
            positioned_items.push(item.position(
                current_main_axis,
                0,
                layout_width,
                layout_height,
                axis,
                reverse_layout,
            ));
        }

        current_main_axis = items_scroll_offset;
        for item in items {
            positioned_items.push(item.position(
                current_main_axis,
                0,
                layout_width,
                layout_height,
                axis,
                reverse_layout,
            ));
            current_main_axis += item.size_with_spacings();
        }

        for item in extra_items_after {
            positioned_items.push(item.position(
                current_main_axis,
                0,
                layout_width,
                layout_height,
                axis,
                reverse_layout,
            ));
            current_main_axis += item.size_with_spacings();
        }
    }
    positioned_items
}
