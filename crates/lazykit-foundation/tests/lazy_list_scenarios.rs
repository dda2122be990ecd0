//! End-to-end scenarios for lazy list measurement.
//!
//! Drives full measure passes through a recording measurer and emitter and
//! checks the externally observable contract: anchor movement, consumed
//! scroll, placement coordinates and which indices get realized.

use std::cell::RefCell;

use lazykit_foundation::lazy::{
    measure_lazy_list, BeyondBoundsInfo, LazyListMeasureConfig, LazyListMeasureResult,
};
use lazykit_foundation::{
    ItemIndex, LayoutEmitter, MeasuredItem, PlacementBlock, PlacementScope, ScrollAnchor,
};
use lazykit_layout::{Axis, Constraints, LinearArrangement};

/// The layout value a pass produces in these tests: the final size plus
/// every placement command in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    width: i32,
    height: i32,
    placed: Vec<(usize, i32, i32)>,
}

struct FrameEmitter;

impl LayoutEmitter for FrameEmitter {
    type Output = Frame;

    fn layout(&mut self, width: i32, height: i32, placement: PlacementBlock<'_>) -> Frame {
        struct Recorder(Vec<(usize, i32, i32)>);
        impl PlacementScope for Recorder {
            fn place(&mut self, item: &lazykit_foundation::PositionedItem) {
                self.0.push((item.index.get(), item.x, item.y));
            }
        }
        let mut recorder = Recorder(Vec::new());
        placement.run(&mut recorder);
        Frame {
            width,
            height,
            placed: recorder.0,
        }
    }
}

/// Measures uniform items while recording every measured index.
fn recording_measurer<'a>(
    log: &'a RefCell<Vec<usize>>,
    size: i32,
    spacing: i32,
) -> impl FnMut(ItemIndex) -> MeasuredItem + 'a {
    move |index| {
        log.borrow_mut().push(index.get());
        MeasuredItem::new(index, index.get() as u64, size, 80, spacing)
    }
}

fn measure_uniform(
    items_count: usize,
    viewport: i32,
    anchor: ScrollAnchor,
    delta: f32,
    config: &LazyListMeasureConfig,
    size: i32,
) -> LazyListMeasureResult<Frame> {
    let log = RefCell::new(Vec::new());
    let mut measurer = recording_measurer(&log, size, config.space_between_items);
    measure_lazy_list(
        items_count,
        viewport,
        anchor,
        delta,
        Constraints::loose(400, viewport),
        &BeyondBoundsInfo::new(),
        config,
        &mut measurer,
        &mut FrameEmitter,
    )
}

#[test]
fn measuring_twice_without_scroll_is_idempotent() {
    let config = LazyListMeasureConfig::default();
    let first = measure_uniform(100, 350, ScrollAnchor::zero(), 0.0, &config, 100);
    let second = measure_uniform(100, 350, first.anchor, 0.0, &config, 100);

    assert_eq!(first.anchor, second.anchor);
    assert_eq!(first.layout, second.layout);
    assert_eq!(first.visible_items, second.visible_items);
}

#[test]
fn forward_then_backward_scroll_returns_to_the_start() {
    let config = LazyListMeasureConfig::default();
    let forward = measure_uniform(100, 350, ScrollAnchor::zero(), -237.0, &config, 100);
    assert_eq!(forward.consumed_scroll, -237.0);
    assert_eq!(forward.anchor.index().get(), 2);
    assert_eq!(forward.anchor.offset(), 37);

    let backward = measure_uniform(100, 350, forward.anchor, 237.0, &config, 100);
    assert_eq!(backward.consumed_scroll, 237.0);
    assert_eq!(backward.anchor, ScrollAnchor::zero());
}

#[test]
fn consumed_scroll_never_exceeds_the_request() {
    let config = LazyListMeasureConfig::default();
    for delta in [-5000.0, -351.0, -37.0, 0.0, 42.0, 1234.0] {
        let result = measure_uniform(10, 350, ScrollAnchor::zero(), delta, &config, 100);
        assert!(
            result.consumed_scroll.abs() <= delta.abs() + f32::EPSILON,
            "delta {delta} consumed {}",
            result.consumed_scroll
        );
    }
}

#[test]
fn anchor_offset_stays_non_negative_across_passes() {
    let config = LazyListMeasureConfig {
        before_content_padding: 24,
        space_between_items: 4,
        ..Default::default()
    };
    let mut anchor = ScrollAnchor::zero();
    for delta in [-173.0, -89.0, 310.0, -412.0, 500.0, -1.0] {
        let result = measure_uniform(60, 350, anchor, delta, &config, 52);
        assert!(result.anchor.offset() >= 0);
        anchor = result.anchor;
    }
}

#[test]
fn padding_larger_than_the_viewport_still_places_one_item() {
    let config = LazyListMeasureConfig {
        before_content_padding: 500,
        after_content_padding: 500,
        ..Default::default()
    };
    let result = measure_uniform(3, 350, ScrollAnchor::zero(), 0.0, &config, 100);
    assert!(!result.layout.placed.is_empty());
}

#[test]
fn overscroll_clamps_to_the_content_end() {
    let config = LazyListMeasureConfig::default();
    // 10 items of 100px in a 350px viewport: 650px of scrollable content
    let result = measure_uniform(10, 350, ScrollAnchor::zero(), -1000.0, &config, 100);

    assert!(!result.can_scroll_forward);
    assert_eq!(result.consumed_scroll, -650.0);
    assert_eq!(result.anchor.index().get(), 6);
    assert_eq!(result.anchor.offset(), 50);

    // the last item's trailing edge aligns with the viewport's
    let (index, _, y) = *result.layout.placed.last().unwrap();
    assert_eq!(index, 9);
    assert_eq!(y + 100, 350);
}

#[test]
fn empty_data_set_reports_padded_viewport_bounds() {
    let config = LazyListMeasureConfig {
        before_content_padding: 10,
        after_content_padding: 20,
        ..Default::default()
    };
    let log = RefCell::new(Vec::new());
    let mut measurer = recording_measurer(&log, 100, 0);
    let result = measure_lazy_list(
        0,
        350,
        ScrollAnchor::zero(),
        -300.0,
        Constraints::loose(400, 350),
        &BeyondBoundsInfo::new(),
        &config,
        &mut measurer,
        &mut FrameEmitter,
    );

    assert_eq!(result.total_items_count, 0);
    assert!(!result.can_scroll_forward);
    assert_eq!(result.consumed_scroll, 0.0);
    assert_eq!(result.viewport_start_offset, -10);
    assert_eq!(result.viewport_end_offset, 370);
    assert!(log.borrow().is_empty());
}

#[test]
fn negative_spacing_composes_an_extra_leading_item() {
    let anchor = ScrollAnchor::new(ItemIndex::new(2), 0);

    let plain = RefCell::new(Vec::new());
    let mut measurer = recording_measurer(&plain, 50, 0);
    let config = LazyListMeasureConfig::default();
    measure_lazy_list(
        5,
        200,
        anchor,
        0.0,
        Constraints::loose(400, 200),
        &BeyondBoundsInfo::new(),
        &config,
        &mut measurer,
        &mut FrameEmitter,
    );

    let overlapped = RefCell::new(Vec::new());
    let mut measurer = recording_measurer(&overlapped, 50, -10);
    let config = LazyListMeasureConfig {
        space_between_items: -10,
        ..Default::default()
    };
    measure_lazy_list(
        5,
        200,
        anchor,
        0.0,
        Constraints::loose(400, 200),
        &BeyondBoundsInfo::new(),
        &config,
        &mut measurer,
        &mut FrameEmitter,
    );

    // the lowered minimum offset pulls one more leading item into the pass
    assert!(!plain.borrow().contains(&0));
    assert!(overlapped.borrow().contains(&0));
}

#[test]
fn beyond_bounds_demands_merge_into_one_measured_range() {
    let mut beyond_bounds = BeyondBoundsInfo::new();
    beyond_bounds.add_interval(4, 8);
    let config = LazyListMeasureConfig {
        beyond_bounds_item_count: 2,
        ..Default::default()
    };

    let log = RefCell::new(Vec::new());
    let mut measurer = recording_measurer(&log, 100, 0);
    let result = measure_lazy_list(
        20,
        350,
        ScrollAnchor::zero(),
        0.0,
        Constraints::loose(400, 350),
        &beyond_bounds,
        &config,
        &mut measurer,
        &mut FrameEmitter,
    );

    // visible window is 0..=3; the fixed count wants 4..=5 and the declared
    // interval stretches the same contiguous range to 10
    let measured = log.borrow();
    for index in 4..=10 {
        assert_eq!(
            measured.iter().filter(|&&i| i == index).count(),
            1,
            "index {index} measured more than once"
        );
    }
    assert!(!measured.contains(&11));

    // the auxiliary items are placed but not reported as visible
    assert_eq!(result.visible_items.last().unwrap().index, 3);
    assert_eq!(result.layout.placed.last().unwrap().0, 10);
}

#[test]
fn reversed_layout_mirrors_placement_coordinates() {
    let config = LazyListMeasureConfig {
        reverse_layout: true,
        ..Default::default()
    };
    let result = measure_uniform(10, 350, ScrollAnchor::zero(), 0.0, &config, 100);

    // the first item sits at the far edge, later items walk towards the start
    assert_eq!(result.layout.placed[0], (0, 0, 250));
    assert_eq!(result.layout.placed[1], (1, 0, 150));
    assert_eq!(result.layout.placed[2], (2, 0, 50));
    assert_eq!(result.layout.placed[3], (3, 0, -50));
}

#[test]
fn short_content_is_arranged_in_the_spare_space() {
    let config = LazyListMeasureConfig {
        arrangement: LinearArrangement::Center,
        ..Default::default()
    };
    let log = RefCell::new(Vec::new());
    let mut measurer = recording_measurer(&log, 50, 0);
    let constraints = Constraints {
        min_width: 0,
        max_width: 400,
        min_height: 350,
        max_height: 350,
    };
    let result = measure_lazy_list(
        2,
        350,
        ScrollAnchor::zero(),
        0.0,
        constraints,
        &BeyondBoundsInfo::new(),
        &config,
        &mut measurer,
        &mut FrameEmitter,
    );

    // 100px of content centered in 350px
    assert_eq!(result.layout.placed[0], (0, 0, 125));
    assert_eq!(result.layout.placed[1], (1, 0, 175));
    assert!(!result.can_scroll_forward);
}

#[test]
fn placement_hands_realized_content_handles_back_to_the_host() {
    struct HandleEmitter;

    impl LayoutEmitter for HandleEmitter {
        type Output = Vec<(usize, u64)>;

        fn layout(
            &mut self,
            _width: i32,
            _height: i32,
            placement: PlacementBlock<'_>,
        ) -> Self::Output {
            struct Recorder(Vec<(usize, u64)>);
            impl PlacementScope for Recorder {
                fn place(&mut self, item: &lazykit_foundation::PositionedItem) {
                    self.0.push((item.index.get(), item.handles[0]));
                }
            }
            let mut recorder = Recorder(Vec::new());
            placement.run(&mut recorder);
            recorder.0
        }
    }

    let config = LazyListMeasureConfig::default();
    let mut measurer = |index: ItemIndex| {
        MeasuredItem::new(index, index.get() as u64, 100, 80, 0)
            .with_handles([0x1000 + index.get() as u64])
    };
    let result = measure_lazy_list(
        10,
        350,
        ScrollAnchor::zero(),
        0.0,
        Constraints::loose(400, 350),
        &BeyondBoundsInfo::new(),
        &config,
        &mut measurer,
        &mut HandleEmitter,
    );

    assert!(!result.layout.is_empty());
    for (index, handle) in &result.layout {
        assert_eq!(*handle, 0x1000 + *index as u64);
    }
}

#[test]
fn horizontal_axis_places_along_x() {
    let config = LazyListMeasureConfig {
        axis: Axis::Horizontal,
        ..Default::default()
    };
    let log = RefCell::new(Vec::new());
    let mut measurer = recording_measurer(&log, 100, 0);
    let result = measure_lazy_list(
        10,
        350,
        ScrollAnchor::zero(),
        0.0,
        Constraints::loose(350, 400),
        &BeyondBoundsInfo::new(),
        &config,
        &mut measurer,
        &mut FrameEmitter,
    );

    assert_eq!(result.layout.placed[0], (0, 0, 0));
    assert_eq!(result.layout.placed[1], (1, 100, 0));
    assert_eq!(result.layout.height, 80);
}
