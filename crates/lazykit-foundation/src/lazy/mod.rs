//! Lazy list measurement.
//!
//! Virtualized measurement for an unbounded ordered item sequence:
//! - [`measure_lazy_list`] - the per-pass measurement algorithm
//! - [`ScrollPosition`] - anchor state the host persists between passes
//! - [`BeyondBoundsInfo`] - retention intervals realized outside the window
//! - [`PrefetchPlanner`] - direction-aware realize-ahead planning
//!
//! # Example
//!
//! ```rust,ignore
//! let mut position = ScrollPosition::default();
//! let result = measure_lazy_list(
//!     items.len(),
//!     viewport,
//!     position.anchor(),
//!     pending_delta,
//!     constraints,
//!     &beyond_bounds,
//!     &config,
//!     &mut measurer,
//!     &mut emitter,
//! );
//! position.update_from_measure_result(&result);
//! ```

mod beyond_bounds;
mod item_offsets;
mod lazy_list_measure;
mod prefetch;
mod scroll_position;

pub use beyond_bounds::{BeyondBoundsInfo, BeyondBoundsInterval};
pub use lazy_list_measure::*;
pub use prefetch::*;
pub use scroll_position::*;
