//! Lazy grid measurement.
//!
//! The line-based variant of lazy measurement: the host's span logic packs
//! items into cross-axis lines, and [`measure_lazy_grid`] scrolls whole
//! lines the same way [`measure_lazy_list`](crate::lazy::measure_lazy_list)
//! scrolls items.

mod lazy_grid_measure;
mod measured_line;

pub use lazy_grid_measure::*;
pub use measured_line::*;
