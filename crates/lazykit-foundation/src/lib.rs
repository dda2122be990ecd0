//! Virtualized lazy layout measurement for Lazykit.
//!
//! This crate turns a previous scroll anchor and a requested scroll delta
//! into the exact set of items to realize and their placements, without
//! ever touching a rendering tree itself. The host supplies two
//! capabilities: an [`ItemMeasurer`] that realizes items into sized boxes,
//! and a [`LayoutEmitter`] that turns final sizes plus a placement block
//! into whatever layout value the host runtime uses.
//!
//! Measurement is synchronous and stateless between passes; the host
//! persists a [`lazy::ScrollPosition`] (or the grid equivalent) and feeds
//! its anchor back in.

mod anchor;
mod item_measurer;
mod layout_emitter;
mod measured_item;

pub mod lazy;
pub mod lazy_grid;

pub use anchor::{ItemIndex, ScrollAnchor};
pub use item_measurer::ItemMeasurer;
pub use layout_emitter::{LayoutEmitter, PlacementBlock, PlacementScope, UnitEmitter};
pub use measured_item::{MeasuredItem, PositionedItem, SmallHandleVec};
