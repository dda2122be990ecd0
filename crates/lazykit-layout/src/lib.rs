//! Layout contracts & policies for Lazykit

mod arrangement;
mod axis;
mod constraints;

pub use arrangement::*;
pub use axis::*;
pub use constraints::*;

pub mod prelude {
    pub use crate::arrangement::{Arrangement, LinearArrangement};
    pub use crate::axis::Axis;
    pub use crate::constraints::Constraints;
}
