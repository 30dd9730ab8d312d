//! Responsive layout for Payform structured fields.
//!
//! Given the width available to a card field, the focused segment and the
//! content width of each segment, [`layout`] decides which segments stay
//! visible, which are compressed and which are hidden, and where each one
//! is placed.

mod config;
mod engine;
mod priority;
mod visibility;

pub use config::{LayoutConfig, SegmentMetrics};
pub use engine::layout;
pub use priority::{downgrade_order, DowngradeStep};
pub use visibility::{FieldLayout, LayoutVisibility, SegmentLayout};

pub mod prelude {
    pub use crate::config::{LayoutConfig, SegmentMetrics};
    pub use crate::engine::layout;
    pub use crate::visibility::{FieldLayout, LayoutVisibility, SegmentLayout};
}
