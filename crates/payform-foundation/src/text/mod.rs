//! Slot-based text model for fixed-capacity fields.
//!
//! A one-time-code field has no character buffer: it owns a fixed number of
//! single-character slots. These types give it the standard text-editing
//! primitives (position arithmetic, range construction, comparison and
//! range extension) over that slot array.
//!
//! - [`TextPosition`] - zero-based index into the slot array, `0..=capacity`
//! - [`TextRange`] - ordered half-open interval `[start, end)` of slots
//! - [`SlotBuffer`] - the slot array and every edit it supports
//!
//! # Example
//!
//! ```
//! use payform_foundation::text::{SlotBuffer, TextRange};
//!
//! let mut slots = SlotBuffer::new(6);
//! let edit = slots.replace(TextRange::caret(slots.beginning_of_document()), "12345678");
//! assert_eq!(slots.text(), "123456");
//! assert_eq!(edit.dropped, 2);
//! ```

mod position;
mod range;
mod slots;

pub use position::TextPosition;
pub use range::{RangeError, TextRange};
pub use slots::{SlotBuffer, SlotEdit};
