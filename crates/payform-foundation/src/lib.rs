//! Foundation types for Payform structured input fields.
//!
//! - [`segment`] - segment kinds, validation states and the per-segment record
//! - [`focus`] - single-owner focus tracking across segments
//! - [`key_event`] - platform-independent keyboard events routed to fields
//! - [`text`] - the slot-based text position model backing fixed-capacity fields

pub mod focus;
pub mod key_event;
pub mod segment;
pub mod text;

pub use focus::FocusManager;
pub use key_event::{KeyCode, KeyEvent, Modifiers};
pub use segment::{Segment, SegmentKind, ValidationState};
pub use text::{RangeError, SlotBuffer, SlotEdit, TextPosition, TextRange};

pub mod prelude {
    pub use crate::focus::FocusManager;
    pub use crate::key_event::{KeyCode, KeyEvent, Modifiers};
    pub use crate::segment::{Segment, SegmentKind, ValidationState};
    pub use crate::text::{SlotBuffer, TextPosition, TextRange};
}
