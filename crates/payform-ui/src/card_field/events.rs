//! Notifications emitted by the card field.

use payform_foundation::{SegmentKind, ValidationState};
use payform_ui_layout::FieldLayout;

/// Something observable changed in a card field.
///
/// Within one mutation events arrive in this order: validation changes,
/// focus changes, the new layout, `DidChange`, then `BecameComplete`.
#[derive(Debug, Clone, PartialEq)]
pub enum CardFieldEvent {
    ValidationChanged {
        segment: SegmentKind,
        state: ValidationState,
    },
    FocusChanged {
        from: Option<SegmentKind>,
        to: Option<SegmentKind>,
    },
    LayoutChanged(FieldLayout),
    /// Fired once after every mutation of segment values or validity.
    DidChange,
    /// Fired when the field goes from incomplete to complete.
    BecameComplete,
}

/// Handle returned by `add_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
