//! Structured payment input fields for Payform.
//!
//! [`CardField`] collects a card number, expiry, CVC and postal code as
//! separate segments with auto-formatting, auto-advancing focus and a
//! responsive layout. [`OneTimeCodeField`] collects a fixed-length numeric
//! code one slot per digit.
//!
//! Both run on a single thread. The only asynchronous input is the BIN
//! metadata oracle, whose callbacks must arrive on the thread that owns the
//! field.

pub mod card_field;
mod field_input;
pub mod one_time_code;

pub use card_field::{
    CardField, CardFieldConfig, CardFieldEvent, ConfigError, FieldCoordinator, ListenerId,
    MonospacedMeasurer, PendingLookup, SegmentMeasurer, Transition,
};
pub use one_time_code::{OneTimeCodeEvent, OneTimeCodeField};

pub mod prelude {
    pub use crate::card_field::{CardField, CardFieldConfig, CardFieldEvent};
    pub use crate::one_time_code::{OneTimeCodeEvent, OneTimeCodeField};
    pub use payform_card::{CardBrand, CountryCode, YearMonth};
    pub use payform_foundation::{KeyEvent, SegmentKind, ValidationState};
    pub use payform_ui_layout::{FieldLayout, LayoutVisibility};
}
