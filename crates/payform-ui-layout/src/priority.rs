//! Downgrade priority per focus state.
//!
//! The order is a literal table rather than a distance rule: the focused
//! segment and its neighbours go last, segments far from focus go first,
//! and ties are broken the way each row lists them.

use crate::visibility::LayoutVisibility;
use payform_foundation::SegmentKind;

/// Lowering one segment's visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DowngradeStep {
    pub segment: SegmentKind,
    pub to: LayoutVisibility,
}

const fn compress(segment: SegmentKind) -> DowngradeStep {
    DowngradeStep {
        segment,
        to: LayoutVisibility::Compressed,
    }
}

const fn hide(segment: SegmentKind) -> DowngradeStep {
    DowngradeStep {
        segment,
        to: LayoutVisibility::Hidden,
    }
}

use payform_foundation::SegmentKind::{Cvc, Expiry, Number, PostalCode};

const UNFOCUSED: &[DowngradeStep] = &[compress(Number), hide(PostalCode), hide(Cvc), hide(Expiry)];
const NUMBER_FOCUSED: &[DowngradeStep] =
    &[hide(PostalCode), hide(Cvc), hide(Expiry), compress(Number)];
const EXPIRY_FOCUSED: &[DowngradeStep] =
    &[hide(PostalCode), compress(Number), hide(Cvc), hide(Number)];
const CVC_FOCUSED: &[DowngradeStep] =
    &[compress(Number), hide(Number), hide(PostalCode), hide(Expiry)];
const POSTAL_FOCUSED: &[DowngradeStep] =
    &[compress(Number), hide(Number), hide(Expiry), hide(Cvc)];

/// Steps tried, in order, when the segments do not fit.
pub fn downgrade_order(focused: Option<SegmentKind>) -> &'static [DowngradeStep] {
    match focused {
        None | Some(SegmentKind::OneTimeCodeDigit) => UNFOCUSED,
        Some(Number) => NUMBER_FOCUSED,
        Some(Expiry) => EXPIRY_FOCUSED,
        Some(Cvc) => CVC_FOCUSED,
        Some(PostalCode) => POSTAL_FOCUSED,
    }
}
