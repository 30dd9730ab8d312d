//! Segment content measurement feeding the layout engine.

use payform_card::formatting::last_number_group;
use payform_card::CardBrand;
use payform_foundation::SegmentKind;
use payform_ui_layout::SegmentMetrics;

/// Measures rendered text widths.
pub trait SegmentMeasurer {
    fn text_width(&self, text: &str) -> f32;
}

/// Fixed advance per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospacedMeasurer {
    pub char_width: f32,
}

impl MonospacedMeasurer {
    pub const CHAR_WIDTH: f32 = 8.0;
}

impl Default for MonospacedMeasurer {
    fn default() -> Self {
        Self {
            char_width: Self::CHAR_WIDTH,
        }
    }
}

impl SegmentMeasurer for MonospacedMeasurer {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

/// Placeholder shown in an empty segment.
pub fn placeholder(kind: SegmentKind, brand: CardBrand) -> &'static str {
    match kind {
        SegmentKind::Number => match brand {
            CardBrand::Amex => "3782 822463 10005",
            CardBrand::DinersClub => "3622 720627 1667",
            _ => "4242 4242 4242 4242",
        },
        SegmentKind::Expiry => "MM/YY",
        SegmentKind::Cvc => {
            if brand == CardBrand::Amex {
                "CVV"
            } else {
                "CVC"
            }
        }
        SegmentKind::PostalCode => "ZIP",
        SegmentKind::OneTimeCodeDigit => "0",
    }
}

/// Metrics for one segment: the wider of its placeholder and formatted value.
///
/// The number segment also gets a compressed width, which shows only its
/// last display group (or the placeholder's last group while empty).
pub fn segment_metrics(
    measurer: &dyn SegmentMeasurer,
    kind: SegmentKind,
    raw: &str,
    formatted: &str,
    brand: CardBrand,
) -> SegmentMetrics {
    let placeholder = placeholder(kind, brand);
    let full_width = measurer
        .text_width(placeholder)
        .max(measurer.text_width(formatted));
    if kind != SegmentKind::Number {
        return SegmentMetrics::new(full_width);
    }
    let suffix = if raw.is_empty() {
        placeholder.rsplit(' ').next().unwrap_or(placeholder)
    } else {
        last_number_group(raw, brand)
    };
    SegmentMetrics::compressible(full_width, measurer.text_width(suffix))
}
