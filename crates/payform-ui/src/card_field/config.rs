//! Card field configuration.

use payform_card::CountryCode;
use payform_foundation::SegmentKind;
use payform_ui_layout::LayoutConfig;
use smallvec::SmallVec;
use std::fmt;

/// Configuration rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A CVC maximum outside 3..=4.
    CvcMaxLength(usize),
    /// A one-time code field with no slots.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CvcMaxLength(max) => {
                write!(f, "CVC maximum length must be 3 or 4, got {max}")
            }
            ConfigError::ZeroCapacity => write!(f, "one-time code field needs at least one slot"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Behaviour switches for a [`CardField`](super::CardField).
#[derive(Debug, Clone, PartialEq)]
pub struct CardFieldConfig {
    /// Whether the postal code segment is offered at all.
    pub postal_code_entry_enabled: bool,
    pub country: CountryCode,
    /// Segments that move focus forward once they become valid.
    pub auto_advance: SmallVec<[SegmentKind; 4]>,
    /// Raises the CVC maximum for every brand.
    pub cvc_max_length: Option<usize>,
    pub layout: LayoutConfig,
}

impl Default for CardFieldConfig {
    fn default() -> Self {
        Self {
            postal_code_entry_enabled: true,
            country: CountryCode::US,
            auto_advance: SmallVec::from_slice(&[
                SegmentKind::Number,
                SegmentKind::Expiry,
                SegmentKind::Cvc,
            ]),
            cvc_max_length: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl CardFieldConfig {
    pub fn with_postal_code_entry(mut self, enabled: bool) -> Self {
        self.postal_code_entry_enabled = enabled;
        self
    }

    pub fn with_country(mut self, country: CountryCode) -> Self {
        self.country = country;
        self
    }

    pub fn with_auto_advance(mut self, segments: &[SegmentKind]) -> Self {
        self.auto_advance = SmallVec::from_slice(segments);
        self
    }

    pub fn with_cvc_max_length(mut self, max: usize) -> Self {
        self.cvc_max_length = Some(max);
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn auto_advances(&self, kind: SegmentKind) -> bool {
        self.auto_advance.contains(&kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.cvc_max_length {
            Some(max) if !(3..=4).contains(&max) => Err(ConfigError::CvcMaxLength(max)),
            _ => Ok(()),
        }
    }
}
