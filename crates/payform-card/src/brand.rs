//! Card brands and their per-brand rules.

use std::fmt;

/// Longest card number any brand accepts.
pub const MAX_CARD_NUMBER_LENGTH: usize = 19;

/// Card network a number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Jcb,
    DinersClub,
    UnionPay,
    /// Brand not yet determined, or not recognised.
    #[default]
    Unknown,
}

/// Accepted CVC lengths for a brand, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CvcLength {
    pub min: usize,
    pub max: usize,
}

impl CvcLength {
    pub const fn exactly(length: usize) -> Self {
        Self {
            min: length,
            max: length,
        }
    }

    /// Raises the maximum to `max`, never dropping below the brand minimum.
    pub fn with_max_override(self, max: Option<usize>) -> Self {
        match max {
            Some(max) => Self {
                min: self.min,
                max: max.max(self.min),
            },
            None => self,
        }
    }
}

impl CardBrand {
    /// Card number lengths this brand issues, ascending.
    pub fn lengths(self) -> &'static [usize] {
        match self {
            CardBrand::Amex => &[15],
            CardBrand::DinersClub => &[14, 16],
            CardBrand::UnionPay => &[16, 17, 18, 19],
            CardBrand::Visa
            | CardBrand::Mastercard
            | CardBrand::Discover
            | CardBrand::Jcb => &[16],
            CardBrand::Unknown => &[],
        }
    }

    /// Longest number this brand accepts; unknown brands allow the global maximum.
    pub fn max_length(self) -> usize {
        self.lengths()
            .last()
            .copied()
            .unwrap_or(MAX_CARD_NUMBER_LENGTH)
    }

    pub fn cvc_length(self) -> CvcLength {
        match self {
            CardBrand::Amex => CvcLength::exactly(4),
            CardBrand::Unknown => CvcLength { min: 3, max: 4 },
            _ => CvcLength::exactly(3),
        }
    }

    /// Digit group lengths used to display `number`.
    pub fn groupings(self, number: &str) -> &'static [usize] {
        match self {
            CardBrand::Amex => &[4, 6, 5],
            CardBrand::DinersClub if number.starts_with("36") => &[4, 6, 4],
            _ => &[4, 4, 4, 4, 3],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Amex => "American Express",
            CardBrand::Discover => "Discover",
            CardBrand::Jcb => "JCB",
            CardBrand::DinersClub => "Diners Club",
            CardBrand::UnionPay => "UnionPay",
            CardBrand::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
