//! Static BIN (bank identification number) prefix table.
//!
//! A range matches a number when the number's leading digits fall between
//! `low` and `high`, comparing only as many digits as both sides have. This
//! makes short inputs match every range they could still grow into, so
//! `"3"` matches Amex, Diners Club and JCB at once.

use crate::brand::{CardBrand, MAX_CARD_NUMBER_LENGTH};
use smallvec::SmallVec;

/// Number of leading digits used to key remote metadata lookups.
pub const BIN_PREFIX_LENGTH: usize = 6;

/// Returns the metadata lookup prefix for `number`.
pub fn bin_prefix(number: &str) -> &str {
    let end = number
        .char_indices()
        .nth(BIN_PREFIX_LENGTH)
        .map_or(number.len(), |(index, _)| index);
    &number[..end]
}

/// An inclusive range of number prefixes belonging to one brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub low: &'static str,
    pub high: &'static str,
    /// Number lengths issued in this range, ascending.
    pub lengths: &'static [usize],
    pub brand: CardBrand,
}

impl BinRange {
    const fn new(
        low: &'static str,
        high: &'static str,
        lengths: &'static [usize],
        brand: CardBrand,
    ) -> Self {
        Self {
            low,
            high,
            lengths,
            brand,
        }
    }

    /// Returns true if `number` starts inside this range or could still grow into it.
    pub fn matches(&self, number: &str) -> bool {
        let width = number.len().min(self.low.len());
        let (Some(head), Some(low), Some(high)) = (
            number.get(..width),
            self.low.get(..width),
            self.high.get(..width),
        ) else {
            return false;
        };
        low <= head && head <= high
    }
}

const STANDARD_RANGES: &[BinRange] = &[
    BinRange::new("34", "34", &[15], CardBrand::Amex),
    BinRange::new("37", "37", &[15], CardBrand::Amex),
    BinRange::new("300", "305", &[16], CardBrand::DinersClub),
    BinRange::new("309", "309", &[16], CardBrand::DinersClub),
    BinRange::new("36", "36", &[14], CardBrand::DinersClub),
    BinRange::new("38", "39", &[16], CardBrand::DinersClub),
    BinRange::new("3528", "3589", &[16], CardBrand::Jcb),
    BinRange::new("6011", "6011", &[16], CardBrand::Discover),
    BinRange::new("644", "649", &[16], CardBrand::Discover),
    BinRange::new("65", "65", &[16], CardBrand::Discover),
    BinRange::new("62", "62", &[16, 17, 18, 19], CardBrand::UnionPay),
    BinRange::new("81", "81", &[16], CardBrand::UnionPay),
    BinRange::new("4", "4", &[16], CardBrand::Visa),
    BinRange::new("2221", "2720", &[16], CardBrand::Mastercard),
    BinRange::new("51", "55", &[16], CardBrand::Mastercard),
];

/// Brand lookup over a fixed set of BIN ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinTable {
    ranges: &'static [BinRange],
}

impl Default for BinTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl BinTable {
    /// Table of the well-known public prefix ranges.
    pub const fn standard() -> Self {
        Self {
            ranges: STANDARD_RANGES,
        }
    }

    pub fn ranges_matching<'a>(
        &self,
        number: &'a str,
    ) -> impl Iterator<Item = &'static BinRange> + 'a {
        let ranges = self.ranges;
        ranges.iter().filter(move |range| range.matches(number))
    }

    /// Distinct brands the number could still belong to.
    pub fn possible_brands(&self, number: &str) -> SmallVec<[CardBrand; 4]> {
        let mut brands = SmallVec::new();
        for range in self.ranges_matching(number) {
            if !brands.contains(&range.brand) {
                brands.push(range.brand);
            }
        }
        brands
    }

    /// Brand of `number`, or `Unknown` while it is empty or still ambiguous.
    pub fn brand_for(&self, number: &str) -> CardBrand {
        if number.is_empty() {
            return CardBrand::Unknown;
        }
        match self.possible_brands(number).as_slice() {
            [brand] => *brand,
            _ => CardBrand::Unknown,
        }
    }

    /// Lengths a `brand` number starting with `number` can be issued with,
    /// ascending.
    ///
    /// Only ranges of `brand` that `number` matches contribute, so a prefix
    /// shared by several ranges keeps all their lengths until the digits
    /// single one out. A brand with no matching range (for instance one
    /// supplied by remote metadata) falls back to the brand-wide lengths.
    pub fn issued_lengths(&self, number: &str, brand: CardBrand) -> SmallVec<[usize; 4]> {
        let mut lengths: SmallVec<[usize; 4]> = self
            .ranges_matching(number)
            .filter(|range| range.brand == brand)
            .flat_map(|range| range.lengths.iter().copied())
            .collect();
        if lengths.is_empty() {
            lengths.extend(brand.lengths().iter().copied());
        }
        lengths.sort_unstable();
        lengths.dedup();
        lengths
    }

    /// Longest number `number` may grow to once its brand is `brand`.
    pub fn max_number_length(&self, number: &str, brand: CardBrand) -> usize {
        self.issued_lengths(number, brand)
            .last()
            .copied()
            .unwrap_or(MAX_CARD_NUMBER_LENGTH)
    }
}
