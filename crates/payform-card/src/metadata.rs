//! BIN metadata oracle.
//!
//! Some prefixes need remote metadata before their brand (and therefore the
//! accepted lengths) can be trusted. The card field never reaches for a
//! process-wide cache: it is handed an oracle and asks it three things.
//!
//! 1. Is metadata for this prefix loaded?
//! 2. What brand does this number belong to, given what is loaded?
//! 3. Call me back when the prefix resolves.
//!
//! The oracle also names the BIN table it detects brands with, so lengths
//! and brands are judged against the same ranges.
//!
//! Callbacks must be delivered on the same thread that drives the field.

use crate::bin::BinTable;
use crate::brand::CardBrand;

/// Outcome of a metadata lookup for one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinResolution {
    /// Prefix the lookup was keyed by.
    pub prefix: String,
    /// Brand the metadata points at.
    pub brand: CardBrand,
    /// False when the lookup failed or returned partial data.
    pub complete: bool,
}

impl BinResolution {
    pub fn loaded(prefix: impl Into<String>, brand: CardBrand) -> Self {
        Self {
            prefix: prefix.into(),
            brand,
            complete: true,
        }
    }

    pub fn failed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            brand: CardBrand::Unknown,
            complete: false,
        }
    }
}

pub type ResolutionCallback = Box<dyn FnOnce(BinResolution)>;

/// Capability the card field uses to detect brands and wait for metadata.
pub trait BinMetadataOracle {
    /// Returns true if metadata covering `prefix` is available.
    fn is_loaded(&self, prefix: &str) -> bool;

    /// Brand for `number` using whatever metadata is currently loaded.
    fn brand(&self, number: &str) -> CardBrand;

    /// Registers `callback` to run once metadata for `prefix` resolves.
    ///
    /// Implementations may start a lookup here. Calling back synchronously
    /// is allowed.
    fn on_resolved(&self, prefix: &str, callback: ResolutionCallback);

    /// Prefix table used for brand detection and issued lengths.
    fn bin_table(&self) -> BinTable {
        BinTable::standard()
    }
}

/// Oracle backed only by the static BIN table; everything is always loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBinOracle {
    table: BinTable,
}

impl StaticBinOracle {
    pub fn new(table: BinTable) -> Self {
        Self { table }
    }
}

impl BinMetadataOracle for StaticBinOracle {
    fn is_loaded(&self, _prefix: &str) -> bool {
        true
    }

    fn brand(&self, number: &str) -> CardBrand {
        self.table.brand_for(number)
    }

    fn on_resolved(&self, prefix: &str, callback: ResolutionCallback) {
        callback(BinResolution::loaded(prefix, self.table.brand_for(prefix)));
    }

    fn bin_table(&self) -> BinTable {
        self.table
    }
}
