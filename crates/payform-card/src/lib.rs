//! Card data rules for Payform.
//!
//! - [`brand`] / [`bin`] - card brands and the static BIN prefix table
//! - [`metadata`] - the BIN metadata oracle consulted before a number is accepted
//! - [`country`] - country codes and their postal code policy
//! - [`validation`] - the segment validator
//! - [`formatting`] - display formatting and its inverse
//! - [`input`] - character filtering and length limits applied before validation

pub mod bin;
pub mod brand;
pub mod country;
pub mod formatting;
pub mod input;
pub mod metadata;
pub mod validation;

pub use bin::{bin_prefix, BinRange, BinTable, BIN_PREFIX_LENGTH};
pub use brand::{CardBrand, CvcLength};
pub use country::{CountryCode, CountryCodeError, PostalPolicy};
pub use formatting::{format, format_for_brand, unformat};
pub use metadata::{BinMetadataOracle, BinResolution, ResolutionCallback, StaticBinOracle};
pub use validation::{validate, ValidationContext, YearMonth};
