//! A BIN metadata oracle resolved by hand.

use payform_card::{BinMetadataOracle, BinResolution, BinTable, CardBrand, ResolutionCallback};
use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// Oracle whose lookups stay pending until the test resolves or fails them.
///
/// Brands come from the static BIN table unless a resolution supplied one.
/// Nothing is loaded at construction.
#[derive(Default)]
pub struct FakeBinOracle {
    table: BinTable,
    loaded: RefCell<FxHashMap<String, CardBrand>>,
    pending: RefCell<Vec<(String, ResolutionCallback)>>,
}

impl FakeBinOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle with metadata for `prefixes` already loaded.
    pub fn with_loaded(prefixes: &[&str]) -> Self {
        let oracle = Self::new();
        for prefix in prefixes {
            let brand = oracle.table.brand_for(prefix);
            oracle.loaded.borrow_mut().insert(prefix.to_string(), brand);
        }
        oracle
    }

    /// Prefixes with callbacks waiting, in registration order.
    pub fn pending_prefixes(&self) -> Vec<String> {
        self.pending
            .borrow()
            .iter()
            .map(|(prefix, _)| prefix.clone())
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Loads `prefix` as `brand` and runs every callback waiting on it.
    /// Returns how many callbacks ran.
    pub fn resolve(&self, prefix: &str, brand: CardBrand) -> usize {
        self.loaded.borrow_mut().insert(prefix.to_string(), brand);
        self.deliver(prefix, || BinResolution::loaded(prefix, brand))
    }

    /// Reports a failed lookup for `prefix` to every callback waiting on it.
    pub fn fail(&self, prefix: &str) -> usize {
        self.deliver(prefix, || BinResolution::failed(prefix))
    }

    fn deliver(&self, prefix: &str, resolution: impl Fn() -> BinResolution) -> usize {
        let waiting: Vec<ResolutionCallback> = {
            let mut pending = self.pending.borrow_mut();
            let (matching, rest): (Vec<_>, Vec<_>) = pending
                .drain(..)
                .partition(|(candidate, _)| candidate == prefix);
            *pending = rest;
            matching.into_iter().map(|(_, callback)| callback).collect()
        };
        let count = waiting.len();
        log::trace!("delivering {count} resolutions for {prefix}");
        for callback in waiting {
            callback(resolution());
        }
        count
    }

    fn loaded_entry(&self, number: &str) -> Option<CardBrand> {
        self.loaded
            .borrow()
            .iter()
            .filter(|(prefix, _)| number.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, brand)| *brand)
    }
}

impl BinMetadataOracle for FakeBinOracle {
    fn is_loaded(&self, prefix: &str) -> bool {
        self.loaded_entry(prefix).is_some()
    }

    fn brand(&self, number: &str) -> CardBrand {
        match self.loaded_entry(number) {
            Some(brand) if brand != CardBrand::Unknown => brand,
            _ => self.table.brand_for(number),
        }
    }

    fn on_resolved(&self, prefix: &str, callback: ResolutionCallback) {
        self.pending
            .borrow_mut()
            .push((prefix.to_string(), callback));
    }

    fn bin_table(&self) -> BinTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn lookups_wait_for_resolution() {
        let oracle = FakeBinOracle::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        oracle.on_resolved("424242", Box::new(move |r: BinResolution| sink.borrow_mut().push(r)));
        assert!(!oracle.is_loaded("424242"));
        assert_eq!(oracle.pending_prefixes(), vec!["424242".to_string()]);

        assert_eq!(oracle.resolve("424242", CardBrand::Visa), 1);
        assert!(oracle.is_loaded("424242"));
        assert_eq!(
            seen.borrow().as_slice(),
            &[BinResolution::loaded("424242", CardBrand::Visa)]
        );
        assert_eq!(oracle.pending_count(), 0);
    }

    #[test]
    fn failure_does_not_load_prefix() {
        let oracle = FakeBinOracle::new();
        oracle.on_resolved("424242", Box::new(|_| {}));
        assert_eq!(oracle.fail("424242"), 1);
        assert!(!oracle.is_loaded("424242"));
    }

    #[test]
    fn brand_falls_back_to_static_table() {
        let oracle = FakeBinOracle::with_loaded(&["4"]);
        assert_eq!(oracle.brand("4242"), CardBrand::Visa);
        assert!(oracle.is_loaded("424242"));
    }
}
