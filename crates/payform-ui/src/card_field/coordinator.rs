//! The card field state machine.
//!
//! [`FieldCoordinator`] owns the four card segments in declared order
//! (number, expiry, CVC, postal code) and the focus pointer. Every operation
//! is synchronous and returns a [`Transition`] describing what happened;
//! the coordinator itself never notifies anyone and never talks to the
//! metadata oracle asynchronously. Delivering events and registering
//! lookups is left to the [`CardField`](super::CardField) host.
//!
//! Focus moves on its own in two situations:
//!
//! - **Auto-advance.** A focused segment configured to advance moves focus
//!   to the next participating segment when an edit makes it valid. CVC
//!   waits until its length reaches the maximum for the detected brand.
//! - **Auto-retreat.** Backspace on an empty segment moves focus to the
//!   previous participating segment and deletes that segment's last
//!   character in the same transition.

use super::config::CardFieldConfig;
use super::events::CardFieldEvent;
use super::measure::{segment_metrics, SegmentMeasurer};
use payform_card::brand::MAX_CARD_NUMBER_LENGTH;
use payform_card::input::{append_filtered, append_postal_code, max_length};
use payform_card::validation::dependents;
use payform_card::{
    bin_prefix, format_for_brand, validate, BinMetadataOracle, BinResolution, CardBrand, CountryCode,
    ValidationContext, YearMonth,
};
use payform_foundation::{FocusManager, Segment, SegmentKind, ValidationState};
use payform_ui_layout::SegmentMetrics;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::rc::Rc;

/// A metadata lookup the host should register with the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub prefix: String,
    /// Raw card number at the time of the request. A resolution arriving
    /// after the number changed is discarded.
    pub number: String,
}

/// Result of one coordinator operation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transition {
    /// Validation and focus events, in the order they happened.
    pub events: Vec<CardFieldEvent>,
    /// A segment value or validation state changed.
    pub value_changed: bool,
    pub became_complete: bool,
    pub lookup: Option<PendingLookup>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && !self.value_changed && self.lookup.is_none()
    }

    pub fn focus_moved(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, CardFieldEvent::FocusChanged { .. }))
    }
}

pub struct FieldCoordinator {
    segments: SmallVec<[Segment; 4]>,
    focus: FocusManager<SegmentKind>,
    config: CardFieldConfig,
    country: CountryCode,
    today: YearMonth,
    oracle: Rc<dyn BinMetadataOracle>,
    /// Prefixes whose metadata lookup failed; validated without it.
    best_effort_prefixes: FxHashSet<String>,
    brand: CardBrand,
    complete: bool,
}

impl FieldCoordinator {
    pub fn new(config: CardFieldConfig, oracle: Rc<dyn BinMetadataOracle>, today: YearMonth) -> Self {
        let mut coordinator = Self {
            segments: SegmentKind::CARD_ORDER.into_iter().map(Segment::new).collect(),
            focus: FocusManager::new(),
            country: config.country,
            config,
            today,
            oracle,
            best_effort_prefixes: FxHashSet::default(),
            brand: CardBrand::Unknown,
            complete: false,
        };
        let mut initial = Transition::default();
        for kind in SegmentKind::CARD_ORDER {
            coordinator.revalidate(kind, &mut initial);
        }
        coordinator.complete = coordinator.compute_complete();
        coordinator
    }

    // ========== Queries ==========

    pub fn segment(&self, kind: SegmentKind) -> Option<&Segment> {
        kind.card_index().and_then(|index| self.segments.get(index))
    }

    fn segment_mut(&mut self, kind: SegmentKind) -> Option<&mut Segment> {
        kind.card_index()
            .and_then(move |index| self.segments.get_mut(index))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn raw_value(&self, kind: SegmentKind) -> &str {
        self.segment(kind).map(Segment::raw_value).unwrap_or("")
    }

    pub fn validation(&self, kind: SegmentKind) -> Option<&ValidationState> {
        self.segment(kind).map(Segment::validation)
    }

    /// Display form of a segment's value.
    pub fn formatted_value(&self, kind: SegmentKind) -> String {
        format_for_brand(kind, self.raw_value(kind), self.brand)
    }

    pub fn focused(&self) -> Option<SegmentKind> {
        self.focus.active()
    }

    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    pub fn country(&self) -> CountryCode {
        self.country
    }

    pub fn today(&self) -> YearMonth {
        self.today
    }

    pub fn config(&self) -> &CardFieldConfig {
        &self.config
    }

    pub(crate) fn oracle(&self) -> Rc<dyn BinMetadataOracle> {
        Rc::clone(&self.oracle)
    }

    /// Whether the postal code segment is shown and required.
    pub fn postal_code_participates(&self) -> bool {
        self.config.postal_code_entry_enabled && self.country.postal_policy().is_required()
    }

    /// Segments the user can reach, in declared order. These are also the
    /// segments that must be valid for the field to be complete.
    pub fn participating(&self) -> impl Iterator<Item = SegmentKind> + '_ {
        SegmentKind::CARD_ORDER
            .into_iter()
            .filter(move |kind| *kind != SegmentKind::PostalCode || self.postal_code_participates())
    }

    pub fn is_participating(&self, kind: SegmentKind) -> bool {
        self.participating().any(|candidate| candidate == kind)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn compute_complete(&self) -> bool {
        self.participating().all(|kind| {
            self.validation(kind)
                .is_some_and(ValidationState::is_valid)
        })
    }

    pub fn validation_context(&self) -> ValidationContext {
        let number = self.raw_value(SegmentKind::Number);
        let prefix = bin_prefix(number);
        ValidationContext {
            brand: self.brand,
            metadata_loaded: number.is_empty() || self.metadata_available(prefix),
            postal_policy: self.country.postal_policy(),
            today: self.today,
            cvc_max_override: self.config.cvc_max_length,
            bin_table: self.oracle.bin_table(),
        }
    }

    fn metadata_available(&self, prefix: &str) -> bool {
        self.oracle.is_loaded(prefix) || self.best_effort_prefixes.contains(prefix)
    }

    /// Layout input for every participating segment.
    pub fn segment_metrics(
        &self,
        measurer: &dyn SegmentMeasurer,
    ) -> SmallVec<[(SegmentKind, SegmentMetrics); 4]> {
        self.participating()
            .map(|kind| {
                let metrics = segment_metrics(
                    measurer,
                    kind,
                    self.raw_value(kind),
                    &self.formatted_value(kind),
                    self.brand,
                );
                (kind, metrics)
            })
            .collect()
    }

    fn next_participating(&self, kind: SegmentKind) -> Option<SegmentKind> {
        self.participating()
            .skip_while(|candidate| *candidate != kind)
            .nth(1)
    }

    fn previous_participating(&self, kind: SegmentKind) -> Option<SegmentKind> {
        self.participating()
            .take_while(|candidate| *candidate != kind)
            .last()
    }

    // ========== Operations ==========

    /// Types or pastes `text` into the focused segment.
    pub fn insert_text(&mut self, text: &str) -> Transition {
        let mut transition = Transition::default();
        let Some(kind) = self.focus.active() else {
            log::trace!("no focused segment, dropping {text:?}");
            return transition;
        };
        let candidate = self.candidate_value(kind, self.raw_value(kind), text);
        self.apply_value(kind, candidate, true, &mut transition);
        self.finish(&mut transition);
        transition
    }

    /// Backspace in the focused segment, retreating when it is empty.
    pub fn delete_backward(&mut self) -> Transition {
        let mut transition = Transition::default();
        let Some(kind) = self.focus.active() else {
            return transition;
        };

        let target = if !self.raw_value(kind).is_empty() {
            Some(kind)
        } else if let Some(previous) = self.previous_participating(kind) {
            log::debug!("auto-retreat {kind} -> {previous}");
            self.move_focus(Some(previous), &mut transition);
            Some(previous)
        } else {
            None
        };

        if let Some(target) = target {
            let mut raw = self.raw_value(target).to_string();
            if raw.pop().is_some() {
                self.apply_value(target, raw, false, &mut transition);
            }
        }
        self.finish(&mut transition);
        transition
    }

    pub fn request_focus(&mut self, kind: SegmentKind) -> Transition {
        let mut transition = Transition::default();
        if !self.is_participating(kind) {
            log::debug!("ignoring focus request for {kind}, segment is not shown");
            return transition;
        }
        self.move_focus(Some(kind), &mut transition);
        transition
    }

    pub fn clear_focus(&mut self) -> Transition {
        let mut transition = Transition::default();
        self.move_focus(None, &mut transition);
        transition
    }

    /// Moves focus to the next participating segment, or the first one when
    /// nothing is focused. Nothing happens past the last segment.
    pub fn focus_next(&mut self) -> Transition {
        let target = match self.focus.active() {
            Some(kind) => self.next_participating(kind),
            None => self.participating().next(),
        };
        let mut transition = Transition::default();
        if target.is_some() {
            self.move_focus(target, &mut transition);
        }
        transition
    }

    pub fn focus_previous(&mut self) -> Transition {
        let target = match self.focus.active() {
            Some(kind) => self.previous_participating(kind),
            None => self.participating().last(),
        };
        let mut transition = Transition::default();
        if target.is_some() {
            self.move_focus(target, &mut transition);
        }
        transition
    }

    /// Replaces a segment's value through the same filtering and validation
    /// as typed input.
    pub fn set_value(&mut self, kind: SegmentKind, raw: &str) -> Transition {
        let mut transition = Transition::default();
        let candidate = self.candidate_value(kind, "", raw);
        self.apply_value(kind, candidate, true, &mut transition);
        self.finish(&mut transition);
        transition
    }

    /// Empties every segment and drops focus.
    pub fn clear(&mut self) -> Transition {
        let mut transition = Transition::default();
        self.move_focus(None, &mut transition);
        for kind in SegmentKind::CARD_ORDER {
            self.apply_value(kind, String::new(), false, &mut transition);
        }
        self.finish(&mut transition);
        transition
    }

    pub fn set_country(&mut self, country: CountryCode) -> Transition {
        let mut transition = Transition::default();
        if country == self.country {
            return transition;
        }
        let participated = self.postal_code_participates();
        self.country = country;
        log::debug!("country set to {country}");

        if participated && !self.postal_code_participates() {
            if self.focus.is_focused(SegmentKind::PostalCode) {
                let previous = self.previous_participating(SegmentKind::PostalCode);
                self.move_focus(previous, &mut transition);
            }
            transition.value_changed = true;
        } else if !participated && self.postal_code_participates() {
            transition.value_changed = true;
        }
        self.revalidate(SegmentKind::PostalCode, &mut transition);
        self.finish(&mut transition);
        transition
    }

    pub fn set_today(&mut self, today: YearMonth) -> Transition {
        let mut transition = Transition::default();
        self.today = today;
        self.revalidate(SegmentKind::Expiry, &mut transition);
        self.finish(&mut transition);
        transition
    }

    /// Applies a metadata resolution requested for `requested_number`.
    ///
    /// Resolutions for a number the user has since edited are dropped. An
    /// incomplete resolution marks its prefix as best-effort so the number
    /// is no longer held back waiting for metadata.
    pub fn apply_resolution(
        &mut self,
        resolution: BinResolution,
        requested_number: &str,
    ) -> Transition {
        let mut transition = Transition::default();
        if self.raw_value(SegmentKind::Number) != requested_number {
            log::debug!(
                "discarding stale BIN metadata for {} (requested for {} digits)",
                resolution.prefix,
                requested_number.len()
            );
            return transition;
        }
        if !resolution.complete {
            log::warn!(
                "BIN metadata for {} unavailable, validating without it",
                resolution.prefix
            );
            self.best_effort_prefixes.insert(resolution.prefix);
        }

        let was_valid = self
            .validation(SegmentKind::Number)
            .is_some_and(ValidationState::is_valid);
        self.refresh_brand();
        self.revalidate_with_dependents(SegmentKind::Number, &mut transition);
        self.maybe_advance(SegmentKind::Number, was_valid, &mut transition);
        self.finish(&mut transition);
        transition
    }

    // ========== Internals ==========

    /// Filters `incoming`, appends it to `current` and truncates to the
    /// segment's maximum length.
    fn candidate_value(&self, kind: SegmentKind, current: &str, incoming: &str) -> String {
        match kind {
            SegmentKind::Number => {
                let mut candidate =
                    append_filtered(kind, current, incoming, MAX_CARD_NUMBER_LENGTH);
                let brand = self.brand_for(&candidate);
                let limit = self
                    .oracle
                    .bin_table()
                    .max_number_length(&candidate, brand);
                candidate.truncate(limit);
                candidate
            }
            SegmentKind::PostalCode => {
                append_postal_code(current, incoming, self.country.postal_policy())
            }
            _ => {
                let limit = max_length(kind, self.brand, self.validation_context().cvc_length());
                append_filtered(kind, current, incoming, limit)
            }
        }
    }

    fn brand_for(&self, number: &str) -> CardBrand {
        if number.is_empty() {
            CardBrand::Unknown
        } else {
            self.oracle.brand(number)
        }
    }

    fn refresh_brand(&mut self) {
        let brand = self.brand_for(self.raw_value(SegmentKind::Number));
        if brand != self.brand {
            log::debug!("card brand {} -> {}", self.brand, brand);
            self.brand = brand;
        }
    }

    fn apply_value(
        &mut self,
        kind: SegmentKind,
        raw: String,
        advance: bool,
        transition: &mut Transition,
    ) {
        let Some(segment) = self.segment_mut(kind) else {
            return;
        };
        if segment.raw_value() == raw {
            return;
        }
        let was_valid = segment.validation().is_valid();
        segment.set_raw_value(raw);
        transition.value_changed = true;

        if kind == SegmentKind::Number {
            self.refresh_brand();
            transition.lookup = self.lookup_for_number();
        }
        self.revalidate_with_dependents(kind, transition);
        if advance {
            self.maybe_advance(kind, was_valid, transition);
        }
    }

    fn lookup_for_number(&self) -> Option<PendingLookup> {
        let number = self.raw_value(SegmentKind::Number);
        if number.is_empty() {
            return None;
        }
        let prefix = bin_prefix(number);
        if self.metadata_available(prefix) {
            return None;
        }
        Some(PendingLookup {
            prefix: prefix.to_string(),
            number: number.to_string(),
        })
    }

    fn revalidate_with_dependents(&mut self, kind: SegmentKind, transition: &mut Transition) {
        self.revalidate(kind, transition);
        for dependent in dependents(kind) {
            self.revalidate(*dependent, transition);
        }
    }

    fn revalidate(&mut self, kind: SegmentKind, transition: &mut Transition) {
        let context = self.validation_context();
        let Some(segment) = self.segment_mut(kind) else {
            return;
        };
        let state = validate(kind, segment.raw_value(), &context);
        if segment.set_validation(state.clone()) {
            log::trace!("{kind} is now {state:?}");
            transition.value_changed = true;
            transition.events.push(CardFieldEvent::ValidationChanged {
                segment: kind,
                state,
            });
        }
    }

    fn maybe_advance(&mut self, kind: SegmentKind, was_valid: bool, transition: &mut Transition) {
        if !self.focus.is_focused(kind) || !self.config.auto_advances(kind) {
            return;
        }
        let Some(segment) = self.segment(kind) else {
            return;
        };
        if !segment.validation().is_valid() {
            return;
        }
        if kind == SegmentKind::Cvc {
            let max = self.validation_context().cvc_length().max;
            if segment.raw_value().chars().count() < max {
                log::trace!("cvc valid but below maximum length {max}, holding focus");
                return;
            }
        } else if was_valid {
            return;
        }

        match self.next_participating(kind) {
            Some(next) => {
                log::debug!("auto-advance {kind} -> {next}");
                self.move_focus(Some(next), transition);
            }
            None => log::debug!("{kind} is valid and is the last segment"),
        }
    }

    fn move_focus(&mut self, target: Option<SegmentKind>, transition: &mut Transition) {
        let from = self.focus.active();
        let moved = match target {
            Some(kind) => self.focus.request_focus(kind).is_some(),
            None => self.focus.clear_focus().is_some(),
        };
        if !moved {
            return;
        }
        if let Some(segment) = from.and_then(|kind| self.segment_mut(kind)) {
            segment.set_focused(false);
        }
        if let Some(segment) = target.and_then(|kind| self.segment_mut(kind)) {
            segment.set_focused(true);
        }
        transition
            .events
            .push(CardFieldEvent::FocusChanged { from, to: target });
    }

    fn finish(&mut self, transition: &mut Transition) {
        let complete = self.compute_complete();
        if complete && !self.complete {
            log::debug!("card field complete");
            transition.became_complete = true;
        }
        self.complete = complete;
    }
}

#[cfg(test)]
#[path = "../tests/coordinator_tests.rs"]
mod tests;
