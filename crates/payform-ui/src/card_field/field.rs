//! Shared card field host.

use super::config::{CardFieldConfig, ConfigError};
use super::coordinator::{FieldCoordinator, PendingLookup, Transition};
use super::events::{CardFieldEvent, ListenerId};
use super::measure::{MonospacedMeasurer, SegmentMeasurer};
use crate::field_input::handle_card_key_event;
use payform_card::{
    BinMetadataOracle, BinResolution, CardBrand, CountryCode, StaticBinOracle, YearMonth,
};
use payform_foundation::{KeyEvent, SegmentKind, ValidationState};
use payform_ui_layout::{layout, FieldLayout};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(&CardFieldEvent)>;

struct CardFieldInner {
    coordinator: FieldCoordinator,
    measurer: Box<dyn SegmentMeasurer>,
    available_width: f32,
    layout: FieldLayout,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl CardFieldInner {
    /// Recomputes the layout, returning it if it changed.
    fn relayout(&mut self) -> Option<FieldLayout> {
        let segments = self.coordinator.segment_metrics(self.measurer.as_ref());
        let next = layout(
            self.available_width,
            self.coordinator.focused(),
            &segments,
            &self.coordinator.config().layout,
        );
        if next == self.layout {
            return None;
        }
        log::trace!(
            "card field layout: padding {} overflowed {}",
            next.padding,
            next.overflowed
        );
        self.layout = next.clone();
        Some(next)
    }
}

/// Card number, expiry, CVC and postal code entry.
///
/// `CardField` is a cheap handle; clones share the same field. Listeners
/// run after each mutation is fully committed, with no internal borrow
/// held, so they may read or mutate the field.
#[derive(Clone)]
pub struct CardField {
    inner: Rc<RefCell<CardFieldInner>>,
}

impl CardField {
    /// Field backed by the static BIN table.
    pub fn with_defaults() -> Self {
        let inner = Self::build(
            CardFieldConfig::default(),
            Rc::new(StaticBinOracle::default()),
            Box::new(MonospacedMeasurer::default()),
        );
        Self { inner }
    }

    pub fn new(
        config: CardFieldConfig,
        oracle: Rc<dyn BinMetadataOracle>,
    ) -> Result<Self, ConfigError> {
        Self::with_measurer(config, oracle, MonospacedMeasurer::default())
    }

    pub fn with_measurer(
        config: CardFieldConfig,
        oracle: Rc<dyn BinMetadataOracle>,
        measurer: impl SegmentMeasurer + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Self::build(config, oracle, Box::new(measurer)),
        })
    }

    fn build(
        config: CardFieldConfig,
        oracle: Rc<dyn BinMetadataOracle>,
        measurer: Box<dyn SegmentMeasurer>,
    ) -> Rc<RefCell<CardFieldInner>> {
        let mut inner = CardFieldInner {
            coordinator: FieldCoordinator::new(config, oracle, YearMonth::current()),
            measurer,
            available_width: 0.0,
            layout: FieldLayout::default(),
            listeners: Vec::new(),
            next_listener_id: 0,
        };
        inner.relayout();
        Rc::new(RefCell::new(inner))
    }

    // ========== Listeners ==========

    pub fn add_listener(&self, listener: impl Fn(&CardFieldEvent) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener_id);
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Returns false if no listener had this id.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(candidate, _)| *candidate != id);
        inner.listeners.len() != before
    }

    fn notify(&self, events: &[CardFieldEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }

    // ========== Mutation ==========

    /// Runs a coordinator operation, relays out, then notifies listeners and
    /// registers any metadata lookup. Returns whether anything happened.
    fn apply(&self, operation: impl FnOnce(&mut FieldCoordinator) -> Transition) -> bool {
        let (events, lookup) = {
            let mut inner = self.inner.borrow_mut();
            let mut transition = operation(&mut inner.coordinator);
            let mut events = std::mem::take(&mut transition.events);
            if let Some(layout) = inner.relayout() {
                events.push(CardFieldEvent::LayoutChanged(layout));
            }
            if transition.value_changed {
                events.push(CardFieldEvent::DidChange);
            }
            if transition.became_complete {
                events.push(CardFieldEvent::BecameComplete);
            }
            (events, transition.lookup)
        };
        let happened = !events.is_empty() || lookup.is_some();
        self.notify(&events);
        if let Some(lookup) = lookup {
            self.request_metadata(lookup);
        }
        happened
    }

    fn request_metadata(&self, lookup: PendingLookup) {
        let oracle = self.inner.borrow().coordinator.oracle();
        let weak: Weak<RefCell<CardFieldInner>> = Rc::downgrade(&self.inner);
        let PendingLookup { prefix, number } = lookup;
        log::debug!("waiting for BIN metadata for {prefix}");
        oracle.on_resolved(
            &prefix,
            Box::new(move |resolution: BinResolution| {
                let Some(inner) = weak.upgrade() else {
                    log::trace!("card field dropped before BIN metadata arrived");
                    return;
                };
                let field = CardField { inner };
                field.apply(|coordinator| coordinator.apply_resolution(resolution, &number));
            }),
        );
    }

    /// Types or pastes text into the focused segment.
    pub fn insert_text(&self, text: &str) {
        self.apply(|coordinator| coordinator.insert_text(text));
    }

    pub fn delete_backward(&self) {
        self.apply(FieldCoordinator::delete_backward);
    }

    pub fn request_focus(&self, kind: SegmentKind) {
        self.apply(|coordinator| coordinator.request_focus(kind));
    }

    pub fn clear_focus(&self) {
        self.apply(FieldCoordinator::clear_focus);
    }

    /// Returns false when there is no next segment.
    pub fn focus_next(&self) -> bool {
        self.apply(FieldCoordinator::focus_next)
    }

    pub fn focus_previous(&self) -> bool {
        self.apply(FieldCoordinator::focus_previous)
    }

    pub fn set_value(&self, kind: SegmentKind, raw: &str) {
        self.apply(|coordinator| coordinator.set_value(kind, raw));
    }

    pub fn clear(&self) {
        self.apply(FieldCoordinator::clear);
    }

    pub fn set_country(&self, country: CountryCode) {
        self.apply(|coordinator| coordinator.set_country(country));
    }

    /// Overrides the month used to reject expired cards.
    pub fn set_today(&self, today: YearMonth) {
        self.apply(|coordinator| coordinator.set_today(today));
    }

    pub fn set_available_width(&self, width: f32) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            if inner.available_width == width {
                None
            } else {
                inner.available_width = width;
                inner.relayout()
            }
        };
        if let Some(layout) = changed {
            self.notify(&[CardFieldEvent::LayoutChanged(layout)]);
        }
    }

    /// Routes a key press to the field. Returns true if it was consumed.
    pub fn handle_key_event(&self, event: &KeyEvent) -> bool {
        handle_card_key_event(self, event)
    }

    // ========== Queries ==========

    pub fn raw_value(&self, kind: SegmentKind) -> String {
        self.inner.borrow().coordinator.raw_value(kind).to_string()
    }

    pub fn formatted_value(&self, kind: SegmentKind) -> String {
        self.inner.borrow().coordinator.formatted_value(kind)
    }

    pub fn validation(&self, kind: SegmentKind) -> ValidationState {
        self.inner
            .borrow()
            .coordinator
            .validation(kind)
            .cloned()
            .unwrap_or_default()
    }

    pub fn focused(&self) -> Option<SegmentKind> {
        self.inner.borrow().coordinator.focused()
    }

    pub fn brand(&self) -> CardBrand {
        self.inner.borrow().coordinator.brand()
    }

    pub fn country(&self) -> CountryCode {
        self.inner.borrow().coordinator.country()
    }

    pub fn is_complete(&self) -> bool {
        self.inner.borrow().coordinator.is_complete()
    }

    pub fn postal_code_visible(&self) -> bool {
        self.inner.borrow().coordinator.postal_code_participates()
    }

    pub fn layout(&self) -> FieldLayout {
        self.inner.borrow().layout.clone()
    }
}

impl Default for CardField {
    fn default() -> Self {
        Self::with_defaults()
    }
}
