//! One-time code entry over a fixed row of single-digit slots.
//!
//! The field has no string buffer. Its text lives in a [`SlotBuffer`] and
//! the selection is a [`TextRange`] into it, so every editing primitive a
//! platform text input needs (position arithmetic, range construction,
//! comparison, extension) is answered by the slot model.

use crate::card_field::{ConfigError, ListenerId};
use crate::field_input::handle_one_time_code_key_event;
use payform_card::input::filter_input;
use payform_card::validation::validate_one_time_code_digit;
use payform_foundation::{
    KeyEvent, RangeError, SegmentKind, SlotBuffer, TextPosition, TextRange, ValidationState,
};
use smallvec::SmallVec;

/// Notifications from a [`OneTimeCodeField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneTimeCodeEvent {
    DidChange,
    /// Every slot became filled.
    BecameComplete,
}

type Listener = Box<dyn Fn(&OneTimeCodeEvent)>;

pub struct OneTimeCodeField {
    buffer: SlotBuffer,
    selection: TextRange,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl OneTimeCodeField {
    pub const DEFAULT_CAPACITY: usize = 6;

    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            buffer: SlotBuffer::new(capacity),
            selection: TextRange::caret(TextPosition::zero()),
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The slot model, for position and range queries.
    pub fn slots(&self) -> &SlotBuffer {
        &self.buffer
    }

    /// Filled slots concatenated in order.
    pub fn value(&self) -> String {
        self.buffer.text()
    }

    pub fn is_complete(&self) -> bool {
        self.buffer.is_full()
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn set_selection(&mut self, selection: TextRange) -> Result<(), RangeError> {
        self.selection = self.buffer.text_range(selection.start(), selection.end())?;
        Ok(())
    }

    /// Validation state of each slot.
    pub fn slot_states(&self) -> SmallVec<[ValidationState; 8]> {
        self.buffer
            .slots()
            .map(|slot| {
                let raw = slot.map(String::from).unwrap_or_default();
                validate_one_time_code_digit(&raw)
            })
            .collect()
    }

    /// Slot that receives the next digit, if the caret sits on one.
    pub fn caret_slot(&self) -> Option<usize> {
        let index = self.selection.start().index();
        (self.selection.is_empty() && index < self.capacity()).then_some(index)
    }

    pub fn add_listener(&mut self, listener: impl Fn(&OneTimeCodeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(candidate, _)| *candidate != id);
        self.listeners.len() != before
    }

    // ========== Editing ==========

    /// Writes digits from `text` over the selection. Non-digits are ignored
    /// and digits that do not fit are dropped.
    pub fn insert_text(&mut self, text: &str) {
        let digits = filter_input(SegmentKind::OneTimeCodeDigit, text);
        if digits.is_empty() {
            return;
        }
        self.edit(|buffer, selection| {
            let edit = buffer.replace(selection, &digits);
            if edit.dropped > 0 {
                log::debug!("one-time code dropped {} pasted digits", edit.dropped);
            }
            TextRange::caret(edit.caret)
        });
    }

    /// Clears the selection, or the slot before the caret.
    pub fn delete_backward(&mut self) {
        self.edit(|buffer, selection| buffer.delete_backward(selection));
    }

    pub fn clear(&mut self) {
        self.edit(|buffer, _| {
            buffer.clear_all();
            TextRange::caret(buffer.beginning_of_document())
        });
    }

    pub fn select_all(&mut self) {
        self.selection = self.buffer.full_range();
    }

    /// Moves the caret by `offset`, stopping at either end. A selection
    /// first collapses to the edge in the direction of travel.
    pub fn move_caret(&mut self, offset: isize) {
        let from = if offset < 0 {
            self.selection.start()
        } else {
            self.selection.end()
        };
        let origin = if self.selection.is_empty() { offset } else { 0 };
        let target = self.buffer.position(from, origin).unwrap_or(if offset < 0 {
            self.buffer.beginning_of_document()
        } else {
            self.buffer.end_of_document()
        });
        self.selection = TextRange::caret(target);
    }

    pub fn move_caret_to_start(&mut self) {
        self.selection = TextRange::caret(self.buffer.beginning_of_document());
    }

    pub fn move_caret_to_end(&mut self) {
        self.selection = TextRange::caret(self.buffer.end_of_document());
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        handle_one_time_code_key_event(self, event)
    }

    fn edit(&mut self, f: impl FnOnce(&mut SlotBuffer, TextRange) -> TextRange) {
        let was_complete = self.is_complete();
        let before = self.buffer.clone();
        self.selection = f(&mut self.buffer, self.selection);
        if self.buffer == before {
            return;
        }
        let mut events: SmallVec<[OneTimeCodeEvent; 2]> = SmallVec::new();
        events.push(OneTimeCodeEvent::DidChange);
        if !was_complete && self.is_complete() {
            events.push(OneTimeCodeEvent::BecameComplete);
        }
        for event in &events {
            for (_, listener) in &self.listeners {
                listener(event);
            }
        }
    }
}

impl Default for OneTimeCodeField {
    fn default() -> Self {
        Self {
            buffer: SlotBuffer::new(Self::DEFAULT_CAPACITY),
            selection: TextRange::caret(TextPosition::zero()),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }
}

#[cfg(test)]
#[path = "tests/one_time_code_tests.rs"]
mod tests;
