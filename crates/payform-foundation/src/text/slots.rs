//! Fixed-capacity slot array standing in for a text buffer.

use super::{RangeError, TextPosition, TextRange};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Outcome of writing text into a [`SlotBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotEdit {
    /// Characters stored in slots.
    pub written: usize,
    /// Characters that did not fit and were discarded.
    pub dropped: usize,
    /// Caret position after the edit.
    pub caret: TextPosition,
}

/// A fixed number of single-character slots.
///
/// The capacity is chosen at construction and never changes. Slots are
/// positional: clearing a slot leaves a hole rather than shifting later
/// slots down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBuffer {
    slots: SmallVec<[Option<char>; 8]>,
}

impl SlotBuffer {
    /// Creates an empty buffer with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: SmallVec::from_elem(None, capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Character stored in slot `index`, if any.
    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn slots(&self) -> impl Iterator<Item = Option<char>> + '_ {
        self.slots.iter().copied()
    }

    /// Number of occupied slots.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Occupied slots concatenated in order.
    pub fn text(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    // ========== Position arithmetic ==========

    pub fn beginning_of_document(&self) -> TextPosition {
        TextPosition::zero()
    }

    pub fn end_of_document(&self) -> TextPosition {
        TextPosition::new(self.capacity())
    }

    /// Returns true if `0 <= position <= capacity`.
    pub fn is_valid_position(&self, position: TextPosition) -> bool {
        position.index() <= self.capacity()
    }

    /// Position `offset` slots away from `from`, or `None` when that falls outside `[0, capacity]`.
    pub fn position(&self, from: TextPosition, offset: isize) -> Option<TextPosition> {
        from.index()
            .checked_add_signed(offset)
            .map(TextPosition::new)
            .filter(|position| self.is_valid_position(*position))
    }

    /// Signed distance from `from` to `to`.
    pub fn offset(&self, from: TextPosition, to: TextPosition) -> isize {
        let from = from.index() as isize;
        let to = to.index() as isize;
        to - from
    }

    /// Orders two positions by index.
    pub fn compare(&self, a: TextPosition, b: TextPosition) -> Ordering {
        a.index().cmp(&b.index())
    }

    // ========== Range construction ==========

    /// Builds a range from two in-bounds endpoints given in ascending order.
    pub fn text_range(&self, from: TextPosition, to: TextPosition) -> Result<TextRange, RangeError> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        TextRange::new(from, to)
    }

    /// Extends `range` so that it also covers `to`.
    pub fn extend(&self, range: TextRange, to: TextPosition) -> Result<TextRange, RangeError> {
        self.check_bounds(range.end())?;
        self.check_bounds(to)?;
        Ok(range.extended_to(to))
    }

    /// Range covering every slot.
    pub fn full_range(&self) -> TextRange {
        TextRange::caret(self.beginning_of_document()).extended_to(self.end_of_document())
    }

    fn check_bounds(&self, position: TextPosition) -> Result<(), RangeError> {
        if self.is_valid_position(position) {
            Ok(())
        } else {
            Err(RangeError::OutOfBounds {
                index: position.index(),
                capacity: self.capacity(),
            })
        }
    }

    /// Occupied slots within `range`, concatenated.
    pub fn text_in(&self, range: TextRange) -> String {
        let (start, end) = self.clamp(range);
        self.slots[start..end].iter().flatten().collect()
    }

    fn clamp(&self, range: TextRange) -> (usize, usize) {
        let capacity = self.capacity();
        (
            range.start().index().min(capacity),
            range.end().index().min(capacity),
        )
    }

    // ========== Editing ==========

    /// Writes `text` into the slots selected by `range`.
    ///
    /// A non-empty range accepts at most `range.len()` characters and any of
    /// its slots left unwritten are cleared. A caret accepts characters up to
    /// the end of the buffer. Characters that do not fit are dropped.
    pub fn replace(&mut self, range: TextRange, text: &str) -> SlotEdit {
        let (start, end) = self.clamp(range);
        let writable_end = if range.is_empty() {
            self.capacity()
        } else {
            end
        };

        let mut chars = text.chars();
        let mut written = 0;
        for slot in &mut self.slots[start..writable_end] {
            match chars.next() {
                Some(ch) => {
                    *slot = Some(ch);
                    written += 1;
                }
                None => break,
            }
        }
        if !range.is_empty() {
            for slot in &mut self.slots[start + written..end] {
                *slot = None;
            }
        }
        let dropped = chars.count();
        if dropped > 0 {
            log::trace!("slot buffer dropped {dropped} characters past {writable_end}");
        }

        SlotEdit {
            written,
            dropped,
            caret: TextPosition::new(start + written),
        }
    }

    /// Empties every slot in `range`.
    pub fn clear(&mut self, range: TextRange) {
        let (start, end) = self.clamp(range);
        for slot in &mut self.slots[start..end] {
            *slot = None;
        }
    }

    /// Empties every slot.
    pub fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Backspace against `selection`, returning the new caret.
    ///
    /// A selection is cleared and the caret lands on its start. A caret
    /// clears the slot before it and moves back one position; at the start
    /// of the buffer nothing happens.
    pub fn delete_backward(&mut self, selection: TextRange) -> TextRange {
        if !selection.is_empty() {
            self.clear(selection);
            return TextRange::caret(selection.start());
        }
        match self.position(selection.start(), -1) {
            Some(previous) => {
                if let Some(slot) = self.slots.get_mut(previous.index()) {
                    *slot = None;
                }
                TextRange::caret(previous)
            }
            None => selection,
        }
    }
}

#[cfg(test)]
#[path = "tests/slots_tests.rs"]
mod tests;
