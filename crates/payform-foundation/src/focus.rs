//! Focus tracking for structured fields.
//!
//! At most one target holds focus at a time. The manager only records
//! ownership; deciding *where* focus goes (auto-advance, auto-retreat) is the
//! job of the field coordinator.

use std::fmt::Debug;

/// Tracks which target currently holds focus.
#[derive(Debug, Clone)]
pub struct FocusManager<K> {
    active: Option<K>,
}

impl<K> Default for FocusManager<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: Copy + PartialEq + Debug> FocusManager<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently focused target.
    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// Moves focus to `target`.
    ///
    /// Returns the previously focused target when focus actually moved, or
    /// `None` if `target` already had focus.
    pub fn request_focus(&mut self, target: K) -> Option<Option<K>> {
        if self.active == Some(target) {
            return None;
        }
        let from = self.active.replace(target);
        log::trace!("focus {:?} -> {:?}", from, target);
        Some(from)
    }

    /// Clears focus, returning the target that lost it.
    pub fn clear_focus(&mut self) -> Option<K> {
        self.active.take()
    }

    /// Returns whether the given target is focused.
    pub fn is_focused(&self, target: K) -> bool {
        self.active == Some(target)
    }
}
