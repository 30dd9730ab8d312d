//! Positions inside a slot array.

use std::fmt;

/// A zero-based index into a slot array.
///
/// Position `i` sits *before* slot `i`; position `capacity` sits after the
/// last slot. Whether a position is in bounds depends on the buffer it is
/// used with, see [`SlotBuffer::is_valid_position`](super::SlotBuffer::is_valid_position).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    index: usize,
}

impl TextPosition {
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Position before the first slot.
    pub const fn zero() -> Self {
        Self { index: 0 }
    }

    pub const fn index(self) -> usize {
        self.index
    }
}

impl From<usize> for TextPosition {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.index)
    }
}
