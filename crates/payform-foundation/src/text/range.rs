//! Ordered slot ranges used for carets and selections.

use super::TextPosition;
use std::fmt;

/// Error returned when a range cannot be built from the given endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// An endpoint lies past the buffer capacity.
    OutOfBounds { index: usize, capacity: usize },
    /// The start endpoint comes after the end endpoint.
    Reversed { start: usize, end: usize },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::OutOfBounds { index, capacity } => {
                write!(f, "position {index} is outside 0..={capacity}")
            }
            RangeError::Reversed { start, end } => {
                write!(f, "range start {start} is after end {end}")
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// A half-open interval `[start, end)` over slots.
///
/// When `start == end` the range is a caret. Unlike a free-form text
/// selection the endpoints are always ordered: `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct TextRange {
    start: TextPosition,
    end: TextPosition,
}

impl TextRange {
    /// Builds a range, rejecting endpoints given in descending order.
    pub fn new(start: TextPosition, end: TextPosition) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Reversed {
                start: start.index(),
                end: end.index(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a collapsed range (caret) at the given position.
    pub const fn caret(position: TextPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub const fn start(&self) -> TextPosition {
        self.start
    }

    pub const fn end(&self) -> TextPosition {
        self.end
    }

    /// Returns true if this range is a caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of slots covered.
    pub fn len(&self) -> usize {
        self.end.index() - self.start.index()
    }

    /// Returns true if slot `index` lies in `[start, end)`.
    pub fn contains(&self, index: usize) -> bool {
        self.start.index() <= index && index < self.end.index()
    }

    /// Smallest range covering both `self` and `position`.
    pub fn extended_to(self, position: TextPosition) -> Self {
        Self {
            start: self.start.min(position),
            end: self.end.max(position),
        }
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.index(), self.end.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(index: usize) -> TextPosition {
        TextPosition::new(index)
    }

    #[test]
    fn caret_is_empty() {
        let caret = TextRange::caret(pos(3));
        assert!(caret.is_empty());
        assert_eq!(caret.len(), 0);
        assert!(!caret.contains(3));
    }

    #[test]
    fn reversed_endpoints_are_rejected() {
        assert_eq!(
            TextRange::new(pos(4), pos(2)),
            Err(RangeError::Reversed { start: 4, end: 2 })
        );
    }

    #[test]
    fn contains_is_half_open() {
        let range = TextRange::new(pos(2), pos(5)).unwrap();
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }

    #[test]
    fn extension_covers_position_on_either_side() {
        let range = TextRange::new(pos(2), pos(4)).unwrap();
        assert_eq!(range.extended_to(pos(6)), TextRange::new(pos(2), pos(6)).unwrap());
        assert_eq!(range.extended_to(pos(0)), TextRange::new(pos(0), pos(4)).unwrap());
        assert_eq!(range.extended_to(pos(3)), range);
    }
}
