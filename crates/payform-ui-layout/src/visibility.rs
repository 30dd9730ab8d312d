//! Layout results.

use indexmap::IndexMap;
use payform_foundation::SegmentKind;

/// How a segment is shown. Variants are ordered from most to least visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LayoutVisibility {
    #[default]
    Visible,
    /// Shown at reduced width; only a suffix of the content is visible.
    Compressed,
    Hidden,
}

/// Placement of one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentLayout {
    pub visibility: LayoutVisibility,
    /// Leading edge of the segment's box.
    pub x: f32,
    /// Width of the segment's box; zero when hidden.
    pub width: f32,
    /// Horizontal shift applied to the content inside the box.
    ///
    /// A compressed segment keeps its full-width content and slides it left
    /// by this amount (always `<= 0`) so that only the trailing portion
    /// shows through the box.
    pub content_offset: f32,
}

/// Output of one layout pass, in segment declared order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FieldLayout {
    pub segments: IndexMap<SegmentKind, SegmentLayout>,
    /// Gap placed between consecutive shown segments.
    pub padding: f32,
    /// True when the shown segments do not fit even after every downgrade.
    pub overflowed: bool,
}

impl FieldLayout {
    pub fn get(&self, kind: SegmentKind) -> Option<&SegmentLayout> {
        self.segments.get(&kind)
    }

    pub fn visibility(&self, kind: SegmentKind) -> Option<LayoutVisibility> {
        self.get(kind).map(|segment| segment.visibility)
    }

    /// Segments that are not hidden, in order.
    pub fn shown(&self) -> impl Iterator<Item = SegmentKind> + '_ {
        self.segments
            .iter()
            .filter(|(_, segment)| segment.visibility != LayoutVisibility::Hidden)
            .map(|(kind, _)| *kind)
    }
}
