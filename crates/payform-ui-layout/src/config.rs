//! Layout inputs: per-segment content widths and engine configuration.

/// Content widths of one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentMetrics {
    /// Width needed to show the whole segment.
    pub full_width: f32,
    /// Width of the compressed form, for segments that have one.
    pub compressed_width: Option<f32>,
}

impl SegmentMetrics {
    pub fn new(full_width: f32) -> Self {
        Self {
            full_width,
            compressed_width: None,
        }
    }

    pub fn compressible(full_width: f32, compressed_width: f32) -> Self {
        Self {
            full_width,
            compressed_width: Some(compressed_width.min(full_width)),
        }
    }
}

/// Configuration of the layout engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Smallest acceptable gap between two shown segments.
    pub min_padding: f32,
    /// Space reserved at both the leading and trailing edge.
    pub horizontal_inset: f32,
}

impl LayoutConfig {
    pub const DEFAULT_MIN_PADDING: f32 = 10.0;

    pub fn with_min_padding(mut self, min_padding: f32) -> Self {
        self.min_padding = min_padding.max(0.0);
        self
    }

    pub fn with_horizontal_inset(mut self, inset: f32) -> Self {
        self.horizontal_inset = inset.max(0.0);
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_padding: Self::DEFAULT_MIN_PADDING,
            horizontal_inset: 0.0,
        }
    }
}
