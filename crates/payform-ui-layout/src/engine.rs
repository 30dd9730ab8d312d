//! The responsive layout pass.

use crate::config::{LayoutConfig, SegmentMetrics};
use crate::priority::downgrade_order;
use crate::visibility::{FieldLayout, LayoutVisibility, SegmentLayout};
use indexmap::IndexMap;
use payform_foundation::SegmentKind;
use smallvec::SmallVec;

type Visibilities = SmallVec<[LayoutVisibility; 4]>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fit {
    fits: bool,
    padding: f32,
}

fn displayed_width(metrics: &SegmentMetrics, visibility: LayoutVisibility) -> f32 {
    match visibility {
        LayoutVisibility::Visible => metrics.full_width,
        LayoutVisibility::Compressed => metrics.compressed_width.unwrap_or(metrics.full_width),
        LayoutVisibility::Hidden => 0.0,
    }
}

fn measure_fit(
    available_width: f32,
    segments: &[(SegmentKind, SegmentMetrics)],
    visibilities: &Visibilities,
    config: &LayoutConfig,
) -> Fit {
    let content_width = available_width - 2.0 * config.horizontal_inset;
    let mut shown = 0usize;
    let mut total = 0.0f32;
    for ((_, metrics), visibility) in segments.iter().zip(visibilities) {
        if *visibility != LayoutVisibility::Hidden {
            shown += 1;
            total += displayed_width(metrics, *visibility);
        }
    }
    let slack = content_width - total;
    if shown <= 1 {
        return Fit {
            fits: slack >= 0.0,
            padding: config.min_padding,
        };
    }
    let padding = slack / (shown - 1) as f32;
    Fit {
        fits: padding >= config.min_padding,
        padding,
    }
}

/// Lays out `segments` (in declared order) inside `available_width`.
///
/// Segments start fully visible. While the gap between them would fall
/// below `config.min_padding`, the downgrade table for `focused` is walked
/// one step at a time. The focused segment is never hidden. If the table
/// runs out first, the padding is clamped to the minimum and the result is
/// flagged as overflowed.
pub fn layout(
    available_width: f32,
    focused: Option<SegmentKind>,
    segments: &[(SegmentKind, SegmentMetrics)],
    config: &LayoutConfig,
) -> FieldLayout {
    let mut visibilities: Visibilities = segments
        .iter()
        .map(|_| LayoutVisibility::Visible)
        .collect();
    let mut fit = measure_fit(available_width, segments, &visibilities, config);

    if !fit.fits {
        for step in downgrade_order(focused) {
            let Some(index) = segments.iter().position(|(kind, _)| *kind == step.segment) else {
                continue;
            };
            if visibilities[index] >= step.to {
                continue;
            }
            if step.to == LayoutVisibility::Compressed && segments[index].1.compressed_width.is_none() {
                continue;
            }
            if step.to == LayoutVisibility::Hidden && focused == Some(step.segment) {
                continue;
            }
            log::trace!("layout: {} -> {:?}", step.segment, step.to);
            visibilities[index] = step.to;
            fit = measure_fit(available_width, segments, &visibilities, config);
            if fit.fits {
                break;
            }
        }
    }

    let overflowed = !fit.fits;
    let padding = if overflowed {
        log::debug!("layout overflowed at width {available_width}");
        config.min_padding
    } else {
        fit.padding
    };

    let mut placed = IndexMap::with_capacity(segments.len());
    let mut cursor = config.horizontal_inset;
    for ((kind, metrics), visibility) in segments.iter().zip(&visibilities) {
        let width = displayed_width(metrics, *visibility);
        let content_offset = match visibility {
            LayoutVisibility::Compressed => width - metrics.full_width,
            _ => 0.0,
        };
        placed.insert(
            *kind,
            SegmentLayout {
                visibility: *visibility,
                x: cursor,
                width,
                content_offset,
            },
        );
        if *visibility != LayoutVisibility::Hidden {
            cursor += width + padding;
        }
    }

    FieldLayout {
        segments: placed,
        padding,
        overflowed,
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
