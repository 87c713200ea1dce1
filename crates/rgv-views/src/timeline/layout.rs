//! Pure timeline layout
//!
//! Turns resource uses into positioned primitives. Coordinates are relative
//! to the top-left corner of the chart; the painter translates them.

use egui::{Color32, Pos2, Rect, Vec2};
use rgv_core::{ViewDimensions, VisibleTypes};
use rgv_data::{ChartStyle, ResourceUse, TimelineRange};

use super::scale::{BandScale, LinearScale};
use crate::colors::type_color;

/// Gap between a bar and its `usedAs` label
const LABEL_GAP: f32 = 4.0;

/// Gap between band labels and the plotting area
const BAND_LABEL_GAP: f32 = 8.0;

/// One rectangle for one visible resource use
#[derive(Debug, Clone, PartialEq)]
pub struct BarPrimitive {
    /// Index into the unfiltered use list
    pub use_index: usize,
    pub rect: Rect,
    pub color: Color32,
    pub label: String,
    /// Bottom-left anchor of the label
    pub label_pos: Pos2,
}

/// Name of a band, drawn right-aligned in the left margin
#[derive(Debug, Clone, PartialEq)]
pub struct BandLabel {
    pub text: String,
    /// Right-center anchor
    pub pos: Pos2,
}

/// A labelled tick on the top axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: i64,
    pub x: f32,
}

/// Positioned primitives for one frame's chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineLayout {
    pub bars: Vec<BarPrimitive>,
    pub band_labels: Vec<BandLabel>,
    pub ticks: Vec<Tick>,
    /// Horizontal extent of the axis
    pub axis_x: (f32, f32),
    /// Vertical position of the axis
    pub axis_y: f32,
    /// Total size the chart needs; taller than the view when bands overflow
    pub size: Vec2,
}

impl TimelineLayout {
    /// Lay out every use whose type is visible.
    ///
    /// Bands are the distinct resource names among visible uses, in
    /// first-appearance order. Hidden types leave no band behind.
    pub fn compute(
        uses: &[ResourceUse],
        visible: &VisibleTypes,
        range: TimelineRange,
        dims: ViewDimensions,
        style: &ChartStyle,
    ) -> Self {
        let visible_uses: Vec<(usize, &ResourceUse)> = uses
            .iter()
            .enumerate()
            .filter(|(_, u)| visible.contains(u.resource_type))
            .collect();

        let x = LinearScale::new(
            (range.start, range.end),
            (style.margin_left + style.margin, (dims.width - style.margin).max(style.margin_left + style.margin)),
        );

        let names: Vec<&str> = visible_uses.iter().map(|(_, u)| u.gen_res_name.as_str()).collect();
        let band_count = names.iter().collect::<indexmap::IndexSet<_>>().len();
        let min_band = style.bar_height * 2.0;
        let top = style.margin;
        let bottom = (dims.height - style.margin).max(top + band_count as f32 * min_band);
        let y = BandScale::new(names, (top, bottom));
        let bandwidth = y.bandwidth();

        let bars = visible_uses
            .iter()
            .filter_map(|(index, u)| {
                let band = y.band_start(&u.gen_res_name)?;
                let x0 = x.scale(u.start);
                let x1 = x.scale(u.end);
                let bar_top = band + (bandwidth - style.bar_height) / 2.0;
                let rect = Rect::from_min_size(
                    Pos2::new(x0.min(x1), bar_top),
                    Vec2::new((x1 - x0).abs(), style.bar_height),
                );
                Some(BarPrimitive {
                    use_index: *index,
                    rect,
                    color: type_color(u.resource_type),
                    label: u.used_as.clone(),
                    label_pos: Pos2::new(rect.min.x, rect.min.y - LABEL_GAP),
                })
            })
            .collect();

        let band_labels = y
            .domain()
            .filter_map(|name| {
                let band = y.band_start(name)?;
                Some(BandLabel {
                    text: name.to_string(),
                    pos: Pos2::new(style.margin_left + style.margin - BAND_LABEL_GAP, band + bandwidth / 2.0),
                })
            })
            .collect();

        let ticks = x
            .ticks(style.min_tick_spacing)
            .into_iter()
            .map(|value| Tick { value, x: x.scale(value) })
            .collect();

        Self {
            bars,
            band_labels,
            ticks,
            axis_x: x.range(),
            axis_y: style.margin,
            size: Vec2::new(dims.width, bottom + style.margin),
        }
    }

    /// Topmost bar under `pos`
    pub fn bar_at(&self, pos: Pos2) -> Option<&BarPrimitive> {
        self.bars.iter().rev().find(|bar| bar.rect.contains(pos))
    }
}
