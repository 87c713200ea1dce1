//! Resource timeline chart
//!
//! One horizontal band per generated resource, one bar per use. The chart
//! is custom-painted; layout happens in [`layout`] and is cached until the
//! artifact, the measured size, the visible types or the style change.

mod layout;
mod scale;

pub use layout::{BandLabel, BarPrimitive, Tick, TimelineLayout};
pub use scale::{BandScale, LinearScale};

use egui::{Align2, Color32, FontId, Id, Pos2, RichText, Rounding, ScrollArea, Sense, Stroke, Ui, Vec2};
use rgv_core::{DeferredMeasure, ViewDimensions, VisibleTypes};
use rgv_data::{ChartStyle, DataError, ResourceUse};
use tracing::debug;

use crate::colors::{type_color, TEXT_MUTED};
use crate::{SpaceView, ViewAction, ViewerContext};

const BORDER: Color32 = Color32::from_rgb(39, 39, 42);
const ALIASED: Color32 = Color32::from_rgb(239, 68, 68);
const OPTIMIZABLE: Color32 = Color32::from_rgb(132, 204, 22);

#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    artifact_id: u64,
    dimensions: ViewDimensions,
    visible_types: VisibleTypes,
    style: ChartStyle,
}

/// Timeline view
pub struct TimelineView {
    title: String,
    measure: DeferredMeasure,
    cache: Option<(CacheKey, TimelineLayout)>,
}

impl TimelineView {
    pub fn new() -> Self {
        Self {
            title: "Resource Timeline".to_string(),
            measure: DeferredMeasure::new(),
            cache: None,
        }
    }

    /// Resolve the deferred first measurement or track a resize.
    /// Returns `None` while the first measurement is still outstanding.
    fn measure(&mut self, ui: &Ui, style: &ChartStyle) -> Option<ViewDimensions> {
        let available = ui.available_size();
        let [dx, dy] = style.container_padding;
        let measured = ViewDimensions::new(available.x, available.y).shrink(dx, dy);

        if let Some(ticket) = self.measure.take_pending() {
            self.measure.resolve(ticket, measured);
        } else if self.measure.dimensions().is_none() {
            self.measure.schedule();
            ui.ctx().request_repaint();
            return None;
        } else {
            self.measure.observe(measured);
        }

        self.measure.dimensions()
    }

    fn refresh_layout(&mut self, ctx: &ViewerContext<'_>, uses: &[ResourceUse], dimensions: ViewDimensions) {
        let key = CacheKey {
            artifact_id: ctx.artifact.id(),
            dimensions,
            visible_types: ctx.visible_types.clone(),
            style: ctx.chart_style.clone(),
        };

        if self.cache.as_ref().is_some_and(|(cached, _)| *cached == key) {
            return;
        }

        debug!(
            "Recomputing timeline layout for '{}' at {}x{}",
            ctx.artifact.name(),
            dimensions.width,
            dimensions.height
        );
        let layout = TimelineLayout::compute(
            uses,
            ctx.visible_types,
            ctx.artifact.artifact().meta.timeline_range,
            dimensions,
            ctx.chart_style,
        );
        self.cache = Some((key, layout));
    }
}

impl Default for TimelineView {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceView for TimelineView {
    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext<'_>, ui: &mut Ui) -> Option<ViewAction> {
        let range = ctx.artifact.artifact().meta.timeline_range;
        ui.label(
            RichText::new(format!("{} [{}, {}]", self.title, range.start, range.end))
                .monospace()
                .color(TEXT_MUTED),
        );

        let derived = match ctx.artifact.derived() {
            Ok(derived) => derived,
            Err(e) => {
                error_panel(ui, e);
                return None;
            }
        };

        let dimensions = self.measure(ui, ctx.chart_style)?;
        if dimensions.is_empty() {
            return None;
        }

        let uses = &derived.uses;
        self.refresh_layout(ctx, uses, dimensions);
        let (_, layout) = self.cache.as_ref()?;

        ScrollArea::both()
            .id_source("timeline_chart")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                draw_chart(ui, layout, uses);
            });

        None
    }

    fn on_artifact_change(&mut self) {
        self.measure.cancel();
        self.cache = None;
    }
}

fn draw_chart(ui: &mut Ui, layout: &TimelineLayout, uses: &[ResourceUse]) {
    let (response, painter) = ui.allocate_painter(layout.size, Sense::hover());
    let origin = response.rect.min.to_vec2();
    let text_color = ui.visuals().text_color();

    painter.rect_stroke(response.rect, Rounding::ZERO, Stroke::new(1.0, BORDER));

    // Top axis
    let (x0, x1) = layout.axis_x;
    painter.line_segment(
        [Pos2::new(x0, layout.axis_y) + origin, Pos2::new(x1, layout.axis_y) + origin],
        Stroke::new(1.0, text_color),
    );
    for tick in &layout.ticks {
        let base = Pos2::new(tick.x, layout.axis_y) + origin;
        painter.line_segment([base, base - Vec2::new(0.0, 6.0)], Stroke::new(1.0, text_color));
        painter.text(
            base - Vec2::new(0.0, 8.0),
            Align2::CENTER_BOTTOM,
            tick.value.to_string(),
            FontId::monospace(10.0),
            text_color,
        );
    }

    for band in &layout.band_labels {
        painter.text(
            band.pos + origin,
            Align2::RIGHT_CENTER,
            &band.text,
            FontId::monospace(11.0),
            text_color,
        );
    }

    for bar in &layout.bars {
        painter.rect_filled(bar.rect.translate(origin), Rounding::ZERO, bar.color);
        painter.text(
            bar.label_pos + origin,
            Align2::LEFT_BOTTOM,
            &bar.label,
            FontId::proportional(14.0),
            TEXT_MUTED,
        );
    }

    if let Some(pos) = response.hover_pos() {
        if let Some(bar) = layout.bar_at(pos - origin) {
            if let Some(resource) = uses.get(bar.use_index) {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                egui::show_tooltip_at_pointer(ui.ctx(), Id::new("timeline_tooltip"), |ui| {
                    tooltip_ui(ui, resource);
                });
            }
        }
    }
}

/// Required memory as shown in the tooltip
pub fn memory_label(resource: &ResourceUse) -> String {
    if resource.resource_type.has_memory() {
        format!("{} MB", resource.required_memory)
    } else {
        "n/a".to_string()
    }
}

fn tooltip_ui(ui: &mut Ui, resource: &ResourceUse) {
    ui.label(RichText::new(&resource.gen_res_name).small());
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(RichText::new("Type:").small().color(TEXT_MUTED));
        ui.label(
            RichText::new(resource.resource_type.as_str())
                .small()
                .color(type_color(resource.resource_type)),
        );
    });
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(RichText::new("Required Memory:").small().color(TEXT_MUTED));
        ui.label(RichText::new(memory_label(resource)).small());
    });

    if resource.is_aliased || resource.is_optimizable {
        ui.horizontal(|ui| {
            if resource.is_aliased {
                badge(ui, "Aliased", ALIASED);
            }
            if resource.is_optimizable {
                badge(ui, "Optimizable", OPTIMIZABLE);
            }
        });
    }
}

fn badge(ui: &mut Ui, text: &str, fill: Color32) {
    egui::Frame::none()
        .fill(fill)
        .rounding(Rounding::same(6.0))
        .inner_margin(egui::Margin::symmetric(4.0, 1.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(Color32::WHITE));
        });
}

fn error_panel(ui: &mut Ui, error: &DataError) {
    egui::Frame::none()
        .stroke(Stroke::new(1.0, ALIASED))
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Could not build the timeline for this artifact").strong().color(ALIASED));
            ui.label(error.to_string());
        });
}
