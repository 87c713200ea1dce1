//! Statistics panel and resource type toggles

use egui::{Grid, RichText, Ui};
use rgv_core::ResourceType;

use crate::colors::{type_color, TEXT_MUTED};
use crate::{SpaceView, ViewAction, ViewerContext};

/// Side panel with summary statistics and visibility toggles
pub struct StatisticsView {
    title: String,
}

impl StatisticsView {
    pub fn new() -> Self {
        Self {
            title: "Statistics".to_string(),
        }
    }

    fn statistics_ui(&self, ctx: &ViewerContext<'_>, ui: &mut Ui) {
        ui.label(RichText::new(&self.title).monospace());
        ui.add_space(4.0);

        let derived = match ctx.artifact.derived() {
            Ok(derived) => derived,
            Err(_) => {
                ui.label(RichText::new("Unavailable").color(TEXT_MUTED));
                return;
            }
        };

        Grid::new("statistics_grid")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                for (key, value) in derived.statistics.iter() {
                    ui.label(RichText::new(format!("{}:", key)).color(TEXT_MUTED));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.strong(value.to_string());
                    });
                    ui.end_row();
                }
            });
    }

    fn toggles_ui(&self, ctx: &ViewerContext<'_>, ui: &mut Ui) -> Option<ViewAction> {
        let mut action = None;

        ui.label(RichText::new("Toggle Resource Types").monospace());
        ui.add_space(4.0);

        Grid::new("resource_type_toggles")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (i, ty) in ResourceType::SELECTABLE.iter().enumerate() {
                    let text = RichText::new(ty.as_str()).monospace().color(type_color(*ty));
                    if ui.selectable_label(ctx.visible_types.contains(*ty), text).clicked() {
                        action = Some(ViewAction::ToggleResourceType(*ty));
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        action
    }
}

impl Default for StatisticsView {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceView for StatisticsView {
    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext<'_>, ui: &mut Ui) -> Option<ViewAction> {
        ui.group(|ui| {
            ui.set_min_width(256.0);
            self.statistics_ui(ctx, ui);
        });
        ui.add_space(16.0);
        ui.group(|ui| {
            ui.set_min_width(256.0);
            self.toggles_ui(ctx, ui)
        })
        .inner
    }
}
