use egui::{Context, RichText, TopBottomPanel};

use crate::theme::{badge_color, border_color, error_color, muted_color};
use crate::{FooterTab, UiState};

/// Seconds an error banner stays visible
const ERROR_BANNER_SECS: u64 = 10;

/// What the user picked in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    SelectArtifact(usize),
    OpenArtifact,
}

/// Selector caption for the active graph
pub fn header_title(graph_name: Option<&str>) -> String {
    format!("RenderGraph Compiler Result: {}", graph_name.unwrap_or("-"))
}

/// Render the header bar with the artifact selector and resource count
pub fn header(ctx: &Context, names: &[String], active: Option<usize>, resource_count: usize) -> Option<HeaderAction> {
    let mut action = None;

    TopBottomPanel::top("header")
        .exact_height(56.0)
        .frame(
            egui::Frame::none()
                .fill(ctx.style().visuals.panel_fill)
                .inner_margin(egui::Margin::symmetric(48.0, 0.0))
                .stroke(egui::Stroke::new(1.0, border_color())),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(RichText::new("Nebula").monospace().strong());
                ui.label(RichText::new("/").monospace().color(muted_color()));

                let active_name = active.and_then(|i| names.get(i)).map(String::as_str);
                ui.menu_button(RichText::new(format!("{} ⏷", header_title(active_name))).monospace(), |ui| {
                    ui.set_min_width(256.0);
                    for (i, name) in names.iter().enumerate() {
                        if ui.selectable_label(active == Some(i), format!("› {}", name)).clicked() {
                            action = Some(HeaderAction::SelectArtifact(i));
                            ui.close_menu();
                        }
                    }
                    if !names.is_empty() {
                        ui.separator();
                    }
                    if ui.button("Open artifact...").clicked() {
                        action = Some(HeaderAction::OpenArtifact);
                        ui.close_menu();
                    }
                });

                ui.add_space(48.0);
                ui.label(RichText::new("Resources").monospace());
                egui::Frame::none()
                    .fill(badge_color())
                    .rounding(egui::Rounding::same(10.0))
                    .inner_margin(egui::Margin::symmetric(6.0, 1.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(resource_count.to_string()).small());
                    });
            });
        });

    action
}

/// Render the footer tab strip
pub fn footer_tabs(ui: &mut egui::Ui, ui_state: &mut UiState) {
    ui.horizontal(|ui| {
        for tab in FooterTab::ALL {
            let text = RichText::new(tab.label()).monospace();
            if ui.selectable_label(ui_state.footer_tab == tab, text).clicked() {
                ui_state.footer_tab = tab;
            }
        }
    });
    ui.separator();
}

/// Show error messages
pub fn show_error_messages(ui: &mut egui::Ui, ui_state: &mut UiState) {
    let now = std::time::Instant::now();

    // Remove old messages
    ui_state
        .error_messages
        .retain(|msg| now.duration_since(msg.timestamp).as_secs() < ERROR_BANNER_SECS);

    for msg in &ui_state.error_messages {
        egui::Frame::none()
            .fill(error_color().linear_multiply(0.2))
            .stroke(egui::Stroke::new(1.0, error_color()))
            .rounding(4.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").color(error_color()));
                    ui.label(&msg.title);
                    ui.separator();
                    ui.label(&msg.message);
                });
            });
    }

    if !ui_state.error_messages.is_empty() {
        ui.ctx().request_repaint_after(std::time::Duration::from_secs(1));
    }
}

/// Show the empty-state screen. Returns `true` when the user asked to open a file.
pub fn show_welcome_screen(ui: &mut egui::Ui) -> bool {
    let mut open = false;
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.heading("No compilation artifact loaded");
        ui.add_space(20.0);
        ui.label(RichText::new("Pass artifact files on the command line or open one here").color(muted_color()));
        ui.add_space(20.0);
        open = ui.button("Open artifact...").clicked();
    });
    open
}
