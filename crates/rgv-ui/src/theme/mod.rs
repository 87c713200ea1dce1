use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Zinc Dark".to_string(),
            dark_mode: true,
        }
    }
}

/// Apply the application theme (zinc dark palette)
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let bg_color = Color32::from_rgb(9, 9, 11); // zinc-950
    let panel_bg = Color32::from_rgb(24, 24, 27); // zinc-900
    let widget_bg = Color32::from_rgb(39, 39, 42); // zinc-800
    let hover_color = Color32::from_rgb(63, 63, 70); // zinc-700
    let active_color = Color32::from_rgb(82, 82, 91); // zinc-600
    let text_color = Color32::from_rgb(250, 250, 250); // zinc-50

    visuals.window_fill = panel_bg;
    visuals.panel_fill = bg_color;
    visuals.extreme_bg_color = bg_color;
    visuals.faint_bg_color = panel_bg;

    visuals.widgets.noninteractive.bg_fill = panel_bg;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, widget_bg);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.noninteractive.rounding = Rounding::ZERO;

    visuals.widgets.inactive.bg_fill = panel_bg;
    visuals.widgets.inactive.weak_bg_fill = panel_bg;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, widget_bg);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.inactive.rounding = Rounding::ZERO;

    visuals.widgets.hovered.bg_fill = hover_color;
    visuals.widgets.hovered.weak_bg_fill = hover_color;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, hover_color);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.hovered.rounding = Rounding::ZERO;

    visuals.widgets.active.bg_fill = active_color;
    visuals.widgets.active.weak_bg_fill = active_color;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, active_color);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.active.rounding = Rounding::ZERO;

    // Selected toggles and tabs use the zinc-800 fill
    visuals.selection.bg_fill = widget_bg;
    visuals.selection.stroke = Stroke::new(1.0, text_color);

    visuals.window_shadow.extrusion = 8.0;
    visuals.popup_shadow.extrusion = 4.0;

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Monospace));
    font_sizes.insert(TextStyle::Heading, FontId::new(16.0, FontFamily::Monospace));
    font_sizes.insert(TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace));

    style.text_styles = font_sizes;
    style.visuals = visuals;

    ctx.set_style(style);
}

/// Muted text (zinc-400)
pub fn muted_color() -> Color32 {
    Color32::from_rgb(161, 161, 170)
}

/// Badge background (zinc-600)
pub fn badge_color() -> Color32 {
    Color32::from_rgb(82, 82, 91)
}

/// Border color (zinc-800)
pub fn border_color() -> Color32 {
    Color32::from_rgb(39, 39, 42)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(239, 68, 68)
}
