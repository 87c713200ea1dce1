use egui::Color32;
use rgv_core::{ResourceType, Rgb};

/// Secondary text (labels, captions)
pub const TEXT_MUTED: Color32 = Color32::from_rgb(161, 161, 170);

/// Palette color of a resource type
pub fn type_color(ty: ResourceType) -> Color32 {
    let Rgb(r, g, b) = ty.color();
    Color32::from_rgb(r, g, b)
}
