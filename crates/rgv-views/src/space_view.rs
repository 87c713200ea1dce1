//! Space view abstraction - base trait for all panels showing artifact data

use egui::Ui;
use rgv_core::ResourceType;

use crate::ViewerContext;

/// Something the user asked for while interacting with a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    ToggleResourceType(ResourceType),
}

/// Base trait for all views (timeline, statistics, tables)
pub trait SpaceView {
    /// Get the title of this view
    fn title(&self) -> &str;

    /// Draw the UI and report any user intent back to the caller
    fn ui(&mut self, ctx: &ViewerContext<'_>, ui: &mut Ui) -> Option<ViewAction>;

    /// Called when the active artifact is replaced
    fn on_artifact_change(&mut self) {}
}
