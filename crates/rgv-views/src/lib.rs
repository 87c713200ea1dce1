//! View system for the render graph viewer

mod colors;
mod space_view;
mod stats;
mod tables;
pub mod timeline;

pub use colors::{type_color, TEXT_MUTED};
pub use space_view::{SpaceView, ViewAction};
pub use stats::StatisticsView;
pub use tables::{MessageLogView, NodeTableView, ResourceTableView};
pub use timeline::TimelineView;

use rgv_core::VisibleTypes;
use rgv_data::{ChartStyle, LoadedArtifact};

/// Context passed to views during rendering.
///
/// Everything here is borrowed from the application controller for the
/// duration of one frame; views never mutate it.
#[derive(Clone, Copy)]
pub struct ViewerContext<'a> {
    /// The active artifact
    pub artifact: &'a LoadedArtifact,

    /// Types drawn in the timeline
    pub visible_types: &'a VisibleTypes,

    /// Timeline geometry
    pub chart_style: &'a ChartStyle,
}
