//! Viewer state owned by the application controller
//!
//! Views never mutate this directly; they receive read-only borrows and
//! report user intent back to the controller, which applies it here.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{events, EventBus};
use crate::ResourceType;

/// Set of resource types currently drawn in the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ResourceType>", into = "Vec<ResourceType>")]
pub struct VisibleTypes {
    types: Vec<ResourceType>,
}

impl Default for VisibleTypes {
    fn default() -> Self {
        Self::all()
    }
}

impl VisibleTypes {
    /// Every selectable type visible
    pub fn all() -> Self {
        Self {
            types: ResourceType::SELECTABLE.to_vec(),
        }
    }

    /// Nothing visible
    pub fn none() -> Self {
        Self { types: Vec::new() }
    }

    /// Build from an arbitrary list. `Unknown` and duplicates are dropped.
    pub fn from_types(types: impl IntoIterator<Item = ResourceType>) -> Self {
        let mut visible = Self::none();
        for ty in types {
            visible.set(ty, true);
        }
        visible
    }

    pub fn contains(&self, ty: ResourceType) -> bool {
        self.types.contains(&ty)
    }

    /// Show or hide a type. Returns whether the set changed.
    pub fn set(&mut self, ty: ResourceType, visible: bool) -> bool {
        if ty == ResourceType::Unknown || self.contains(ty) == visible {
            return false;
        }
        if visible {
            self.types.push(ty);
        } else {
            self.types.retain(|t| *t != ty);
        }
        true
    }

    /// Flip a type and return its new visibility
    pub fn toggle(&mut self, ty: ResourceType) -> bool {
        let visible = !self.contains(ty);
        self.set(ty, visible);
        self.contains(ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = ResourceType> + '_ {
        self.types.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl From<Vec<ResourceType>> for VisibleTypes {
    fn from(types: Vec<ResourceType>) -> Self {
        Self::from_types(types)
    }
}

impl From<VisibleTypes> for Vec<ResourceType> {
    fn from(visible: VisibleTypes) -> Self {
        visible.types
    }
}

/// Viewer settings
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    /// Whether to show the statistics side panel
    pub show_stats_panel: bool,

    /// Whether to show the footer with logs and tables
    pub show_footer: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            show_stats_panel: true,
            show_footer: true,
        }
    }
}

/// The main viewer state
pub struct ViewerState {
    /// Index of the active artifact in the registry
    active_artifact: Option<usize>,

    /// Types drawn in the timeline
    visible_types: VisibleTypes,

    /// Viewer settings
    pub settings: ViewerSettings,

    /// The event bus
    pub event_bus: Arc<EventBus>,
}

impl ViewerState {
    /// Create a new viewer state
    pub fn new(visible_types: VisibleTypes) -> Self {
        Self {
            active_artifact: None,
            visible_types,
            settings: ViewerSettings::default(),
            event_bus: Arc::new(EventBus::new()),
        }
    }

    pub fn active_artifact(&self) -> Option<usize> {
        self.active_artifact
    }

    pub fn visible_types(&self) -> &VisibleTypes {
        &self.visible_types
    }

    /// Make another artifact the active one
    pub fn select_artifact(&mut self, index: usize) {
        if self.active_artifact == Some(index) {
            return;
        }
        debug!("Selecting artifact #{}", index);
        self.active_artifact = Some(index);
        self.event_bus.publish(events::ArtifactSelected { index });
    }

    /// Flip visibility of a resource type in the timeline
    pub fn toggle_resource_type(&mut self, ty: ResourceType) {
        let visible = self.visible_types.toggle(ty);
        self.event_bus.publish(events::ResourceTypeToggled {
            resource_type: ty,
            visible,
        });
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(VisibleTypes::all())
    }
}
