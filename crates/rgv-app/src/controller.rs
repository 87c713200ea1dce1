//! Application controller
//!
//! Owns the viewer state and the artifact registry. Views only ever see
//! read-only borrows of these; their intents come back through
//! [`ViewerController::apply`].

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rgv_core::events::events::{ArtifactLoaded, ArtifactRejected, ArtifactSelected, ResourceTypeToggled};
use rgv_core::{handler_from_fn, ViewerState};
use rgv_data::{ArtifactRegistry, CompilationArtifact, DataError, LoadedArtifact, ViewerConfig};
use rgv_views::ViewAction;
use tracing::{debug, info};

/// A rejected artifact waiting to be shown as an error banner
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub source_name: String,
    pub error: String,
}

pub struct ViewerController {
    state: ViewerState,
    registry: ArtifactRegistry,
    rejections: Arc<Mutex<Vec<Rejection>>>,
}

impl ViewerController {
    pub fn new(config: &ViewerConfig) -> Self {
        let state = ViewerState::new(config.visible_types.clone());
        let rejections = Arc::new(Mutex::new(Vec::new()));

        let sink = rejections.clone();
        state.event_bus.subscribe::<ArtifactRejected>(handler_from_fn(move |event| {
            if let Some(rejected) = event.as_any().downcast_ref::<ArtifactRejected>() {
                sink.lock().push(Rejection {
                    source_name: rejected.source_name.clone(),
                    error: rejected.error.clone(),
                });
            }
        }));
        state.event_bus.subscribe::<ArtifactLoaded>(handler_from_fn(|event| {
            if let Some(loaded) = event.as_any().downcast_ref::<ArtifactLoaded>() {
                info!("Registered '{}' ({} resources)", loaded.graph_name, loaded.resource_count);
            }
        }));
        state.event_bus.subscribe::<ArtifactSelected>(handler_from_fn(|event| {
            if let Some(selected) = event.as_any().downcast_ref::<ArtifactSelected>() {
                info!("Switched to artifact #{}", selected.index);
            }
        }));
        state.event_bus.subscribe::<ResourceTypeToggled>(handler_from_fn(|event| {
            if let Some(toggled) = event.as_any().downcast_ref::<ResourceTypeToggled>() {
                debug!("{} visible: {}", toggled.resource_type, toggled.visible);
            }
        }));

        Self {
            state,
            registry: ArtifactRegistry::new(config.optimized_memory_rule),
            rejections,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewerState {
        &mut self.state
    }

    pub fn registry(&self) -> &ArtifactRegistry {
        &self.registry
    }

    /// The active artifact, if any
    pub fn active(&self) -> Option<Arc<LoadedArtifact>> {
        self.state.active_artifact().and_then(|i| self.registry.get(i))
    }

    /// Load an artifact file. Rejections are reported through the event bus.
    pub fn load_path(&mut self, path: &Path) -> Option<usize> {
        let result = self.registry.load_path(path);
        self.finish_load(path.display().to_string(), result)
    }

    /// Register an artifact given as a JSON value
    pub fn load_value(&mut self, origin: &str, value: serde_json::Value) -> Option<usize> {
        let result = CompilationArtifact::from_json_value(value).map(|artifact| self.registry.register(origin, artifact));
        self.finish_load(origin.to_string(), result)
    }

    fn finish_load(&mut self, source_name: String, result: Result<usize, DataError>) -> Option<usize> {
        match result {
            Ok(index) => {
                if let Some(loaded) = self.registry.get(index) {
                    self.state.event_bus.publish(ArtifactLoaded {
                        graph_name: loaded.name().to_string(),
                        resource_count: loaded.artifact().resource_templates.len(),
                    });
                }
                if self.state.active_artifact().is_none() {
                    self.state.select_artifact(index);
                }
                Some(index)
            }
            Err(e) => {
                self.state.event_bus.publish(ArtifactRejected {
                    source_name,
                    error: e.to_string(),
                });
                None
            }
        }
    }

    /// Make another artifact active. Returns whether the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.registry.len() || self.state.active_artifact() == Some(index) {
            return false;
        }
        self.state.select_artifact(index);
        true
    }

    /// Apply an intent reported by a view
    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::ToggleResourceType(ty) => self.state.toggle_resource_type(ty),
        }
    }

    /// Rejections since the last call
    pub fn take_rejections(&self) -> Vec<Rejection> {
        std::mem::take(&mut *self.rejections.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_artifacts;
    use rgv_core::ResourceType;
    use rgv_data::stats::keys;

    fn controller_with_demos() -> ViewerController {
        let mut controller = ViewerController::new(&ViewerConfig::default());
        for (origin, value) in demo_artifacts() {
            controller.load_value(&origin, value);
        }
        controller
    }

    #[test]
    fn test_first_loaded_artifact_becomes_active() {
        let controller = controller_with_demos();
        assert_eq!(controller.registry().len(), 2);
        assert_eq!(controller.state().active_artifact(), Some(0));
        assert_eq!(controller.active().unwrap().name(), "Cull_Graph");
        assert_eq!(controller.state().event_bus.handler_count::<ArtifactRejected>(), 1);
    }

    #[test]
    fn test_switching_replaces_statistics() {
        let mut controller = controller_with_demos();
        let before = controller.active().unwrap().derived().unwrap().statistics.get(keys::IMAGES);

        assert!(controller.select(1));
        assert!(!controller.select(1));
        assert!(!controller.select(7));

        let after = controller.active().unwrap().derived().unwrap().statistics.get(keys::IMAGES);
        assert_ne!(before, after);
        assert_eq!(controller.active().unwrap().name(), "RG_DefaultPipeline");
    }

    #[test]
    fn test_rejected_artifact_is_reported_once() {
        let mut controller = controller_with_demos();
        let index = controller.load_value("broken", serde_json::json!({ "inputGraphName": 3 }));

        assert_eq!(index, None);
        assert_eq!(controller.registry().len(), 2);

        let rejections = controller.take_rejections();
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].source_name, "broken");
        assert!(controller.take_rejections().is_empty());
    }

    #[test]
    fn test_toggle_action_updates_visible_types() {
        let mut controller = controller_with_demos();
        controller.apply(ViewAction::ToggleResourceType(ResourceType::Image));
        assert!(!controller.state().visible_types().contains(ResourceType::Image));
        controller.apply(ViewAction::ToggleResourceType(ResourceType::Image));
        assert!(controller.state().visible_types().contains(ResourceType::Image));
    }
}
