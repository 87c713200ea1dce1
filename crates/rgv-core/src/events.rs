//! Typed publish/subscribe for viewer state changes
//!
//! Handlers are grouped by the concrete event type they subscribed to and
//! run synchronously, in subscription order, on the publishing thread.

use std::any::TypeId;

use ahash::AHashMap;
use parking_lot::Mutex;

type HandlerMap = AHashMap<TypeId, Vec<Box<dyn EventHandler>>>;

/// Viewer-wide event bus
pub struct EventBus {
    handlers: Mutex<HandlerMap>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published by the viewer state and the artifact loader
pub mod events {
    use super::Event;
    use crate::ResourceType;

    /// A compilation artifact was registered
    #[derive(Debug, Clone)]
    pub struct ArtifactLoaded {
        pub graph_name: String,
        pub resource_count: usize,
    }

    /// An artifact could not be parsed or validated
    #[derive(Debug, Clone)]
    pub struct ArtifactRejected {
        pub source_name: String,
        pub error: String,
    }

    /// The active artifact changed
    #[derive(Debug, Clone)]
    pub struct ArtifactSelected {
        pub index: usize,
    }

    /// A resource type was shown or hidden in the timeline
    #[derive(Debug, Clone)]
    pub struct ResourceTypeToggled {
        pub resource_type: ResourceType,
        pub visible: bool,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        ArtifactLoaded,
        ArtifactRejected,
        ArtifactSelected,
        ResourceTypeToggled
    );
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(AHashMap::new()),
        }
    }

    /// Register `handler` for events of type `E`
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        self.handlers.lock().entry(TypeId::of::<E>()).or_default().push(handler);
    }

    /// Deliver `event` to every handler subscribed to its type.
    /// Handlers must not publish on the same bus.
    pub fn publish<E: Event>(&self, event: E) {
        if let Some(handlers) = self.handlers.lock().get_mut(&TypeId::of::<E>()) {
            for handler in handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }

    /// Number of handlers listening for `E`
    pub fn handler_count<E: Event>(&self) -> usize {
        self.handlers.lock().get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::events::{ArtifactLoaded, ArtifactSelected, ResourceTypeToggled};
    use crate::ResourceType;
    use std::sync::Arc;

    #[test]
    fn test_handlers_only_see_their_event_type() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<ArtifactSelected>(handler_from_fn(move |event| {
            if let Some(selected) = event.as_any().downcast_ref::<ArtifactSelected>() {
                sink.lock().push(selected.index);
            }
        }));

        bus.publish(ArtifactSelected { index: 3 });
        bus.publish(ResourceTypeToggled { resource_type: ResourceType::Image, visible: false });
        bus.publish(ArtifactSelected { index: 1 });

        assert_eq!(*seen.lock(), vec![3, 1]);
    }

    #[test]
    fn test_handler_count_per_event_type() {
        let bus = EventBus::new();
        bus.subscribe::<ArtifactLoaded>(handler_from_fn(|_| {}));
        bus.subscribe::<ArtifactLoaded>(handler_from_fn(|_| {}));

        assert_eq!(bus.handler_count::<ArtifactLoaded>(), 2);
        assert_eq!(bus.handler_count::<ArtifactSelected>(), 0);
    }
}
