//! Core functionality for the render graph viewer
//! 
//! This crate provides the resource and dependency vocabulary shared by all
//! other crates, the viewer state owned by the application controller, and
//! the event plumbing used to report state changes.

pub mod events;
pub mod kinds;
pub mod layout;
pub mod state;

// Re-export commonly used types
pub use events::{EventBus, Event, EventHandler, handler_from_fn};
pub use kinds::{DependencyType, ResourceType, Rgb};
pub use layout::{DeferredMeasure, MeasureTicket, ViewDimensions};
pub use state::{ViewerSettings, ViewerState, VisibleTypes};
