//! Compilation artifacts and the data derived from them
//!
//! Raw JSON artifacts are validated once at load time into typed records
//! ([`CompilationArtifact`]); the extractor and the statistics aggregator then
//! work exclusively on those records.

pub mod config;
pub mod extract;
pub mod model;
pub mod sources;
pub mod stats;

use thiserror::Error;

// Re-exports
pub use config::{ChartStyle, OptimizedMemoryRule, ViewerConfig};
pub use extract::{extract_resource_uses, ResourceUse};
pub use model::{
    CompilationArtifact, NodeExecution, OptimizerResultMeta, ResourceTemplate, TimelineRange,
    UsagePoint, UsageRange,
};
pub use sources::{ArtifactRegistry, DerivedData, LoadedArtifact};
pub use stats::{compute_statistics, StatValue, Statistics};

/// Errors that can occur while loading or deriving artifact data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Inconsistent usage data: {resource} has no usage point at range start {start}")]
    InconsistentUsage { resource: String, start: i64 },

    #[error("Malformed {field} on {resource}: {value}")]
    MalformedNumber {
        resource: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid timeline range [{start}, {end}]")]
    InvalidTimelineRange { start: i64, end: i64 },

    #[error("Memory total {statistic} does not fit in 64 bits")]
    MemoryOverflow { statistic: &'static str },

    #[error("Invalid chart setting {field}: {value} (must be {requirement})")]
    InvalidChartStyle {
        field: &'static str,
        value: f32,
        requirement: &'static str,
    },
}
