//! Loaded artifacts and the registry that owns them
//!
//! Derived data (resource uses and statistics) is computed once when an
//! artifact is registered. A derive failure does not reject the artifact;
//! the error is stored next to it so the viewer can report it in place of
//! the timeline.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::OptimizedMemoryRule;
use crate::extract::{extract_resource_uses, ResourceUse};
use crate::model::CompilationArtifact;
use crate::stats::{compute_statistics, Statistics};
use crate::DataError;

/// Everything computed from an artifact at load time
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedData {
    /// Full, unfiltered extractor output
    pub uses: Vec<ResourceUse>,
    pub statistics: Statistics,
}

impl DerivedData {
    pub fn compute(artifact: &CompilationArtifact, rule: OptimizedMemoryRule) -> Result<Self, DataError> {
        let uses = extract_resource_uses(&artifact.resource_templates)?;
        let statistics = compute_statistics(artifact, &uses, rule)?;
        Ok(Self { uses, statistics })
    }
}

/// An artifact registered with the viewer
#[derive(Debug)]
pub struct LoadedArtifact {
    id: u64,
    origin: String,
    artifact: CompilationArtifact,
    derived: Result<DerivedData, DataError>,
}

impl LoadedArtifact {
    /// Unique for the lifetime of the registry
    pub fn id(&self) -> u64 {
        self.id
    }

    /// File path or other label the artifact was loaded from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn name(&self) -> &str {
        &self.artifact.input_graph_name
    }

    pub fn artifact(&self) -> &CompilationArtifact {
        &self.artifact
    }

    pub fn derived(&self) -> Result<&DerivedData, &DataError> {
        self.derived.as_ref()
    }
}

/// Ordered collection of loaded artifacts; indices are selector positions
pub struct ArtifactRegistry {
    entries: Vec<Arc<LoadedArtifact>>,
    rule: OptimizedMemoryRule,
    next_id: u64,
}

impl ArtifactRegistry {
    pub fn new(rule: OptimizedMemoryRule) -> Self {
        Self {
            entries: Vec::new(),
            rule,
            next_id: 0,
        }
    }

    pub fn rule(&self) -> OptimizedMemoryRule {
        self.rule
    }

    /// Register a validated artifact and return its index
    pub fn register(&mut self, origin: impl Into<String>, artifact: CompilationArtifact) -> usize {
        let origin = origin.into();
        let derived = DerivedData::compute(&artifact, self.rule);

        match &derived {
            Ok(data) => info!(
                "Loaded '{}' from {}: {} templates, {} uses",
                artifact.input_graph_name,
                origin,
                artifact.resource_templates.len(),
                data.uses.len()
            ),
            Err(e) => warn!("Loaded '{}' from {} but could not derive its timeline: {}", artifact.input_graph_name, origin, e),
        }

        let entry = LoadedArtifact {
            id: self.next_id,
            origin,
            artifact,
            derived,
        };
        self.next_id += 1;
        self.entries.push(Arc::new(entry));
        self.entries.len() - 1
    }

    /// Read, validate and register an artifact file
    pub fn load_path(&mut self, path: &Path) -> Result<usize, DataError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read {}: {}", path.display(), e);
            e
        })?;
        self.load_json_str(path.display().to_string(), &text)
    }

    /// Validate and register artifact JSON text
    pub fn load_json_str(&mut self, origin: impl Into<String>, json: &str) -> Result<usize, DataError> {
        let origin = origin.into();
        match CompilationArtifact::from_json_str(json) {
            Ok(artifact) => Ok(self.register(origin, artifact)),
            Err(e) => {
                warn!("Rejected artifact from {}: {}", origin, e);
                Err(e)
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<Arc<LoadedArtifact>> {
        self.entries.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<LoadedArtifact>> {
        self.entries.iter()
    }

    /// Graph names in selector order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name().to_string()).collect()
    }
}

impl Default for ArtifactRegistry {
    fn default() -> Self {
        Self::new(OptimizedMemoryRule::default())
    }
}
