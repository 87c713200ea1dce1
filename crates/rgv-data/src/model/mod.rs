//! Validated artifact records

mod raw;

use rgv_core::{DependencyType, ResourceType};

use crate::DataError;
use raw::{id_to_string, parse_memory, RawArtifact, RawNode, RawResourceTemplate};

/// A `[start, end]` window in node-execution-order steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageRange {
    pub start: i64,
    pub end: i64,
}

/// Global timeline bounds reported by the optimizer
pub type TimelineRange = UsageRange;

/// One execution step at which a node touches a resource
#[derive(Debug, Clone, PartialEq)]
pub struct UsagePoint {
    pub point: i64,
    pub used_as: String,
    pub dependency: DependencyType,
    /// Megabytes
    pub memory_requirement: u64,
}

/// A compiler-assigned description of one logical resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTemplate {
    pub id: String,
    pub resource_type: ResourceType,
    pub usage_ranges: Vec<UsageRange>,
    pub usage_points: Vec<UsagePoint>,
    pub is_optimizable: bool,
}

impl ResourceTemplate {
    /// Name the timeline and statistics use for this resource
    pub fn generated_name(&self) -> String {
        format!("Resource-{}", self.id)
    }

    /// First usage point recorded exactly at `time`
    pub fn point_at(&self, time: i64) -> Option<&UsagePoint> {
        self.usage_points.iter().find(|p| p.point == time)
    }

    /// Several disjoint uses of one image share its memory
    pub fn is_aliased(&self) -> bool {
        self.usage_ranges.len() > 1 && self.resource_type == ResourceType::Image
    }
}

/// Upstream summary of the optimisation pass
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerResultMeta {
    pub original_count: i64,
    pub reduction: i64,
    pub timeline_range: TimelineRange,
}

/// A node in execution order together with the dependencies it declares
#[derive(Debug, Clone, PartialEq)]
pub struct NodeExecution {
    pub display_name: String,
    pub dependencies: Vec<DependencyType>,
}

impl NodeExecution {
    /// Dependencies that expose or write a resource
    pub fn produced_count(&self) -> usize {
        self.dependencies.iter().filter(|d| d.is_produced()).count()
    }

    /// Dependencies that read a resource
    pub fn consumed_count(&self) -> usize {
        self.dependencies.iter().filter(|d| d.is_consumed()).count()
    }
}

/// A complete compilation result
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationArtifact {
    pub input_graph_name: String,
    pub resource_templates: Vec<ResourceTemplate>,
    pub meta: OptimizerResultMeta,
    pub node_execution_order: Vec<NodeExecution>,
    pub messages: Vec<String>,
}

impl CompilationArtifact {
    /// Parse and validate an artifact from its JSON text
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let raw: RawArtifact = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Parse and validate an artifact from a JSON value
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DataError> {
        let raw: RawArtifact = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    /// Number of templates of the given type
    pub fn count_of(&self, ty: ResourceType) -> usize {
        self.resource_templates
            .iter()
            .filter(|r| r.resource_type == ty)
            .count()
    }
}

impl TryFrom<RawArtifact> for CompilationArtifact {
    type Error = DataError;

    fn try_from(raw: RawArtifact) -> Result<Self, Self::Error> {
        let range = raw.optimizer_result_meta.timeline_range;
        if range.start > range.end {
            return Err(DataError::InvalidTimelineRange {
                start: range.start,
                end: range.end,
            });
        }

        let resource_templates = raw
            .resource_templates
            .into_iter()
            .map(ResourceTemplate::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            input_graph_name: raw.input_graph_name,
            resource_templates,
            meta: OptimizerResultMeta {
                original_count: raw.optimizer_result_meta.n_original_count,
                reduction: raw.optimizer_result_meta.n_reduction,
                timeline_range: UsageRange {
                    start: range.start,
                    end: range.end,
                },
            },
            node_execution_order: raw.node_execution_order.into_iter().map(NodeExecution::from).collect(),
            messages: raw.messages,
        })
    }
}

impl TryFrom<RawResourceTemplate> for ResourceTemplate {
    type Error = DataError;

    fn try_from(raw: RawResourceTemplate) -> Result<Self, Self::Error> {
        let id = id_to_string(&raw.id);
        let name = format!("Resource-{}", id);

        let usage_points = raw
            .usage_points
            .into_iter()
            .map(|p| {
                Ok(UsagePoint {
                    point: p.point,
                    used_as: p.used_as,
                    dependency: DependencyType::from_code(p.dependency_info.dependency_type),
                    memory_requirement: parse_memory(p.memory_requirement.as_ref(), &name)?,
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        Ok(Self {
            id,
            resource_type: ResourceType::from_name(&raw.resource_type),
            usage_ranges: raw
                .usage_ranges
                .into_iter()
                .map(|r| UsageRange { start: r.start, end: r.end })
                .collect(),
            usage_points,
            is_optimizable: raw.original_resource.map(|o| o.is_optimizable).unwrap_or(false),
        })
    }
}

impl From<RawNode> for NodeExecution {
    fn from(raw: RawNode) -> Self {
        Self {
            display_name: raw.display_name,
            dependencies: raw
                .dependencies
                .into_iter()
                .map(|d| DependencyType::from_code(d.dependency_type))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact_json() -> serde_json::Value {
        json!({
            "inputGraphName": "Cull_Graph",
            "resourceTemplates": [
                {
                    "id": 4,
                    "resourceType": "Image",
                    "usageRanges": [{ "start": 0, "end": 5 }],
                    "usagePoints": [{
                        "point": 0,
                        "usedAs": "ColorTarget",
                        "dependencyInfo": { "dependencyType": 3 },
                        "memoryRequirement": "32"
                    }],
                    "originalResource": { "isOptimizable": true }
                },
                {
                    "id": "tlas",
                    "resourceType": "TopLevelAS",
                    "usageRanges": [],
                    "usagePoints": []
                }
            ],
            "optimizerResultMeta": {
                "nOriginalCount": 6,
                "nReduction": 2,
                "timelineRange": { "start": 0, "end": 10 }
            },
            "nodeExecutionOrder": [
                { "displayName": "Cull", "dependencies": [{ "dependencyType": 1 }] }
            ],
            "messages": ["compiled in 3ms"]
        })
    }

    #[test]
    fn test_parse_valid_artifact() {
        let artifact = CompilationArtifact::from_json_value(artifact_json()).unwrap();

        assert_eq!(artifact.input_graph_name, "Cull_Graph");
        assert_eq!(artifact.resource_templates.len(), 2);
        assert_eq!(artifact.meta.original_count, 6);
        assert_eq!(artifact.meta.timeline_range, UsageRange { start: 0, end: 10 });
        assert_eq!(artifact.messages, vec!["compiled in 3ms".to_string()]);

        let image = &artifact.resource_templates[0];
        assert_eq!(image.id, "4");
        assert_eq!(image.generated_name(), "Resource-4");
        assert_eq!(image.resource_type, ResourceType::Image);
        assert!(image.is_optimizable);
        assert_eq!(image.usage_points[0].dependency, DependencyType::Write);
        assert_eq!(image.usage_points[0].memory_requirement, 32);

        let tlas = &artifact.resource_templates[1];
        assert_eq!(tlas.id, "tlas");
        assert!(!tlas.is_optimizable);
    }

    #[test]
    fn test_inverted_timeline_is_rejected() {
        let mut value = artifact_json();
        value["optimizerResultMeta"]["timelineRange"] = json!({ "start": 9, "end": 2 });

        match CompilationArtifact::from_json_value(value) {
            Err(DataError::InvalidTimelineRange { start: 9, end: 2 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_memory_is_rejected() {
        let mut value = artifact_json();
        value["resourceTemplates"][0]["usagePoints"][0]["memoryRequirement"] = json!("lots");

        assert!(matches!(
            CompilationArtifact::from_json_value(value),
            Err(DataError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_missing_graph_name_is_a_json_error() {
        let mut value = artifact_json();
        value.as_object_mut().unwrap().remove("inputGraphName");

        assert!(matches!(CompilationArtifact::from_json_value(value), Err(DataError::Json(_))));
    }

    #[test]
    fn test_node_dependency_counts() {
        let node = NodeExecution {
            display_name: "Lighting".to_string(),
            dependencies: [1, 2, 3, 2].into_iter().map(DependencyType::from_code).collect(),
        };
        assert_eq!(node.produced_count(), 2);
        assert_eq!(node.consumed_count(), 2);
    }

    #[test]
    fn test_ignored_dependencies_are_not_counted() {
        let node = NodeExecution {
            display_name: "Present".to_string(),
            dependencies: [0, 7, -1].into_iter().map(DependencyType::from_code).collect(),
        };
        assert_eq!(node.produced_count(), 0);
        assert_eq!(node.consumed_count(), 0);
    }
}
