//! Demo mode for the render graph viewer
//! Builds synthetic compilation artifacts to showcase the timeline

use serde_json::{json, Value};

/// One synthetic resource: type, usage ranges, `usedAs` per range, memory in MB
struct DemoResource {
    resource_type: &'static str,
    ranges: &'static [(i64, i64)],
    used_as: &'static [&'static str],
    memory: u64,
    optimizable: bool,
}

/// A node and the dependency codes it declares
struct DemoNode {
    name: &'static str,
    dependencies: &'static [i64],
}

const CULL_RESOURCES: &[DemoResource] = &[
    DemoResource { resource_type: "SceneData", ranges: &[(0, 5)], used_as: &["SceneConstants"], memory: 0, optimizable: false },
    DemoResource { resource_type: "Buffer", ranges: &[(0, 2)], used_as: &["InstanceList"], memory: 8, optimizable: true },
    DemoResource { resource_type: "Buffer", ranges: &[(1, 4)], used_as: &["VisibleInstances"], memory: 4, optimizable: true },
    DemoResource { resource_type: "Buffer", ranges: &[(3, 5)], used_as: &["DrawArguments"], memory: 1, optimizable: false },
    DemoResource { resource_type: "Image", ranges: &[(0, 3)], used_as: &["HiZPyramid"], memory: 16, optimizable: true },
];

const CULL_NODES: &[DemoNode] = &[
    DemoNode { name: "UploadScene", dependencies: &[1, 3] },
    DemoNode { name: "BuildHiZ", dependencies: &[2, 3] },
    DemoNode { name: "FrustumCull", dependencies: &[2, 2, 3] },
    DemoNode { name: "OcclusionCull", dependencies: &[2, 2, 3] },
    DemoNode { name: "CompactDraws", dependencies: &[2, 3] },
    DemoNode { name: "Present", dependencies: &[2, 0] },
];

const PIPELINE_RESOURCES: &[DemoResource] = &[
    DemoResource { resource_type: "SceneData", ranges: &[(0, 10)], used_as: &["FrameConstants"], memory: 0, optimizable: false },
    DemoResource { resource_type: "TopLevelAS", ranges: &[(1, 7)], used_as: &["SceneTLAS"], memory: 0, optimizable: false },
    DemoResource { resource_type: "Image", ranges: &[(0, 3), (5, 8)], used_as: &["GBufferAlbedo", "BloomChain"], memory: 32, optimizable: true },
    DemoResource { resource_type: "Image", ranges: &[(0, 4)], used_as: &["GBufferNormal"], memory: 32, optimizable: true },
    DemoResource { resource_type: "Image", ranges: &[(0, 6)], used_as: &["Depth"], memory: 16, optimizable: false },
    DemoResource { resource_type: "Image", ranges: &[(2, 4), (6, 9)], used_as: &["ShadowMap", "TonemapLUT"], memory: 64, optimizable: true },
    DemoResource { resource_type: "Image", ranges: &[(4, 10)], used_as: &["HDRColor"], memory: 48, optimizable: false },
    DemoResource { resource_type: "Buffer", ranges: &[(3, 5)], used_as: &["LightClusters"], memory: 4, optimizable: true },
    DemoResource { resource_type: "Buffer", ranges: &[(7, 9)], used_as: &["LuminanceHistogram"], memory: 1, optimizable: true },
];

const PIPELINE_NODES: &[DemoNode] = &[
    DemoNode { name: "DepthPrepass", dependencies: &[2, 3] },
    DemoNode { name: "BuildTLAS", dependencies: &[2, 1] },
    DemoNode { name: "GBuffer", dependencies: &[2, 3, 3, 3] },
    DemoNode { name: "ShadowMaps", dependencies: &[2, 2, 3] },
    DemoNode { name: "LightCulling", dependencies: &[2, 2, 3] },
    DemoNode { name: "DeferredLighting", dependencies: &[2, 2, 2, 2, 2, 3] },
    DemoNode { name: "RayTracedReflections", dependencies: &[2, 2, 3] },
    DemoNode { name: "Bloom", dependencies: &[2, 3] },
    DemoNode { name: "Tonemap", dependencies: &[2, 2, 2, 3] },
    DemoNode { name: "Present", dependencies: &[2, 0] },
];

/// Synthetic artifacts as `(origin, json)` pairs
pub fn demo_artifacts() -> Vec<(String, Value)> {
    vec![
        (
            "demo:Cull_Graph".to_string(),
            build_artifact(
                "Cull_Graph",
                CULL_RESOURCES,
                CULL_NODES,
                (0, 5),
                7,
                &["Compiled 6 nodes", "Culled 2 transient resources"],
            ),
        ),
        (
            "demo:RG_DefaultPipeline".to_string(),
            build_artifact(
                "RG_DefaultPipeline",
                PIPELINE_RESOURCES,
                PIPELINE_NODES,
                (0, 10),
                12,
                &[
                    "Compiled 10 nodes",
                    "Aliased GBufferAlbedo with BloomChain",
                    "Aliased ShadowMap with TonemapLUT",
                ],
            ),
        ),
    ]
}

fn build_artifact(
    name: &str,
    resources: &[DemoResource],
    nodes: &[DemoNode],
    timeline: (i64, i64),
    original_count: usize,
    messages: &[&str],
) -> Value {
    let templates: Vec<Value> = resources
        .iter()
        .enumerate()
        .map(|(id, res)| {
            let ranges: Vec<Value> = res
                .ranges
                .iter()
                .map(|&(start, end)| json!({ "start": start, "end": end }))
                .collect();
            let points: Vec<Value> = res
                .ranges
                .iter()
                .zip(res.used_as)
                .flat_map(|(&(start, end), used_as)| {
                    [
                        json!({
                            "point": start,
                            "usedAs": used_as,
                            "dependencyInfo": { "dependencyType": 3 },
                            "memoryRequirement": res.memory.to_string(),
                        }),
                        json!({
                            "point": end,
                            "usedAs": used_as,
                            "dependencyInfo": { "dependencyType": 2 },
                            "memoryRequirement": res.memory.to_string(),
                        }),
                    ]
                })
                .collect();

            json!({
                "id": id,
                "resourceType": res.resource_type,
                "usageRanges": ranges,
                "usagePoints": points,
                "originalResource": { "isOptimizable": res.optimizable },
            })
        })
        .collect();

    let nodes: Vec<Value> = nodes
        .iter()
        .map(|node| {
            let dependencies: Vec<Value> = node
                .dependencies
                .iter()
                .map(|code| json!({ "dependencyType": code }))
                .collect();
            json!({ "displayName": node.name, "dependencies": dependencies })
        })
        .collect();

    json!({
        "inputGraphName": name,
        "resourceTemplates": templates,
        "optimizerResultMeta": {
            "nOriginalCount": original_count,
            "nReduction": original_count.saturating_sub(resources.len()),
            "timelineRange": { "start": timeline.0, "end": timeline.1 },
        },
        "nodeExecutionOrder": nodes,
        "messages": messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgv_data::{ArtifactRegistry, CompilationArtifact};

    #[test]
    fn test_demo_artifacts_validate_and_derive() {
        let mut registry = ArtifactRegistry::default();
        for (origin, value) in demo_artifacts() {
            let artifact = CompilationArtifact::from_json_value(value).unwrap();
            registry.register(origin, artifact);
        }

        assert_eq!(registry.names(), vec!["Cull_Graph".to_string(), "RG_DefaultPipeline".to_string()]);
        for loaded in registry.iter() {
            assert!(loaded.derived().is_ok(), "{} failed to derive", loaded.name());
        }
    }

    #[test]
    fn test_pipeline_demo_has_aliased_images() {
        let (_, value) = demo_artifacts().remove(1);
        let artifact = CompilationArtifact::from_json_value(value).unwrap();
        let aliased = artifact.resource_templates.iter().filter(|t| t.is_aliased()).count();
        assert_eq!(aliased, 2);
    }
}
