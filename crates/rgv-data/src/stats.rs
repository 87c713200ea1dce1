//! Summary statistics for one compilation artifact

use std::fmt;

use indexmap::IndexMap;
use rgv_core::ResourceType;

use crate::config::OptimizedMemoryRule;
use crate::extract::ResourceUse;
use crate::model::{CompilationArtifact, ResourceTemplate};
use crate::DataError;

/// Statistic keys, in display order
pub mod keys {
    pub const ORIGINAL_RESOURCES: &str = "originalResources";
    pub const REDUCTION: &str = "reduction";
    pub const IMAGES: &str = "images";
    pub const BUFFERS: &str = "buffers";
    pub const OTHER_RESOURCES: &str = "otherResources";
    pub const TOTAL_MEMORY: &str = "totalMemory";
    pub const OPTIMIZED_MEMORY: &str = "optimizedMemory";
}

/// A single statistic value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    Count(i64),
    /// Megabytes
    Memory(u64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Memory(mb) => write!(f, "{} MB", mb),
        }
    }
}

/// Named summary values in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    values: IndexMap<&'static str, StatValue>,
}

impl Statistics {
    pub fn get(&self, key: &str) -> Option<StatValue> {
        self.values.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, StatValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, key: &'static str, value: StatValue) {
        self.values.insert(key, value);
    }
}

/// Compute the statistics panel values.
///
/// `uses` must be the full, unfiltered extractor output; visibility toggles
/// never affect the totals. Fails with [`DataError::MemoryOverflow`] when a
/// memory sum does not fit in a `u64`.
pub fn compute_statistics(
    artifact: &CompilationArtifact,
    uses: &[ResourceUse],
    rule: OptimizedMemoryRule,
) -> Result<Statistics, DataError> {
    let templates = &artifact.resource_templates;
    let images = artifact.count_of(ResourceType::Image);
    let buffers = artifact.count_of(ResourceType::Buffer);

    let mut stats = Statistics::default();
    stats.insert(keys::ORIGINAL_RESOURCES, StatValue::Count(artifact.meta.original_count));
    stats.insert(keys::REDUCTION, StatValue::Count(artifact.meta.reduction));
    stats.insert(keys::IMAGES, StatValue::Count(images as i64));
    stats.insert(keys::BUFFERS, StatValue::Count(buffers as i64));
    stats.insert(keys::OTHER_RESOURCES, StatValue::Count((templates.len() - images - buffers) as i64));
    stats.insert(keys::TOTAL_MEMORY, StatValue::Memory(total_memory(uses)?));
    stats.insert(keys::OPTIMIZED_MEMORY, StatValue::Memory(optimized_memory(templates, rule)?));
    Ok(stats)
}

fn checked_sum(values: impl IntoIterator<Item = u64>, statistic: &'static str) -> Result<u64, DataError> {
    values
        .into_iter()
        .try_fold(0u64, |acc, mb| acc.checked_add(mb))
        .ok_or(DataError::MemoryOverflow { statistic })
}

/// Sum of the memory required by every use
pub fn total_memory(uses: &[ResourceUse]) -> Result<u64, DataError> {
    checked_sum(uses.iter().map(|u| u.required_memory), keys::TOTAL_MEMORY)
}

/// Per template, the peak requirement among points inside any usage window;
/// summed over all templates.
pub fn optimized_memory(templates: &[ResourceTemplate], rule: OptimizedMemoryRule) -> Result<u64, DataError> {
    let peaks = templates.iter().map(|template| {
        template
            .usage_ranges
            .iter()
            .flat_map(|range| {
                template
                    .usage_points
                    .iter()
                    .filter(move |p| rule.admits(range.start, range.end, p.point))
                    .map(|p| p.memory_requirement)
            })
            .max()
            .unwrap_or(0)
    });
    checked_sum(peaks, keys::OPTIMIZED_MEMORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_resource_uses;
    use crate::model::{OptimizerResultMeta, UsagePoint, UsageRange};
    use rgv_core::DependencyType;

    fn point(time: i64, memory: u64) -> UsagePoint {
        UsagePoint {
            point: time,
            used_as: format!("use@{time}"),
            dependency: DependencyType::Write,
            memory_requirement: memory,
        }
    }

    fn template(id: &str, ty: ResourceType, ranges: &[(i64, i64)], points: Vec<UsagePoint>) -> ResourceTemplate {
        ResourceTemplate {
            id: id.to_string(),
            resource_type: ty,
            usage_ranges: ranges.iter().map(|&(start, end)| UsageRange { start, end }).collect(),
            usage_points: points,
            is_optimizable: true,
        }
    }

    fn artifact(templates: Vec<ResourceTemplate>) -> CompilationArtifact {
        CompilationArtifact {
            input_graph_name: "Test".to_string(),
            resource_templates: templates,
            meta: OptimizerResultMeta {
                original_count: 9,
                reduction: 4,
                timeline_range: UsageRange { start: 0, end: 10 },
            },
            node_execution_order: Vec::new(),
            messages: Vec::new(),
        }
    }

    #[test]
    fn test_counts_and_order() {
        let artifact = artifact(vec![
            template("1", ResourceType::Image, &[(0, 2)], vec![point(0, 16)]),
            template("2", ResourceType::Image, &[(3, 4)], vec![point(3, 16)]),
            template("3", ResourceType::Buffer, &[(0, 9)], vec![point(0, 4)]),
            template("4", ResourceType::SceneData, &[(0, 9)], vec![point(0, 0)]),
            template("5", ResourceType::Unknown, &[], vec![]),
        ]);
        let uses = extract_resource_uses(&artifact.resource_templates).unwrap();
        let stats = compute_statistics(&artifact, &uses, OptimizedMemoryRule::Parity).unwrap();

        let order: Vec<_> = stats.iter().map(|(k, _)| k).collect();
        assert_eq!(
            order,
            vec![
                keys::ORIGINAL_RESOURCES,
                keys::REDUCTION,
                keys::IMAGES,
                keys::BUFFERS,
                keys::OTHER_RESOURCES,
                keys::TOTAL_MEMORY,
                keys::OPTIMIZED_MEMORY,
            ]
        );
        assert_eq!(stats.get(keys::ORIGINAL_RESOURCES), Some(StatValue::Count(9)));
        assert_eq!(stats.get(keys::REDUCTION), Some(StatValue::Count(4)));
        assert_eq!(stats.get(keys::IMAGES), Some(StatValue::Count(2)));
        assert_eq!(stats.get(keys::BUFFERS), Some(StatValue::Count(1)));
        assert_eq!(stats.get(keys::OTHER_RESOURCES), Some(StatValue::Count(2)));
        assert_eq!(stats.get(keys::TOTAL_MEMORY), Some(StatValue::Memory(36)));
    }

    #[test]
    fn test_total_memory_sums_every_use() {
        let artifact = artifact(vec![
            template("1", ResourceType::Image, &[(0, 5), (5, 10)], vec![point(0, 64), point(5, 32)]),
            template("2", ResourceType::Buffer, &[(1, 2)], vec![point(1, 8)]),
        ]);
        let uses = extract_resource_uses(&artifact.resource_templates).unwrap();

        assert_eq!(total_memory(&uses).unwrap(), 104);
        assert_eq!(
            compute_statistics(&artifact, &uses, OptimizedMemoryRule::Parity)
                .unwrap()
                .get(keys::TOTAL_MEMORY)
                .map(|v| v.to_string()),
            Some("104 MB".to_string())
        );
    }

    #[test]
    fn test_optimized_memory_parity_rule() {
        // Parity admits points at or beyond the range end.
        let templates = vec![
            template("1", ResourceType::Image, &[(0, 5)], vec![point(0, 64), point(3, 128), point(5, 16), point(7, 8)]),
            template("2", ResourceType::Buffer, &[(2, 4)], vec![point(2, 50)]),
        ];

        assert_eq!(optimized_memory(&templates, OptimizedMemoryRule::Parity).unwrap(), 16);
    }

    #[test]
    fn test_optimized_memory_containment_rule() {
        let templates = vec![
            template("1", ResourceType::Image, &[(0, 5)], vec![point(0, 64), point(3, 128), point(5, 16), point(7, 8)]),
            template("2", ResourceType::Buffer, &[(2, 4)], vec![point(2, 50)]),
        ];

        assert_eq!(optimized_memory(&templates, OptimizedMemoryRule::Containment).unwrap(), 178);
    }

    #[test]
    fn test_optimized_memory_takes_peak_across_ranges() {
        let templates = vec![template(
            "1",
            ResourceType::Image,
            &[(0, 2), (4, 6)],
            vec![point(0, 10), point(2, 40), point(4, 20), point(6, 30)],
        )];

        assert_eq!(optimized_memory(&templates, OptimizedMemoryRule::Containment).unwrap(), 40);
    }

    #[test]
    fn test_total_memory_overflow_is_an_error() {
        let artifact = artifact(vec![
            template("1", ResourceType::Buffer, &[(0, 2)], vec![point(0, u64::MAX)]),
            template("2", ResourceType::Buffer, &[(1, 3)], vec![point(1, 1)]),
        ]);
        let uses = extract_resource_uses(&artifact.resource_templates).unwrap();

        assert!(matches!(
            total_memory(&uses),
            Err(DataError::MemoryOverflow { statistic: keys::TOTAL_MEMORY })
        ));
        assert!(matches!(
            compute_statistics(&artifact, &uses, OptimizedMemoryRule::Parity),
            Err(DataError::MemoryOverflow { .. })
        ));
    }

    #[test]
    fn test_optimized_memory_overflow_is_an_error() {
        let templates = vec![
            template("1", ResourceType::Image, &[(0, 2)], vec![point(1, u64::MAX)]),
            template("2", ResourceType::Image, &[(0, 2)], vec![point(2, 2)]),
        ];

        // One point inside each range; only containment admits both.
        assert_eq!(optimized_memory(&templates, OptimizedMemoryRule::Parity).unwrap(), 2);
        assert!(matches!(
            optimized_memory(&templates, OptimizedMemoryRule::Containment),
            Err(DataError::MemoryOverflow { statistic: keys::OPTIMIZED_MEMORY })
        ));
    }

    #[test]
    fn test_stat_value_display() {
        assert_eq!(StatValue::Count(3).to_string(), "3");
        assert_eq!(StatValue::Memory(0).to_string(), "0 MB");
    }
}
