//! Resource-interval extraction
//!
//! Flattens every `(template, usage range)` pair into one [`ResourceUse`],
//! annotated with the usage point recorded at the start of that range.

use rgv_core::{DependencyType, ResourceType};

use crate::model::ResourceTemplate;
use crate::DataError;

/// One discrete use of a resource over a usage range
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUse {
    /// `Resource-{id}`
    pub gen_res_name: String,
    pub start: i64,
    pub end: i64,
    pub resource_type: ResourceType,
    pub used_as: String,
    pub dependency: DependencyType,
    pub is_optimizable: bool,
    pub is_aliased: bool,
    /// Megabytes
    pub required_memory: u64,
}

/// Derive the flat list of resource uses, template order then range order.
///
/// Fails with [`DataError::InconsistentUsage`] when a range starts at a time
/// for which the template recorded no usage point.
pub fn extract_resource_uses(templates: &[ResourceTemplate]) -> Result<Vec<ResourceUse>, DataError> {
    let mut uses = Vec::with_capacity(templates.iter().map(|t| t.usage_ranges.len()).sum());

    for template in templates {
        let gen_res_name = template.generated_name();
        let is_aliased = template.is_aliased();

        for range in &template.usage_ranges {
            let point = template
                .point_at(range.start)
                .ok_or_else(|| DataError::InconsistentUsage {
                    resource: gen_res_name.clone(),
                    start: range.start,
                })?;

            uses.push(ResourceUse {
                gen_res_name: gen_res_name.clone(),
                start: range.start,
                end: range.end,
                resource_type: template.resource_type,
                used_as: point.used_as.clone(),
                dependency: point.dependency,
                is_optimizable: template.is_optimizable,
                is_aliased,
                required_memory: point.memory_requirement,
            });
        }
    }

    Ok(uses)
}
