//! Wire format of compiled render graph artifacts
//!
//! These records mirror the JSON exactly and are never handed out of the
//! crate; [`super::CompilationArtifact`] is built from them by a single
//! validating conversion.

use serde::Deserialize;
use serde_json::Value;

use crate::DataError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawArtifact {
    pub input_graph_name: String,
    pub resource_templates: Vec<RawResourceTemplate>,
    pub optimizer_result_meta: RawOptimizerResultMeta,
    #[serde(default)]
    pub node_execution_order: Vec<RawNode>,
    #[serde(default)]
    pub messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawResourceTemplate {
    pub id: Value,
    pub resource_type: String,
    #[serde(default)]
    pub usage_ranges: Vec<RawRange>,
    #[serde(default)]
    pub usage_points: Vec<RawUsagePoint>,
    #[serde(default)]
    pub original_resource: Option<RawOriginalResource>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawRange {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawUsagePoint {
    pub point: i64,
    #[serde(default)]
    pub used_as: String,
    #[serde(default)]
    pub dependency_info: RawDependencyInfo,
    #[serde(default)]
    pub memory_requirement: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDependencyInfo {
    #[serde(default)]
    pub dependency_type: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawOriginalResource {
    #[serde(default)]
    pub is_optimizable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawOptimizerResultMeta {
    pub n_original_count: i64,
    pub n_reduction: i64,
    pub timeline_range: RawRange,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawNode {
    pub display_name: String,
    #[serde(default)]
    pub dependencies: Vec<RawDependencyInfo>,
}

/// Identifiers show up as numbers or strings depending on the exporter
pub(crate) fn id_to_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a memory requirement in megabytes.
///
/// Accepts non-negative JSON integers, non-negative finite JSON floats
/// (truncated), and strings holding a plain non-negative integer. A missing
/// or null value counts as zero. Anything else is rejected.
pub(crate) fn parse_memory(value: Option<&Value>, resource: &str) -> Result<u64, DataError> {
    let malformed = |value: &Value| DataError::MalformedNumber {
        resource: resource.to_string(),
        field: "memoryRequirement",
        value: value.to_string(),
    };

    let Some(value) = value else {
        return Ok(0);
    };

    match value {
        Value::Null => Ok(0),
        Value::Number(n) => {
            if let Some(mb) = n.as_u64() {
                Ok(mb)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 && f <= u64::MAX as f64 => Ok(f.trunc() as u64),
                    _ => Err(malformed(value)),
                }
            }
        }
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| malformed(value)),
        _ => Err(malformed(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_memory_accepts_integers() {
        assert_eq!(parse_memory(Some(&json!(64)), "r").unwrap(), 64);
        assert_eq!(parse_memory(Some(&json!("128")), "r").unwrap(), 128);
        assert_eq!(parse_memory(Some(&json!(" 16 ")), "r").unwrap(), 16);
        assert_eq!(parse_memory(Some(&json!(12.9)), "r").unwrap(), 12);
    }

    #[test]
    fn test_parse_memory_missing_is_zero() {
        assert_eq!(parse_memory(None, "r").unwrap(), 0);
        assert_eq!(parse_memory(Some(&Value::Null), "r").unwrap(), 0);
    }

    #[test]
    fn test_parse_memory_rejects_garbage() {
        for bad in [json!("12MB"), json!("abc"), json!(-4), json!(true), json!([1])] {
            match parse_memory(Some(&bad), "Resource-7") {
                Err(DataError::MalformedNumber { resource, field, .. }) => {
                    assert_eq!(resource, "Resource-7");
                    assert_eq!(field, "memoryRequirement");
                }
                other => panic!("expected MalformedNumber for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_id_to_string() {
        assert_eq!(id_to_string(&json!(42)), "42");
        assert_eq!(id_to_string(&json!("gbuffer")), "gbuffer");
    }
}
