//! Resource and dependency classifications produced by the graph compiler

use serde::{Deserialize, Serialize};
use std::fmt;

/// Plain RGB triple, independent of any UI toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Kind of resource a compiler-generated template describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    SceneData,
    Buffer,
    Image,
    TopLevelAS,
    Unknown,
}

impl ResourceType {
    /// Types that can be toggled on and off in the timeline.
    /// `Unknown` is never part of the visible set.
    pub const SELECTABLE: [ResourceType; 4] = [
        ResourceType::SceneData,
        ResourceType::Buffer,
        ResourceType::Image,
        ResourceType::TopLevelAS,
    ];

    /// Parse the compiler's type name; unrecognised names map to `Unknown`
    pub fn from_name(name: &str) -> Self {
        match name {
            "SceneData" => ResourceType::SceneData,
            "Buffer" => ResourceType::Buffer,
            "Image" => ResourceType::Image,
            "TopLevelAS" => ResourceType::TopLevelAS,
            _ => ResourceType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::SceneData => "SceneData",
            ResourceType::Buffer => "Buffer",
            ResourceType::Image => "Image",
            ResourceType::TopLevelAS => "TopLevelAS",
            ResourceType::Unknown => "Unknown",
        }
    }

    /// Fixed palette color for this type
    pub fn color(&self) -> Rgb {
        match self {
            ResourceType::SceneData => Rgb(255, 186, 0),
            ResourceType::Buffer => Rgb(255, 100, 103),
            ResourceType::Image => Rgb(124, 136, 255),
            ResourceType::TopLevelAS => Rgb(154, 230, 0),
            ResourceType::Unknown => Rgb(128, 128, 128),
        }
    }

    /// Whether a memory requirement is meaningful for this type
    pub fn has_memory(&self) -> bool {
        matches!(self, ResourceType::Buffer | ResourceType::Image)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ResourceType {
    fn from(name: String) -> Self {
        ResourceType::from_name(&name)
    }
}

impl From<ResourceType> for String {
    fn from(ty: ResourceType) -> Self {
        ty.as_str().to_string()
    }
}

/// How a node touches a resource at a usage point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyType {
    Ignored,
    Expose,
    Read,
    Write,
}

impl DependencyType {
    /// Decode the compiler's integer code. Total: anything outside 1..=3 is `Ignored`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => DependencyType::Expose,
            2 => DependencyType::Read,
            3 => DependencyType::Write,
            _ => DependencyType::Ignored,
        }
    }

    /// Counted as "produced" in the node listing
    pub fn is_produced(&self) -> bool {
        matches!(self, DependencyType::Expose | DependencyType::Write)
    }

    /// Counted as "consumed" in the node listing
    pub fn is_consumed(&self) -> bool {
        matches!(self, DependencyType::Read)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::Ignored => "Ignored",
            DependencyType::Expose => "Expose",
            DependencyType::Read => "Read",
            DependencyType::Write => "Write",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_decode_is_total() {
        assert_eq!(DependencyType::from_code(1), DependencyType::Expose);
        assert_eq!(DependencyType::from_code(2), DependencyType::Read);
        assert_eq!(DependencyType::from_code(3), DependencyType::Write);
        assert_eq!(DependencyType::from_code(99), DependencyType::Ignored);
        assert_eq!(DependencyType::from_code(0), DependencyType::Ignored);
        assert_eq!(DependencyType::from_code(-1), DependencyType::Ignored);
        assert_eq!(DependencyType::from_code(i64::MIN), DependencyType::Ignored);
    }

    #[test]
    fn test_produced_and_consumed() {
        assert!(DependencyType::Expose.is_produced());
        assert!(DependencyType::Write.is_produced());
        assert!(!DependencyType::Read.is_produced());
        assert!(DependencyType::Read.is_consumed());
        assert!(!DependencyType::Ignored.is_consumed());
        assert!(!DependencyType::Ignored.is_produced());
    }

    #[test]
    fn test_resource_type_names() {
        assert_eq!(ResourceType::from_name("Image"), ResourceType::Image);
        assert_eq!(ResourceType::from_name("TopLevelAS"), ResourceType::TopLevelAS);
        assert_eq!(ResourceType::from_name("Texture3D"), ResourceType::Unknown);
        assert_eq!(ResourceType::Buffer.to_string(), "Buffer");
    }

    #[test]
    fn test_palette() {
        assert_eq!(ResourceType::SceneData.color(), Rgb(255, 186, 0));
        assert_eq!(ResourceType::Buffer.color(), Rgb(255, 100, 103));
        assert_eq!(ResourceType::Image.color(), Rgb(124, 136, 255));
        assert_eq!(ResourceType::TopLevelAS.color(), Rgb(154, 230, 0));
        assert_eq!(ResourceType::Unknown.color(), Rgb(128, 128, 128));
    }

    #[test]
    fn test_resource_type_serde() {
        let ty: ResourceType = serde_json::from_str("\"Buffer\"").unwrap();
        assert_eq!(ty, ResourceType::Buffer);
        let ty: ResourceType = serde_json::from_str("\"Mystery\"").unwrap();
        assert_eq!(ty, ResourceType::Unknown);
        assert_eq!(serde_json::to_string(&ResourceType::Image).unwrap(), "\"Image\"");
    }
}
