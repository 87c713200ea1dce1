//! Viewer configuration
//!
//! Read from a JSON file. Every field is optional; missing fields fall back
//! to the defaults below.

use std::path::{Path, PathBuf};

use rgv_core::VisibleTypes;
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Which usage points count towards a template's optimized memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizedMemoryRule {
    /// The upstream comparison `start <= point && end <= point`, which admits
    /// only points at or after the end of a range
    #[default]
    Parity,

    /// Points inside the range: `start <= point && point <= end`
    Containment,
}

impl OptimizedMemoryRule {
    /// Whether `point` is admitted for the usage range `[start, end]`
    pub fn admits(&self, start: i64, end: i64, point: i64) -> bool {
        match self {
            OptimizedMemoryRule::Parity => start <= point && end <= point,
            OptimizedMemoryRule::Containment => start <= point && point <= end,
        }
    }
}

/// Geometry of the timeline chart, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartStyle {
    /// Height of one resource bar
    pub bar_height: f32,

    /// Outer margin around the plotting area
    pub margin: f32,

    /// Extra room on the left for band labels
    pub margin_left: f32,

    /// Minimum horizontal distance between axis ticks
    pub min_tick_spacing: f32,

    /// Padding subtracted from the measured container size
    pub container_padding: [f32; 2],
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bar_height: 32.0,
            margin: 32.0,
            margin_left: 80.0,
            min_tick_spacing: 24.0,
            container_padding: [32.0, 48.0],
        }
    }
}

impl ChartStyle {
    /// Reject sizes that would invert the chart geometry or make the tick
    /// spacing meaningless
    pub fn validate(&self) -> Result<(), DataError> {
        let [padding_x, padding_y] = self.container_padding;
        let positive = [("barHeight", self.bar_height), ("minTickSpacing", self.min_tick_spacing)];
        let non_negative = [
            ("margin", self.margin),
            ("marginLeft", self.margin_left),
            ("containerPadding", padding_x),
            ("containerPadding", padding_y),
        ];

        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(DataError::InvalidChartStyle {
                    field,
                    value,
                    requirement: "a positive number",
                });
            }
        }
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DataError::InvalidChartStyle {
                    field,
                    value,
                    requirement: "zero or more",
                });
            }
        }
        Ok(())
    }
}

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    /// Artifacts to load at startup, in selector order
    pub artifacts: Vec<PathBuf>,

    /// Window test used for the optimized memory statistic
    pub optimized_memory_rule: OptimizedMemoryRule,

    /// Resource types visible when the viewer starts
    pub visible_types: VisibleTypes,

    /// Timeline geometry
    pub chart: ChartStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            artifacts: Vec::new(),
            optimized_memory_rule: OptimizedMemoryRule::default(),
            visible_types: VisibleTypes::all(),
            chart: ChartStyle::default(),
        }
    }
}

impl ViewerConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(json)?;
        config.chart.validate()?;
        Ok(config)
    }

    /// Append artifacts given on the command line after the configured ones
    pub fn with_extra_artifacts(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        for path in paths {
            if !self.artifacts.contains(&path) {
                self.artifacts.push(path);
            }
        }
        self
    }
}
