use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("Invalid layout config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Geometry of the spatial layout, in presentation units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Vertical distance between hierarchy levels
    pub hierarchy_vertical_gap: f32,
    /// Horizontal distance between siblings in the standard layout
    pub child_horizontal_spacing: f32,
    /// Radius of the relation ring around the focal node
    pub relation_radial_distance: f32,
    /// Advisory only; used for overlap diagnostics, never enforced
    pub min_node_distance: f32,
    pub node_radius: f32,
}

impl LayoutConfig {
    pub const DEFAULT_HIERARCHY_VERTICAL_GAP: f32 = 150.0;
    pub const DEFAULT_CHILD_HORIZONTAL_SPACING: f32 = 180.0;
    pub const DEFAULT_RELATION_RADIAL_DISTANCE: f32 = 250.0;
    pub const DEFAULT_MIN_NODE_DISTANCE: f32 = 100.0;
    pub const DEFAULT_NODE_RADIUS: f32 = 30.0;

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("hierarchyVerticalGap", self.hierarchy_vertical_gap),
            ("childHorizontalSpacing", self.child_horizontal_spacing),
            ("relationRadialDistance", self.relation_radial_distance),
            ("minNodeDistance", self.min_node_distance),
            ("nodeRadius", self.node_radius),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hierarchy_vertical_gap: Self::DEFAULT_HIERARCHY_VERTICAL_GAP,
            child_horizontal_spacing: Self::DEFAULT_CHILD_HORIZONTAL_SPACING,
            relation_radial_distance: Self::DEFAULT_RELATION_RADIAL_DISTANCE,
            min_node_distance: Self::DEFAULT_MIN_NODE_DISTANCE,
            node_radius: Self::DEFAULT_NODE_RADIUS,
        }
    }
}
