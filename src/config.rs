//! Floating box configuration
//!
//! Supplied once by the owner when a box is created and never mutated
//! afterwards. Everything here is plain data so it can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Edge;

/// Mass-spring-damper parameters for snap-back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}

/// Dismiss the box by flinging it toward this edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlingDismiss {
    /// Minimum release speed (px/s)
    pub min_velocity: f32,
    /// Maximum angle between the release velocity and the edge normal (radians)
    pub max_angle: f32,
    /// Fade-out duration once dismissed (seconds)
    pub fade_duration: f32,
    /// Only keep moving along this edge's axis after release
    #[serde(default)]
    pub lock_axis: bool,
}

/// Dismiss the box by releasing it far enough past this edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragDismiss {
    /// Fraction of the box that must be past the edge, in (0, 1]
    pub min_out_of_bounds: f32,
    /// Speed of the outward exit animation (px/s, unsigned)
    pub exit_velocity: f32,
}

/// Behaviour of a single container edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Resting distance kept from the edge (px)
    pub margin: f32,
    pub spring: SpringParams,
    /// Drag resistance in [0, 1]; higher is stiffer
    pub resistance: Option<f32>,
    pub fling_dismiss: Option<FlingDismiss>,
    pub drag_dismiss: Option<DragDismiss>,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            margin: 0.0,
            spring: SpringParams::default(),
            resistance: None,
            fling_dismiss: None,
            drag_dismiss: None,
        }
    }
}

/// One `EdgeConfig` per container edge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfigs {
    pub top: EdgeConfig,
    pub bottom: EdgeConfig,
    pub left: EdgeConfig,
    pub right: EdgeConfig,
}

impl EdgeConfigs {
    /// Same configuration on every edge
    pub fn uniform(edge: EdgeConfig) -> Self {
        Self {
            top: edge,
            bottom: edge,
            left: edge,
            right: edge,
        }
    }

    pub fn get(&self, edge: Edge) -> &EdgeConfig {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
            Edge::Right => &self.right,
        }
    }
}

/// Complete floating box configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    pub edges: EdgeConfigs,
    pub initial_x: f32,
    pub initial_y: f32,
    /// Glide velocity retention factor per millisecond
    pub deceleration: f32,
    /// Per-axis release speed (px/s) above which the box glides
    pub minimum_glide_velocity: f32,
    /// Scale applied while dragging (visual hint only)
    pub scale_during_drag: Option<f32>,
    /// RGBA colour of the overlay shown when a release would dismiss
    pub destroy_overlay_color: [f32; 4],
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            edges: EdgeConfigs::default(),
            initial_x: 0.0,
            initial_y: 0.0,
            deceleration: DEFAULT_DECELERATION,
            minimum_glide_velocity: DEFAULT_MIN_GLIDE_VELOCITY,
            scale_during_drag: Some(DEFAULT_SCALE_DURING_DRAG),
            destroy_overlay_color: DEFAULT_OVERLAY_COLOR,
        }
    }
}

impl BoxConfig {
    /// Typical picture-in-picture setup: springy vertical edges with
    /// resistance, horizontal edges that dismiss by fling or drag.
    pub fn picture_in_picture() -> Self {
        let vertical = EdgeConfig {
            margin: 8.0,
            spring: SpringParams {
                stiffness: 600.0,
                damping: 15.0,
                mass: 0.2,
            },
            resistance: Some(0.8),
            ..Default::default()
        };
        let horizontal = EdgeConfig {
            margin: 8.0,
            spring: SpringParams {
                stiffness: 500.0,
                damping: 40.0,
                mass: 0.8,
            },
            resistance: None,
            fling_dismiss: Some(FlingDismiss {
                min_velocity: 2400.0,
                max_angle: 30f32.to_radians(),
                fade_duration: 0.2,
                lock_axis: true,
            }),
            drag_dismiss: Some(DragDismiss {
                min_out_of_bounds: 0.5,
                exit_velocity: 1000.0,
            }),
        };

        Self {
            edges: EdgeConfigs {
                top: vertical,
                bottom: vertical,
                left: horizontal,
                right: horizontal,
            },
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoxConfig::default();
        assert_eq!(config.deceleration, 0.985);
        assert_eq!(config.minimum_glide_velocity, 120.0);
        assert_eq!(config.scale_during_drag, Some(1.02));
        assert!(Edge::ALL.iter().all(|&e| config.edges.get(e).drag_dismiss.is_none()));
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "edges": {
                "left": {
                    "margin": 8,
                    "drag_dismiss": { "min_out_of_bounds": 0.5, "exit_velocity": 1000 }
                }
            },
            "initial_x": 20
        }"#;
        let config = BoxConfig::from_json(json).unwrap();
        assert_eq!(config.initial_x, 20.0);
        assert_eq!(config.initial_y, 0.0);
        assert_eq!(config.edges.left.margin, 8.0);
        assert_eq!(config.edges.left.spring, SpringParams::default());
        assert!(config.edges.left.drag_dismiss.is_some());
        assert!(config.edges.right.drag_dismiss.is_none());
    }

    #[test]
    fn test_json_roundtrip_preset() {
        let config = BoxConfig::picture_in_picture();
        let json = config.to_json().unwrap();
        let back = BoxConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(BoxConfig::from_json("{ \"deceleration\": \"fast\" }").is_err());
    }
}
