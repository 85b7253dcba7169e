use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::MovementBounds;

/// Viewer configuration with defaults matching the built-in scene.
/// Every field is optional in the JSON file; missing fields fall back
/// to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial window width in pixels
    pub width: u32,
    /// Initial window height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Camera movement speed in units per second
    pub movement_speed: f32,
    /// Mouse look sensitivity (scales pointer offsets per second)
    pub mouse_sensitivity: f32,
    /// Box the camera position must stay inside
    pub bounds: MovementBounds,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "GPU Ray Tracing Viewer".to_string(),
            fov_y_degrees: 45.0,
            near: 0.5,
            far: 1000.0,
            movement_speed: 20.0,
            mouse_sensitivity: 16.0,
            bounds: MovementBounds::default(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
