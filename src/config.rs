//! Scene configuration loaded from YAML.
//!
//! Every field is optional; missing fields fall back to the defaults in
//! [`crate::types::constants`].
//!
//! ```yaml
//! screen_width: 800
//! screen_height: 800
//! rows: 40
//! cols: 40
//! cell_size: 20.0
//! origin: [400.0, 400.0]
//! max_distance: 1000.0
//! walls:
//!   - [5, 7]   # [row, col]
//! ```

use std::path::Path;

use glam::{IVec2, Vec2};
use serde::Deserialize;

use crate::types::{
    DEFAULT_CELL_SIZE, DEFAULT_COLS, DEFAULT_MAX_DISTANCE, DEFAULT_ORIGIN_SPEED,
    DEFAULT_ROWS, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, GridInfo, RaycastError,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub rows: u32,
    pub cols: u32,
    #[serde(deserialize_with = "deserialize_positive")]
    pub cell_size: f32,
    /// Ray origin in pixels. Defaults to the screen centre.
    pub origin: Option<[f32; 2]>,
    /// Pixels the origin moves per frame while a movement key is held.
    #[serde(deserialize_with = "deserialize_non_negative")]
    pub origin_speed: f32,
    #[serde(deserialize_with = "deserialize_positive")]
    pub max_distance: f32,
    /// Initial walls as `[row, col]` pairs.
    pub walls: Vec<[u32; 2]>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cell_size: DEFAULT_CELL_SIZE,
            origin: None,
            origin_speed: DEFAULT_ORIGIN_SPEED,
            max_distance: DEFAULT_MAX_DISTANCE,
            walls: Vec::new(),
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RaycastError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.screen_width == 0 || config.screen_height == 0 {
            return Err(RaycastError::InvalidGrid(format!(
                "screen size must be non-zero, got {}x{}",
                config.screen_width, config.screen_height
            )));
        }
        config.grid_info().validate()?;
        Ok(config)
    }

    pub fn grid_info(&self) -> GridInfo {
        GridInfo::new(self.rows, self.cols, self.cell_size)
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width as f32, self.screen_height as f32)
    }

    pub fn origin(&self) -> Vec2 {
        match self.origin {
            Some([x, y]) => Vec2::new(x, y),
            None => 0.5 * self.screen_size(),
        }
    }

    /// Wall coordinates as `IVec2 { x: col, y: row }`.
    pub fn wall_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.walls
            .iter()
            .map(|&[row, col]| IVec2::new(col as i32, row as i32))
    }
}

fn deserialize_positive<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("value must be positive and finite"))
    }
}

fn deserialize_non_negative<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "value must be non-negative and finite",
        ))
    }
}

pub fn load_scene_config(yaml_path: impl AsRef<Path>) -> Result<SceneConfig, RaycastError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let config = SceneConfig::from_yaml_str(&yaml_str)?;
    log::debug!(
        "loaded scene config from {}: {}x{} cells of {}px, {} walls",
        yaml_path.display(),
        config.rows,
        config.cols,
        config.cell_size,
        config.walls.len()
    );
    Ok(config)
}
