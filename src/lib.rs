pub mod config;
pub mod grid;
pub mod raycast;
pub mod scene;
pub mod types;
pub mod visualization;

pub use config::{SceneConfig, load_scene_config};
pub use grid::{Cell, Grid, WallGrid};
pub use raycast::{RayQuery, RayResult, trace};
pub use scene::{Scene, SceneRay};
pub use types::{GridInfo, RaycastError};
