//! Interactive scene state: a paintable wall grid plus a ray from a movable
//! origin towards a target point.
//!
//! Nothing here knows about windows or input devices; the viewer translates
//! key and mouse events into these calls once per frame.

use glam::{IVec2, Vec2};

use crate::config::SceneConfig;
use crate::grid::{Cell, Grid, WallGrid};
use crate::raycast::{RayResult, RayWalk, trace};
use crate::types::RaycastError;

/// The scene's ray, cast once per frame and shared by everything that
/// draws or reports it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneRay {
    pub direction: Option<Vec2>,
    pub result: Option<RayResult>,
    /// Where the ray stops, or the origin when there is no ray.
    pub end: Vec2,
}

impl SceneRay {
    pub fn distance(&self) -> f32 {
        self.result.map_or(0.0, |r| r.distance)
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    grid: WallGrid,
    origin: Vec2,
    target: Vec2,
    origin_speed: f32,
    max_distance: f32,
    screen_size: Vec2,
    show_traversal: bool,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Result<Self, RaycastError> {
        if !config.max_distance.is_finite() || config.max_distance <= 0.0 {
            return Err(RaycastError::InvalidDistance(config.max_distance));
        }

        let mut grid = WallGrid::empty(config.grid_info())?;
        for cell in config.wall_cells() {
            grid.set(cell, Cell::Wall)?;
        }

        let origin = config.origin();
        Ok(Self {
            grid,
            origin,
            target: origin,
            origin_speed: config.origin_speed,
            max_distance: config.max_distance,
            screen_size: config.screen_size(),
            show_traversal: false,
        })
    }

    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    pub fn show_traversal(&self) -> bool {
        self.show_traversal
    }

    pub fn toggle_traversal(&mut self) {
        self.show_traversal = !self.show_traversal;
    }

    /// Move the origin by `axis * origin_speed`, where each axis is typically
    /// -1, 0 or 1 from the held movement keys.
    pub fn move_origin(&mut self, axis: Vec2) {
        self.origin += axis * self.origin_speed;
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Mark the cell under `pos` as a wall. Returns false when `pos` is off the grid.
    pub fn paint(&mut self, pos: Vec2) -> bool {
        self.set_cell_at(pos, Cell::Wall)
    }

    /// Clear the cell under `pos`. Returns false when `pos` is off the grid.
    pub fn erase(&mut self, pos: Vec2) -> bool {
        self.set_cell_at(pos, Cell::Empty)
    }

    fn set_cell_at(&mut self, pos: Vec2, value: Cell) -> bool {
        let cell = self.grid.pixel_to_cell(pos);
        match self.grid.set(cell, value) {
            Ok(()) => {
                log::debug!("set cell (row {}, col {}) to {:?}", cell.y, cell.x, value);
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        log::debug!("clearing {} walls", self.grid.wall_count());
        self.grid.clear();
    }

    /// Unit vector from the origin towards the target, `None` while they coincide.
    pub fn ray_direction(&self) -> Option<Vec2> {
        (self.target - self.origin).try_normalize()
    }

    /// Trace the ray from the origin towards the target.
    pub fn cast(&self) -> SceneRay {
        let direction = self.ray_direction();
        let result = direction.and_then(|dir| {
            match trace(&self.grid, self.origin, dir, self.max_distance) {
                Ok(result) => Some(result),
                Err(err) => {
                    log::warn!("ray cast failed: {err}");
                    None
                }
            }
        });
        let end = match (direction, result) {
            (Some(dir), Some(result)) => result.end_point(self.origin, dir),
            _ => self.origin,
        };

        SceneRay {
            direction,
            result,
            end,
        }
    }

    /// Cells `ray` passes through up to and including the hit cell.
    pub fn traversed_cells(&self, ray: &SceneRay) -> Vec<IVec2> {
        let (Some(dir), Some(result)) = (ray.direction, ray.result) else {
            return Vec::new();
        };
        // A wall entered at distance zero still counts as traversed.
        let reach = result.distance.max(f32::MIN_POSITIVE);
        let info = self.grid.info();
        let Ok(mut walk) = RayWalk::new(info, self.origin, dir, reach) else {
            return Vec::new();
        };

        let mut cells = Vec::new();
        while !walk.has_left(info) {
            let Some(step) = walk.next() else {
                break;
            };
            if self.grid.in_bounds(step.cell) {
                cells.push(step.cell);
            }
        }
        cells
    }

    /// Status text for `ray`: origin, target, ray end and ray length.
    pub fn hud_lines(&self, ray: &SceneRay) -> [String; 4] {
        [
            format!("ORI: {:.1} / {:.1}", self.origin.x, self.origin.y),
            format!("TAR: {:.1} / {:.1}", self.target.x, self.target.y),
            format!("RAY: {:.1} / {:.1}", ray.end.x, ray.end.y),
            format!("LEN: {:.4}", ray.distance()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn test_scene() -> Scene {
        let config = SceneConfig {
            rows: 10,
            cols: 10,
            cell_size: 20.0,
            origin: Some([105.0, 105.0]),
            ..Default::default()
        };
        Scene::new(&config).unwrap()
    }

    #[test]
    fn new_applies_config_walls() {
        let config = SceneConfig {
            rows: 4,
            cols: 4,
            walls: vec![[1, 2], [3, 0]],
            ..Default::default()
        };
        let scene = Scene::new(&config).unwrap();
        assert_eq!(
            scene.grid().walls().collect::<Vec<_>>(),
            vec![IVec2::new(2, 1), IVec2::new(0, 3)]
        );
    }

    #[test]
    fn new_rejects_walls_outside_grid() {
        let config = SceneConfig {
            rows: 4,
            cols: 4,
            walls: vec![[4, 0]],
            ..Default::default()
        };
        assert!(matches!(
            Scene::new(&config),
            Err(RaycastError::OutOfBounds(_))
        ));
    }

    #[test]
    fn paint_and_erase_follow_pixel_position() {
        let mut scene = test_scene();
        assert!(scene.paint(Vec2::new(145.0, 101.0)));
        assert_eq!(scene.grid().cell_at(IVec2::new(7, 5)), Some(Cell::Wall));

        assert!(scene.erase(Vec2::new(159.9, 119.9)));
        assert_eq!(scene.grid().wall_count(), 0);

        assert!(!scene.paint(Vec2::new(-1.0, 50.0)));
        assert!(!scene.paint(Vec2::new(50.0, 200.0)));
        assert_eq!(scene.grid().wall_count(), 0);
    }

    #[test]
    fn clear_removes_painted_walls() {
        let mut scene = test_scene();
        scene.paint(Vec2::new(5.0, 5.0));
        scene.paint(Vec2::new(25.0, 5.0));
        scene.clear();
        assert_eq!(scene.grid().wall_count(), 0);
    }

    #[test]
    fn move_origin_scales_by_speed() {
        let mut scene = test_scene();
        scene.move_origin(Vec2::new(1.0, -1.0));
        assert_eq!(scene.origin(), Vec2::new(113.0, 97.0));
    }

    #[test]
    fn cast_towards_target_hits_painted_wall() {
        let mut scene = test_scene();
        scene.paint(Vec2::new(150.0, 110.0));
        scene.set_target(Vec2::new(120.0, 105.0));

        let ray = scene.cast();
        let result = ray.result.unwrap();
        assert!(result.hit);
        assert_relative_eq!(result.distance, 35.0, epsilon = 1e-4);
        assert_relative_eq!(ray.end.x, 140.0, epsilon = 1e-3);
        assert_eq!(
            scene.traversed_cells(&ray),
            vec![IVec2::new(6, 5), IVec2::new(7, 5)]
        );
    }

    #[test]
    fn no_ray_when_target_equals_origin() {
        let scene = test_scene();
        let ray = scene.cast();
        assert!(ray.direction.is_none());
        assert!(ray.result.is_none());
        assert_eq!(ray.end, scene.origin());
        assert_eq!(ray.distance(), 0.0);
        assert!(scene.traversed_cells(&ray).is_empty());
    }

    #[test]
    fn miss_traversal_stops_at_grid_edge() {
        let mut scene = test_scene();
        scene.set_target(Vec2::new(205.0, 105.0));

        let ray = scene.cast();
        assert!(!ray.result.unwrap().hit);
        let cells = scene.traversed_cells(&ray);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells.last(), Some(&IVec2::new(9, 5)));
    }

    #[test]
    fn hud_lines_match_viewer_format() {
        let mut scene = test_scene();
        scene.set_target(Vec2::new(105.0, 205.0));

        let hud = scene.hud_lines(&scene.cast());
        assert_eq!(hud[0], "ORI: 105.0 / 105.0");
        assert_eq!(hud[1], "TAR: 105.0 / 205.0");
        assert_eq!(hud[2], "RAY: 105.0 / 1105.0");
        assert_eq!(hud[3], "LEN: 1000.0000");
    }

    #[test]
    fn hud_reports_the_ray_it_is_given() {
        let mut scene = test_scene();
        scene.set_target(Vec2::new(205.0, 105.0));
        let before = scene.cast();

        scene.paint(Vec2::new(150.0, 105.0));
        assert_eq!(scene.hud_lines(&before)[3], "LEN: 1000.0000");
        assert_eq!(scene.hud_lines(&scene.cast())[3], "LEN: 35.0000");
    }
}
