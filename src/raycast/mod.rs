use glam::{IVec2, Vec2};

use crate::grid::{Grid, WallGrid};
use crate::types::RaycastError;

pub mod dda;
pub mod walk;

pub use dda::trace;
pub use walk::{RayStep, RayWalk};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayResult {
    /// Distance from the ray origin to the boundary of the wall hit (pixels),
    /// or the max distance on a miss.
    pub distance: f32,
    pub hit: bool,
    /// Grid cell that contains the first hit.
    pub cell: Option<IVec2>,
    /// Number of grid line crossings evaluated.
    pub steps: u32,
}

impl RayResult {
    pub fn miss(max_distance: f32, steps: u32) -> Self {
        Self {
            distance: max_distance,
            hit: false,
            cell: None,
            steps,
        }
    }

    /// Pixel position where the ray stopped.
    pub fn end_point(&self, origin: Vec2, direction: Vec2) -> Vec2 {
        origin + direction.normalize_or_zero() * self.distance
    }
}

/// A single ray to trace against any [`Grid`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayQuery {
    pub origin: Vec2,
    pub direction: Vec2,
    pub max_distance: f32,
}

impl RayQuery {
    pub fn new(origin: Vec2, direction: Vec2, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
        }
    }

    /// Ray from `origin` through `target`.
    pub fn towards(origin: Vec2, target: Vec2, max_distance: f32) -> Self {
        Self::new(origin, target - origin, max_distance)
    }

    pub fn trace<G: Grid + ?Sized>(&self, grid: &G) -> Result<RayResult, RaycastError> {
        trace(grid, self.origin, self.direction, self.max_distance)
    }

    pub fn walk<G: Grid + ?Sized>(&self, grid: &G) -> Result<RayWalk, RaycastError> {
        RayWalk::new(grid.info(), self.origin, self.direction, self.max_distance)
    }
}

impl WallGrid {
    pub fn trace(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Result<RayResult, RaycastError> {
        trace(self, origin, direction, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::types::GridInfo;

    #[test]
    fn end_point_follows_direction() {
        let result = RayResult::miss(10.0, 0);
        let end = result.end_point(Vec2::new(1.0, 1.0), Vec2::new(0.0, 3.0));
        assert_eq!(end, Vec2::new(1.0, 11.0));
    }

    #[test]
    fn query_towards_target_hits_wall_behind_it() {
        let mut grid = WallGrid::empty(GridInfo::square(10, 20.0)).unwrap();
        grid.set(IVec2::new(9, 0), Cell::Wall).unwrap();

        let query = RayQuery::towards(Vec2::new(10.0, 10.0), Vec2::new(50.0, 10.0), 1000.0);
        let result = query.trace(&grid).unwrap();
        assert!(result.hit);
        assert_eq!(result.distance, 170.0);
        assert_eq!(grid.trace(query.origin, query.direction, 1000.0).unwrap(), result);
    }
}
