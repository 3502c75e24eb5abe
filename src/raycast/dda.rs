use glam::Vec2;

use crate::grid::Grid;
use crate::raycast::{RayResult, RayWalk};
use crate::types::RaycastError;

/// Fast voxel traversal (Amanatides & Woo) that returns the first wall the ray enters.
///
/// `origin` is in pixels and may lie outside the grid. `direction` does not need
/// to be normalised but must be non-zero. The starting cell itself is never
/// tested, so a ray cast from inside a wall reports the next wall it enters.
///
/// On a miss the result distance is exactly `max_distance`.
pub fn trace<G: Grid + ?Sized>(
    grid: &G,
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
) -> Result<RayResult, RaycastError> {
    let info = grid.info();
    let mut walk = RayWalk::new(info, origin, direction, max_distance)?;

    let mut steps = 0;
    // Cells outside the grid never block, so once the ray is heading away
    // from it the rest of the walk is a guaranteed miss.
    while !walk.has_left(info) {
        let Some(step) = walk.next() else {
            break;
        };
        steps += 1;
        if grid.is_wall(step.cell) {
            log::trace!("ray hit wall {:?} after {} steps", step.cell, steps);
            return Ok(RayResult {
                distance: step.distance,
                hit: true,
                cell: Some(step.cell),
                steps,
            });
        }
    }

    Ok(RayResult::miss(max_distance, steps))
}
