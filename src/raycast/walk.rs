use std::iter::FusedIterator;

use glam::{DVec2, IVec2, Vec2};

use crate::types::{GridInfo, RaycastError};

/// Largest start cell index accepted on either axis. Leaves room for the walk
/// to step well past it without leaving `i32`.
const MAX_START_CELL: f32 = (1u32 << 30) as f32;

/// Cell-by-cell traversal of a ray through grid space (Amanatides & Woo).
///
/// Yields every cell the ray enters after leaving its starting cell, together
/// with the pixel distance at which it is entered. The walk is not clipped to
/// the grid extent; it stops once the entry distance exceeds `max_distance`.
///
/// Boundary distances are recomputed from the crossing count in `f64` rather
/// than accumulated, so long walks neither drift nor stall.
#[derive(Debug, Clone)]
pub struct RayWalk {
    /// Current cell being processed.
    cell: IVec2,
    /// Normalised step direction along each axis.
    step: IVec2,
    /// Grid-space distance along the ray to the first boundary on each axis.
    t_init: DVec2,
    /// Grid-space distance along the ray to cross one full cell on each axis.
    t_delta: DVec2,
    /// Boundaries crossed so far on each axis.
    crossings: DVec2,
    cell_size: f64,
    max_distance: f64,
    done: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayStep {
    pub cell: IVec2,
    /// Distance from the ray origin to the boundary crossed into `cell` (pixels).
    pub distance: f32,
}

impl RayWalk {
    pub fn new(
        info: &GridInfo,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Result<Self, RaycastError> {
        info.validate()?;
        let dir = direction
            .try_normalize()
            .ok_or(RaycastError::InvalidDirection)?;
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(RaycastError::InvalidDistance(max_distance));
        }

        let start = origin / info.cell_size;
        if !start.is_finite() || start.abs().max_element() >= MAX_START_CELL {
            return Err(RaycastError::InvalidOrigin);
        }
        // floor, not truncation: -0.5 belongs to cell -1
        let cell = start.floor().as_ivec2();

        let (step_x, t_delta_x, t_init_x) = axis_params(start.x, dir.x);
        let (step_y, t_delta_y, t_init_y) = axis_params(start.y, dir.y);

        Ok(Self {
            cell,
            step: IVec2::new(step_x, step_y),
            t_init: DVec2::new(t_init_x, t_init_y),
            t_delta: DVec2::new(t_delta_x, t_delta_y),
            crossings: DVec2::ZERO,
            cell_size: info.cell_size as f64,
            max_distance: max_distance as f64,
            done: false,
        })
    }

    /// The cell the walk is currently in (the start cell before the first step).
    pub fn cell(&self) -> IVec2 {
        self.cell
    }

    /// Grid-space length of one full cell crossing per axis, `INFINITY` for an
    /// axis the ray never crosses.
    pub fn unit_step(&self) -> Vec2 {
        self.t_delta.as_vec2()
    }

    /// True once the current cell is outside the grid on an axis the ray is
    /// moving away from (or never moves along), so no later cell can be inside.
    pub fn has_left(&self, info: &GridInfo) -> bool {
        let leaving = |cell: i32, len: u32, step: i32, t_delta: f64| {
            if cell < 0 {
                step < 0 || t_delta.is_infinite()
            } else if i64::from(cell) >= i64::from(len) {
                step > 0 || t_delta.is_infinite()
            } else {
                false
            }
        };
        leaving(self.cell.x, info.cols, self.step.x, self.t_delta.x)
            || leaving(self.cell.y, info.rows, self.step.y, self.t_delta.y)
    }

    fn next_boundary(&self) -> DVec2 {
        // An axis with infinite t_delta never advances, so its count stays at
        // zero and 0 * INFINITY is never evaluated.
        let axis = |t_init: f64, t_delta: f64, crossings: f64| {
            if crossings == 0.0 {
                t_init
            } else {
                t_init + crossings * t_delta
            }
        };
        DVec2::new(
            axis(self.t_init.x, self.t_delta.x, self.crossings.x),
            axis(self.t_init.y, self.t_delta.y, self.crossings.y),
        )
    }

    fn finish(&mut self) -> Option<RayStep> {
        self.done = true;
        None
    }
}

impl Iterator for RayWalk {
    type Item = RayStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let t_max = self.next_boundary();

        // Strict comparison: on an exact corner crossing the row advances first.
        let t;
        let cell;
        if t_max.x < t_max.y {
            t = t_max.x;
            self.crossings.x += 1.0;
            cell = self
                .cell
                .x
                .checked_add(self.step.x)
                .map(|x| IVec2::new(x, self.cell.y));
        } else {
            t = t_max.y;
            self.crossings.y += 1.0;
            cell = self
                .cell
                .y
                .checked_add(self.step.y)
                .map(|y| IVec2::new(self.cell.x, y));
        }

        let distance = t * self.cell_size;
        if distance > self.max_distance {
            return self.finish();
        }
        let Some(cell) = cell else {
            return self.finish();
        };
        self.cell = cell;

        log::trace!("ray entered cell {:?} at {}", self.cell, distance);
        Some(RayStep {
            cell,
            // max_distance is an f32, so rounding cannot push this past it
            distance: distance as f32,
        })
    }
}

impl FusedIterator for RayWalk {}

/// Returns `(step, t_delta, t_init)` for one axis in grid units.
///
/// A zero component never crosses a boundary on that axis, so both lengths
/// are infinite and the other axis always wins the comparison.
fn axis_params(start: f32, dir: f32) -> (i32, f64, f64) {
    let step = if dir < 0.0 { -1 } else { 1 };
    if dir == 0.0 {
        return (step, f64::INFINITY, f64::INFINITY);
    }

    let start = start as f64;
    let offset = start - start.floor();
    let dist_to_boundary = if step > 0 { 1.0 - offset } else { offset };

    let t_delta = 1.0 / (dir as f64).abs();
    let t_init = dist_to_boundary * t_delta;
    (step, t_delta, t_init)
}
