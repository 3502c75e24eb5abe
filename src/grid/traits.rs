use glam::IVec2;

use crate::types::GridInfo;

/// Read-only occupancy interface the ray tracer runs against.
///
/// Cell coordinates are `IVec2 { x: col, y: row }`. Implementations must
/// answer `false` for cells outside `[0, cols) x [0, rows)` instead of
/// panicking, so callers never need to bounds-check first. The tracer stops
/// early once a ray leaves the extent described by `info()`.
pub trait Grid {
    fn info(&self) -> &GridInfo;

    fn rows(&self) -> u32 {
        self.info().rows
    }

    fn cols(&self) -> u32 {
        self.info().cols
    }

    fn cell_size(&self) -> f32 {
        self.info().cell_size
    }

    fn in_bounds(&self, cell: IVec2) -> bool {
        self.info().contains(cell)
    }

    /// Whether `cell` blocks the ray. Out-of-bounds cells never do.
    fn is_wall(&self, cell: IVec2) -> bool;
}
