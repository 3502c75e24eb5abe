//! Grid metadata.

use glam::IVec2;

use crate::types::{DEFAULT_CELL_SIZE, DEFAULT_COLS, DEFAULT_ROWS, RaycastError};

#[derive(Debug, Clone, PartialEq)]
pub struct GridInfo {
    pub rows: u32,
    pub cols: u32,
    /// Edge length of one cell in pixels.
    pub cell_size: f32,
}

impl Default for GridInfo {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridInfo {
    pub fn new(rows: u32, cols: u32, cell_size: f32) -> Self {
        Self {
            rows,
            cols,
            cell_size,
        }
    }

    pub fn square(size: u32, cell_size: f32) -> Self {
        Self::new(size, size, cell_size)
    }

    pub fn validate(&self) -> Result<(), RaycastError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(RaycastError::InvalidGrid(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(RaycastError::InvalidGrid(format!(
                "cell size must be positive and finite, got {}",
                self.cell_size
            )));
        }
        Ok(())
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether `cell` (`x` = column, `y` = row) lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        // equivalent to (x >= 0 && x < cols) for signed x
        (cell.x as u32) < self.cols && (cell.y as u32) < self.rows
    }
}
