use glam::{IVec2, Vec2};

use crate::grid::{Cell, Grid};
use crate::types::{GridInfo, RaycastError};

/// Row-major dense grid. `x` is the column, `y` the row.
#[derive(Debug, Clone)]
pub struct Grid2d<T> {
    info: GridInfo,
    data: Vec<T>,
}

/// The paintable grid the viewer edits and the tracer queries.
pub type WallGrid = Grid2d<Cell>;

impl<T> Grid2d<T> {
    pub fn new(info: GridInfo, data: Vec<T>) -> Result<Self, RaycastError> {
        info.validate()?;
        let expected_len = info.cell_count();
        if data.len() != expected_len {
            return Err(RaycastError::InvalidGrid(format!(
                "data length {} does not match grid size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self { info, data })
    }

    pub fn filled(info: GridInfo, value: T) -> Result<Self, RaycastError>
    where
        T: Clone,
    {
        info.validate()?;
        let data = vec![value; info.cell_count()];
        Ok(Self { info, data })
    }

    pub fn info(&self) -> &GridInfo {
        &self.info
    }

    pub fn get(&self, cell: IVec2) -> Option<&T> {
        if !self.info.contains(cell) {
            return None;
        }
        let idx = self.index(cell);
        Some(&self.data[idx])
    }

    pub fn set(&mut self, cell: IVec2, value: T) -> Result<(), RaycastError> {
        if !self.info.contains(cell) {
            return Err(RaycastError::OutOfBounds(format!(
                "cell (row {}, col {}) out of bounds for grid {}x{}",
                cell.y, cell.x, self.info.rows, self.info.cols
            )));
        }
        let idx = self.index(cell);
        self.data[idx] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    fn index(&self, cell: IVec2) -> usize {
        (cell.y as usize) * (self.info.cols as usize) + (cell.x as usize)
    }

    /// Continuous grid-space coordinates of a pixel position.
    pub fn pixel_to_map(&self, pos: Vec2) -> Vec2 {
        pos / self.info.cell_size
    }

    /// Cell containing a pixel position. Uses floor division, so points left
    /// of or above the grid map to negative indices rather than to cell 0.
    pub fn pixel_to_cell(&self, pos: Vec2) -> IVec2 {
        self.pixel_to_map(pos).floor().as_ivec2()
    }

    /// Top-left pixel corner of a cell.
    pub fn cell_origin(&self, cell: IVec2) -> Vec2 {
        cell.as_vec2() * self.info.cell_size
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl Grid2d<Cell> {
    pub fn empty(info: GridInfo) -> Result<Self, RaycastError> {
        Self::filled(info, Cell::Empty)
    }

    /// Bounds-checked cell lookup, `None` outside the grid.
    pub fn cell_at(&self, cell: IVec2) -> Option<Cell> {
        self.get(cell).copied()
    }

    pub fn clear(&mut self) {
        self.fill(Cell::Empty);
    }

    pub fn wall_count(&self) -> usize {
        self.data.iter().filter(|cell| cell.is_wall()).count()
    }

    /// Iterate over the coordinates of every wall cell in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = IVec2> + '_ {
        let cols = self.info.cols as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_wall())
            .map(move |(idx, _)| IVec2::new((idx % cols) as i32, (idx / cols) as i32))
    }
}

impl Grid for Grid2d<Cell> {
    fn info(&self) -> &GridInfo {
        self.info()
    }

    fn is_wall(&self, cell: IVec2) -> bool {
        self.cell_at(cell).is_some_and(Cell::is_wall)
    }
}
