/// State of a single grid cell.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
}

impl Cell {
    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}
