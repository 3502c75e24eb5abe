pub const DEFAULT_SCREEN_WIDTH: u32 = 800;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 800;

pub const DEFAULT_ROWS: u32 = 80;
pub const DEFAULT_COLS: u32 = 80;
pub const DEFAULT_CELL_SIZE: f32 = 20.0;

pub const DEFAULT_ORIGIN_SPEED: f32 = 8.0;
pub const DEFAULT_MAX_DISTANCE: f32 = 1000.0;
