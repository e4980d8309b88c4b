/// Number of rows in the playing grid
pub const GRID_ROWS: i16 = 20;

/// Number of columns in the playing grid
pub const GRID_COLS: i16 = 20;

/// Snake length at the start of a round
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Default tick interval in milliseconds for the game loop
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 120;

/// Points awarded per food eaten
pub const FOOD_SCORE: u32 = 10;

/// Obstacles requested for the first round
pub const INITIAL_OBSTACLE_COUNT: u32 = 5;

/// Obstacles requested after a restart
pub const RESET_OBSTACLE_COUNT: u32 = 7;

/// Smallest edge of an obstacle rectangle, in cells
pub const MIN_OBSTACLE_SIZE: i16 = 1;

/// Largest edge of an obstacle rectangle, in cells
pub const MAX_OBSTACLE_SIZE: i16 = 3;

/// Anchor attempts per obstacle before the obstacle is skipped
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// Food placement draws before falling back to a free-cell scan
pub const MAX_FOOD_ATTEMPTS: u32 = 200;
