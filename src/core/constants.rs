// Grid
pub const GRID_SIZE: i16 = 20;

// Tick cadences
pub const BASE_TICK_INTERVAL_MS: u64 = 100;
pub const SLOWDOWN_TICK_INTERVAL_MS: u64 = 200;
pub const BONUS_COUNTDOWN_INTERVAL_MS: u64 = 1000;

// Real-time frame pacing
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS input polling
pub const MAX_PHYSICS_DT_MS: u64 = 500;

// Food values and draw weights (percent; normal takes the remainder to 100)
pub const FOOD_VALUE_NORMAL: u32 = 1;
pub const FOOD_VALUE_BONUS: u32 = 5;
pub const FOOD_VALUE_JACKPOT: u32 = 10;
pub const FOOD_WEIGHT_BONUS_PERCENT: u32 = 20;
pub const FOOD_WEIGHT_JACKPOT_PERCENT: u32 = 10;

// Seconds a bonus-valued food stays on the board before dropping back to 1
pub const BONUS_COUNTDOWN_SECS: u32 = 10;
pub const JACKPOT_COUNTDOWN_SECS: u32 = 4;

// Lives
pub const STARTING_LIVES: u32 = 3;
pub const EXTRA_LIFE_MIN_FOODS: u32 = 5;
pub const EXTRA_LIFE_MAX_FOODS: u32 = 10;

// Slowdown food spawn cycle (normal foods eaten between spawns)
pub const SLOWDOWN_CYCLE_MIN_FOODS: u32 = 3;
pub const SLOWDOWN_CYCLE_MAX_FOODS: u32 = 6;

// Obstacles
pub const OBSTACLE_EVERY_N_FOODS: u32 = 3;

// Random free-cell search gives up after this many misses
pub const PLACEMENT_MAX_ATTEMPTS: u32 = 128;

// Highscores
pub const HIGHSCORE_DISPLAY_COUNT: usize = 5;
pub const PLAYER_NAME_MAX_LENGTH: usize = 16;
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

// Board rendering: max terminal columns per game cell
pub const BOARD_MAX_SCALE: usize = 3;
