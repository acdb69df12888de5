//! Game entities and the full game state.

use crate::core::constants::{
    BASE_TICK_INTERVAL_MS, BONUS_COUNTDOWN_INTERVAL_MS, BONUS_COUNTDOWN_SECS,
    EXTRA_LIFE_MAX_FOODS, EXTRA_LIFE_MIN_FOODS, FOOD_VALUE_BONUS, FOOD_VALUE_JACKPOT,
    FOOD_VALUE_NORMAL, GRID_SIZE, JACKPOT_COUNTDOWN_SECS, PLACEMENT_MAX_ATTEMPTS,
    SLOWDOWN_CYCLE_MAX_FOODS, SLOWDOWN_CYCLE_MIN_FOODS, STARTING_LIVES,
};
use crate::core::timing::TickTimer;
use crate::game::grid::{first_free_cell, random_free_cell};
use rand::Rng;
use std::collections::{HashSet, VecDeque};

/// A position on the square play grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step away in the given direction.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Cardinal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset in grid coordinates (y grows downward).
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A food pellet on the board and the points it is currently worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub value: u32,
}

/// Seconds a food of the given value survives on the board before its value
/// expires back to normal. `None` for foods with no countdown.
pub fn bonus_countdown_secs(value: u32) -> Option<u32> {
    match value {
        FOOD_VALUE_BONUS => Some(BONUS_COUNTDOWN_SECS),
        FOOD_VALUE_JACKPOT => Some(JACKPOT_COUNTDOWN_SECS),
        _ => None,
    }
}

/// Complete state of one run. The head is at the front of `snake`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid_size: i16,

    // Snake
    pub snake: VecDeque<Cell>,
    /// Velocity applied on the most recent movement step. `None` until the
    /// first input takes effect and again after a life reset.
    pub direction: Option<Direction>,
    /// Buffered direction from input, latched at the start of the next step.
    pub pending_direction: Option<Direction>,
    /// Pending tail segments. The tail is retained instead of popped while
    /// this is positive.
    pub grow_amount: u32,

    // Food
    pub food: Option<Food>,
    /// Value the next food will carry, locked in when the current one is
    /// eaten and committed when the replacement is placed.
    pub next_food_value: u32,
    /// Seconds left before the board food drops back to normal value.
    pub bonus_remaining: Option<u32>,

    // Slowdown food
    pub slowdown_food: Option<Cell>,
    pub slowdown_active: bool,
    pub foods_since_slowdown_cycle: u32,
    /// Normal foods to eat before the next slowdown food appears.
    pub slowdown_cycle_len: u32,

    // Obstacles
    pub obstacles: HashSet<Cell>,

    // Score and lives
    pub score: u32,
    pub lives: u32,
    pub foods_eaten: u32,
    pub foods_since_extra_life: u32,
    /// Foods required for the next extra life. Re-rolled each time one is
    /// awarded.
    pub extra_life_threshold: u32,

    // Flags and clocks
    pub paused: bool,
    pub game_over: bool,
    /// True once the first direction input has been accepted.
    pub started: bool,
    /// Wall-clock survival time since the first input. Frozen while paused
    /// and permanently at game over.
    pub elapsed_ms: u64,
    /// Movement steps taken. Drives render pulse effects.
    pub tick_count: u64,

    // Timers
    pub move_timer: TickTimer,
    pub countdown_timer: TickTimer,
}

impl GameState {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let grid_size = GRID_SIZE;
        let mut snake = VecDeque::new();
        snake.push_back(Self::spawn_cell(grid_size));

        let mut state = Self {
            grid_size,
            snake,
            direction: None,
            pending_direction: None,
            grow_amount: 0,
            food: None,
            next_food_value: FOOD_VALUE_NORMAL,
            bonus_remaining: None,
            slowdown_food: None,
            slowdown_active: false,
            foods_since_slowdown_cycle: 0,
            slowdown_cycle_len: rng.gen_range(SLOWDOWN_CYCLE_MIN_FOODS..=SLOWDOWN_CYCLE_MAX_FOODS),
            obstacles: HashSet::new(),
            score: 0,
            lives: STARTING_LIVES,
            foods_eaten: 0,
            foods_since_extra_life: 0,
            extra_life_threshold: rng.gen_range(EXTRA_LIFE_MIN_FOODS..=EXTRA_LIFE_MAX_FOODS),
            paused: false,
            game_over: false,
            started: false,
            elapsed_ms: 0,
            tick_count: 0,
            move_timer: TickTimer::new(BASE_TICK_INTERVAL_MS),
            countdown_timer: TickTimer::new(BONUS_COUNTDOWN_INTERVAL_MS),
        };

        // The opening food is always a plain pellet; the weighted value draw
        // only happens when a previous food is consumed.
        let cell = random_free_cell(rng, grid_size, |c| state.is_occupied(c), PLACEMENT_MAX_ATTEMPTS)
            .or_else(|| first_free_cell(grid_size, |c| state.is_occupied(c)));
        state.food = cell.map(|cell| Food {
            cell,
            value: FOOD_VALUE_NORMAL,
        });

        state
    }

    /// Where the snake starts and returns to after losing a life.
    pub fn spawn_cell(grid_size: i16) -> Cell {
        Cell::new(grid_size / 2, grid_size / 2)
    }

    /// The head cell. The snake always has at least one segment.
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// True if any board entity covers the cell. Placement routines use this
    /// to keep the snake, food, slowdown food, and obstacles disjoint.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
            || self.obstacles.contains(&cell)
            || self.food.map_or(false, |f| f.cell == cell)
            || self.slowdown_food == Some(cell)
    }
}
