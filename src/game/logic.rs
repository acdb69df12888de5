//! Game logic: input handling and the tick transition function.
//!
//! The UI layer calls [`process_input`] for key presses and [`advance`] once
//! per frame with the elapsed wall-clock time. All rule outcomes that the
//! presentation layer cares about come back as [`TickEvent`]s.

use crate::core::constants::{
    BASE_TICK_INTERVAL_MS, EXTRA_LIFE_MAX_FOODS, EXTRA_LIFE_MIN_FOODS, FOOD_VALUE_BONUS,
    FOOD_VALUE_JACKPOT, FOOD_VALUE_NORMAL, FOOD_WEIGHT_BONUS_PERCENT,
    FOOD_WEIGHT_JACKPOT_PERCENT, MAX_PHYSICS_DT_MS, OBSTACLE_EVERY_N_FOODS,
    PLACEMENT_MAX_ATTEMPTS, SLOWDOWN_CYCLE_MAX_FOODS, SLOWDOWN_CYCLE_MIN_FOODS,
    SLOWDOWN_TICK_INTERVAL_MS,
};
use crate::game::grid::{first_free_cell, in_bounds, random_free_cell};
use crate::game::types::{bonus_countdown_secs, Cell, Direction, Food, GameState};
use rand::Rng;

/// UI-agnostic player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Up,
    Down,
    Left,
    Right,
    Pause,
}

/// Something that happened during [`advance`] that the presentation layer
/// may want to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A food was eaten for `value` points.
    FoodEaten { value: u32 },
    /// The countdown ran out; the board food is worth 1 point again.
    BonusExpired,
    /// An extra life was earned. `lives` is the new total.
    ExtraLife { lives: u32 },
    /// A collision cost a life. `lives` is the remaining total.
    LifeLost { lives: u32 },
    /// A slowdown food was picked up; movement runs at half speed.
    SlowdownStarted,
    /// The slowdown ended with the next normal food.
    SlowdownEnded,
    /// A new obstacle appeared on the board.
    ObstacleAdded { cell: Cell },
    /// The last life is gone. Carries the final score and survival time.
    GameOver { score: u32, time_ms: u64 },
}

/// Apply one player input.
///
/// Direction changes only mutate the buffered pending direction; they are
/// checked against the velocity applied on the last step, so the snake can
/// never reverse 180 degrees, not even via two quick inputs within one tick.
pub fn process_input(state: &mut GameState, input: GameInput) {
    if state.game_over {
        return;
    }

    if input == GameInput::Pause {
        state.paused = !state.paused;
        return;
    }

    let (dx, dy) = state.direction.map_or((0, 0), |d| d.delta());
    let accepted = match input {
        GameInput::Up if dy == 0 => Some(Direction::Up),
        GameInput::Down if dy == 0 => Some(Direction::Down),
        GameInput::Left if dx == 0 => Some(Direction::Left),
        GameInput::Right if dx == 0 => Some(Direction::Right),
        _ => None,
    };

    if let Some(direction) = accepted {
        state.pending_direction = Some(direction);
        // The survival clock runs from the first accepted input.
        state.started = true;
    }
}

/// Weighted value draw for the next food: 70% normal, 20% bonus, 10% jackpot.
pub fn draw_next_value<R: Rng>(rng: &mut R) -> u32 {
    let roll = rng.gen_range(0..100u32);
    if roll < FOOD_WEIGHT_JACKPOT_PERCENT {
        FOOD_VALUE_JACKPOT
    } else if roll < FOOD_WEIGHT_JACKPOT_PERCENT + FOOD_WEIGHT_BONUS_PERCENT {
        FOOD_VALUE_BONUS
    } else {
        FOOD_VALUE_NORMAL
    }
}

/// Advance the game by `dt_ms` of wall-clock time.
///
/// Survival time accumulates the raw delta, while the physics feed is
/// clamped to [`MAX_PHYSICS_DT_MS`] so a stalled frame cannot fast-forward
/// the snake across the board. Does nothing while paused or after game over.
pub fn advance<R: Rng>(state: &mut GameState, dt_ms: u64, rng: &mut R) -> Vec<TickEvent> {
    let mut events = Vec::new();

    if state.game_over || state.paused {
        return events;
    }

    if state.started {
        state.elapsed_ms += dt_ms;
    }

    let physics_dt = dt_ms.min(MAX_PHYSICS_DT_MS);
    state.move_timer.feed(physics_dt);
    state.countdown_timer.feed(physics_dt);

    while state.move_timer.consume_step() {
        step(state, rng, &mut events);
        if state.game_over {
            // Terminal state: the countdown dies with the main cadence.
            return events;
        }
    }

    while state.countdown_timer.consume_step() {
        countdown_step(state, &mut events);
    }

    events
}

/// One movement step: latch direction, move, collide, eat, arm effects.
fn step<R: Rng>(state: &mut GameState, rng: &mut R, events: &mut Vec<TickEvent>) {
    state.tick_count += 1;

    state.direction = state.pending_direction;
    let Some(direction) = state.direction else {
        // No velocity yet (fresh game or just after a life reset).
        return;
    };

    let next_head = state.head().step(direction);

    // The tail cell vacates on this step unless growth is pending, so moving
    // onto it is not a collision.
    let body_range = if state.grow_amount == 0 {
        state.snake.len() - 1
    } else {
        state.snake.len()
    };
    let self_hit = state.snake.iter().take(body_range).any(|&seg| seg == next_head);

    if !in_bounds(next_head, state.grid_size) || state.obstacles.contains(&next_head) || self_hit {
        lose_life(state, events);
        return;
    }

    if state.grow_amount == 0 {
        state.snake.pop_back();
    }
    state.snake.push_front(next_head);

    let mut replace_food = false;
    if state.food.map_or(false, |f| f.cell == next_head) {
        eat_food(state, rng, events);
        replace_food = true;
    } else if state.grow_amount > 0 {
        // One unit of pending growth was realized by keeping the tail.
        state.grow_amount -= 1;
    }

    // Checked independently of the normal food; placement keeps the two on
    // distinct cells.
    if state.slowdown_food == Some(next_head) {
        state.slowdown_food = None;
        state.slowdown_active = true;
        state.foods_since_slowdown_cycle = 0;
        state.slowdown_cycle_len =
            rng.gen_range(SLOWDOWN_CYCLE_MIN_FOODS..=SLOWDOWN_CYCLE_MAX_FOODS);
        state.move_timer.set_interval(SLOWDOWN_TICK_INTERVAL_MS);
        events.push(TickEvent::SlowdownStarted);
    }

    if replace_food {
        commit_food(state, rng, events);
    }
}

/// Resolve eating the food under the new head and draw the next value.
fn eat_food<R: Rng>(state: &mut GameState, rng: &mut R, events: &mut Vec<TickEvent>) {
    let Some(food) = state.food.take() else {
        return;
    };

    state.score += food.value;
    state.grow_amount += food.value;
    state.foods_eaten += 1;
    state.foods_since_extra_life += 1;
    state.foods_since_slowdown_cycle += 1;
    // Whatever countdown the eaten food carried is moot now.
    state.bonus_remaining = None;
    events.push(TickEvent::FoodEaten { value: food.value });

    if state.foods_since_extra_life >= state.extra_life_threshold {
        state.lives += 1;
        state.foods_since_extra_life = 0;
        state.extra_life_threshold = rng.gen_range(EXTRA_LIFE_MIN_FOODS..=EXTRA_LIFE_MAX_FOODS);
        events.push(TickEvent::ExtraLife { lives: state.lives });
    }

    if state.slowdown_active {
        state.slowdown_active = false;
        state.move_timer.set_interval(BASE_TICK_INTERVAL_MS);
        events.push(TickEvent::SlowdownEnded);
    }

    // Two-phase food turnover, phase one: lock in the next value now; it is
    // committed when the replacement food lands on the board.
    state.next_food_value = draw_next_value(rng);
}

/// Two-phase food turnover, phase two: place the already-drawn next food and
/// arm whatever side effects are due (countdown, slowdown food, obstacle).
fn commit_food<R: Rng>(state: &mut GameState, rng: &mut R, events: &mut Vec<TickEvent>) {
    // Normal placement falls back to a deterministic scan: food must exist
    // whenever the board has any free cell at all.
    let cell = random_free_cell(rng, state.grid_size, |c| state.is_occupied(c), PLACEMENT_MAX_ATTEMPTS)
        .or_else(|| first_free_cell(state.grid_size, |c| state.is_occupied(c)));
    state.food = cell.map(|cell| Food {
        cell,
        value: state.next_food_value,
    });

    // The countdown belongs to the food actually on the board.
    state.bonus_remaining = state.food.and_then(|f| bonus_countdown_secs(f.value));
    state.countdown_timer.restart();

    // Arm the slowdown food once its cycle is due. A failed placement is a
    // skip, retried on the next food turnover.
    if state.slowdown_food.is_none()
        && state.foods_since_slowdown_cycle >= state.slowdown_cycle_len
    {
        state.slowdown_food =
            random_free_cell(rng, state.grid_size, |c| state.is_occupied(c), PLACEMENT_MAX_ATTEMPTS);
    }

    // Every third food hardens the board. Never on the spawn cell, since a
    // life reset teleports the snake there.
    if state.foods_eaten % OBSTACLE_EVERY_N_FOODS == 0 {
        let spawn = GameState::spawn_cell(state.grid_size);
        let placed = random_free_cell(
            rng,
            state.grid_size,
            |c| c == spawn || state.is_occupied(c),
            PLACEMENT_MAX_ATTEMPTS,
        );
        if let Some(cell) = placed {
            state.obstacles.insert(cell);
            events.push(TickEvent::ObstacleAdded { cell });
        }
    }
}

/// Collision handler: spend a life, or end the run at zero.
fn lose_life(state: &mut GameState, events: &mut Vec<TickEvent>) {
    state.lives = state.lives.saturating_sub(1);

    if state.lives > 0 {
        // Soft reset: back to the single spawn segment, standing still.
        // Score, clock, and everything on the board survive.
        state.snake.clear();
        state.snake.push_back(GameState::spawn_cell(state.grid_size));
        state.direction = None;
        state.pending_direction = None;
        state.grow_amount = 0;
        events.push(TickEvent::LifeLost { lives: state.lives });
    } else {
        state.game_over = true;
        events.push(TickEvent::GameOver {
            score: state.score,
            time_ms: state.elapsed_ms,
        });
    }
}

/// One second of food countdown. No-op when no countdown is running.
fn countdown_step(state: &mut GameState, events: &mut Vec<TickEvent>) {
    let Some(remaining) = state.bonus_remaining else {
        return;
    };

    let remaining = remaining.saturating_sub(1);
    if remaining == 0 {
        state.bonus_remaining = None;
        if let Some(food) = &mut state.food {
            food.value = FOOD_VALUE_NORMAL;
        }
        events.push(TickEvent::BonusExpired);
    } else {
        state.bonus_remaining = Some(remaining);
    }
}
