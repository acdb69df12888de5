//! Integration test: timed effects on the board.
//!
//! Covers the bonus food countdown, the slowdown pickup and its cadence
//! switch, and the pause freeze. Scenarios pin randomly rolled state
//! (thresholds, food positions) to fixed values so every path is scripted.
//!
//! Uses seeded ChaCha8Rng for deterministic behavior.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serpent::core::constants::{
    BASE_TICK_INTERVAL_MS, FOOD_VALUE_BONUS, FOOD_VALUE_NORMAL, SLOWDOWN_TICK_INTERVAL_MS,
    STARTING_LIVES,
};
use serpent::game::types::bonus_countdown_secs;
use serpent::{advance, process_input, Cell, Food, GameInput, GameState, TickEvent};

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Fresh game with the food parked in the far corner.
fn parked_state(rng: &mut ChaCha8Rng) -> GameState {
    let mut state = GameState::new(rng);
    state.food = Some(Food {
        cell: Cell::new(0, 0),
        value: FOOD_VALUE_NORMAL,
    });
    state.bonus_remaining = None;
    state
}

/// Advance by one base movement interval.
fn tick(state: &mut GameState, rng: &mut ChaCha8Rng) -> Vec<TickEvent> {
    advance(state, BASE_TICK_INTERVAL_MS, rng)
}

/// Advance by one full countdown second. Split in two because a single
/// oversized delta is clamped before it reaches the timers.
fn advance_one_second(state: &mut GameState, rng: &mut ChaCha8Rng) -> Vec<TickEvent> {
    let mut events = advance(state, 500, rng);
    events.extend(advance(state, 500, rng));
    events
}

// =============================================================================
// Bonus countdown
// =============================================================================

#[test]
fn test_bonus_food_counts_down_once_per_second() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.food = Some(Food {
        cell: Cell::new(0, 0),
        value: FOOD_VALUE_BONUS,
    });
    state.bonus_remaining = Some(10);

    advance_one_second(&mut state, &mut rng);
    assert_eq!(state.bonus_remaining, Some(9));

    advance_one_second(&mut state, &mut rng);
    advance_one_second(&mut state, &mut rng);
    assert_eq!(state.bonus_remaining, Some(7));
}

#[test]
fn test_expired_bonus_drops_to_normal_value() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.food = Some(Food {
        cell: Cell::new(0, 0),
        value: FOOD_VALUE_BONUS,
    });
    state.bonus_remaining = Some(1);

    let events = advance_one_second(&mut state, &mut rng);

    assert!(events.contains(&TickEvent::BonusExpired));
    assert_eq!(state.bonus_remaining, None);
    // the food stays on the board, just devalued
    let food = state.food.unwrap();
    assert_eq!(food.cell, Cell::new(0, 0));
    assert_eq!(food.value, FOOD_VALUE_NORMAL);

    // expired means expired: no further countdown events
    let events = advance_one_second(&mut state, &mut rng);
    assert!(events.is_empty());
}

#[test]
fn test_eating_before_expiry_pays_the_full_bonus() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.food = Some(Food {
        cell: Cell::new(11, 10),
        value: FOOD_VALUE_BONUS,
    });
    state.bonus_remaining = Some(10);

    process_input(&mut state, GameInput::Right);
    let events = tick(&mut state, &mut rng);

    assert!(events.contains(&TickEvent::FoodEaten {
        value: FOOD_VALUE_BONUS
    }));
    assert_eq!(state.score, FOOD_VALUE_BONUS);
    // the countdown now tracks the replacement food, not the eaten one
    let food = state.food.unwrap();
    assert_eq!(state.bonus_remaining, bonus_countdown_secs(food.value));
}

#[test]
fn test_countdown_runs_while_slowed_down() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.slowdown_active = true;
    state.move_timer.set_interval(SLOWDOWN_TICK_INTERVAL_MS);
    state.food = Some(Food {
        cell: Cell::new(0, 0),
        value: FOOD_VALUE_BONUS,
    });
    state.bonus_remaining = Some(3);

    advance_one_second(&mut state, &mut rng);

    // the countdown cadence is independent of the movement cadence
    assert_eq!(state.bonus_remaining, Some(2));
}

// =============================================================================
// Slowdown pickup
// =============================================================================

#[test]
fn test_slowdown_pickup_halves_the_movement_cadence() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.slowdown_food = Some(Cell::new(11, 10));

    process_input(&mut state, GameInput::Right);
    let events = tick(&mut state, &mut rng);

    assert!(events.contains(&TickEvent::SlowdownStarted));
    assert!(state.slowdown_active);
    assert_eq!(state.slowdown_food, None);
    assert_eq!(state.move_timer.interval_ms(), SLOWDOWN_TICK_INTERVAL_MS);
    // a slowdown food is not worth points and does not grow the snake
    assert_eq!(state.score, 0);
    assert_eq!(state.foods_eaten, 0);
    assert_eq!(state.snake.len(), 1);

    // one base interval is no longer enough for a step
    tick(&mut state, &mut rng);
    assert_eq!(state.head(), Cell::new(11, 10));
    tick(&mut state, &mut rng);
    assert_eq!(state.head(), Cell::new(12, 10));
}

#[test]
fn test_cadence_switch_discards_the_partial_interval() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.slowdown_food = Some(Cell::new(11, 10));

    process_input(&mut state, GameInput::Right);
    // 150ms: one step lands on the pickup, 50ms of leftover accumulation
    advance(&mut state, 150, &mut rng);
    assert_eq!(state.head(), Cell::new(11, 10));

    // the leftover was cancelled with the switch; 150 more is still short of
    // the 200ms slow interval
    advance(&mut state, 150, &mut rng);
    assert_eq!(state.head(), Cell::new(11, 10));

    advance(&mut state, 50, &mut rng);
    assert_eq!(state.head(), Cell::new(12, 10));
}

#[test]
fn test_next_food_ends_the_slowdown() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.slowdown_food = Some(Cell::new(11, 10));

    process_input(&mut state, GameInput::Right);
    tick(&mut state, &mut rng);
    assert!(state.slowdown_active);

    state.food = Some(Food {
        cell: Cell::new(12, 10),
        value: FOOD_VALUE_NORMAL,
    });
    let events = [tick(&mut state, &mut rng), tick(&mut state, &mut rng)].concat();

    assert!(events.contains(&TickEvent::FoodEaten {
        value: FOOD_VALUE_NORMAL
    }));
    assert!(events.contains(&TickEvent::SlowdownEnded));
    assert!(!state.slowdown_active);
    assert_eq!(state.move_timer.interval_ms(), BASE_TICK_INTERVAL_MS);

    // base cadence restored: one interval, one step
    tick(&mut state, &mut rng);
    assert_eq!(state.head(), Cell::new(13, 10));
}

#[test]
fn test_slowdown_food_appears_when_its_cycle_is_due() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.slowdown_cycle_len = 3;
    state.foods_since_slowdown_cycle = 2;
    state.food = Some(Food {
        cell: Cell::new(11, 10),
        value: FOOD_VALUE_NORMAL,
    });

    process_input(&mut state, GameInput::Right);
    tick(&mut state, &mut rng);

    let slowdown_cell = state
        .slowdown_food
        .expect("the cycle was due, a slowdown food must be armed");
    assert!(!state.snake.contains(&slowdown_cell));
    assert_ne!(Some(slowdown_cell), state.food.map(|f| f.cell));
}

// =============================================================================
// Obstacles and extra lives on food turnover
// =============================================================================

#[test]
fn test_every_third_food_adds_an_obstacle() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.foods_eaten = 2;
    state.slowdown_cycle_len = 99;
    state.food = Some(Food {
        cell: Cell::new(11, 10),
        value: FOOD_VALUE_NORMAL,
    });

    process_input(&mut state, GameInput::Right);
    let events = tick(&mut state, &mut rng);

    let cell = events
        .iter()
        .find_map(|e| match e {
            TickEvent::ObstacleAdded { cell } => Some(*cell),
            _ => None,
        })
        .expect("the third food must raise an obstacle");
    assert_eq!(state.obstacles.len(), 1);
    assert!(state.obstacles.contains(&cell));
    // never on the spawn cell the snake resets to
    assert_ne!(cell, GameState::spawn_cell(state.grid_size));
    assert!(!state.snake.contains(&cell));
}

#[test]
fn test_in_between_foods_add_no_obstacle() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.foods_eaten = 3;
    state.slowdown_cycle_len = 99;
    state.food = Some(Food {
        cell: Cell::new(11, 10),
        value: FOOD_VALUE_NORMAL,
    });

    process_input(&mut state, GameInput::Right);
    let events = tick(&mut state, &mut rng);

    assert!(!events
        .iter()
        .any(|e| matches!(e, TickEvent::ObstacleAdded { .. })));
    assert!(state.obstacles.is_empty());
}

#[test]
fn test_extra_life_lands_at_the_threshold() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.extra_life_threshold = 5;
    state.foods_since_extra_life = 4;
    state.slowdown_cycle_len = 99;
    state.food = Some(Food {
        cell: Cell::new(11, 10),
        value: FOOD_VALUE_NORMAL,
    });

    process_input(&mut state, GameInput::Right);
    let events = tick(&mut state, &mut rng);

    assert!(events.contains(&TickEvent::ExtraLife {
        lives: STARTING_LIVES + 1
    }));
    assert_eq!(state.lives, STARTING_LIVES + 1);
    assert_eq!(state.foods_since_extra_life, 0);
    // a fresh threshold is rolled for the next one
    assert!((5..=10).contains(&state.extra_life_threshold));
}

// =============================================================================
// Pause
// =============================================================================

#[test]
fn test_pause_freezes_movement_and_the_clock() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);

    process_input(&mut state, GameInput::Right);
    tick(&mut state, &mut rng);
    tick(&mut state, &mut rng);
    assert_eq!(state.head(), Cell::new(12, 10));

    process_input(&mut state, GameInput::Pause);
    assert!(state.paused);
    let events = advance(&mut state, 5_000, &mut rng);

    assert!(events.is_empty());
    assert_eq!(state.head(), Cell::new(12, 10));
    assert_eq!(state.elapsed_ms, 2 * BASE_TICK_INTERVAL_MS);

    process_input(&mut state, GameInput::Pause);
    tick(&mut state, &mut rng);
    assert_eq!(state.head(), Cell::new(13, 10));
    assert_eq!(state.elapsed_ms, 3 * BASE_TICK_INTERVAL_MS);
}

#[test]
fn test_pause_freezes_the_bonus_countdown() {
    let mut rng = test_rng();
    let mut state = parked_state(&mut rng);
    state.food = Some(Food {
        cell: Cell::new(0, 0),
        value: FOOD_VALUE_BONUS,
    });
    state.bonus_remaining = Some(5);

    process_input(&mut state, GameInput::Pause);
    for _ in 0..3 {
        advance_one_second(&mut state, &mut rng);
    }
    assert_eq!(state.bonus_remaining, Some(5));

    process_input(&mut state, GameInput::Pause);
    advance_one_second(&mut state, &mut rng);
    assert_eq!(state.bonus_remaining, Some(4));
}
