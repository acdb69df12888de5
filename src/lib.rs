//! Serpent - Terminal Snake Arcade Library
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some items are only used by the binary
#![allow(dead_code)]

pub mod build_info;
pub mod core;
pub mod game;
pub mod highscores;
pub mod ui;

pub use game::logic::{advance, draw_next_value, process_input, GameInput, TickEvent};
pub use game::types::{Cell, Direction, Food, GameState};
pub use highscores::persistence::HighscoreStore;
pub use highscores::types::HighscoreEntry;
