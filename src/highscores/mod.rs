//! Highscore table: entries, ranking, and on-disk persistence.

#![allow(unused_imports)]

pub mod persistence;
pub mod types;

pub use persistence::*;
pub use types::*;
