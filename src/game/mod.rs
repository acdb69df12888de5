//! Snake gameplay: state, grid helpers, and the tick transition.

#![allow(unused_imports)]

pub mod grid;
pub mod logic;
pub mod types;

pub use grid::*;
pub use logic::*;
pub use types::*;
