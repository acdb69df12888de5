//! Shared constants and tick scheduling.

#![allow(unused_imports)]

pub mod constants;
pub mod timing;

pub use constants::*;
pub use timing::*;
