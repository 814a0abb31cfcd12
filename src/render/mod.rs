//! Text presentation of battlefield state
//!
//! This module is READ-ONLY - it never modifies the battlefield. Every
//! function is a pure rendering of engine query results.

pub mod ascii_map;
pub mod narrative;

pub use ascii_map::generate_battlefield_map;
pub use narrative::{describe_battlefield, describe_tactical_situation};
