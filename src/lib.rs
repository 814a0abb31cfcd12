//! Tactical Grid - spatial combat engine for grid-based tabletop battles

pub mod battle;
pub mod command;
pub mod core;
pub mod render;
pub mod spatial;
