//! Spatial combat engine - grid, creatures and geometric queries
//!
//! The battlefield is a plain data store. Movement, visibility, area and
//! tactical queries are stateless functions over it, so a caller can ask any
//! question without changing anything. Only `Battlefield` methods mutate.

pub mod area;
pub mod battlefield;
pub mod constants;
pub mod creature;
pub mod movement;
pub mod tactics;
pub mod terrain;
pub mod visibility;

// Re-exports for convenient access
pub use area::{get_targets_in_area, AreaQuery, AreaShape};
pub use battlefield::Battlefield;
pub use constants::*;
pub use creature::{Creature, CreatureSize, SizeCategory};
pub use movement::{opportunity_attackers, validate_creature_move, validate_movement, MovementResult};
pub use tactics::{
    battlefield_overview, find_flanking_pair, has_height_advantage, is_creature_flanked,
    tactical_situation, BattlefieldOverview, Contact, RelativeElevation, TacticalSituation,
};
pub use terrain::{CoverLevel, TerrainFeature, TerrainKind};
pub use visibility::{
    calculate_line_of_sight, get_range_category, line_of_sight_between, RangeCategory,
    VisibilityResult,
};
