//! Spatial engine constants - tabletop defaults in one place
//!
//! These seed `EngineConfig::default()`; runtime code reads the config.

// Grid scale
pub const GRID_SQUARE_FEET: f64 = 5.0;
pub const MAX_SIDE_SQUARES: u32 = 1000;

// Area shapes
pub const DEFAULT_CONE_ANGLE_DEGREES: f64 = 53.0;
pub const DEFAULT_LINE_WIDTH_FEET: f64 = 5.0;

// Flanking: approach vectors must differ by more than this
pub const DEFAULT_FLANK_ANGLE_DEGREES: f64 = 135.0;

// Range bands (inclusive upper bounds, feet)
pub const MELEE_RANGE_FEET: f64 = 5.0;
pub const SHORT_RANGE_FEET: f64 = 30.0;
pub const MEDIUM_RANGE_FEET: f64 = 60.0;
pub const LONG_RANGE_FEET: f64 = 120.0;

// Creature defaults used by the request layer
pub const DEFAULT_SPEED_FEET: u32 = 30;
pub const DEFAULT_REACH_FEET: u32 = 5;

// Terrain defaults used by the request layer
pub const DEFAULT_TERRAIN_SIZE_SQUARES: f64 = 1.0;
pub const DEFAULT_TERRAIN_DEPTH_FEET: f64 = 5.0;

// Float slack for boundary comparisons (feet)
pub const EPSILON_FEET: f64 = 1e-9;
