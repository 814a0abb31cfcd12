pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, EngineConfig, RangeBands};
pub use error::{Result, SpatialError};
pub use types::{CreatureId, Dimensions, Position, TerrainRef};
