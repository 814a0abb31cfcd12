//! Engine configuration with documented constants
//!
//! Every tunable of the spatial engine lives here. Values default to the
//! standard tabletop conventions and can be overridden from a TOML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    DEFAULT_CONE_ANGLE_DEGREES, DEFAULT_FLANK_ANGLE_DEGREES, DEFAULT_LINE_WIDTH_FEET,
    GRID_SQUARE_FEET, LONG_RANGE_FEET, MAX_SIDE_SQUARES, MEDIUM_RANGE_FEET, MELEE_RANGE_FEET,
    SHORT_RANGE_FEET,
};
use crate::core::error::{Result, SpatialError};

/// Upper bound (inclusive, feet) of each range band
///
/// Bands are checked in order; anything past `long` is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeBands {
    pub melee: f64,
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl Default for RangeBands {
    fn default() -> Self {
        Self {
            melee: MELEE_RANGE_FEET,
            short: SHORT_RANGE_FEET,
            medium: MEDIUM_RANGE_FEET,
            long: LONG_RANGE_FEET,
        }
    }
}

/// Configuration for the spatial engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of one grid square (feet)
    ///
    /// Battlefield width and height are counted in squares, so the playable
    /// extent in feet is `width * grid_square_feet`.
    pub grid_square_feet: f64,

    /// Largest accepted battlefield width or height (squares)
    ///
    /// Bounds the memory a single initialize request can demand from the
    /// map renderer.
    pub max_side_squares: u32,

    /// Total opening angle of a cone area (degrees)
    ///
    /// 53 degrees makes the cone as wide as it is long at its far end.
    pub cone_angle_degrees: f64,

    /// Width of the corridor swept by a line area (feet)
    pub line_width_feet: f64,

    /// Minimum angle between two attackers' approach vectors for flanking
    ///
    /// 180 would demand perfectly opposite attackers; 135 also accepts
    /// diagonal-opposite squares.
    pub flank_angle_degrees: f64,

    /// Distance buckets reported by range queries
    pub range_bands: RangeBands,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_square_feet: GRID_SQUARE_FEET,
            max_side_squares: MAX_SIDE_SQUARES,
            cone_angle_degrees: DEFAULT_CONE_ANGLE_DEGREES,
            line_width_feet: DEFAULT_LINE_WIDTH_FEET,
            flank_angle_degrees: DEFAULT_FLANK_ANGLE_DEGREES,
            range_bands: RangeBands::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Half of the cone opening angle, in degrees
    pub fn cone_half_angle_degrees(&self) -> f64 {
        self.cone_angle_degrees / 2.0
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_square_feet > 0.0) {
            return Err(SpatialError::Config(format!(
                "grid_square_feet must be positive, got {}",
                self.grid_square_feet
            )));
        }

        if self.max_side_squares == 0 {
            return Err(SpatialError::Config("max_side_squares must be positive".to_string()));
        }

        if !(self.line_width_feet > 0.0) {
            return Err(SpatialError::Config(format!(
                "line_width_feet must be positive, got {}",
                self.line_width_feet
            )));
        }

        for (name, angle) in [
            ("cone_angle_degrees", self.cone_angle_degrees),
            ("flank_angle_degrees", self.flank_angle_degrees),
        ] {
            if !(angle > 0.0 && angle <= 360.0) {
                return Err(SpatialError::Config(format!(
                    "{} must be in (0, 360], got {}",
                    name, angle
                )));
            }
        }

        let bands = &self.range_bands;
        if !(bands.melee > 0.0
            && bands.melee < bands.short
            && bands.short < bands.medium
            && bands.medium < bands.long)
        {
            return Err(SpatialError::Config(format!(
                "range bands must be positive and strictly increasing, got {}/{}/{}/{}",
                bands.melee, bands.short, bands.medium, bands.long
            )));
        }

        Ok(())
    }
}

/// Load an engine config from a TOML file
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)?;
    EngineConfig::from_toml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_matches_tabletop_conventions() {
        let config = EngineConfig::default();
        assert_eq!(config.grid_square_feet, 5.0);
        assert_eq!(config.cone_half_angle_degrees(), 26.5);
        assert_eq!(config.line_width_feet, 5.0);
        assert_eq!(config.range_bands.melee, 5.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            cone_angle_degrees = 90.0

            [range_bands]
            long = 600.0
            "#,
        )
        .unwrap();

        assert_eq!(config.cone_angle_degrees, 90.0);
        assert_eq!(config.range_bands.long, 600.0);
        assert_eq!(config.range_bands.short, SHORT_RANGE_FEET);
        assert_eq!(config.grid_square_feet, GRID_SQUARE_FEET);
    }

    #[test]
    fn test_unordered_bands_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [range_bands]
            short = 200.0
            "#,
        );
        assert!(matches!(result, Err(SpatialError::Config(_))));
    }

    #[test]
    fn test_zero_side_limit_rejected() {
        let result = EngineConfig::from_toml_str("max_side_squares = 0");
        assert!(matches!(result, Err(SpatialError::Config(_))));
    }

    #[test]
    fn test_bad_angle_rejected() {
        let mut config = EngineConfig::default();
        config.cone_angle_degrees = 0.0;
        assert!(config.validate().is_err());

        config.cone_angle_degrees = 53.0;
        config.flank_angle_degrees = 400.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_toml_error() {
        let result = EngineConfig::from_toml_str("grid_square_feet = \"five\"");
        assert!(matches!(result, Err(SpatialError::TomlError(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_config(Path::new("definitely/not/here.toml"));
        assert!(matches!(result, Err(SpatialError::IoError(_))));
    }
}
