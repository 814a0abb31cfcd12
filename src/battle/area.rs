//! Area-of-effect targeting
//!
//! Shapes select creatures by position only. Terrain and line of sight are
//! not consulted; intersect with `calculate_line_of_sight` when an effect
//! needs to respect cover.

use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SpatialError};
use crate::core::types::{CreatureId, Position};
use crate::spatial::{angle_between_degrees, direction_vector};

/// Geometric shape of an area effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaShape {
    /// Radius `size` around the origin
    Sphere,
    /// Axis-aligned cube of edge `size` centred on the origin
    Cube,
    /// Opens from the origin along a direction, `size` long
    Cone,
    /// Corridor from the origin along a direction, `size` long
    Line,
    /// Radius `size`, rising from the origin
    Cylinder,
}

impl AreaShape {
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(AreaShape::Sphere),
            "cube" => Ok(AreaShape::Cube),
            "cone" => Ok(AreaShape::Cone),
            "line" => Ok(AreaShape::Line),
            "cylinder" => Ok(AreaShape::Cylinder),
            other => Err(SpatialError::InvalidShape(format!("unsupported shape '{}'", other))),
        }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, AreaShape::Cone | AreaShape::Line)
    }
}

/// An area effect to resolve against the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaQuery {
    pub shape: AreaShape,
    pub origin: Position,
    pub size_feet: f64,
    #[serde(default)]
    pub direction_degrees: Option<f64>,
    /// Cylinder height; defaults to the radius
    #[serde(default)]
    pub height_feet: Option<f64>,
}

impl AreaQuery {
    pub fn new(shape: AreaShape, origin: Position, size_feet: f64) -> Self {
        Self {
            shape,
            origin,
            size_feet,
            direction_degrees: None,
            height_feet: None,
        }
    }

    pub fn sphere(origin: Position, radius: f64) -> Self {
        Self::new(AreaShape::Sphere, origin, radius)
    }

    pub fn cone(origin: Position, length: f64, direction_degrees: f64) -> Self {
        Self::new(AreaShape::Cone, origin, length).with_direction(direction_degrees)
    }

    pub fn line(origin: Position, length: f64, direction_degrees: f64) -> Self {
        Self::new(AreaShape::Line, origin, length).with_direction(direction_degrees)
    }

    pub fn with_direction(mut self, direction_degrees: f64) -> Self {
        self.direction_degrees = Some(direction_degrees);
        self
    }

    pub fn with_height(mut self, height_feet: f64) -> Self {
        self.height_feet = Some(height_feet);
        self
    }

    /// Reject degenerate or incomplete queries
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() {
            return Err(SpatialError::InvalidShape("origin must be finite".into()));
        }
        if !self.size_feet.is_finite() || self.size_feet < 0.0 {
            return Err(SpatialError::InvalidShape(format!(
                "size must be a non-negative number of feet, got {}",
                self.size_feet
            )));
        }
        if self.size_feet == 0.0 && self.shape != AreaShape::Sphere {
            return Err(SpatialError::InvalidShape(format!(
                "{:?} needs a positive size",
                self.shape
            )));
        }
        if self.shape.is_directional() {
            match self.direction_degrees {
                Some(direction) if direction.is_finite() => {}
                _ => {
                    return Err(SpatialError::InvalidShape(format!(
                        "{:?} needs a direction in degrees",
                        self.shape
                    )))
                }
            }
        }
        if let Some(height) = self.height_feet {
            if !height.is_finite() || height < 0.0 {
                return Err(SpatialError::InvalidShape(format!(
                    "cylinder height must be non-negative, got {}",
                    height
                )));
            }
        }
        Ok(())
    }

    /// Is `point` inside the area? Assumes `validate` passed.
    pub fn contains(&self, config: &EngineConfig, point: &Position) -> bool {
        let size = self.size_feet;
        let offset = point.to_dvec3() - self.origin.to_dvec3();
        let flat = offset.truncate();

        match self.shape {
            AreaShape::Sphere => offset.length() <= size,
            AreaShape::Cube => {
                let half = size / 2.0;
                offset.abs().max_element() <= half
            }
            AreaShape::Cylinder => {
                let height = self.height_feet.unwrap_or(size);
                flat.length() <= size && offset.z >= 0.0 && offset.z <= height
            }
            AreaShape::Cone => {
                if offset.length() > size {
                    return false;
                }
                let axis = direction_vector(self.direction_degrees.unwrap_or_default());
                angle_between_degrees(flat, axis)
                    .is_some_and(|angle| angle <= config.cone_half_angle_degrees())
            }
            AreaShape::Line => {
                let axis = direction_vector(self.direction_degrees.unwrap_or_default());
                let along = flat.dot(axis);
                let across = flat.perp_dot(axis).abs();
                along > 0.0 && along <= size && across <= config.line_width_feet / 2.0
            }
        }
    }
}

/// Every creature caught in the area, in placement order
pub fn get_targets_in_area(battlefield: &Battlefield, query: &AreaQuery) -> Result<Vec<CreatureId>> {
    query.validate()?;
    let config = battlefield.config();
    Ok(battlefield
        .list_creatures()
        .filter(|creature| query.contains(config, &creature.position))
        .map(|creature| creature.id.clone())
        .collect())
}
