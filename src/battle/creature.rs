//! Creatures placed on the battlefield

use serde::{Deserialize, Serialize};

use crate::core::types::{CreatureId, Position};

/// Size category of a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl SizeCategory {
    /// Side length of the space the creature controls, in grid squares
    pub fn footprint_squares(&self) -> u32 {
        match self {
            SizeCategory::Tiny | SizeCategory::Small | SizeCategory::Medium => 1,
            SizeCategory::Large => 2,
            SizeCategory::Huge => 3,
            SizeCategory::Gargantuan => 4,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tiny" => Some(SizeCategory::Tiny),
            "small" => Some(SizeCategory::Small),
            "medium" => Some(SizeCategory::Medium),
            "large" => Some(SizeCategory::Large),
            "huge" => Some(SizeCategory::Huge),
            "gargantuan" => Some(SizeCategory::Gargantuan),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeCategory::Tiny => "tiny",
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
            SizeCategory::Huge => "huge",
            SizeCategory::Gargantuan => "gargantuan",
        }
    }
}

/// Size of a creature as placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureSize {
    pub category: SizeCategory,
    pub footprint_squares: u32,
}

impl From<SizeCategory> for CreatureSize {
    fn from(category: SizeCategory) -> Self {
        Self {
            category,
            footprint_squares: category.footprint_squares(),
        }
    }
}

impl Default for CreatureSize {
    fn default() -> Self {
        SizeCategory::default().into()
    }
}

/// A creature as tracked by the battlefield
///
/// Only `position` changes after placement, and only through the battlefield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub position: Position,
    pub size: CreatureSize,
    pub speed_feet: u32,
    pub reach_feet: u32,
}

impl Creature {
    pub fn new(
        id: impl Into<CreatureId>,
        name: impl Into<String>,
        position: Position,
        size: SizeCategory,
        speed_feet: u32,
        reach_feet: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            size: size.into(),
            speed_feet,
            reach_feet,
        }
    }

    /// Reach as a distance in feet
    pub fn reach(&self) -> f64 {
        self.reach_feet as f64
    }

    /// Is `point` within this creature's reach?
    pub fn can_reach(&self, point: &Position) -> bool {
        self.position.distance(point) <= self.reach()
    }
}
