//! Terrain features and cover tiers
//!
//! Terrain is fixed when the battlefield is initialized. Overlapping
//! features are legal; their blocking and cover compose.

use serde::{Deserialize, Serialize};

use crate::core::types::{Dimensions, Position};
use crate::spatial::Aabb;

/// Kind of terrain feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Wall,
    Pillar,
    Difficult,
    Other,
}

impl TerrainKind {
    /// Map glyph
    pub fn glyph(&self) -> char {
        match self {
            TerrainKind::Wall => '#',
            TerrainKind::Pillar => 'O',
            TerrainKind::Difficult => '~',
            TerrainKind::Other => '+',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TerrainKind::Wall => "wall",
            TerrainKind::Pillar => "pillar",
            TerrainKind::Difficult => "difficult terrain",
            TerrainKind::Other => "obstacle",
        }
    }
}

/// Cover tier granted by terrain between attacker and target
///
/// Variant order is the tier order: `None < Half < ThreeQuarters < Total`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CoverLevel {
    #[default]
    None,
    Half,
    ThreeQuarters,
    Total,
}

impl CoverLevel {
    /// Bonus to AC and Dexterity saves
    pub fn armor_class_bonus(&self) -> Option<i32> {
        match self {
            CoverLevel::None => Some(0),
            CoverLevel::Half => Some(2),
            CoverLevel::ThreeQuarters => Some(5),
            CoverLevel::Total => None, // Can't be targeted directly
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoverLevel::None => "no cover",
            CoverLevel::Half => "half cover",
            CoverLevel::ThreeQuarters => "three-quarters cover",
            CoverLevel::Total => "total cover",
        }
    }
}

/// A terrain feature occupying a box on the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainFeature {
    pub kind: TerrainKind,
    pub origin: Position,
    pub dimensions: Dimensions,
    pub blocks_movement: bool,
    pub blocks_line_of_sight: bool,
    pub cover: CoverLevel,
}

impl TerrainFeature {
    pub fn new(
        kind: TerrainKind,
        origin: Position,
        dimensions: Dimensions,
        blocks_movement: bool,
        blocks_line_of_sight: bool,
        cover: CoverLevel,
    ) -> Self {
        Self {
            kind,
            origin,
            dimensions,
            blocks_movement,
            blocks_line_of_sight,
            cover,
        }
    }

    /// Solid, sight-blocking wall granting total cover
    pub fn wall(origin: Position, dimensions: Dimensions) -> Self {
        Self::new(TerrainKind::Wall, origin, dimensions, true, true, CoverLevel::Total)
    }

    /// Ground that slows but never blocks
    pub fn difficult(origin: Position, dimensions: Dimensions) -> Self {
        Self::new(TerrainKind::Difficult, origin, dimensions, false, false, CoverLevel::None)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin(self.origin, self.dimensions)
    }
}
