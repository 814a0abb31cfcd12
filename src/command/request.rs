//! Typed requests and their translation into engine values
//!
//! Requests arrive as loosely-typed JSON, one per combat action. This is the
//! only place that knows about terrain type strings, size names and default
//! creature stats; the engine receives fully explicit values.

use serde::{Deserialize, Serialize};

use crate::battle::area::{AreaQuery, AreaShape};
use crate::battle::constants::{
    DEFAULT_REACH_FEET, DEFAULT_SPEED_FEET, DEFAULT_TERRAIN_DEPTH_FEET, DEFAULT_TERRAIN_SIZE_SQUARES,
};
use crate::battle::creature::{Creature, SizeCategory};
use crate::battle::terrain::{CoverLevel, TerrainFeature, TerrainKind};
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SpatialError};
use crate::core::types::{CreatureId, Dimensions, Position};

/// One request to the spatial engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum Request {
    InitializeBattlefield {
        width: i64,
        height: i64,
        #[serde(default)]
        terrain: Vec<TerrainSpec>,
    },
    PlaceCreature(CreatureSpec),
    MoveCreature(MoveSpec),
    RemoveCreature {
        creature_id: CreatureId,
    },
    CheckLineOfSight {
        from_creature: CreatureId,
        to_creature: CreatureId,
    },
    GetAreaEffectTargets(AreaSpec),
    CheckFlanking {
        creature_id: CreatureId,
    },
    CheckHeightAdvantage {
        attacker_id: CreatureId,
        target_id: CreatureId,
    },
    GetTacticalSummary {
        creature_id: CreatureId,
    },
    DescribeBattlefield,
    DescribeDetailedTacticalSituation {
        creature_id: CreatureId,
    },
    GenerateBattlefieldMap,
    BatchPlaceCreatures {
        creatures: Vec<CreatureSpec>,
    },
    BatchMoveCreatures {
        movements: Vec<MoveSpec>,
    },
}

impl Request {
    /// Tool name as it appears on the wire
    pub fn tool_name(&self) -> &'static str {
        match self {
            Request::InitializeBattlefield { .. } => "initialize_battlefield",
            Request::PlaceCreature(_) => "place_creature",
            Request::MoveCreature(_) => "move_creature",
            Request::RemoveCreature { .. } => "remove_creature",
            Request::CheckLineOfSight { .. } => "check_line_of_sight",
            Request::GetAreaEffectTargets(_) => "get_area_effect_targets",
            Request::CheckFlanking { .. } => "check_flanking",
            Request::CheckHeightAdvantage { .. } => "check_height_advantage",
            Request::GetTacticalSummary { .. } => "get_tactical_summary",
            Request::DescribeBattlefield => "describe_battlefield",
            Request::DescribeDetailedTacticalSituation { .. } => "describe_detailed_tactical_situation",
            Request::GenerateBattlefieldMap => "generate_battlefield_map",
            Request::BatchPlaceCreatures { .. } => "batch_place_creatures",
            Request::BatchMoveCreatures { .. } => "batch_move_creatures",
        }
    }

    /// Does this request change the battlefield?
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::InitializeBattlefield { .. }
                | Request::PlaceCreature(_)
                | Request::MoveCreature(_)
                | Request::RemoveCreature { .. }
                | Request::BatchPlaceCreatures { .. }
                | Request::BatchMoveCreatures { .. }
        )
    }
}

/// Terrain as supplied by the caller
///
/// Position and depth are feet, `size` is grid squares per side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TerrainSpec {
    #[serde(rename = "type", default)]
    pub terrain_type: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default, alias = "blocksMovement")]
    pub blocks_movement: Option<bool>,
    #[serde(default, alias = "blocksLineOfSight")]
    pub blocks_line_of_sight: Option<bool>,
    #[serde(default, alias = "coverType")]
    pub cover: Option<String>,
}

fn parse_cover(name: &str) -> Result<CoverLevel> {
    match name.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "none" => Ok(CoverLevel::None),
        "half" => Ok(CoverLevel::Half),
        "three_quarters" | "threequarters" => Ok(CoverLevel::ThreeQuarters),
        "total" | "full" => Ok(CoverLevel::Total),
        other => Err(SpatialError::InvalidRequest(format!("unknown cover type '{}'", other))),
    }
}

impl TerrainSpec {
    /// Build the engine feature, filling in boundary defaults
    pub fn resolve(&self, config: &EngineConfig) -> Result<TerrainFeature> {
        let type_name = self
            .terrain_type
            .as_deref()
            .unwrap_or("wall")
            .trim()
            .to_ascii_lowercase();

        let kind = match type_name.as_str() {
            "wall" | "cover" => TerrainKind::Wall,
            "pillar" | "debris" => TerrainKind::Pillar,
            "difficult" => TerrainKind::Difficult,
            _ => TerrainKind::Other,
        };

        let cover = match self.cover.as_deref() {
            Some(name) => parse_cover(name)?,
            None if type_name == "cover" => CoverLevel::Half,
            None => CoverLevel::None,
        };

        let size = self.size.unwrap_or(DEFAULT_TERRAIN_SIZE_SQUARES);
        let depth = self.depth.unwrap_or(DEFAULT_TERRAIN_DEPTH_FEET);
        if !size.is_finite() || size < 0.0 || !depth.is_finite() || depth < 0.0 {
            return Err(SpatialError::InvalidRequest(format!(
                "terrain size and depth must be non-negative, got size {} depth {}",
                size, depth
            )));
        }
        let side = size * config.grid_square_feet;

        let origin = Position::new(self.x, self.y, self.z);
        if !origin.is_finite() {
            return Err(SpatialError::InvalidRequest("terrain position must be finite".into()));
        }

        Ok(TerrainFeature::new(
            kind,
            origin,
            Dimensions::new(side, side, depth),
            self.blocks_movement.unwrap_or(true),
            self.blocks_line_of_sight.unwrap_or(false),
            cover,
        ))
    }
}

/// Creature placement as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSpec {
    pub creature_id: CreatureId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub reach: Option<u32>,
}

impl CreatureSpec {
    pub fn resolve(&self) -> Result<Creature> {
        let size = match self.size.as_deref() {
            Some(name) => SizeCategory::parse(name)
                .ok_or_else(|| SpatialError::InvalidRequest(format!("unknown creature size '{}'", name)))?,
            None => SizeCategory::default(),
        };
        Ok(Creature::new(
            self.creature_id.clone(),
            self.name.clone(),
            Position::new(self.x, self.y, self.z),
            size,
            self.speed.unwrap_or(DEFAULT_SPEED_FEET),
            self.reach.unwrap_or(DEFAULT_REACH_FEET),
        ))
    }
}

/// A requested move; `speed` is the budget for this move in feet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSpec {
    pub creature_id: CreatureId,
    pub target_x: f64,
    pub target_y: f64,
    #[serde(default)]
    pub target_z: f64,
    pub speed: f64,
}

impl MoveSpec {
    pub fn target(&self) -> Position {
        Position::new(self.target_x, self.target_y, self.target_z)
    }
}

/// Area effect as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSpec {
    pub center_x: f64,
    pub center_y: f64,
    #[serde(default)]
    pub center_z: f64,
    pub shape: String,
    pub size: f64,
    #[serde(default)]
    pub direction: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl AreaSpec {
    pub fn resolve(&self) -> Result<AreaQuery> {
        Ok(AreaQuery {
            shape: AreaShape::parse(&self.shape)?,
            origin: Position::new(self.center_x, self.center_y, self.center_z),
            size_feet: self.size,
            direction_degrees: self.direction,
            height_feet: self.height,
        })
    }
}
