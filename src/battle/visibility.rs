//! Line of sight and cover between two points
//!
//! The sight line is traced as a 3D segment against every terrain box.
//! Overlapping features compose by taking the highest cover tier.

use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::battle::constants::EPSILON_FEET;
use crate::battle::terrain::CoverLevel;
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{Position, TerrainRef};

/// Outcome of a line-of-sight trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityResult {
    pub has_line_of_sight: bool,
    pub cover: CoverLevel,
    /// Sight-blocking terrain the line touches, in terrain order
    pub blocking_features: Vec<TerrainRef>,
}

impl VisibilityResult {
    fn clear() -> Self {
        Self {
            has_line_of_sight: true,
            cover: CoverLevel::None,
            blocking_features: Vec::new(),
        }
    }
}

/// Trace the sight line `from -> to` through the battlefield's terrain
///
/// A sight-blocking feature the line passes through with neither end inside
/// removes line of sight, as does any feature granting total cover.
/// Otherwise the highest cover tier touched is reported. Terrain that grants
/// cover without blocking sight still counts toward cover but is not listed
/// as blocking. Lines that only graze a side face, like one drawn from a
/// creature standing against a wall, ignore that feature.
pub fn calculate_line_of_sight(battlefield: &Battlefield, from: Position, to: Position) -> VisibilityResult {
    if from.distance(&to) < EPSILON_FEET {
        return VisibilityResult::clear();
    }

    let a = from.to_dvec3();
    let b = to.to_dvec3();
    let mut result = VisibilityResult::clear();
    let mut occluded = false;

    for (index, feature) in battlefield.terrain().iter().enumerate() {
        if !feature.blocks_line_of_sight && feature.cover == CoverLevel::None {
            continue;
        }
        let bounds = feature.bounds();
        if bounds.clip_segment(a, b).is_none() {
            continue;
        }

        result.cover = result.cover.max(feature.cover);

        if feature.blocks_line_of_sight {
            result.blocking_features.push(index);
            if !bounds.surrounds(a) && !bounds.surrounds(b) {
                occluded = true;
            }
        }
    }

    if occluded || result.cover == CoverLevel::Total {
        result.has_line_of_sight = false;
        result.cover = CoverLevel::Total;
    }

    result
}

/// Line of sight between two placed creatures
pub fn line_of_sight_between(battlefield: &Battlefield, from_id: &str, to_id: &str) -> Result<VisibilityResult> {
    let from = battlefield.get_creature(from_id)?.position;
    let to = battlefield.get_creature(to_id)?.position;
    Ok(calculate_line_of_sight(battlefield, from, to))
}

/// Presentation bucket for a distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeCategory {
    Melee,
    Short,
    Medium,
    Long,
    OutOfRange,
}

impl RangeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RangeCategory::Melee => "melee",
            RangeCategory::Short => "short",
            RangeCategory::Medium => "medium",
            RangeCategory::Long => "long",
            RangeCategory::OutOfRange => "out of range",
        }
    }
}

/// Map a distance in feet onto the configured range bands
pub fn get_range_category(config: &EngineConfig, distance_feet: f64) -> RangeCategory {
    let bands = &config.range_bands;
    if distance_feet <= bands.melee {
        RangeCategory::Melee
    } else if distance_feet <= bands.short {
        RangeCategory::Short
    } else if distance_feet <= bands.medium {
        RangeCategory::Medium
    } else if distance_feet <= bands.long {
        RangeCategory::Long
    } else {
        RangeCategory::OutOfRange
    }
}
