//! Structured responses returned to the caller

use serde::{Deserialize, Serialize};

use crate::battle::creature::Creature;
use crate::battle::movement::MovementResult;
use crate::battle::tactics::TacticalSituation;
use crate::battle::visibility::{RangeCategory, VisibilityResult};
use crate::battle::area::AreaShape;
use crate::core::error::SpatialError;
use crate::core::types::{CreatureId, Position};

/// Result of one successfully processed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Initialized {
        width: u32,
        height: u32,
        terrain_features: usize,
    },
    Placed {
        creature: Creature,
    },
    Moved {
        creature_id: CreatureId,
        /// Whether the move was committed
        moved: bool,
        /// Position after the request
        position: Position,
        movement: MovementResult,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Removed {
        creature: Creature,
    },
    LineOfSight {
        from_creature: CreatureId,
        to_creature: CreatureId,
        distance_feet: f64,
        range: RangeCategory,
        visibility: VisibilityResult,
    },
    AreaTargets {
        shape: AreaShape,
        targets: Vec<CreatureId>,
    },
    Flanking {
        creature_id: CreatureId,
        flanked: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flanked_by: Option<(CreatureId, CreatureId)>,
    },
    HeightAdvantage {
        attacker_id: CreatureId,
        target_id: CreatureId,
        has_advantage: bool,
        elevation_difference_feet: f64,
    },
    TacticalSummary {
        situation: TacticalSituation,
    },
    Text {
        text: String,
    },
    Batch {
        succeeded: usize,
        failed: usize,
        results: Vec<BatchEntry>,
    },
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Response::Text { text: text.into() }
    }

    /// Collect per-entry outcomes into a batch response
    pub fn batch(results: Vec<BatchEntry>) -> Self {
        let succeeded = results.iter().filter(|entry| entry.success).count();
        Response::Batch {
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }
}

/// Machine-readable form of a rejected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
}

impl From<&SpatialError> for ErrorReport {
    fn from(error: &SpatialError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Outcome for one entry of a batch request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub creature_id: CreatureId,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl BatchEntry {
    pub fn ok(creature_id: CreatureId, success: bool, response: Response) -> Self {
        Self {
            creature_id,
            success,
            response: Some(response),
            error: None,
        }
    }

    pub fn failed(creature_id: CreatureId, error: &SpatialError) -> Self {
        Self {
            creature_id,
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }
}
