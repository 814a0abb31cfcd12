//! Movement validation
//!
//! Moves are straight segments. Cost is the segment length; the segment is
//! rejected when it runs through movement-blocking terrain. Validation never
//! mutates the battlefield, so a move can be previewed before it is
//! committed with `Battlefield::move_creature`.

use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::battle::creature::Creature;
use crate::core::error::Result;
use crate::core::types::{CreatureId, Position, TerrainRef};
use crate::spatial::{distance_to_segment, segment_crosses_footprint};

/// Result of validating one proposed move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementResult {
    pub valid: bool,
    pub path_length_feet: f64,
    /// Creatures whose reach the mover leaves, in placement order
    pub opportunity_attack_triggers: Vec<CreatureId>,
    pub exceeds_speed: bool,
    /// Movement-blocking terrain crossed by the path
    pub blocked_by: Vec<TerrainRef>,
}

impl MovementResult {
    pub fn is_blocked(&self) -> bool {
        !self.blocked_by.is_empty()
    }

    /// Short reason for a rejected move
    pub fn rejection_reason(&self) -> Option<&'static str> {
        if self.valid {
            None
        } else if self.exceeds_speed {
            Some("insufficient speed")
        } else if self.is_blocked() {
            Some("path blocked")
        } else {
            Some("invalid move")
        }
    }
}

/// Validate moving `creature` from `from` to `to` on a speed budget
pub fn validate_movement(
    battlefield: &Battlefield,
    creature: &Creature,
    from: Position,
    to: Position,
    speed_budget_feet: f64,
) -> MovementResult {
    let path_length_feet = from.distance(&to);
    let exceeds_speed = !(path_length_feet <= speed_budget_feet);

    let blocked_by: Vec<TerrainRef> = battlefield
        .terrain()
        .iter()
        .enumerate()
        .filter(|(_, feature)| feature.blocks_movement)
        .filter(|(_, feature)| segment_crosses_footprint(from, to, &feature.bounds()))
        .map(|(index, _)| index)
        .collect();

    let opportunity_attack_triggers = opportunity_attackers(battlefield, creature, from, to);

    MovementResult {
        valid: !exceeds_speed && blocked_by.is_empty(),
        path_length_feet,
        opportunity_attack_triggers,
        exceeds_speed,
        blocked_by,
    }
}

/// Validate moving a placed creature from where it stands
pub fn validate_creature_move(
    battlefield: &Battlefield,
    id: &str,
    to: Position,
    speed_budget_feet: f64,
) -> Result<MovementResult> {
    let creature = battlefield.get_creature(id)?;
    Ok(validate_movement(
        battlefield,
        creature,
        creature.position,
        to,
        speed_budget_feet,
    ))
}

/// Creatures whose reach the path enters and the destination leaves
///
/// Covers both starting adjacent and walking past a threat; ending inside
/// the reach never provokes.
pub fn opportunity_attackers(
    battlefield: &Battlefield,
    mover: &Creature,
    from: Position,
    to: Position,
) -> Vec<CreatureId> {
    battlefield
        .others(mover.id.as_str())
        .filter(|other| {
            let reach = other.reach();
            let closest = distance_to_segment(other.position, from, to);
            closest <= reach && other.position.distance(&to) > reach
        })
        .map(|other| other.id.clone())
        .collect()
}
