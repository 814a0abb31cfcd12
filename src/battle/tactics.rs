//! Tactical analysis - flanking, elevation and per-creature situation
//!
//! Everything here is a read-only query composed from the battlefield and
//! the visibility resolver. Text rendering lives in `render`.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::battle::battlefield::Battlefield;
use crate::battle::creature::Creature;
use crate::battle::terrain::{CoverLevel, TerrainFeature};
use crate::battle::visibility::{calculate_line_of_sight, get_range_category, RangeCategory};
use crate::core::error::Result;
use crate::core::types::CreatureId;
use crate::spatial::{angle_between_degrees, bearing_degrees};

/// First pair of creatures flanking `id`, if any
///
/// Both must have `id` within their reach, and the directions from each of
/// them toward `id` must differ by more than the flank angle.
pub fn find_flanking_pair(battlefield: &Battlefield, id: &str) -> Result<Option<(CreatureId, CreatureId)>> {
    let target = battlefield.get_creature(id)?;
    let threshold = battlefield.config().flank_angle_degrees;

    let adjacent: Vec<&Creature> = battlefield
        .others(id)
        .filter(|other| other.can_reach(&target.position))
        .collect();

    let here = target.position.to_dvec2();
    for (i, a) in adjacent.iter().enumerate() {
        let from_a = here - a.position.to_dvec2();
        for b in &adjacent[i + 1..] {
            let from_b = here - b.position.to_dvec2();
            if angle_between_degrees(from_a, from_b).is_some_and(|angle| angle > threshold) {
                return Ok(Some((a.id.clone(), b.id.clone())));
            }
        }
    }
    Ok(None)
}

pub fn is_creature_flanked(battlefield: &Battlefield, id: &str) -> Result<bool> {
    Ok(find_flanking_pair(battlefield, id)?.is_some())
}

/// Strictly higher ground; ties favour neither side
pub fn has_height_advantage(battlefield: &Battlefield, attacker_id: &str, target_id: &str) -> Result<bool> {
    let attacker = battlefield.get_creature(attacker_id)?;
    let target = battlefield.get_creature(target_id)?;
    Ok(attacker.position.z > target.position.z)
}

/// Where another creature stands vertically, relative to the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeElevation {
    Above,
    Level,
    Below,
}

impl RelativeElevation {
    fn between(subject: &Creature, other: &Creature) -> Self {
        let dz = other.position.z - subject.position.z;
        if dz > 0.0 {
            RelativeElevation::Above
        } else if dz < 0.0 {
            RelativeElevation::Below
        } else {
            RelativeElevation::Level
        }
    }
}

/// Another creature as seen from the subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: CreatureId,
    pub name: String,
    pub distance_feet: f64,
    /// Bearing from the subject, `None` when directly above or below
    pub bearing_degrees: Option<f64>,
    pub range: RangeCategory,
    pub line_of_sight: bool,
    /// Cover the contact has against the subject
    pub cover: CoverLevel,
    pub elevation: RelativeElevation,
    /// The subject is within the contact's reach
    pub threatens: bool,
    /// The contact is within the subject's reach
    pub threatened: bool,
}

/// Structured tactical picture for one creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalSituation {
    pub creature: Creature,
    pub flanked: bool,
    pub flanked_by: Option<(CreatureId, CreatureId)>,
    /// Every other creature, nearest first
    pub contacts: Vec<Contact>,
}

impl TacticalSituation {
    pub fn threats(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.threatens)
    }

    pub fn nearest(&self) -> Option<&Contact> {
        self.contacts.first()
    }
}

pub fn tactical_situation(battlefield: &Battlefield, id: &str) -> Result<TacticalSituation> {
    let subject = battlefield.get_creature(id)?;
    let flanked_by = find_flanking_pair(battlefield, id)?;

    let mut contacts: Vec<Contact> = battlefield
        .others(id)
        .map(|other| {
            let distance_feet = subject.position.distance(&other.position);
            let sight = calculate_line_of_sight(battlefield, subject.position, other.position);
            Contact {
                id: other.id.clone(),
                name: other.name.clone(),
                distance_feet,
                bearing_degrees: bearing_degrees(subject.position, other.position),
                range: get_range_category(battlefield.config(), distance_feet),
                line_of_sight: sight.has_line_of_sight,
                cover: sight.cover,
                elevation: RelativeElevation::between(subject, other),
                threatens: other.can_reach(&subject.position),
                threatened: subject.can_reach(&other.position),
            }
        })
        .collect();
    // Stable: equal distances keep placement order
    contacts.sort_by_key(|c| OrderedFloat(c.distance_feet));

    Ok(TacticalSituation {
        creature: subject.clone(),
        flanked: flanked_by.is_some(),
        flanked_by,
        contacts,
    })
}

/// Structured snapshot of the whole battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldOverview {
    pub width: u32,
    pub height: u32,
    pub width_feet: f64,
    pub height_feet: f64,
    pub terrain: Vec<TerrainFeature>,
    pub creatures: Vec<Creature>,
}

pub fn battlefield_overview(battlefield: &Battlefield) -> BattlefieldOverview {
    BattlefieldOverview {
        width: battlefield.width(),
        height: battlefield.height(),
        width_feet: battlefield.width_feet(),
        height_feet: battlefield.height_feet(),
        terrain: battlefield.terrain().to_vec(),
        creatures: battlefield.list_creatures().cloned().collect(),
    }
}
