//! Command execution - dispatches requests onto the battlefield
//!
//! The executor owns exactly one battlefield and handles one request at a
//! time. Engine errors are returned unchanged; the executor only adds
//! logging and the boundary defaults from `request`.

use crate::battle::area::get_targets_in_area;
use crate::battle::battlefield::Battlefield;
use crate::battle::movement::validate_movement;
use crate::battle::tactics::{find_flanking_pair, has_height_advantage, tactical_situation};
use crate::battle::visibility::{get_range_category, line_of_sight_between};
use crate::command::request::{AreaSpec, CreatureSpec, MoveSpec, Request, TerrainSpec};
use crate::command::response::{BatchEntry, Response};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::CreatureId;
use crate::render::{describe_battlefield, describe_tactical_situation, generate_battlefield_map};

/// Executes requests against the battlefield it owns
#[derive(Debug, Default)]
pub struct CommandExecutor {
    battlefield: Battlefield,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a 1x1 battlefield carrying `config`
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            battlefield: Battlefield::with_config(1, 1, Vec::new(), config)?,
        })
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    /// Execute one request
    pub fn execute(&mut self, request: Request) -> Result<Response> {
        let tool = request.tool_name();
        if request.is_mutation() {
            tracing::info!("Applying {}", tool);
        } else {
            tracing::debug!("Answering {}", tool);
        }

        let result = self.dispatch(request);
        if let Err(e) = &result {
            tracing::warn!("Rejected {}: {}", tool, e);
        }
        result
    }

    /// Execute requests in order; a failure never stops the rest
    pub fn execute_all(&mut self, requests: Vec<Request>) -> Vec<Result<Response>> {
        requests.into_iter().map(|request| self.execute(request)).collect()
    }

    fn dispatch(&mut self, request: Request) -> Result<Response> {
        match request {
            Request::InitializeBattlefield { width, height, terrain } => {
                self.initialize(width, height, &terrain)
            }
            Request::PlaceCreature(spec) => self.place(&spec),
            Request::MoveCreature(spec) => self.move_creature(&spec),
            Request::RemoveCreature { creature_id } => {
                let creature = self.battlefield.remove_creature(creature_id.as_str())?;
                tracing::info!("Removed {} ({})", creature.name, creature.id);
                Ok(Response::Removed { creature })
            }
            Request::CheckLineOfSight {
                from_creature,
                to_creature,
            } => self.line_of_sight(from_creature, to_creature),
            Request::GetAreaEffectTargets(spec) => self.area_targets(&spec),
            Request::CheckFlanking { creature_id } => {
                let flanked_by = find_flanking_pair(&self.battlefield, creature_id.as_str())?;
                Ok(Response::Flanking {
                    creature_id,
                    flanked: flanked_by.is_some(),
                    flanked_by,
                })
            }
            Request::CheckHeightAdvantage {
                attacker_id,
                target_id,
            } => {
                let has_advantage =
                    has_height_advantage(&self.battlefield, attacker_id.as_str(), target_id.as_str())?;
                let elevation_difference_feet = self.battlefield.get_creature(attacker_id.as_str())?.position.z
                    - self.battlefield.get_creature(target_id.as_str())?.position.z;
                Ok(Response::HeightAdvantage {
                    attacker_id,
                    target_id,
                    has_advantage,
                    elevation_difference_feet,
                })
            }
            Request::GetTacticalSummary { creature_id } => Ok(Response::TacticalSummary {
                situation: tactical_situation(&self.battlefield, creature_id.as_str())?,
            }),
            Request::DescribeBattlefield => Ok(Response::text(describe_battlefield(&self.battlefield))),
            Request::DescribeDetailedTacticalSituation { creature_id } => Ok(Response::text(
                describe_tactical_situation(&self.battlefield, creature_id.as_str())?,
            )),
            Request::GenerateBattlefieldMap => Ok(Response::text(generate_battlefield_map(&self.battlefield))),
            Request::BatchPlaceCreatures { creatures } => Ok(self.batch_place(&creatures)),
            Request::BatchMoveCreatures { movements } => Ok(self.batch_move(&movements)),
        }
    }

    fn initialize(&mut self, width: i64, height: i64, terrain: &[TerrainSpec]) -> Result<Response> {
        let config = self.battlefield.config();
        let features = terrain
            .iter()
            .map(|spec| spec.resolve(config))
            .collect::<Result<Vec<_>>>()?;
        let count = features.len();

        self.battlefield.initialize(width, height, features)?;
        tracing::info!(
            "Initialized {}x{} battlefield with {} terrain features",
            width,
            height,
            count
        );

        Ok(Response::Initialized {
            width: self.battlefield.width(),
            height: self.battlefield.height(),
            terrain_features: count,
        })
    }

    fn place(&mut self, spec: &CreatureSpec) -> Result<Response> {
        let creature = spec.resolve()?;
        self.battlefield.add_creature(creature.clone())?;
        tracing::info!("Placed {} ({}) at {}", creature.name, creature.id, creature.position);
        Ok(Response::Placed { creature })
    }

    /// Validate, then commit only a legal move
    fn move_creature(&mut self, spec: &MoveSpec) -> Result<Response> {
        let target = spec.target();
        let creature = self.battlefield.get_creature(spec.creature_id.as_str())?;
        self.battlefield.check_bounds(&target)?;

        let movement = validate_movement(&self.battlefield, creature, creature.position, target, spec.speed);
        let reason = movement.rejection_reason().map(str::to_string);

        if movement.valid {
            self.battlefield.move_creature(spec.creature_id.as_str(), target)?;
            tracing::info!(
                "Moved {} to {} ({:.1} ft)",
                spec.creature_id,
                target,
                movement.path_length_feet
            );
            if !movement.opportunity_attack_triggers.is_empty() {
                tracing::info!(
                    "{} provoked opportunity attacks from {} creatures",
                    spec.creature_id,
                    movement.opportunity_attack_triggers.len()
                );
            }
        } else {
            tracing::warn!(
                "Move of {} to {} rejected: {}",
                spec.creature_id,
                target,
                reason.as_deref().unwrap_or("invalid")
            );
        }

        let position = self.battlefield.get_creature(spec.creature_id.as_str())?.position;
        Ok(Response::Moved {
            creature_id: spec.creature_id.clone(),
            moved: movement.valid,
            position,
            movement,
            reason,
        })
    }

    fn line_of_sight(&self, from_creature: CreatureId, to_creature: CreatureId) -> Result<Response> {
        let visibility = line_of_sight_between(&self.battlefield, from_creature.as_str(), to_creature.as_str())?;
        let from = self.battlefield.get_creature(from_creature.as_str())?.position;
        let to = self.battlefield.get_creature(to_creature.as_str())?.position;
        let distance_feet = from.distance(&to);

        Ok(Response::LineOfSight {
            from_creature,
            to_creature,
            distance_feet,
            range: get_range_category(self.battlefield.config(), distance_feet),
            visibility,
        })
    }

    fn area_targets(&self, spec: &AreaSpec) -> Result<Response> {
        let query = spec.resolve()?;
        let targets = get_targets_in_area(&self.battlefield, &query)?;
        Ok(Response::AreaTargets {
            shape: query.shape,
            targets,
        })
    }

    fn batch_place(&mut self, creatures: &[CreatureSpec]) -> Response {
        let results = creatures
            .iter()
            .map(|spec| match self.place(spec) {
                Ok(response) => BatchEntry::ok(spec.creature_id.clone(), true, response),
                Err(e) => {
                    tracing::warn!("Batch placement of {} failed: {}", spec.creature_id, e);
                    BatchEntry::failed(spec.creature_id.clone(), &e)
                }
            })
            .collect();
        Response::batch(results)
    }

    fn batch_move(&mut self, movements: &[MoveSpec]) -> Response {
        let results = movements
            .iter()
            .map(|spec| match self.move_creature(spec) {
                Ok(response) => {
                    let moved = matches!(response, Response::Moved { moved: true, .. });
                    BatchEntry::ok(spec.creature_id.clone(), moved, response)
                }
                Err(e) => {
                    tracing::warn!("Batch move of {} failed: {}", spec.creature_id, e);
                    BatchEntry::failed(spec.creature_id.clone(), &e)
                }
            })
            .collect();
        Response::batch(results)
    }
}
