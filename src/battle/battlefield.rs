//! The battlefield aggregate: grid, terrain and creature registry
//!
//! The battlefield is the sole owner of every creature record. Callers get
//! clones or shared borrows, never a mutable handle to a single creature.

use ahash::RandomState;
use indexmap::IndexMap;

use crate::battle::creature::Creature;
use crate::battle::terrain::TerrainFeature;
use crate::core::config::EngineConfig;
use crate::core::error::{Result, SpatialError};
use crate::core::types::{CreatureId, Position, TerrainRef};

/// Creatures in placement order
type CreatureMap = IndexMap<CreatureId, Creature, RandomState>;

/// Grid, terrain and creature positions for one encounter
#[derive(Debug, Clone)]
pub struct Battlefield {
    width: u32,
    height: u32,
    terrain: Vec<TerrainFeature>,
    creatures: CreatureMap,
    config: EngineConfig,
}

impl Battlefield {
    /// Create a battlefield `width` x `height` squares with default config
    pub fn new(width: i64, height: i64, terrain: Vec<TerrainFeature>) -> Result<Self> {
        Self::with_config(width, height, terrain, EngineConfig::default())
    }

    pub fn with_config(
        width: i64,
        height: i64,
        terrain: Vec<TerrainFeature>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut battlefield = Self {
            width: 1,
            height: 1,
            terrain: Vec::new(),
            creatures: CreatureMap::default(),
            config,
        };
        battlefield.initialize(width, height, terrain)?;
        Ok(battlefield)
    }

    /// Replace the whole battlefield state
    ///
    /// Prior creatures are discarded. Each side must be between 1 and the
    /// configured `max_side_squares`. On invalid dimensions nothing changes.
    pub fn initialize(&mut self, width: i64, height: i64, terrain: Vec<TerrainFeature>) -> Result<()> {
        let max = self.config.max_side_squares;
        let invalid = || SpatialError::InvalidDimensions { width, height, max };
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(invalid());
        };
        if w == 0 || h == 0 || w > max || h > max {
            return Err(invalid());
        }

        self.width = w;
        self.height = h;
        self.terrain = terrain;
        self.creatures.clear();
        Ok(())
    }

    /// Width in grid squares
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in grid squares
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width_feet(&self) -> f64 {
        self.width as f64 * self.config.grid_square_feet
    }

    pub fn height_feet(&self) -> f64 {
        self.height as f64 * self.config.grid_square_feet
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn terrain(&self) -> &[TerrainFeature] {
        &self.terrain
    }

    pub fn terrain_feature(&self, terrain_ref: TerrainRef) -> Option<&TerrainFeature> {
        self.terrain.get(terrain_ref)
    }

    /// Is the position inside the grid? Elevation is unconstrained.
    pub fn contains(&self, position: &Position) -> bool {
        position.is_finite()
            && position.x >= 0.0
            && position.y >= 0.0
            && position.x < self.width_feet()
            && position.y < self.height_feet()
    }

    /// Grid square (column, row) holding a position, if inside the grid
    pub fn grid_square(&self, position: &Position) -> Option<(u32, u32)> {
        if !self.contains(position) {
            return None;
        }
        let size = self.config.grid_square_feet;
        let col = ((position.x / size).floor() as u32).min(self.width - 1);
        let row = ((position.y / size).floor() as u32).min(self.height - 1);
        Some((col, row))
    }

    pub(crate) fn check_bounds(&self, position: &Position) -> Result<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds {
                x: position.x,
                y: position.y,
                width_feet: self.width_feet(),
                height_feet: self.height_feet(),
            })
        }
    }

    /// Place a new creature
    pub fn add_creature(&mut self, creature: Creature) -> Result<()> {
        if self.creatures.contains_key(&creature.id) {
            return Err(SpatialError::DuplicateId(creature.id.to_string()));
        }
        self.check_bounds(&creature.position)?;
        self.creatures.insert(creature.id.clone(), creature);
        Ok(())
    }

    /// Overwrite a creature's position
    ///
    /// Legality is not checked here; run the movement validator first.
    pub fn move_creature(&mut self, id: &str, position: Position) -> Result<()> {
        let creature = self
            .creatures
            .get_mut(id)
            .ok_or_else(|| SpatialError::NotFound(id.to_string()))?;
        creature.position = position;
        Ok(())
    }

    /// Remove a creature, returning its final record
    pub fn remove_creature(&mut self, id: &str) -> Result<Creature> {
        self.creatures
            .shift_remove(id)
            .ok_or_else(|| SpatialError::NotFound(id.to_string()))
    }

    pub fn get_creature(&self, id: &str) -> Result<&Creature> {
        self.creatures
            .get(id)
            .ok_or_else(|| SpatialError::NotFound(id.to_string()))
    }

    /// All creatures in placement order
    pub fn list_creatures(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.creatures.values()
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    /// Every creature other than `id`
    pub(crate) fn others<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Creature> + 'a {
        self.creatures.values().filter(move |c| c.id.as_str() != id)
    }
}

impl Default for Battlefield {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            terrain: Vec::new(),
            creatures: CreatureMap::default(),
            config: EngineConfig::default(),
        }
    }
}
