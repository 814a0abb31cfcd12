//! Core type definitions used throughout the codebase

use std::borrow::Borrow;

use derive_more::{Display, From};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Unique identifier for creatures on a battlefield
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub String);

impl CreatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CreatureId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for CreatureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CreatureId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CreatureId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Index of a terrain feature in the battlefield's ordered terrain list
pub type TerrainRef = usize;

/// A point on the battlefield, all axes in feet
///
/// x and y map onto 5-foot grid squares; z is free elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Ground-level position
    pub const fn flat(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Straight-line distance in feet
    pub fn distance(&self, other: &Self) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    /// Distance in feet ignoring elevation
    pub fn horizontal_distance(&self, other: &Self) -> f64 {
        self.to_dvec2().distance(other.to_dvec2())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Extent of a terrain feature in feet
///
/// `width` runs along +x, `height` along +y, `depth` is vertical (+z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth }
    }
}
