//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game tick counter (one tick is one in-game hour)
pub type Tick = u64;

/// Owner of fleets, planets and inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Identifier of a fleet on the starmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FleetId(pub u32);

/// Identifier of a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanetId(pub u32);

/// Identifier of a concrete building placed on a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u32);

/// Identifier of a research/ship/equipment definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResearchId(pub String);

impl ResearchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer grid coordinate
///
/// Equality, ordering and hashing are purely structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const fn of(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Location relative to this one
    pub const fn delta(&self, dx: i32, dy: i32) -> Self {
        Self::of(self.x + dx, self.y + dy)
    }

    /// World coordinates of the center of this cell for the given cell size
    pub fn cell_center(&self, cell_size: u32) -> (f64, f64) {
        let size = f64::from(cell_size);
        (
            (f64::from(self.x) + 0.5) * size,
            (f64::from(self.y) + 0.5) * size,
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
