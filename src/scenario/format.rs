//! TOML schema for hand-written AI test scenarios
//!
//! A scenario file describes one turn's world snapshot: the research
//! catalogue, building types, fleets, planets and the unexplored map.
//! Research referenced from slots, inventory or orbit is named by id.

use serde::{Deserialize, Serialize};

use crate::world::research::ResearchCategory;

fn default_cell_size() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

/// Root of a scenario file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioFile {
    /// Player the AI plays for
    pub player: u32,
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub turn_seed: u64,
    #[serde(default = "default_cell_size")]
    pub exploration_cell_size: u32,
    #[serde(default)]
    pub has_military_spaceport: bool,
    /// Unexplored cells as `[x, y]` pairs
    #[serde(default)]
    pub exploration: Vec<[i32; 2]>,
    /// Research ids the player can build
    #[serde(default)]
    pub available_research: Vec<String>,
    #[serde(default)]
    pub research: Vec<ResearchDef>,
    #[serde(default)]
    pub buildings: Vec<BuildingDef>,
    #[serde(default)]
    pub inventory: Vec<StockDef>,
    #[serde(default)]
    pub fleets: Vec<FleetDef>,
    #[serde(default)]
    pub planets: Vec<PlanetDef>,
}

/// A research/ship/equipment definition
///
/// Slot items must be declared before the research that carries them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResearchDef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: ResearchCategory,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub attributes: std::collections::BTreeMap<String, i32>,
    #[serde(default)]
    pub slots: Vec<SlotDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlotDef {
    pub id: String,
    #[serde(default)]
    pub fixed: bool,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildingDef {
    pub id: String,
    pub cost: i64,
    #[serde(default = "default_one")]
    pub width: u32,
    #[serde(default = "default_one")]
    pub height: u32,
}

fn default_one() -> u32 {
    1
}

/// Research count held in the empire-wide inventory
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StockDef {
    pub research: String,
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FleetDef {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub radar: i32,
    #[serde(default)]
    pub moving: bool,
}

/// How the AI player knows a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetRelation {
    Own,
    Foreign,
    Unknown,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanetDef {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub owner: Option<u32>,
    /// Derived from `owner` when omitted
    #[serde(default)]
    pub relation: Option<PlanetRelation>,
    /// Starmap position, where new fleets appear
    #[serde(default)]
    pub position: Option<[f64; 2]>,
    #[serde(default)]
    pub free_surface: u32,
    #[serde(default)]
    pub buildings: Vec<PlacedBuildingDef>,
    #[serde(default)]
    pub orbit: Vec<OrbitDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlacedBuildingDef {
    pub id: u32,
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default = "default_true")]
    pub operational: bool,
    #[serde(default)]
    pub damaged: bool,
    #[serde(default)]
    pub repairing: bool,
}

/// Satellites and stations around a planet
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrbitDef {
    pub owner: u32,
    pub research: String,
    #[serde(default = "default_one")]
    pub count: u32,
}
