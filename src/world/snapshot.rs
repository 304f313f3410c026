//! Per-turn read-only view of the game state
//!
//! The external simulation assembles an `AiWorld` before each AI turn.
//! Planners only read it; any change they want goes through an `Action`.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::catalog::BuildingCatalog;
use super::fleet::AiFleet;
use super::planet::AiPlanet;
use super::research::ResearchType;
use crate::core::types::{Location, PlayerId, ResearchId};

/// Unexplored starmap cells
///
/// Shrinks as fog of war clears. Cells iterate in (x, y) order.
#[derive(Debug, Clone, Default)]
pub struct ExplorationMap {
    /// Side length of one cell in world units
    pub cell_size: u32,
    cells: BTreeSet<Location>,
}

impl ExplorationMap {
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size, cells: BTreeSet::new() }
    }

    pub fn with_cells(cell_size: u32, cells: impl IntoIterator<Item = Location>) -> Self {
        Self { cell_size, cells: cells.into_iter().collect() }
    }

    pub fn insert(&mut self, cell: Location) -> bool {
        self.cells.insert(cell)
    }

    /// Mark a cell explored
    pub fn remove(&mut self, cell: &Location) -> bool {
        self.cells.remove(cell)
    }

    pub fn contains(&self, cell: &Location) -> bool {
        self.cells.contains(cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell containing a world-space point
    pub fn cell_at(&self, x: f64, y: f64) -> Location {
        let size = f64::from(self.cell_size.max(1));
        Location::of((x / size).floor() as i32, (y / size).floor() as i32)
    }
}

/// Owned item counts, in the order the snapshot listed them
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: Vec<(Arc<ResearchType>, u32)>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the stock of an item, merging with an existing entry
    pub fn add(&mut self, research: Arc<ResearchType>, count: u32) {
        match self.entries.iter_mut().find(|(rt, _)| rt.id == research.id) {
            Some((_, existing)) => *existing = existing.saturating_add(count),
            None => self.entries.push((research, count)),
        }
    }

    pub fn count(&self, research: &ResearchId) -> u32 {
        self.entries
            .iter()
            .find(|(rt, _)| &rt.id == research)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Remove up to `count` items; returns how many were actually taken
    pub fn take(&mut self, research: &ResearchId, count: u32) -> u32 {
        match self.entries.iter_mut().find(|(rt, _)| &rt.id == research) {
            Some((_, existing)) => {
                let taken = count.min(*existing);
                *existing -= taken;
                taken
            }
            None => 0,
        }
    }

    /// All entries, including zero counts
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<ResearchType>, u32)> {
        self.entries.iter().map(|(rt, count)| (rt, *count))
    }

    /// Entries with at least one item in stock
    pub fn in_stock(&self) -> impl Iterator<Item = &Arc<ResearchType>> {
        self.entries
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(rt, _)| rt)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Empire-wide capability flags
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalFlags {
    /// At least one military spaceport is operational
    pub has_military_spaceport: bool,
}

/// Snapshot of everything a planner may inspect during one turn
#[derive(Debug, Clone)]
pub struct AiWorld {
    pub player: PlayerId,
    pub own_fleets: Vec<AiFleet>,
    pub own_planets: Vec<AiPlanet>,
    pub foreign_planets: Vec<AiPlanet>,
    /// Planets not yet fully surveyed
    pub unknown_planets: Vec<AiPlanet>,
    pub inventory: Inventory,
    pub available_research: Vec<Arc<ResearchType>>,
    pub global: GlobalFlags,
    pub money: i64,
    pub buildings: BuildingCatalog,
    pub exploration: ExplorationMap,
    /// Seed for this turn's random choices
    pub turn_seed: u64,
}

impl AiWorld {
    pub fn new(player: PlayerId, cell_size: u32) -> Self {
        Self {
            player,
            own_fleets: Vec::new(),
            own_planets: Vec::new(),
            foreign_planets: Vec::new(),
            unknown_planets: Vec::new(),
            inventory: Inventory::new(),
            available_research: Vec::new(),
            global: GlobalFlags::default(),
            money: 0,
            buildings: BuildingCatalog::new(),
            exploration: ExplorationMap::new(cell_size),
            turn_seed: 0,
        }
    }

    pub fn inventory_count(&self, research: &ResearchId) -> u32 {
        self.inventory.count(research)
    }
}
