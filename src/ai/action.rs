//! Deferred AI commands and the executor seam
//!
//! Planners never touch the game directly. They push `Action` values onto an
//! `ActionQueue`; an external executor implementing `Controls` invokes them
//! later, possibly batched with actions from other planners. Each action
//! carries everything it needs, so building one has no side effects.

use serde::{Deserialize, Serialize};

use crate::core::types::{BuildingId, FleetId, PlanetId, ResearchId};
use crate::world::research::ResearchType;

/// A deferred command produced by a planning pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    MoveFleet {
        fleet: FleetId,
        x: f64,
        y: f64,
    },
    DeploySatellite {
        planet: PlanetId,
        satellite: ResearchId,
    },
    RepairBuilding {
        planet: PlanetId,
        building: BuildingId,
        repair: bool,
    },
    PlaceBuilding {
        planet: PlanetId,
        building_type: String,
    },
    DemolishBuilding {
        planet: PlanetId,
        building: BuildingId,
    },
    /// Create a fleet, add one ship and fit the best equipment
    CreateFleet {
        name: String,
        planet: PlanetId,
        ship: ResearchId,
    },
    PlaceProductionOrder {
        research: ResearchId,
        quantity: u32,
    },
}

impl Action {
    pub fn production(research: &ResearchType, quantity: u32) -> Self {
        Action::PlaceProductionOrder {
            research: research.id.clone(),
            quantity,
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Action::MoveFleet { .. } => "move_fleet",
            Action::DeploySatellite { .. } => "deploy_satellite",
            Action::RepairBuilding { .. } => "repair_building",
            Action::PlaceBuilding { .. } => "place_building",
            Action::DemolishBuilding { .. } => "demolish_building",
            Action::CreateFleet { .. } => "create_fleet",
            Action::PlaceProductionOrder { .. } => "place_production_order",
        }
    }

    /// Perform the command against the game
    pub fn invoke(&self, controls: &mut dyn Controls) {
        match self {
            Action::MoveFleet { fleet, x, y } => controls.move_fleet(*fleet, *x, *y),
            Action::DeploySatellite { planet, satellite } => {
                controls.deploy_satellite(*planet, satellite)
            }
            Action::RepairBuilding { planet, building, repair } => {
                controls.repair_building(*planet, *building, *repair)
            }
            Action::PlaceBuilding { planet, building_type } => {
                controls.place_building(*planet, building_type)
            }
            Action::DemolishBuilding { planet, building } => {
                controls.demolish_building(*planet, *building)
            }
            Action::CreateFleet { name, planet, ship } => {
                let fleet = controls.create_fleet(name, *planet);
                controls.add_fleet_inventory(fleet, ship, 1);
                controls.upgrade_all(fleet);
            }
            Action::PlaceProductionOrder { research, quantity } => {
                controls.place_production_order(research, *quantity)
            }
        }
    }
}

/// Game-side primitives an executor must provide
///
/// Implementations re-validate their own preconditions; the world may have
/// changed between planning and execution.
pub trait Controls {
    fn move_fleet(&mut self, fleet: FleetId, x: f64, y: f64);
    fn deploy_satellite(&mut self, planet: PlanetId, satellite: &ResearchId);
    fn repair_building(&mut self, planet: PlanetId, building: BuildingId, repair: bool);
    fn place_building(&mut self, planet: PlanetId, building_type: &str);
    fn demolish_building(&mut self, planet: PlanetId, building: BuildingId);
    fn create_fleet(&mut self, name: &str, planet: PlanetId) -> FleetId;
    fn add_fleet_inventory(&mut self, fleet: FleetId, research: &ResearchId, count: u32);
    fn upgrade_all(&mut self, fleet: FleetId);
    fn place_production_order(&mut self, research: &ResearchId, quantity: u32);
}

/// Ordered actions from one or more planning passes
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    actions: Vec<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        tracing::info!(kind = action.kind(), "Queued AI action {:?}", action);
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    /// Remove and return all actions in enqueue order
    pub fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    /// Invoke every queued action in enqueue order, emptying the queue
    pub fn execute_all(&mut self, controls: &mut dyn Controls) -> usize {
        let actions = self.drain();
        for action in &actions {
            action.invoke(controls);
        }
        actions.len()
    }
}

/// One primitive call observed by `RecordingControls`
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCall {
    MoveFleet(FleetId, f64, f64),
    DeploySatellite(PlanetId, ResearchId),
    RepairBuilding(PlanetId, BuildingId, bool),
    PlaceBuilding(PlanetId, String),
    DemolishBuilding(PlanetId, BuildingId),
    CreateFleet(String, PlanetId, FleetId),
    AddFleetInventory(FleetId, ResearchId, u32),
    UpgradeAll(FleetId),
    PlaceProductionOrder(ResearchId, u32),
}

/// Executor that only records what it was asked to do
#[derive(Debug, Clone)]
pub struct RecordingControls {
    pub calls: Vec<ControlCall>,
    next_fleet_id: u32,
}

impl RecordingControls {
    /// New fleets are numbered from `first_fleet_id` upwards
    pub fn new(first_fleet_id: u32) -> Self {
        Self { calls: Vec::new(), next_fleet_id: first_fleet_id }
    }
}

impl Default for RecordingControls {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Controls for RecordingControls {
    fn move_fleet(&mut self, fleet: FleetId, x: f64, y: f64) {
        self.calls.push(ControlCall::MoveFleet(fleet, x, y));
    }

    fn deploy_satellite(&mut self, planet: PlanetId, satellite: &ResearchId) {
        self.calls.push(ControlCall::DeploySatellite(planet, satellite.clone()));
    }

    fn repair_building(&mut self, planet: PlanetId, building: BuildingId, repair: bool) {
        self.calls.push(ControlCall::RepairBuilding(planet, building, repair));
    }

    fn place_building(&mut self, planet: PlanetId, building_type: &str) {
        self.calls.push(ControlCall::PlaceBuilding(planet, building_type.to_string()));
    }

    fn demolish_building(&mut self, planet: PlanetId, building: BuildingId) {
        self.calls.push(ControlCall::DemolishBuilding(planet, building));
    }

    fn create_fleet(&mut self, name: &str, planet: PlanetId) -> FleetId {
        let id = FleetId(self.next_fleet_id);
        self.next_fleet_id += 1;
        self.calls.push(ControlCall::CreateFleet(name.to_string(), planet, id));
        id
    }

    fn add_fleet_inventory(&mut self, fleet: FleetId, research: &ResearchId, count: u32) {
        self.calls.push(ControlCall::AddFleetInventory(fleet, research.clone(), count));
    }

    fn upgrade_all(&mut self, fleet: FleetId) {
        self.calls.push(ControlCall::UpgradeAll(fleet));
    }

    fn place_production_order(&mut self, research: &ResearchId, quantity: u32) {
        self.calls.push(ControlCall::PlaceProductionOrder(research.clone(), quantity));
    }
}
