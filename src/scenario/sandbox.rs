//! Offline executor that applies AI actions to a scenario world
//!
//! Everything resolves instantly: production lands in the inventory,
//! buildings finish on placement and fleets arrive where they were sent.
//! Good enough to watch a planner make progress over several turns.

use ahash::AHashMap;
use serde::Serialize;
use std::sync::Arc;

use crate::ai::action::Controls;
use crate::ai::select;
use crate::core::config::DiscoveryConfig;
use crate::core::types::{BuildingId, FleetId, PlanetId, ResearchId};
use crate::world::fleet::AiFleet;
use crate::world::planet::{AiBuilding, AiInventoryItem, AiPlanet};
use crate::world::research::ResearchType;
use crate::world::snapshot::AiWorld;

/// Outcome of one applied primitive, for the run log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SandboxEvent {
    FleetArrived { fleet: FleetId, cells_revealed: usize },
    SatelliteDeployed { planet: PlanetId, satellite: ResearchId },
    BuildingRepaired { planet: PlanetId, building: BuildingId },
    BuildingPlaced { planet: PlanetId, building: BuildingId, building_type: String },
    BuildingDemolished { planet: PlanetId, building: BuildingId },
    FleetCreated { fleet: FleetId, planet: PlanetId },
    ShipAdded { fleet: FleetId, ship: ResearchId },
    RadarFitted { fleet: FleetId, radar: i32 },
    Produced { research: ResearchId, quantity: u32 },
    /// The primitive could not be applied to the current world
    Rejected { reason: String },
}

/// `Controls` implementation backed by a mutable `AiWorld`
pub struct Sandbox {
    world: AiWorld,
    radar_key: String,
    military_spaceport_id: String,
    positions: AHashMap<PlanetId, (f64, f64)>,
    fleet_ships: AHashMap<FleetId, Arc<ResearchType>>,
    next_building_id: u32,
    next_fleet_id: u32,
    events: Vec<SandboxEvent>,
}

impl Sandbox {
    pub fn new(world: AiWorld, config: &DiscoveryConfig) -> Self {
        let next_building_id = all_planets(&world)
            .flat_map(|p| p.buildings.iter())
            .map(|b| b.id.0 + 1)
            .max()
            .unwrap_or(1);
        let next_fleet_id = world.own_fleets.iter().map(|f| f.id.0 + 1).max().unwrap_or(1);

        Self {
            world,
            radar_key: config.radar_attribute.clone(),
            military_spaceport_id: config.military_spaceport_id.clone(),
            positions: AHashMap::new(),
            fleet_ships: AHashMap::new(),
            next_building_id,
            next_fleet_id,
            events: Vec::new(),
        }
    }

    /// Where fleets created at this planet appear
    pub fn set_planet_position(&mut self, planet: PlanetId, x: f64, y: f64) {
        self.positions.insert(planet, (x, y));
    }

    pub fn world(&self) -> &AiWorld {
        &self.world
    }

    pub fn into_world(self) -> AiWorld {
        self.world
    }

    pub fn set_turn_seed(&mut self, seed: u64) {
        self.world.turn_seed = seed;
    }

    /// Start the next turn: fleets stop and the random seed moves on
    pub fn next_turn(&mut self) {
        for fleet in &mut self.world.own_fleets {
            fleet.moving = false;
        }
        self.world.turn_seed = self.world.turn_seed.wrapping_add(1);
    }

    pub fn drain_events(&mut self) -> Vec<SandboxEvent> {
        std::mem::take(&mut self.events)
    }

    fn reject(&mut self, reason: String) {
        tracing::warn!(%reason, "Sandbox rejected action");
        self.events.push(SandboxEvent::Rejected { reason });
    }

    fn research(&self, id: &ResearchId) -> Option<Arc<ResearchType>> {
        self.world
            .available_research
            .iter()
            .chain(self.world.inventory.iter().map(|(rt, _)| rt))
            .find(|rt| &rt.id == id)
            .cloned()
    }

    fn fleet_mut(&mut self, fleet: FleetId) -> Option<&mut AiFleet> {
        self.world.own_fleets.iter_mut().find(|f| f.id == fleet)
    }

    /// Clear the fog within the fleet's radar range of its cell
    fn reveal_around(&mut self, x: f64, y: f64, radar: i32) -> usize {
        let map = &mut self.world.exploration;
        let center = map.cell_at(x, y);
        let reach = (radar - 1).max(0);
        let mut revealed = 0;
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                if map.remove(&center.delta(dx, dy)) {
                    revealed += 1;
                }
            }
        }
        revealed
    }
}

fn all_planets(world: &AiWorld) -> impl Iterator<Item = &AiPlanet> {
    world
        .own_planets
        .iter()
        .chain(world.foreign_planets.iter())
        .chain(world.unknown_planets.iter())
}

impl Controls for Sandbox {
    fn move_fleet(&mut self, fleet: FleetId, x: f64, y: f64) {
        let Some(f) = self.fleet_mut(fleet) else {
            return self.reject(format!("unknown fleet {}", fleet.0));
        };
        f.x = x;
        f.y = y;
        f.moving = true;
        let radar = f.radar;

        let cells_revealed = self.reveal_around(x, y, radar);
        self.events.push(SandboxEvent::FleetArrived { fleet, cells_revealed });
    }

    fn deploy_satellite(&mut self, planet: PlanetId, satellite: &ResearchId) {
        let Some(research) = self.research(satellite) else {
            return self.reject(format!("unknown satellite {satellite}"));
        };
        let player = self.world.player;
        let Some(target) = self.world.unknown_planets.iter_mut().find(|p| p.id == planet) else {
            return self.reject(format!("planet {} is not unknown", planet.0));
        };
        if self.world.inventory.take(satellite, 1) == 0 {
            return self.reject(format!("no {satellite} in stock"));
        }
        target.inventory.retain(|item| item.owner != player);
        target.inventory.push(AiInventoryItem { owner: player, research, count: 1 });
        self.events.push(SandboxEvent::SatelliteDeployed { planet, satellite: satellite.clone() });
    }

    fn repair_building(&mut self, planet: PlanetId, building: BuildingId, repair: bool) {
        let Some(b) = self
            .world
            .own_planets
            .iter_mut()
            .find(|p| p.id == planet)
            .and_then(|p| p.buildings.iter_mut().find(|b| b.id == building))
        else {
            return self.reject(format!("no building {} on planet {}", building.0, planet.0));
        };
        if repair {
            b.damaged = false;
            b.repairing = false;
            self.events.push(SandboxEvent::BuildingRepaired { planet, building });
        } else {
            b.repairing = false;
        }
    }

    fn place_building(&mut self, planet: PlanetId, building_type: &str) {
        let Some(kind) = self.world.buildings.get(building_type).cloned() else {
            return self.reject(format!("unknown building type {building_type}"));
        };
        if kind.cost > self.world.money {
            return self.reject(format!("cannot afford {building_type}"));
        }

        let id = BuildingId(self.next_building_id);
        let Some(target) = self.world.own_planets.iter_mut().find(|p| p.id == planet) else {
            return self.reject(format!("planet {} not owned", planet.0));
        };
        if !target.has_room_for(&kind) {
            let reason = format!("no room for {building_type} on {}", target.name);
            return self.reject(reason);
        }
        target.free_surface -= kind.footprint();
        target.buildings.push(AiBuilding::operational(id, &kind.id));

        self.next_building_id += 1;
        self.world.money -= kind.cost;
        if kind.id == self.military_spaceport_id {
            self.world.global.has_military_spaceport = true;
        }
        self.events.push(SandboxEvent::BuildingPlaced {
            planet,
            building: id,
            building_type: kind.id,
        });
    }

    fn demolish_building(&mut self, planet: PlanetId, building: BuildingId) {
        let Some(target) = self.world.own_planets.iter_mut().find(|p| p.id == planet) else {
            return self.reject(format!("planet {} not owned", planet.0));
        };
        let Some(index) = target.buildings.iter().position(|b| b.id == building) else {
            return self.reject(format!("no building {} on planet {}", building.0, planet.0));
        };
        let removed = target.buildings.remove(index);
        target.free_surface += self.world.buildings.get(&removed.type_id).map_or(0, |b| b.footprint());
        if removed.is_type(&self.military_spaceport_id) {
            self.world.global.has_military_spaceport = false;
        }
        self.events.push(SandboxEvent::BuildingDemolished { planet, building });
    }

    fn create_fleet(&mut self, name: &str, planet: PlanetId) -> FleetId {
        let id = FleetId(self.next_fleet_id);
        self.next_fleet_id += 1;

        let (x, y) = self.positions.get(&planet).copied().unwrap_or((0.0, 0.0));
        let mut fleet = AiFleet::new(id, x, y);
        fleet.name = name.to_string();
        self.world.own_fleets.push(fleet);
        self.events.push(SandboxEvent::FleetCreated { fleet: id, planet });
        id
    }

    fn add_fleet_inventory(&mut self, fleet: FleetId, research: &ResearchId, count: u32) {
        let Some(ship) = self.research(research) else {
            return self.reject(format!("unknown ship {research}"));
        };
        if !self.world.own_fleets.iter().any(|f| f.id == fleet) {
            return self.reject(format!("unknown fleet {}", fleet.0));
        }
        if self.world.inventory.count(research) < count {
            return self.reject(format!("not enough {research} in stock"));
        }
        self.world.inventory.take(research, count);

        let radar = ship.fixed_radar(&self.radar_key).unwrap_or(0);
        let speed = ship.get_int("speed", 1);
        let Some(f) = self.fleet_mut(fleet) else {
            return;
        };
        f.radar = f.radar.max(radar);
        f.speed = f.speed.max(speed);
        self.fleet_ships.insert(fleet, ship);
        self.events.push(SandboxEvent::ShipAdded { fleet, ship: research.clone() });
    }

    fn upgrade_all(&mut self, fleet: FleetId) {
        let Some(ship) = self.fleet_ships.get(&fleet).cloned() else {
            return;
        };
        let radar_key = self.radar_key.clone();
        let inventory = &self.world.inventory;

        // Strongest stocked radar any open slot takes
        let best = select::max_by_strict(
            ship.slots
                .iter()
                .filter(|slot| !slot.fixed)
                .flat_map(|slot| slot.items.iter())
                .filter(|item| item.has(&radar_key) && inventory.count(&item.id) > 0),
            |item| item.get_int(&radar_key, 0),
        )
        .cloned();

        let Some(radar) = best else {
            return;
        };
        let strength = radar.get_int(&radar_key, 0);
        let current = self.fleet_mut(fleet).map(|f| f.radar).unwrap_or(0);
        if strength <= current {
            return;
        }

        self.world.inventory.take(&radar.id, 1);
        if let Some(f) = self.fleet_mut(fleet) {
            f.radar = strength;
        }
        self.events.push(SandboxEvent::RadarFitted { fleet, radar: strength });
    }

    fn place_production_order(&mut self, research: &ResearchId, quantity: u32) {
        let Some(rt) = self.research(research) else {
            return self.reject(format!("unknown research {research}"));
        };
        self.world.money -= rt.production_cost * i64::from(quantity);
        self.world.inventory.add(rt, quantity);
        self.events.push(SandboxEvent::Produced { research: research.clone(), quantity });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::action::{Action, ActionQueue};
    use crate::core::types::{Location, PlayerId};
    use crate::world::catalog::BuildingType;
    use crate::world::research::{EquipmentSlot, ResearchCategory};
    use crate::world::snapshot::ExplorationMap;

    const ME: PlayerId = PlayerId(1);

    fn world() -> AiWorld {
        let mut world = AiWorld::new(ME, 10);
        world.money = 5000;
        world.buildings.insert(BuildingType::new("MilitarySpaceport", 2000, 2, 2));
        world.own_planets.push(AiPlanet::new(PlanetId(1), "Home").owned_by(ME).with_free_surface(6));
        world
    }

    #[test]
    fn test_move_reveals_cells_in_radar_range() {
        let mut world = world();
        world.exploration = ExplorationMap::with_cells(
            10,
            [Location::of(0, 0), Location::of(1, 1), Location::of(2, 2), Location::of(5, 5)],
        );
        world.own_fleets.push(AiFleet::new(FleetId(1), 0.0, 0.0).with_radar(2).with_speed(4));

        let mut sandbox = Sandbox::new(world, &DiscoveryConfig::default());
        sandbox.move_fleet(FleetId(1), 15.0, 15.0);

        assert_eq!(
            sandbox.drain_events(),
            vec![SandboxEvent::FleetArrived { fleet: FleetId(1), cells_revealed: 3 }]
        );
        assert_eq!(sandbox.world().exploration.len(), 1);
        assert!(sandbox.world().own_fleets[0].moving);

        sandbox.next_turn();
        assert!(!sandbox.world().own_fleets[0].moving);
        assert_eq!(sandbox.world().turn_seed, 1);
    }

    #[test]
    fn test_place_military_spaceport_sets_flag() {
        let mut sandbox = Sandbox::new(world(), &DiscoveryConfig::default());
        sandbox.place_building(PlanetId(1), "MilitarySpaceport");

        let world = sandbox.world();
        assert!(world.global.has_military_spaceport);
        assert_eq!(world.money, 3000);
        assert_eq!(world.own_planets[0].free_surface, 2);
        assert!(world.own_planets[0].find_building("MilitarySpaceport").unwrap().is_ready());
    }

    #[test]
    fn test_create_fleet_fits_stocked_radar() {
        let radar = Arc::new(
            ResearchType::new("Radar1", ResearchCategory::EquipmentRadars, 100).with_attribute("radar", 2),
        );
        let hull = Arc::new(
            ResearchType::new("Hull", ResearchCategory::SpaceshipsCruisers, 500)
                .with_attribute("speed", 6)
                .with_slot(EquipmentSlot::open("r", vec![radar.clone()])),
        );
        let mut world = world();
        world.inventory.add(radar.clone(), 1);
        world.inventory.add(hull, 1);

        let mut sandbox = Sandbox::new(world, &DiscoveryConfig::default());
        sandbox.set_planet_position(PlanetId(1), 40.0, 60.0);

        let mut queue = ActionQueue::new();
        queue.push(Action::CreateFleet { name: "Discovery fleet".into(), planet: PlanetId(1), ship: ResearchId::new("Hull") });
        queue.execute_all(&mut sandbox);

        let fleet = &sandbox.world().own_fleets[0];
        assert_eq!((fleet.x, fleet.y), (40.0, 60.0));
        assert_eq!(fleet.radar, 2);
        assert_eq!(fleet.speed, 6);
        assert_eq!(sandbox.world().inventory.count(&radar.id), 0);
    }

    fn satellite_stock() -> AiWorld {
        let mut world = world();
        let satellite = Arc::new(ResearchType::new("Satellite1", ResearchCategory::SpaceshipsSatellites, 400));
        world.inventory.add(satellite, 1);
        world.unknown_planets.push(AiPlanet::new(PlanetId(7), "Zeta"));
        world
    }

    #[test]
    fn test_rejected_satellite_stays_in_stock() {
        let mut sandbox = Sandbox::new(satellite_stock(), &DiscoveryConfig::default());
        let satellite = ResearchId::new("Satellite1");

        sandbox.deploy_satellite(PlanetId(42), &satellite);
        assert!(matches!(sandbox.drain_events()[0], SandboxEvent::Rejected { .. }));
        assert_eq!(sandbox.world().inventory.count(&satellite), 1);

        sandbox.deploy_satellite(PlanetId(7), &satellite);
        assert_eq!(
            sandbox.drain_events(),
            vec![SandboxEvent::SatelliteDeployed { planet: PlanetId(7), satellite: satellite.clone() }]
        );
        assert_eq!(sandbox.world().inventory.count(&satellite), 0);
        assert!(sandbox.world().unknown_planets[0].inventory.iter().any(|item| item.owner == ME));
    }

    #[test]
    fn test_rejected_ship_stays_in_stock() {
        let hull = Arc::new(ResearchType::new("Hull", ResearchCategory::SpaceshipsCruisers, 500));
        let mut world = world();
        world.inventory.add(hull.clone(), 1);
        world.own_fleets.push(AiFleet::new(FleetId(1), 0.0, 0.0));
        let mut sandbox = Sandbox::new(world, &DiscoveryConfig::default());

        sandbox.add_fleet_inventory(FleetId(99), &hull.id, 1);
        assert_eq!(sandbox.world().inventory.count(&hull.id), 1);

        // a shortfall leaves the partial stock alone
        sandbox.add_fleet_inventory(FleetId(1), &hull.id, 2);
        assert_eq!(sandbox.world().inventory.count(&hull.id), 1);

        let events = sandbox.drain_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| matches!(e, SandboxEvent::Rejected { .. })));
    }

    #[test]
    fn test_upgrade_keeps_first_of_equal_radars() {
        let first = Arc::new(
            ResearchType::new("RadarA", ResearchCategory::EquipmentRadars, 100).with_attribute("radar", 2),
        );
        let second = Arc::new(
            ResearchType::new("RadarB", ResearchCategory::EquipmentRadars, 100).with_attribute("radar", 2),
        );
        let hull = Arc::new(
            ResearchType::new("Hull", ResearchCategory::SpaceshipsCruisers, 500)
                .with_slot(EquipmentSlot::open("r", vec![first.clone(), second.clone()])),
        );
        let mut world = world();
        world.inventory.add(first.clone(), 1);
        world.inventory.add(second.clone(), 1);
        world.inventory.add(hull.clone(), 1);
        let mut sandbox = Sandbox::new(world, &DiscoveryConfig::default());

        let fleet = sandbox.create_fleet("Discovery fleet", PlanetId(1));
        sandbox.add_fleet_inventory(fleet, &hull.id, 1);
        sandbox.upgrade_all(fleet);

        assert_eq!(sandbox.world().inventory.count(&first.id), 0);
        assert_eq!(sandbox.world().inventory.count(&second.id), 1);
    }

    #[test]
    fn test_unknown_fleet_is_rejected() {
        let mut sandbox = Sandbox::new(world(), &DiscoveryConfig::default());
        sandbox.move_fleet(FleetId(99), 1.0, 1.0);
        assert!(matches!(sandbox.drain_events()[0], SandboxEvent::Rejected { .. }));
    }
}
