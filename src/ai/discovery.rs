//! Starmap discovery and satellite planner
//!
//! Each call walks a fixed priority chain and queues at most one action:
//!
//! 1. `explore` - send the fastest idle radar fleet to the nearest
//!    unexplored cell, or else work towards a discovery fleet
//!    (spaceport, then radar equipment, then deployment).
//! 2. `satellites` - put a better satellite over the first planet that
//!    could use one, or order satellites when none are in stock.
//!
//! The planner keeps no state between calls; random choices are seeded
//! from the snapshot, so an unchanged snapshot yields the same action.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::ai::action::{Action, ActionQueue};
use crate::ai::chain::{PlannerChain, Step};
use crate::ai::select;
use crate::ai::{PlanOutcome, Planner};
use crate::core::config::{self, DiscoveryConfig};
use crate::core::error::Result;
use crate::world::planet::AiPlanet;
use crate::world::research::{ResearchCategory, ResearchType};
use crate::world::snapshot::AiWorld;

/// Planner that explores the starmap and watches planets with satellites
#[derive(Debug, Clone)]
pub struct DiscoveryPlanner {
    config: DiscoveryConfig,
}

impl DiscoveryPlanner {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }
}

impl Default for DiscoveryPlanner {
    fn default() -> Self {
        Self::new(config::config().discovery.clone())
    }
}

impl Planner for DiscoveryPlanner {
    fn name(&self) -> &'static str {
        "discovery"
    }

    fn plan(&self, world: &AiWorld, queue: &mut ActionQueue) -> Result<PlanOutcome> {
        let mut turn = DiscoveryTurn::new(world, &self.config);
        let chain = PlannerChain::new("discovery")
            .then("explore", DiscoveryTurn::explore)
            .then("satellites", DiscoveryTurn::deploy_satellites);

        Ok(match chain.run(&mut turn, queue)? {
            Some(strategy) => PlanOutcome::Acted(strategy),
            None => PlanOutcome::Idle,
        })
    }
}

/// Working state for one planning call
struct DiscoveryTurn<'w> {
    world: &'w AiWorld,
    config: &'w DiscoveryConfig,
    rng: ChaCha8Rng,
}

impl<'w> DiscoveryTurn<'w> {
    fn new(world: &'w AiWorld, config: &'w DiscoveryConfig) -> Self {
        Self {
            world,
            config,
            rng: ChaCha8Rng::seed_from_u64(world.turn_seed),
        }
    }

    fn radar_key(&self) -> &'w str {
        &self.config.radar_attribute
    }

    fn place_production_order(&self, queue: &mut ActionQueue, research: &ResearchType, quantity: u32) {
        tracing::debug!(research = %research.id, quantity, "Ordering production");
        queue.push(Action::production(research, quantity));
    }

    // === EXPLORATION ===

    fn explore(&mut self, queue: &mut ActionQueue) -> Result<Step> {
        let world = self.world;
        let map = &world.exploration;
        if map.is_empty() {
            return Ok(Step::Pass);
        }

        let explorer = select::fastest_idle_fleet(&world.own_fleets, self.config.fleet_radar_unit_size);
        if let Some(fleet) = explorer {
            if let Some(cell) = select::nearest_cell(fleet.x, fleet.y, map) {
                let (x, y) = cell.cell_center(map.cell_size);
                tracing::debug!(fleet = fleet.id.0, %cell, "Sending explorer to nearest unexplored cell");
                queue.push(Action::MoveFleet { fleet: fleet.id, x, y });
                return Ok(Step::Handled);
            }
        }

        // No explorer available: work towards a discovery fleet
        let queued_before = queue.len();
        let fleet_chain = PlannerChain::new("discovery_fleet")
            .then("military_spaceport", DiscoveryTurn::ensure_military_spaceport)
            .then("radar_equipment", DiscoveryTurn::ensure_equipment)
            .then("deploy_fleet", DiscoveryTurn::ensure_deployment);
        fleet_chain.run(self, queue)?;

        // Waiting on construction queues nothing; satellites may still act
        Ok(if queue.len() > queued_before { Step::Handled } else { Step::Pass })
    }

    fn ensure_military_spaceport(&mut self, queue: &mut ActionQueue) -> Result<Step> {
        let world = self.world;
        if world.global.has_military_spaceport {
            return Ok(Step::Pass);
        }

        let port_id = self.config.military_spaceport_id.as_str();

        // An existing spaceport only needs repair or time
        for planet in &world.own_planets {
            if let Some(port) = planet.find_building(port_id) {
                if port.damaged && !port.repairing {
                    queue.push(Action::RepairBuilding {
                        planet: planet.id,
                        building: port.id,
                        repair: true,
                    });
                } else {
                    tracing::debug!(planet = %planet.name, "Waiting for military spaceport");
                }
                return Ok(Step::Handled);
            }
        }

        let spaceport = world.buildings.find(port_id)?;
        if spaceport.cost > world.money {
            tracing::debug!(cost = spaceport.cost, money = world.money, "Cannot afford military spaceport");
            return Ok(Step::Pass);
        }

        let planets = select::shuffled(&world.own_planets, &mut self.rng);
        if let Some(planet) = planets.iter().find(|p| p.has_room_for(spaceport)) {
            queue.push(Action::PlaceBuilding {
                planet: planet.id,
                building_type: spaceport.id.clone(),
            });
            return Ok(Step::Handled);
        }

        // No room anywhere: make some by removing a traders spaceport
        let traders = self.config.traders_spaceport_id.as_str();
        for planet in &planets {
            if let Some(port) = planet.find_building(traders) {
                queue.push(Action::DemolishBuilding {
                    planet: planet.id,
                    building: port.id,
                });
                return Ok(Step::Handled);
            }
        }

        Ok(Step::Pass)
    }

    // === RADAR EQUIPMENT ===

    fn ensure_equipment(&mut self, queue: &mut ActionQueue) -> Result<Step> {
        let world = self.world;
        let radar_key = self.radar_key();

        if best_fixed_radar_ship(world.inventory.in_stock(), radar_key).is_some() {
            return Ok(Step::Pass);
        }

        // A hull with a built-in radar beats fitting radars by hand
        if let Some(ship) = best_fixed_radar_ship(world.available_research.iter(), radar_key) {
            self.place_production_order(queue, ship, self.config.ship_order_quantity);
            return Ok(Step::Handled);
        }

        let open_cruisers: Vec<&Arc<ResearchType>> = world
            .available_research
            .iter()
            .filter(|rt| rt.is_cruiser() && rt.has_open_slot())
            .collect();

        // A standalone radar must fit every open slot of every cruiser
        let radar = select::max_by_strict(
            world.available_research.iter().filter(|rt| {
                rt.category == ResearchCategory::EquipmentRadars
                    && rt.has(radar_key)
                    && open_cruisers.iter().all(|ship| ship.open_slots_accept(&rt.id))
            }),
            |rt| rt.get_int(radar_key, 0),
        );

        match radar {
            Some(radar) if world.inventory_count(&radar.id) > 0 => self.ensure_ship_for(queue, radar),
            Some(radar) => {
                self.place_production_order(queue, radar, self.config.radar_order_quantity);
                Ok(Step::Handled)
            }
            None => Ok(Step::Pass),
        }
    }

    /// Make sure some cruiser can carry the radar, ordering the cheapest hull
    fn ensure_ship_for(&mut self, queue: &mut ActionQueue, radar: &ResearchType) -> Result<Step> {
        let world = self.world;
        let carries = |rt: &ResearchType| rt.is_cruiser() && rt.supports(&radar.id);

        if world.inventory.in_stock().any(|rt| carries(rt.as_ref())) {
            return Ok(Step::Pass);
        }

        if let Some(ship) = select::cheapest(world.available_research.iter(), carries) {
            self.place_production_order(queue, ship, self.config.ship_order_quantity);
        }
        Ok(Step::Handled)
    }

    // === DEPLOYMENT ===

    fn ensure_deployment(&mut self, queue: &mut ActionQueue) -> Result<Step> {
        let world = self.world;
        let port_id = self.config.military_spaceport_id.as_str();

        let ports: Vec<&AiPlanet> = world
            .own_planets
            .iter()
            .filter(|p| p.buildings.iter().any(|b| b.is_type(port_id) && b.is_ready()))
            .collect();

        let Some(&deploy_at) = select::pick_random(&ports, &mut self.rng) else {
            return Ok(Step::Pass);
        };

        let radar_key = self.radar_key();
        let ship = best_fixed_radar_ship(world.inventory.in_stock(), radar_key)
            .or_else(|| best_open_radar_ship(world, radar_key));

        let Some(ship) = ship else {
            return Ok(Step::Pass);
        };

        queue.push(Action::CreateFleet {
            name: self.config.discovery_fleet_name.clone(),
            planet: deploy_at.id,
            ship: ship.id.clone(),
        });
        Ok(Step::Handled)
    }

    // === SATELLITES ===

    fn deploy_satellites(&mut self, queue: &mut ActionQueue) -> Result<Step> {
        let world = self.world;
        let detector = self.config.detector_attribute.as_str();

        let best_satellite = select::max_by_strict(
            world.inventory.in_stock().filter(|rt| {
                rt.category == ResearchCategory::SpaceshipsSatellites && rt.get_int(detector, 0) > 0
            }),
            |rt| rt.get_int(detector, 0),
        );

        for planet in &world.unknown_planets {
            match best_satellite {
                Some(satellite) => {
                    let current = planet.deployed_satellite(world.player, detector);
                    if let Some(current) = current {
                        if current.research.get_int(detector, 0) >= satellite.get_int(detector, 0) {
                            continue;
                        }
                    }
                    queue.push(Action::DeploySatellite {
                        planet: planet.id,
                        satellite: satellite.id.clone(),
                    });
                    return Ok(Step::Handled);
                }
                None => {
                    let research = select::max_by_strict(
                        world.available_research.iter().filter(|rt| rt.has(detector)),
                        |rt| rt.get_int(detector, 0),
                    );
                    if let Some(research) = research {
                        self.place_production_order(queue, research, self.config.satellite_order_quantity);
                        return Ok(Step::Handled);
                    }
                }
            }
        }

        Ok(Step::Pass)
    }
}

/// Cruiser with the strongest radar in a fixed slot
fn best_fixed_radar_ship<'a>(
    ships: impl Iterator<Item = &'a Arc<ResearchType>>,
    radar_key: &str,
) -> Option<&'a Arc<ResearchType>> {
    select::max_by_strict(
        ships
            .filter(|rt| rt.is_cruiser())
            .filter_map(|rt| rt.fixed_radar(radar_key).map(|radar| (rt, radar))),
        |(_, radar)| *radar,
    )
    .map(|(rt, _)| rt)
}

/// Stocked cruiser able to mount the strongest stocked radar
fn best_open_radar_ship<'a>(world: &'a AiWorld, radar_key: &str) -> Option<&'a Arc<ResearchType>> {
    let stocked_radar = |ship: &ResearchType| {
        ship.slots
            .iter()
            .flat_map(|slot| slot.items.iter())
            .filter(|item| item.has(radar_key) && world.inventory_count(&item.id) > 0)
            .map(|item| item.get_int(radar_key, 0))
            .max()
    };

    select::max_by_strict(
        world
            .inventory
            .in_stock()
            .filter(|rt| rt.is_cruiser())
            .filter_map(|rt| stocked_radar(rt).filter(|radar| *radar > 0).map(|radar| (rt, radar))),
        |(_, radar)| *radar,
    )
    .map(|(rt, _)| rt)
}
