//! Build `AiWorld` snapshots from scenario files

use ahash::AHashMap;
use std::path::Path;
use std::sync::Arc;

use super::format::{PlanetDef, PlanetRelation, ResearchDef, ScenarioFile};
use crate::core::error::{AiError, Result};
use crate::core::types::{BuildingId, FleetId, Location, PlanetId, PlayerId};
use crate::world::catalog::BuildingType;
use crate::world::fleet::AiFleet;
use crate::world::planet::{AiBuilding, AiPlanet};
use crate::world::research::{EquipmentSlot, ResearchType};
use crate::world::snapshot::AiWorld;

/// Research definitions resolved so far, by id
type ResearchIndex = AHashMap<String, Arc<ResearchType>>;

/// Parse a scenario from TOML text
pub fn load_from_str(content: &str) -> Result<AiWorld> {
    let file: ScenarioFile = toml::from_str(content)?;
    build_world(&file)
}

/// Load a scenario file from disk
pub fn load_from_file(path: &Path) -> Result<AiWorld> {
    let content = std::fs::read_to_string(path)?;
    let world = load_from_str(&content)?;
    tracing::info!(
        path = %path.display(),
        fleets = world.own_fleets.len(),
        planets = world.own_planets.len(),
        cells = world.exploration.len(),
        "Loaded scenario"
    );
    Ok(world)
}

/// Resolve every id reference and assemble the snapshot
pub fn build_world(file: &ScenarioFile) -> Result<AiWorld> {
    if file.exploration_cell_size == 0 {
        return Err(AiError::InvalidScenario("exploration_cell_size must be > 0".into()));
    }

    let player = PlayerId(file.player);
    let mut world = AiWorld::new(player, file.exploration_cell_size);
    world.money = file.money;
    world.turn_seed = file.turn_seed;
    world.global.has_military_spaceport = file.has_military_spaceport;

    let research = resolve_research(&file.research)?;

    for id in &file.available_research {
        world.available_research.push(lookup(&research, id)?);
    }
    for stock in &file.inventory {
        world.inventory.add(lookup(&research, &stock.research)?, stock.count);
    }
    for building in &file.buildings {
        world
            .buildings
            .insert(BuildingType::new(&building.id, building.cost, building.width, building.height));
    }
    for [x, y] in &file.exploration {
        world.exploration.insert(Location::of(*x, *y));
    }

    for def in &file.fleets {
        let mut fleet = AiFleet::new(FleetId(def.id), def.x, def.y)
            .with_speed(def.speed)
            .with_radar(def.radar);
        if let Some(name) = &def.name {
            fleet.name = name.clone();
        }
        fleet.moving = def.moving;
        world.own_fleets.push(fleet);
    }

    for def in &file.planets {
        let planet = build_planet(def, &research)?;
        match relation_of(def, player) {
            PlanetRelation::Own => world.own_planets.push(planet),
            PlanetRelation::Foreign => world.foreign_planets.push(planet),
            PlanetRelation::Unknown => world.unknown_planets.push(planet),
        }
    }

    Ok(world)
}

fn lookup(research: &ResearchIndex, id: &str) -> Result<Arc<ResearchType>> {
    research
        .get(id)
        .cloned()
        .ok_or_else(|| AiError::MissingResearchType(id.to_string()))
}

fn resolve_research(defs: &[ResearchDef]) -> Result<ResearchIndex> {
    let mut index = ResearchIndex::new();
    for def in defs {
        if index.contains_key(&def.id) {
            return Err(AiError::InvalidScenario(format!("duplicate research {}", def.id)));
        }

        let mut rt = ResearchType::new(&def.id, def.category, def.cost);
        if let Some(name) = &def.name {
            rt.name = name.clone();
        }
        for (key, value) in &def.attributes {
            rt = rt.with_attribute(key, *value);
        }
        for slot in &def.slots {
            let items = slot
                .items
                .iter()
                .map(|id| lookup(&index, id))
                .collect::<Result<Vec<_>>>()?;
            let slot = if slot.fixed {
                EquipmentSlot { id: slot.id.clone(), fixed: true, items }
            } else {
                EquipmentSlot::open(&slot.id, items)
            };
            rt = rt.with_slot(slot);
        }
        index.insert(def.id.clone(), Arc::new(rt));
    }
    Ok(index)
}

fn relation_of(def: &PlanetDef, player: PlayerId) -> PlanetRelation {
    def.relation.unwrap_or(match def.owner {
        Some(owner) if PlayerId(owner) == player => PlanetRelation::Own,
        Some(_) => PlanetRelation::Foreign,
        None => PlanetRelation::Unknown,
    })
}

fn build_planet(def: &PlanetDef, research: &ResearchIndex) -> Result<AiPlanet> {
    let mut planet = AiPlanet::new(PlanetId(def.id), &def.name).with_free_surface(def.free_surface);
    planet.owner = def.owner.map(PlayerId);

    for b in &def.buildings {
        planet = planet.with_building(AiBuilding {
            id: BuildingId(b.id),
            type_id: b.type_id.clone(),
            damaged: b.damaged,
            repairing: b.repairing,
            operational: b.operational,
        });
    }
    for item in &def.orbit {
        planet = planet.with_orbit(PlayerId(item.owner), lookup(research, &item.research)?, item.count);
    }
    Ok(planet)
}
