//! Planets, their buildings and orbital inventory

use std::sync::Arc;

use super::catalog::BuildingType;
use super::research::{ResearchCategory, ResearchType};
use crate::core::types::{BuildingId, PlanetId, PlayerId};

/// A building placed on a planet surface
#[derive(Debug, Clone)]
pub struct AiBuilding {
    pub id: BuildingId,
    pub type_id: String,
    pub damaged: bool,
    pub repairing: bool,
    /// Complete, powered and staffed
    pub operational: bool,
}

impl AiBuilding {
    /// A finished, undamaged, working building
    pub fn operational(id: BuildingId, type_id: impl Into<String>) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            damaged: false,
            repairing: false,
            operational: true,
        }
    }

    /// A building still being constructed
    pub fn under_construction(id: BuildingId, type_id: impl Into<String>) -> Self {
        Self {
            operational: false,
            ..Self::operational(id, type_id)
        }
    }

    pub fn damaged(mut self) -> Self {
        self.damaged = true;
        self
    }

    pub fn repairing(mut self) -> Self {
        self.repairing = true;
        self
    }

    pub fn is_type(&self, type_id: &str) -> bool {
        self.type_id == type_id
    }

    /// Usable right now: neither damaged nor offline
    pub fn is_ready(&self) -> bool {
        !self.damaged && self.operational
    }
}

/// Something in orbit around a planet (satellites, stations)
#[derive(Debug, Clone)]
pub struct AiInventoryItem {
    pub owner: PlayerId,
    pub research: Arc<ResearchType>,
    pub count: u32,
}

/// A planet as seen by the AI
#[derive(Debug, Clone)]
pub struct AiPlanet {
    pub id: PlanetId,
    pub name: String,
    pub owner: Option<PlayerId>,
    pub buildings: Vec<AiBuilding>,
    pub inventory: Vec<AiInventoryItem>,
    /// Free surface cells available for new buildings
    pub free_surface: u32,
}

impl AiPlanet {
    pub fn new(id: PlanetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner: None,
            buildings: Vec::new(),
            inventory: Vec::new(),
            free_surface: 0,
        }
    }

    pub fn owned_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_building(mut self, building: AiBuilding) -> Self {
        self.buildings.push(building);
        self
    }

    pub fn with_free_surface(mut self, cells: u32) -> Self {
        self.free_surface = cells;
        self
    }

    pub fn with_orbit(mut self, owner: PlayerId, research: Arc<ResearchType>, count: u32) -> Self {
        self.inventory.push(AiInventoryItem { owner, research, count });
        self
    }

    /// Whether a building of this type fits on the free surface
    pub fn has_room_for(&self, building: &BuildingType) -> bool {
        self.free_surface >= building.footprint()
    }

    /// First building of the given type
    pub fn find_building(&self, type_id: &str) -> Option<&AiBuilding> {
        self.buildings.iter().find(|b| b.is_type(type_id))
    }

    /// The player's satellite currently in orbit, if any
    ///
    /// When several qualify the last one listed wins.
    pub fn deployed_satellite(&self, player: PlayerId, detector_key: &str) -> Option<&AiInventoryItem> {
        self.inventory
            .iter()
            .filter(|item| {
                item.owner == player
                    && item.research.has(detector_key)
                    && item.research.category == ResearchCategory::SpaceshipsSatellites
            })
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satellite(id: &str, detector: i32) -> Arc<ResearchType> {
        Arc::new(
            ResearchType::new(id, ResearchCategory::SpaceshipsSatellites, 500)
                .with_attribute("detector", detector),
        )
    }

    #[test]
    fn test_has_room_for() {
        let spaceport = BuildingType::new("MilitarySpaceport", 2000, 3, 2);
        let planet = AiPlanet::new(PlanetId(1), "Achilles").with_free_surface(6);
        assert!(planet.has_room_for(&spaceport));
        let cramped = planet.clone().with_free_surface(5);
        assert!(!cramped.has_room_for(&spaceport));
    }

    #[test]
    fn test_building_states() {
        let ready = AiBuilding::operational(BuildingId(1), "MilitarySpaceport");
        assert!(ready.is_ready());
        assert!(!ready.clone().damaged().is_ready());
        assert!(!AiBuilding::under_construction(BuildingId(2), "MilitarySpaceport").is_ready());
    }

    #[test]
    fn test_deployed_satellite_ignores_other_owners() {
        let me = PlayerId(1);
        let them = PlayerId(2);
        let planet = AiPlanet::new(PlanetId(1), "Centronom")
            .with_orbit(them, satellite("SpySat2", 2), 1)
            .with_orbit(me, satellite("Satellite", 1), 1);

        let sat = planet.deployed_satellite(me, "detector").unwrap();
        assert_eq!(sat.research.id.as_str(), "Satellite");

        let other = AiPlanet::new(PlanetId(2), "Naxos").with_orbit(them, satellite("SpySat2", 2), 1);
        assert!(other.deployed_satellite(me, "detector").is_none());
    }
}
