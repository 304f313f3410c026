//! Scenario file loading tests

use std::path::Path;

use imperium_ai::core::error::AiError;
use imperium_ai::core::types::{Location, PlayerId, ResearchId};
use imperium_ai::scenario::{load_from_file, load_from_str};

#[test]
fn test_frontier_scenario_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenarios/frontier.toml");
    let world = load_from_file(&path).unwrap();

    assert_eq!(world.player, PlayerId(1));
    assert_eq!(world.exploration.cell_size, 10);
    assert!(world.exploration.contains(&Location::of(9, 9)));
    assert!(!world.global.has_military_spaceport);
    assert!(world.own_fleets.is_empty());
    assert_eq!(world.own_planets.len(), 1);
    assert_eq!(world.foreign_planets.len(), 1);
    assert_eq!(world.unknown_planets.len(), 2);
    assert_eq!(world.available_research.len(), 6);

    let cruiser = world
        .available_research
        .iter()
        .find(|rt| rt.id == ResearchId::new("Cruiser1"))
        .unwrap();
    assert!(cruiser.is_cruiser());
    assert!(cruiser.open_slots_accept(&ResearchId::new("Radar2")));
    assert_eq!(cruiser.name, "Destroyer");
}

#[test]
fn test_slot_item_must_be_declared_first() {
    let content = r#"
        player = 1

        [[research]]
        id = "Cruiser1"
        category = "SpaceshipsCruisers"
        slots = [{ id = "radar", items = ["Radar1"] }]

        [[research]]
        id = "Radar1"
        category = "EquipmentRadars"
    "#;
    assert!(matches!(load_from_str(content), Err(AiError::MissingResearchType(id)) if id == "Radar1"));
}

#[test]
fn test_orbit_references_are_resolved() {
    let content = r#"
        player = 1

        [[research]]
        id = "Satellite1"
        category = "SpaceshipsSatellites"
        attributes = { detector = 1 }

        [[planets]]
        id = 7
        name = "Watched"
        relation = "unknown"
        owner = 3
        orbit = [{ owner = 1, research = "Satellite1" }]
    "#;
    let world = load_from_str(content).unwrap();
    let planet = &world.unknown_planets[0];
    assert_eq!(planet.inventory[0].count, 1);
    assert!(planet.deployed_satellite(PlayerId(1), "detector").is_some());
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_from_file(Path::new("does/not/exist.toml"));
    assert!(matches!(result, Err(AiError::IoError(_))));
}
