//! Discovery planner integration tests

use std::path::Path;
use std::sync::Arc;

use imperium_ai::ai::{run_turn, Action, ActionQueue, DiscoveryPlanner, PlanOutcome, Planner, RecordingControls};
use imperium_ai::core::config::{AiConfig, DiscoveryConfig};
use imperium_ai::core::types::{FleetId, Location, PlanetId, PlayerId, ResearchId};
use imperium_ai::scenario::{load_from_file, sandbox_from_str};
use imperium_ai::world::{AiFleet, AiPlanet, AiWorld, BuildingType, ExplorationMap, ResearchCategory, ResearchType};

const ME: PlayerId = PlayerId(1);

fn planner() -> DiscoveryPlanner {
    DiscoveryPlanner::new(DiscoveryConfig::default())
}

fn frontier_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/scenarios/frontier.toml")
}

#[test]
fn test_idle_fleet_targets_cell_center() {
    let mut world = AiWorld::new(ME, 10);
    world.exploration = ExplorationMap::with_cells(10, [Location::of(2, 3)]);
    world.own_fleets.push(AiFleet::new(FleetId(1), 25.0, 25.0).with_speed(5).with_radar(10));
    world.own_fleets.push(AiFleet::new(FleetId(2), 25.0, 25.0).with_speed(5).with_radar(10).moving());

    let mut queue = ActionQueue::new();
    let outcome = planner().plan(&world, &mut queue).unwrap();

    assert_eq!(outcome, PlanOutcome::Acted("explore"));
    assert_eq!(queue.drain(), vec![Action::MoveFleet { fleet: FleetId(1), x: 25.0, y: 35.0 }]);
}

#[test]
fn test_spaceport_placed_on_an_eligible_planet() {
    let mut world = AiWorld::new(ME, 10);
    world.exploration.insert(Location::of(0, 0));
    world.money = 3000;
    world.buildings.insert(BuildingType::new("MilitarySpaceport", 2000, 2, 2));
    for id in 1..=4 {
        world.own_planets.push(AiPlanet::new(PlanetId(id), format!("Colony {id}")).owned_by(ME).with_free_surface(4));
    }

    // Different seeds may pick different planets; the building type never changes
    for seed in 0..16 {
        world.turn_seed = seed;
        let mut queue = ActionQueue::new();
        planner().plan(&world, &mut queue).unwrap();

        let actions = queue.drain();
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::PlaceBuilding { planet, building_type } => {
                assert!((1..=4).contains(&planet.0));
                assert_eq!(building_type, "MilitarySpaceport");
            }
            other => panic!("expected PlaceBuilding, got {:?}", other),
        }
    }
}

#[test]
fn test_unaffordable_spaceport_falls_through_to_satellites() {
    let mut world = AiWorld::new(ME, 10);
    world.exploration.insert(Location::of(0, 0));
    world.money = 100;
    world.buildings.insert(BuildingType::new("MilitarySpaceport", 2000, 2, 2));
    world.own_planets.push(AiPlanet::new(PlanetId(1), "Home").owned_by(ME).with_free_surface(10));
    world.available_research.push(Arc::new(
        ResearchType::new("Satellite1", ResearchCategory::SpaceshipsSatellites, 400).with_attribute("detector", 1),
    ));
    world.unknown_planets.push(AiPlanet::new(PlanetId(9), "Zeta"));

    let mut queue = ActionQueue::new();
    let outcome = planner().plan(&world, &mut queue).unwrap();

    assert_eq!(outcome, PlanOutcome::Acted("satellites"));
    assert_eq!(
        queue.drain(),
        vec![Action::PlaceProductionOrder { research: ResearchId::new("Satellite1"), quantity: 10 }]
    );
}

#[test]
fn test_repeated_planning_is_idempotent() {
    let world = load_from_file(&frontier_path()).unwrap();

    let mut first = ActionQueue::new();
    let mut second = ActionQueue::new();
    planner().plan(&world, &mut first).unwrap();
    planner().plan(&world, &mut second).unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first.drain(), second.drain());
}

#[test]
fn test_run_turn_collects_actions_from_every_planner() {
    let world = load_from_file(&frontier_path()).unwrap();
    let planners: Vec<Box<dyn Planner>> = vec![Box::new(planner()), Box::new(planner())];

    let mut queue = ActionQueue::new();
    let outcomes = run_turn(&planners, &world, &mut queue).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(queue.len(), 2);

    let mut controls = RecordingControls::default();
    assert_eq!(queue.execute_all(&mut controls), 2);
    assert_eq!(controls.calls.len(), 2);
}

#[test]
fn test_frontier_campaign_builds_an_explorer_and_explores() {
    let content = std::fs::read_to_string(frontier_path()).unwrap();
    let config = AiConfig::new();
    let mut sandbox = sandbox_from_str(&content, &config.discovery).unwrap();
    let planner = DiscoveryPlanner::new(config.discovery.clone());

    let initial_cells = sandbox.world().exploration.len();
    let mut strategies = Vec::new();
    for _ in 0..40 {
        let mut queue = ActionQueue::new();
        let outcome = planner.plan(sandbox.world(), &mut queue).unwrap();
        assert!(queue.len() <= 1, "at most one action per call");
        queue.execute_all(&mut sandbox);
        sandbox.drain_events();
        strategies.push(outcome);
        sandbox.next_turn();
    }

    let world = sandbox.into_world();
    assert!(world.global.has_military_spaceport);
    assert!(!world.own_fleets.is_empty(), "a discovery fleet was deployed");
    assert!(world.exploration.len() < initial_cells);
    assert!(strategies.contains(&PlanOutcome::Acted("explore")));
}
