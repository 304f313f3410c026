//! Discovery planner simulation
//!
//! Loads a scenario, then alternates planning and sandbox execution for a
//! number of turns, reporting what the planner decided each turn.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use imperium_ai::ai::{Action, ActionQueue, DiscoveryPlanner, PlanOutcome, Planner};
use imperium_ai::core::config::{load_config, AiConfig};
use imperium_ai::core::error::Result;
use imperium_ai::scenario::{sandbox_from_str, SandboxEvent};

/// Run the discovery planner against a scenario file
#[derive(Parser, Debug)]
#[command(name = "discovery_sim")]
#[command(about = "Watch the discovery planner explore a scenario")]
struct Args {
    /// Scenario TOML file
    #[arg(default_value = "data/scenarios/frontier.toml")]
    scenario: PathBuf,

    /// AI tuning file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of AI turns to simulate
    #[arg(long, default_value_t = 20)]
    turns: u32,

    /// Override the scenario's turn seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the run as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TurnReport {
    turn: u32,
    strategy: &'static str,
    actions: Vec<Action>,
    events: Vec<SandboxEvent>,
    unexplored: usize,
    money: i64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("imperium_ai=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AiConfig::new(),
    };
    config.validate()?;

    let content = std::fs::read_to_string(&args.scenario)?;
    let mut sandbox = sandbox_from_str(&content, &config.discovery)?;
    if let Some(seed) = args.seed {
        sandbox.set_turn_seed(seed);
    }

    tracing::info!(scenario = %args.scenario.display(), turns = args.turns, "Starting discovery simulation");

    let planner = DiscoveryPlanner::new(config.discovery.clone());
    let mut reports = Vec::with_capacity(args.turns as usize);

    for turn in 1..=args.turns {
        let mut queue = ActionQueue::new();
        let outcome = planner.plan(sandbox.world(), &mut queue)?;
        let actions: Vec<Action> = queue.iter().cloned().collect();
        queue.execute_all(&mut sandbox);

        reports.push(TurnReport {
            turn,
            strategy: match outcome {
                PlanOutcome::Acted(strategy) => strategy,
                PlanOutcome::Idle => "idle",
            },
            actions,
            events: sandbox.drain_events(),
            unexplored: sandbox.world().exploration.len(),
            money: sandbox.world().money,
        });
        sandbox.next_turn();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!(
            "Turn {:>3} [{:<10}] unexplored={:<3} money={}",
            report.turn, report.strategy, report.unexplored, report.money
        );
        for action in &report.actions {
            println!("    -> {:?}", action);
        }
        for event in &report.events {
            println!("       {:?}", event);
        }
    }

    let idle = reports.iter().filter(|r| r.strategy == "idle").count();
    println!("\n{} turns, {} idle, {} cells left unexplored", reports.len(), idle, sandbox.world().exploration.len());
    Ok(())
}
