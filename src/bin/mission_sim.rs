//! Spy report mission simulation
//!
//! Drives the quest hour by hour with a scripted player that either
//! follows the story after a fixed reaction delay or ignores it entirely.

use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use imperium_ai::core::config::{load_config, AiConfig};
use imperium_ai::core::error::Result;
use imperium_ai::core::types::Tick;
use imperium_ai::mission::spy_report::{self, SpyReportMission};
use imperium_ai::mission::{MissionEffect, MissionRunner, NarrativeState, ObjectiveState, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Script {
    /// Watch, talk, view the recording and read the report
    Complete,
    /// Never react; every deadline runs out
    Ignore,
}

/// Run the spy report quest with a scripted player
#[derive(Parser, Debug)]
#[command(name = "mission_sim")]
#[command(about = "Simulate the spy report mission")]
struct Args {
    /// How the simulated player behaves
    #[arg(long, value_enum, default_value_t = Script::Complete)]
    script: Script,

    /// AI tuning file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Game hour at which the mission becomes due
    #[arg(long, default_value_t = 12)]
    start: Tick,

    /// Hours the player waits before reacting to each step
    #[arg(long, default_value_t = 24)]
    response_hours: Tick,

    /// Hours to simulate
    #[arg(long, default_value_t = 600)]
    hours: Tick,

    /// Real milliseconds that pass per game hour
    #[arg(long, default_value_t = 1000)]
    ms_per_hour: u64,

    /// Print objective transitions as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Where the scripted player is in the story
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    AwaitVideo,
    Talk { since: Tick },
    Record { since: Tick },
    Report { since: Tick },
    Done,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    script: &'a str,
    transitions: &'a [Transition],
    effects: Vec<(Tick, MissionEffect)>,
    mission: ObjectiveState,
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

    let level = config.missions.spy_report_level;
    let mut runner = MissionRunner::new(NarrativeState::at_level(level))
        .with_mission(Box::new(SpyReportMission::new(config.missions.clone())));
    runner.helper_mut().set_mission_time(spy_report::MISSION, args.start);

    tracing::info!(script = ?args.script, hours = args.hours, "Starting mission simulation");

    let mut stage = Stage::AwaitVideo;
    let mut effects = Vec::new();

    for _ in 0..args.hours {
        runner.advance_real_ms(args.ms_per_hour);
        runner.run_hours(1);
        let now = runner.helper().now();

        for effect in runner.narrative_mut().drain_effects() {
            if let (Script::Complete, MissionEffect::PlayVideo(video)) = (args.script, &effect) {
                runner.video_complete(video);
                stage = Stage::Talk { since: now };
            }
            effects.push((now, effect));
        }

        if args.script == Script::Ignore {
            continue;
        }
        let due = |since: Tick| now >= since + args.response_hours;
        stage = match stage {
            Stage::Talk { since } if due(since) => {
                runner.talk_completed();
                Stage::Record { since: now }
            }
            Stage::Record { since } if due(since) && runner.narrative().allow_record_message => {
                runner.narrative_mut().record_watched = true;
                Stage::Report { since: now }
            }
            Stage::Report { since } if due(since) => {
                if runner.helper().message(spy_report::REPORT_MESSAGE).is_some_and(|m| m.visible) {
                    runner.message_seen(spy_report::REPORT_MESSAGE);
                }
                Stage::Done
            }
            other => other,
        };
    }

    let mission = runner.helper().objective_state(spy_report::MISSION);
    if args.json {
        let report = RunReport {
            script: match args.script {
                Script::Complete => "complete",
                Script::Ignore => "ignore",
            },
            transitions: runner.helper().transitions(),
            effects,
            mission,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (at, effect) in &effects {
        println!("hour {:>4}  effect     {:?}", at, effect);
    }
    for t in runner.helper().transitions() {
        println!("hour {:>4}  objective  {} {} -> {}", t.at, t.objective, t.from, t.to);
    }
    println!("\nMission finished as {} (visible: {})", mission, runner.helper().is_visible(spy_report::MISSION));
    Ok(())
}
