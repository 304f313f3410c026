//! AI planning for computer-controlled empires
//!
//! A scheduler calls every planner once per AI turn. Planners read the
//! frozen `AiWorld` snapshot and queue deferred `Action`s; the executor runs
//! the queue afterwards, in enqueue order.

pub mod action;
pub mod chain;
pub mod discovery;
pub mod select;

pub use action::{Action, ActionQueue, ControlCall, Controls, RecordingControls};
pub use chain::{PlannerChain, Step, Strategy};
pub use discovery::DiscoveryPlanner;

use crate::core::error::Result;
use crate::world::snapshot::AiWorld;

/// What a planning call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The named strategy queued an action
    Acted(&'static str),
    /// Nothing applicable this turn
    Idle,
}

/// Trait for AI planners
pub trait Planner {
    fn name(&self) -> &'static str;

    /// Inspect the snapshot and queue at most one action
    fn plan(&self, world: &AiWorld, queue: &mut ActionQueue) -> Result<PlanOutcome>;
}

/// Run each planner in order against the same snapshot
///
/// Actions from all planners accumulate in `queue`.
pub fn run_turn(planners: &[Box<dyn Planner>], world: &AiWorld, queue: &mut ActionQueue) -> Result<Vec<PlanOutcome>> {
    let mut outcomes = Vec::with_capacity(planners.len());
    for planner in planners {
        let outcome = planner.plan(world, queue)?;
        tracing::debug!(planner = planner.name(), ?outcome, "Planner finished");
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
