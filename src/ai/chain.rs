//! Ordered fallback strategies
//!
//! A chain tries its strategies in priority order. The first one that
//! reports `Step::Handled` ends the run; `Step::Pass` defers to the next.

use crate::ai::action::ActionQueue;
use crate::core::error::Result;

/// Verdict of a single strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The strategy took responsibility for this tick
    Handled,
    /// Nothing applicable, try the next strategy
    Pass,
}

/// A strategy over planning context `C`
pub type Strategy<C> = fn(&mut C, &mut ActionQueue) -> Result<Step>;

/// Priority-ordered list of strategies
pub struct PlannerChain<C> {
    name: &'static str,
    strategies: Vec<(&'static str, Strategy<C>)>,
}

impl<C> PlannerChain<C> {
    pub fn new(name: &'static str) -> Self {
        Self { name, strategies: Vec::new() }
    }

    /// Append a lower-priority strategy
    pub fn then(mut self, label: &'static str, strategy: Strategy<C>) -> Self {
        self.strategies.push((label, strategy));
        self
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.iter().map(|(label, _)| *label)
    }

    /// Run strategies until one handles the tick; returns its label
    pub fn run(&self, ctx: &mut C, queue: &mut ActionQueue) -> Result<Option<&'static str>> {
        for &(label, strategy) in &self.strategies {
            if strategy(ctx, queue)? == Step::Handled {
                tracing::debug!(chain = self.name, strategy = label, "Strategy handled tick");
                return Ok(Some(label));
            }
        }
        tracing::debug!(chain = self.name, "No strategy applied");
        Ok(None)
    }
}
