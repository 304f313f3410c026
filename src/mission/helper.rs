//! Objective, message and timer bookkeeping shared by all missions
//!
//! Two timer flavours exist:
//! - mission time: due once the game clock reaches an absolute tick
//! - timeout: due once enough real milliseconds have passed since it was set
//!
//! Timers stay armed until a mission clears them; a mission that acts on a
//! due timer must clear it, or it will be due again on the next tick.

use ahash::AHashMap;

use super::objective::{Objective, ObjectiveState, Transition};
use crate::core::types::Tick;

/// An in-game message the player can read
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub visible: bool,
    pub seen: bool,
}

#[derive(Debug, Clone, Copy)]
struct Timeout {
    started_ms: u64,
    delay_ms: u64,
}

/// Mission-side world access
#[derive(Debug, Clone, Default)]
pub struct MissionHelper {
    objectives: AHashMap<String, Objective>,
    messages: AHashMap<String, Message>,
    mission_times: AHashMap<String, Tick>,
    timeouts: AHashMap<String, Timeout>,
    now: Tick,
    real_ms: u64,
    transitions: Vec<Transition>,
}

impl MissionHelper {
    pub fn new() -> Self {
        Self::default()
    }

    // === CLOCK ===

    /// Current game time in hours
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Sync with the simulation clock
    pub fn set_time(&mut self, now: Tick) {
        self.now = now;
    }

    pub fn advance(&mut self, hours: Tick) {
        self.now += hours;
    }

    /// Real time elapsed, in milliseconds
    pub fn real_ms(&self) -> u64 {
        self.real_ms
    }

    pub fn advance_real_ms(&mut self, ms: u64) {
        self.real_ms += ms;
    }

    // === OBJECTIVES ===

    /// Objective by id, created hidden and active on first use
    pub fn objective(&mut self, id: &str) -> &mut Objective {
        self.objectives
            .entry(id.to_string())
            .or_insert_with(|| Objective::new(id))
    }

    pub fn find_objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.get(id)
    }

    /// State of an objective; never-touched objectives count as active
    pub fn objective_state(&self, id: &str) -> ObjectiveState {
        self.objectives
            .get(id)
            .map(|o| o.state)
            .unwrap_or(ObjectiveState::Active)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.objectives.get(id).is_some_and(|o| o.visible)
    }

    pub fn show_objective(&mut self, id: &str) {
        self.objective(id).visible = true;
    }

    /// Move an objective out of ACTIVE
    ///
    /// Returns whether the state actually changed, so callers can guard
    /// follow-up effects against double firing.
    pub fn set_objective_state(&mut self, id: &str, state: ObjectiveState) -> bool {
        let now = self.now;
        let objective = self.objective(id);
        let from = objective.state;
        if !objective.transition(state) {
            return false;
        }

        tracing::info!(objective = id, %from, to = %state, at = now, "Objective transition");
        self.transitions.push(Transition {
            objective: id.to_string(),
            from,
            to: state,
            at: now,
        });
        true
    }

    /// Hidden, still active, and its start time has come
    pub fn can_start(&self, id: &str) -> bool {
        let waiting = self
            .objectives
            .get(id)
            .map_or(true, |o| o.state == ObjectiveState::Active && !o.visible);
        waiting && self.is_mission_time(id)
    }

    /// Every objective transition so far, oldest first
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    // === MESSAGES ===

    /// Message by id, created hidden on first use
    pub fn send(&mut self, id: &str) -> &mut Message {
        self.messages.entry(id.to_string()).or_insert_with(|| Message {
            id: id.to_string(),
            visible: false,
            seen: false,
        })
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn mark_seen(&mut self, id: &str) {
        self.send(id).seen = true;
    }

    // === MISSION TIME ===

    /// Arm a due-date timer at an absolute game tick
    pub fn set_mission_time(&mut self, key: &str, at: Tick) {
        tracing::debug!(key, at, "Mission time set");
        self.mission_times.insert(key.to_string(), at);
    }

    pub fn is_mission_time(&self, key: &str) -> bool {
        self.mission_times.get(key).is_some_and(|at| self.now >= *at)
    }

    pub fn has_mission_time(&self, key: &str) -> bool {
        self.mission_times.contains_key(key)
    }

    pub fn clear_mission_time(&mut self, key: &str) {
        self.mission_times.remove(key);
    }

    // === TIMEOUTS ===

    /// Arm an elapsed-duration timer measured in real milliseconds
    pub fn set_timeout(&mut self, key: &str, delay_ms: u64) {
        self.timeouts.insert(
            key.to_string(),
            Timeout { started_ms: self.real_ms, delay_ms },
        );
    }

    pub fn is_timeout(&self, key: &str) -> bool {
        self.timeouts
            .get(key)
            .is_some_and(|t| self.real_ms.saturating_sub(t.started_ms) >= t.delay_ms)
    }

    pub fn has_timeout(&self, key: &str) -> bool {
        self.timeouts.contains_key(key)
    }

    pub fn clear_timeout(&mut self, key: &str) {
        self.timeouts.remove(key);
    }
}
