//! Quest objectives and their one-way state machine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Tick;

/// Tri-state objective status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveState {
    Active,
    Success,
    Failure,
}

impl ObjectiveState {
    /// Success and failure are final for the mission run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ObjectiveState::Active)
    }
}

impl fmt::Display for ObjectiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ObjectiveState::Active => "ACTIVE",
            ObjectiveState::Success => "SUCCESS",
            ObjectiveState::Failure => "FAILURE",
        };
        f.write_str(label)
    }
}

/// A single trackable quest step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub state: ObjectiveState,
    /// Shown in the player's objective list
    pub visible: bool,
}

impl Objective {
    /// New objectives start hidden and active
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: ObjectiveState::Active,
            visible: false,
        }
    }

    /// Move from ACTIVE to a terminal state; false if nothing changed
    pub fn transition(&mut self, to: ObjectiveState) -> bool {
        if self.state.is_terminal() || !to.is_terminal() {
            return false;
        }
        self.state = to;
        true
    }
}

/// Record of an objective changing state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub objective: String,
    pub from: ObjectiveState,
    pub to: ObjectiveState,
    pub at: Tick,
}
