//! Campaign-wide narrative flags and UI effects raised by missions

use serde::{Deserialize, Serialize};

/// Presentation request queued for the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "name", rename_all = "snake_case")]
pub enum MissionEffect {
    StopMusic,
    PlayMusic,
    PlayVideo(String),
}

/// Flags shared between missions and the dialogue/record screens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeState {
    /// Campaign level the player is on
    pub level: u32,
    /// Conversation currently offered on the bridge
    pub current_talk: Option<String>,
    /// The player has watched the unlocked recording
    pub record_watched: bool,
    /// The recording may be offered to the player
    pub allow_record_message: bool,
    effects: Vec<MissionEffect>,
}

impl NarrativeState {
    pub fn at_level(level: u32) -> Self {
        Self { level, ..Self::default() }
    }

    pub fn push_effect(&mut self, effect: MissionEffect) {
        tracing::debug!(?effect, "Mission effect");
        self.effects.push(effect);
    }

    pub fn effects(&self) -> &[MissionEffect] {
        &self.effects
    }

    /// Hand queued effects to the UI, oldest first
    pub fn drain_effects(&mut self) -> Vec<MissionEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn is_talking(&self, talk: &str) -> bool {
        self.current_talk.as_deref() == Some(talk)
    }
}
