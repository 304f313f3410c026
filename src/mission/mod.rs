//! Scripted campaign missions
//!
//! Missions are driven by host callbacks: a periodic time tick plus
//! completion events for messages, conversations and videos. They keep no
//! timers of their own; all objective, message and timer state lives in a
//! shared `MissionHelper` so several missions can cooperate on one campaign.

pub mod helper;
pub mod narrative;
pub mod objective;
pub mod spy_report;

pub use helper::{Message, MissionHelper};
pub use narrative::{MissionEffect, NarrativeState};
pub use objective::{Objective, ObjectiveState, Transition};
pub use spy_report::SpyReportMission;

use crate::core::types::Tick;

/// Mutable campaign state handed to every mission hook
pub struct MissionContext<'a> {
    pub helper: &'a mut MissionHelper,
    pub narrative: &'a mut NarrativeState,
}

/// Event-driven quest script
pub trait Mission {
    fn name(&self) -> &'static str;

    /// Periodic tick; deadlines and hide timers are checked here
    fn on_time(&mut self, ctx: &mut MissionContext<'_>);

    fn on_message_seen(&mut self, _ctx: &mut MissionContext<'_>, _message: &str) {}

    fn on_talk_completed(&mut self, _ctx: &mut MissionContext<'_>) {}

    fn on_video_complete(&mut self, _ctx: &mut MissionContext<'_>, _video: &str) {}
}

/// Owns the campaign state and fans host events out to all missions
pub struct MissionRunner {
    missions: Vec<Box<dyn Mission>>,
    helper: MissionHelper,
    narrative: NarrativeState,
}

impl MissionRunner {
    pub fn new(narrative: NarrativeState) -> Self {
        Self {
            missions: Vec::new(),
            helper: MissionHelper::new(),
            narrative,
        }
    }

    pub fn with_mission(mut self, mission: Box<dyn Mission>) -> Self {
        self.add(mission);
        self
    }

    pub fn add(&mut self, mission: Box<dyn Mission>) {
        tracing::debug!(mission = mission.name(), "Mission registered");
        self.missions.push(mission);
    }

    pub fn mission_names(&self) -> Vec<&'static str> {
        self.missions.iter().map(|m| m.name()).collect()
    }

    pub fn helper(&self) -> &MissionHelper {
        &self.helper
    }

    pub fn helper_mut(&mut self) -> &mut MissionHelper {
        &mut self.helper
    }

    pub fn narrative(&self) -> &NarrativeState {
        &self.narrative
    }

    pub fn narrative_mut(&mut self) -> &mut NarrativeState {
        &mut self.narrative
    }

    fn dispatch(&mut self, mut hook: impl FnMut(&mut dyn Mission, &mut MissionContext<'_>)) {
        let mut ctx = MissionContext {
            helper: &mut self.helper,
            narrative: &mut self.narrative,
        };
        for mission in &mut self.missions {
            hook(mission.as_mut(), &mut ctx);
        }
    }

    /// Tick every mission at the current game time
    pub fn tick(&mut self) {
        self.dispatch(|m, ctx| m.on_time(ctx));
    }

    /// Sync the game clock, then tick
    pub fn tick_at(&mut self, now: Tick) {
        self.helper.set_time(now);
        self.tick();
    }

    /// Move game time forward by whole hours, ticking once per hour
    pub fn run_hours(&mut self, hours: Tick) {
        for _ in 0..hours {
            self.helper.advance(1);
            self.tick();
        }
    }

    pub fn advance_real_ms(&mut self, ms: u64) {
        self.helper.advance_real_ms(ms);
    }

    pub fn message_seen(&mut self, message: &str) {
        self.helper.mark_seen(message);
        self.dispatch(|m, ctx| m.on_message_seen(ctx, message));
    }

    pub fn talk_completed(&mut self) {
        self.dispatch(|m, ctx| m.on_talk_completed(ctx));
    }

    pub fn video_complete(&mut self, video: &str) {
        self.dispatch(|m, ctx| m.on_video_complete(ctx, video));
    }
}
