//! Spy report quest
//!
//! Flow: an interlude video plays once the mission is due, then the player
//! talks to Kelly (Task-1), watches a recording (Task-2) and finally reads
//! Douglas' report (Task-3). Every task carries a deadline; missing one
//! fails both the task and the mission.

use super::objective::ObjectiveState;
use super::{Mission, MissionContext, MissionEffect};
use crate::core::config::MissionConfig;

pub const MISSION: &str = "Mission-15";
pub const TASK_1: &str = "Mission-15-Task-1";
pub const TASK_2: &str = "Mission-15-Task-2";
pub const TASK_3: &str = "Mission-15-Task-3";
pub const MISSION_HIDE: &str = "Mission-15-Hide";
pub const TASK_3_HIDE: &str = "Mission-15-Task-3-Hide";
pub const REPORT_MESSAGE: &str = "Douglas-Report-Spy";
pub const TALK: &str = "kelly";
pub const VIDEO: &str = "interlude/spy_on_johnson";

const TASKS: [&str; 3] = [TASK_1, TASK_2, TASK_3];

fn deadline_key(task: &str) -> String {
    format!("{task}-Timeout")
}

pub struct SpyReportMission {
    config: MissionConfig,
}

impl SpyReportMission {
    pub fn new(config: MissionConfig) -> Self {
        Self { config }
    }

    fn arm_deadline(&self, ctx: &mut MissionContext<'_>, task: &str) {
        let at = ctx.helper.now() + self.config.deadline_hours;
        ctx.helper.set_mission_time(&deadline_key(task), at);
    }

    fn check_record_watched(&self, ctx: &mut MissionContext<'_>) {
        if !ctx.narrative.record_watched {
            return;
        }
        if ctx.helper.objective_state(TASK_2) != ObjectiveState::Active {
            return;
        }
        ctx.helper.set_objective_state(TASK_2, ObjectiveState::Success);
        ctx.helper.clear_mission_time(&deadline_key(TASK_2));
        ctx.helper.send(REPORT_MESSAGE).visible = true;
        ctx.helper.show_objective(TASK_3);
        self.arm_deadline(ctx, TASK_3);
    }

    fn check_deadlines(&self, ctx: &mut MissionContext<'_>) {
        for task in TASKS {
            let key = deadline_key(task);
            if !ctx.helper.is_mission_time(&key) {
                continue;
            }
            ctx.helper.clear_mission_time(&key);
            tracing::info!(task, "Task deadline passed");
            ctx.helper.set_objective_state(task, ObjectiveState::Failure);
            ctx.helper.set_objective_state(MISSION, ObjectiveState::Failure);

            match task {
                TASK_1 => ctx.narrative.current_talk = None,
                TASK_3 => ctx.helper.set_timeout(MISSION_HIDE, self.config.hide_delay_ms),
                _ => {}
            }
        }
    }

    fn check_hide_timers(&self, ctx: &mut MissionContext<'_>) {
        if ctx.helper.is_timeout(TASK_3_HIDE) {
            ctx.helper.clear_timeout(TASK_3_HIDE);
            ctx.helper.objective(TASK_3).visible = false;
        }
        if ctx.helper.is_timeout(MISSION_HIDE) {
            ctx.helper.clear_timeout(MISSION_HIDE);
            ctx.helper.objective(MISSION).visible = false;
            ctx.helper.send(REPORT_MESSAGE).visible = false;
            ctx.narrative.current_talk = None;
        }
    }
}

impl Mission for SpyReportMission {
    fn name(&self) -> &'static str {
        "spy_report"
    }

    fn on_time(&mut self, ctx: &mut MissionContext<'_>) {
        if ctx.narrative.level != self.config.spy_report_level {
            return;
        }
        if ctx.helper.can_start(MISSION) {
            ctx.helper.clear_mission_time(MISSION);
            ctx.narrative.push_effect(MissionEffect::StopMusic);
            ctx.narrative.push_effect(MissionEffect::PlayVideo(VIDEO.to_string()));
        }
        self.check_record_watched(ctx);
        self.check_deadlines(ctx);
        self.check_hide_timers(ctx);
    }

    fn on_video_complete(&mut self, ctx: &mut MissionContext<'_>, video: &str) {
        if video != VIDEO {
            return;
        }
        ctx.narrative.current_talk = Some(TALK.to_string());
        ctx.helper.show_objective(MISSION);
        ctx.helper.show_objective(TASK_1);
        self.arm_deadline(ctx, TASK_1);
        ctx.narrative.push_effect(MissionEffect::PlayMusic);
    }

    fn on_message_seen(&mut self, ctx: &mut MissionContext<'_>, message: &str) {
        if ctx.narrative.level != self.config.spy_report_level || message != REPORT_MESSAGE {
            return;
        }
        if ctx.helper.set_objective_state(TASK_3, ObjectiveState::Success) {
            ctx.helper.set_objective_state(MISSION, ObjectiveState::Success);
            ctx.helper.set_timeout(TASK_3_HIDE, self.config.hide_delay_ms);
            ctx.helper.clear_mission_time(&deadline_key(TASK_3));
            ctx.helper.set_timeout(MISSION_HIDE, self.config.hide_delay_ms);
        }
    }

    fn on_talk_completed(&mut self, ctx: &mut MissionContext<'_>) {
        if ctx.narrative.level != self.config.spy_report_level || !ctx.narrative.is_talking(TALK) {
            return;
        }
        if ctx.helper.set_objective_state(TASK_1, ObjectiveState::Success) {
            ctx.narrative.allow_record_message = true;
            ctx.helper.show_objective(TASK_2);
            ctx.helper.clear_mission_time(&deadline_key(TASK_1));
            self.arm_deadline(ctx, TASK_2);
        }
    }
}
