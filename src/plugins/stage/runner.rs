//! Playhead, cursor and run state. No ECS in here; systems drive it.

use bevy::prelude::*;

use crate::common::error::StageError;
use crate::data::{Stage, StageEvent, Timeline, TimelineEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    Running,
    Paused,
    Stopped,
    Cleared,
}

impl RunState {
    /// A run is in progress (possibly paused).
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

#[derive(Resource, Debug, Default)]
pub struct StageRunner {
    stage: Option<Stage>,
    state: RunState,
    timeline_id: Option<String>,
    playhead: f32,
    cursor: usize,
    /// Bumped by every successful `switch_timeline`.
    switches: u64,
}

impl StageRunner {
    /// A stage without timelines can't be started.
    pub fn validate(stage: &Stage) -> Result<(), StageError> {
        match stage.first_timeline() {
            Some(_) => Ok(()),
            None => Err(StageError::NoTimelines),
        }
    }

    /// Load `stage` and begin its first timeline at time zero.
    ///
    /// On error nothing changes.
    pub fn start(&mut self, stage: Stage) -> Result<(), StageError> {
        Self::validate(&stage)?;
        self.timeline_id = stage.first_timeline().map(|t| t.id.clone());
        self.stage = Some(stage);
        self.state = RunState::Running;
        self.playhead = 0.0;
        self.cursor = 0;
        Ok(())
    }

    /// Make `id` the active timeline, rewound to zero.
    ///
    /// On error the active timeline and playhead are left alone.
    pub fn switch_timeline(&mut self, id: &str) -> Result<(), StageError> {
        let stage = self.stage.as_ref().ok_or(StageError::NotRunning)?;
        if stage.timeline(id).is_none() {
            return Err(StageError::UnknownTimeline(id.to_owned()));
        }
        self.timeline_id = Some(id.to_owned());
        self.playhead = 0.0;
        self.cursor = 0;
        self.switches += 1;
        Ok(())
    }

    /// Move the playhead forward. Only while running.
    pub fn advance(&mut self, dt: f32) {
        if self.state == RunState::Running && dt > 0.0 {
            self.playhead += dt;
        }
    }

    /// Next entry whose time has been reached, consuming it.
    ///
    /// The cursor moves past the entry *before* the caller dispatches it, so a dispatch that
    /// rewinds the timeline starts cleanly at entry zero.
    pub fn pop_due(&mut self) -> Option<TimelineEvent> {
        if self.state != RunState::Running {
            return None;
        }
        let entry = self.active_timeline()?.events().get(self.cursor)?;
        if entry.time > self.playhead {
            return None;
        }
        let entry = entry.clone();
        self.cursor += 1;
        Some(entry)
    }

    pub fn stage_event(&self, id: &str) -> Option<&StageEvent> {
        self.stage.as_ref()?.event(id)
    }

    pub fn pause(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.state = RunState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != RunState::Paused {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// Returns whether a run was actually interrupted.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.state = RunState::Stopped;
        true
    }

    pub fn clear(&mut self) {
        self.state = RunState::Cleared;
    }

    /// Pure seek: events at or before `time` are marked consumed, none are dispatched.
    /// Returns the new cursor.
    pub fn jump_to_time(&mut self, time: f32) -> Result<usize, StageError> {
        if !self.state.is_active() {
            return Err(StageError::NotRunning);
        }
        let time = if time.is_nan() { 0.0 } else { time.max(0.0) };
        let cursor = self
            .active_timeline()
            .map_or(0, |timeline| timeline.due_count(time));
        self.playhead = time;
        self.cursor = cursor;
        Ok(cursor)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total timeline switches so far. Only differences between two reads mean anything.
    pub fn timeline_switches(&self) -> u64 {
        self.switches
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    pub fn stage_id(&self) -> &str {
        self.stage.as_ref().map_or("", |s| s.id.as_str())
    }

    pub fn active_timeline(&self) -> Option<&Timeline> {
        let id = self.timeline_id.as_deref()?;
        self.stage.as_ref()?.timeline(id)
    }
}
