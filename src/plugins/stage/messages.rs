//! Stage control surface.
//!
//! Inbound: `StageCommand`. Outbound: lifecycle notifications plus one
//! `StageEventDispatched` per executed event. Sound, message, camera and background events
//! have no handler in here; their consumers read `StageEventDispatched` and match the kind.

use bevy::prelude::*;

use crate::data::{Stage, StageEvent};

#[derive(Message, Clone, Debug)]
pub enum StageCommand {
    Start(Box<Stage>),
    Pause,
    Resume,
    Stop,
    /// Seek without replaying skipped events.
    JumpToTime(f32),
}

#[derive(Message, Clone, Debug)]
pub struct StageStarted {
    pub stage_id: String,
    pub name: String,
}

#[derive(Message, Clone, Debug)]
pub struct StageCleared {
    pub stage_id: String,
}

#[derive(Message, Clone, Debug)]
pub struct StageStopped {
    pub stage_id: String,
}

#[derive(Message, Clone, Debug)]
pub struct TimelineChanged {
    pub timeline_id: String,
    pub name: String,
    pub scroll_speed: f32,
}

/// `time` is the timeline time the event was scheduled at, or the playhead for
/// on-destroy follow-ups.
#[derive(Message, Clone, Debug)]
pub struct StageEventDispatched {
    pub event: StageEvent,
    pub time: f32,
}
