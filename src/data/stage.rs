//! Stage, timelines and the events they schedule.

use bevy::math::Vec2;
use bevy::platform::collections::HashMap;

use crate::common::error::StageError;

#[derive(Debug, Clone, PartialEq)]
pub struct StageMeta {
    pub author: String,
    pub difficulty: u8,
    pub description: String,
    pub version: String,
}

impl Default for StageMeta {
    fn default() -> Self {
        Self {
            author: String::new(),
            difficulty: 1,
            description: String::new(),
            version: "1.0.0".into(),
        }
    }
}

/// A designer-authored stage.
///
/// Timelines keep insertion order: the first one is where `StartStage` begins.
#[derive(Debug, Clone)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub meta: StageMeta,
    timelines: Vec<Timeline>,
    events: HashMap<String, StageEvent>,
}

impl Stage {
    pub const FIRST_TIMELINE_ID: &'static str = "main";

    /// A fresh stage always owns exactly one (empty) timeline.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            meta: StageMeta::default(),
            timelines: vec![Timeline::new(Self::FIRST_TIMELINE_ID, "Main")],
            events: HashMap::default(),
        }
    }

    /// A stage with no timelines at all. Only useful for exercising the malformed-stage path.
    pub fn empty(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            timelines: Vec::new(),
            ..Self::new(id, name)
        }
    }

    pub fn timelines(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.iter()
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn first_timeline(&self) -> Option<&Timeline> {
        self.timelines.first()
    }

    pub fn timeline(&self, id: &str) -> Option<&Timeline> {
        self.timelines.iter().find(|t| t.id == id)
    }

    pub fn timeline_mut(&mut self, id: &str) -> Option<&mut Timeline> {
        self.timelines.iter_mut().find(|t| t.id == id)
    }

    pub fn add_timeline(&mut self, timeline: Timeline) -> Result<(), StageError> {
        if self.timeline(&timeline.id).is_some() {
            return Err(StageError::DuplicateTimeline(timeline.id));
        }
        self.timelines.push(timeline);
        Ok(())
    }

    pub fn remove_timeline(&mut self, id: &str) -> Option<Timeline> {
        let idx = self.timelines.iter().position(|t| t.id == id)?;
        Some(self.timelines.remove(idx))
    }

    pub fn event(&self, id: &str) -> Option<&StageEvent> {
        self.events.get(id)
    }

    pub fn events(&self) -> impl Iterator<Item = &StageEvent> {
        self.events.values()
    }

    pub fn add_event(&mut self, event: StageEvent) -> Result<(), StageError> {
        if self.events.contains_key(&event.id) {
            return Err(StageError::DuplicateEvent(event.id));
        }
        self.events.insert(event.id.clone(), event);
        Ok(())
    }

    /// Timeline entries that still point at the removed event are left in place.
    pub fn remove_event(&mut self, id: &str) -> Option<StageEvent> {
        self.events.remove(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub id: String,
    pub name: String,
    pub scroll_speed: f32,
    pub background_id: Option<String>,
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scroll_speed: 1.0,
            background_id: None,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, time: f32, event_id: impl Into<String>) -> Self {
        self.add_event(time, event_id);
        self
    }

    /// Always time-ascending.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn add_event(&mut self, time: f32, event_id: impl Into<String>) {
        self.events.push(TimelineEvent::new(time, event_id));
        self.sort_events();
    }

    pub fn remove_event(&mut self, index: usize) -> Option<TimelineEvent> {
        (index < self.events.len()).then(|| self.events.remove(index))
    }

    /// Moves an entry in time and re-sorts. Returns false for an out-of-range index.
    pub fn set_event_time(&mut self, index: usize, time: f32) -> bool {
        let Some(entry) = self.events.get_mut(index) else {
            return false;
        };
        entry.time = clamp_time(time);
        self.sort_events();
        true
    }

    /// Stable: entries sharing a time keep their authored order.
    pub fn sort_events(&mut self) {
        self.events.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Number of entries due at or before `time`.
    pub fn due_count(&self, time: f32) -> usize {
        self.events.partition_point(|e| e.time <= time)
    }
}

#[inline]
fn clamp_time(time: f32) -> f32 {
    if time.is_nan() { 0.0 } else { time.max(0.0) }
}

/// A scheduled reference to a [`StageEvent`]. The id may dangle.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub time: f32,
    pub event_id: String,
}

impl TimelineEvent {
    pub fn new(time: f32, event_id: impl Into<String>) -> Self {
        Self {
            time: clamp_time(time),
            event_id: event_id.into(),
        }
    }
}

/// Discriminant of [`StageEventKind`], used where only the kind is named
/// (on-destroy follow-ups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StageEventType {
    #[default]
    None,
    SetBackground,
    SetScrollSpeed,
    SpawnSingleEnemy,
    SpawnFormation,
    SpawnBoss,
    NextTimeline,
    StageClear,
    PlaySound,
    PlayBgm,
    ShowMessage,
    CameraEffect,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum StageEventKind {
    #[default]
    None,
    SetBackground { background_id: String },
    SetScrollSpeed { speed: f32 },
    SpawnSingleEnemy { enemy_id: String, position: Vec2 },
    SpawnFormation { formation_id: String, position: Vec2 },
    SpawnBoss { enemy_id: String, position: Vec2 },
    NextTimeline { timeline_id: String },
    StageClear,
    PlaySound { sound_id: String, volume: f32 },
    PlayBgm { sound_id: String, volume: f32 },
    ShowMessage { text: String, duration: f32 },
    CameraEffect { effect_id: String },
}

impl StageEventKind {
    pub fn event_type(&self) -> StageEventType {
        match self {
            Self::None => StageEventType::None,
            Self::SetBackground { .. } => StageEventType::SetBackground,
            Self::SetScrollSpeed { .. } => StageEventType::SetScrollSpeed,
            Self::SpawnSingleEnemy { .. } => StageEventType::SpawnSingleEnemy,
            Self::SpawnFormation { .. } => StageEventType::SpawnFormation,
            Self::SpawnBoss { .. } => StageEventType::SpawnBoss,
            Self::NextTimeline { .. } => StageEventType::NextTimeline,
            Self::StageClear => StageEventType::StageClear,
            Self::PlaySound { .. } => StageEventType::PlaySound,
            Self::PlayBgm { .. } => StageEventType::PlayBgm,
            Self::ShowMessage { .. } => StageEventType::ShowMessage,
            Self::CameraEffect { .. } => StageEventType::CameraEffect,
        }
    }

    /// Build a kind from a bare `(type, target id)` pair. Fields the pair can't carry take
    /// their defaults (origin position, full volume, unit scroll speed).
    pub fn from_target(ty: StageEventType, target_id: &str) -> Self {
        let id = target_id.to_owned();
        match ty {
            StageEventType::None => Self::None,
            StageEventType::SetBackground => Self::SetBackground { background_id: id },
            StageEventType::SetScrollSpeed => Self::SetScrollSpeed { speed: 1.0 },
            StageEventType::SpawnSingleEnemy => Self::SpawnSingleEnemy {
                enemy_id: id,
                position: Vec2::ZERO,
            },
            StageEventType::SpawnFormation => Self::SpawnFormation {
                formation_id: id,
                position: Vec2::ZERO,
            },
            StageEventType::SpawnBoss => Self::SpawnBoss {
                enemy_id: id,
                position: Vec2::ZERO,
            },
            StageEventType::NextTimeline => Self::NextTimeline { timeline_id: id },
            StageEventType::StageClear => Self::StageClear,
            StageEventType::PlaySound => Self::PlaySound { sound_id: id, volume: 1.0 },
            StageEventType::PlayBgm => Self::PlayBgm { sound_id: id, volume: 1.0 },
            StageEventType::ShowMessage => Self::ShowMessage { text: id, duration: 2.0 },
            StageEventType::CameraEffect => Self::CameraEffect { effect_id: id },
        }
    }

    pub fn spawns_entities(&self) -> bool {
        matches!(
            self,
            Self::SpawnSingleEnemy { .. } | Self::SpawnFormation { .. } | Self::SpawnBoss { .. }
        )
    }
}

/// Conditional event fired once every entity spawned by the parent event is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct OnDestroyFollowUp {
    pub kind: StageEventType,
    pub target_id: String,
    /// Time window in timeline seconds. `<= 0` means "always".
    pub condition: f32,
}

impl OnDestroyFollowUp {
    pub fn new(kind: StageEventType, target_id: impl Into<String>, condition: f32) -> Self {
        Self {
            kind,
            target_id: target_id.into(),
            condition,
        }
    }

    /// Whether a set that emptied at timeline time `trigger_time` still fires.
    #[inline]
    pub fn allows(&self, trigger_time: f32) -> bool {
        self.condition <= 0.0 || trigger_time <= self.condition
    }

    /// The event this follow-up dispatches, named after its parent.
    pub fn to_event(&self, parent_id: &str) -> StageEvent {
        StageEvent::new(
            format!("{parent_id}:on_destroy"),
            StageEventKind::from_target(self.kind, &self.target_id),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageEvent {
    pub id: String,
    pub name: String,
    pub kind: StageEventKind,
    pub on_destroy: Option<OnDestroyFollowUp>,
}

impl StageEvent {
    pub fn new(id: impl Into<String>, kind: StageEventKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            on_destroy: None,
        }
    }

    pub fn with_on_destroy(mut self, follow_up: OnDestroyFollowUp) -> Self {
        self.on_destroy = Some(follow_up);
        self
    }
}
