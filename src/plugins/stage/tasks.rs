//! Cooperative tasks: delayed formation spawns and destroy-watchers.
//!
//! Both are plain data polled once per tick by the stage systems. Cancelling them is just
//! dropping them, which is what `Stop` and `StageClear` do.

use bevy::prelude::*;

use crate::data::{EnemyFormation, FormationMember, OnDestroyFollowUp};

/// Members of one formation waiting for their spawn delay.
#[derive(Debug, Clone)]
pub struct FormationTask {
    pub formation_id: String,
    pub origin: Vec2,
    elapsed: f32,
    /// The dispatch tick already accounted for its own overshoot.
    fresh: bool,
    pending: Vec<FormationMember>,
    spawned: Vec<Entity>,
    follow_up: Option<OnDestroyFollowUp>,
    source_event: String,
}

impl FormationTask {
    /// `overshoot` is how far the playhead was past the trigger time when the event fired;
    /// delays are measured from the trigger time, not from dispatch.
    pub fn new(
        formation: &EnemyFormation,
        origin: Vec2,
        overshoot: f32,
        follow_up: Option<OnDestroyFollowUp>,
        source_event: impl Into<String>,
    ) -> Self {
        Self {
            formation_id: formation.id.clone(),
            origin,
            elapsed: overshoot.max(0.0),
            fresh: true,
            pending: formation.members.clone(),
            spawned: Vec::with_capacity(formation.members.len()),
            follow_up,
            source_event: source_event.into(),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.fresh {
            self.fresh = false;
        } else {
            self.elapsed += dt.max(0.0);
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Remove and return members whose delay has elapsed, in authored order.
    pub fn take_due(&mut self) -> Vec<FormationMember> {
        let elapsed = self.elapsed;
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|m| m.spawn_delay <= elapsed);
        self.pending = pending;
        due
    }

    pub fn record(&mut self, entity: Entity) {
        self.spawned.push(entity);
    }

    pub fn spawned(&self) -> &[Entity] {
        &self.spawned
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Hand the instantiated members over to a watcher, if a follow-up was requested and
    /// anything actually spawned.
    pub fn finish(self) -> Option<DestroyWatcher> {
        let follow_up = self.follow_up?;
        if self.spawned.is_empty() {
            return None;
        }
        Some(DestroyWatcher::new(self.spawned, follow_up, self.source_event))
    }
}

/// Fires `follow_up` once every watched entity is gone.
#[derive(Debug, Clone)]
pub struct DestroyWatcher {
    handles: Vec<Entity>,
    pub follow_up: OnDestroyFollowUp,
    pub source_event: String,
}

impl DestroyWatcher {
    pub fn new(
        handles: Vec<Entity>,
        follow_up: OnDestroyFollowUp,
        source_event: impl Into<String>,
    ) -> Self {
        Self {
            handles,
            follow_up,
            source_event: source_event.into(),
        }
    }

    /// Drop handles that are no longer alive. Returns true once the set is empty.
    pub fn prune(&mut self, alive: impl Fn(Entity) -> bool) -> bool {
        self.handles.retain(|&e| alive(e));
        self.handles.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.handles.len()
    }
}

#[derive(Resource, Debug, Default)]
pub struct StageTasks {
    pub formations: Vec<FormationTask>,
    pub watchers: Vec<DestroyWatcher>,
}

impl StageTasks {
    pub fn clear(&mut self) {
        self.formations.clear();
        self.watchers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty() && self.watchers.is_empty()
    }
}
