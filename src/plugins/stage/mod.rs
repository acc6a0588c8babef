//! Stage plugin: timeline scheduler, spawner routing and destroy-watchers.
//!
//! # Data flow (one frame)
//! ```text
//!   Update (run_if InGame), chained sets:
//!┌──────────────────────────────────────────────────────────────────────┐
//!│ Control     apply_stage_commands   StageCommand -> StageRunner       │
//!│ Timeline    advance_timeline       playhead += dt, dispatch due      │
//!│ Formations  run_formation_tasks    spawn members whose delay passed  │
//!│ Enemies     (enemies plugin)       damage, motion, fire, destruction │
//!│ Watch       run_destroy_watchers   prune handles, fire follow-ups    │
//!└──────────────────────────────────────────────────────────────────────┘
//!   PostUpdate: despawn enemies marked PendingDespawn
//! ```
//!
//! The runner owns playhead and cursor; the dispatcher owns entity creation; tasks are
//! polled here and nowhere else.

use bevy::prelude::*;

use crate::common::error::StageError;
use crate::common::state::GameState;
use crate::data::{EnemyDatabase, PatternDatabase};

pub mod dispatch;
pub mod messages;
pub mod runner;
pub mod tasks;

pub use dispatch::StageDispatch;
pub use messages::{StageCleared, StageCommand, StageEventDispatched, StageStarted, StageStopped, TimelineChanged};
pub use runner::{RunState, StageRunner};
pub use tasks::{DestroyWatcher, FormationTask, StageTasks};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageSet {
    Control,
    Timeline,
    Formations,
    Enemies,
    Watch,
}

/// Scroll hint and background of the running stage. Rendering it is up to whoever cares.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct StageScroll {
    pub speed: f32,
    pub background_id: Option<String>,
}

impl Default for StageScroll {
    fn default() -> Self {
        Self {
            speed: 1.0,
            background_id: None,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<StageCommand>()
        .add_message::<StageStarted>()
        .add_message::<StageCleared>()
        .add_message::<StageStopped>()
        .add_message::<TimelineChanged>()
        .add_message::<StageEventDispatched>();

    app.init_resource::<StageRunner>()
        .init_resource::<StageTasks>()
        .init_resource::<StageScroll>()
        .init_resource::<EnemyDatabase>()
        .init_resource::<PatternDatabase>();

    app.configure_sets(
        Update,
        (
            StageSet::Control,
            StageSet::Timeline,
            StageSet::Formations,
            StageSet::Enemies,
            StageSet::Watch,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        (
            apply_stage_commands.in_set(StageSet::Control),
            advance_timeline.in_set(StageSet::Timeline),
            run_formation_tasks.in_set(StageSet::Formations),
            run_destroy_watchers.in_set(StageSet::Watch),
        ),
    );
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

pub fn apply_stage_commands(mut reader: MessageReader<StageCommand>, mut stage: StageDispatch) {
    for command in reader.read() {
        match command {
            StageCommand::Start(s) => stage.start(s.as_ref().clone()),
            StageCommand::Pause => {
                if stage.runner.pause() {
                    info!("stage paused at t={:.2}", stage.runner.playhead());
                } else {
                    debug!("pause ignored in {:?}", stage.runner.state());
                }
            }
            StageCommand::Resume => {
                if stage.runner.resume() {
                    info!("stage resumed at t={:.2}", stage.runner.playhead());
                } else {
                    debug!("resume ignored in {:?}", stage.runner.state());
                }
            }
            StageCommand::Stop => stage.stop(),
            StageCommand::JumpToTime(t) => match stage.runner.jump_to_time(*t) {
                Ok(cursor) => info!("jumped to t={t:.2} (cursor {cursor})"),
                Err(err) => warn!("JumpToTime ignored: {err}"),
            },
        }
    }
}

/// Advance the playhead and dispatch everything that became due, in order.
pub fn advance_timeline(time: Res<Time>, mut stage: StageDispatch) {
    if stage.runner.state() != RunState::Running {
        return;
    }
    stage.runner.advance(time.delta_secs());

    let limit = stage.tunables.max_timeline_switches_per_tick;
    let first_switch = stage.runner.timeline_switches();

    while let Some(entry) = stage.runner.pop_due() {
        match stage.runner.stage_event(&entry.event_id).cloned() {
            Some(event) => stage.dispatch(&event, entry.time),
            None => warn!("{}", StageError::UnknownEvent(entry.event_id)),
        }

        if stage.runner.timeline_switches() - first_switch >= u64::from(limit) {
            warn!(
                "{limit} timeline switches in one tick, continuing '{}' next tick",
                stage.runner.active_timeline().map_or("", |t| t.id.as_str())
            );
            break;
        }
    }
}

/// Spawn formation members whose delay has elapsed; hand finished formations to watchers.
pub fn run_formation_tasks(time: Res<Time>, mut stage: StageDispatch) {
    if !stage.tasks_may_run() || stage.tasks.formations.is_empty() {
        return;
    }
    let formations = std::mem::take(&mut stage.tasks.formations);
    poll_formations(&mut stage, formations, time.delta_secs());
}

/// Tick `formations` by `dt`, spawn what became due, keep the rest pending.
fn poll_formations(stage: &mut StageDispatch, mut formations: Vec<FormationTask>, dt: f32) {
    for task in &mut formations {
        task.tick(dt);
        let origin = task.origin;
        for member in task.take_due() {
            if let Some(entity) = stage.spawn_member(&member, origin) {
                task.record(entity);
            }
        }
    }

    let (done, running): (Vec<_>, Vec<_>) = formations.into_iter().partition(FormationTask::is_complete);
    stage.tasks.formations.extend(running);
    for task in done {
        debug!(
            "formation '{}' complete ({} spawned)",
            task.formation_id,
            task.spawned().len()
        );
        if let Some(watcher) = task.finish() {
            stage.tasks.watchers.push(watcher);
        }
    }
}

/// Prune dead handles; fire (or suppress) follow-ups of watchers that emptied.
pub fn run_destroy_watchers(mut stage: StageDispatch) {
    if !stage.tasks_may_run() || stage.tasks.watchers.is_empty() {
        return;
    }
    let trigger_time = stage.runner.playhead();

    let mut watchers = std::mem::take(&mut stage.tasks.watchers);
    let mut fired = Vec::new();
    watchers.retain_mut(|watcher| {
        if !watcher.prune(|e| stage.is_alive(e)) {
            return true;
        }
        if watcher.follow_up.allows(trigger_time) {
            fired.push(watcher.follow_up.to_event(&watcher.source_event));
        } else {
            debug!(
                "follow-up of '{}' suppressed: t={trigger_time:.2} > {:.2}",
                watcher.source_event, watcher.follow_up.condition
            );
        }
        false
    });
    stage.tasks.watchers.extend(watchers);

    let polled = stage.tasks.formations.len();
    for event in fired {
        stage.dispatch(&event, trigger_time);
    }

    // Formations started by a follow-up missed this tick's formation pass. A follow-up that
    // cleared the stage has already emptied the list.
    let polled = polled.min(stage.tasks.formations.len());
    let started = stage.tasks.formations.split_off(polled);
    if !started.is_empty() {
        poll_formations(&mut stage, started, 0.0);
    }
}
