//! Event routing.
//!
//! `StageDispatch` bundles everything an event handler may touch so each system in the
//! stage pipeline takes a single parameter. One match arm per event kind; kinds that belong
//! to other subsystems (sound, messages, camera) only produce `StageEventDispatched`.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::error::StageError;
use crate::common::tunables::Tunables;
use crate::data::{EnemyDatabase, FormationMember, PatternDatabase, Stage, StageEvent, StageEventKind};
use crate::plugins::enemies::{Enemy, PendingDespawn, spawn_enemy};

use super::StageScroll;
use super::messages::{StageCleared, StageEventDispatched, StageStarted, StageStopped, TimelineChanged};
use super::runner::{RunState, StageRunner};
use super::tasks::{DestroyWatcher, FormationTask, StageTasks};

#[derive(SystemParam)]
pub struct StageDispatch<'w, 's> {
    commands: Commands<'w, 's>,
    pub runner: ResMut<'w, StageRunner>,
    pub tasks: ResMut<'w, StageTasks>,
    pub tunables: Res<'w, Tunables>,
    scroll: ResMut<'w, StageScroll>,
    enemies: Res<'w, EnemyDatabase>,
    patterns: Res<'w, PatternDatabase>,
    assets: Option<Res<'w, AssetServer>>,
    live: Query<'w, 's, (Entity, Has<PendingDespawn>), With<Enemy>>,
    started: MessageWriter<'w, StageStarted>,
    cleared: MessageWriter<'w, StageCleared>,
    stopped: MessageWriter<'w, StageStopped>,
    timeline_changed: MessageWriter<'w, TimelineChanged>,
    dispatched: MessageWriter<'w, StageEventDispatched>,
}

impl StageDispatch<'_, '_> {
    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Begin `stage`. A run already in progress is stopped first; a malformed stage is
    /// rejected before anything is touched.
    pub fn start(&mut self, stage: Stage) {
        if let Err(err) = StageRunner::validate(&stage) {
            error!("cannot start stage '{}': {err}", stage.id);
            return;
        }
        if self.runner.state().is_active() {
            info!("stage '{}' replaced while running", self.runner.stage_id());
            self.stop();
        } else {
            let removed = self.despawn_enemies();
            if removed > 0 {
                debug!("removed {removed} enemies left over from '{}'", self.runner.stage_id());
            }
        }

        let (id, name) = (stage.id.clone(), stage.name.clone());
        if let Err(err) = self.runner.start(stage) {
            error!("cannot start stage '{id}': {err}");
            return;
        }
        self.tasks.clear();

        info!("stage '{id}' started");
        self.started.write(StageStarted { stage_id: id, name });
        self.publish_timeline();
    }

    /// Cancel every task and remove every live enemy.
    pub fn stop(&mut self) {
        let interrupted = self.runner.stop();
        self.tasks.clear();
        let removed = self.despawn_enemies();

        if interrupted {
            info!(
                "stage '{}' stopped ({removed} enemies removed)",
                self.runner.stage_id()
            );
            self.stopped.write(StageStopped {
                stage_id: self.runner.stage_id().to_owned(),
            });
        }
    }

    /// Despawn every enemy, marked or not.
    fn despawn_enemies(&mut self) -> usize {
        let mut removed = 0usize;
        for (entity, _) in self.live.iter() {
            self.commands.entity(entity).despawn();
            removed += 1;
        }
        removed
    }

    fn clear_stage(&mut self) {
        self.runner.clear();
        self.tasks.clear();
        info!("stage '{}' cleared", self.runner.stage_id());
        self.cleared.write(StageCleared {
            stage_id: self.runner.stage_id().to_owned(),
        });
    }

    /// Formation spawns and destroy-watchers may advance this tick.
    pub fn tasks_may_run(&self) -> bool {
        match self.runner.state() {
            RunState::Running => true,
            RunState::Paused => !self.tunables.pause_freezes_tasks,
            _ => false,
        }
    }

    /// Alive means spawned, not yet destroyed and not marked for despawn.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.live.get(entity).is_ok_and(|(_, pending)| !pending)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Execute one event. A no-op once the run is over.
    pub fn dispatch(&mut self, event: &StageEvent, trigger_time: f32) {
        if !self.runner.state().is_active() {
            return;
        }

        debug!(
            "t={:.2} dispatch '{}' ({:?})",
            self.runner.playhead(),
            event.id,
            event.kind.event_type()
        );
        self.dispatched.write(StageEventDispatched {
            event: event.clone(),
            time: trigger_time,
        });

        match &event.kind {
            StageEventKind::None => {}
            StageEventKind::SetBackground { background_id } => {
                self.scroll.background_id = Some(background_id.clone());
            }
            StageEventKind::SetScrollSpeed { speed } => {
                self.scroll.speed = *speed;
            }
            StageEventKind::SpawnSingleEnemy { enemy_id, position } => {
                self.spawn_single(enemy_id, *position, false, event);
            }
            StageEventKind::SpawnBoss { enemy_id, position } => {
                self.spawn_single(enemy_id, *position, true, event);
            }
            StageEventKind::SpawnFormation {
                formation_id,
                position,
            } => {
                self.spawn_formation(formation_id, *position, trigger_time, event);
            }
            StageEventKind::NextTimeline { timeline_id } => {
                self.enter_timeline(timeline_id);
            }
            StageEventKind::StageClear => self.clear_stage(),
            StageEventKind::PlaySound { .. }
            | StageEventKind::PlayBgm { .. }
            | StageEventKind::ShowMessage { .. }
            | StageEventKind::CameraEffect { .. } => {}
        }
    }

    fn enter_timeline(&mut self, timeline_id: &str) {
        match self.runner.switch_timeline(timeline_id) {
            Ok(()) => self.publish_timeline(),
            // The current timeline keeps playing.
            Err(err) => error!("NextTimeline ignored: {err}"),
        }
    }

    fn publish_timeline(&mut self) {
        let Some(timeline) = self.runner.active_timeline() else {
            return;
        };
        self.scroll.speed = timeline.scroll_speed;
        self.scroll.background_id = timeline.background_id.clone();

        info!("timeline '{}' active", timeline.id);
        self.timeline_changed.write(TimelineChanged {
            timeline_id: timeline.id.clone(),
            name: timeline.name.clone(),
            scroll_speed: timeline.scroll_speed,
        });
    }

    // -------------------------------------------------------------------------
    // Spawning
    // -------------------------------------------------------------------------

    fn spawn_single(&mut self, enemy_id: &str, position: Vec2, boss: bool, source: &StageEvent) {
        let Some(entity) = self.spawn_enemy_at(enemy_id, position, boss) else {
            return;
        };
        if let Some(follow_up) = &source.on_destroy {
            self.tasks
                .watchers
                .push(DestroyWatcher::new(vec![entity], follow_up.clone(), source.id.clone()));
        }
    }

    fn spawn_formation(&mut self, formation_id: &str, origin: Vec2, trigger_time: f32, source: &StageEvent) {
        let Some(formation) = self.enemies.formation(formation_id) else {
            warn!("{}", StageError::UnknownFormation(formation_id.to_owned()));
            return;
        };
        let overshoot = self.runner.playhead() - trigger_time;
        let task = FormationTask::new(
            formation,
            origin,
            overshoot,
            source.on_destroy.clone(),
            source.id.clone(),
        );
        self.tasks.formations.push(task);
    }

    /// Spawn one formation member relative to `origin`. Members never get their own watcher.
    pub fn spawn_member(&mut self, member: &FormationMember, origin: Vec2) -> Option<Entity> {
        self.spawn_enemy_at(&member.enemy_id, origin + member.local_position, false)
    }

    fn spawn_enemy_at(&mut self, enemy_id: &str, position: Vec2, boss: bool) -> Option<Entity> {
        let Some(def) = self.enemies.enemy(enemy_id) else {
            warn!("{}", StageError::UnknownEnemy(enemy_id.to_owned()));
            return None;
        };
        Some(spawn_enemy(
            &mut self.commands,
            def,
            &self.patterns,
            position,
            boss,
            self.assets.as_deref(),
        ))
    }
}
